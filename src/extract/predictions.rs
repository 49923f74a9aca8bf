use kuchiki::NodeRef;
use serde::Serialize;
use tracing::debug;

use super::charts::{ChartScript, paired_charts, scanned_charts};
use crate::dom;
use crate::model::FieldMap;
use crate::status::{Status, predictions_verdict};

const LABEL_DECORATIONS: [char; 5] = ['🔬', '📅', '📦', '💡', ':'];
const HEADER_SUFFIX: &str = "(Media ± SD)";
const HEADER_SEPARATOR: &str = "|";

pub const SENSOR_ID_KEY: &str = "Sensor NIR";
pub const REPORT_DATE_KEY: &str = "Fecha del Reporte";
pub const PRODUCT_COUNT_KEY: &str = "Productos Analizados";
pub const LAMP_COUNT_KEY: &str = "Lámparas Comparadas";

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct GeneralInfo {
    pub fields: FieldMap,
    pub lamps: Vec<String>,
}

impl GeneralInfo {
    pub fn sensor_id(&self) -> Option<&str> {
        self.fields.get(SENSOR_ID_KEY)
    }

    pub fn report_date(&self) -> Option<&str> {
        self.fields.get(REPORT_DATE_KEY)
    }

    pub fn product_count(&self) -> Option<&str> {
        self.fields.get(PRODUCT_COUNT_KEY)
    }

    pub fn lamp_count(&self) -> Option<&str> {
        self.fields.get(LAMP_COUNT_KEY)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LampRow {
    pub lamp: String,
    pub samples: String,
    pub values: FieldMap,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductResult {
    pub name: String,
    /// Parameter headers, lamp and sample-count columns excluded.
    pub parameters: Vec<String>,
    pub rows: Vec<LampRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PredictionsRecord {
    pub general: GeneralInfo,
    pub products: Vec<ProductResult>,
    pub charts: Vec<ChartScript>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductVariability {
    pub product: String,
    pub lamp_count: usize,
    pub parameter_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ComparativeRow {
    pub product: String,
    pub lamp: String,
    pub samples: String,
    pub values: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionsSummary {
    pub sensor_id: Option<String>,
    pub date: Option<String>,
    pub product_count: Option<String>,
    pub lamp_count: Option<String>,
    pub lamps: Vec<String>,
    pub products: Vec<String>,
    pub variability: Vec<ProductVariability>,
    pub verdict: Status,
}

impl PredictionsRecord {
    pub fn verdict(&self) -> Status {
        predictions_verdict(self.products.len())
    }

    pub fn sensor_id(&self) -> Option<&str> {
        self.general.sensor_id()
    }

    /// Products compared across at least two lamps.
    pub fn lamp_variability(&self) -> Vec<ProductVariability> {
        self.products
            .iter()
            .filter(|product| product.rows.len() >= 2)
            .map(|product| ProductVariability {
                product: product.name.clone(),
                lamp_count: product.rows.len(),
                parameter_count: product.parameters.len(),
            })
            .collect()
    }

    /// One row per (product, lamp) with the first `max_parameters` parameters.
    pub fn comparative_table(&self, max_parameters: usize) -> Vec<ComparativeRow> {
        self.products
            .iter()
            .flat_map(|product| {
                product.rows.iter().map(move |row| ComparativeRow {
                    product: product.name.clone(),
                    lamp: row.lamp.clone(),
                    samples: row.samples.clone(),
                    values: product
                        .parameters
                        .iter()
                        .take(max_parameters)
                        .map(|parameter| {
                            let value = row.values.get(parameter).unwrap_or("N/A");
                            (parameter.clone(), value.to_string())
                        })
                        .collect(),
                })
            })
            .collect()
    }

    pub fn summary(&self) -> PredictionsSummary {
        PredictionsSummary {
            sensor_id: self.general.sensor_id().map(str::to_string),
            date: self.general.report_date().map(str::to_string),
            product_count: self.general.product_count().map(str::to_string),
            lamp_count: self.general.lamp_count().map(str::to_string),
            lamps: self.general.lamps.clone(),
            products: self.products.iter().map(|product| product.name.clone()).collect(),
            variability: self.lamp_variability(),
            verdict: self.verdict(),
        }
    }
}

pub fn extract(document: &NodeRef) -> PredictionsRecord {
    let mut charts = paired_charts(document);
    for chart in scanned_charts(document) {
        if !charts
            .iter()
            .any(|known| known.container_id == chart.container_id)
        {
            charts.push(chart);
        }
    }

    let record = PredictionsRecord {
        general: extract_general_info(document),
        products: extract_products(document),
        charts,
    };

    debug!(
        info_fields = record.general.fields.len(),
        lamps = record.general.lamps.len(),
        products = record.products.len(),
        charts = record.charts.len(),
        "predictions report extracted"
    );

    record
}

fn extract_general_info(document: &NodeRef) -> GeneralInfo {
    let Some(info_box) = dom::find_first(document, "div", Some("info-box")) else {
        debug!("predictions report has no general info box");
        return GeneralInfo::default();
    };

    let mut fields = FieldMap::new();
    for item in dom::find_all(&info_box, "div", Some("info-item")) {
        let label = dom::find_first(&item, "span", Some("info-label"));
        let value = dom::find_first(&item, "span", Some("info-value"));
        if let (Some(label), Some(value)) = (label, value) {
            let label = dom::strip_chars(&dom::text(&label), &LABEL_DECORATIONS);
            fields.insert(label, dom::text(&value));
        }
    }

    let lamps = dom::find_first(&info_box, "ul", None)
        .map(|list| {
            dom::find_all(&list, "li", None)
                .iter()
                .map(dom::text)
                .collect()
        })
        .unwrap_or_default();

    GeneralInfo { fields, lamps }
}

fn extract_products(document: &NodeRef) -> Vec<ProductResult> {
    dom::find_all(document, "div", Some("section"))
        .iter()
        .filter_map(extract_product)
        .collect()
}

fn extract_product(section: &NodeRef) -> Option<ProductResult> {
    let name = dom::text(&dom::find_first(section, "h3", None)?);
    let table = dom::find_first(section, "table", None)?;

    let header_row = dom::find_first(&table, "thead", None)
        .and_then(|head| dom::find_first(&head, "tr", None))
        .or_else(|| {
            dom::find_all(&table, "tr", None)
                .into_iter()
                .find(|row| !dom::find_all(row, "th", None).is_empty())
        });
    let headers: Vec<String> = header_row
        .map(|row| {
            dom::find_all(&row, "th", None)
                .iter()
                .map(|cell| clean_header(&dom::text_joined(cell, HEADER_SEPARATOR)))
                .collect()
        })
        .unwrap_or_default();

    let body_rows = match dom::find_first(&table, "tbody", None) {
        Some(body) => dom::find_all(&body, "tr", None),
        None => Vec::new(),
    };

    let rows = body_rows
        .iter()
        .map(dom::cell_texts)
        .filter(|cells| !cells.is_empty())
        .map(|cells| lamp_row(&headers, &cells))
        .collect();

    Some(ProductResult {
        name,
        parameters: headers.iter().skip(2).cloned().collect(),
        rows,
    })
}

fn clean_header(raw: &str) -> String {
    raw.replace(HEADER_SUFFIX, "")
        .trim()
        .trim_matches(|ch| ch == '|')
        .trim()
        .to_string()
}

fn lamp_row(headers: &[String], cells: &[String]) -> LampRow {
    let values = headers
        .iter()
        .zip(cells)
        .skip(2)
        .map(|(header, value)| (header.clone(), value.clone()))
        .collect();

    LampRow {
        lamp: cells.first().cloned().unwrap_or_default(),
        samples: cells.get(1).cloned().unwrap_or_default(),
        values,
    }
}
