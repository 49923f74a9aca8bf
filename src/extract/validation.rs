use kuchiki::NodeRef;
use serde::Serialize;
use tracing::{debug, warn};

use super::charts::{ChartScript, paired_charts};
use crate::dom::{self, KeyValueLayout};
use crate::model::FieldMap;
use crate::status::{Status, status_from_cell, validation_verdict};

const SERVICE_INFO_ID: &str = "info-servicio";
const EXECUTIVE_SUMMARY_ID: &str = "resumen-ejecutivo";
const CRITERIA_ID: &str = "criterios-validacion";
const GLOBAL_STATS_ID: &str = "estadisticas-globales";
const DETAILED_RESULTS_ID: &str = "resultados-detallados";

const STATUS_EMOJI: [char; 4] = ['✅', '⚠', '\u{fe0f}', '❌'];
const CONCLUSION_KEYWORDS: [&str; 2] = ["validación", "validation"];

pub const TOTAL_KEY: &str = "Total Estándares";
pub const VALIDATED_KEY: &str = "Validados";
pub const REVIEW_KEY: &str = "Revisar";
pub const FAILED_KEY: &str = "Fallidos";
pub const SENSOR_ID_KEYS: [&str; 2] = ["ID del Sensor", "Sensor ID"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExecutiveSummary {
    pub metrics: FieldMap,
    pub conclusion: Option<String>,
    pub description: Option<String>,
}

/// Standard counts from the executive summary; `None` when missing or not an integer.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StandardCounts {
    pub total: Option<u32>,
    pub validated: Option<u32>,
    pub review: Option<u32>,
    pub failed: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Criterion {
    pub parameter: String,
    pub threshold: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateRow {
    pub metric: String,
    pub min: String,
    pub max: String,
    pub mean: String,
    pub std_dev: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KeyMetric {
    pub metric: String,
    pub value: String,
    pub evaluation: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct GlobalStats {
    pub aggregates: Vec<AggregateRow>,
    pub key_metrics: Vec<KeyMetric>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StandardResult {
    pub standard_id: String,
    pub reference_lamp: String,
    pub new_lamp: String,
    pub correlation: String,
    pub max_diff: String,
    pub rms: String,
    pub shift: Option<String>,
    pub status: Status,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ValidationRecord {
    pub service_info: FieldMap,
    pub executive_summary: ExecutiveSummary,
    pub criteria: Vec<Criterion>,
    pub global_stats: GlobalStats,
    pub results: Vec<StandardResult>,
    pub charts: Vec<ChartScript>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ValidationSummary {
    pub sensor_id: Option<String>,
    pub date: Option<String>,
    pub counts: StandardCounts,
    pub global_offset: Option<String>,
    pub mean_correlation: Option<String>,
    pub conclusion: Option<String>,
    pub verdict: Status,
}

impl ValidationRecord {
    pub fn counts(&self) -> StandardCounts {
        let metrics = &self.executive_summary.metrics;
        StandardCounts {
            total: parse_count(metrics, TOTAL_KEY),
            validated: parse_count(metrics, VALIDATED_KEY),
            review: parse_count(metrics, REVIEW_KEY),
            failed: parse_count(metrics, FAILED_KEY),
        }
    }

    pub fn verdict(&self) -> Status {
        let counts = self.counts();
        validation_verdict(counts.failed, counts.review)
    }

    pub fn sensor_id(&self) -> Option<&str> {
        self.service_info.get_any(&SENSOR_ID_KEYS)
    }

    pub fn key_metric(&self, name: &str) -> Option<&str> {
        self.global_stats
            .key_metrics
            .iter()
            .find(|row| row.metric.contains(name))
            .map(|row| row.value.as_str())
    }

    pub fn summary(&self) -> ValidationSummary {
        ValidationSummary {
            sensor_id: self.sensor_id().map(str::to_string),
            date: self.service_info.get("Fecha del Informe").map(str::to_string),
            counts: self.counts(),
            global_offset: self.key_metric("Offset Global").map(str::to_string),
            mean_correlation: self.key_metric("Correlación Media").map(str::to_string),
            conclusion: self.executive_summary.conclusion.clone(),
            verdict: self.verdict(),
        }
    }
}

fn parse_count(metrics: &FieldMap, key: &str) -> Option<u32> {
    let raw = metrics.get(key)?;
    match raw.trim().parse::<u32>() {
        Ok(value) => Some(value),
        Err(_) => {
            warn!(metric = key, value = raw, "validation count is not an integer");
            None
        }
    }
}

pub fn extract(document: &NodeRef) -> ValidationRecord {
    let record = ValidationRecord {
        service_info: dom::section_table(document, SERVICE_INFO_ID, KeyValueLayout::PAIRS),
        executive_summary: extract_executive_summary(document),
        criteria: extract_criteria(document),
        global_stats: extract_global_stats(document),
        results: extract_results(document),
        charts: paired_charts(document),
    };

    debug!(
        service_fields = record.service_info.len(),
        summary_metrics = record.executive_summary.metrics.len(),
        criteria = record.criteria.len(),
        results = record.results.len(),
        charts = record.charts.len(),
        "validation report extracted"
    );

    record
}

fn extract_executive_summary(document: &NodeRef) -> ExecutiveSummary {
    let Some(section) = dom::find_by_id(document, EXECUTIVE_SUMMARY_ID) else {
        debug!("validation report has no executive summary");
        return ExecutiveSummary::default();
    };

    let mut metrics = FieldMap::new();
    for card in dom::find_all(&section, "div", Some("metric-card")) {
        let value = dom::find_first(&card, "div", Some("metric-value"));
        let label = dom::find_first(&card, "div", Some("metric-label"));
        if let (Some(value), Some(label)) = (value, label) {
            let label = dom::strip_chars(&dom::text(&label), &STATUS_EMOJI);
            metrics.insert(label, dom::text(&value));
        }
    }

    let heading = dom::find_all(&section, "h3", None)
        .into_iter()
        .rfind(|heading| dom::contains_keyword(&dom::text(heading), &CONCLUSION_KEYWORDS));
    let conclusion = heading.as_ref().map(dom::text);
    let description = heading
        .as_ref()
        .and_then(|heading| following_paragraph(document, heading))
        .map(|paragraph| dom::text(&paragraph));

    ExecutiveSummary {
        metrics,
        conclusion,
        description,
    }
}

/// First `<p>` after `node` in document order.
fn following_paragraph(document: &NodeRef, node: &NodeRef) -> Option<NodeRef> {
    dom::elements(document)
        .skip_while(|candidate| candidate != node)
        .skip(1)
        .find(|candidate| dom::is_tag(candidate, "p"))
}

fn extract_criteria(document: &NodeRef) -> Vec<Criterion> {
    let Some(table) = dom::find_by_id(document, CRITERIA_ID)
        .and_then(|section| dom::find_first(&section, "table", None))
    else {
        return Vec::new();
    };

    dom::table_rows(&table, true)
        .iter()
        .map(dom::cell_texts)
        .filter(|cells| cells.len() >= 3)
        .map(|cells| Criterion {
            parameter: cells[0].clone(),
            threshold: cells[1].clone(),
            description: cells[2].clone(),
        })
        .collect()
}

fn extract_global_stats(document: &NodeRef) -> GlobalStats {
    let Some(section) = dom::find_by_id(document, GLOBAL_STATS_ID) else {
        return GlobalStats::default();
    };
    let tables = dom::find_all(&section, "table", None);

    let aggregates = tables
        .first()
        .map(|table| {
            dom::table_rows(table, true)
                .iter()
                .map(dom::cell_texts)
                .filter(|cells| cells.len() >= 5)
                .map(|cells| AggregateRow {
                    metric: cells[0].clone(),
                    min: cells[1].clone(),
                    max: cells[2].clone(),
                    mean: cells[3].clone(),
                    std_dev: cells[4].clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    let key_metrics = tables
        .get(1)
        .map(|table| {
            dom::table_rows(table, true)
                .iter()
                .map(dom::cell_texts)
                .filter(|cells| cells.len() >= 3)
                .map(|cells| KeyMetric {
                    metric: cells[0].clone(),
                    value: cells[1].clone(),
                    evaluation: cells[2].clone(),
                })
                .collect()
        })
        .unwrap_or_default();

    GlobalStats {
        aggregates,
        key_metrics,
    }
}

// Columns: status, id, lamp (ref), lamp (new), correlation, max diff, rms, [shift]
fn extract_results(document: &NodeRef) -> Vec<StandardResult> {
    let Some(table) = dom::find_by_id(document, DETAILED_RESULTS_ID)
        .and_then(|section| dom::find_first(&section, "table", None))
    else {
        debug!("validation report has no detailed results");
        return Vec::new();
    };

    dom::table_rows(&table, true)
        .iter()
        .map(dom::cell_texts)
        .filter(|cells| cells.len() >= 7)
        .map(|cells| StandardResult {
            status: status_from_cell(&cells[0]),
            standard_id: cells[1].clone(),
            reference_lamp: cells[2].clone(),
            new_lamp: cells[3].clone(),
            correlation: cells[4].clone(),
            max_diff: cells[5].clone(),
            rms: cells[6].clone(),
            shift: cells.get(7).cloned(),
        })
        .collect()
}
