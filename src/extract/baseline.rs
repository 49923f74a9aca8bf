use kuchiki::NodeRef;
use serde::Serialize;
use tracing::{debug, warn};

use super::charts::{ChartScript, paired_charts};
use crate::dom::{self, KeyValueLayout};
use crate::model::FieldMap;
use crate::status::{Status, VerificationState, baseline_verdict};

const CLIENT_INFO_ID: &str = "info-cliente";
const WSTD_ID: &str = "wstd-section";
const PROCESS_ID: &str = "process-details";
const CORRECTION_STATS_ID: &str = "correction-stats";
const BASELINE_INFO_ID: &str = "baseline-info";
const VERIFICATION_ID: &str = "verification-section";

const WSTD_STATUS_CLASSES: [&str; 3] = ["status-good", "status-warning", "status-fail"];
const CONCLUSION_CLASSES: [&str; 4] = [
    "status-good",
    "status-warning",
    "status-bad",
    "status-fail",
];
const VERIFICATION_METRICS_HEADINGS: [&str; 2] = ["Métricas de Verificación", "Verification Metrics"];

pub const SENSOR_ID_KEYS: [&str; 2] = ["ID del Sensor", "Sensor ID"];
pub const RMS_KEYS: [&str; 1] = ["RMS"];
pub const MAX_DIFF_KEYS: [&str; 3] = ["Diferencia Máxima", "Maximum Difference", "Max Diff"];
pub const MAX_CORRECTION_KEYS: [&str; 2] = ["Corrección Máxima", "Maximum Correction"];
pub const CORRECTION_RMS_KEYS: [&str; 2] = ["RMS de la Corrección", "RMS of Correction"];

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WstdDiagnostic {
    pub status: Option<String>,
    pub metrics: FieldMap,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Verification {
    pub metrics: FieldMap,
    /// Present only when verification metrics were found.
    pub state: Option<VerificationState>,
    pub conclusion: Option<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct BaselineRecord {
    pub client_info: FieldMap,
    pub wstd: WstdDiagnostic,
    pub process_details: FieldMap,
    pub correction_stats: FieldMap,
    pub baseline_info: FieldMap,
    pub verification: Verification,
    pub charts: Vec<ChartScript>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BaselineSummary {
    pub sensor_id: Option<String>,
    pub date: Option<String>,
    pub configuration: Option<String>,
    pub max_correction: Option<String>,
    pub correction_rms: Option<String>,
    pub verdict: Status,
}

impl BaselineRecord {
    pub fn verdict(&self) -> Status {
        baseline_verdict(self.verification.conclusion.as_deref())
    }

    pub fn sensor_id(&self) -> Option<&str> {
        self.client_info.get_any(&SENSOR_ID_KEYS)
    }

    pub fn max_correction(&self) -> Option<&str> {
        self.correction_stats.get_any(&MAX_CORRECTION_KEYS)
    }

    pub fn correction_rms(&self) -> Option<&str> {
        self.correction_stats.get_any(&CORRECTION_RMS_KEYS)
    }

    pub fn summary(&self) -> BaselineSummary {
        BaselineSummary {
            sensor_id: self.sensor_id().map(str::to_string),
            date: self.client_info.get("Fecha").map(str::to_string),
            configuration: self.process_details.get("Configuración").map(str::to_string),
            max_correction: self.max_correction().map(str::to_string),
            correction_rms: self.correction_rms().map(str::to_string),
            verdict: self.verdict(),
        }
    }
}

pub fn extract(document: &NodeRef) -> BaselineRecord {
    let record = BaselineRecord {
        client_info: dom::section_table(document, CLIENT_INFO_ID, KeyValueLayout::PAIRS),
        wstd: extract_wstd(document),
        process_details: dom::section_table(
            document,
            PROCESS_ID,
            KeyValueLayout {
                strip_colon: false,
                ..KeyValueLayout::PAIRS
            },
        ),
        correction_stats: dom::section_table(document, CORRECTION_STATS_ID, KeyValueLayout::METRICS),
        baseline_info: dom::section_table(
            document,
            BASELINE_INFO_ID,
            KeyValueLayout {
                strip_colon: false,
                ..KeyValueLayout::PAIRS
            },
        ),
        verification: extract_verification(document),
        charts: paired_charts(document),
    };

    debug!(
        client_fields = record.client_info.len(),
        correction_fields = record.correction_stats.len(),
        verification_metrics = record.verification.metrics.len(),
        has_conclusion = record.verification.conclusion.is_some(),
        charts = record.charts.len(),
        "baseline report extracted"
    );

    record
}

fn extract_wstd(document: &NodeRef) -> WstdDiagnostic {
    let Some(section) = dom::find_by_id(document, WSTD_ID) else {
        debug!("baseline report has no WSTD diagnostic section");
        return WstdDiagnostic::default();
    };

    let metrics = dom::find_first(&section, "table", None)
        .map(|table| dom::key_value_table(&table, KeyValueLayout::METRICS))
        .unwrap_or_default();
    let status = dom::find_all(&section, "span", None)
        .into_iter()
        .find(|span| dom::has_any_class(span, &WSTD_STATUS_CLASSES))
        .map(|span| dom::text(&span));

    WstdDiagnostic { status, metrics }
}

fn extract_verification(document: &NodeRef) -> Verification {
    let Some(section) = dom::find_by_id(document, VERIFICATION_ID) else {
        debug!("baseline report has no verification section");
        return Verification::default();
    };

    let metrics = verification_metrics(&section);
    let state = if metrics.is_empty() {
        None
    } else {
        let state = VerificationState::from_raw(
            metrics.get_any(&RMS_KEYS),
            metrics.get_any(&MAX_DIFF_KEYS),
        );
        if state == VerificationState::Unknown {
            warn!(
                rms = metrics.get_any(&RMS_KEYS).unwrap_or_default(),
                max_diff = metrics.get_any(&MAX_DIFF_KEYS).unwrap_or_default(),
                "verification metrics are not numeric"
            );
        }
        Some(state)
    };

    let (conclusion, recommendations) = match conclusion_block(&section) {
        Some(block) => {
            let paragraphs = dom::find_all(&block, "p", None)
                .iter()
                .map(dom::text)
                .filter(|text| !text.is_empty())
                .collect::<Vec<_>>();
            let conclusion = if paragraphs.is_empty() {
                None
            } else {
                Some(paragraphs.join(" "))
            };
            let recommendations = dom::find_first(&block, "ul", None)
                .map(|list| {
                    dom::find_all(&list, "li", None)
                        .iter()
                        .map(dom::text)
                        .collect()
                })
                .unwrap_or_default();
            (conclusion, recommendations)
        }
        None => (None, Vec::new()),
    };

    Verification {
        metrics,
        state,
        conclusion,
        recommendations,
    }
}

fn verification_metrics(section: &NodeRef) -> FieldMap {
    dom::following_element_siblings(section)
        .into_iter()
        .filter(|sibling| dom::is_tag(sibling, "div") && dom::has_class(sibling, "info-box"))
        .find(|info_box| {
            dom::find_first(info_box, "h2", None)
                .map(|heading| dom::contains_keyword(&dom::text(&heading), &VERIFICATION_METRICS_HEADINGS))
                .unwrap_or(false)
        })
        .and_then(|info_box| dom::find_first(&info_box, "table", None))
        .map(|table| dom::key_value_table(&table, KeyValueLayout::METRICS))
        .unwrap_or_default()
}

fn conclusion_block(section: &NodeRef) -> Option<NodeRef> {
    let is_conclusion =
        |node: &NodeRef| dom::is_tag(node, "div") && dom::has_any_class(node, &CONCLUSION_CLASSES);

    dom::find_all(section, "div", None)
        .into_iter()
        .find(|node| is_conclusion(node))
        .or_else(|| {
            dom::following_element_siblings(section)
                .into_iter()
                .find(|node| is_conclusion(node))
        })
}
