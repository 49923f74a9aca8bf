use serde::Serialize;
use tracing::debug;

use crate::dom;
use crate::error::ExtractError;
use crate::model::ReportKind;
use crate::status::Status;

pub mod baseline;
pub mod charts;
pub mod predictions;
pub mod validation;

pub use baseline::BaselineRecord;
pub use charts::ChartScript;
pub use predictions::PredictionsRecord;
pub use validation::ValidationRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "record", rename_all = "snake_case")]
pub enum Report {
    Baseline(BaselineRecord),
    Validation(ValidationRecord),
    Predictions(PredictionsRecord),
}

impl Report {
    pub fn kind(&self) -> ReportKind {
        match self {
            Self::Baseline(_) => ReportKind::Baseline,
            Self::Validation(_) => ReportKind::Validation,
            Self::Predictions(_) => ReportKind::Predictions,
        }
    }

    pub fn verdict(&self) -> Status {
        match self {
            Self::Baseline(record) => record.verdict(),
            Self::Validation(record) => record.verdict(),
            Self::Predictions(record) => record.verdict(),
        }
    }

    pub fn sensor_id(&self) -> Option<&str> {
        match self {
            Self::Baseline(record) => record.sensor_id(),
            Self::Validation(record) => record.sensor_id(),
            Self::Predictions(record) => record.sensor_id(),
        }
    }

    pub fn charts(&self) -> &[ChartScript] {
        match self {
            Self::Baseline(record) => &record.charts,
            Self::Validation(record) => &record.charts,
            Self::Predictions(record) => &record.charts,
        }
    }
}

/// Runs the extractor for `kind` over one raw report.
///
/// Only input that is not markup at all is an error; every missing section
/// or malformed value degrades to an empty field instead.
pub fn extract(raw: &str, kind: ReportKind) -> Result<Report, ExtractError> {
    let document = dom::parse_document(raw)?;
    debug!(kind = %kind, bytes = raw.len(), "parsed report document");

    let report = match kind {
        ReportKind::Baseline => Report::Baseline(baseline::extract(&document)),
        ReportKind::Validation => Report::Validation(validation::extract(&document)),
        ReportKind::Predictions => Report::Predictions(predictions::extract(&document)),
    };

    Ok(report)
}
