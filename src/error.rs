use thiserror::Error;

use crate::model::ReportKind;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("document is empty")]
    Empty,
    #[error("document is not valid UTF-8: {0}")]
    InvalidUtf8(String),
    #[error("document contains no HTML elements")]
    NoMarkup,
}

/// An extraction failure tagged with the report slot it came from.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{kind} report could not be read: {source}")]
pub struct DocumentError {
    pub kind: ReportKind,
    #[source]
    pub source: ExtractError,
}

impl DocumentError {
    pub fn new(kind: ReportKind, source: ExtractError) -> Self {
        Self { kind, source }
    }
}
