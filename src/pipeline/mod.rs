use tracing::{info, warn};

use crate::dom;
use crate::error::DocumentError;
use crate::extract::{self, BaselineRecord, PredictionsRecord, Report, ValidationRecord};
use crate::metadata::ServiceMetadata;
use crate::model::ReportKind;
use crate::status::{self, Status};


/// An extracted record kept together with the exact text it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct Sourced<R> {
    pub record: R,
    pub raw: String,
}

/// Up to one report of each kind, as supplied for a single run.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportSet {
    pub baseline: Option<Sourced<BaselineRecord>>,
    pub validation: Option<Sourced<ValidationRecord>>,
    pub predictions: Option<Sourced<PredictionsRecord>>,
}

impl ReportSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts `raw` as a `kind` report and stores it, replacing any earlier
    /// report of the same kind. Returns that report's own verdict.
    pub fn load(&mut self, kind: ReportKind, raw: &[u8]) -> Result<Status, DocumentError> {
        let text = dom::decode_utf8(raw).map_err(|err| DocumentError::new(kind, err))?;
        self.load_str(kind, text)
    }

    pub fn load_str(&mut self, kind: ReportKind, raw: String) -> Result<Status, DocumentError> {
        let report = extract::extract(&raw, kind).map_err(|err| DocumentError::new(kind, err))?;
        let verdict = report.verdict();
        info!(kind = %kind, verdict = %verdict, charts = report.charts().len(), "report extracted");
        self.insert(report, raw);
        Ok(verdict)
    }

    pub fn insert(&mut self, report: Report, raw: String) {
        match report {
            Report::Baseline(record) => self.baseline = Some(Sourced { record, raw }),
            Report::Validation(record) => self.validation = Some(Sourced { record, raw }),
            Report::Predictions(record) => self.predictions = Some(Sourced { record, raw }),
        }
    }

    pub fn contains(&self, kind: ReportKind) -> bool {
        self.raw(kind).is_some()
    }

    pub fn raw(&self, kind: ReportKind) -> Option<&str> {
        match kind {
            ReportKind::Baseline => self.baseline.as_ref().map(|source| source.raw.as_str()),
            ReportKind::Validation => self.validation.as_ref().map(|source| source.raw.as_str()),
            ReportKind::Predictions => self.predictions.as_ref().map(|source| source.raw.as_str()),
        }
    }

    pub fn present_kinds(&self) -> Vec<ReportKind> {
        ReportKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.present_kinds().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn verdict(&self, kind: ReportKind) -> Option<Status> {
        match kind {
            ReportKind::Baseline => self.baseline.as_ref().map(|source| source.record.verdict()),
            ReportKind::Validation => self.validation.as_ref().map(|source| source.record.verdict()),
            ReportKind::Predictions => self.predictions.as_ref().map(|source| source.record.verdict()),
        }
    }

    pub fn verdicts(&self) -> Vec<(ReportKind, Status)> {
        ReportKind::ALL
            .into_iter()
            .filter_map(|kind| self.verdict(kind).map(|verdict| (kind, verdict)))
            .collect()
    }

    pub fn autofill(&self, metadata: &mut ServiceMetadata) {
        metadata.autofill(
            self.baseline.as_ref().map(|source| &source.record),
            self.validation.as_ref().map(|source| &source.record),
            self.predictions.as_ref().map(|source| &source.record),
        );
    }
}

/// Global status over whichever reports are present.
pub fn reconcile(reports: &ReportSet) -> Status {
    status::reconcile(reports.verdicts().into_iter().map(|(_, verdict)| verdict))
}

/// Loads every supplied document independently. Failures are collected per
/// document; the remaining reports are still extracted.
pub fn load_all<'a, I>(inputs: I) -> (ReportSet, Vec<DocumentError>)
where
    I: IntoIterator<Item = (ReportKind, &'a [u8])>,
{
    let mut reports = ReportSet::new();
    let mut failures = Vec::new();

    for (kind, raw) in inputs {
        if let Err(err) = reports.load(kind, raw) {
            warn!(kind = %kind, error = %err, "report skipped");
            failures.push(err);
        }
    }

    (reports, failures)
}
