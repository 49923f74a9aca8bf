pub mod consolidate;
pub mod extract;
pub mod status;

use std::path::Path;

use anyhow::Result;
use nir_consolidate::error::DocumentError;
use nir_consolidate::model::{ManifestInput, ReportKind};
use nir_consolidate::pipeline::ReportSet;
use tracing::{info, warn};

use crate::util::{read_bytes, sha256_bytes};

#[derive(Debug, Default)]
pub struct LoadedReports {
    pub reports: ReportSet,
    pub inputs: Vec<ManifestInput>,
    pub failures: Vec<DocumentError>,
}

/// Reads and extracts every supplied report. IO failures abort; a document
/// that cannot be extracted is recorded and the rest still load.
pub fn load_reports(supplied: &[(ReportKind, &Path)]) -> Result<LoadedReports> {
    let mut loaded = LoadedReports::default();

    for &(kind, path) in supplied {
        let raw = read_bytes(path)?;
        let mut input = ManifestInput {
            kind,
            path: path.display().to_string(),
            bytes: raw.len(),
            sha256: sha256_bytes(&raw),
            verdict: None,
            error: None,
        };

        match loaded.reports.load(kind, &raw) {
            Ok(verdict) => {
                info!(
                    kind = %kind,
                    path = %path.display(),
                    bytes = raw.len(),
                    verdict = %verdict,
                    "loaded report"
                );
                input.verdict = Some(verdict);
            }
            Err(err) => {
                warn!(kind = %kind, path = %path.display(), error = %err, "report could not be extracted");
                input.error = Some(err.to_string());
                loaded.failures.push(err);
            }
        }

        loaded.inputs.push(input);
    }

    Ok(loaded)
}
