use anyhow::{Context, Result};
use nir_consolidate::dom;
use nir_consolidate::error::DocumentError;
use nir_consolidate::model::ReportKind;
use tracing::info;

use crate::cli::ExtractArgs;
use crate::util::{print_json_pretty, read_bytes, write_json_pretty};

pub fn run(args: ExtractArgs) -> Result<()> {
    let kind = ReportKind::from(args.kind);
    let raw = read_bytes(&args.input)?;

    let report = dom::decode_utf8(&raw)
        .and_then(|text| nir_consolidate::extract(&text, kind))
        .map_err(|err| DocumentError::new(kind, err))
        .with_context(|| format!("failed to extract {}", args.input.display()))?;

    info!(
        kind = %kind,
        verdict = %report.verdict(),
        sensor_id = report.sensor_id().unwrap_or_default(),
        charts = report.charts().len(),
        "report extracted"
    );

    match &args.output {
        Some(path) => {
            write_json_pretty(path, &report)?;
            info!(path = %path.display(), "wrote extracted record");
        }
        None => print_json_pretty(&report)?,
    }

    Ok(())
}
