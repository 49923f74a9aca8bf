use anyhow::{Result, bail};
use nir_consolidate::model::ManifestInput;
use nir_consolidate::pipeline;
use nir_consolidate::status::Status;
use serde::Serialize;
use tracing::info;

use crate::cli::StatusArgs;
use crate::commands::load_reports;
use crate::util::print_json_pretty;

#[derive(Debug, Serialize)]
struct StatusSummary<'a> {
    global_status: Status,
    inputs: &'a [ManifestInput],
}

pub fn run(args: StatusArgs) -> Result<()> {
    let supplied = args.inputs.supplied();
    if supplied.is_empty() {
        bail!("no reports supplied; pass at least one of --baseline, --validation, --predictions");
    }

    let loaded = load_reports(&supplied)?;
    let status = pipeline::reconcile(&loaded.reports);
    info!(
        status = %status,
        reports = loaded.reports.len(),
        failed = loaded.failures.len(),
        "status computed"
    );

    if args.json {
        return print_json_pretty(&StatusSummary {
            global_status: status,
            inputs: &loaded.inputs,
        });
    }

    for input in &loaded.inputs {
        match (input.verdict, &input.error) {
            (Some(verdict), _) => println!("{:<12} {} {}", input.kind.as_str(), verdict.icon(), verdict),
            (None, Some(error)) => println!("{:<12} ERROR {error}", input.kind.as_str()),
            (None, None) => println!("{:<12} -", input.kind.as_str()),
        }
    }
    println!("{:<12} {} {}", "global", status.icon(), status.banner_text());

    Ok(())
}
