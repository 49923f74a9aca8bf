use anyhow::{Context, Result};
use nir_consolidate::metadata::ServiceMetadata;
use nir_consolidate::model::ConsolidationManifest;
use nir_consolidate::pipeline::{self, ReportSet};
use nir_consolidate::render::{DetachedWindow, EmbedStrategy, InlineFrame, RenderOptions, Renderer};
use tracing::{info, warn};

use crate::cli::{ConsolidateArgs, EmbedMode, MetadataArgs};
use crate::commands::load_reports;
use crate::util::{now_utc_string, read_bytes, today_string, write_json_pretty, write_text};

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: ConsolidateArgs) -> Result<()> {
    let supplied = args.inputs.supplied();
    if supplied.is_empty() {
        warn!("no reports supplied; the consolidated document will only carry metadata");
    }

    let loaded = load_reports(&supplied)?;
    if let Some(first) = loaded.failures.first()
        && !args.allow_partial
    {
        return Err(anyhow::Error::new(first.clone()))
            .context("report extraction failed; pass --allow-partial to skip unreadable reports");
    }
    let warnings: Vec<String> = loaded.failures.iter().map(ToString::to_string).collect();

    let metadata = resolve_metadata(&args.metadata, &loaded.reports)?;
    info!(
        sensor_id = %metadata.sensor_id,
        date = %metadata.date,
        client = %metadata.client,
        "service metadata resolved"
    );

    let status = pipeline::reconcile(&loaded.reports);
    info!(
        status = %status,
        reports = loaded.reports.len(),
        skipped = warnings.len(),
        "global status reconciled"
    );

    let generated_at = now_utc_string();
    let embed: Box<dyn EmbedStrategy> = match args.embed {
        EmbedMode::Inline => Box::new(InlineFrame),
        EmbedMode::Detached => Box::new(DetachedWindow),
    };
    let renderer = Renderer::new(embed).with_options(RenderOptions {
        generated_at: (!args.no_timestamp).then(|| generated_at.clone()),
        product_preview: args.product_preview,
    });

    let html = renderer.render(&metadata, &loaded.reports, status);
    write_text(&args.output, &html)?;
    info!(
        path = %args.output.display(),
        bytes = html.len(),
        embed = args.embed.as_str(),
        "wrote consolidated report"
    );

    if let Some(manifest_path) = &args.manifest_path {
        let manifest = ConsolidationManifest {
            manifest_version: MANIFEST_VERSION,
            generated_at,
            output_path: args.output.display().to_string(),
            embed_strategy: args.embed.as_str().to_string(),
            global_status: status,
            inputs: loaded.inputs,
            warnings,
        };
        write_json_pretty(manifest_path, &manifest)?;
        info!(path = %manifest_path.display(), "wrote run manifest");
    }

    Ok(())
}

/// Metadata file, then explicit flags, then values found in the reports,
/// then today's date for a still-missing date.
fn resolve_metadata(args: &MetadataArgs, reports: &ReportSet) -> Result<ServiceMetadata> {
    let mut metadata = match &args.metadata {
        Some(path) => {
            let raw = read_bytes(path)?;
            serde_json::from_slice(&raw)
                .with_context(|| format!("failed to parse metadata {}", path.display()))?
        }
        None => ServiceMetadata::default(),
    };

    apply_overrides(&mut metadata, args);
    reports.autofill(&mut metadata);

    if metadata.date.trim().is_empty() {
        metadata.date = today_string();
    }

    Ok(metadata)
}

fn apply_overrides(metadata: &mut ServiceMetadata, args: &MetadataArgs) {
    let text_fields = [
        (&mut metadata.sensor_id, &args.sensor_id),
        (&mut metadata.date, &args.date),
        (&mut metadata.technician, &args.technician),
        (&mut metadata.client, &args.client),
        (&mut metadata.location, &args.location),
        (&mut metadata.model, &args.model),
        (&mut metadata.context, &args.context),
        (&mut metadata.notes, &args.notes),
        (&mut metadata.reference_lamp, &args.reference_lamp),
        (&mut metadata.new_lamp, &args.new_lamp),
    ];
    for (slot, value) in text_fields {
        if let Some(value) = value {
            *slot = value.clone();
        }
    }

    metadata.maintenance_performed |= args.maintenance_performed;
    metadata.baseline_adjusted |= args.baseline_adjusted;
    metadata.optical_validation_performed |= args.optical_validation_performed;
    metadata.predictions_performed |= args.predictions_performed;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_file_values_and_keep_the_rest() {
        let mut metadata = ServiceMetadata {
            sensor_id: "from-file".to_string(),
            client: "File Corp".to_string(),
            baseline_adjusted: true,
            ..ServiceMetadata::default()
        };
        let args = MetadataArgs {
            sensor_id: Some("91-7".to_string()),
            predictions_performed: true,
            ..MetadataArgs::default()
        };

        apply_overrides(&mut metadata, &args);

        assert_eq!(metadata.sensor_id, "91-7");
        assert_eq!(metadata.client, "File Corp");
        assert!(metadata.baseline_adjusted);
        assert!(metadata.predictions_performed);
    }

    #[test]
    fn missing_date_falls_back_to_today() {
        let metadata = resolve_metadata(&MetadataArgs::default(), &ReportSet::new())
            .expect("metadata without a file should resolve");
        assert_eq!(metadata.date, today_string());
    }
}
