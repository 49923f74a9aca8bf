use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand, ValueEnum};
use nir_consolidate::model::ReportKind;

#[derive(Parser, Debug)]
#[command(
    name = "nir-consolidate",
    version,
    about = "Consolidates NIR service reports into a single HTML document"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Extract one report and print its typed record as JSON.
    Extract(ExtractArgs),
    /// Build the consolidated document from up to three reports.
    Consolidate(ConsolidateArgs),
    /// Print per-report verdicts and the global status without rendering.
    Status(StatusArgs),
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum KindArg {
    Baseline,
    Validation,
    Predictions,
}

impl From<KindArg> for ReportKind {
    fn from(value: KindArg) -> Self {
        match value {
            KindArg::Baseline => ReportKind::Baseline,
            KindArg::Validation => ReportKind::Validation,
            KindArg::Predictions => ReportKind::Predictions,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum EmbedMode {
    Inline,
    Detached,
}

impl EmbedMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Inline => "inline",
            Self::Detached => "detached",
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct ExtractArgs {
    #[arg(long, value_enum)]
    pub kind: KindArg,

    #[arg(long)]
    pub input: PathBuf,

    /// Write the record here instead of stdout.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct ReportInputs {
    #[arg(long)]
    pub baseline: Option<PathBuf>,

    #[arg(long)]
    pub validation: Option<PathBuf>,

    #[arg(long)]
    pub predictions: Option<PathBuf>,
}

impl ReportInputs {
    pub fn supplied(&self) -> Vec<(ReportKind, &Path)> {
        [
            (ReportKind::Baseline, self.baseline.as_deref()),
            (ReportKind::Validation, self.validation.as_deref()),
            (ReportKind::Predictions, self.predictions.as_deref()),
        ]
        .into_iter()
        .filter_map(|(kind, path)| path.map(|path| (kind, path)))
        .collect()
    }
}

#[derive(Args, Debug, Clone, Default)]
pub struct MetadataArgs {
    /// JSON file with pre-filled service metadata.
    #[arg(long)]
    pub metadata: Option<PathBuf>,

    #[arg(long)]
    pub sensor_id: Option<String>,

    #[arg(long)]
    pub date: Option<String>,

    #[arg(long)]
    pub technician: Option<String>,

    #[arg(long)]
    pub client: Option<String>,

    #[arg(long)]
    pub location: Option<String>,

    #[arg(long)]
    pub model: Option<String>,

    #[arg(long)]
    pub context: Option<String>,

    #[arg(long)]
    pub notes: Option<String>,

    #[arg(long)]
    pub reference_lamp: Option<String>,

    #[arg(long)]
    pub new_lamp: Option<String>,

    #[arg(long, default_value_t = false)]
    pub maintenance_performed: bool,

    #[arg(long, default_value_t = false)]
    pub baseline_adjusted: bool,

    #[arg(long, default_value_t = false)]
    pub optical_validation_performed: bool,

    #[arg(long, default_value_t = false)]
    pub predictions_performed: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ConsolidateArgs {
    #[command(flatten)]
    pub inputs: ReportInputs,

    #[command(flatten)]
    pub metadata: MetadataArgs,

    #[arg(long)]
    pub output: PathBuf,

    #[arg(long, value_enum, default_value_t = EmbedMode::Detached)]
    pub embed: EmbedMode,

    /// Skip unreadable reports instead of aborting.
    #[arg(long, default_value_t = false)]
    pub allow_partial: bool,

    #[arg(long, default_value_t = false)]
    pub no_timestamp: bool,

    #[arg(long, default_value_t = 3)]
    pub product_preview: usize,

    #[arg(long)]
    pub manifest_path: Option<PathBuf>,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[command(flatten)]
    pub inputs: ReportInputs,

    #[arg(long, default_value_t = false)]
    pub json: bool,
}
