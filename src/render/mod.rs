//! Consolidated document rendering.
//!
//! The output is a single self-contained HTML page: service header, about
//! block, executive summary with the global banner, one section per present
//! report (summary projection plus access to the untouched original) and a
//! footer. Nothing outside `RenderOptions::generated_at` varies between runs.

use tracing::debug;

use crate::metadata::ServiceMetadata;
use crate::model::ReportKind;
use crate::pipeline::ReportSet;
use crate::status::Status;

pub mod embed;
mod sections;
mod styles;
#[cfg(test)]
mod tests;

pub use embed::{DetachedWindow, EmbedStrategy, InlineFrame};

/// Products shown in the predictions summary before the "more" notice.
pub const DEFAULT_PRODUCT_PREVIEW: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Generation timestamp for the footer; omitted when `None`.
    pub generated_at: Option<String>,
    pub product_preview: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            generated_at: None,
            product_preview: DEFAULT_PRODUCT_PREVIEW,
        }
    }
}

pub struct Renderer {
    embed: Box<dyn EmbedStrategy>,
    options: RenderOptions,
}

impl Renderer {
    pub fn new(embed: Box<dyn EmbedStrategy>) -> Self {
        Self {
            embed,
            options: RenderOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    pub fn embed_strategy(&self) -> &'static str {
        self.embed.name()
    }

    pub fn render(&self, metadata: &ServiceMetadata, reports: &ReportSet, status: Status) -> String {
        let kinds = reports.present_kinds();
        debug!(
            reports = kinds.len(),
            status = %status,
            embed = self.embed.name(),
            "rendering consolidated document"
        );

        let mut body = String::new();
        body.push_str(&sections::sidebar(&kinds));
        body.push_str("<div class=\"main-content\">\n");
        body.push_str(&sections::header(metadata));
        body.push_str(sections::ABOUT_BLOCK);
        body.push_str(&sections::executive_summary(reports, status));

        for kind in kinds {
            let Some(raw) = reports.raw(kind) else {
                continue;
            };
            let summary = match kind {
                ReportKind::Baseline => reports
                    .baseline
                    .as_ref()
                    .map(|source| sections::baseline_summary(&source.record)),
                ReportKind::Validation => reports
                    .validation
                    .as_ref()
                    .map(|source| sections::validation_summary(&source.record)),
                ReportKind::Predictions => reports.predictions.as_ref().map(|source| {
                    sections::predictions_summary(&source.record, self.options.product_preview)
                }),
            }
            .unwrap_or_default();
            let verdict = reports.verdict(kind).unwrap_or_default();
            body.push_str(&sections::report_section(
                kind,
                verdict,
                &summary,
                &self.embed.embed(kind, raw),
            ));
        }

        body.push_str(&sections::footer(self.options.generated_at.as_deref()));
        body.push_str("</div>\n");

        let title = if metadata.sensor_id.is_empty() {
            "Informe Consolidado de Servicio NIR".to_string()
        } else {
            format!("Informe Consolidado - {}", metadata.sensor_id)
        };

        format!(
            "<!DOCTYPE html>\n<html lang=\"es\">\n<head>\n<meta charset=\"UTF-8\">\n<meta name=\"viewport\" content=\"width=device-width, initial-scale=1.0\">\n<title>{title}</title>\n<style>\n{styles}\n</style>\n</head>\n<body>\n{body}{script}\n</body>\n</html>\n",
            title = escape_html(&title),
            styles = styles::STYLES,
            script = embed::OPEN_ORIGINAL_SCRIPT,
        )
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(Box::new(DetachedWindow))
    }
}

/// Renders with the default embedding strategy and no timestamp.
pub fn render(metadata: &ServiceMetadata, reports: &ReportSet, status: Status) -> String {
    Renderer::default().render(metadata, reports, status)
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
