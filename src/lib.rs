//! Consolidation of NIR service reports.
//!
//! Reads the HTML reports of one service visit (baseline adjustment, optical
//! validation, predictions), extracts typed records from them, reconciles a
//! global status and renders a single document that carries each original
//! report untouched.

pub mod dom;
pub mod error;
pub mod extract;
pub mod metadata;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod status;

#[cfg(test)]
mod fixtures;

pub use error::{DocumentError, ExtractError};
pub use extract::{Report, extract};
pub use metadata::ServiceMetadata;
pub use model::ReportKind;
pub use pipeline::{ReportSet, reconcile};
pub use render::{RenderOptions, Renderer, render};
pub use status::Status;
