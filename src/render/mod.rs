//! Output formats for fetched news.

pub mod fb2;
pub mod json;
pub mod pdf;
pub mod text;

use std::path::PathBuf;

pub use fb2::Fb2Document;
pub use pdf::PdfRenderer;
pub use text::TextRenderer;

/// How fetched news is presented.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputFormat {
    /// Labelled plain text, returned to the caller.
    Text,
    /// Pretty JSON, returned or written to `path`.
    Json { path: Option<PathBuf> },
    /// FictionBook 2 document written to `path`.
    Fb2 { path: PathBuf },
    /// PDF document written to `path`.
    Pdf { path: PathBuf },
}
