//! Error types for the converter.
//!
//! Layout reconstruction is total and never fails. Errors only arise while
//! reading the presentation package or writing the Markdown output.

/// Result type alias for converter operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while converting a presentation.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The ZIP container could not be read
    #[error("Archive error: {0}")]
    Archive(#[from] zip::result::ZipError),

    /// A package part contains malformed XML
    #[error("Malformed XML in {part}: {reason}")]
    Xml {
        /// Package part name (e.g. `ppt/slides/slide1.xml`)
        part: String,
        /// Reason reported by the XML reader
        reason: String,
    },

    /// A required package part is absent
    #[error("Missing package part: {0}")]
    MissingPart(String),

    /// The package is readable but is not a usable presentation
    #[error("Invalid presentation: {0}")]
    InvalidPresentation(String),

    /// Input format is not supported
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Build an [`Error::Xml`] for the given part.
    pub fn xml(part: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Error::Xml {
            part: part.into(),
            reason: reason.to_string(),
        }
    }
}
