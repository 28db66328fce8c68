// ABOUTME: Error types for the tlab-slides library
// ABOUTME: Provides structured error handling for documents, slides, figures and rendering

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SlideError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to fetch remote resource: {0}")]
    FetchError(#[from] reqwest::Error),

    #[error("Invalid resource path: {0}")]
    InvalidResourcePath(String),

    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    #[error("PPTX error: {0}")]
    PptxError(String),

    #[error("Malformed presentation package: {0}")]
    PackageError(String),

    #[error("Image error: {0}")]
    ImageError(#[from] image::ImageError),

    #[error("Figure JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Headless browser error: {message}")]
    BrowserError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("No title placeholder in this slide")]
    MissingTitlePlaceholder,

    #[error("{0} is not a valid calendar date")]
    InvalidDate(String),

    #[error("Slide layout index {index} is out of range ({len} layouts)")]
    LayoutIndexOutOfRange { index: usize, len: usize },

    #[error("Input validation error: {0}")]
    ValidationError(String),
}

impl From<zip::result::ZipError> for SlideError {
    fn from(err: zip::result::ZipError) -> Self {
        SlideError::PptxError(format!("ZIP operation failed: {}", err))
    }
}

pub type Result<T> = std::result::Result<T, SlideError>;
