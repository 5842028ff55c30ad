//! # Error Types
//!
//! This module defines error types used throughout the folio library.

use thiserror::Error;

/// Main error type for folio operations
#[derive(Debug, Error)]
pub enum FolioError {
    /// A node was rendered before the configuration broadcast reached it
    #[error("Component not configured: {0}")]
    NotConfigured(&'static str),

    /// Zero, negative or non-finite size handed to the geometry engine
    #[error("Degenerate dimension: {width}x{height}")]
    DegenerateDimension { width: f64, height: f64 },

    /// Failure raised by a drawing provider
    #[error("Provider error: {0}")]
    Provider(String),

    /// Image bytes could not be read or decoded
    #[error("Image error: {0}")]
    Image(String),

    /// Invalid document description
    #[error("Document error: {0}")]
    Document(String),

    /// JSON (de)serialization error wrapper
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<image::ImageError> for FolioError {
    fn from(e: image::ImageError) -> Self {
        FolioError::Image(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        assert_eq!(
            FolioError::NotConfigured("qrcode").to_string(),
            "Component not configured: qrcode"
        );
        assert_eq!(
            FolioError::DegenerateDimension {
                width: 0.0,
                height: 10.0
            }
            .to_string(),
            "Degenerate dimension: 0x10"
        );
    }
}
