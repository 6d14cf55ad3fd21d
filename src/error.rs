//! Error types for the geoplot crate.
//!
//! This module defines a single error enum covering every failure mode in
//! the crate: parameter resolution, field validation, rendering and I/O.

use thiserror::Error;

/// The main error type for geoplot operations.
#[derive(Error, Debug)]
pub enum GeoplotError {
    /// Projection name outside the supported set
    #[error("Unsupported projection: {given}. Projection must be one of: {valid}")]
    UnsupportedProjection { given: String, valid: String },

    /// Domain not valid for the selected projection family
    #[error("Invalid domain: {given}. When projection is {projection}, domain must be {valid}")]
    InvalidDomain {
        given: String,
        projection: String,
        valid: String,
    },

    /// Field data dimensionality or shape mismatch, detected at plot time
    #[error("Invalid field dimensions: {message}")]
    InvalidFieldDimension { message: String },

    /// Invalid parameter errors
    #[error("Invalid parameter: {param} - {message}")]
    InvalidParameter { param: String, message: String },

    /// Rendering surface errors
    #[error("Render error: {message}")]
    Render { message: String },

    /// Raster encoding errors
    #[error("Image encoding error: {message}")]
    ImageEncoding { message: String },

    /// Overlay geometry errors
    #[error("Overlay error: {message}")]
    Overlay { message: String },

    /// Configuration errors
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience type alias for Results with GeoplotError
pub type Result<T> = std::result::Result<T, GeoplotError>;
