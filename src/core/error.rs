//! Error handling for the template manager.
//!
//! This module defines the `Error` type for faults that abort an operation
//! (I/O failures, unparseable documents, broken configuration), along with a
//! `Result` alias. User-facing rejections such as "template not found" are not
//! errors; they are reported through the outcome types in
//! [`crate::core::templates::outcome`].
//!
//! # Examples
//!
//! ```
//! use template_manager::core::error::{Error, Result};
//!
//! fn might_fail() -> Result<()> {
//!     Err(Error::config("templates directory is not set"))
//! }
//!
//! assert!(might_fail().is_err());
//! ```

use thiserror::Error;

/// Result type for template manager operations
pub type Result<T> = std::result::Result<T, Error>;

/// Faults raised while reading, generating, or writing templates
#[derive(Debug, Error)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing or serialization error
    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// TOML configuration parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Skeleton rendering error
    #[error("Template engine error: {0}")]
    Template(#[from] tera::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A template document whose structure cannot be worked with
    #[error("Document error: {0}")]
    Document(String),
}

impl Error {
    /// Create a new configuration error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new document error
    pub fn document<S: Into<String>>(msg: S) -> Self {
        Self::Document(msg.into())
    }
}
