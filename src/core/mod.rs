//! Template manager core library
//!
//! Standards, configuration, errors, and the template operations. Nothing in
//! here knows how calls arrive; see [`crate::mcp`] for the tool surface.

pub mod config;
pub mod error;
pub mod standards;
pub mod templates;
pub mod utils;

pub use error::Error;
