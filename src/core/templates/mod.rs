//! Template catalog management.
//!
//! This module implements the operations over the BillPay template catalog:
//! - Template types and their step lists
//! - The `template.yaml` document, generated or loaded for editing
//! - Skeleton companion files rendered with Tera
//! - Filesystem layout of the templates root
//! - Validation rules and branch fixes
//! - The `TemplateManager` tying these together

pub mod document;
pub mod generator;
pub mod kind;
pub mod manager;
pub mod outcome;
pub mod skeleton;
pub mod store;
pub mod validation;

pub use document::*;
pub use generator::*;
pub use kind::*;
pub use manager::*;
pub use outcome::*;
pub use skeleton::*;
pub use store::*;
pub use validation::*;
