//! Formula engine for the rodney system.
//!
//! A formula is plain text with `{Field Title}` placeholders and
//! `{Date|format:YYYY-MM-DD}` directives. Evaluation substitutes field values
//! from a [`rodney_core::FieldCatalog`] and renders dates, in a single pass,
//! leaving unknown placeholders untouched.

pub mod date;
pub mod engine;
pub mod parser;
pub mod types;

pub use date::format_date;
pub use engine::{evaluate, placeholders, preview, unresolved};
pub use types::{DATE_DIRECTIVE_PREFIX, Placeholder};
