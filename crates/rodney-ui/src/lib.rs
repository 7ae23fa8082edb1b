//! Terminal styling for the rodney CLI.
//!
//! Provides the color palette, color detection, and the outcome and field
//! renderers used by the `rodney` binary.

pub mod styles;
