//! Core types for the rodney system.
//!
//! Holds the record data model (fields, updatable columns, catalogs), the
//! action vocabulary, and the normalized mutation requests handed to an
//! external executor.

pub mod action;
pub mod enums;
pub mod field;
pub mod request;
pub mod snapshot;
pub mod validation;

pub use action::{ActionKind, ActionParams, ParseActionKindError};
pub use enums::ColumnKind;
pub use field::{ColumnDescriptor, Field, FieldCatalog, RecordContext};
pub use request::{MutationRequest, NAME_COLUMN_ID, Outcome};
pub use snapshot::{RecordSnapshot, SnapshotError};
pub use validation::ValidationError;
