//! Action dispatch for the rodney system.
//!
//! Provides the [`MutationExecutor`] and [`RecordSource`] collaborator traits,
//! the [`ActionDispatcher`] that turns evaluated formula text into mutation
//! requests, and the [`RecordSession`] that owns the busy flag and the
//! currently loaded record.

pub mod dispatcher;
pub mod error;
pub mod memory;
pub mod session;
pub mod traits;

// Re-exports for convenience.
pub use dispatcher::ActionDispatcher;
pub use error::{RemoteError, SessionError};
pub use memory::{RecordingExecutor, SnapshotSource};
pub use session::{BusyFlag, BusyGuard, DEFAULT_FORMULA, RecordSession};
pub use traits::{MutationExecutor, RecordFields, RecordSource};
