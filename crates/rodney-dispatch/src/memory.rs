//! In-memory collaborators: a recording executor and a snapshot-backed
//! record source.

use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use rodney_core::{ColumnDescriptor, MutationRequest, RecordContext, RecordSnapshot};

use crate::error::RemoteError;
use crate::traits::{MutationExecutor, RecordFields, RecordSource};

/// Executor that records every request it receives instead of sending it.
///
/// Can be told to fail a given call (0-based) to exercise error paths.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    requests: Mutex<Vec<MutationRequest>>,
    fail_on: Option<(usize, String)>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail call number `call` (0-based) with `message`.
    pub fn failing_on(call: usize, message: impl Into<String>) -> Self {
        Self {
            requests: Mutex::default(),
            fail_on: Some((call, message.into())),
        }
    }

    /// Every request received so far, including a failed one.
    pub fn requests(&self) -> Vec<MutationRequest> {
        self.lock().clone()
    }

    /// Number of times `execute` was called.
    pub fn calls(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, Vec<MutationRequest>> {
        self.requests.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl MutationExecutor for RecordingExecutor {
    async fn execute(&self, request: &MutationRequest) -> Result<(), RemoteError> {
        let mut requests = self.lock();
        let call = requests.len();
        requests.push(request.clone());
        match &self.fail_on {
            Some((n, message)) if *n == call => Err(RemoteError::Remote(message.clone())),
            _ => Ok(()),
        }
    }
}

/// Record source serving one frozen record.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    snapshot: RecordSnapshot,
}

impl SnapshotSource {
    pub fn new(snapshot: RecordSnapshot) -> Self {
        Self { snapshot }
    }

    pub fn snapshot(&self) -> &RecordSnapshot {
        &self.snapshot
    }
}

#[async_trait]
impl RecordSource for SnapshotSource {
    async fn fetch_fields(&self, ctx: &RecordContext) -> Result<RecordFields, RemoteError> {
        if ctx.record_id != self.snapshot.record_id {
            return Err(RemoteError::Remote(format!(
                "item {} not found",
                ctx.record_id
            )));
        }
        Ok(RecordFields {
            name: self.snapshot.name.clone(),
            fields: self.snapshot.fields.clone(),
        })
    }

    async fn fetch_columns(
        &self,
        collection_id: &str,
    ) -> Result<Vec<ColumnDescriptor>, RemoteError> {
        if collection_id != self.snapshot.collection_id {
            return Err(RemoteError::Remote(format!(
                "board {collection_id} not found"
            )));
        }
        Ok(self.snapshot.columns.clone())
    }
}
