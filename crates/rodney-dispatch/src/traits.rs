//! Collaborator traits -- the seams between the dispatcher and the remote.
//!
//! Consumers depend on these traits rather than on a concrete client so that
//! alternative backends (recorders, snapshots, HTTP) can be substituted.

use std::sync::Arc;

use async_trait::async_trait;

use rodney_core::{ColumnDescriptor, Field, MutationRequest, RecordContext};

use crate::error::RemoteError;

/// A record's name and its field values, in display order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFields {
    pub name: String,
    pub fields: Vec<Field>,
}

/// Executes normalized mutation requests.
///
/// Each call is a suspension point; the dispatcher awaits one call before
/// issuing the next.
#[async_trait]
pub trait MutationExecutor: Send + Sync {
    /// Execute one request. Plans (requests with `child_names`) are expanded
    /// by the dispatcher and never passed here.
    async fn execute(&self, request: &MutationRequest) -> Result<(), RemoteError>;
}

/// Fetches record data for a context.
#[async_trait]
pub trait RecordSource: Send + Sync {
    /// Fetch the record's name and field values.
    async fn fetch_fields(&self, ctx: &RecordContext) -> Result<RecordFields, RemoteError>;

    /// Fetch the updatable columns of a collection.
    async fn fetch_columns(&self, collection_id: &str)
    -> Result<Vec<ColumnDescriptor>, RemoteError>;
}

#[async_trait]
impl<T: MutationExecutor + ?Sized> MutationExecutor for Box<T> {
    async fn execute(&self, request: &MutationRequest) -> Result<(), RemoteError> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T: MutationExecutor + ?Sized> MutationExecutor for Arc<T> {
    async fn execute(&self, request: &MutationRequest) -> Result<(), RemoteError> {
        (**self).execute(request).await
    }
}

#[async_trait]
impl<T: RecordSource + ?Sized> RecordSource for Box<T> {
    async fn fetch_fields(&self, ctx: &RecordContext) -> Result<RecordFields, RemoteError> {
        (**self).fetch_fields(ctx).await
    }

    async fn fetch_columns(
        &self,
        collection_id: &str,
    ) -> Result<Vec<ColumnDescriptor>, RemoteError> {
        (**self).fetch_columns(collection_id).await
    }
}

#[async_trait]
impl<T: RecordSource + ?Sized> RecordSource for Arc<T> {
    async fn fetch_fields(&self, ctx: &RecordContext) -> Result<RecordFields, RemoteError> {
        (**self).fetch_fields(ctx).await
    }

    async fn fetch_columns(
        &self,
        collection_id: &str,
    ) -> Result<Vec<ColumnDescriptor>, RemoteError> {
        (**self).fetch_columns(collection_id).await
    }
}
