//! Serializable offline view of one record and its collection's columns.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::field::{ColumnDescriptor, Field, FieldCatalog, RecordContext};

/// Errors raised while reading a snapshot file.
#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON snapshot: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid YAML snapshot: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// A record as fetched from the remote, frozen to disk.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    pub record_id: String,
    pub collection_id: String,

    /// The record's own name.
    #[serde(default)]
    pub name: String,

    /// Field values in display order.
    #[serde(default)]
    pub fields: Vec<Field>,

    /// Updatable columns of the collection.
    #[serde(default)]
    pub columns: Vec<ColumnDescriptor>,
}

impl RecordSnapshot {
    /// Load a snapshot, choosing YAML for `.yaml`/`.yml` files and JSON
    /// otherwise.
    pub fn load(path: &Path) -> Result<Self, SnapshotError> {
        let content = std::fs::read_to_string(path)?;
        let is_yaml = matches!(
            path.extension().and_then(|e| e.to_str()),
            Some("yaml" | "yml")
        );
        if is_yaml {
            Ok(serde_yaml::from_str(&content)?)
        } else {
            Ok(serde_json::from_str(&content)?)
        }
    }

    pub fn context(&self) -> RecordContext {
        RecordContext::new(self.record_id.clone(), self.collection_id.clone())
    }

    pub fn catalog(&self) -> FieldCatalog {
        FieldCatalog::new(self.fields.clone(), self.columns.clone())
    }
}
