//! Record fields and the catalog they are looked up in.

use serde::{Deserialize, Serialize};

use crate::enums::ColumnKind;

/// A named, valued attribute of the record being acted upon.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    /// Column identifier on the remote collection.
    pub id: String,

    /// Display title; placeholders refer to fields by this name.
    pub title: String,

    /// Human-readable rendering of the value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,

    /// Raw (usually JSON-encoded) value as stored remotely.
    #[serde(default, alias = "value", skip_serializing_if = "Option::is_none")]
    pub raw_value: Option<String>,
}

impl Field {
    /// Build a field with a text value and no raw value.
    pub fn new(id: impl Into<String>, title: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            text: Some(text.into()),
            raw_value: None,
        }
    }

    /// The value a placeholder renders to: `text`, else `raw_value`, else `""`.
    /// Empty strings count as unset.
    pub fn display_value(&self) -> &str {
        [self.text.as_deref(), self.raw_value.as_deref()]
            .into_iter()
            .flatten()
            .find(|v| !v.is_empty())
            .unwrap_or("")
    }
}

/// Descriptor of an updatable column on the containing collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDescriptor {
    pub id: String,
    pub title: String,
    #[serde(default, alias = "type")]
    pub kind: ColumnKind,
}

/// Identifies the record and collection an action runs against.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordContext {
    pub record_id: String,
    pub collection_id: String,
}

impl RecordContext {
    pub fn new(record_id: impl Into<String>, collection_id: impl Into<String>) -> Self {
        Self {
            record_id: record_id.into(),
            collection_id: collection_id.into(),
        }
    }
}

/// Immutable view of a record's fields (in display order) and of the
/// updatable columns of its collection.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldCatalog {
    fields: Vec<Field>,
    columns: Vec<ColumnDescriptor>,
}

impl FieldCatalog {
    pub fn new(fields: Vec<Field>, columns: Vec<ColumnDescriptor>) -> Self {
        Self { fields, columns }
    }

    /// Catalog with fields only (no updatable-column descriptors).
    pub fn from_fields(fields: Vec<Field>) -> Self {
        Self::new(fields, Vec::new())
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn columns(&self) -> &[ColumnDescriptor] {
        &self.columns
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Find the first field whose title equals `name`, ignoring case.
    pub fn find_by_title(&self, name: &str) -> Option<&Field> {
        let wanted = name.to_lowercase();
        self.fields.iter().find(|f| f.title.to_lowercase() == wanted)
    }

    /// Find an updatable column by its identifier.
    pub fn find_column(&self, id: &str) -> Option<&ColumnDescriptor> {
        self.columns.iter().find(|c| c.id == id)
    }
}
