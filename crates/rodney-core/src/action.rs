//! The closed set of actions a formula can drive.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Which mutation to perform with the evaluated formula text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionKind {
    /// Set the record's name to the evaluated text.
    #[default]
    Rename,
    /// Write the evaluated text into a chosen column.
    #[serde(rename = "update_column", alias = "update_field")]
    UpdateField,
    /// Duplicate the record. The evaluated text is not sent.
    Duplicate,
    /// Create one child record per comma-separated segment.
    CreateSubitems,
}

impl ActionKind {
    /// All kinds, in menu order.
    pub const ALL: [ActionKind; 4] = [
        ActionKind::Rename,
        ActionKind::UpdateField,
        ActionKind::Duplicate,
        ActionKind::CreateSubitems,
    ];

    /// Returns the stable wire name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Rename => "rename",
            Self::UpdateField => "update_column",
            Self::Duplicate => "duplicate",
            Self::CreateSubitems => "create_subitems",
        }
    }

    /// Human-readable menu label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Rename => "Rename Item",
            Self::UpdateField => "Update Column Value",
            Self::Duplicate => "Duplicate Item",
            Self::CreateSubitems => "Create Subitems",
        }
    }

    /// Returns `true` if the action needs a target column.
    pub fn requires_target(&self) -> bool {
        matches!(self, Self::UpdateField)
    }
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown action name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}' (expected rename, update_column, duplicate or create_subitems)")]
pub struct ParseActionKindError(pub String);

impl FromStr for ActionKind {
    type Err = ParseActionKindError;

    /// Accepts snake_case and kebab-case spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "rename" => Ok(Self::Rename),
            "update_column" | "update_field" => Ok(Self::UpdateField),
            "duplicate" => Ok(Self::Duplicate),
            "create_subitems" => Ok(Self::CreateSubitems),
            _ => Err(ParseActionKindError(s.to_string())),
        }
    }
}

/// Parameters carried alongside the selected action.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionParams {
    /// Column to write for [`ActionKind::UpdateField`].
    #[serde(default)]
    pub target_field_id: Option<String>,
}

impl ActionParams {
    pub fn with_target(id: impl Into<String>) -> Self {
        Self {
            target_field_id: Some(id.into()),
        }
    }

    /// The target column id, if one is set and non-empty.
    pub fn target(&self) -> Option<&str> {
        self.target_field_id.as_deref().filter(|id| !id.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_both_spellings() {
        assert_eq!("rename".parse::<ActionKind>().unwrap(), ActionKind::Rename);
        assert_eq!(
            "update-column".parse::<ActionKind>().unwrap(),
            ActionKind::UpdateField
        );
        assert_eq!(
            "update_field".parse::<ActionKind>().unwrap(),
            ActionKind::UpdateField
        );
        assert_eq!(
            "Create-Subitems".parse::<ActionKind>().unwrap(),
            ActionKind::CreateSubitems
        );
    }

    #[test]
    fn parse_rejects_unknown() {
        let err = "archive".parse::<ActionKind>().unwrap_err();
        assert!(err.to_string().contains("archive"));
    }

    #[test]
    fn serde_uses_wire_names() {
        let json = serde_json::to_string(&ActionKind::UpdateField).unwrap();
        assert_eq!(json, r#""update_column""#);
        let back: ActionKind = serde_json::from_str(r#""create_subitems""#).unwrap();
        assert_eq!(back, ActionKind::CreateSubitems);
    }

    #[test]
    fn display_matches_as_str() {
        for kind in ActionKind::ALL {
            assert_eq!(kind.to_string(), kind.as_str());
            assert_eq!(kind.as_str().parse::<ActionKind>().unwrap(), kind);
        }
    }

    #[test]
    fn only_update_requires_target() {
        assert!(ActionKind::UpdateField.requires_target());
        assert!(!ActionKind::Rename.requires_target());
    }

    #[test]
    fn empty_target_is_no_target() {
        assert_eq!(ActionParams::default().target(), None);
        assert_eq!(ActionParams::with_target("").target(), None);
        assert_eq!(ActionParams::with_target("text0").target(), Some("text0"));
    }
}
