//! Open string enums for the rodney system.
//!
//! Each enum has:
//! - Custom Serialize (as the remote's snake_case string)
//! - Custom Deserialize (known variants + catch-all Custom(String))
//! - `as_str()`, `is_default()`, `Display` impl

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// ---------------------------------------------------------------------------
// Macro: defines an enum with known string variants + a Custom(String) fallback.
// ---------------------------------------------------------------------------
macro_rules! define_enum {
    (
        $(#[$meta:meta])*
        $name:ident, default = $default:ident, custom_variant = $custom_variant:ident,
        variants: [
            $( ($variant:ident, $str:expr) ),+ $(,)?
        ]
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $variant, )+
            $custom_variant(String),
        }

        impl $name {
            /// Returns the string representation.
            pub fn as_str(&self) -> &str {
                match self {
                    $( Self::$variant => $str, )+
                    Self::$custom_variant(s) => s.as_str(),
                }
            }

            /// Returns `true` if this is the default variant.
            pub fn is_default(&self) -> bool {
                *self == Self::$default
            }

            /// Returns `true` if this is a built-in (non-custom) variant.
            pub fn is_builtin(&self) -> bool {
                !matches!(self, Self::$custom_variant(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::$default
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok(Self::from(s))
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                match s {
                    $( $str => Self::$variant, )+
                    other => Self::$custom_variant(other.to_owned()),
                }
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                // Check known variants first to avoid allocation in common case.
                match s.as_str() {
                    $( $str => Self::$variant, )+
                    _ => Self::$custom_variant(s),
                }
            }
        }
    };
}

// ===========================================================================
// ColumnKind
// ===========================================================================

define_enum! {
    /// The value type of an updatable column on a collection.
    ColumnKind, default = Text, custom_variant = Custom,
    variants: [
        (Name, "name"),
        (Text, "text"),
        (LongText, "long_text"),
        (Status, "status"),
        (Date, "date"),
        (Numbers, "numbers"),
        (People, "people"),
        (Dropdown, "dropdown"),
        (Checkbox, "checkbox"),
        (Subtasks, "subtasks"),
    ]
}

impl ColumnKind {
    /// Returns `true` for columns whose value can be written as a plain
    /// string with a simple column update.
    pub fn accepts_simple_value(&self) -> bool {
        !matches!(self, Self::Subtasks | Self::People)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn column_kind_default() {
        assert_eq!(ColumnKind::default(), ColumnKind::Text);
        assert!(ColumnKind::Text.is_default());
    }

    #[test]
    fn column_kind_roundtrip() {
        let json = serde_json::to_string(&ColumnKind::LongText).unwrap();
        assert_eq!(json, r#""long_text""#);
        let back: ColumnKind = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ColumnKind::LongText);
    }

    #[test]
    fn column_kind_custom_variant() {
        let kind: ColumnKind = serde_json::from_str(r#""mirror""#).unwrap();
        assert_eq!(kind, ColumnKind::Custom("mirror".into()));
        assert!(!kind.is_builtin());
        assert_eq!(kind.to_string(), "mirror");
    }

    #[test]
    fn simple_value_columns() {
        assert!(ColumnKind::Status.accepts_simple_value());
        assert!(ColumnKind::Custom("color".into()).accepts_simple_value());
        assert!(!ColumnKind::Subtasks.accepts_simple_value());
    }
}
