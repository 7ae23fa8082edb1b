//! Normalized mutation requests and their outcomes.

use serde::{Deserialize, Serialize};

use crate::action::ActionKind;
use crate::field::RecordContext;

/// Column id that holds a record's name.
pub const NAME_COLUMN_ID: &str = "name";

/// A normalized description of one state-changing operation.
///
/// Requests are only built through the typed constructors below; values are
/// carried as data and never spliced into a query string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MutationRequest {
    pub operation: ActionKind,
    pub record_id: String,
    pub collection_id: String,
    pub payload: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_field_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child_names: Option<Vec<String>>,
}

impl MutationRequest {
    fn base(operation: ActionKind, ctx: &RecordContext, payload: String) -> Self {
        Self {
            operation,
            record_id: ctx.record_id.clone(),
            collection_id: ctx.collection_id.clone(),
            payload,
            target_field_id: None,
            child_names: None,
        }
    }

    /// Set the record's name column to `name`.
    pub fn rename(ctx: &RecordContext, name: &str) -> Self {
        let mut req = Self::base(ActionKind::Rename, ctx, name.to_string());
        req.target_field_id = Some(NAME_COLUMN_ID.to_string());
        req
    }

    /// Write `value` into column `target`.
    pub fn update_field(ctx: &RecordContext, target: &str, value: &str) -> Self {
        let mut req = Self::base(ActionKind::UpdateField, ctx, value.to_string());
        req.target_field_id = Some(target.to_string());
        req
    }

    /// Duplicate the record. Carries no payload.
    pub fn duplicate(ctx: &RecordContext) -> Self {
        Self::base(ActionKind::Duplicate, ctx, String::new())
    }

    /// Plan for creating several children; `payload` keeps the source text.
    pub fn create_subitems(ctx: &RecordContext, source: &str, names: Vec<String>) -> Self {
        let mut req = Self::base(ActionKind::CreateSubitems, ctx, source.to_string());
        req.child_names = Some(names);
        req
    }

    /// Create a single child named `name` under the record.
    pub fn create_subitem(ctx: &RecordContext, name: &str) -> Self {
        Self::base(ActionKind::CreateSubitems, ctx, name.to_string())
    }

    /// The record context this request targets.
    pub fn context(&self) -> RecordContext {
        RecordContext::new(self.record_id.clone(), self.collection_id.clone())
    }

    /// Returns `true` for a multi-child plan that must be expanded with
    /// [`MutationRequest::children`] before execution.
    pub fn is_plan(&self) -> bool {
        self.child_names.is_some()
    }

    /// Expand a subitem plan into one request per child, in order.
    /// Any other request yields itself.
    pub fn children(&self) -> Vec<MutationRequest> {
        match &self.child_names {
            Some(names) => {
                let ctx = self.context();
                names
                    .iter()
                    .map(|name| Self::create_subitem(&ctx, name))
                    .collect()
            }
            None => vec![self.clone()],
        }
    }
}

/// The user-visible result of one triggered action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Outcome {
    pub success: bool,
    pub message: String,
}

impl Outcome {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ctx() -> RecordContext {
        RecordContext::new("101", "7")
    }

    #[test]
    fn rename_targets_name_column() {
        let req = MutationRequest::rename(&ctx(), "Launch");
        assert_eq!(req.operation, ActionKind::Rename);
        assert_eq!(req.target_field_id.as_deref(), Some(NAME_COLUMN_ID));
        assert_eq!(req.payload, "Launch");
        assert_eq!(req.record_id, "101");
        assert_eq!(req.collection_id, "7");
    }

    #[test]
    fn duplicate_has_empty_payload() {
        let req = MutationRequest::duplicate(&ctx());
        assert!(req.payload.is_empty());
        assert!(req.target_field_id.is_none());
    }

    #[test]
    fn plan_expands_to_children_in_order() {
        let plan = MutationRequest::create_subitems(
            &ctx(),
            "A, , C",
            vec!["A".into(), String::new(), "C".into()],
        );
        assert!(plan.is_plan());
        let children = plan.children();
        let names: Vec<&str> = children.iter().map(|c| c.payload.as_str()).collect();
        assert_eq!(names, vec!["A", "", "C"]);
        assert!(children.iter().all(|c| !c.is_plan()));
        assert!(children.iter().all(|c| c.record_id == "101"));
    }

    #[test]
    fn single_request_children_is_itself() {
        let req = MutationRequest::update_field(&ctx(), "text0", "v");
        assert_eq!(req.children(), vec![req.clone()]);
    }

    #[test]
    fn serialized_request_omits_unset_options() {
        let json = serde_json::to_value(MutationRequest::duplicate(&ctx())).unwrap();
        assert!(json.get("target_field_id").is_none());
        assert!(json.get("child_names").is_none());
        assert_eq!(json["operation"], "duplicate");
    }
}
