//! Request validation rules, checked before anything reaches an executor.

use crate::action::ActionKind;
use crate::field::RecordContext;
use crate::request::MutationRequest;

/// Error type for validation failures.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a target column")]
    MissingTarget,

    #[error("record id is required")]
    EmptyRecordId,

    #[error("collection id is required")]
    EmptyCollectionId,

    #[error("{field} contains control characters")]
    ControlCharacter { field: &'static str },
}

/// Validates the record identifiers an action will run against.
pub fn validate_context(ctx: &RecordContext) -> Result<(), ValidationError> {
    if ctx.record_id.trim().is_empty() {
        return Err(ValidationError::EmptyRecordId);
    }
    if ctx.collection_id.trim().is_empty() {
        return Err(ValidationError::EmptyCollectionId);
    }
    check_identifier("record id", &ctx.record_id)?;
    check_identifier("collection id", &ctx.collection_id)?;
    Ok(())
}

/// Validates a request built by one of the [`MutationRequest`] constructors.
///
/// Payloads may hold arbitrary text (quotes and braces included); only
/// identifiers are restricted.
pub fn validate_request(req: &MutationRequest) -> Result<(), ValidationError> {
    validate_context(&req.context())?;
    if req.operation == ActionKind::UpdateField {
        match req.target_field_id.as_deref() {
            Some(target) if !target.is_empty() => check_identifier("target column", target)?,
            _ => return Err(ValidationError::MissingTarget),
        }
    }
    Ok(())
}

fn check_identifier(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter { field });
    }
    Ok(())
}
