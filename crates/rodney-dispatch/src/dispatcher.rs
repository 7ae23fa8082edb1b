//! Turn evaluated formula text into mutation requests and execute them.

use chrono::Datelike;
use tracing::{debug, error, info, warn};

use rodney_core::validation::{validate_context, validate_request};
use rodney_core::{
    ActionKind, ActionParams, FieldCatalog, MutationRequest, Outcome, RecordContext,
    ValidationError,
};

use crate::error::RemoteError;
use crate::traits::MutationExecutor;

/// Holds the selected action and its parameters, and sends requests through
/// an injected executor.
///
/// Every failure is reported as an [`Outcome`]; nothing escapes as an error.
#[derive(Debug)]
pub struct ActionDispatcher<E> {
    executor: E,
    kind: ActionKind,
    params: ActionParams,
}

impl<E: MutationExecutor> ActionDispatcher<E> {
    /// A dispatcher with [`ActionKind::Rename`] selected.
    pub fn new(executor: E) -> Self {
        Self {
            executor,
            kind: ActionKind::default(),
            params: ActionParams::default(),
        }
    }

    pub fn with_action(mut self, kind: ActionKind, params: ActionParams) -> Self {
        self.kind = kind;
        self.params = params;
        self
    }

    /// Select the action to run on the next dispatch.
    pub fn select(&mut self, kind: ActionKind) {
        self.kind = kind;
    }

    /// Choose the column written by [`ActionKind::UpdateField`].
    pub fn set_target_field(&mut self, id: Option<String>) {
        self.params.target_field_id = id;
    }

    pub fn kind(&self) -> ActionKind {
        self.kind
    }

    pub fn params(&self) -> &ActionParams {
        &self.params
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Build the request for the selected action without executing it.
    ///
    /// For [`ActionKind::CreateSubitems`] this is a plan carrying every child
    /// name; segments are trimmed but empty ones are kept.
    pub fn plan(
        &self,
        evaluated: &str,
        ctx: &RecordContext,
    ) -> Result<MutationRequest, ValidationError> {
        validate_context(ctx)?;
        let request = match self.kind {
            ActionKind::Rename => MutationRequest::rename(ctx, evaluated),
            ActionKind::UpdateField => {
                let target = self.params.target().ok_or(ValidationError::MissingTarget)?;
                MutationRequest::update_field(ctx, target, evaluated)
            }
            ActionKind::Duplicate => MutationRequest::duplicate(ctx),
            ActionKind::CreateSubitems => {
                MutationRequest::create_subitems(ctx, evaluated, split_child_names(evaluated))
            }
        };
        validate_request(&request)?;
        Ok(request)
    }

    /// Dispatch the selected action with already-evaluated text.
    pub async fn dispatch(
        &self,
        evaluated: &str,
        catalog: &FieldCatalog,
        ctx: &RecordContext,
    ) -> Outcome {
        let request = match self.plan(evaluated, ctx) {
            Ok(request) => request,
            Err(e) => {
                warn!(action = %self.kind, record = %ctx.record_id, "rejected: {e}");
                return Outcome::failure(e.to_string());
            }
        };

        if let Some(target) = request.target_field_id.as_deref() {
            if self.kind == ActionKind::UpdateField {
                match catalog.find_column(target) {
                    Some(column) if !column.kind.accepts_simple_value() => {
                        warn!(column = target, kind = %column.kind, "target column does not take a plain text value");
                    }
                    None if !catalog.columns().is_empty() => {
                        warn!(column = target, "target column is not among the collection's columns");
                    }
                    _ => {}
                }
            }
        }

        info!(action = %self.kind, record = %ctx.record_id, "dispatching");
        let result = if request.is_plan() {
            self.execute_children(&request).await
        } else {
            self.executor.execute(&request).await.map(|()| 1)
        };

        match result {
            Ok(count) => {
                info!(action = %self.kind, record = %ctx.record_id, "action succeeded");
                Outcome::success(success_message(self.kind, evaluated, count))
            }
            Err(e) => {
                error!(
                    action = %self.kind,
                    record = %ctx.record_id,
                    undelivered = e.is_transport(),
                    "action failed: {e}"
                );
                Outcome::failure(format!("Error: {}", e.message()))
            }
        }
    }

    /// Evaluate `formula` against the current field values, then dispatch.
    pub async fn run<D: Datelike>(
        &self,
        formula: &str,
        catalog: &FieldCatalog,
        ctx: &RecordContext,
        now: &D,
    ) -> Outcome {
        let evaluated = rodney_formula::evaluate(formula, catalog, now);
        self.dispatch(&evaluated, catalog, ctx).await
    }

    /// Create children one at a time; the first failure stops the loop.
    async fn execute_children(&self, plan: &MutationRequest) -> Result<usize, RemoteError> {
        let children = plan.children();
        let total = children.len();
        for (i, child) in children.iter().enumerate() {
            debug!(index = i + 1, total, name = %child.payload, "creating subitem");
            self.executor.execute(child).await?;
        }
        Ok(total)
    }
}

/// Split on `,` and trim each segment. Empty segments are kept.
fn split_child_names(text: &str) -> Vec<String> {
    text.split(',').map(|name| name.trim().to_string()).collect()
}

fn success_message(kind: ActionKind, evaluated: &str, count: usize) -> String {
    match kind {
        ActionKind::Rename => format!("Item renamed to: {evaluated}"),
        ActionKind::UpdateField => format!("Column updated with: {evaluated}"),
        ActionKind::Duplicate => "Item duplicated successfully!".to_string(),
        ActionKind::CreateSubitems => format!("Created {count} subitems!"),
    }
}
