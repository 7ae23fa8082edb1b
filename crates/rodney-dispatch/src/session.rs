//! The caller side of the dispatcher: current record, formula, busy flag.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::Datelike;
use tracing::{debug, error};

use rodney_core::{FieldCatalog, Outcome, RecordContext};

use crate::dispatcher::ActionDispatcher;
use crate::error::SessionError;
use crate::traits::{MutationExecutor, RecordSource};

/// Formula a fresh session starts with.
pub const DEFAULT_FORMULA: &str = "{Status} - {Name}";

/// Shared flag marking that an action is in flight.
#[derive(Debug, Clone, Default)]
pub struct BusyFlag(Arc<AtomicBool>);

impl BusyFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the flag, or return `None` if it is already set.
    pub fn try_acquire(&self) -> Option<BusyGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| BusyGuard(Arc::clone(&self.0)))
    }

    pub fn is_busy(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Clears the busy flag when dropped.
#[derive(Debug)]
pub struct BusyGuard(Arc<AtomicBool>);

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// A loaded record: the context it was fetched for, its name and catalog.
#[derive(Debug, Clone)]
struct LoadedRecord {
    context: RecordContext,
    name: String,
    catalog: FieldCatalog,
}

/// Holds what the user is working on -- record context, field catalog,
/// formula -- and runs at most one action at a time.
pub struct RecordSession<S, E> {
    source: S,
    dispatcher: ActionDispatcher<E>,
    context: Option<RecordContext>,
    record: Option<LoadedRecord>,
    formula: String,
    busy: BusyFlag,
}

impl<S: RecordSource, E: MutationExecutor> RecordSession<S, E> {
    pub fn new(source: S, dispatcher: ActionDispatcher<E>) -> Self {
        Self {
            source,
            dispatcher,
            context: None,
            record: None,
            formula: DEFAULT_FORMULA.to_string(),
            busy: BusyFlag::new(),
        }
    }

    /// Point the session at another record. Call [`Self::refresh`] to load it;
    /// until then the previous record stays loaded but cannot be executed on.
    pub fn set_context(&mut self, ctx: RecordContext) {
        self.context = Some(ctx);
    }

    pub fn context(&self) -> Option<&RecordContext> {
        self.context.as_ref()
    }

    /// Reload the record's fields and its collection's columns.
    ///
    /// Both fetches must succeed before anything is replaced; on failure the
    /// error is logged and the previously loaded record is kept.
    pub async fn refresh(&mut self) -> Result<(), SessionError> {
        let ctx = self.context.clone().ok_or(SessionError::NotReady)?;
        debug!(record = %ctx.record_id, collection = %ctx.collection_id, "refreshing record");

        let fields = match self.source.fetch_fields(&ctx).await {
            Ok(fields) => fields,
            Err(e) => {
                error!(record = %ctx.record_id, "error fetching item data: {e}");
                return Err(e.into());
            }
        };
        let columns = match self.source.fetch_columns(&ctx.collection_id).await {
            Ok(columns) => columns,
            Err(e) => {
                error!(collection = %ctx.collection_id, "error fetching columns: {e}");
                return Err(e.into());
            }
        };

        self.record = Some(LoadedRecord {
            context: ctx,
            name: fields.name,
            catalog: FieldCatalog::new(fields.fields, columns),
        });
        Ok(())
    }

    pub fn set_formula(&mut self, formula: impl Into<String>) {
        self.formula = formula.into();
    }

    pub fn formula(&self) -> &str {
        &self.formula
    }

    pub fn catalog(&self) -> Option<&FieldCatalog> {
        self.record.as_ref().map(|r| &r.catalog)
    }

    /// The context the loaded record was fetched for.
    pub fn loaded_context(&self) -> Option<&RecordContext> {
        self.record.as_ref().map(|r| &r.context)
    }

    pub fn record_name(&self) -> Option<&str> {
        self.record.as_ref().map(|r| r.name.as_str())
    }

    pub fn dispatcher(&self) -> &ActionDispatcher<E> {
        &self.dispatcher
    }

    pub fn dispatcher_mut(&mut self) -> &mut ActionDispatcher<E> {
        &mut self.dispatcher
    }

    pub fn busy(&self) -> &BusyFlag {
        &self.busy
    }

    /// Preview of the current formula; verbatim until a record is loaded.
    pub fn preview<D: Datelike>(&self, now: &D) -> String {
        rodney_formula::preview(&self.formula, self.catalog(), now)
    }

    /// Re-evaluate the formula and dispatch the selected action.
    ///
    /// The loaded record must belong to the current context; a record whose
    /// refresh has not succeeded yet is `NotReady`.
    pub async fn execute<D: Datelike>(&self, now: &D) -> Result<Outcome, SessionError> {
        let record = match (&self.context, &self.record) {
            (Some(ctx), Some(record)) if *ctx == record.context => record,
            _ => return Err(SessionError::NotReady),
        };
        let _guard = self.busy.try_acquire().ok_or(SessionError::Busy)?;
        Ok(self
            .dispatcher
            .run(&self.formula, &record.catalog, &record.context, now)
            .await)
    }
}
