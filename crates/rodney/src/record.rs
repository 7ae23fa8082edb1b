//! Choosing and loading the record a command works on.

use anyhow::{Context, Result, anyhow};
use rodney_client::GraphqlClient;
use rodney_config::config::RodneyConfig;
use rodney_core::{RecordContext, RecordSnapshot};
use rodney_dispatch::{
    ActionDispatcher, MutationExecutor, RecordSession, RecordSource, SnapshotSource,
};

use crate::cli::RecordArgs;
use crate::context::RuntimeContext;

/// Session type used by every record-backed command.
pub type Session<E> = RecordSession<Box<dyn RecordSource>, E>;

/// Where the record comes from.
#[derive(Debug)]
pub enum Selection {
    /// A snapshot file read from disk.
    Snapshot(RecordSnapshot),
    /// An item fetched from the API.
    Remote(RecordContext),
}

impl Selection {
    /// Read the selection flags. `None` when neither a snapshot nor an
    /// item/board pair was given.
    pub fn from_args(args: &RecordArgs) -> Result<Option<Self>> {
        if let Some(path) = &args.snapshot {
            let snapshot = RecordSnapshot::load(path)
                .with_context(|| format!("failed to load snapshot {}", path.display()))?;
            return Ok(Some(Self::Snapshot(snapshot)));
        }
        match (&args.item, &args.board) {
            (Some(item), Some(board)) => Ok(Some(Self::Remote(RecordContext::new(
                item.clone(),
                board.clone(),
            )))),
            _ => Ok(None),
        }
    }

    /// Like [`Selection::from_args`], but a selection is mandatory.
    pub fn required(args: &RecordArgs) -> Result<Self> {
        Self::from_args(args)?.ok_or_else(|| {
            anyhow!("no record selected (use --snapshot FILE or --item ID --board ID)")
        })
    }

    pub fn context(&self) -> RecordContext {
        match self {
            Self::Snapshot(snapshot) => snapshot.context(),
            Self::Remote(ctx) => ctx.clone(),
        }
    }

    fn into_source(self, config: &RodneyConfig) -> Result<Box<dyn RecordSource>> {
        Ok(match self {
            Self::Snapshot(snapshot) => Box::new(SnapshotSource::new(snapshot)),
            Self::Remote(_) => Box::new(GraphqlClient::from_config(&config.api)?),
        })
    }
}

/// Build a session over `selection` and load the record.
pub async fn open_session<E: MutationExecutor>(
    selection: Selection,
    ctx: &RuntimeContext,
    executor: E,
) -> Result<Session<E>> {
    let record_ctx = selection.context();
    let source = selection.into_source(&ctx.config)?;

    let mut session = RecordSession::new(source, ActionDispatcher::new(executor));
    session.set_context(record_ctx);
    session.refresh().await?;
    Ok(session)
}

/// The loaded record as a snapshot, for JSON output.
pub fn loaded_snapshot<E: MutationExecutor>(session: &Session<E>) -> Option<RecordSnapshot> {
    let ctx = session.loaded_context()?;
    let catalog = session.catalog()?;
    Some(RecordSnapshot {
        record_id: ctx.record_id.clone(),
        collection_id: ctx.collection_id.clone(),
        name: session.record_name().unwrap_or_default().to_string(),
        fields: catalog.fields().to_vec(),
        columns: catalog.columns().to_vec(),
    })
}
