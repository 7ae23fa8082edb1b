//! `rodney fields` -- list an item's fields and its board's columns.

use anyhow::{Result, anyhow};
use rodney_dispatch::RecordingExecutor;
use rodney_ui::styles::{
    render_bold, render_category, render_column_line, render_field_line, render_muted,
};

use crate::cli::FieldsArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;
use crate::record::{Selection, loaded_snapshot, open_session};

/// Execute the `rodney fields` command.
pub async fn run(ctx: &RuntimeContext, args: &FieldsArgs) -> Result<()> {
    let selection = Selection::required(&args.record)?;
    let session = open_session(selection, ctx, RecordingExecutor::new()).await?;
    let snapshot = loaded_snapshot(&session).ok_or_else(|| anyhow!("record did not load"))?;

    if ctx.json {
        output_json(&snapshot);
        return Ok(());
    }

    println!(
        "{} {}",
        render_bold(&snapshot.name),
        render_muted(&format!(
            "(item {}, board {})",
            snapshot.record_id, snapshot.collection_id
        ))
    );

    println!();
    println!("{}", render_category("fields"));
    for field in &snapshot.fields {
        println!("  {}", render_field_line(field));
    }

    if !snapshot.columns.is_empty() {
        println!();
        println!("{}", render_category("columns"));
        let width = snapshot
            .columns
            .iter()
            .map(|c| c.id.chars().count())
            .max()
            .unwrap_or(0);
        for column in &snapshot.columns {
            println!("  {}", render_column_line(column, width));
        }
    }
    Ok(())
}
