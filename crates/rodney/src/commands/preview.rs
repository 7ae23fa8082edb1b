//! `rodney preview` -- evaluate a formula and print the result.

use anyhow::Result;
use rodney_dispatch::RecordingExecutor;
use rodney_ui::styles::render_unresolved;

use crate::cli::PreviewArgs;
use crate::context::RuntimeContext;
use crate::output::output_json;
use crate::record::{Selection, open_session};

/// Execute the `rodney preview` command.
///
/// Without a record the formula is printed as typed.
pub async fn run(ctx: &RuntimeContext, args: &PreviewArgs) -> Result<()> {
    let formula = args
        .formula
        .clone()
        .unwrap_or_else(|| ctx.config.defaults.formula.clone());
    let today = RuntimeContext::today(args.record.today);

    let session = match Selection::from_args(&args.record)? {
        Some(selection) => Some(open_session(selection, ctx, RecordingExecutor::new()).await?),
        None => None,
    };
    let catalog = session.as_ref().and_then(|s| s.catalog());

    let preview = rodney_formula::preview(&formula, catalog, &today);
    let unresolved = catalog
        .map(|c| rodney_formula::unresolved(&formula, c))
        .unwrap_or_default();

    if ctx.json {
        output_json(&serde_json::json!({
            "formula": formula,
            "preview": preview,
            "unresolved": unresolved,
        }));
        return Ok(());
    }

    println!("{preview}");
    if !unresolved.is_empty() && !ctx.quiet {
        eprintln!("{}", render_unresolved(&unresolved));
    }
    Ok(())
}
