//! `rodney run` -- evaluate a formula and run an action with the result.

use anyhow::Result;
use chrono::NaiveDate;
use rodney_client::GraphqlClient;
use rodney_core::{ActionKind, MutationRequest, Outcome};
use rodney_dispatch::{MutationExecutor, RecordingExecutor};
use rodney_ui::styles::{render_category, render_outcome};
use serde::Serialize;

use crate::cli::RunArgs;
use crate::context::RuntimeContext;
use crate::output::{output_json, output_table};
use crate::record::{Selection, Session, open_session};

/// What a run produced, as printed with `--json`.
#[derive(Debug, Serialize)]
struct RunReport {
    action: ActionKind,
    formula: String,
    evaluated: String,
    dry_run: bool,
    outcome: Outcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    requests: Option<Vec<MutationRequest>>,
}

/// Execute the `rodney run` command.
///
/// A failed outcome is printed like a successful one, then the process
/// exits with status 1.
pub async fn run(ctx: &RuntimeContext, args: &RunArgs) -> Result<()> {
    let formula = args
        .formula
        .clone()
        .unwrap_or_else(|| ctx.config.defaults.formula.clone());
    let kind = args.action.unwrap_or(ctx.config.defaults.action);
    let target = args
        .target
        .clone()
        .or_else(|| ctx.config.defaults.target_column.clone());
    let today = RuntimeContext::today(args.record.today);
    let selection = Selection::required(&args.record)?;

    let report = if args.dry_run {
        let mut session = open_session(selection, ctx, RecordingExecutor::new()).await?;
        let (evaluated, outcome) =
            execute(&mut session, &formula, kind, target, &today).await?;
        RunReport {
            action: kind,
            formula,
            evaluated,
            dry_run: true,
            outcome,
            requests: Some(session.dispatcher().executor().requests()),
        }
    } else {
        let client = GraphqlClient::from_config(&ctx.config.api)?;
        let mut session = open_session(selection, ctx, client).await?;
        let (evaluated, outcome) =
            execute(&mut session, &formula, kind, target, &today).await?;
        RunReport {
            action: kind,
            formula,
            evaluated,
            dry_run: false,
            outcome,
            requests: None,
        }
    };

    if ctx.json {
        output_json(&report);
    } else {
        if let Some(requests) = report.requests.as_deref() {
            if !ctx.quiet && !requests.is_empty() {
                println!("{}", render_category("dry run"));
                output_table(
                    &["#", "operation", "item", "column", "value"],
                    &request_rows(requests),
                );
                println!();
            }
        }
        println!("{}", render_outcome(&report.outcome));
    }

    if !report.outcome.success {
        std::process::exit(1);
    }
    Ok(())
}

async fn execute<E: MutationExecutor>(
    session: &mut Session<E>,
    formula: &str,
    kind: ActionKind,
    target: Option<String>,
    today: &NaiveDate,
) -> Result<(String, Outcome)> {
    session.set_formula(formula);
    let dispatcher = session.dispatcher_mut();
    dispatcher.select(kind);
    dispatcher.set_target_field(target);

    let evaluated = session.preview(today);
    let outcome = session.execute(today).await?;
    Ok((evaluated, outcome))
}

fn request_rows(requests: &[MutationRequest]) -> Vec<Vec<String>> {
    requests
        .iter()
        .enumerate()
        .map(|(i, req)| {
            vec![
                (i + 1).to_string(),
                req.operation.as_str().to_string(),
                req.record_id.clone(),
                req.target_field_id.clone().unwrap_or_else(|| "-".to_string()),
                format!("{:?}", req.payload),
            ]
        })
        .collect()
}
