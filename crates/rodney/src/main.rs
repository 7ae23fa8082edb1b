//! `rodney` -- formula-driven item actions.
//!
//! Parses CLI arguments with clap, resolves the runtime context, and
//! dispatches to command handlers.

mod cli;
mod commands;
mod context;
mod output;
mod record;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use context::RuntimeContext;

/// Log filter used with `--verbose`.
const VERBOSE_FILTER: &str = "rodney=debug,rodney_dispatch=debug,rodney_client=debug";

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.global.verbose);

    let ctx = match RuntimeContext::from_global_args(&cli.global) {
        Ok(ctx) => ctx,
        Err(e) => exit_with_error(cli.global.json, &e),
    };
    rodney_ui::styles::set_plain_output(ctx.json);

    let result = match cli.command {
        Some(Commands::Preview(args)) => commands::preview::run(&ctx, &args).await,
        Some(Commands::Fields(args)) => commands::fields::run(&ctx, &args).await,
        Some(Commands::Run(args)) => commands::run::run(&ctx, &args).await,
        Some(Commands::Actions) => commands::actions::run(&ctx),
        Some(Commands::Config(args)) => commands::config_cmd::run(&ctx, &args),
        Some(Commands::Version) => commands::version::run(&ctx),
        Some(Commands::Completion(args)) => commands::completion::run(&args),
        None => {
            // No subcommand -- print help
            use clap::CommandFactory;
            Cli::command().print_help().ok();
            println!();
            Ok(())
        }
    };

    if let Err(e) = result {
        exit_with_error(ctx.json, &e);
    }
}

/// Install a stderr subscriber when `--verbose` is given or `RUST_LOG` is set.
fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new(VERBOSE_FILTER)
    } else {
        match EnvFilter::try_from_default_env() {
            Ok(filter) => filter,
            Err(_) => return,
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Print the error (as JSON with `--json`) and exit with code 1.
fn exit_with_error(json: bool, e: &anyhow::Error) -> ! {
    if json {
        let err_json = serde_json::json!({
            "error": format!("{:#}", e),
        });
        if let Ok(s) = serde_json::to_string_pretty(&err_json) {
            eprintln!("{}", s);
        }
    } else {
        eprintln!("Error: {:#}", e);
    }
    std::process::exit(1);
}
