//! `rodney config` -- show or initialize configuration.

use anyhow::{Context, Result, bail};
use rodney_config::config::{CONFIG_FILE_NAME, RodneyConfig, save_config};
use rodney_config::config_dir::ensure_config_dir;
use rodney_ui::styles::render_muted;

use crate::cli::{ConfigArgs, ConfigCommands};
use crate::context::RuntimeContext;
use crate::output::output_json;

const MASKED: &str = "********";

/// Execute the `rodney config` command.
pub fn run(ctx: &RuntimeContext, args: &ConfigArgs) -> Result<()> {
    match &args.command {
        ConfigCommands::Show => show(ctx),
        ConfigCommands::Init(init) => {
            // Without a discovered or given directory, create ./.rodney.
            let dir = match &ctx.config_dir {
                Some(dir) => dir.clone(),
                None => {
                    let cwd = std::env::current_dir()
                        .context("cannot determine current directory")?;
                    ensure_config_dir(&cwd)?
                }
            };
            let path = dir.join(CONFIG_FILE_NAME);
            if path.exists() && !init.force {
                bail!(
                    "{} already exists (use --force to overwrite)",
                    path.display()
                );
            }
            save_config(&dir, &RodneyConfig::default())
                .with_context(|| format!("failed to write {}", path.display()))?;

            if ctx.json {
                output_json(&serde_json::json!({ "path": path }));
            } else if !ctx.quiet {
                println!("Wrote {}", path.display());
            }
            Ok(())
        }
    }
}

fn show(ctx: &RuntimeContext) -> Result<()> {
    let mut config = ctx.config.clone();
    if config.api.token.is_some() {
        config.api.token = Some(MASKED.to_string());
    }

    if ctx.json {
        output_json(&config);
        return Ok(());
    }

    if let Some(dir) = &ctx.config_dir {
        println!(
            "{}",
            render_muted(&format!("# {}", dir.join(CONFIG_FILE_NAME).display()))
        );
    }
    print!("{}", serde_yaml::to_string(&config)?);
    Ok(())
}
