//! Runtime context for command execution.
//!
//! The [`RuntimeContext`] holds what a command handler needs: the resolved
//! config directory, the layered configuration, and the global flags.

use std::env;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rodney_config::config::{RodneyConfig, load_config};
use rodney_config::config_dir::find_config_dir;
use tracing::debug;

use crate::cli::GlobalArgs;

/// Runtime context passed to every command handler.
///
/// Constructed once in `main` after CLI parsing, before command dispatch.
#[derive(Debug)]
pub struct RuntimeContext {
    /// Resolved `.rodney/` directory, if one was given or found.
    pub config_dir: Option<PathBuf>,

    /// Defaults, `config.yaml` and `RODNEY_*` overrides, merged.
    pub config: RodneyConfig,

    /// Whether to produce JSON output.
    pub json: bool,

    /// Quiet mode: suppress non-essential output.
    pub quiet: bool,
}

impl RuntimeContext {
    /// Build a `RuntimeContext` from parsed global arguments.
    ///
    /// `--config-dir` wins over discovery; `--json` or `json: true` in the
    /// config turns on JSON output.
    pub fn from_global_args(global: &GlobalArgs) -> Result<Self> {
        let config_dir = match &global.config_dir {
            Some(dir) => Some(dir.clone()),
            None => env::current_dir()
                .ok()
                .and_then(|cwd| find_config_dir(&cwd)),
        };

        let config = load_config(config_dir.as_deref()).with_context(|| match &config_dir {
            Some(dir) => format!("failed to load configuration from {}", dir.display()),
            None => "failed to load configuration".to_string(),
        })?;
        debug!(config_dir = ?config_dir, endpoint = %config.api.endpoint, "configuration loaded");

        Ok(Self {
            json: global.json || config.json,
            config_dir,
            config,
            quiet: global.quiet,
        })
    }

    /// The day `{Date|format:...}` renders: `--today`, else the local date.
    pub fn today(pinned: Option<NaiveDate>) -> NaiveDate {
        pinned.unwrap_or_else(|| Local::now().date_naive())
    }
}
