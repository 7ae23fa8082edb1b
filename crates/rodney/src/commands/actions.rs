//! `rodney actions` -- list the available actions.

use anyhow::Result;
use rodney_core::ActionKind;
use rodney_ui::styles::render_action_line;

use crate::context::RuntimeContext;
use crate::output::output_json;

/// Execute the `rodney actions` command. The configured default is marked.
pub fn run(ctx: &RuntimeContext) -> Result<()> {
    let default = ctx.config.defaults.action;

    if ctx.json {
        let list: Vec<serde_json::Value> = ActionKind::ALL
            .iter()
            .map(|kind| {
                serde_json::json!({
                    "kind": kind.as_str(),
                    "label": kind.label(),
                    "requires_target": kind.requires_target(),
                    "default": *kind == default,
                })
            })
            .collect();
        output_json(&list);
        return Ok(());
    }

    for kind in ActionKind::ALL {
        println!("{}", render_action_line(kind, kind == default));
    }
    Ok(())
}
