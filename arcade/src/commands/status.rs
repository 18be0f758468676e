//! `arcade start`, `arcade stop` and `arcade status`.

use super::AppContext;
use super::helpers::print_json;
use anyhow::{Context, Result};
use arcade_common::status::{self, StatusArtifact};
use arcade_common::{HookState, Scope, Visibility, inspect};
use colored::Colorize;
use serde::Serialize;

/// Applies `delta` to the workspace counter, as the hook scripts do.
pub fn adjust(ctx: &AppContext, delta: i64) -> Result<()> {
    let path = ctx.status_path();
    let artifact = status::apply_delta(&path, delta)
        .with_context(|| format!("could not update {}", path.display()))?;

    if ctx.json {
        return print_json(&artifact);
    }
    println!("Active agents: {}", artifact.active_count);
    Ok(())
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusOutput {
    workspace: String,
    active_count: u64,
    last_update: i64,
    visibility: Visibility,
    auto_show: bool,
    display_override: Option<bool>,
    high_score: u64,
    scope: Scope,
    hooks: Option<HookState>,
}

pub fn show(ctx: &AppContext) -> Result<()> {
    let artifact: StatusArtifact = status::read(&ctx.status_path());
    let controller = ctx.display_controller();
    let persisted = ctx.state.load();
    let hooks = inspect(&ctx.activation()).ok();

    let output = StatusOutput {
        workspace: ctx.workspace.display().to_string(),
        active_count: artifact.active_count,
        last_update: artifact.last_update,
        visibility: controller.visibility(),
        auto_show: controller.auto_show(),
        display_override: controller.manual_override(),
        high_score: persisted.high_score,
        scope: ctx.scope,
        hooks,
    };

    if ctx.json {
        return print_json(&output);
    }

    println!("{}", "Agent Arcade".bold());
    println!("  Workspace:     {}", output.workspace);
    println!("  Active agents: {}", output.active_count);
    let panel = match output.display_override {
        Some(_) => format!("{} (pinned)", output.visibility),
        None => format!("{} (auto-show {})", output.visibility, on_off(output.auto_show)),
    };
    println!("  Panel:         {}", panel);
    println!("  High score:    {}", output.high_score);
    match &output.hooks {
        Some(state) => println!("  Hooks ({}):  {}", output.scope, state.status),
        None => println!("  Hooks ({}):  unknown (home directory not found)", output.scope),
    }
    Ok(())
}

fn on_off(enabled: bool) -> &'static str {
    if enabled { "on" } else { "off" }
}
