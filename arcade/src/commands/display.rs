//! `arcade display` and `arcade reset-high-score`.

use super::AppContext;
use super::helpers::print_json;
use crate::DisplayAction;
use anyhow::{Context, Result};
use arcade_common::{Transition, Visibility};
use serde::Serialize;

#[derive(Serialize)]
struct DisplayOutput {
    visibility: Visibility,
    transition: Option<Transition>,
    pinned: bool,
}

pub fn run(ctx: &AppContext, action: DisplayAction) -> Result<()> {
    let mut controller = ctx.display_controller();
    let transition = match action {
        DisplayAction::Toggle => controller.toggle(),
        DisplayAction::Auto => controller.clear_override(),
        DisplayAction::Show => controller.force_show(),
    };

    ctx.state
        .set_override(controller.manual_override())
        .context("could not save display preference")?;

    let output = DisplayOutput {
        visibility: controller.visibility(),
        transition,
        pinned: controller.manual_override().is_some(),
    };
    if ctx.json {
        return print_json(&output);
    }

    let suffix = if output.pinned { " (pinned)" } else { " (auto)" };
    println!("Arcade panel: {}{}", output.visibility, suffix);
    Ok(())
}

pub fn reset_high_score(ctx: &AppContext) -> Result<()> {
    let state = ctx
        .state
        .reset_high_score()
        .context("could not reset the high score")?;
    if ctx.json {
        return print_json(&state);
    }
    println!("High score reset");
    Ok(())
}
