//! `arcade config` and `arcade auto-show`.

use super::AppContext;
use super::helpers::print_json;
use crate::{AutoShowMode, ConfigAction};
use anyhow::{Context, Result};
use arcade_common::config::ConfigSource;
use arcade_common::{Settings, Transition};
use colored::Colorize;
use serde::Serialize;
use serde_json::json;

pub fn run(ctx: &AppContext, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Path => path(ctx),
        ConfigAction::Show => show(ctx),
    }
}

fn path(ctx: &AppContext) -> Result<()> {
    if ctx.json {
        return print_json(&json!({
            "path": ctx.loaded.path,
            "exists": ctx.loaded.path.exists(),
        }));
    }
    println!("{}", ctx.loaded.path.display());
    Ok(())
}

#[derive(Serialize)]
struct SettingLine {
    key: &'static str,
    value: String,
    source: ConfigSource,
}

fn show(ctx: &AppContext) -> Result<()> {
    let lines: Vec<SettingLine> = ctx
        .loaded
        .describe()
        .into_iter()
        .map(|(key, value, source)| SettingLine { key, value, source })
        .collect();

    if ctx.json {
        return print_json(&lines);
    }

    println!("Settings file: {}", ctx.loaded.path.display());
    for line in &lines {
        println!(
            "  {:<18} {:<24} {}",
            line.key,
            line.value,
            format!("[{}]", line.source).as_str().dimmed()
        );
    }
    Ok(())
}

/// Updates the persisted auto-show preference.
pub fn auto_show(ctx: &AppContext, mode: AutoShowMode) -> Result<()> {
    let path = &ctx.loaded.path;
    let mut file_settings = Settings::load_from(path)?;
    file_settings.auto_show = match mode {
        AutoShowMode::On => true,
        AutoShowMode::Off => false,
        AutoShowMode::Toggle => !ctx.loaded.settings.auto_show,
    };
    file_settings
        .save(path)
        .with_context(|| format!("could not save {}", path.display()))?;

    let shadowed = ctx.loaded.auto_show().is_from_env();
    let effective = if shadowed {
        ctx.loaded.settings.auto_show
    } else {
        file_settings.auto_show
    };
    let mut controller = ctx.display_controller();
    let transition = controller.set_auto_show(effective);

    if ctx.json {
        return print_json(&json!({
            "autoShow": file_settings.auto_show,
            "path": path,
            "overriddenByEnv": shadowed,
            "visibility": controller.visibility(),
            "transition": transition,
        }));
    }

    println!(
        "Auto-show {}",
        if file_settings.auto_show { "enabled" } else { "disabled" }
    );
    match transition {
        Some(Transition::Shown) => println!("  Panel shown"),
        Some(Transition::Hidden) => println!("  Panel hidden"),
        None => {}
    }
    if shadowed {
        println!(
            "  {} ARCADE_AUTO_SHOW is set and takes precedence over the settings file",
            "!".yellow()
        );
    }
    Ok(())
}
