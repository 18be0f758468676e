//! `arcade hooks`, `arcade activate` and `arcade deactivate`.

use super::AppContext;
use super::helpers::{indent_lines, print_json};
use crate::HooksAction;
use anyhow::{Context, Result};
use arcade_common::{
    ActivationError, ActivationReport, HookRegistry, HookState, HookStatus, activate as run_activation,
    deactivate as run_teardown, inspect,
};
use colored::Colorize;
use serde::Serialize;
use tracing::warn;

/// Command suggested when automatic activation fails.
pub const RETRY_COMMAND: &str = "arcade hooks install";

pub async fn run(ctx: &AppContext, action: HooksAction) -> Result<()> {
    match action {
        HooksAction::Install => install(ctx).await,
        HooksAction::Check => check(ctx),
        HooksAction::Uninstall => uninstall(ctx),
    }
}

async fn install(ctx: &AppContext) -> Result<()> {
    let report = run_activation(&ctx.activation())
        .await
        .context("hook installation failed")?;
    print_activation(ctx, &report)
}

fn print_activation(ctx: &AppContext, report: &ActivationReport) -> Result<()> {
    if ctx.json {
        return print_json(report);
    }

    if report.modified {
        println!(
            "{} Hooks installed in {}",
            "✓".green(),
            report.hooks_path.display()
        );
    } else {
        println!(
            "{} Hooks already up to date in {}",
            "✓".green(),
            report.hooks_path.display()
        );
    }
    if !report.scripts_written.is_empty() {
        println!("  Wrote {} script file(s)", report.scripts_written.len());
    }
    if let Some(backup) = &report.backup {
        println!(
            "  {} The previous hooks file could not be parsed; saved as {}",
            "!".yellow(),
            backup.display()
        );
    }
    Ok(())
}

#[derive(Serialize)]
struct CheckOutput<'a> {
    scope: String,
    hooks_path: String,
    #[serde(flatten)]
    state: &'a HookState,
}

fn check(ctx: &AppContext) -> Result<()> {
    let activation = ctx.activation();
    let state = inspect(&activation)?;
    let hooks_path = activation.hooks_path()?;

    if ctx.json {
        return print_json(&CheckOutput {
            scope: ctx.scope.to_string(),
            hooks_path: hooks_path.display().to_string(),
            state: &state,
        });
    }

    let status = match state.status {
        HookStatus::Valid => state.status.to_string().as_str().green(),
        HookStatus::Stale | HookStatus::Partial => state.status.to_string().as_str().yellow(),
        HookStatus::None => state.status.to_string().as_str().red(),
    };
    println!("Hooks ({}): {}", ctx.scope, status);
    println!("  File:  {}", hooks_path.display());
    println!(
        "  Start: {}",
        state.start_command.as_deref().unwrap_or("-")
    );
    println!("  Stop:  {}", state.stop_command.as_deref().unwrap_or("-"));
    if state.status != HookStatus::Valid {
        println!("  Run '{}' to repair", RETRY_COMMAND);
    }
    Ok(())
}

#[derive(Serialize)]
struct UninstallOutput {
    hooks_path: String,
    removed_count: usize,
}

fn uninstall(ctx: &AppContext) -> Result<()> {
    let hooks_path = ctx.activation().hooks_path()?;
    let result = HookRegistry::new(&hooks_path)
        .remove_owned_entries()
        .context("hook removal failed")?;

    if ctx.json {
        return print_json(&UninstallOutput {
            hooks_path: hooks_path.display().to_string(),
            removed_count: result.removed_count,
        });
    }
    println!(
        "Removed {} hook entr{} from {}",
        result.removed_count,
        if result.removed_count == 1 { "y" } else { "ies" },
        hooks_path.display()
    );
    Ok(())
}

/// Startup activation: failures become a warning with follow-up choices
/// instead of an error exit.
pub async fn activate(ctx: &AppContext) -> Result<()> {
    match run_activation(&ctx.activation()).await {
        Ok(report) => print_activation(ctx, &report),
        Err(err) => {
            warn!("Activation failed: {}", err);
            print_activation_warning(ctx, &err)
        }
    }
}

#[derive(Serialize)]
struct ActivationWarning {
    warning: String,
    code: String,
    view_logs: String,
    retry: &'static str,
    docs: Option<String>,
}

fn print_activation_warning(ctx: &AppContext, err: &ActivationError) -> Result<()> {
    let entry = err.code().entry();
    let warning = ActivationWarning {
        warning: err.to_string(),
        code: entry.code.clone(),
        view_logs: ctx.log_file.display().to_string(),
        retry: RETRY_COMMAND,
        docs: entry.doc_url.clone(),
    };

    if ctx.json {
        return print_json(&warning);
    }

    eprintln!(
        "{} [{}] {}",
        "warning:".yellow().bold(),
        warning.code,
        warning.warning
    );
    eprintln!("{}", indent_lines(&entry.remediation.join("\n"), "    "));
    eprintln!();
    eprintln!("  View logs:  {}", warning.view_logs);
    eprintln!("  Retry:      {}", warning.retry);
    if let Some(docs) = &warning.docs {
        eprintln!("  Docs:       {}", docs);
    }
    Ok(())
}

pub fn deactivate(ctx: &AppContext) -> Result<()> {
    let report = run_teardown(&ctx.activation());
    if ctx.json {
        return print_json(&report);
    }
    println!(
        "Removed {} hook entr{} (global: {}, workspace: {})",
        report.total_removed(),
        if report.total_removed() == 1 { "y" } else { "ies" },
        report.global_removed,
        report.workspace_removed
    );
    if report.failures > 0 {
        println!(
            "  {} {} hooks file(s) could not be cleaned; see {}",
            "!".yellow(),
            report.failures,
            ctx.log_file.display()
        );
    }
    Ok(())
}
