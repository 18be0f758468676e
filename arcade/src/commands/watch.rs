//! `arcade watch`: follows the status artifact and reports panel changes.

use super::AppContext;
use anyhow::{Context, Result};
use arcade_common::status::{self, STATUS_FILE_NAME};
use arcade_common::{DisplayController, Transition};
use notify::{Config, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use serde_json::json;
use std::fs;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

pub async fn run(ctx: &AppContext) -> Result<()> {
    let status_file = ctx.status_path();
    let watch_dir = status_file
        .parent()
        .context("status file has no parent directory")?
        .to_path_buf();
    fs::create_dir_all(&watch_dir)
        .with_context(|| format!("could not create {}", watch_dir.display()))?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<notify::Event>();
    let mut watcher = RecommendedWatcher::new(
        move |res: Result<notify::Event, notify::Error>| match res {
            Ok(event) => {
                let _ = event_tx.send(event);
            }
            Err(e) => warn!("Watcher error: {}", e),
        },
        Config::default(),
    )
    .context("failed to create file watcher")?;
    watcher
        .watch(&watch_dir, RecursiveMode::NonRecursive)
        .with_context(|| format!("failed to watch {}", watch_dir.display()))?;
    info!(path = %watch_dir.display(), "Status watcher started");

    let mut controller = ctx.display_controller();
    report(ctx, &controller, None);

    loop {
        tokio::select! {
            event = event_rx.recv() => {
                let Some(event) = event else { break };
                if !touches_status_file(&event) {
                    continue;
                }
                let artifact = status::read(&status_file);
                debug!(count = artifact.active_count, "Status changed");
                if let Some(transition) = controller.observe(&artifact) {
                    report(ctx, &controller, Some(transition));
                }
            }
            _ = tokio::signal::ctrl_c() => {
                info!("Status watcher stopped");
                break;
            }
        }
    }
    Ok(())
}

/// Whether `event` concerns the status artifact (the `.tmp` sibling is
/// ignored; its rename produces an event for the real file).
fn touches_status_file(event: &notify::Event) -> bool {
    let relevant_kind = matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    );
    relevant_kind
        && event
            .paths
            .iter()
            .any(|p| p.file_name().is_some_and(|n| n == STATUS_FILE_NAME))
}

fn report(ctx: &AppContext, controller: &DisplayController, transition: Option<Transition>) {
    if ctx.json {
        println!(
            "{}",
            json!({
                "activeCount": controller.active_count(),
                "visibility": controller.visibility(),
                "transition": transition,
            })
        );
        return;
    }
    match transition {
        Some(Transition::Shown) => println!(
            "Arcade panel shown ({} agent(s) running)",
            controller.active_count()
        ),
        Some(Transition::Hidden) => println!("Arcade panel hidden"),
        None => println!(
            "Watching {} (panel {})",
            ctx.status_path().display(),
            controller.visibility()
        ),
    }
}
