//! Activation and teardown sequences.
//!
//! Activation probes the interpreter, provisions the hook scripts and then
//! reconciles the hooks document for the configured scope. Teardown removes
//! owned entries from both the global and the workspace document and never
//! fails.

use crate::errors::ErrorCode;
use crate::hooks::{
    HOOKS_FILE_NAME, HOST_DIR, HookRegistry, HookState, HooksError, TOOL_MARKER,
};
use crate::probe::{self, DEFAULT_PROBE_TIMEOUT};
use crate::scripts::{DEFAULT_INTERPRETER, HookScriptPair, Platform, ScriptError, ScriptProvisioner};
use serde::Serialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{info, warn};

pub use crate::config::{Scope, Settings};

/// Subdirectory of the host directory holding the hook scripts.
pub const SCRIPTS_DIR: &str = "hooks";

#[derive(Debug, Error)]
pub enum ActivationError {
    #[error("Interpreter '{interpreter}' is not available; hooks were not installed")]
    InterpreterUnavailable { interpreter: String },

    #[error("Home directory could not be determined (HOME/USERPROFILE unset)")]
    HomeNotFound,

    #[error(transparent)]
    Scripts(#[from] ScriptError),

    #[error(transparent)]
    Hooks(#[from] HooksError),
}

impl ActivationError {
    pub fn code(&self) -> ErrorCode {
        match self {
            ActivationError::InterpreterUnavailable { .. } => ErrorCode::EnvInterpreterUnavailable,
            ActivationError::HomeNotFound => ErrorCode::EnvHomeNotFound,
            ActivationError::Scripts(e) => e.code(),
            ActivationError::Hooks(e) => e.code(),
        }
    }
}

/// Everything activation needs to know about its environment.
#[derive(Debug, Clone)]
pub struct ActivationContext {
    pub scope: Scope,
    pub workspace: PathBuf,
    pub home: Option<PathBuf>,
    pub interpreter: String,
    pub probe_timeout: Duration,
    pub platform: Platform,
}

impl ActivationContext {
    /// Context for `workspace` with the process home directory and defaults.
    pub fn new(workspace: impl Into<PathBuf>) -> Self {
        Self {
            scope: Scope::default(),
            workspace: workspace.into(),
            home: probe::home_directory(),
            interpreter: DEFAULT_INTERPRETER.to_string(),
            probe_timeout: DEFAULT_PROBE_TIMEOUT,
            platform: Platform::current(),
        }
    }

    pub fn from_settings(settings: &Settings, workspace: impl Into<PathBuf>) -> Self {
        Self::new(workspace)
            .with_scope(settings.scope)
            .with_interpreter(settings.interpreter.clone())
            .with_probe_timeout(settings.probe_timeout())
    }

    pub fn with_scope(mut self, scope: Scope) -> Self {
        self.scope = scope;
        self
    }

    pub fn with_home(mut self, home: Option<PathBuf>) -> Self {
        self.home = home;
        self
    }

    pub fn with_interpreter(mut self, interpreter: impl Into<String>) -> Self {
        self.interpreter = interpreter.into();
        self
    }

    pub fn with_probe_timeout(mut self, timeout: Duration) -> Self {
        self.probe_timeout = timeout;
        self
    }

    pub fn with_platform(mut self, platform: Platform) -> Self {
        self.platform = platform;
        self
    }

    /// The directory whose `.cursor` folder this scope writes to.
    fn root(&self, scope: Scope) -> Result<&Path, ActivationError> {
        match scope {
            Scope::Global => self.home.as_deref().ok_or(ActivationError::HomeNotFound),
            Scope::Workspace => Ok(&self.workspace),
        }
    }

    pub fn hooks_path_for(&self, scope: Scope) -> Result<PathBuf, ActivationError> {
        Ok(self.root(scope)?.join(HOST_DIR).join(HOOKS_FILE_NAME))
    }

    /// Hooks document targeted by the configured scope.
    pub fn hooks_path(&self) -> Result<PathBuf, ActivationError> {
        self.hooks_path_for(self.scope)
    }

    /// Directory holding the hook scripts, e.g. `~/.cursor/hooks/agent-arcade`.
    pub fn scripts_dir(&self) -> Result<PathBuf, ActivationError> {
        Ok(self
            .root(self.scope)?
            .join(HOST_DIR)
            .join(SCRIPTS_DIR)
            .join(TOOL_MARKER))
    }

    pub fn provisioner(&self) -> ScriptProvisioner {
        ScriptProvisioner::new(self.platform, self.interpreter.clone())
    }

    /// Wrapper paths the hooks document should point at.
    pub fn expected_scripts(&self) -> Result<HookScriptPair, ActivationError> {
        Ok(self.provisioner().locate(&self.scripts_dir()?))
    }
}

/// Outcome of a successful [`activate`].
#[derive(Debug, Clone, Serialize)]
pub struct ActivationReport {
    pub scope: Scope,
    pub hooks_path: PathBuf,
    pub scripts: HookScriptPair,
    pub scripts_written: Vec<PathBuf>,
    /// Whether the hooks document was rewritten.
    pub modified: bool,
    pub backup: Option<PathBuf>,
    /// Registration state after reconciling.
    pub state: HookState,
}

/// Outcome of [`deactivate`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TeardownReport {
    pub global_removed: usize,
    pub workspace_removed: usize,
    /// Documents that could not be cleaned.
    pub failures: usize,
}

impl TeardownReport {
    pub fn total_removed(&self) -> usize {
        self.global_removed + self.workspace_removed
    }
}

/// Probes the interpreter, provisions scripts and reconciles hooks.
pub async fn activate(ctx: &ActivationContext) -> Result<ActivationReport, ActivationError> {
    if !probe::interpreter_available(&ctx.interpreter, ctx.probe_timeout).await {
        warn!(
            "Interpreter '{}' not available; skipping hook installation",
            ctx.interpreter
        );
        return Err(ActivationError::InterpreterUnavailable {
            interpreter: ctx.interpreter.clone(),
        });
    }

    let hooks_path = ctx.hooks_path()?;
    let scripts_dir = ctx.scripts_dir()?;
    let provision = ctx.provisioner().ensure(&scripts_dir)?;

    let registry = HookRegistry::new(&hooks_path);
    let result = registry.reconcile(&provision.scripts)?;
    let state = registry.check_state(&provision.scripts);

    info!(
        "Activated {} hooks in {} ({})",
        ctx.scope,
        hooks_path.display(),
        state.status
    );

    Ok(ActivationReport {
        scope: ctx.scope,
        hooks_path,
        scripts: provision.scripts,
        scripts_written: provision.written,
        modified: result.modified,
        backup: result.backup,
        state,
    })
}

/// Registration state for the configured scope, without writing anything.
pub fn inspect(ctx: &ActivationContext) -> Result<HookState, ActivationError> {
    let expected = ctx.expected_scripts()?;
    Ok(HookRegistry::new(ctx.hooks_path()?).check_state(&expected))
}

/// Removes owned entries from the global and workspace documents.
///
/// Best effort: failures are logged and counted, never returned.
pub fn deactivate(ctx: &ActivationContext) -> TeardownReport {
    let mut report = TeardownReport::default();

    for scope in [Scope::Global, Scope::Workspace] {
        let path = match ctx.hooks_path_for(scope) {
            Ok(path) => path,
            Err(e) => {
                warn!("Skipping {} hooks cleanup: {}", scope, e);
                continue;
            }
        };
        match HookRegistry::new(&path).remove_owned_entries() {
            Ok(result) => match scope {
                Scope::Global => report.global_removed = result.removed_count,
                Scope::Workspace => report.workspace_removed = result.removed_count,
            },
            Err(e) => {
                warn!("Failed to clean hooks in {}: {}", path.display(), e);
                report.failures += 1;
            }
        }
    }

    info!(
        "Removed {} hook entr{} during teardown",
        report.total_removed(),
        if report.total_removed() == 1 { "y" } else { "ies" }
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::HookStatus;
    use serde_json::{Value, json};
    use std::fs;
    use tempfile::TempDir;

    struct Dirs {
        _root: TempDir,
        home: PathBuf,
        workspace: PathBuf,
    }

    fn dirs() -> Dirs {
        let root = TempDir::new().unwrap();
        let home = root.path().join("home");
        let workspace = root.path().join("project");
        fs::create_dir_all(&home).unwrap();
        fs::create_dir_all(&workspace).unwrap();
        Dirs {
            _root: root,
            home,
            workspace,
        }
    }

    fn ctx(d: &Dirs) -> ActivationContext {
        ActivationContext::new(&d.workspace)
            .with_home(Some(d.home.clone()))
            .with_platform(Platform::Posix)
            .with_interpreter("true")
    }

    fn read_json(path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
    }

    #[test]
    fn test_paths_per_scope() {
        let d = dirs();
        let global = ctx(&d);
        assert_eq!(
            global.hooks_path().unwrap(),
            d.home.join(".cursor").join("hooks.json")
        );
        assert_eq!(
            global.scripts_dir().unwrap(),
            d.home.join(".cursor").join("hooks").join("agent-arcade")
        );

        let local = ctx(&d).with_scope(Scope::Workspace);
        assert_eq!(
            local.hooks_path().unwrap(),
            d.workspace.join(".cursor").join("hooks.json")
        );
        assert!(
            local
                .expected_scripts()
                .unwrap()
                .start
                .ends_with(".cursor/hooks/agent-arcade/hook.sh")
        );
    }

    #[test]
    fn test_global_scope_without_home() {
        let d = dirs();
        let no_home = ctx(&d).with_home(None);
        assert!(matches!(
            no_home.hooks_path(),
            Err(ActivationError::HomeNotFound)
        ));
        assert_eq!(
            ActivationError::HomeNotFound.code(),
            ErrorCode::EnvHomeNotFound
        );
    }

    #[tokio::test]
    async fn test_missing_interpreter_aborts_before_writing() {
        let d = dirs();
        let ctx = ctx(&d).with_interpreter("arcade-no-such-interpreter-xyz");

        let err = activate(&ctx).await.unwrap_err();

        assert!(matches!(err, ActivationError::InterpreterUnavailable { .. }));
        assert_eq!(err.code(), ErrorCode::EnvInterpreterUnavailable);
        assert!(!d.home.join(".cursor").exists());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_activate_installs_valid_hooks() {
        let d = dirs();
        let ctx = ctx(&d);

        let report = activate(&ctx).await.unwrap();

        assert!(report.modified);
        assert_eq!(report.state.status, HookStatus::Valid);
        assert_eq!(report.scripts_written.len(), 4);
        assert!(report.scripts.start.exists());

        let doc = read_json(&report.hooks_path);
        assert_eq!(
            doc["hooks"]["beforeSubmitPrompt"],
            json!([{ "command": report.scripts.command(crate::hooks::HookKind::Start) }])
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_second_activation_is_a_no_op() {
        let d = dirs();
        let ctx = ctx(&d).with_scope(Scope::Workspace);
        activate(&ctx).await.unwrap();
        let before = fs::read_to_string(ctx.hooks_path().unwrap()).unwrap();

        let again = activate(&ctx).await.unwrap();

        assert!(!again.modified);
        assert!(again.scripts_written.is_empty());
        assert_eq!(
            fs::read_to_string(ctx.hooks_path().unwrap()).unwrap(),
            before
        );
        assert_eq!(inspect(&ctx).unwrap().status, HookStatus::Valid);
    }

    #[test]
    fn test_inspect_before_install_is_none() {
        let d = dirs();
        assert_eq!(inspect(&ctx(&d)).unwrap().status, HookStatus::None);
    }

    #[test]
    fn test_deactivate_cleans_both_scopes() {
        let d = dirs();
        let c = ctx(&d);
        let global = c.hooks_path_for(Scope::Global).unwrap();
        let local = c.hooks_path_for(Scope::Workspace).unwrap();
        for path in [&global, &local] {
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(
                path,
                json!({
                    "version": 1,
                    "hooks": {
                        "stop": [
                            { "command": "/opt/other/notify.sh" },
                            { "command": "/x/agent-arcade/hook-stop.sh" }
                        ]
                    }
                })
                .to_string(),
            )
            .unwrap();
        }

        let report = deactivate(&c);

        assert_eq!(report.global_removed, 1);
        assert_eq!(report.workspace_removed, 1);
        assert_eq!(report.failures, 0);
        assert_eq!(
            read_json(&global)["hooks"]["stop"],
            json!([{ "command": "/opt/other/notify.sh" }])
        );
    }

    #[test]
    fn test_deactivate_without_home_still_cleans_workspace() {
        let d = dirs();
        let c = ctx(&d).with_home(None);
        let local = c.hooks_path_for(Scope::Workspace).unwrap();
        fs::create_dir_all(local.parent().unwrap()).unwrap();
        fs::write(
            &local,
            r#"{"hooks":{"beforeSubmitPrompt":[{"command":"/w/agent-arcade/hook.sh"}]}}"#,
        )
        .unwrap();

        let report = deactivate(&c);

        assert_eq!(report.global_removed, 0);
        assert_eq!(report.workspace_removed, 1);
    }

    #[test]
    fn test_deactivate_tolerates_missing_documents() {
        let d = dirs();
        assert_eq!(deactivate(&ctx(&d)), TeardownReport::default());
    }
}
