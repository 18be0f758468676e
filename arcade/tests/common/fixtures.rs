use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

/// Environment variables the binary reads; cleared so the host's own
/// settings never leak into a test.
const ARCADE_VARS: &[&str] = &[
    "ARCADE_WORKSPACE",
    "ARCADE_SCOPE",
    "ARCADE_AUTO_SHOW",
    "ARCADE_PROBE_TIMEOUT_MS",
    "ARCADE_LOG_LEVEL",
    "ARCADE_LOG_FORMAT",
    "ARCADE_LOG_FILE",
    "USERPROFILE",
];

/// An isolated home, workspace, config file and data directory.
pub struct ArcadeEnv {
    pub dir: TempDir,
    pub home: PathBuf,
    pub workspace: PathBuf,
    pub config: PathBuf,
    pub data: PathBuf,
    interpreter: String,
}

impl ArcadeEnv {
    pub fn new() -> Self {
        crate::test_log!("FIXTURE: Creating isolated arcade environment");

        let dir = TempDir::new().expect("Failed to create temp dir");
        let home = dir.path().join("home");
        let workspace = dir.path().join("project");
        fs::create_dir_all(&home).expect("Failed to create home dir");
        fs::create_dir_all(&workspace).expect("Failed to create workspace dir");

        Self {
            config: dir.path().join("config").join("config.toml"),
            data: dir.path().join("data"),
            home,
            workspace,
            dir,
            // `true` accepts `--version` and exits 0 like a real interpreter.
            interpreter: "true".to_string(),
        }
    }

    pub fn with_interpreter(mut self, interpreter: &str) -> Self {
        self.interpreter = interpreter.to_string();
        self
    }

    pub fn command(&self) -> Command {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_arcade"));
        for var in ARCADE_VARS {
            cmd.env_remove(var);
        }
        cmd.env("HOME", &self.home)
            .env("ARCADE_CONFIG", &self.config)
            .env("ARCADE_DATA_DIR", &self.data)
            .env("ARCADE_INTERPRETER", &self.interpreter)
            .env("NO_COLOR", "1")
            .arg("--workspace")
            .arg(&self.workspace);
        cmd
    }

    pub fn run(&self, args: &[&str]) -> Output {
        crate::test_log!("RUN: arcade {}", args.join(" "));
        self.command()
            .args(args)
            .output()
            .expect("Failed to run arcade")
    }

    pub fn run_json(&self, args: &[&str]) -> Value {
        let mut all = vec!["--json"];
        all.extend_from_slice(args);
        let output = self.run(&all);
        crate::common::assert_success(&output);
        serde_json::from_slice(&output.stdout).expect("Output was not JSON")
    }

    pub fn workspace_hooks(&self) -> PathBuf {
        self.workspace.join(".cursor").join("hooks.json")
    }

    pub fn global_hooks(&self) -> PathBuf {
        self.home.join(".cursor").join("hooks.json")
    }

    pub fn status_file(&self) -> PathBuf {
        self.workspace
            .join(".cursor")
            .join("agent-arcade-status.json")
    }

    pub fn write_json(&self, path: &Path, value: &Value) {
        fs::create_dir_all(path.parent().expect("path has parent")).expect("Failed to create dir");
        fs::write(path, serde_json::to_string_pretty(value).unwrap())
            .expect("Failed to write JSON fixture");
    }

    pub fn read_json(&self, path: &Path) -> Value {
        serde_json::from_str(&fs::read_to_string(path).expect("Failed to read file"))
            .expect("File was not JSON")
    }
}
