use serde_json::json;
use std::fs;

use crate::common::{ArcadeEnv, assert_contains, assert_path_exists, assert_success, init_test_logging};

#[cfg(unix)]
#[test]
fn test_install_workspace_scope_registers_both_hooks() {
    init_test_logging();
    crate::test_log!("TEST START: test_install_workspace_scope_registers_both_hooks");

    let env = ArcadeEnv::new();
    let report = env.run_json(&["--scope", "workspace", "hooks", "install"]);

    assert_eq!(report["modified"], true);
    assert_eq!(report["state"]["status"], "valid");

    let doc = env.read_json(&env.workspace_hooks());
    assert_eq!(doc["version"], 1);
    let start = doc["hooks"]["beforeSubmitPrompt"][0]["command"]
        .as_str()
        .expect("start command");
    let stop = doc["hooks"]["stop"][0]["command"]
        .as_str()
        .expect("stop command");
    assert!(start.ends_with(".cursor/hooks/agent-arcade/hook.sh"));
    assert!(stop.ends_with(".cursor/hooks/agent-arcade/hook-stop.sh"));
    assert_path_exists(std::path::Path::new(start));
    assert!(!env.global_hooks().exists());

    crate::test_log!("TEST PASS: test_install_workspace_scope_registers_both_hooks");
}

#[cfg(unix)]
#[test]
fn test_install_twice_leaves_file_untouched() {
    init_test_logging();
    let env = ArcadeEnv::new();

    assert_success(&env.run(&["hooks", "install"]));
    let first = fs::read_to_string(env.global_hooks()).unwrap();
    let report = env.run_json(&["hooks", "install"]);

    assert_eq!(report["modified"], false);
    assert_eq!(fs::read_to_string(env.global_hooks()).unwrap(), first);
}

#[cfg(unix)]
#[test]
fn test_install_preserves_foreign_entries() {
    init_test_logging();
    let env = ArcadeEnv::new();
    env.write_json(
        &env.global_hooks(),
        &json!({
            "version": 1,
            "owner": "someone-else",
            "hooks": {
                "stop": [{ "command": "/opt/other/notify.sh", "timeout": 5 }],
                "afterFileEdit": [{ "command": "/opt/fmt.sh" }]
            }
        }),
    );

    assert_success(&env.run(&["hooks", "install"]));

    let doc = env.read_json(&env.global_hooks());
    assert_eq!(doc["owner"], "someone-else");
    assert_eq!(doc["hooks"]["afterFileEdit"], json!([{ "command": "/opt/fmt.sh" }]));
    let stop = doc["hooks"]["stop"].as_array().unwrap();
    assert_eq!(stop.len(), 2);
    assert_eq!(stop[0], json!({ "command": "/opt/other/notify.sh", "timeout": 5 }));
    assert_contains(stop[1]["command"].as_str().unwrap(), "agent-arcade");
}

#[cfg(unix)]
#[test]
fn test_install_backs_up_corrupt_file() {
    init_test_logging();
    let env = ArcadeEnv::new();
    let hooks = env.workspace_hooks();
    fs::create_dir_all(hooks.parent().unwrap()).unwrap();
    fs::write(&hooks, "{ this is not json").unwrap();

    let report = env.run_json(&["--scope", "workspace", "hooks", "install"]);

    let backup = report["backup"].as_str().expect("backup path reported");
    assert_eq!(fs::read_to_string(backup).unwrap(), "{ this is not json");
    assert_eq!(env.read_json(&hooks)["hooks"]["stop"].as_array().unwrap().len(), 1);
}

#[test]
fn test_install_without_interpreter_fails_with_code() {
    init_test_logging();
    let env = ArcadeEnv::new().with_interpreter("arcade-no-such-interpreter-xyz");

    let output = env.run(&["hooks", "install"]);

    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "ARC-E300");
    assert_contains(&stderr, "arcade hooks install");
    assert!(!env.global_hooks().exists());
}

#[test]
fn test_activate_without_interpreter_warns_with_choices() {
    init_test_logging();
    let env = ArcadeEnv::new().with_interpreter("arcade-no-such-interpreter-xyz");

    let output = env.run(&["activate"]);

    assert_success(&output);
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert_contains(&stderr, "warning:");
    assert_contains(&stderr, "View logs:");
    assert_contains(&stderr, "Retry:      arcade hooks install");
    assert_contains(&stderr, "Docs:");
}

#[test]
fn test_check_reports_partial_installation() {
    init_test_logging();
    let env = ArcadeEnv::new();
    env.write_json(
        &env.global_hooks(),
        &json!({
            "version": 1,
            "hooks": { "beforeSubmitPrompt": [{ "command": "/old/agent-arcade/hook.sh" }] }
        }),
    );

    let state = env.run_json(&["hooks", "check"]);

    assert_eq!(state["status"], "partial");
    assert_eq!(state["start_command"], "/old/agent-arcade/hook.sh");
    assert!(state["stop_command"].is_null());
}

#[test]
fn test_check_without_document_is_none_and_writes_nothing() {
    init_test_logging();
    let env = ArcadeEnv::new();

    let state = env.run_json(&["--scope", "workspace", "hooks", "check"]);

    assert_eq!(state["status"], "none");
    assert!(!env.workspace.join(".cursor").exists());
}

#[test]
fn test_uninstall_removes_only_owned_entries() {
    init_test_logging();
    let env = ArcadeEnv::new();
    env.write_json(
        &env.workspace_hooks(),
        &json!({
            "version": 1,
            "hooks": {
                "beforeSubmitPrompt": [
                    { "command": "/x/agent-arcade/hook.sh" },
                    { "command": "/opt/keep.sh" }
                ],
                "stop": [{ "command": "/x/agent-arcade/hook-stop.sh" }]
            }
        }),
    );

    let result = env.run_json(&["--scope", "workspace", "hooks", "uninstall"]);

    assert_eq!(result["removed_count"], 2);
    let doc = env.read_json(&env.workspace_hooks());
    assert_eq!(
        doc["hooks"]["beforeSubmitPrompt"],
        json!([{ "command": "/opt/keep.sh" }])
    );
    assert_eq!(doc["hooks"]["stop"], json!([]));
}

#[test]
fn test_deactivate_cleans_global_and_workspace() {
    init_test_logging();
    let env = ArcadeEnv::new();
    let owned = json!({
        "hooks": { "stop": [{ "command": "/x/agent-arcade/hook-stop.sh" }] }
    });
    env.write_json(&env.global_hooks(), &owned);
    env.write_json(&env.workspace_hooks(), &owned);

    let report = env.run_json(&["deactivate"]);

    assert_eq!(report["global_removed"], 1);
    assert_eq!(report["workspace_removed"], 1);
    assert_eq!(report["failures"], 0);
}
