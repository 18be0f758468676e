use std::fs;

use crate::common::{ArcadeEnv, assert_contains, assert_success, init_test_logging};

#[test]
fn test_config_path_honours_override() {
    init_test_logging();
    let env = ArcadeEnv::new();

    let output = env.run(&["config", "path"]);

    assert_success(&output);
    assert_eq!(
        String::from_utf8_lossy(&output.stdout).trim(),
        env.config.display().to_string()
    );
}

#[test]
fn test_config_show_reports_sources() {
    init_test_logging();
    let env = ArcadeEnv::new();
    fs::create_dir_all(env.config.parent().unwrap()).unwrap();
    fs::write(&env.config, "scope = \"workspace\"\n").unwrap();

    let lines = env.run_json(&["config", "show"]);
    let lines = lines.as_array().expect("array of settings");
    let find = |key: &str| {
        lines
            .iter()
            .find(|l| l["key"] == key)
            .unwrap_or_else(|| panic!("missing {key}"))
            .clone()
    };

    let scope = find("scope");
    assert_eq!(scope["value"], "workspace");
    assert_eq!(scope["source"]["kind"], "file");

    let interpreter = find("interpreter");
    assert_eq!(interpreter["source"]["kind"], "env");
    assert_eq!(interpreter["source"]["var"], "ARCADE_INTERPRETER");
}

#[test]
fn test_auto_show_off_persists() {
    init_test_logging();
    let env = ArcadeEnv::new();

    let result = env.run_json(&["auto-show", "off"]);
    assert_eq!(result["autoShow"], false);
    assert_contains(&fs::read_to_string(&env.config).unwrap(), "auto_show = false");

    assert_success(&env.run(&["start"]));
    assert_eq!(env.run_json(&["status"])["visibility"], "hidden");

    let toggled = env.run_json(&["auto-show"]);
    assert_eq!(toggled["autoShow"], true);
    assert_eq!(toggled["visibility"], "visible");
    assert_eq!(toggled["transition"], "shown");
}

#[test]
fn test_invalid_settings_file_fails_with_code() {
    init_test_logging();
    let env = ArcadeEnv::new();
    fs::create_dir_all(env.config.parent().unwrap()).unwrap();
    fs::write(&env.config, "probe_timeout_ms = [").unwrap();

    let output = env.run(&["status"]);

    assert!(!output.status.success());
    assert_contains(&String::from_utf8_lossy(&output.stderr), "ARC-E002");
}
