use std::fs;

use crate::common::{ArcadeEnv, assert_contains, assert_success, init_test_logging};

#[test]
fn test_toggle_pins_and_auto_releases() {
    init_test_logging();
    let env = ArcadeEnv::new();

    let toggled = env.run_json(&["display", "toggle"]);
    assert_eq!(toggled["visibility"], "visible");
    assert_eq!(toggled["transition"], "shown");
    assert_eq!(toggled["pinned"], true);

    let status = env.run_json(&["status"]);
    assert_eq!(status["visibility"], "visible");
    assert_eq!(status["displayOverride"], true);

    let auto = env.run_json(&["display", "auto"]);
    assert_eq!(auto["visibility"], "hidden");
    assert_eq!(auto["pinned"], false);
}

#[test]
fn test_show_is_idempotent() {
    init_test_logging();
    let env = ArcadeEnv::new();

    assert_eq!(env.run_json(&["display", "show"])["transition"], "shown");
    assert!(env.run_json(&["display", "show"])["transition"].is_null());
}

#[test]
fn test_reset_high_score() {
    init_test_logging();
    let env = ArcadeEnv::new();
    let state = env.data.join("state.json");
    fs::create_dir_all(&env.data).unwrap();
    fs::write(&state, r#"{"highScore": 420, "displayOverride": false}"#).unwrap();

    let output = env.run(&["reset-high-score"]);

    assert_success(&output);
    assert_contains(&String::from_utf8_lossy(&output.stdout), "High score reset");
    let saved = env.read_json(&state);
    assert_eq!(saved["highScore"], 0);
    assert_eq!(saved["displayOverride"], false);
}
