use crate::common::{ArcadeEnv, assert_path_exists, assert_success, init_test_logging};

#[test]
fn test_start_and_stop_move_the_counter() {
    init_test_logging();
    crate::test_log!("TEST START: test_start_and_stop_move_the_counter");

    let env = ArcadeEnv::new();

    assert_eq!(env.run_json(&["start"])["activeCount"], 1);
    assert_eq!(env.run_json(&["start"])["activeCount"], 2);
    assert_path_exists(&env.status_file());
    assert_eq!(env.read_json(&env.status_file())["activeCount"], 2);

    assert_eq!(env.run_json(&["stop"])["activeCount"], 1);

    crate::test_log!("TEST PASS: test_start_and_stop_move_the_counter");
}

#[test]
fn test_counter_file_deleted_at_zero() {
    init_test_logging();
    let env = ArcadeEnv::new();

    assert_success(&env.run(&["start"]));
    assert_eq!(env.run_json(&["stop"])["activeCount"], 0);

    assert!(!env.status_file().exists());
    assert!(!env.status_file().with_extension("json.tmp").exists());
}

#[test]
fn test_stop_never_goes_negative() {
    init_test_logging();
    let env = ArcadeEnv::new();

    assert_eq!(env.run_json(&["stop"])["activeCount"], 0);
    assert_eq!(env.run_json(&["start"])["activeCount"], 1);
}

#[test]
fn test_status_reports_visibility() {
    init_test_logging();
    let env = ArcadeEnv::new();

    let idle = env.run_json(&["status"]);
    assert_eq!(idle["activeCount"], 0);
    assert_eq!(idle["visibility"], "hidden");
    assert_eq!(idle["autoShow"], true);
    assert_eq!(idle["hooks"]["status"], "none");

    assert_success(&env.run(&["start"]));
    let busy = env.run_json(&["status"]);
    assert_eq!(busy["activeCount"], 1);
    assert_eq!(busy["visibility"], "visible");
}
