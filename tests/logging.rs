use std::{fs, thread::sleep, time::Duration};

use serial_test::serial;
use tempfile::tempdir;

#[test]
#[serial]
fn writes_log_file_and_ignores_reinit() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("gestures.log");

    gesture_engine::logging::init(true, Some(path.clone()));
    tracing::info!("gesture table rebuilt");

    sleep(Duration::from_millis(100));

    assert!(path.exists(), "log file was not created");
    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("gesture table rebuilt"));

    let second = dir.path().join("second.log");
    gesture_engine::logging::init(false, Some(second.clone()));
    tracing::info!("after re-init");

    sleep(Duration::from_millis(100));

    let contents = fs::read_to_string(&path).unwrap();
    assert!(contents.contains("after re-init"));
    let second_contents = fs::read_to_string(&second).unwrap_or_default();
    assert!(!second_contents.contains("after re-init"));
}
