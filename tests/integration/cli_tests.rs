use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_page-gallery"))
}

#[test]
fn test_missing_arguments_is_usage_error() {
    let output = binary().output().unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Usage"), "unexpected stdout: {}", stdout);
}

#[test]
fn test_extra_argument_is_usage_error() {
    let output = binary()
        .args(["http://example.com/", "out", "extra"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}

#[test]
fn test_help_exits_zero() {
    let output = binary().arg("--help").output().unwrap();
    assert_eq!(output.status.code(), Some(0));
}

#[test]
fn test_unreachable_page_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .args(["-q", "http://127.0.0.1:9/page.html"])
        .arg(dir.path().join("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stdout).contains("Error:"));
}

#[test]
fn test_invalid_width_exits_one() {
    let dir = tempfile::tempdir().unwrap();
    let output = binary()
        .args(["--width", "0", "http://127.0.0.1:9/page.html"])
        .arg(dir.path().join("out"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
}
