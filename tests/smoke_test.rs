/// Smoke tests to verify the binary runs without panicking
use std::process::Command;

#[test]
fn binary_shows_help() {
    let output = Command::new("cargo")
        .args(["run", "--", "--help"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --help: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(
        stdout.contains("termspectrum"),
        "Help output should mention termspectrum"
    );
    assert!(
        stdout.contains("--no-audio"),
        "Help output should list the --no-audio flag"
    );
}

#[test]
fn binary_shows_version() {
    let output = Command::new("cargo")
        .args(["run", "--", "--version"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        output.status.success(),
        "Binary failed to run --version: {}",
        String::from_utf8_lossy(&output.stderr)
    );
}

#[test]
fn missing_file_fails_gracefully() {
    let output = Command::new("cargo")
        .args(["run", "--", "--file", "/nonexistent/audio.wav", "--no-audio"])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        !output.status.success(),
        "Missing input file should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        !stderr.contains("panicked at"),
        "Missing input file should not cause panic"
    );
}

#[test]
fn bad_frame_size_fails_gracefully() {
    let output = Command::new("cargo")
        .args([
            "run",
            "--",
            "--file",
            "/nonexistent/audio.wav",
            "--frame-size",
            "1000",
            "--no-audio",
        ])
        .output()
        .expect("Failed to execute cargo run");

    assert!(
        !output.status.success(),
        "Non-power-of-two frame size should return error status"
    );

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("power of two"),
        "Error should explain the window-size constraint: {}",
        stderr
    );
    assert!(!stderr.contains("panicked at"));
}
