use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::process::Command;
use tempfile::tempdir;

fn julia() -> Command {
    Command::cargo_bin("julia").unwrap()
}

#[test]
fn renders_and_reports_the_thread_count() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("julia.png");
    julia()
        .args(&["-s", "32", "-i", "50", "-t", "3", "-o"])
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Thread: 3, Elapsed time: "));
    let decoded = image::open(&output).unwrap().to_luma();
    assert_eq!((decoded.width(), decoded.height()), (32, 32));
}

#[test]
fn writes_graymaps_by_extension() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("julia.pgm");
    julia()
        .args(&["--size", "16", "--iterations", "10", "--threads", "2"])
        .args(&["--constant", "0.285,0.01", "--range", "0,4", "--output"])
        .arg(&output)
        .assert()
        .success();
    let decoded = image::open(&output).unwrap().to_luma();
    assert_eq!(decoded.width(), 16);
}

#[test]
fn image_matches_the_library() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("julia.png");
    julia()
        .args(&["-s", "20", "-i", "30", "-t", "4", "-r", "0,6", "-o"])
        .arg(&output)
        .assert()
        .success();
    let (grid, _) = juliaset::compute(-0.778, -0.116, 20, 30, 1).unwrap();
    let range = juliaset::DisplayRange { low: 0.0, high: 6.0 };
    let decoded = image::open(&output).unwrap().to_luma();
    assert_eq!(decoded.into_raw(), juliaset::encode::to_gray(&grid, &range));
}

#[test]
fn negative_iterations_are_rejected() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("julia.png");
    julia()
        .args(&["-s", "4", "-i", "-1", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("iterations"));
    assert!(!output.exists());
}

#[test]
fn zero_size_is_rejected() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("julia.png");
    julia()
        .args(&["-s", "0", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("size"));
    assert!(!output.exists());
}

#[test]
fn zero_threads_are_rejected() {
    julia().args(&["-s", "4", "-t", "0"]).assert().failure();
}

#[test]
fn malformed_constant_is_rejected() {
    julia()
        .args(&["-s", "4", "-c", "0.285"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("constant"));
}

#[test]
fn unwritable_output_is_a_render_failure() {
    let dir = tempdir().unwrap();
    let output = dir.path().join("missing").join("julia.png");
    julia()
        .args(&["-s", "4", "-i", "4", "-t", "1", "-o"])
        .arg(&output)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
}
