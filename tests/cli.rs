extern crate assert_cmd;
extern crate mandelgather;
extern crate predicates;
extern crate tempfile;

use assert_cmd::prelude::*;
use mandelgather::{render_single, ComplexPlaneWindow, RenderConfig};
use predicates::prelude::*;
use std::fs;
use std::process::Command;

#[test]
fn writes_the_rendered_pixmap() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("mandel.ppm");
    Command::cargo_bin("mandelgather")
        .unwrap()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "30x20", "-w", "3", "-i", "100"])
        .assert()
        .success();

    let window = ComplexPlaneWindow::new(-2.0, 1.0, -1.5, 1.5).unwrap();
    let config = RenderConfig::new(30, 20, 100, window).unwrap();
    let expected = render_single(&config).unwrap().into_bytes();

    let written = fs::read(&out).unwrap();
    assert!(written.starts_with(b"P6"));
    assert!(written.ends_with(&expected));
}

#[test]
fn custom_corners() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("zoom.ppm");
    Command::cargo_bin("mandelgather")
        .unwrap()
        .arg("-o")
        .arg(&out)
        .args(&[
            "-s",
            "16x16",
            "-w",
            "5",
            "--leftlower=-1.0,-0.5",
            "--rightupper=0.0,0.5",
        ])
        .assert()
        .success();

    let window = ComplexPlaneWindow::new(-1.0, 0.0, -0.5, 0.5).unwrap();
    let config = RenderConfig::new(16, 16, 1000, window).unwrap();
    let expected = render_single(&config).unwrap().into_bytes();
    assert!(fs::read(&out).unwrap().ends_with(&expected));
}

#[test]
fn empty_image_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("mandelgather")
        .unwrap()
        .arg("-o")
        .arg(dir.path().join("empty.ppm"))
        .args(&["-s", "0x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration"));
}

#[test]
fn zero_workers_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("mandelgather")
        .unwrap()
        .arg("-o")
        .arg(dir.path().join("none.ppm"))
        .args(&["-w", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Worker count must be between"));
}

#[test]
fn inverted_corners_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("inverted.ppm");
    Command::cargo_bin("mandelgather")
        .unwrap()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "8x8", "--leftlower=1.0,-1.0", "--rightupper=-1.0,1.0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Render failure"));
    assert!(!out.exists());
}

#[test]
fn oversized_image_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path().join("huge.ppm");
    Command::cargo_bin("mandelgather")
        .unwrap()
        .arg("-o")
        .arg(&out)
        .args(&["-s", "70000x10"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Could not parse output image size"));
    assert!(!out.exists());
}
