use image::{Rgb, RgbImage, Rgba, RgbaImage};
use mbp_codec::{convert_file, decode_file, Level, Variant};
use std::process::Command;
use tempfile::tempdir;

const MBPENC: &str = env!("CARGO_BIN_EXE_mbpenc");

#[test]
fn test_cli_converts_png() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("digit.png");
    let output = dir.path().join("digit.mbp");

    // An anti-aliased vertical bar: columns fade 0, 100, 150, 255.
    let img = RgbImage::from_fn(4, 30, |x, _| {
        let v = [0u8, 100, 150, 255][x as usize];
        Rgb([v, v, v])
    });
    img.save(&input).expect("Failed to write input png");

    let status = Command::new(MBPENC)
        .arg(&input)
        .arg(&output)
        .status()
        .expect("Failed to run mbpenc");
    assert!(status.success());

    let bytes = std::fs::read(&output).expect("Output should exist");
    assert_eq!(bytes[0], Variant::VerticalRle.id());
    assert_eq!(&bytes[1..3], &[4, 30]);

    let map = decode_file(&output).unwrap();
    for y in 0..30 {
        assert_eq!(map.get(0, y), Level::Transparent);
        assert_eq!(map.get(1, y), Level::Low);
        assert_eq!(map.get(2, y), Level::High);
        assert_eq!(map.get(3, y), Level::Opaque);
    }
}

#[test]
fn test_cli_missing_input_fails() {
    let dir = tempdir().expect("Failed to create temp dir");
    let output = dir.path().join("out.mbp");

    let result = Command::new(MBPENC)
        .arg(dir.path().join("nothing-here.png"))
        .arg(&output)
        .output()
        .expect("Failed to run mbpenc");
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_cli_requires_two_arguments() {
    let result = Command::new(MBPENC)
        .arg("only-one.png")
        .output()
        .expect("Failed to run mbpenc");
    assert!(!result.status.success());
}

#[test]
fn test_cli_takes_no_version_flag() {
    let result = Command::new(MBPENC)
        .arg("--version")
        .output()
        .expect("Failed to run mbpenc");
    assert!(!result.status.success());
}

#[test]
fn test_cli_rejects_oversized_image() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("big.png");
    let output = dir.path().join("big.mbp");
    RgbImage::new(10, 400).save(&input).unwrap();

    let result = Command::new(MBPENC)
        .arg(&input)
        .arg(&output)
        .output()
        .expect("Failed to run mbpenc");
    assert!(!result.status.success());
    assert!(!output.exists());
}

#[test]
fn test_alpha_channel_is_ignored() {
    let dir = tempdir().expect("Failed to create temp dir");
    let input = dir.path().join("alpha.png");
    let output = dir.path().join("alpha.mbp");
    let img = RgbaImage::from_fn(6, 2, |x, _| Rgba([if x < 3 { 255 } else { 0 }, 0, 0, 0]));
    img.save(&input).unwrap();

    convert_file(&input, &output).unwrap();
    let map = decode_file(&output).unwrap();
    assert_eq!(map.get(0, 0), Level::Opaque);
    assert_eq!(map.get(5, 1), Level::Transparent);
}
