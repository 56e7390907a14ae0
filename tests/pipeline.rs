//! End-to-end runs of the sweep pipeline with the production codec over
//! real encoded images in temporary directories.

use snapsize::codec::{ImageCodec, RustCodec};
use snapsize::planner::Dimensions;
use snapsize::process;
use snapsize::settings::{NewImageSettings, Settings};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn settings_for(paths: Vec<PathBuf>) -> Settings {
    Settings {
        paths,
        max_age: 60,
        new_image: NewImageSettings {
            suffix: "_small".to_string(),
            max_width: 1920,
            max_height: 1080,
            jpeg_quality: 80,
        },
    }
}

fn write_jpeg(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 64])
    });
    image::DynamicImage::ImageRgb8(img)
        .save_with_format(path, image::ImageFormat::Jpeg)
        .unwrap();
}

fn write_png(path: &Path, width: u32, height: u32) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([128, (x % 256) as u8, (y % 256) as u8])
    });
    image::DynamicImage::ImageRgb8(img)
        .save_with_format(path, image::ImageFormat::Png)
        .unwrap();
}

fn decoded_dimensions(path: &Path) -> Dimensions {
    let codec = RustCodec::new();
    let img = codec.decode(path).unwrap();
    codec.dimensions(&img)
}

#[test]
fn mixed_directory_resizes_images_and_skips_the_rest() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("wide.jpg"), 4000, 2000);
    write_png(&tmp.path().join("tall.png"), 1000, 3000);
    std::fs::write(tmp.path().join("readme.txt"), "not an image").unwrap();
    std::fs::write(tmp.path().join("memo.jpg"), "text bytes, image extension").unwrap();
    std::fs::write(tmp.path().join("empty.jpg"), []).unwrap();
    std::fs::create_dir(tmp.path().join("subdir")).unwrap();

    let codec = RustCodec::new();
    let stats = process::run(&codec, &settings_for(vec![tmp.path().to_path_buf()])).unwrap();

    assert_eq!(stats.resized, 2);

    // Two sequential limits: 4000x2000 clamps on width only
    assert_eq!(
        decoded_dimensions(&tmp.path().join("wide_small.jpg")),
        Dimensions::new(1920, 960)
    );
    // 1000x3000 skips the width stage and scales from the originals
    assert_eq!(
        decoded_dimensions(&tmp.path().join("tall_small.png")),
        Dimensions::new(360, 1080)
    );

    assert!(!tmp.path().join("readme_small.txt").exists());
    assert!(!tmp.path().join("memo_small.jpg").exists());
    assert!(!tmp.path().join("empty_small.jpg").exists());
}

#[test]
fn output_keeps_extension_but_contains_jpeg() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("shot.png"), 2500, 1250);

    let codec = RustCodec::new();
    process::run(&codec, &settings_for(vec![tmp.path().to_path_buf()])).unwrap();

    let out = tmp.path().join("shot_small.png");
    let bytes = std::fs::read(&out).unwrap();
    assert_eq!(&bytes[..3], &[0xFF, 0xD8, 0xFF], "expected JPEG SOI marker");
    assert_eq!(decoded_dimensions(&out), Dimensions::new(1920, 960));
}

#[test]
fn image_under_both_limits_is_copied_at_original_size() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("already-small.jpg"), 640, 480);

    let codec = RustCodec::new();
    let stats = process::run(&codec, &settings_for(vec![tmp.path().to_path_buf()])).unwrap();

    assert_eq!(stats.resized, 1);
    assert_eq!(
        decoded_dimensions(&tmp.path().join("already-small_small.jpg")),
        Dimensions::new(640, 480)
    );
}

#[test]
fn second_run_adds_no_new_files() {
    let tmp = TempDir::new().unwrap();
    write_jpeg(&tmp.path().join("a.jpg"), 2000, 1500);
    write_jpeg(&tmp.path().join("b.jpg"), 900, 700);

    let codec = RustCodec::new();
    let settings = settings_for(vec![tmp.path().to_path_buf()]);

    process::run(&codec, &settings).unwrap();
    let after_first: Vec<_> = list_names(tmp.path());

    process::run(&codec, &settings).unwrap();
    let after_second: Vec<_> = list_names(tmp.path());

    assert_eq!(after_first, after_second);
    assert!(after_first.contains(&"a_small.jpg".to_string()));
    assert!(after_first.contains(&"b_small.jpg".to_string()));
}

fn list_names(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    names.sort();
    names
}

#[test]
fn corrupt_jpeg_aborts_but_keeps_earlier_outputs() {
    let tmp = TempDir::new().unwrap();

    // Two directories so the abort point is deterministic: the first sweep
    // succeeds, the second hits the corrupt file.
    let first = tmp.path().join("first");
    let second = tmp.path().join("second");
    std::fs::create_dir(&first).unwrap();
    std::fs::create_dir(&second).unwrap();

    write_jpeg(&first.join("ok.jpg"), 2000, 1000);

    let intact = second.join("intact.jpg");
    write_jpeg(&intact, 64, 64);
    let bytes = std::fs::read(&intact).unwrap();
    std::fs::remove_file(&intact).unwrap();
    std::fs::write(second.join("broken.jpg"), &bytes[..bytes.len() / 2]).unwrap();

    let codec = RustCodec::new();
    let result = process::run(&codec, &settings_for(vec![first.clone(), second]));

    assert!(result.is_err());
    // No rollback: the copy written before the fatal error stays
    assert!(first.join("ok_small.jpg").exists());
}
