//! End-to-end runs of the batch against real PNG files.
//!
//! Images are synthesized in a temp directory with the `image` crate, then the
//! public `compress` entry point converts them with the pure Rust backend.

use compress_images::compress::{self, CompressError, CompressEvent};
use compress_images::config::{CompressConfig, ErrorPolicy};
use compress_images::output;
use image::{ColorType, ImageFormat, ImageReader, Rgba, RgbaImage};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write_png(path: &Path, width: u32, height: u32) {
    RgbaImage::from_fn(width, height, |x, y| {
        let alpha = if (x + y) % 7 == 0 { 0 } else { 255 };
        Rgba([(x % 251) as u8, (y % 241) as u8, ((x ^ y) % 256) as u8, alpha])
    })
    .save_with_format(path, ImageFormat::Png)
    .unwrap();
}

fn config_for(dir: &Path) -> CompressConfig {
    CompressConfig {
        source_dir: dir.to_path_buf(),
        ..Default::default()
    }
}

fn decoded(path: &Path) -> image::DynamicImage {
    ImageReader::open(path)
        .unwrap()
        .with_guessed_format()
        .unwrap()
        .decode()
        .unwrap()
}

#[test]
fn oversized_uppercase_png_is_downscaled() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("photo.PNG"), 2000, 1000);

    let summary = compress::compress(&config_for(tmp.path()), None).unwrap();

    let out = tmp.path().join("photo.jpg");
    assert!(out.exists());
    let img = decoded(&out);
    assert_eq!((img.width(), img.height()), (1400, 700));
    assert_eq!(img.color(), ColorType::Rgb8);

    let file = &summary.compressed[0];
    assert_eq!(file.output_name, "photo.jpg");
    assert!(file.alpha_dropped);
    assert_eq!(file.output_bytes, fs::metadata(&out).unwrap().len());

    let line = &output::format_compress_event(&CompressEvent::FileCompressed(file.clone()))[0];
    assert!(line.starts_with("photo.PNG: "), "{line}");
    assert!(line.ends_with("MB (photo.jpg)"), "{line}");
    assert!(line.contains("MB -> "), "{line}");

    // Original is kept
    assert!(tmp.path().join("photo.PNG").exists());
}

#[test]
fn small_png_keeps_size_and_text_files_are_ignored() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("icon.png"), 300, 300);
    fs::write(tmp.path().join("readme.txt"), "hello").unwrap();

    let (tx, rx) = std::sync::mpsc::channel();
    let summary = compress::compress(&config_for(tmp.path()), Some(tx)).unwrap();
    let events: Vec<CompressEvent> = rx.iter().collect();

    assert_eq!(events.len(), 1);
    assert_eq!(summary.compressed.len(), 1);
    let img = decoded(&tmp.path().join("icon.jpg"));
    assert_eq!((img.width(), img.height()), (300, 300));

    let mut names: Vec<String> = fs::read_dir(tmp.path())
        .unwrap()
        .map(|e| e.unwrap().file_name().into_string().unwrap())
        .collect();
    names.sort();
    assert_eq!(names, vec!["icon.jpg", "icon.png", "readme.txt"]);
    assert_eq!(fs::read_to_string(tmp.path().join("readme.txt")).unwrap(), "hello");

    assert_eq!(
        output::format_completion(&summary).last().unwrap(),
        output::DONE_LINE
    );
}

#[test]
fn corrupt_png_aborts_by_default() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.png"), b"not an image").unwrap();

    let result = compress::compress(&config_for(tmp.path()), None);
    assert!(matches!(result, Err(CompressError::File { .. })));
    assert!(!tmp.path().join("broken.jpg").exists());
}

#[test]
fn corrupt_png_is_skipped_when_continuing() {
    let tmp = TempDir::new().unwrap();
    fs::write(tmp.path().join("broken.png"), b"not an image").unwrap();
    write_png(&tmp.path().join("fine.png"), 40, 30);
    let config = CompressConfig {
        on_error: ErrorPolicy::Continue,
        ..config_for(tmp.path())
    };

    let summary = compress::compress(&config, None).unwrap();

    assert_eq!(summary.compressed.len(), 1);
    assert_eq!(summary.failed.len(), 1);
    assert_eq!(summary.failed[0].file_name, "broken.png");
    assert!(tmp.path().join("fine.jpg").exists());
    assert_eq!(
        output::format_completion(&summary).last().unwrap(),
        "Done with 1 failed image(s)."
    );
}

#[test]
fn second_run_only_touches_sources() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("a.png"), 20, 20);
    let config = config_for(tmp.path());

    compress::compress(&config, None).unwrap();
    let second = compress::compress(&config, None).unwrap();

    assert_eq!(second.compressed.len(), 1);
    assert_eq!(second.compressed[0].file_name, "a.png");
}

#[test]
fn check_plans_without_writing() {
    let tmp = TempDir::new().unwrap();
    write_png(&tmp.path().join("wide.png"), 1600, 400);

    let planned = compress::plan(&config_for(tmp.path())).unwrap();

    assert_eq!(planned.len(), 1);
    assert_eq!(planned[0].output_dims, (1400, 350));
    assert!(!tmp.path().join("wide.jpg").exists());
}

#[test]
fn converted_colours_match_the_source() {
    let tmp = TempDir::new().unwrap();
    let colours = [("red", [200, 0, 0]), ("blue", [0, 0, 200]), ("grey", [128, 128, 128])];
    for (name, colour) in colours {
        image::RgbImage::from_pixel(64, 64, image::Rgb(colour))
            .save_with_format(tmp.path().join(format!("{name}.png")), ImageFormat::Png)
            .unwrap();
    }

    compress::compress(&config_for(tmp.path()), None).unwrap();

    for (name, colour) in colours {
        let img = decoded(&tmp.path().join(format!("{name}.jpg"))).to_rgb8();
        let image::Rgb(got) = *img.get_pixel(32, 32);
        for (want, got) in colour.iter().zip(got) {
            assert!(want.abs_diff(got) <= 8, "{name}: {colour:?} read back as {got:?}");
        }
    }
}
