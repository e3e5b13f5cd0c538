//! End-to-end runs over real directories with the pure Rust backend.
//!
//! Source images are generated with the `image` crate into a temp dir, docked
//! with `compose::run`, and the written JPEGs are decoded back for checks.

use image::{DynamicImage, ImageFormat, RgbImage};
use image_docking::compose::{self, RunError, RunEvent};
use image_docking::config::{self, ComposeConfig, Overrides};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use tempfile::TempDir;

const RED: [u8; 3] = [220, 30, 30];
const BLUE: [u8; 3] = [30, 30, 220];
const GREEN: [u8; 3] = [30, 200, 30];
const WHITE: [u8; 3] = [255, 255, 255];

fn solid(dir: &Path, name: &str, width: u32, height: u32, rgb: [u8; 3]) -> PathBuf {
    let path = dir.join(name);
    let img = RgbImage::from_pixel(width, height, image::Rgb(rgb));
    let format = ImageFormat::from_path(&path).unwrap();
    let img = if format == ImageFormat::Gif {
        DynamicImage::ImageRgba8(DynamicImage::ImageRgb8(img).to_rgba8())
    } else {
        DynamicImage::ImageRgb8(img)
    };
    img.save_with_format(&path, format).unwrap();
    path
}

fn pixel(img: &RgbImage, x: u32, y: u32) -> [u8; 3] {
    img.get_pixel(x, y).0
}

fn assert_near(actual: [u8; 3], expected: [u8; 3]) {
    let close = actual
        .iter()
        .zip(expected.iter())
        .all(|(a, e)| a.abs_diff(*e) <= 24);
    assert!(close, "color {actual:?} not near {expected:?}");
}

fn decode(path: &Path) -> RgbImage {
    image::open(path).unwrap().to_rgb8()
}

fn jpeg_outputs(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

struct Dirs {
    _tmp: TempDir,
    input: PathBuf,
    output: PathBuf,
}

fn dirs() -> Dirs {
    let tmp = TempDir::new().unwrap();
    let input = tmp.path().join("photos");
    let output = tmp.path().join("docked");
    fs::create_dir(&input).unwrap();
    Dirs {
        _tmp: tmp,
        input,
        output,
    }
}

#[test]
fn shorter_image_is_scaled_up_to_pair_height() {
    let d = dirs();
    solid(&d.input, "1.png", 100, 50, RED);
    solid(&d.input, "2.png", 100, 100, BLUE);

    let summary = compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap();
    assert_eq!(summary.images, 2);
    assert_eq!(summary.pairs_written, 1);

    let out = decode(&d.output.join("combined_image_0001.jpg"));
    assert_eq!(out.dimensions(), (300, 100));
    // 1.png stretched to 200x100 on the left, 2.png untouched on the right
    assert_near(pixel(&out, 10, 10), RED);
    assert_near(pixel(&out, 190, 90), RED);
    assert_near(pixel(&out, 210, 10), BLUE);
    assert_near(pixel(&out, 290, 90), BLUE);
}

#[test]
fn odd_count_docks_last_image_with_white_block() {
    let d = dirs();
    solid(&d.input, "a.png", 40, 30, RED);
    solid(&d.input, "b.jpg", 40, 30, BLUE);
    solid(&d.input, "c.gif", 64, 48, GREEN);

    let summary = compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap();
    assert_eq!(summary.pairs_written, 2);

    let last = decode(&d.output.join("combined_image_0002.jpg"));
    assert_eq!(last.dimensions(), (128, 48));
    assert_near(pixel(&last, 20, 20), GREEN);
    assert_near(pixel(&last, 100, 20), WHITE);
    assert_near(pixel(&last, 127, 47), WHITE);
}

#[test]
fn writes_one_contiguous_name_per_pair() {
    let d = dirs();
    for i in 0..7u8 {
        solid(&d.input, &format!("img_{i:02}.png"), 16, 16, [i * 30, 0, 0]);
    }

    compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap();

    assert_eq!(
        jpeg_outputs(&d.output),
        vec![
            "combined_image_0001.jpg",
            "combined_image_0002.jpg",
            "combined_image_0003.jpg",
            "combined_image_0004.jpg",
        ]
    );
}

#[test]
fn empty_input_writes_nothing() {
    let d = dirs();
    fs::write(d.input.join("notes.txt"), "not an image").unwrap();

    let err = compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::EmptyInput(_)), "got {err:?}");
    assert!(!d.output.exists() || jpeg_outputs(&d.output).is_empty());
}

#[test]
fn missing_input_dir_is_input_path_error() {
    let d = dirs();
    let missing = d.input.join("nope");

    let err = compose::run(&missing, &d.output, &ComposeConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::InputPath { .. }), "got {err:?}");
}

#[test]
fn corrupt_image_stops_run_and_keeps_earlier_outputs() {
    let d = dirs();
    solid(&d.input, "1.png", 20, 20, RED);
    solid(&d.input, "2.png", 20, 20, BLUE);
    fs::write(d.input.join("3.png"), b"definitely not a png").unwrap();
    solid(&d.input, "4.png", 20, 20, GREEN);

    let err = compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap_err();
    match err {
        RunError::ImageDecode { path, .. } => assert!(path.ends_with("3.png")),
        other => panic!("expected ImageDecode, got {other:?}"),
    }
    assert_eq!(jpeg_outputs(&d.output), vec!["combined_image_0001.jpg"]);
}

#[test]
fn output_path_that_is_a_file_is_rejected() {
    let d = dirs();
    solid(&d.input, "1.png", 8, 8, RED);
    let blocker = d.input.parent().unwrap().join("blocker");
    fs::write(&blocker, "file").unwrap();

    let err = compose::run(&d.input, &blocker, &ComposeConfig::default()).unwrap_err();
    assert!(matches!(err, RunError::OutputPath { .. }), "got {err:?}");
}

#[test]
fn rerun_overwrites_with_identical_geometry() {
    let d = dirs();
    solid(&d.input, "x.png", 30, 60, RED);
    solid(&d.input, "y.png", 90, 20, BLUE);

    compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap();
    let first = decode(&d.output.join("combined_image_0001.jpg"));
    compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap();
    let second = decode(&d.output.join("combined_image_0001.jpg"));

    // 30x60 stays, 90x20 becomes 270x60
    assert_eq!(first.dimensions(), (300, 60));
    assert_eq!(first.dimensions(), second.dimensions());
    assert_eq!(jpeg_outputs(&d.output).len(), 1);
}

#[test]
fn events_report_every_pair_in_order() {
    let d = dirs();
    solid(&d.input, "1.png", 10, 10, RED);
    solid(&d.input, "2.png", 10, 10, BLUE);
    solid(&d.input, "3.png", 10, 10, GREEN);

    let (tx, rx) = mpsc::channel();
    compose::run_with_backend(
        &image_docking::imaging::RustBackend::new(),
        &d.input,
        &d.output,
        &ComposeConfig::default(),
        Some(tx),
        None,
    )
    .unwrap();

    let events: Vec<RunEvent> = rx.into_iter().collect();
    assert_eq!(events.len(), 4);
    assert!(matches!(events[0], RunEvent::Started { images: 3, pairs: 2, .. }));
    match &events[2] {
        RunEvent::PairWritten {
            index,
            second,
            width,
            height,
            ..
        } => {
            assert_eq!(*index, 2);
            assert!(second.is_none());
            assert_eq!((*width, *height), (20, 10));
        }
        other => panic!("unexpected event {other:?}"),
    }
    assert!(matches!(events[3], RunEvent::Finished { written: 2 }));
}

#[test]
fn config_in_input_dir_is_picked_up() {
    let d = dirs();
    solid(&d.input, "1.png", 32, 32, RED);
    fs::write(
        d.input.join("config.toml"),
        "[output]\nquality = 40\n[filler]\ncolor = [0, 0, 0]\n",
    )
    .unwrap();

    let cfg = config::load_config(&d.input, None, &Overrides::default()).unwrap();
    assert_eq!(cfg.output.quality, 40);

    compose::run(&d.input, &d.output, &cfg).unwrap();
    let out = decode(&d.output.join("combined_image_0001.jpg"));
    assert_eq!(out.dimensions(), (64, 32));
    assert_near(pixel(&out, 56, 16), [0, 0, 0]);
}

#[test]
fn plan_matches_what_run_writes() {
    let d = dirs();
    solid(&d.input, "b.png", 8, 8, RED);
    solid(&d.input, "A.png", 8, 8, BLUE);
    solid(&d.input, "c.jpg", 8, 8, GREEN);

    let plan = compose::plan(&d.input).unwrap();
    let names: Vec<(&str, Option<&str>)> = plan
        .iter()
        .map(|p| (p.first.as_str(), p.second.as_deref()))
        .collect();
    assert_eq!(names, vec![("A.png", Some("b.png")), ("c.jpg", None)]);

    let summary = compose::run(&d.input, &d.output, &ComposeConfig::default()).unwrap();
    let written: Vec<String> = summary
        .outputs
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    let planned: Vec<String> = plan.iter().map(|p| p.output.clone()).collect();
    assert_eq!(written, planned);
}
