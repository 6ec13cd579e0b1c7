use std::fs;
use std::path::PathBuf;

use image::{Rgba, RgbaImage};
use memekit::rendering::pixel_digest;
use memekit::{Compositor, TextStyle};

fn golden_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests/goldens/expected")
}

fn golden_path(name: &str) -> PathBuf {
    golden_dir().join(name)
}

/// Checkerboard-over-gradient fixture; cheap to regenerate, no binary assets.
fn fixture(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let checker = if (x / 16 + y / 16) % 2 == 0 { 40 } else { 0 };
        Rgba([
            (x * 200 / width) as u8 + checker,
            (y * 200 / height) as u8 + checker,
            90,
            255,
        ])
    })
}

fn check_golden(name: &str, rendered: &RgbaImage) {
    let digest = pixel_digest(rendered);
    let expected_path = golden_path(name);
    if std::env::var("UPDATE_GOLDENS").is_ok() {
        fs::create_dir_all(golden_dir()).ok();
        fs::write(&expected_path, &digest).expect("write golden");
        println!("Updated golden: {:?}", expected_path);
        return;
    }

    let exp = fs::read_to_string(&expected_path).unwrap_or_else(|e| {
        panic!(
            "no golden at {:?} ({}); run with UPDATE_GOLDENS=1 to create it",
            expected_path, e
        )
    });
    assert_eq!(digest, exp.trim(), "render of {} drifted from its golden", name);
}

#[test]
fn golden_default_style_matches_fixture() {
    let c = Compositor::new(TextStyle::default()).unwrap();
    let out = c
        .compose(&fixture(320, 240), "ONE DOES NOT SIMPLY", "WRITE GOLDEN TESTS")
        .unwrap();
    check_golden("default_style.sha256", &out);
}

#[test]
fn golden_clipped_caption_matches_fixture() {
    let c = Compositor::new(TextStyle::default()).unwrap();
    let out = c
        .compose(&fixture(96, 64), "", "A CAPTION THAT CANNOT POSSIBLY FIT")
        .unwrap();
    check_golden("clipped_caption.sha256", &out);
}

#[test]
fn repeated_renders_share_a_digest() {
    let c = Compositor::new(TextStyle::default()).unwrap();
    let src = fixture(200, 100);
    let first = pixel_digest(&c.compose(&src, "DIGEST", "STABLE").unwrap());
    for _ in 0..3 {
        assert_eq!(pixel_digest(&c.compose(&src, "DIGEST", "STABLE").unwrap()), first);
    }
}
