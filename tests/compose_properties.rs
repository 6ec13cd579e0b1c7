//! Properties of the compositor that hold for any source image

use image::{Rgba, RgbaImage};
use memekit::{compose, Color, Compositor, Error, TextStyle};

fn gradient(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128, 255])
    })
}

#[test]
fn output_dimensions_match_input() {
    let c = Compositor::new(TextStyle::default()).unwrap();
    for (w, h) in [(1, 1), (3, 200), (640, 480), (97, 13)] {
        let src = gradient(w, h);
        let out = c.compose(&src, "WHEN THE CODE COMPILES", "ON THE FIRST TRY").unwrap();
        assert_eq!(out.dimensions(), (w, h), "size changed for {}x{}", w, h);
    }
}

#[test]
fn compose_is_deterministic() {
    let src = gradient(320, 240);
    let style = TextStyle::default();
    let a = compose(Some(&src), "SAME INPUT", "SAME OUTPUT", &style).unwrap();
    let b = compose(Some(&src), "SAME INPUT", "SAME OUTPUT", &style).unwrap();
    assert_eq!(a, b);
}

#[test]
fn empty_captions_leave_a_faithful_copy() {
    let src = gradient(200, 150);
    let out = compose(Some(&src), "", "", &TextStyle::default()).unwrap();
    assert_eq!(out, src);

    let out = compose(Some(&src), "   ", "\n", &TextStyle::default()).unwrap();
    assert_eq!(out, src);
}

#[test]
fn source_image_is_not_mutated() {
    let src = gradient(120, 90);
    let before = src.clone();
    let _ = compose(Some(&src), "HELLO", "WORLD", &TextStyle::default()).unwrap();
    assert_eq!(src, before);
}

#[test]
fn absent_or_empty_image_is_invalid_input() {
    let style = TextStyle::default();
    assert!(matches!(compose(None, "a", "b", &style), Err(Error::InvalidInput(_))));
    assert!(matches!(
        compose(Some(&RgbaImage::new(10, 0)), "a", "b", &style),
        Err(Error::InvalidInput(_))
    ));
}

#[test]
fn ink_stays_inside_caption_rects() {
    let style = TextStyle::default();
    let c = Compositor::new(style.clone()).unwrap();
    let src = RgbaImage::from_pixel(400, 300, Rgba([30, 120, 60, 255]));
    let out = c.compose(&src, "TOP LINE", "BOTTOM LINE").unwrap();
    let layouts = c.layout(400, 300, "TOP LINE", "BOTTOM LINE");
    assert_eq!(layouts.len(), 2);

    let mut changed = 0;
    for (x, y, px) in out.enumerate_pixels() {
        if px == src.get_pixel(x, y) {
            continue;
        }
        changed += 1;
        let inside = layouts.iter().any(|l| {
            let pad = style.stroke_radius(l.font_px).ceil() as i64;
            l.rect.contains_padded(x as i64, y as i64, pad)
        });
        assert!(inside, "pixel ({}, {}) changed outside every caption", x, y);
    }
    assert!(changed > 0);
}

#[test]
fn default_style_paints_white_fill_and_black_outline() {
    let src = RgbaImage::from_pixel(400, 120, Rgba([30, 120, 60, 255]));
    let out = compose(Some(&src), "HELLO", "", &TextStyle::default()).unwrap();
    let white = out.pixels().any(|p| p.0 == [255, 255, 255, 255]);
    let black = out.pixels().any(|p| p.0 == [0, 0, 0, 255]);
    assert!(white, "expected fill pixels");
    assert!(black, "expected outline pixels");
}

#[test]
fn outline_only_style_leaves_no_fill() {
    let style = TextStyle {
        stroke_width: 6.0,
        fill_color: Color::rgb(255, 0, 255),
        ..Default::default()
    };
    let src = RgbaImage::from_pixel(400, 120, Rgba([30, 120, 60, 255]));
    let out = compose(Some(&src), "HELLO", "", &style).unwrap();
    assert!(!out.pixels().any(|p| p.0 == [255, 0, 255, 255]));
    assert!(out.pixels().any(|p| p.0 == [0, 0, 0, 255]));
}

#[test]
fn long_captions_shrink_then_clip() {
    let c = Compositor::new(TextStyle::default()).unwrap();
    let layouts = c.layout(200, 200, "A BIT LONG", "THIS CAPTION IS FAR TOO LONG TO EVER FIT ON SUCH A SMALL PICTURE");

    let top = &layouts[0];
    assert!(top.font_px < 40.0);
    assert!(!top.clipped);
    assert!(top.rect.x >= 0 && top.rect.x + top.rect.width as i64 <= 200);

    let bottom = &layouts[1];
    assert_eq!(bottom.font_px, 8.0);
    assert!(bottom.clipped);

    let out = c
        .compose(&gradient(200, 200), "A BIT LONG", "THIS CAPTION IS FAR TOO LONG TO EVER FIT ON SUCH A SMALL PICTURE")
        .unwrap();
    assert_eq!(out.dimensions(), (200, 200));
}

#[test]
fn styles_past_the_limits_are_config_errors() {
    let src = gradient(64, 48);
    let huge_font = TextStyle { font_size: 6e8, min_font_size: 6e8, ..Default::default() };
    assert!(matches!(
        compose(Some(&src), "HELLO WORLD", "", &huge_font),
        Err(Error::ConfigError(_))
    ));

    let huge_stroke = TextStyle { stroke_width: -1e12, ..Default::default() };
    assert!(matches!(compose(Some(&src), "HI", "", &huge_stroke), Err(Error::ConfigError(_))));
}

#[test]
fn largest_font_renders_clipped_without_panicking() {
    let src = gradient(64, 48);
    let style = TextStyle {
        font_size: memekit::MAX_FONT_SIZE,
        min_font_size: memekit::MAX_FONT_SIZE,
        stroke_width: 0.0,
        ..Default::default()
    };
    let long = "HELLO WORLD ".repeat(200);
    let out = compose(Some(&src), &long, &long, &style).unwrap();
    assert_eq!(out.dimensions(), (64, 48));
    assert_ne!(out, src);
}

#[test]
fn widest_stroke_renders_without_panicking() {
    let src = gradient(120, 90);
    let style = TextStyle { stroke_width: -memekit::MAX_STROKE_WIDTH, font_size: 16.0, ..Default::default() };
    let out = compose(Some(&src), "HI", "", &style).unwrap();
    assert_eq!(out.dimensions(), (120, 90));
    // a full-width outline floods well past the glyphs
    assert_eq!(*out.get_pixel(60, 2), Rgba([0, 0, 0, 255]));
}
