//! Coverage masks and blending into RGBA buffers

use image::RgbaImage;

use crate::Color;

/// Per-pixel ink amount in `[0, 1]` for a rasterized caption line.
#[derive(Debug, Clone, PartialEq)]
pub struct Coverage {
    width: u32,
    height: u32,
    data: Vec<f32>,
}

impl Coverage {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn get(&self, x: u32, y: u32) -> f32 {
        if x >= self.width || y >= self.height {
            return 0.0;
        }
        self.data[self.index(x, y)]
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Raise the coverage at `(x, y)` to at least `value`. Out-of-range
    /// coordinates are ignored.
    pub fn accumulate(&mut self, x: i64, y: i64, value: f32) {
        if x < 0 || y < 0 || x >= self.width as i64 || y >= self.height as i64 {
            return;
        }
        let idx = self.index(x as u32, y as u32);
        let v = value.clamp(0.0, 1.0);
        if v > self.data[idx] {
            self.data[idx] = v;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.data.iter().all(|v| *v == 0.0)
    }

    /// Remove `other`'s ink from `self`. Both masks must be the same size.
    pub fn subtract(&mut self, other: &Coverage) {
        debug_assert_eq!((self.width, self.height), (other.width, other.height));
        for (v, o) in self.data.iter_mut().zip(&other.data) {
            *v = (*v - *o).max(0.0);
        }
    }

    /// Grow the inked area by a disc of `radius` pixels.
    ///
    /// Offsets on the disc boundary are weighted by how far inside the
    /// radius they fall, which keeps fractional radii smooth. The result has
    /// the same size as `self`; callers must leave `ceil(radius)` pixels of
    /// padding around the ink.
    pub fn dilate(&self, radius: f32) -> Coverage {
        if radius <= 0.0 {
            return self.clone();
        }
        let reach = radius.ceil() as i64;
        let mut kernel = Vec::new();
        for dy in -reach..=reach {
            for dx in -reach..=reach {
                let dist = ((dx * dx + dy * dy) as f32).sqrt();
                let weight = (radius + 0.5 - dist).clamp(0.0, 1.0);
                if weight > 0.0 {
                    kernel.push((dx, dy, weight));
                }
            }
        }

        let mut out = Coverage::new(self.width, self.height);
        for y in 0..self.height as i64 {
            for x in 0..self.width as i64 {
                let src = self.data[self.index(x as u32, y as u32)];
                if src == 0.0 {
                    continue;
                }
                for &(dx, dy, weight) in &kernel {
                    out.accumulate(x + dx, y + dy, src * weight);
                }
            }
        }
        out
    }
}

/// Source-over blend `color`, modulated by `coverage`, onto `canvas` with the
/// mask's top-left corner at `(left, top)`. Pixels outside the canvas are
/// clipped.
pub fn blend_coverage(canvas: &mut RgbaImage, coverage: &Coverage, left: i64, top: i64, color: Color) {
    let (cw, ch) = canvas.dimensions();
    let color_alpha = color.a as f32 / 255.0;
    for my in 0..coverage.height() {
        let y = top + my as i64;
        if y < 0 || y >= ch as i64 {
            continue;
        }
        for mx in 0..coverage.width() {
            let x = left + mx as i64;
            if x < 0 || x >= cw as i64 {
                continue;
            }
            let alpha = coverage.get(mx, my) * color_alpha;
            if alpha <= 0.0 {
                continue;
            }
            let px = canvas.get_pixel_mut(x as u32, y as u32);
            px.0 = source_over(px.0, [color.r, color.g, color.b], alpha);
        }
    }
}

fn source_over(dst: [u8; 4], src: [u8; 3], alpha: f32) -> [u8; 4] {
    let dst_alpha = dst[3] as f32 / 255.0;
    let out_alpha = alpha + dst_alpha * (1.0 - alpha);
    if out_alpha <= 0.0 {
        return [0, 0, 0, 0];
    }
    let mut out = [0u8; 4];
    for i in 0..3 {
        let s = src[i] as f32 / 255.0;
        let d = dst[i] as f32 / 255.0;
        let c = (s * alpha + d * dst_alpha * (1.0 - alpha)) / out_alpha;
        out[i] = (c * 255.0).round().clamp(0.0, 255.0) as u8;
    }
    out[3] = (out_alpha * 255.0).round().clamp(0.0, 255.0) as u8;
    out
}
