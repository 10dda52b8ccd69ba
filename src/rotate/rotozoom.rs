//! Rotation + scale of needle rasters.

use std::sync::Arc;

use crate::{
    assets::raster::{Raster, byte_len},
    foundation::{
        core::{Affine, Point, Size, Vec2},
        math::snap,
    },
};

/// Produces rotated and scaled copies of a raster.
///
/// Implementations must return a raster whose bounds contain the whole transformed
/// source (no cropping). Angles are in degrees, counter-clockwise as seen on a y-down
/// screen.
pub trait ImageRotator: Send + Sync {
    /// Rotate `src` by `angle_deg` about its center and scale it by `scale`.
    fn rotozoom(&self, src: &Raster, angle_deg: f64, scale: f64) -> Raster;

    /// Size of the raster [`rotozoom`](Self::rotozoom) would return, without producing it.
    fn rotated_size(&self, src: &Raster, angle_deg: f64, scale: f64) -> Size {
        self.rotozoom(src, angle_deg, scale).size()
    }
}

/// CPU rotator with bilinear (anti-aliased) sampling on premultiplied pixels.
#[derive(Clone, Copy, Debug, Default)]
pub struct BilinearRotator;

const EXTENT_EPS: f64 = 1e-6;

impl BilinearRotator {
    /// Create a new rotator.
    pub fn new() -> Self {
        Self
    }
}

impl ImageRotator for BilinearRotator {
    fn rotozoom(&self, src: &Raster, angle_deg: f64, scale: f64) -> Raster {
        if src.is_empty() || !angle_deg.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return Raster::transparent(0, 0);
        }

        let (width, height, fwd) = output_transform(src, angle_deg, scale);
        let inv = fwd.inverse();

        let mut out = vec![0u8; byte_len(width, height)];
        for y in 0..height {
            for x in 0..width {
                let p = inv * Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
                let px = sample_bilinear(src, p.x - 0.5, p.y - 0.5);
                if px[3] == 0 {
                    continue;
                }
                let idx = ((y as usize) * (width as usize) + (x as usize)) * 4;
                out[idx..idx + 4].copy_from_slice(&px);
            }
        }

        Raster {
            width,
            height,
            rgba8_premul: Arc::new(out),
        }
    }

    fn rotated_size(&self, src: &Raster, angle_deg: f64, scale: f64) -> Size {
        if src.is_empty() || !angle_deg.is_finite() || !scale.is_finite() || scale <= 0.0 {
            return Size::ZERO;
        }
        let (width, height, _) = output_transform(src, angle_deg, scale);
        Size::new(f64::from(width), f64::from(height))
    }
}

/// Output size and source-to-output transform for a rotozoom.
fn output_transform(src: &Raster, angle_deg: f64, scale: f64) -> (u32, u32, Affine) {
    let src_center = src.bounds().center().to_vec2();
    // kurbo rotates clockwise on a y-down surface; negate for screen counter-clockwise.
    let rotate_scale = Affine::scale(scale) * Affine::rotate(-angle_deg.to_radians());
    let bbox = (rotate_scale * Affine::translate(-src_center)).transform_rect_bbox(src.bounds());

    let width = snap(bbox.width(), EXTENT_EPS).ceil().max(1.0) as u32;
    let height = snap(bbox.height(), EXTENT_EPS).ceil().max(1.0) as u32;
    let dst_center = Vec2::new(f64::from(width) / 2.0, f64::from(height) / 2.0);

    let fwd = Affine::translate(dst_center) * rotate_scale * Affine::translate(-src_center);
    (width, height, fwd)
}

fn sample_bilinear(src: &Raster, x: f64, y: f64) -> [u8; 4] {
    let x0 = x.floor();
    let y0 = y.floor();
    let fx = (x - x0) as f32;
    let fy = (y - y0) as f32;
    let (ix, iy) = (x0 as i64, y0 as i64);

    let taps = [
        (src.pixel(ix, iy), (1.0 - fx) * (1.0 - fy)),
        (src.pixel(ix + 1, iy), fx * (1.0 - fy)),
        (src.pixel(ix, iy + 1), (1.0 - fx) * fy),
        (src.pixel(ix + 1, iy + 1), fx * fy),
    ];

    let mut acc = [0f32; 4];
    for (px, w) in taps {
        if w == 0.0 {
            continue;
        }
        for c in 0..4 {
            acc[c] += f32::from(px[c]) * w;
        }
    }

    let mut out = [0u8; 4];
    for c in 0..4 {
        out[c] = acc[c].round().clamp(0.0, 255.0) as u8;
    }
    // Premultiplied color never exceeds alpha.
    for c in 0..3 {
        out[c] = out[c].min(out[3]);
    }
    out
}

#[cfg(test)]
#[path = "../../tests/unit/rotate/rotozoom.rs"]
mod tests;
