use std::sync::Mutex;

use super::*;
use crate::{
    config::meter::ChannelLayout,
    foundation::core::{Size, Vec2},
    rotate::rotozoom::BilinearRotator,
};

/// Rotator that records requested angles and returns a blank raster of fixed size.
#[derive(Default)]
struct RecordingRotator {
    angles: Mutex<Vec<f64>>,
    sized: Mutex<Vec<f64>>,
}

impl ImageRotator for RecordingRotator {
    fn rotozoom(&self, src: &Raster, angle_deg: f64, scale: f64) -> Raster {
        assert_eq!(scale, 1.0);
        self.angles.lock().unwrap().push(angle_deg);
        Raster::transparent(src.width, src.height)
    }

    fn rotated_size(&self, src: &Raster, angle_deg: f64, _scale: f64) -> Size {
        self.sized.lock().unwrap().push(angle_deg);
        src.size()
    }
}

fn needle() -> Raster {
    let (w, h) = (20u32, 4u32);
    Raster::from_premul_rgba8(w, h, vec![255u8; (w * h * 4) as usize]).unwrap()
}

fn mono(start: f64, stop: f64, steps: f64) -> MeterGeometry {
    MeterGeometry {
        start_angle: start,
        stop_angle: stop,
        steps_per_degree: steps,
        distance: 25.0,
        channels: ChannelLayout::Mono {
            origin: Vec2::new(100.0, 80.0),
        },
        offset: Vec2::ZERO,
    }
}

#[test]
fn ninety_degrees_at_one_step_gives_ninety_frames() {
    let image = needle();
    let g = mono(0.0, 90.0, 1.0);
    let rot = RecordingRotator::default();
    let frames = SpriteSequenceBuilder::new(&image, &g).build(&rot, Point::new(100.0, 80.0));

    assert_eq!(frames.sprites.len(), 90);
    assert_eq!(frames.rects.len(), 90);

    let angles = rot.angles.lock().unwrap().clone();
    assert_eq!(angles.len(), 90);
    // Each step decrements first, wrapping below zero.
    assert_eq!(angles[0], 359.0);
    assert_eq!(angles[1], 358.0);
    assert_eq!(angles[89], 270.0);
}

#[test]
fn frame_angles_follow_rotator_calls() {
    let image = needle();
    let g = mono(30.0, -30.0, 4.0);
    let rot = RecordingRotator::default();
    let builder = SpriteSequenceBuilder::new(&image, &g);
    builder.build(&rot, Point::ORIGIN);

    let expected: Vec<f64> = builder.frame_angles().collect();
    assert_eq!(expected.len(), 240);
    assert_eq!(*rot.angles.lock().unwrap(), expected);
    assert!((expected[0] - 29.75).abs() < 1e-9);
    for a in &expected {
        assert!((0.0..360.0).contains(a));
    }
}

#[test]
fn frame_count_scales_with_resolution() {
    let image = needle();
    for (start, stop, steps, want) in [
        (0.0, 90.0, 1.0, 90),
        (0.0, 90.0, 2.0, 180),
        (45.0, -45.0, 3.0, 270),
        (10.0, 20.5, 1.0, 10),
    ] {
        let g = mono(start, stop, steps);
        let rot = RecordingRotator::default();
        let frames = SpriteSequenceBuilder::new(&image, &g).build(&rot, Point::ORIGIN);
        assert_eq!(frames.sprites.len(), want);
        assert_eq!(frames.rects.len(), want);
    }
}

#[test]
fn degenerate_geometry_builds_nothing() {
    let image = needle();
    for g in [
        mono(10.0, 10.0, 1.0),
        mono(0.0, 90.0, 0.0),
        mono(0.0, 90.0, -2.0),
        mono(0.0, 90.0, 1e300),
    ] {
        let rot = RecordingRotator::default();
        let builder = SpriteSequenceBuilder::new(&image, &g);
        let frames = builder.build(&rot, Point::ORIGIN);
        assert!(frames.sprites.is_empty());
        assert!(frames.rects.is_empty());
        assert!(builder.build_rects_only(&rot, Point::ORIGIN).is_empty());
        assert!(rot.angles.lock().unwrap().is_empty());
        assert_eq!(builder.frame_angles().count(), 0);
    }
}

#[test]
fn rect_centers_orbit_pivot_at_distance() {
    let image = needle();
    let g = mono(60.0, -60.0, 2.0);
    let pivot = Point::new(150.0, 120.0);
    let frames = SpriteSequenceBuilder::new(&image, &g).build(&BilinearRotator, pivot);

    assert_eq!(frames.rects.len(), 240);
    for (sprite, rect) in frames.sprites.iter().zip(&frames.rects) {
        let c = rect.center();
        let r = ((c.x - pivot.x).powi(2) + (c.y - pivot.y).powi(2)).sqrt();
        assert!((r - g.distance).abs() < 1e-9, "radius {r}");
        assert!((rect.width() - f64::from(sprite.width)).abs() < 1e-9);
        assert!((rect.height() - f64::from(sprite.height)).abs() < 1e-9);
    }
}

#[test]
fn first_center_follows_base_offset() {
    let image = needle();
    let g = mono(0.0, 90.0, 1.0);
    let pivot = Point::new(0.0, 0.0);
    let rot = RecordingRotator::default();
    let frames = SpriteSequenceBuilder::new(&image, &g).build(&rot, pivot);

    let base = 2.0f64.atan2(-10.0);
    let theta = 359.0f64.to_radians() + base;
    let c = frames.rects[0].center();
    assert!((c.x - 25.0 * theta.cos()).abs() < 1e-9);
    assert!((c.y + 25.0 * theta.sin()).abs() < 1e-9);
}

#[test]
fn rects_only_matches_full_build() {
    let image = needle();
    let g = mono(45.0, -45.0, 1.0);
    let pivot = Point::new(300.0, 50.0);
    let builder = SpriteSequenceBuilder::new(&image, &g);

    let full = builder.build(&BilinearRotator, pivot);
    let rects = builder.build_rects_only(&BilinearRotator, pivot);
    assert_eq!(rects, full.rects);

    let rot = RecordingRotator::default();
    builder.build_rects_only(&rot, pivot);
    assert!(rot.angles.lock().unwrap().is_empty());
    assert_eq!(rot.sized.lock().unwrap().len(), 90);
}

#[test]
fn sprites_are_rotated_copies() {
    let image = needle();
    let g = mono(0.0, 90.0, 1.0);
    let frames = SpriteSequenceBuilder::new(&image, &g).build(&BilinearRotator, Point::ORIGIN);
    // 270 degrees turns the 20x4 bar upright.
    let last = frames.sprites.last().unwrap();
    assert_eq!((last.width, last.height), (4, 20));
    for s in &frames.sprites {
        assert!(!s.shares_pixels_with(&image));
    }
}
