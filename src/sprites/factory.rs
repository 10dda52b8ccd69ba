use std::sync::Arc;

use crate::{
    assets::raster::Raster,
    config::meter::{Channel, ChannelLayout, MeterGeometry},
    foundation::core::{Point, Rect},
    rotate::rotozoom::ImageRotator,
    sprites::builder::SpriteSequenceBuilder,
};

/// Placement rectangles per channel.
#[derive(Clone, Debug, PartialEq)]
pub enum ChannelRects {
    /// Rectangles of the single mono needle.
    Mono(Arc<[Rect]>),
    /// Rectangles of both stereo needles; both index into the same sprites.
    Stereo {
        /// Left needle rectangles.
        left: Arc<[Rect]>,
        /// Right needle rectangles.
        right: Arc<[Rect]>,
    },
}

impl ChannelRects {
    /// Rectangles of `channel`, if this layout has it.
    pub fn get(&self, channel: Channel) -> Option<&Arc<[Rect]>> {
        match (self, channel) {
            (Self::Mono(r), Channel::Mono) => Some(r),
            (Self::Stereo { left, .. }, Channel::Left) => Some(left),
            (Self::Stereo { right, .. }, Channel::Right) => Some(right),
            _ => None,
        }
    }
}

/// Precomputed needle animation of one instrument.
///
/// Cheap to clone; all sequences are shared read-only.
#[derive(Clone, Debug)]
pub struct NeedleSprites {
    /// Rotated needle images, frame-indexed.
    pub sprites: Arc<[Raster]>,
    /// Placement rectangles, index-aligned with `sprites`.
    pub rects: ChannelRects,
}

impl NeedleSprites {
    /// Number of frames.
    pub fn len(&self) -> usize {
        self.sprites.len()
    }

    /// `true` when the geometry produced no frames.
    pub fn is_empty(&self) -> bool {
        self.sprites.is_empty()
    }

    /// Sprite and rectangle of frame `index` for `channel`.
    pub fn frame(&self, index: usize, channel: Channel) -> Option<(&Raster, Rect)> {
        let rects = self.rects.get(channel)?;
        Some((self.sprites.get(index)?, *rects.get(index)?))
    }

    /// Frame showing a normalized `level` (clamped to `[0, 1]`) for `channel`.
    pub fn frame_for_level(&self, level: f64, channel: Channel) -> Option<(&Raster, Rect)> {
        let last = self.len().checked_sub(1)?;
        let level = if level.is_nan() { 0.0 } else { level.clamp(0.0, 1.0) };
        self.frame((level * last as f64).round() as usize, channel)
    }
}

/// Build every sequence an instrument needs, without any caching.
///
/// Mono layouts get one sprite + rectangle pass. Stereo layouts build sprites at the left
/// pivot and a rectangle-only pass at the right pivot.
pub fn build_needle_sprites(
    image: &Raster,
    geometry: &MeterGeometry,
    rotator: &dyn ImageRotator,
) -> NeedleSprites {
    let builder = SpriteSequenceBuilder::new(image, geometry);
    let pivot = |channel| geometry.pivot(channel).unwrap_or(Point::ORIGIN);

    match geometry.channels {
        ChannelLayout::Mono { .. } => {
            let frames = builder.build(rotator, pivot(Channel::Mono));
            NeedleSprites {
                sprites: frames.sprites.into(),
                rects: ChannelRects::Mono(frames.rects.into()),
            }
        }
        ChannelLayout::Stereo { .. } => {
            let left = builder.build(rotator, pivot(Channel::Left));
            let right = builder.build_rects_only(rotator, pivot(Channel::Right));
            NeedleSprites {
                sprites: left.sprites.into(),
                rects: ChannelRects::Stereo {
                    left: left.rects.into(),
                    right: right.into(),
                },
            }
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprites/factory.rs"]
mod tests;
