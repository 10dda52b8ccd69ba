use crate::{
    assets::raster::Raster,
    config::meter::MeterGeometry,
    foundation::{
        core::{Point, Rect, rect_centered},
        math,
    },
    rotate::rotozoom::ImageRotator,
};

/// Sprites and placement rectangles of one channel, index-aligned.
#[derive(Clone, Debug, Default)]
pub struct SpriteFrames {
    /// Rotated needle images; empty for rectangle-only passes.
    pub sprites: Vec<Raster>,
    /// Where each frame must be drawn so the needle pivots around its origin.
    pub rects: Vec<Rect>,
}

/// Generates the rotated needle frames of one instrument.
///
/// Frame `i` shows the needle at `(start_angle - (i + 1) / steps_per_degree) mod 360`
/// degrees. Its rectangle is centered on the point orbiting the pivot at `distance`,
/// so every frame rotates visually around the same screen point.
#[derive(Clone, Copy, Debug)]
pub struct SpriteSequenceBuilder<'a> {
    image: &'a Raster,
    geometry: &'a MeterGeometry,
}

impl<'a> SpriteSequenceBuilder<'a> {
    /// Builder for `image` swept according to `geometry`.
    pub fn new(image: &'a Raster, geometry: &'a MeterGeometry) -> Self {
        Self { image, geometry }
    }

    /// Frames produced per channel.
    pub fn frame_count(&self) -> usize {
        self.geometry.frame_count()
    }

    /// Needle angle (degrees, in `[0, 360)`) of every frame, in order.
    pub fn frame_angles(&self) -> impl Iterator<Item = f64> {
        let step = 1.0 / self.geometry.steps_per_degree;
        let mut angle = self.geometry.start_angle;
        (0..self.frame_count()).map(move |_| {
            angle = math::wrap_degrees(angle - step);
            angle
        })
    }

    /// Build sprites and rectangles pivoting around `pivot`.
    #[tracing::instrument(level = "debug", skip(self, rotator), fields(frames = self.frame_count()))]
    pub fn build(&self, rotator: &dyn ImageRotator, pivot: Point) -> SpriteFrames {
        self.run(rotator, pivot, true)
    }

    /// Build only the rectangles pivoting around `pivot`.
    ///
    /// Used for a stereo right channel, which draws the left channel's sprites.
    #[tracing::instrument(level = "debug", skip(self, rotator), fields(frames = self.frame_count()))]
    pub fn build_rects_only(&self, rotator: &dyn ImageRotator, pivot: Point) -> Vec<Rect> {
        self.run(rotator, pivot, false).rects
    }

    fn run(&self, rotator: &dyn ImageRotator, pivot: Point, keep_sprites: bool) -> SpriteFrames {
        let frames = self.frame_count();
        let mut out = SpriteFrames::default();
        if frames == 0 {
            return out;
        }
        out.rects.reserve(frames);
        if keep_sprites {
            out.sprites.reserve(frames);
        }

        // Direction from the image center to its top-left corner, anchored at the start angle.
        let half = self.image.size() / 2.0;
        let base_offset = half.height.atan2(-half.width) - self.geometry.start_angle.to_radians();
        let d = self.geometry.distance;

        for angle in self.frame_angles() {
            let theta = angle.to_radians() + base_offset;
            let center = Point::new(pivot.x + d * theta.cos(), pivot.y - d * theta.sin());

            let size = if keep_sprites {
                let rotated = rotator.rotozoom(self.image, angle, 1.0);
                let sprite = rotated.subregion(rotated.bounds());
                let size = sprite.size();
                out.sprites.push(sprite);
                size
            } else {
                rotator.rotated_size(self.image, angle, 1.0)
            };
            out.rects.push(rect_centered(center, size));
        }

        out
    }
}

#[cfg(test)]
#[path = "../../tests/unit/sprites/builder.rs"]
mod tests;
