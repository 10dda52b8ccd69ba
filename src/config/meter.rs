use serde::{Deserialize, Serialize};

use crate::foundation::{
    core::{Point, Vec2},
    error::{NeedleError, NeedleResult},
    math,
};

/// One pivot of a needle meter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Single needle of a mono meter.
    Mono,
    /// Left needle of a stereo meter.
    Left,
    /// Right needle of a stereo meter.
    Right,
}

/// Where the needle pivots sit, relative to the meter placement offset.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "layout", rename_all = "snake_case")]
pub enum ChannelLayout {
    /// One needle rotating around `origin`.
    Mono {
        /// Rotation origin of the needle.
        origin: Vec2,
    },
    /// Two needles sharing the same sprites but pivoting around different origins.
    Stereo {
        /// Rotation origin of the left needle.
        left: Vec2,
        /// Rotation origin of the right needle.
        right: Vec2,
    },
}

impl Default for ChannelLayout {
    fn default() -> Self {
        Self::Mono { origin: Vec2::ZERO }
    }
}

impl ChannelLayout {
    /// Build a layout from a numeric channel count and the three candidate origins.
    ///
    /// Only 1 (mono) and 2 (stereo) are meaningful.
    pub fn from_count(count: u8, mono: Vec2, left: Vec2, right: Vec2) -> NeedleResult<Self> {
        match count {
            1 => Ok(Self::Mono { origin: mono }),
            2 => Ok(Self::Stereo { left, right }),
            n => Err(NeedleError::validation(format!(
                "channel count must be 1 or 2, got {n}"
            ))),
        }
    }

    /// Number of needles drawn by this layout.
    pub fn channel_count(&self) -> u8 {
        match self {
            Self::Mono { .. } => 1,
            Self::Stereo { .. } => 2,
        }
    }

    /// Channels in build order. The first one owns the sprite images.
    pub fn channels(&self) -> &'static [Channel] {
        match self {
            Self::Mono { .. } => &[Channel::Mono],
            Self::Stereo { .. } => &[Channel::Left, Channel::Right],
        }
    }

    /// Origin of `channel`, if the layout has it.
    pub fn origin(&self, channel: Channel) -> Option<Vec2> {
        match (self, channel) {
            (Self::Mono { origin }, Channel::Mono) => Some(*origin),
            (Self::Stereo { left, .. }, Channel::Left) => Some(*left),
            (Self::Stereo { right, .. }, Channel::Right) => Some(*right),
            _ => None,
        }
    }
}

/// Immutable per-instrument geometry of a rotating needle.
///
/// Angles are in degrees. The sweep runs from `start_angle` by `1 / steps_per_degree`
/// degree decrements for `|stop_angle - start_angle| * steps_per_degree` frames.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterGeometry {
    /// Needle angle at the lowest level.
    pub start_angle: f64,
    /// Needle angle at the highest level.
    pub stop_angle: f64,
    /// Angular resolution: frames per degree of sweep.
    pub steps_per_degree: f64,
    /// Distance between the needle image center and its rotation origin.
    pub distance: f64,
    /// Mono or stereo pivot origins.
    pub channels: ChannelLayout,
    /// Meter placement offset added to every channel origin.
    pub offset: Vec2,
}

impl Default for MeterGeometry {
    fn default() -> Self {
        Self {
            start_angle: 0.0,
            stop_angle: 0.0,
            steps_per_degree: 1.0,
            distance: 0.0,
            channels: ChannelLayout::default(),
            offset: Vec2::ZERO,
        }
    }
}

impl MeterGeometry {
    /// Absolute sweep in degrees.
    pub fn angular_range(&self) -> f64 {
        (self.stop_angle - self.start_angle).abs()
    }

    /// Number of frames per channel. Degenerate geometry gives zero.
    pub fn frame_count(&self) -> usize {
        math::frame_count(self.angular_range(), self.steps_per_degree)
    }

    /// Screen-space rotation pivot of `channel` (origin plus meter offset).
    pub fn pivot(&self, channel: Channel) -> Option<Point> {
        self.channels
            .origin(channel)
            .map(|o| (o + self.offset).to_point())
    }

    /// Reject non-finite numbers and sweeps needing more than 65536 frames.
    ///
    /// Zero sweep or non-positive resolution are accepted; they build empty sequences.
    pub fn validate(&self) -> NeedleResult<()> {
        for (name, value) in [
            ("start_angle", self.start_angle),
            ("stop_angle", self.stop_angle),
            ("steps_per_degree", self.steps_per_degree),
            ("distance", self.distance),
            ("offset.x", self.offset.x),
            ("offset.y", self.offset.y),
        ] {
            if !value.is_finite() {
                return Err(NeedleError::validation(format!(
                    "meter {name} must be finite"
                )));
            }
        }
        for &channel in self.channels.channels() {
            let Some(origin) = self.channels.origin(channel) else {
                continue;
            };
            if !origin.x.is_finite() || !origin.y.is_finite() {
                return Err(NeedleError::validation(format!(
                    "{channel:?} origin must be finite"
                )));
            }
        }
        let frames = math::raw_frame_count(self.angular_range(), self.steps_per_degree);
        if frames > math::MAX_FRAMES as f64 {
            return Err(NeedleError::validation(format!(
                "meter sweep needs {frames} frames, more than {}",
                math::MAX_FRAMES
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/config/meter.rs"]
mod tests;
