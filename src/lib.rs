//! Precomputed needle sprites for analog-style meters.
//!
//! Rotating a raster every animation frame is expensive. This crate rotates a needle image
//! once per angular step of its sweep and keeps the results, together with the rectangle
//! each frame must be drawn into, so a render loop can show any angle by index.
//!
//! # Pipeline overview
//!
//! 1. **Decode**: `bytes -> Raster` via [`decode_image`] (premultiplied RGBA8)
//! 2. **Describe**: [`MeterGeometry`] holds the sweep, resolution, pivot distance and the
//!    mono/stereo pivot origins
//! 3. **Build**: [`SpriteSequenceBuilder`] walks the sweep, rotating with an
//!    [`ImageRotator`] and placing each frame so it pivots around its origin
//! 4. **Share**: [`NeedleCache`] memoizes the result per instrument name; stereo meters
//!    reuse the left sprites and only add right-channel rectangles
//!
//! Frame generation never fails: degenerate geometry yields empty sequences. Errors only
//! come from decoding, validation and worker pool setup.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod assets;
mod config;
mod foundation;
mod rotate;
mod sprites;

pub use assets::decode::{decode_image, raster_from_rgba_image};
pub use assets::raster::Raster;
pub use config::meter::{Channel, ChannelLayout, MeterGeometry};
pub use foundation::core::{Affine, Point, Rect, Size, Vec2, rect_centered};
pub use foundation::error::{NeedleError, NeedleResult};
pub use rotate::rotozoom::{BilinearRotator, ImageRotator};
pub use sprites::batch::{NeedleRequest, PrepareThreading, prepare_many};
pub use sprites::builder::{SpriteFrames, SpriteSequenceBuilder};
pub use sprites::cache::{NeedleCache, SequenceCache};
pub use sprites::factory::{ChannelRects, NeedleSprites, build_needle_sprites};
