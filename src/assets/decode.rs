use anyhow::Context;

use crate::{
    assets::raster::Raster,
    foundation::error::{NeedleError, NeedleResult},
};

/// Decode encoded needle image bytes (PNG) into a premultiplied [`Raster`].
pub fn decode_image(bytes: &[u8]) -> NeedleResult<Raster> {
    let dyn_img = image::load_from_memory(bytes).context("decode needle image from memory")?;
    raster_from_rgba_image(dyn_img.to_rgba8())
}

/// Convert an already decoded straight-alpha image into a premultiplied [`Raster`].
pub fn raster_from_rgba_image(rgba: image::RgbaImage) -> NeedleResult<Raster> {
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(NeedleError::decode("needle image must not be empty"));
    }
    Raster::from_straight_rgba8(width, height, rgba.into_raw())
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
