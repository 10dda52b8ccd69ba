pub use kurbo::{Affine, Point, Rect, Size, Vec2};

/// Axis-aligned rectangle of `size` whose center sits at `center`.
///
/// Coordinates are kept as-is; sub-pixel centers are left for the consumer to round.
pub fn rect_centered(center: Point, size: Size) -> Rect {
    Rect::from_center_size(center, size)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
