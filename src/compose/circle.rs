use crate::foundation::core::{Bitmap, Point, Rgba8Premul};

/// Texture source over a square bitmap with clamp-at-edge tiling.
///
/// The square is anchored so its center coincides with `anchor`; sampling a
/// surface coordinate maps it into bitmap space and clamps, so a circle
/// larger than the square picks up repeated edge pixels instead of wrapping
/// or falling to transparent. This mirrors a clamp-mode bitmap shader.
#[derive(Clone, Debug)]
pub struct ClampShader {
    bitmap: Bitmap,
    anchor: Point,
}

impl ClampShader {
    /// Build a shader over `bitmap`, centered at `anchor` in surface space.
    pub fn new(bitmap: Bitmap, anchor: Point) -> Self {
        Self { bitmap, anchor }
    }

    /// The backing bitmap.
    pub fn bitmap(&self) -> &Bitmap {
        &self.bitmap
    }

    /// Sample the color under surface coordinate `(x, y)`.
    pub fn sample(&self, x: f64, y: f64) -> Rgba8Premul {
        let local_x = x - self.anchor.x + f64::from(self.bitmap.width()) / 2.0;
        let local_y = y - self.anchor.y + f64::from(self.bitmap.height()) / 2.0;
        self.bitmap
            .sample_clamped(local_x.floor() as i64, local_y.floor() as i64)
    }
}

/// Output of circle compositing: the cropped square to texture from plus the
/// placement size of its plain-rectangle draw.
#[derive(Clone, Debug)]
pub struct CircleRender {
    /// Central square crop of the source; the circular fill textures from it.
    pub square: Bitmap,
    /// Width and height of the rectangle draw, the crop's own dimensions.
    pub placement_size: (u32, u32),
}

/// Derive the circular render inputs for one slot from a decoded source.
///
/// Crops the source to its central square; the caller textures an
/// anti-aliased circle of the configured `radius` from it via [`ClampShader`].
/// Returns `None` for zero-size sources (degenerate geometry is a no-op
/// render, never a fault). The radius only drives the circle draw, not the
/// crop, so circle size and rectangle placement size can legitimately
/// diverge.
pub fn composite_circle(source: &Bitmap, _radius: f64) -> Option<CircleRender> {
    let square = source.central_square_crop()?;
    let placement_size = (square.width(), square.height());
    Some(CircleRender {
        square,
        placement_size,
    })
}

/// Circular-crop a bitmap: central square, then alpha outside the inscribed
/// circle knocked out with a one-pixel anti-aliased edge.
///
/// This is the transformation both fetch backends run inside their pipelines,
/// so delivered bitmaps already carry transparent corners. `None` for
/// zero-size sources.
pub fn circular_crop(source: &Bitmap) -> Option<Bitmap> {
    let square = source.central_square_crop()?;
    let dim = square.width();
    let radius = f64::from(dim) / 2.0;
    let center = radius;

    let mut bytes = square.pixels().to_vec();
    for y in 0..dim {
        for x in 0..dim {
            let dx = f64::from(x) + 0.5 - center;
            let dy = f64::from(y) + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = (radius - dist + 0.5).clamp(0.0, 1.0);
            if coverage >= 1.0 {
                continue;
            }
            let idx = ((y as usize) * (dim as usize) + (x as usize)) * 4;
            for c in &mut bytes[idx..idx + 4] {
                *c = ((f64::from(*c) * coverage).round()) as u8;
            }
        }
    }

    Bitmap::from_premul_rgba8(dim, dim, bytes).ok()
}

#[cfg(test)]
#[path = "../../tests/unit/compose/circle.rs"]
mod tests;
