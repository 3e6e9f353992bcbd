use crate::foundation::core::Bitmap;

/// Largest centered square sub-region of a `width x height` source.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CropRegion {
    /// Left edge of the square within the source.
    pub x_offset: u32,
    /// Top edge of the square within the source.
    pub y_offset: u32,
    /// Side length of the square, `min(width, height)`.
    pub dimension: u32,
}

impl CropRegion {
    /// Compute the central square region for a source of the given size.
    ///
    /// Offsets use truncating integer division, so an odd margin leaves the
    /// extra pixel on the right/bottom. Returns `None` when either dimension
    /// is zero; there is no square to extract and callers must treat the
    /// slot as a no-op render rather than fault.
    pub fn central_square(width: u32, height: u32) -> Option<Self> {
        let dimension = width.min(height);
        if dimension == 0 {
            return None;
        }
        Some(Self {
            x_offset: (width - dimension) / 2,
            y_offset: (height - dimension) / 2,
            dimension,
        })
    }
}

impl Bitmap {
    /// Extract the central square of this bitmap as a new bitmap.
    ///
    /// Pure copy: the source is never mutated and an already-square source
    /// yields an identical-size region with zero offsets. `None` for
    /// zero-size sources.
    pub fn central_square_crop(&self) -> Option<Bitmap> {
        let region = CropRegion::central_square(self.width(), self.height())?;
        if self.width() == self.height() {
            // Already square; share pixels instead of copying rows.
            return Some(self.clone());
        }

        let dim = region.dimension as usize;
        let src_stride = (self.width() as usize) * 4;
        let mut out = Vec::with_capacity(dim * dim * 4);
        for row in 0..dim {
            let y = region.y_offset as usize + row;
            let start = y * src_stride + (region.x_offset as usize) * 4;
            out.extend_from_slice(&self.pixels()[start..start + dim * 4]);
        }

        // Length is dim*dim*4 by construction.
        Bitmap::from_premul_rgba8(region.dimension, region.dimension, out).ok()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/compose/crop.rs"]
mod tests;
