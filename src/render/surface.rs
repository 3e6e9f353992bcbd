use crate::compose::circle::ClampShader;
use crate::foundation::core::{Bitmap, Point, Rgba8Premul, Viewport};

/// CPU paint target: premultiplied RGBA8 pixels, row-major, tightly packed.
#[derive(Clone, Debug)]
pub struct Surface {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Surface {
    /// Allocate a transparent surface of the given size.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; (width as usize) * (height as usize) * 4],
        }
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Viewport covering the whole surface.
    pub fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    /// Pixel bytes, row-major premultiplied RGBA8.
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Read one pixel; panics out of bounds in debug builds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        Rgba8Premul {
            r: self.data[idx],
            g: self.data[idx + 1],
            b: self.data[idx + 2],
            a: self.data[idx + 3],
        }
    }

    /// Fill the whole surface with `clear`, or transparent when `None`.
    pub fn clear(&mut self, clear: Option<Rgba8Premul>) {
        let px = clear.unwrap_or_else(Rgba8Premul::transparent).to_array();
        for chunk in self.data.chunks_exact_mut(4) {
            chunk.copy_from_slice(&px);
        }
    }

    /// Source-over blend `src` into the pixel at `(x, y)` with `coverage` in
    /// `[0, 1]` acting as extra opacity.
    fn blend_px(&mut self, x: u32, y: u32, src: Rgba8Premul, coverage: f32) {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let dst = [
            self.data[idx],
            self.data[idx + 1],
            self.data[idx + 2],
            self.data[idx + 3],
        ];
        let out = over(dst, src.to_array(), coverage);
        self.data[idx..idx + 4].copy_from_slice(&out);
    }

    /// Fill an anti-aliased circle textured from `shader`.
    ///
    /// Edge coverage falls off analytically over one pixel of signed distance
    /// from the circumference. A non-positive or non-finite radius draws
    /// nothing. The fill is clipped to the surface.
    pub fn fill_circle_shaded(&mut self, center: Point, radius: f64, shader: &ClampShader) {
        if !(radius > 0.0) || !radius.is_finite() {
            return;
        }

        let x0 = ((center.x - radius - 1.0).floor().max(0.0)) as u32;
        let y0 = ((center.y - radius - 1.0).floor().max(0.0)) as u32;
        let x1 = ((center.x + radius + 1.0).ceil().min(f64::from(self.width))) as u32;
        let y1 = ((center.y + radius + 1.0).ceil().min(f64::from(self.height))) as u32;

        for y in y0..y1 {
            for x in x0..x1 {
                let px = f64::from(x) + 0.5;
                let py = f64::from(y) + 0.5;
                let dist = ((px - center.x).powi(2) + (py - center.y).powi(2)).sqrt();
                let coverage = (radius - dist + 0.5).clamp(0.0, 1.0) as f32;
                if coverage <= 0.0 {
                    continue;
                }
                let src = shader.sample(px, py);
                self.blend_px(x, y, src, coverage);
            }
        }
    }

    /// Blit `bitmap` with its top-left corner at `top_left`, clipped to the
    /// surface, source-over.
    pub fn draw_bitmap(&mut self, bitmap: &Bitmap, top_left: Point) {
        if bitmap.is_empty() {
            return;
        }
        let origin_x = top_left.x.floor() as i64;
        let origin_y = top_left.y.floor() as i64;

        for row in 0..i64::from(bitmap.height()) {
            let sy = origin_y + row;
            if sy < 0 || sy >= i64::from(self.height) {
                continue;
            }
            for col in 0..i64::from(bitmap.width()) {
                let sx = origin_x + col;
                if sx < 0 || sx >= i64::from(self.width) {
                    continue;
                }
                let src = bitmap.pixel(col as u32, row as u32);
                self.blend_px(sx as u32, sy as u32, src, 1.0);
            }
        }
    }
}

pub(crate) type PremulRgba8 = [u8; 4];

/// Premultiplied source-over with an extra opacity factor.
pub(crate) fn over(dst: PremulRgba8, src: PremulRgba8, opacity: f32) -> PremulRgba8 {
    let opacity = opacity.clamp(0.0, 1.0);
    if opacity <= 0.0 || src[3] == 0 {
        return dst;
    }

    let op = ((opacity * 255.0).round() as i32).clamp(0, 255) as u16;
    let sa = mul_div255(u16::from(src[3]), op);
    if sa == 0 {
        return dst;
    }

    let inv = 255u16 - u16::from(sa);

    let mut out = [0u8; 4];
    out[3] = add_sat_u8(sa, mul_div255(u16::from(dst[3]), inv));

    for i in 0..3 {
        let sc = mul_div255(u16::from(src[i]), op);
        let dc = mul_div255(u16::from(dst[i]), inv);
        out[i] = add_sat_u8(sc, dc);
    }
    out
}

fn mul_div255(x: u16, y: u16) -> u8 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u8
}

fn add_sat_u8(a: u8, b: u8) -> u8 {
    a.saturating_add(b)
}

#[cfg(test)]
#[path = "../../tests/unit/render/surface.rs"]
mod tests;
