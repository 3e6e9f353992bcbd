use std::sync::Arc;

pub use kurbo::{Circle, Point, Rect, Vec2};

/// Premultiplied RGBA8 (r,g,b already multiplied by a).
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Rgba8Premul {
    /// Red channel, premultiplied.
    pub r: u8,
    /// Green channel, premultiplied.
    pub g: u8,
    /// Blue channel, premultiplied.
    pub b: u8,
    /// Alpha channel.
    pub a: u8,
}

impl Rgba8Premul {
    /// Fully transparent black.
    pub fn transparent() -> Self {
        Self {
            r: 0,
            g: 0,
            b: 0,
            a: 0,
        }
    }

    /// Premultiply straight-alpha channels, rounding to nearest.
    pub fn from_straight_rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        fn premul(c: u8, a: u8) -> u8 {
            let c = u16::from(c);
            let a = u16::from(a);
            (((c * a) + 127) / 255) as u8
        }

        Self {
            r: premul(r, a),
            g: premul(g, a),
            b: premul(b, a),
            a,
        }
    }

    /// Channels as a `[r, g, b, a]` array.
    pub fn to_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }
}

/// Immutable decoded raster image in premultiplied RGBA8 form.
///
/// Pixel bytes are row-major and tightly packed, shared behind an `Arc` so a
/// clone taken for drawing never copies pixel data. Once built, a bitmap is
/// never mutated; slot updates replace the whole value.
#[derive(Clone, Debug)]
pub struct Bitmap {
    width: u32,
    height: u32,
    rgba8_premul: Arc<Vec<u8>>,
}

impl Bitmap {
    /// Build a bitmap from premultiplied RGBA8 bytes.
    ///
    /// `bytes.len()` must equal `width * height * 4`.
    pub fn from_premul_rgba8(
        width: u32,
        height: u32,
        bytes: Vec<u8>,
    ) -> crate::foundation::error::AvatarResult<Self> {
        let expected = (width as usize) * (height as usize) * 4;
        if bytes.len() != expected {
            return Err(crate::foundation::error::AvatarError::validation(format!(
                "bitmap byte length {} does not match {}x{} rgba8",
                bytes.len(),
                width,
                height
            )));
        }
        Ok(Self {
            width,
            height,
            rgba8_premul: Arc::new(bytes),
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// True when either dimension is zero.
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shared pixel bytes, row-major premultiplied RGBA8.
    pub fn pixels(&self) -> &[u8] {
        &self.rgba8_premul
    }

    /// Sample the pixel at `(x, y)`; panics if out of bounds in debug builds.
    pub fn pixel(&self, x: u32, y: u32) -> Rgba8Premul {
        debug_assert!(x < self.width && y < self.height);
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        let px = &self.rgba8_premul[idx..idx + 4];
        Rgba8Premul {
            r: px[0],
            g: px[1],
            b: px[2],
            a: px[3],
        }
    }

    /// Sample with clamp-at-edge tiling: out-of-bounds coordinates return the
    /// nearest edge pixel rather than wrapping or going transparent.
    ///
    /// Returns transparent for an empty bitmap.
    pub fn sample_clamped(&self, x: i64, y: i64) -> Rgba8Premul {
        if self.is_empty() {
            return Rgba8Premul::transparent();
        }
        let cx = x.clamp(0, i64::from(self.width) - 1) as u32;
        let cy = y.clamp(0, i64::from(self.height) - 1) as u32;
        self.pixel(cx, cy)
    }
}

/// Viewport dimensions for slot placement.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Viewport {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

/// One of the two avatar positions in the viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum SlotSide {
    /// Left avatar position, centered at a quarter of the viewport width.
    Left,
    /// Right avatar position, centered at three quarters of the viewport width.
    Right,
}

impl SlotSide {
    /// Both sides in drawing order.
    pub const ALL: [SlotSide; 2] = [SlotSide::Left, SlotSide::Right];

    /// Circle center for this slot: x at one or three quarters of the
    /// viewport width, y at half the height for both sides.
    pub fn center(self, viewport: Viewport) -> Point {
        let w = f64::from(viewport.width);
        let x = match self {
            SlotSide::Left => w / 4.0,
            SlotSide::Right => 3.0 * w / 4.0,
        };
        Point::new(x, f64::from(viewport.height) / 2.0)
    }
}
