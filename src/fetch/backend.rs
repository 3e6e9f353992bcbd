use crate::compose::circle::circular_crop;
use crate::config::BackendKind;
use crate::fetch::decode::{decode_image, scale_down_to};
use crate::fetch::source::ByteSource;
use crate::foundation::core::Bitmap;
use crate::foundation::error::{AvatarError, AvatarResult};

/// Result wrapper of the Drawable backend.
///
/// Only bitmap-backed drawables unwrap; anything else is dropped silently by
/// the loader (a no-op, not an error).
#[derive(Clone, Debug)]
pub enum Drawable {
    /// Bitmap-backed drawable.
    Bitmap(Bitmap),
    /// Non-raster drawable; cannot be unwrapped to pixels.
    Opaque,
}

impl Drawable {
    /// The backing bitmap, if this drawable has one.
    pub fn as_bitmap(&self) -> Option<&Bitmap> {
        match self {
            Drawable::Bitmap(b) => Some(b),
            Drawable::Opaque => None,
        }
    }
}

/// What a fetch backend hands back on success.
#[derive(Clone, Debug)]
pub enum Delivery {
    /// A raw decoded bitmap (Direct backend).
    Bitmap(Bitmap),
    /// A drawable wrapper that may or may not be bitmap-backed (Drawable
    /// backend).
    Drawable(Drawable),
}

impl Delivery {
    /// Unwrap to a bitmap; `None` for non-bitmap-backed drawables.
    pub fn into_bitmap(self) -> Option<Bitmap> {
        match self {
            Delivery::Bitmap(b) => Some(b),
            Delivery::Drawable(Drawable::Bitmap(b)) => Some(b),
            Delivery::Drawable(Drawable::Opaque) => None,
        }
    }
}

/// One interchangeable fetch-and-transform backend.
///
/// A backend turns a URL plus a target pixel size into a [`Delivery`]:
/// fetch bytes, decode, scale toward the target, circular-crop. The two
/// provided variants differ in how they size the target from the radius and
/// in the shape of what they deliver.
pub trait FetchBackend: Send + Sync {
    /// Which configured kind this backend implements.
    fn kind(&self) -> BackendKind;

    /// Target fetch size (both dimensions) derived from the circle radius.
    ///
    /// Non-positive or non-finite radii yield 0, which downstream treats as
    /// "no scaling".
    fn target_size_px(&self, radius: f64) -> u32;

    /// Fetch, decode, and transform `url` at `target_size_px`.
    fn fetch(
        &self,
        source: &dyn ByteSource,
        url: &str,
        target_size_px: u32,
    ) -> AvatarResult<Delivery>;
}

fn sized(radius: f64, multiplier: f64) -> u32 {
    if !radius.is_finite() || radius <= 0.0 {
        return 0;
    }
    (multiplier * radius).floor() as u32
}

fn fetch_cropped_bitmap(
    source: &dyn ByteSource,
    url: &str,
    target_size_px: u32,
) -> AvatarResult<Bitmap> {
    let bytes = source.get(url)?;
    let decoded = decode_image(&bytes)?;
    let scaled = scale_down_to(&decoded, target_size_px)?;
    circular_crop(&scaled).ok_or_else(|| AvatarError::decode("decoded image has zero size"))
}

/// Backend delivering raw bitmaps, fetch target `2 * radius`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectBackend;

impl FetchBackend for DirectBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Direct
    }

    fn target_size_px(&self, radius: f64) -> u32 {
        sized(radius, 2.0)
    }

    fn fetch(
        &self,
        source: &dyn ByteSource,
        url: &str,
        target_size_px: u32,
    ) -> AvatarResult<Delivery> {
        let bitmap = fetch_cropped_bitmap(source, url, target_size_px)?;
        Ok(Delivery::Bitmap(bitmap))
    }
}

/// Backend delivering drawable wrappers, fetch target `3 * radius`.
#[derive(Clone, Copy, Debug, Default)]
pub struct DrawableBackend;

impl FetchBackend for DrawableBackend {
    fn kind(&self) -> BackendKind {
        BackendKind::Drawable
    }

    fn target_size_px(&self, radius: f64) -> u32 {
        sized(radius, 3.0)
    }

    fn fetch(
        &self,
        source: &dyn ByteSource,
        url: &str,
        target_size_px: u32,
    ) -> AvatarResult<Delivery> {
        let bitmap = fetch_cropped_bitmap(source, url, target_size_px)?;
        Ok(Delivery::Drawable(Drawable::Bitmap(bitmap)))
    }
}

/// Build the backend implementation for a configured kind.
pub fn create_backend(kind: BackendKind) -> Box<dyn FetchBackend> {
    match kind {
        BackendKind::Direct => Box::new(DirectBackend),
        BackendKind::Drawable => Box::new(DrawableBackend),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fetch/backend.rs"]
mod tests;
