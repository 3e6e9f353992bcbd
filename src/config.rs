use crate::foundation::core::SlotSide;
use crate::foundation::error::{AvatarError, AvatarResult};

/// Which fetch backend the loader dispatches to.
///
/// The two backends differ in how they size their fetch target from the
/// configured radius and in what they deliver:
///
/// - [`BackendKind::Direct`] requests `2 * radius` per dimension and delivers
///   a raw bitmap.
/// - [`BackendKind::Drawable`] requests `3 * radius` per dimension and
///   delivers a drawable wrapper that must be bitmap-backed to be usable.
///
/// The sizing asymmetry is backend-observed behavior and is deliberately not
/// normalized. Host configs select backends by integer tag (`0` = Direct,
/// `1` = Drawable), which is how the enum serializes.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum BackendKind {
    /// Bitmap-delivering backend, fetch target `2 * radius`.
    #[default]
    Direct,
    /// Drawable-delivering backend, fetch target `3 * radius`.
    Drawable,
}

impl TryFrom<u8> for BackendKind {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(BackendKind::Direct),
            1 => Ok(BackendKind::Drawable),
            other => Err(format!("unknown backend tag {other} (expected 0 or 1)")),
        }
    }
}

impl From<BackendKind> for u8 {
    fn from(k: BackendKind) -> u8 {
        match k {
            BackendKind::Direct => 0,
            BackendKind::Drawable => 1,
        }
    }
}

/// Construction-time configuration for the two-slot view.
///
/// Immutable after construction: radius and URLs are read at build time and
/// drive the two fetches issued then. An absent URL leaves that slot empty,
/// which is not an error. A non-positive radius is degenerate (nothing
/// visible) but never rejected.
#[derive(Clone, Debug, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Circle radius in pixels.
    pub radius: f64,
    /// Image URL for the left slot, if any.
    #[serde(default, rename = "leftImageUrl")]
    pub left_url: Option<String>,
    /// Image URL for the right slot, if any.
    #[serde(default, rename = "rightImageUrl")]
    pub right_url: Option<String>,
    /// Backend selector (`0` = Direct, `1` = Drawable in host configs).
    #[serde(default, rename = "imageLibrary")]
    pub backend: BackendKind,
}

impl RenderConfig {
    /// Parse a config from the host's JSON attribute form.
    pub fn from_json_str(json: &str) -> AvatarResult<Self> {
        let cfg: Self = serde_json::from_str(json)
            .map_err(|e| AvatarError::validation(format!("invalid render config: {e}")))?;
        if !cfg.radius.is_finite() {
            return Err(AvatarError::validation("radius must be finite"));
        }
        Ok(cfg)
    }

    /// URL configured for `slot`, if any.
    pub fn url_for(&self, slot: SlotSide) -> Option<&str> {
        match slot {
            SlotSide::Left => self.left_url.as_deref(),
            SlotSide::Right => self.right_url.as_deref(),
        }
    }
}

#[cfg(test)]
#[path = "../tests/unit/config.rs"]
mod tests;
