//! avapair renders two independently-loaded remote images as circular
//! avatars side-by-side in a rectangular viewport.
//!
//! The core is an image compositing pipeline: each decoded bitmap is
//! center-cropped to its largest square, masked into an anti-aliased circle
//! at a configured radius, and painted into a premultiplied-RGBA8 surface at
//! per-slot coordinates (left at a quarter of the viewport width, right at
//! three quarters). The two slots load asynchronously and independently; the
//! view draws whatever is available at repaint time.
//!
//! # Pipeline overview
//!
//! 1. **Configure**: [`RenderConfig`] (radius, two optional URLs, backend
//!    selector), immutable after construction.
//! 2. **Fetch**: [`Loader`] dispatches to one of two [`FetchBackend`]
//!    variants; completions store into the [`SlotBoard`] and fire a
//!    [`RedrawSignal`].
//! 3. **Composite**: [`composite_circle`] center-crops, and the draw fills a
//!    clamp-tiled, anti-aliased circle from the crop via [`ClampShader`].
//! 4. **Paint**: [`AvatarCirclesView::draw`] renders both slots onto a
//!    [`Surface`].
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Premultiplied RGBA8** end-to-end: bitmaps and surfaces both.
//! - **Best-effort loading**: fetch, decode, and unwrap failures are absorbed
//!   at the loader boundary and logged; a broken image means an empty slot,
//!   never a crash or an error surface.
//! - **Single-writer slots**: each slot's bitmap is replaced wholesale under
//!   its own lock; the draw path only reads snapshots.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod compose;
mod config;
mod fetch;
mod foundation;
mod render;
mod view;

pub use compose::circle::{CircleRender, ClampShader, circular_crop, composite_circle};
pub use compose::crop::CropRegion;
pub use config::{BackendKind, RenderConfig};
pub use fetch::backend::{
    Delivery, DirectBackend, Drawable, DrawableBackend, FetchBackend, create_backend,
};
pub use fetch::decode::{decode_image, scale_down_to};
pub use fetch::loader::Loader;
pub use fetch::source::{ByteSource, FileSource, MemorySource, normalize_rel_path};
pub use foundation::core::{Bitmap, Circle, Point, Rect, Rgba8Premul, SlotSide, Vec2, Viewport};
pub use foundation::error::{AvatarError, AvatarResult};
pub use render::surface::Surface;
pub use view::slots::{CountingRedraw, RedrawSignal, SlotBoard};
pub use view::view::AvatarCirclesView;
