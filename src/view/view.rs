use std::sync::Arc;

use crate::compose::circle::{ClampShader, composite_circle};
use crate::config::RenderConfig;
use crate::fetch::loader::Loader;
use crate::fetch::source::ByteSource;
use crate::foundation::core::{Point, SlotSide};
use crate::render::surface::Surface;
use crate::view::slots::{RedrawSignal, SlotBoard};

/// Two-slot circular avatar view.
///
/// Construction issues the two independent fetches; each completion stores
/// its bitmap and fires the redraw signal, and the host calls [`draw`] on its
/// render thread with whatever slots are occupied at that moment (0, 1 or 2).
///
/// Per occupied slot the draw is two layers: the anti-aliased circular fill
/// textured from the slot's central square crop, then the plain crop blitted
/// on top at the same center. An opaque crop squares off the visible result,
/// so [`with_square_overlay`] lets a host drop the second layer deliberately;
/// the default keeps both draws.
///
/// [`draw`]: AvatarCirclesView::draw
/// [`with_square_overlay`]: AvatarCirclesView::with_square_overlay
pub struct AvatarCirclesView {
    config: RenderConfig,
    slots: Arc<SlotBoard>,
    loader: Loader,
    square_overlay: bool,
}

impl AvatarCirclesView {
    /// Build the view and start both fetches.
    pub fn new(
        config: RenderConfig,
        source: Arc<dyn ByteSource>,
        redraw: Arc<dyn RedrawSignal>,
    ) -> Self {
        let slots = Arc::new(SlotBoard::new());
        let loader = Loader::new(
            config.backend,
            config.radius,
            source,
            Arc::clone(&slots),
            redraw,
        );

        let view = Self {
            config,
            slots,
            loader,
            square_overlay: true,
        };
        for slot in SlotSide::ALL {
            view.loader.request_image(view.config.url_for(slot), slot);
        }
        view
    }

    /// Enable or disable the square overlay draw (enabled by default).
    pub fn with_square_overlay(mut self, enabled: bool) -> Self {
        self.square_overlay = enabled;
        self
    }

    /// The immutable construction-time configuration.
    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Current slot state, shared with the loader.
    pub fn slots(&self) -> &SlotBoard {
        &self.slots
    }

    /// Paint both slots onto `surface`.
    ///
    /// Reads a snapshot of each slot and renders the ones holding a bitmap;
    /// empty slots draw nothing. Degenerate inputs (radius <= 0, zero-size
    /// bitmaps) render nothing for the affected slot.
    #[tracing::instrument(skip(self, surface))]
    pub fn draw(&self, surface: &mut Surface) {
        let viewport = surface.viewport();
        let radius = self.config.radius;

        for slot in SlotSide::ALL {
            let Some(bitmap) = self.slots.snapshot(slot) else {
                continue;
            };
            let Some(render) = composite_circle(&bitmap, radius) else {
                continue;
            };

            let center = slot.center(viewport);
            let shader = ClampShader::new(render.square.clone(), center);
            surface.fill_circle_shaded(center, radius, &shader);

            if self.square_overlay {
                let (w, h) = render.placement_size;
                let top_left = Point::new(
                    center.x - f64::from(w) / 2.0,
                    center.y - f64::from(h) / 2.0,
                );
                surface.draw_bitmap(&render.square, top_left);
            }
        }
    }

    /// Drop any deliveries completing after this call.
    pub fn dispose(&self) {
        self.loader.dispose();
    }

    /// Wait for in-flight fetches (support hook for hosts and tests).
    pub fn join_pending(&self) {
        self.loader.join_pending();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/view.rs"]
mod tests;
