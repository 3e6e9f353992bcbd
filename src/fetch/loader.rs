use std::sync::{
    Arc, Mutex,
    atomic::{AtomicBool, Ordering},
};
use std::thread::JoinHandle;

use crate::config::BackendKind;
use crate::fetch::backend::{FetchBackend, create_backend};
use crate::fetch::source::ByteSource;
use crate::foundation::core::SlotSide;
use crate::view::slots::{RedrawSignal, SlotBoard};

/// Asynchronous image loader for the two avatar slots.
///
/// Owns one shared [`ByteSource`] and one backend instance, reused across
/// requests. Each request runs on its own worker thread; on success the
/// decoded bitmap is stored into the slot and one redraw is signalled. Every
/// failure kind (transport, decode, non-bitmap drawable) is absorbed here:
/// the slot keeps its previous state and the failure is logged, never
/// propagated. This is a best-effort avatar policy, a broken image degrades
/// to an empty slot rather than an error surface.
pub struct Loader {
    source: Arc<dyn ByteSource>,
    backend: Arc<dyn FetchBackend>,
    slots: Arc<SlotBoard>,
    redraw: Arc<dyn RedrawSignal>,
    radius: f64,
    alive: Arc<AtomicBool>,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl Loader {
    /// Build a loader dispatching to the backend selected by `kind`.
    pub fn new(
        kind: BackendKind,
        radius: f64,
        source: Arc<dyn ByteSource>,
        slots: Arc<SlotBoard>,
        redraw: Arc<dyn RedrawSignal>,
    ) -> Self {
        Self {
            source,
            backend: Arc::from(create_backend(kind)),
            slots,
            redraw,
            radius,
            alive: Arc::new(AtomicBool::new(true)),
            workers: Mutex::new(Vec::new()),
        }
    }

    /// The backend this loader dispatches to.
    pub fn backend(&self) -> &dyn FetchBackend {
        self.backend.as_ref()
    }

    /// Issue an asynchronous fetch for `slot`.
    ///
    /// An absent `url` issues nothing and leaves the slot empty; that is not
    /// an error. Overlapping requests to one slot are allowed and resolve
    /// last-writer-wins.
    #[tracing::instrument(skip(self))]
    pub fn request_image(&self, url: Option<&str>, slot: SlotSide) {
        let Some(url) = url else {
            tracing::debug!(?slot, "no url configured, slot stays empty");
            return;
        };

        let url = url.to_string();
        let source = Arc::clone(&self.source);
        let backend = Arc::clone(&self.backend);
        let slots = Arc::clone(&self.slots);
        let redraw = Arc::clone(&self.redraw);
        let alive = Arc::clone(&self.alive);
        let target_size_px = self.backend.target_size_px(self.radius);

        let handle = std::thread::spawn(move || {
            let delivery = match backend.fetch(source.as_ref(), &url, target_size_px) {
                Ok(d) => d,
                Err(e) => {
                    tracing::warn!(%url, ?slot, error = %e, "image fetch failed, slot unchanged");
                    return;
                }
            };

            if !alive.load(Ordering::SeqCst) {
                tracing::debug!(%url, ?slot, "dropping stale delivery after dispose");
                return;
            }

            match delivery.into_bitmap() {
                Some(bitmap) => {
                    tracing::debug!(
                        %url,
                        ?slot,
                        width = bitmap.width(),
                        height = bitmap.height(),
                        "storing delivered bitmap"
                    );
                    slots.store(slot, bitmap);
                    redraw.request_redraw();
                }
                None => {
                    tracing::warn!(%url, ?slot, "delivery not bitmap-backed, ignoring");
                }
            }
        });

        self.workers
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(handle);
    }

    /// Drop all deliveries that complete after this call.
    ///
    /// Safety hook for teardown; in-flight fetches keep running but their
    /// results no longer touch slot state.
    pub fn dispose(&self) {
        self.alive.store(false, Ordering::SeqCst);
    }

    /// Wait for every issued fetch worker to finish.
    ///
    /// Support hook so hosts and tests can observe completion
    /// deterministically; drawing never needs it.
    pub fn join_pending(&self) {
        let handles = std::mem::take(
            &mut *self
                .workers
                .lock()
                .unwrap_or_else(|poisoned| poisoned.into_inner()),
        );
        for handle in handles {
            let _ = handle.join();
        }
    }
}

impl Drop for Loader {
    fn drop(&mut self) {
        self.dispose();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/fetch/loader.rs"]
mod tests;
