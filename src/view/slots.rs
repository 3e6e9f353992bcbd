use std::sync::{
    Mutex,
    atomic::{AtomicUsize, Ordering},
};

use crate::foundation::core::{Bitmap, SlotSide};

/// Current bitmaps for the two avatar slots.
///
/// Each slot is an independent lock-guarded cell; a fetch completion replaces
/// the whole `Option<Bitmap>` under that slot's lock and the draw path takes
/// a snapshot (a cheap `Arc`-sharing clone) under the same lock. The two
/// slots share no lock, so left and right deliveries never contend.
#[derive(Debug, Default)]
pub struct SlotBoard {
    left: Mutex<Option<Bitmap>>,
    right: Mutex<Option<Bitmap>>,
}

impl SlotBoard {
    /// Board with both slots empty.
    pub fn new() -> Self {
        Self::default()
    }

    fn cell(&self, slot: SlotSide) -> &Mutex<Option<Bitmap>> {
        match slot {
            SlotSide::Left => &self.left,
            SlotSide::Right => &self.right,
        }
    }

    /// Replace `slot`'s bitmap wholesale. Last writer wins.
    pub fn store(&self, slot: SlotSide, bitmap: Bitmap) {
        let mut guard = self
            .cell(slot)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        *guard = Some(bitmap);
    }

    /// Snapshot `slot`'s current bitmap, if any.
    pub fn snapshot(&self, slot: SlotSide) -> Option<Bitmap> {
        self.cell(slot)
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// True when `slot` holds a bitmap.
    pub fn is_occupied(&self, slot: SlotSide) -> bool {
        self.snapshot(slot).is_some()
    }
}

/// Outward "content changed, please repaint" notification.
///
/// Fired once per successful delivery, possibly from a fetch worker thread;
/// implementations must marshal any actual drawing back to the host's render
/// thread themselves.
pub trait RedrawSignal: Send + Sync {
    /// Request a repaint of the viewport.
    fn request_redraw(&self);
}

/// Counting [`RedrawSignal`] for hosts and tests that poll.
#[derive(Debug, Default)]
pub struct CountingRedraw {
    count: AtomicUsize,
}

impl CountingRedraw {
    /// Signal with a zero count.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of redraw requests fired so far.
    pub fn count(&self) -> usize {
        self.count.load(Ordering::SeqCst)
    }
}

impl RedrawSignal for CountingRedraw {
    fn request_redraw(&self) {
        self.count.fetch_add(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
#[path = "../../tests/unit/view/slots.rs"]
mod tests;
