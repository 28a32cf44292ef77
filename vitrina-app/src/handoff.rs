//! Transient handoff channel between screens
//!
//! Short-lived structured payloads passed from one screen to the next:
//! in-progress planogram edits, the order-review draft, and the
//! just-created-order confirmation flag. A slot lives until the next screen
//! takes it; an empty slot means "no draft" and is never an error.

use shared::models::{PlanogramCell, StoreInfo};
use std::sync::{Mutex, PoisonError};

/// In-progress planogram edits, preserved when the rep detours to another
/// screen and comes back
#[derive(Debug, Clone)]
pub struct PlanogramDraft {
    pub store: StoreInfo,
    pub cells: Vec<PlanogramCell>,
}

/// The capture as handed to the order-review screen
#[derive(Debug, Clone)]
pub struct OrderReviewDraft {
    pub store: StoreInfo,
    pub cells: Vec<PlanogramCell>,
}

/// Confirmation banner state for a just-created order
#[derive(Debug, Clone)]
pub struct OrderConfirmation {
    pub order_id: String,
    pub show_confirmation: bool,
}

/// A single-value slot with put/take semantics
#[derive(Debug)]
pub struct Slot<T> {
    inner: Mutex<Option<T>>,
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }
}

impl<T> Slot<T> {
    /// Store a value, replacing whatever was there
    pub fn put(&self, value: T) {
        *self.inner.lock().unwrap_or_else(PoisonError::into_inner) = Some(value);
    }

    /// Consume the value. `None` means no draft, not a failure.
    pub fn take(&self) -> Option<T> {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}

/// The handoff slots shared by all screens
#[derive(Debug, Default)]
pub struct Handoff {
    pub planogram: Slot<PlanogramDraft>,
    pub review: Slot<OrderReviewDraft>,
    pub confirmation: Slot<OrderConfirmation>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_consumes() {
        let handoff = Handoff::default();
        handoff.confirmation.put(OrderConfirmation {
            order_id: "ORD-1".to_string(),
            show_confirmation: true,
        });

        let first = handoff.confirmation.take();
        assert_eq!(first.unwrap().order_id, "ORD-1");
        // Already consumed by the screen that read it
        assert!(handoff.confirmation.take().is_none());
    }

    #[test]
    fn test_empty_slot_is_no_draft() {
        let handoff = Handoff::default();
        assert!(handoff.planogram.take().is_none());
        assert!(handoff.review.take().is_none());
    }

    #[test]
    fn test_put_replaces() {
        let slot: Slot<u32> = Slot::default();
        slot.put(1);
        slot.put(2);
        assert_eq!(slot.take(), Some(2));
    }
}
