//! Proof-of-delivery capture
//!
//! Collects the image/notes payload from the capture screen, runs the
//! simulated upload, and hands the result to the lifecycle controller.
//! An upload, once started, always runs to completion and performs its
//! write; there is no mid-flight cancellation.

use crate::lifecycle::{LifecycleController, LifecycleError};
use crate::store::{OrderFilter, OrderStore};
use shared::models::{Order, OrderStatus};
use std::sync::Arc;
use std::time::Duration;

/// Payload collected by the capture screen
#[derive(Debug, Clone, Default)]
pub struct PodPayload {
    /// Raw image bytes; mandatory
    pub image: Vec<u8>,
    pub notes: Option<String>,
}

/// Proof-of-delivery capture service
#[derive(Clone)]
pub struct PodCapture {
    store: Arc<OrderStore>,
    lifecycle: LifecycleController,
    upload_delay: Duration,
}

impl PodCapture {
    pub fn new(
        store: Arc<OrderStore>,
        lifecycle: LifecycleController,
        upload_delay: Duration,
    ) -> Self {
        Self {
            store,
            lifecycle,
            upload_delay,
        }
    }

    /// Submit a proof payload for an order.
    ///
    /// The image is validated before the upload simulation starts, so a
    /// missing image never costs the user the wait.
    pub async fn submit(
        &self,
        order_id: &str,
        payload: PodPayload,
    ) -> Result<Order, LifecycleError> {
        if payload.image.is_empty() {
            return Err(LifecycleError::ProofRequired);
        }

        tracing::debug!(order_id = %order_id, delay_ms = (self.upload_delay.as_millis() as u64), "Uploading proof of delivery");
        tokio::time::sleep(self.upload_delay).await;

        self.lifecycle
            .complete_with_proof(order_id, &payload.image, payload.notes)
    }

    /// Orders still waiting for their proof of delivery, most recent first
    pub fn pending(&self) -> Vec<Order> {
        self.store
            .list(&OrderFilter::with_status(OrderStatus::Pending))
            .into_iter()
            .filter(|o| o.awaiting_proof())
            .collect()
    }
}
