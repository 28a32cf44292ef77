//! Order lifecycle controller
//!
//! Owns the one legal transition, `Pending -> Completed`, and the
//! status/proof pairing that goes with it: a completed order always carries
//! its proof, a pending order never does. The store itself stays agnostic;
//! everything that completes an order goes through this controller.

use crate::store::{OrderStore, StoreError};
use base64::Engine;
use base64::engine::general_purpose::STANDARD as BASE64;
use chrono::Utc;
use shared::error::{AppError, ErrorCode};
use shared::models::{Order, OrderPatch, OrderStatus, ProofOfDelivery};
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LifecycleError {
    /// Completion without a proof image is not a transition at all; no
    /// write happens.
    #[error("Proof-of-delivery image is required")]
    ProofRequired,

    #[error("Order not found: {0}")]
    NotFound(String),

    /// Completion is not idempotent: a second completion would silently
    /// replace the recorded proof, so it is rejected instead.
    #[error("Order {0} is already completed")]
    AlreadyCompleted(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<LifecycleError> for AppError {
    fn from(err: LifecycleError) -> Self {
        match err {
            LifecycleError::ProofRequired => AppError::new(ErrorCode::ProofRequired),
            LifecycleError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order not found: {}", id))
            }
            LifecycleError::AlreadyCompleted(id) => AppError::with_message(
                ErrorCode::OrderAlreadyCompleted,
                format!("Order {} is already completed", id),
            ),
            LifecycleError::Store(e) => e.into(),
        }
    }
}

/// Controller for the order state machine
#[derive(Clone)]
pub struct LifecycleController {
    store: Arc<OrderStore>,
}

impl LifecycleController {
    pub fn new(store: Arc<OrderStore>) -> Self {
        Self { store }
    }

    /// Complete a pending order by attaching its proof of delivery.
    ///
    /// The image is mandatory and checked before anything is read or
    /// written. Completing an already-completed order fails and leaves the
    /// stored record exactly as it was.
    pub fn complete_with_proof(
        &self,
        order_id: &str,
        image: &[u8],
        notes: Option<String>,
    ) -> Result<Order, LifecycleError> {
        if image.is_empty() {
            return Err(LifecycleError::ProofRequired);
        }

        let order = self
            .store
            .get(order_id)
            .ok_or_else(|| LifecycleError::NotFound(order_id.to_string()))?;

        if order.status == OrderStatus::Completed {
            return Err(LifecycleError::AlreadyCompleted(order_id.to_string()));
        }

        let proof = ProofOfDelivery {
            image_data: BASE64.encode(image),
            notes: notes.filter(|n| !n.trim().is_empty()),
            completed_at: Utc::now(),
        };

        let updated = self.store.update(
            order_id,
            OrderPatch {
                status: Some(OrderStatus::Completed),
                proof: Some(proof),
            },
        )?;

        tracing::info!(order_id = %order_id, "Order completed with proof of delivery");
        Ok(updated)
    }
}
