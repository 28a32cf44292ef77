//! Application wiring
//!
//! One [`App`] instance owns every service for the process lifetime and is
//! handed to the screens explicitly; nothing reaches order or session state
//! through ambient lookup.

use crate::config::AppConfig;
use crate::derive::derive_order;
use crate::handoff::{Handoff, OrderConfirmation, OrderReviewDraft, PlanogramDraft};
use crate::lifecycle::LifecycleController;
use crate::planogram::Planogram;
use crate::pod::PodCapture;
use crate::store::OrderStore;
use crate::stores::StoreDirectory;
use chrono::Utc;
use shared::error::{AppError, AppResult};
use shared::models::{Order, Session, StoreInfo};
use std::sync::Arc;
use std::time::Duration;
use vitrina_client::{AuthApi, AuthError, ClientConfig, HttpClient, SessionStore};

/// The process-wide service graph, created once at startup
pub struct App {
    pub orders: Arc<OrderStore>,
    pub session: Arc<SessionStore>,
    pub auth: AuthApi,
    pub handoff: Handoff,
    pub stores: StoreDirectory,
    pub lifecycle: LifecycleController,
    pub pod: PodCapture,
    http: HttpClient,
}

impl App {
    /// Build the service graph from configuration
    pub fn init(config: &AppConfig) -> Self {
        let orders = Arc::new(OrderStore::open(&config.data_dir));
        let session = Arc::new(SessionStore::open(&config.data_dir));

        let http = HttpClient::new(&ClientConfig {
            base_url: config.api_base_url.clone(),
            timeout: config.request_timeout,
        });
        if let Some(token) = session.token() {
            http.set_token(token);
        }
        let auth = AuthApi::new(http.clone());

        let lifecycle = LifecycleController::new(orders.clone());
        let pod = PodCapture::new(
            orders.clone(),
            lifecycle.clone(),
            Duration::from_millis(config.upload_delay_ms),
        );

        tracing::info!(data_dir = %config.data_dir.display(), "Application services initialized");
        Self {
            orders,
            session,
            auth,
            handoff: Handoff::default(),
            stores: StoreDirectory::with_defaults(),
            lifecycle,
            pod,
            http,
        }
    }

    /// Log in, persist the session in the single slot, and start sending
    /// the bearer credential with every subsequent request
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, AuthError> {
        let session = self.auth.login(email, password).await?;
        if let Err(err) = self.session.activate(session.clone()) {
            tracing::warn!(error = %err, "Failed to persist session");
        }
        self.http.set_token(session.token.clone());
        Ok(session)
    }

    /// Clear the session slot and stop sending the credential
    pub fn logout(&self) {
        if let Err(err) = self.session.clear() {
            tracing::warn!(error = %err, "Failed to clear session");
        }
        self.http.clear_token();
    }

    /// Start or resume a store visit.
    ///
    /// A planogram draft left behind by a previous detour is resumed when
    /// it belongs to the same store; anything else seeds a fresh grid.
    pub fn begin_visit(&self, store_id: &str) -> AppResult<(StoreInfo, Planogram)> {
        let store = self
            .stores
            .get(store_id)
            .cloned()
            .ok_or_else(|| AppError::not_found("Store"))?;

        if let Some(draft) = self.handoff.planogram.take() {
            if draft.store.id == store_id {
                return Ok((store, Planogram::from_cells(store_id, draft.cells)));
            }
            // Draft for another store; a fresh visit starts clean
            self.handoff.planogram.put(draft);
        }

        Ok((store, Planogram::seed(store_id)))
    }

    /// Hand the capture to the review screen
    pub fn review_capture(&self, store: StoreInfo, planogram: Planogram) {
        self.handoff.review.put(OrderReviewDraft {
            store,
            cells: planogram.into_cells(),
        });
    }

    /// Send the draft back to the planogram screen for editing
    pub fn edit_capture(&self, draft: OrderReviewDraft) {
        self.handoff.planogram.put(PlanogramDraft {
            store: draft.store,
            cells: draft.cells,
        });
    }

    /// Convert the reviewed capture into a stored order.
    ///
    /// Derivation rejects a capture with no positive quantities before
    /// anything is written; on success the confirmation flag is left for
    /// the detail screen to take.
    pub fn submit_order(&self, draft: &OrderReviewDraft) -> AppResult<Order> {
        let order = derive_order(&draft.cells, &draft.store, Utc::now())?;
        self.orders.create(order.clone())?;
        self.handoff.confirmation.put(OrderConfirmation {
            order_id: order.id.clone(),
            show_confirmation: true,
        });
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::error::ErrorCode;
    use shared::models::OrderStatus;
    use crate::pod::PodPayload;
    use crate::store::OrderFilter;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::TempDir::new().unwrap();
        let config = AppConfig {
            data_dir: dir.path().to_path_buf(),
            upload_delay_ms: 0,
            ..AppConfig::default()
        };
        let app = App::init(&config);
        (dir, app)
    }

    #[test]
    fn test_begin_visit_unknown_store() {
        let (_dir, app) = app();
        let err = app.begin_visit("CVS-999").unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_begin_visit_resumes_matching_draft() {
        let (_dir, app) = app();
        let (store, mut planogram) = app.begin_visit("CVS-001").unwrap();
        planogram.update_cell(0, 0, 2, 5).unwrap();

        app.handoff.planogram.put(PlanogramDraft {
            store,
            cells: planogram.into_cells(),
        });

        let (_, resumed) = app.begin_visit("CVS-001").unwrap();
        assert_eq!(resumed.cell(0, 0).unwrap().quantity_to_order, 5);
    }

    #[test]
    fn test_begin_visit_other_store_keeps_draft_and_seeds_fresh() {
        let (_dir, app) = app();
        let (store, planogram) = app.begin_visit("CVS-001").unwrap();
        app.handoff.planogram.put(PlanogramDraft {
            store,
            cells: planogram.into_cells(),
        });

        let (_, fresh) = app.begin_visit("CVS-002").unwrap();
        assert_eq!(fresh.units_to_order(), 0);
        // The other store's draft is still there
        assert!(app.handoff.planogram.take().is_some());
    }

    #[test]
    fn test_submit_order_empty_capture_rejected() {
        let (_dir, app) = app();
        let (store, planogram) = app.begin_visit("CVS-001").unwrap();
        app.review_capture(store, planogram);

        let draft = app.handoff.review.take().unwrap();
        let err = app.submit_order(&draft).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyOrder);
        assert!(app.orders.list(&OrderFilter::default()).is_empty());
    }

    #[tokio::test]
    async fn test_capture_to_completion_flow() {
        let (_dir, app) = app();

        // Capture: one position, five units at $10
        let (store, mut planogram) = app.begin_visit("CVS-001").unwrap();
        planogram.update_cell(4, 7, 1, 5).unwrap();
        app.review_capture(store, planogram);

        // Review and send
        let mut draft = app.handoff.review.take().unwrap();
        for cell in draft.cells.iter_mut().filter(|c| c.quantity_to_order > 0) {
            cell.unit_price = 10.0;
        }
        let order = app.submit_order(&draft).unwrap();
        assert_eq!(order.units_total, 5);
        assert!((order.subtotal - 50.0).abs() < 1e-9);
        assert!((order.tax - 4.25).abs() < 1e-9);
        assert!((order.total - 54.25).abs() < 1e-9);

        // Confirmation banner waits for the detail screen
        let confirmation = app.handoff.confirmation.take().unwrap();
        assert_eq!(confirmation.order_id, order.id);
        assert!(confirmation.show_confirmation);

        // The pending-deliveries screen sees it
        let pending = app.pod.pending();
        assert_eq!(pending.len(), 1);

        // Complete with proof
        let completed = app
            .pod
            .submit(
                &order.id,
                PodPayload {
                    image: b"delivery-photo".to_vec(),
                    notes: Some("signed by manager".to_string()),
                },
            )
            .await
            .unwrap();
        assert_eq!(completed.status, OrderStatus::Completed);
        assert!(!completed.proof.as_ref().unwrap().image_data.is_empty());

        // And the store agrees end to end
        let stored = app.orders.get(&order.id).unwrap();
        assert_eq!(stored.status, OrderStatus::Completed);
        assert!(app.pod.pending().is_empty());
    }
}
