//! Order store
//!
//! The authoritative local record of all orders. Every screen reads through
//! this store and writes back through [`OrderStore::update`]; nothing else
//! owns order state.
//!
//! # Persistence
//!
//! The whole collection lives in one JSON file (`{data_dir}/orders.json`).
//! Every mutation is a read-modify-write of the full collection under a
//! single lock, so a reader never observes a half-applied change. Writes
//! are visible to subsequent reads immediately; across devices there is no
//! conflict resolution, last writer wins at record granularity.
//!
//! A file that fails to parse loads as the empty collection: the app stays
//! usable and the next write replaces the damaged file.
//!
//! # Notifications
//!
//! Mutations publish [`StoreEvent`]s on a broadcast channel; list screens
//! subscribe instead of re-polling on focus.

use shared::models::{Order, OrderPatch, OrderStatus};
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock, RwLockWriteGuard};
use thiserror::Error;
use tokio::sync::broadcast;

const ORDERS_FILE: &str = "orders.json";
const EVENT_CHANNEL_CAPACITY: usize = 256;

/// Storage errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Order not found: {0}")]
    NotFound(String),

    /// Ids are generated, never user-supplied; a collision is a bug in id
    /// generation, not a condition callers recover from.
    #[error("Order id already exists: {0}")]
    IdCollision(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;

impl From<StoreError> for shared::error::AppError {
    fn from(err: StoreError) -> Self {
        use shared::error::{AppError, ErrorCode};
        match err {
            StoreError::NotFound(id) => {
                AppError::with_message(ErrorCode::OrderNotFound, format!("Order not found: {}", id))
            }
            StoreError::IdCollision(id) => AppError::with_message(
                ErrorCode::OrderIdCollision,
                format!("Order id already exists: {}", id),
            ),
            StoreError::Io(e) => AppError::storage(e.to_string()),
            StoreError::Json(e) => AppError::storage(e.to_string()),
        }
    }
}

/// Published on every mutation
#[derive(Debug, Clone)]
pub enum StoreEvent {
    Created(Order),
    Updated(Order),
}

/// Filter for [`OrderStore::list`]
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    pub status: Option<OrderStatus>,
    /// Case-insensitive match against order id, store name and store id
    pub search_text: Option<String>,
}

impl OrderFilter {
    pub fn with_status(status: OrderStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }
        if let Some(text) = &self.search_text {
            let needle = text.to_lowercase();
            if !needle.is_empty() {
                let hit = order.id.to_lowercase().contains(&needle)
                    || order.store_name.to_lowercase().contains(&needle)
                    || order.store_id.to_lowercase().contains(&needle);
                if !hit {
                    return false;
                }
            }
        }
        true
    }
}

/// Collection file structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct OrderCollection {
    orders: Vec<Order>,
}

/// Order store backed by a single JSON collection file
pub struct OrderStore {
    /// Collection path: {data_dir}/orders.json
    file_path: PathBuf,
    inner: RwLock<OrderCollection>,
    events: broadcast::Sender<StoreEvent>,
}

impl OrderStore {
    /// Open the store, loading whatever collection is on disk.
    ///
    /// A missing or unreadable file yields the empty collection; orders
    /// must remain reachable even when the stored JSON is damaged.
    pub fn open(data_dir: &Path) -> Self {
        let file_path = data_dir.join(ORDERS_FILE);

        let collection = match std::fs::read_to_string(&file_path) {
            Ok(content) => match serde_json::from_str::<OrderCollection>(&content) {
                Ok(collection) => collection,
                Err(err) => {
                    tracing::warn!(
                        error = %err,
                        path = %file_path.display(),
                        "Order collection unreadable, starting empty"
                    );
                    OrderCollection::default()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => OrderCollection::default(),
            Err(err) => {
                tracing::warn!(
                    error = %err,
                    path = %file_path.display(),
                    "Order collection unreadable, starting empty"
                );
                OrderCollection::default()
            }
        };

        tracing::debug!(
            count = collection.orders.len(),
            path = %file_path.display(),
            "Order store opened"
        );

        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            file_path,
            inner: RwLock::new(collection),
            events,
        }
    }

    /// Subscribe to mutation events
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    /// Append a new order. Fails if the generated id collides with an
    /// existing record.
    pub fn create(&self, order: Order) -> StoreResult<String> {
        let mut guard = self.write_guard();

        if guard.orders.iter().any(|o| o.id == order.id) {
            return Err(StoreError::IdCollision(order.id));
        }

        let mut next = guard.clone();
        next.orders.push(order.clone());
        self.persist(&next)?;
        *guard = next;
        drop(guard);

        tracing::info!(order_id = %order.id, store_id = %order.store_id, "Order created");
        let id = order.id.clone();
        let _ = self.events.send(StoreEvent::Created(order));
        Ok(id)
    }

    /// Fetch an order by id
    pub fn get(&self, id: &str) -> Option<Order> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .orders
            .iter()
            .find(|o| o.id == id)
            .cloned()
    }

    /// List orders matching the filter, most recent first.
    ///
    /// Ordering is descending by creation time; records created in the same
    /// instant keep their insertion order.
    pub fn list(&self, filter: &OrderFilter) -> Vec<Order> {
        let mut orders: Vec<Order> = self
            .inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .orders
            .iter()
            .filter(|o| filter.matches(o))
            .cloned()
            .collect();
        orders.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        orders
    }

    /// Apply a patch to an existing order.
    ///
    /// The patch carries only the fields that may change post-creation;
    /// it is applied and persisted before any reader can observe it.
    /// The store does not police the status/proof pairing, that is the
    /// lifecycle controller's contract.
    pub fn update(&self, id: &str, patch: OrderPatch) -> StoreResult<Order> {
        let mut guard = self.write_guard();

        let mut next = guard.clone();
        let Some(record) = next.orders.iter_mut().find(|o| o.id == id) else {
            return Err(StoreError::NotFound(id.to_string()));
        };

        if let Some(status) = patch.status {
            record.status = status;
        }
        if let Some(proof) = patch.proof {
            record.proof = Some(proof);
        }
        let updated = record.clone();

        self.persist(&next)?;
        *guard = next;
        drop(guard);

        tracing::info!(order_id = %id, status = ?updated.status, "Order updated");
        let _ = self.events.send(StoreEvent::Updated(updated.clone()));
        Ok(updated)
    }

    fn write_guard(&self) -> RwLockWriteGuard<'_, OrderCollection> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }

    fn persist(&self, collection: &OrderCollection) -> StoreResult<()> {
        if let Some(parent) = self.file_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(collection)?;
        std::fs::write(&self.file_path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};
    use shared::models::{OrderLine, OrderTotals, ProofOfDelivery, VENDOR_NUMBER};

    fn line() -> OrderLine {
        OrderLine {
            sku: "SKU-LIP-001".to_string(),
            product_name: "Eternal Matte Lipstick".to_string(),
            row: 1,
            col: 2,
            quantity: 3,
            unit_price: 24.99,
            line_amount: 74.97,
        }
    }

    fn order(id: &str, created_offset_secs: i64) -> Order {
        let lines = vec![line()];
        let totals = OrderTotals::from_lines(&lines);
        let created_at = Utc::now() + Duration::seconds(created_offset_secs);
        Order {
            id: id.to_string(),
            store_id: "CVS-001".to_string(),
            store_name: "CVS Pharmacy - Brickell".to_string(),
            store_address: "1234 Brickell Ave, Miami, FL 33131".to_string(),
            created_at,
            expected_delivery_at: created_at + Duration::days(3),
            lines,
            units_total: totals.units,
            subtotal: totals.subtotal,
            tax: totals.tax,
            total: totals.total,
            status: OrderStatus::Pending,
            proof_required: true,
            proof: None,
            vendor_number: VENDOR_NUMBER.to_string(),
        }
    }

    #[test]
    fn test_create_then_get_roundtrip() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());

        let original = order("ORD-1", 0);
        let id = store.create(original.clone()).unwrap();
        assert_eq!(id, "ORD-1");

        let fetched = store.get("ORD-1").unwrap();
        assert_eq!(fetched, original);
    }

    #[test]
    fn test_get_unknown_is_none() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());
        assert!(store.get("ORD-nope").is_none());
    }

    #[test]
    fn test_id_collision_rejected() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());

        store.create(order("ORD-1", 0)).unwrap();
        let err = store.create(order("ORD-1", 10)).unwrap_err();
        assert!(matches!(err, StoreError::IdCollision(_)));

        // The original record is untouched
        assert_eq!(store.list(&OrderFilter::default()).len(), 1);
    }

    #[test]
    fn test_list_sorted_most_recent_first_with_insertion_ties() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());

        let old = order("ORD-old", -100);
        let tie_a = order("ORD-tie-a", 0);
        let mut tie_b = order("ORD-tie-b", 0);
        tie_b.created_at = tie_a.created_at;
        tie_b.expected_delivery_at = tie_a.expected_delivery_at;

        store.create(old).unwrap();
        store.create(tie_a).unwrap();
        store.create(tie_b).unwrap();

        let ids: Vec<String> = store
            .list(&OrderFilter::default())
            .into_iter()
            .map(|o| o.id)
            .collect();
        assert_eq!(ids, vec!["ORD-tie-a", "ORD-tie-b", "ORD-old"]);
    }

    #[test]
    fn test_list_status_filter() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());

        store.create(order("ORD-1", 0)).unwrap();
        store.create(order("ORD-2", 1)).unwrap();
        store
            .update(
                "ORD-2",
                OrderPatch {
                    status: Some(OrderStatus::Completed),
                    proof: Some(ProofOfDelivery {
                        image_data: "aGVsbG8=".to_string(),
                        notes: None,
                        completed_at: Utc::now(),
                    }),
                },
            )
            .unwrap();

        let pending = store.list(&OrderFilter::with_status(OrderStatus::Pending));
        assert_eq!(pending.len(), 1);
        assert_eq!(pending[0].id, "ORD-1");
        assert!(pending.iter().all(|o| o.status == OrderStatus::Pending));

        let completed = store.list(&OrderFilter::with_status(OrderStatus::Completed));
        assert_eq!(completed.len(), 1);
        assert_eq!(completed[0].id, "ORD-2");
    }

    #[test]
    fn test_list_search_text_case_insensitive() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());

        let mut other = order("ORD-2", 1);
        other.store_id = "WBA-007".to_string();
        other.store_name = "Walgreens Downtown".to_string();

        store.create(order("ORD-1", 0)).unwrap();
        store.create(other).unwrap();

        let by_store_name = store.list(&OrderFilter {
            search_text: Some("BRICKELL".to_string()),
            ..Default::default()
        });
        assert_eq!(by_store_name.len(), 1);
        assert_eq!(by_store_name[0].id, "ORD-1");

        let by_store_id = store.list(&OrderFilter {
            search_text: Some("wba".to_string()),
            ..Default::default()
        });
        assert_eq!(by_store_id.len(), 1);

        let by_order_id = store.list(&OrderFilter {
            search_text: Some("ord-2".to_string()),
            ..Default::default()
        });
        assert_eq!(by_order_id.len(), 1);
    }

    #[test]
    fn test_update_applies_patch_and_persists() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());
        store.create(order("ORD-1", 0)).unwrap();

        let proof = ProofOfDelivery {
            image_data: "aW1n".to_string(),
            notes: Some("left at counter".to_string()),
            completed_at: Utc::now(),
        };
        let updated = store
            .update(
                "ORD-1",
                OrderPatch {
                    status: Some(OrderStatus::Completed),
                    proof: Some(proof.clone()),
                },
            )
            .unwrap();
        assert_eq!(updated.status, OrderStatus::Completed);
        assert_eq!(updated.proof, Some(proof.clone()));

        // A fresh store over the same directory sees the write
        let reopened = OrderStore::open(dir.path());
        let fetched = reopened.get("ORD-1").unwrap();
        assert_eq!(fetched.status, OrderStatus::Completed);
        assert_eq!(fetched.proof, Some(proof));
    }

    #[test]
    fn test_update_unknown_id_leaves_file_untouched() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());
        store.create(order("ORD-1", 0)).unwrap();

        let before = std::fs::read(dir.path().join(ORDERS_FILE)).unwrap();
        let err = store.update("ORD-ghost", OrderPatch::default()).unwrap_err();
        assert!(matches!(err, StoreError::NotFound(_)));
        let after = std::fs::read(dir.path().join(ORDERS_FILE)).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_immutable_fields_survive_update() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());
        let original = order("ORD-1", 0);
        store.create(original.clone()).unwrap();

        store
            .update(
                "ORD-1",
                OrderPatch {
                    status: Some(OrderStatus::Completed),
                    proof: Some(ProofOfDelivery {
                        image_data: "aW1n".to_string(),
                        notes: None,
                        completed_at: Utc::now(),
                    }),
                },
            )
            .unwrap();

        let fetched = store.get("ORD-1").unwrap();
        assert_eq!(fetched.id, original.id);
        assert_eq!(fetched.store_id, original.store_id);
        assert_eq!(fetched.lines, original.lines);
        assert_eq!(fetched.created_at, original.created_at);
        assert_eq!(fetched.total, original.total);
    }

    #[test]
    fn test_corrupt_file_loads_empty_and_next_write_recovers() {
        let dir = tempfile::TempDir::new().unwrap();
        std::fs::write(dir.path().join(ORDERS_FILE), "{corrupt!").unwrap();

        let store = OrderStore::open(dir.path());
        assert!(store.list(&OrderFilter::default()).is_empty());

        store.create(order("ORD-1", 0)).unwrap();
        let reopened = OrderStore::open(dir.path());
        assert_eq!(reopened.list(&OrderFilter::default()).len(), 1);
    }

    #[test]
    fn test_events_published_in_program_order() {
        let dir = tempfile::TempDir::new().unwrap();
        let store = OrderStore::open(dir.path());
        let mut rx = store.subscribe();

        store.create(order("ORD-1", 0)).unwrap();
        store
            .update(
                "ORD-1",
                OrderPatch {
                    status: Some(OrderStatus::Completed),
                    proof: Some(ProofOfDelivery {
                        image_data: "aW1n".to_string(),
                        notes: None,
                        completed_at: Utc::now(),
                    }),
                },
            )
            .unwrap();

        match rx.try_recv().unwrap() {
            StoreEvent::Created(o) => assert_eq!(o.id, "ORD-1"),
            other => panic!("expected Created, got {:?}", other),
        }
        match rx.try_recv().unwrap() {
            StoreEvent::Updated(o) => assert_eq!(o.status, OrderStatus::Completed),
            other => panic!("expected Updated, got {:?}", other),
        }
        assert!(rx.try_recv().is_err());
    }
}
