//! Read models for the list and detail screens
//!
//! Every screen reads the order store directly and re-derives its display
//! aggregates from lines; stored totals are never trusted past
//! [`Order::effective_totals`].

use crate::store::{OrderFilter, OrderStore};
use chrono::{DateTime, Utc};
use shared::models::{Order, OrderStatus, OrderTotals, VENDOR_NUMBER};

/// One row in the order history list
#[derive(Debug, Clone)]
pub struct OrderSummary {
    pub id: String,
    pub store_id: String,
    pub store_name: String,
    pub created_at: DateTime<Utc>,
    pub expected_delivery_at: DateTime<Utc>,
    pub units_total: u32,
    pub total: f64,
    pub status: OrderStatus,
}

impl From<&Order> for OrderSummary {
    fn from(order: &Order) -> Self {
        let totals = order.effective_totals();
        Self {
            id: order.id.clone(),
            store_id: order.store_id.clone(),
            store_name: order.store_name.clone(),
            created_at: order.created_at,
            expected_delivery_at: order.expected_delivery_at,
            units_total: totals.units,
            total: totals.total,
            status: order.status,
        }
    }
}

/// History rows matching the filter, most recent first
pub fn order_history(store: &OrderStore, filter: &OrderFilter) -> Vec<OrderSummary> {
    store
        .list(filter)
        .iter()
        .map(OrderSummary::from)
        .collect()
}

/// The detail screen's view of one order
#[derive(Debug, Clone)]
pub struct OrderDetailView {
    pub order: Order,
    /// False when the id was unknown and a placeholder is shown instead
    pub found: bool,
    /// Display aggregates, re-derived from lines
    pub totals: OrderTotals,
}

/// Fetch an order for the detail screen.
///
/// An unknown id yields a placeholder view rather than a hard failure; the
/// screen stays rendered and simply has nothing to show.
pub fn order_detail(store: &OrderStore, id: &str) -> OrderDetailView {
    match store.get(id) {
        Some(order) => {
            let totals = order.effective_totals();
            OrderDetailView {
                order,
                found: true,
                totals,
            }
        }
        None => {
            tracing::warn!(order_id = %id, "Order not found, showing placeholder");
            let order = placeholder_order(id);
            OrderDetailView {
                totals: OrderTotals::default(),
                order,
                found: false,
            }
        }
    }
}

/// Empty record shown when an order id does not resolve
fn placeholder_order(id: &str) -> Order {
    let now = Utc::now();
    Order {
        id: id.to_string(),
        store_id: String::new(),
        store_name: String::new(),
        store_address: String::new(),
        created_at: now,
        expected_delivery_at: now,
        lines: Vec::new(),
        units_total: 0,
        subtotal: 0.0,
        tax: 0.0,
        total: 0.0,
        status: OrderStatus::Pending,
        proof_required: true,
        proof: None,
        vendor_number: VENDOR_NUMBER.to_string(),
    }
}
