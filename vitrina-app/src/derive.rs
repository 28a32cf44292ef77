//! Order derivation
//!
//! Turns a captured planogram into an [`Order`]. Pure over its inputs plus
//! the injected clock; the caller decides when the order actually enters
//! the store.

use chrono::{DateTime, Duration, Utc};
use shared::error::{AppError, ErrorCode};
use shared::models::{
    DELIVERY_OFFSET_DAYS, Order, OrderLine, OrderStatus, OrderTotals, PlanogramCell, StoreInfo,
    VENDOR_NUMBER,
};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DeriveError {
    /// No cell carries a positive quantity; an order with zero units must
    /// not be creatable.
    #[error("Order has no units to order")]
    EmptyOrder,
}

impl From<DeriveError> for AppError {
    fn from(err: DeriveError) -> Self {
        match err {
            DeriveError::EmptyOrder => AppError::new(ErrorCode::EmptyOrder),
        }
    }
}

/// Derive an order from the captured cells.
///
/// Only cells with `quantity_to_order > 0` participate; line order follows
/// cell order. Totals satisfy `total = subtotal * (1 + TAX_RATE)` exactly,
/// with no intermediate rounding.
pub fn derive_order(
    cells: &[PlanogramCell],
    store: &StoreInfo,
    now: DateTime<Utc>,
) -> Result<Order, DeriveError> {
    let lines: Vec<OrderLine> = cells
        .iter()
        .filter(|c| c.quantity_to_order > 0)
        .map(|c| OrderLine {
            sku: c.sku.clone(),
            product_name: c.product_name.clone(),
            row: c.row,
            col: c.col,
            quantity: c.quantity_to_order,
            unit_price: c.unit_price,
            line_amount: c.quantity_to_order as f64 * c.unit_price,
        })
        .collect();

    if lines.is_empty() {
        return Err(DeriveError::EmptyOrder);
    }

    let totals = OrderTotals::from_lines(&lines);
    Ok(Order {
        id: shared::util::order_id(),
        store_id: store.id.clone(),
        store_name: store.display_name().to_string(),
        store_address: store.full_address(),
        created_at: now,
        expected_delivery_at: now + Duration::days(DELIVERY_OFFSET_DAYS),
        lines,
        units_total: totals.units,
        subtotal: totals.subtotal,
        tax: totals.tax,
        total: totals.total,
        status: OrderStatus::Pending,
        proof_required: true,
        proof: None,
        vendor_number: VENDOR_NUMBER.to_string(),
    })
}
