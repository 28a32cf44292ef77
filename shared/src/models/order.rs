//! Order Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Fixed tax rate applied to every order (8.5%)
pub const TAX_RATE: f64 = 0.085;

/// Vendor identifier stamped at order creation
pub const VENDOR_NUMBER: &str = "2F318";

/// Days between order creation and expected delivery
pub const DELIVERY_OFFSET_DAYS: i64 = 3;

/// Order status
///
/// The only transition is `Pending -> Completed`, performed by the
/// lifecycle controller when proof of delivery is attached.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Pending,
    Completed,
}

/// Order line, derived from a planogram cell with a nonzero quantity.
/// Immutable once the order is created.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OrderLine {
    pub sku: String,
    pub product_name: String,
    /// Shelf position the quantity was captured at
    pub row: u8,
    pub col: u8,
    pub quantity: u32,
    /// Price in currency unit
    pub unit_price: f64,
    /// quantity * unit_price
    pub line_amount: f64,
}

/// Proof of delivery, present iff the order is completed
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProofOfDelivery {
    /// Base64-encoded delivery photo
    pub image_data: String,
    pub notes: Option<String>,
    pub completed_at: DateTime<Utc>,
}

/// Order entity, the canonical record held by the order store
///
/// `id`, `store_id`, `lines` and `created_at` are immutable after
/// creation; only `status` and `proof` change, via [`OrderPatch`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    pub id: String,
    pub store_id: String,
    pub store_name: String,
    pub store_address: String,
    pub created_at: DateTime<Utc>,
    pub expected_delivery_at: DateTime<Utc>,
    /// Lines in capture order (stable for display)
    pub lines: Vec<OrderLine>,
    pub units_total: u32,
    /// Amounts in currency unit
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
    pub status: OrderStatus,
    pub proof_required: bool,
    pub proof: Option<ProofOfDelivery>,
    pub vendor_number: String,
}

/// Aggregates computed from line-level data
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq)]
pub struct OrderTotals {
    pub units: u32,
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl OrderTotals {
    /// Compute aggregates from order lines.
    ///
    /// This is the single aggregation source used by every consumer; no
    /// rounding happens here, display rounding is presentation-time only.
    pub fn from_lines(lines: &[OrderLine]) -> Self {
        let units = lines.iter().map(|l| l.quantity).sum();
        let subtotal: f64 = lines
            .iter()
            .map(|l| l.quantity as f64 * l.unit_price)
            .sum();
        let tax = subtotal * TAX_RATE;
        Self {
            units,
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

impl Order {
    /// Recompute aggregates from this order's lines
    pub fn recomputed_totals(&self) -> OrderTotals {
        OrderTotals::from_lines(&self.lines)
    }

    /// Stored aggregates, unless they diverge from the line-derived ones.
    ///
    /// When the stored total no longer matches what the lines produce,
    /// the recomputed values win.
    pub fn effective_totals(&self) -> OrderTotals {
        let derived = self.recomputed_totals();
        let stored = OrderTotals {
            units: self.units_total,
            subtotal: self.subtotal,
            tax: self.tax,
            total: self.total,
        };
        if stored.units != derived.units || (stored.total - derived.total).abs() > 1e-9 {
            tracing::warn!(
                order_id = %self.id,
                stored_total = stored.total,
                derived_total = derived.total,
                "Stored totals diverge from line-derived totals, using recomputation"
            );
            derived
        } else {
            stored
        }
    }

    /// Whether this order still needs its proof-of-delivery captured
    pub fn awaiting_proof(&self) -> bool {
        self.proof_required && self.proof.is_none() && self.status == OrderStatus::Pending
    }
}

/// Update payload for the order store.
///
/// Only the fields that may change after creation are representable here;
/// everything else on [`Order`] is frozen at creation time.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderPatch {
    pub status: Option<OrderStatus>,
    pub proof: Option<ProofOfDelivery>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line(quantity: u32, unit_price: f64) -> OrderLine {
        OrderLine {
            sku: "SKU-LIP-001".to_string(),
            product_name: "Eternal Matte Lipstick".to_string(),
            row: 0,
            col: 0,
            quantity,
            unit_price,
            line_amount: quantity as f64 * unit_price,
        }
    }

    fn order_with(lines: Vec<OrderLine>) -> Order {
        let totals = OrderTotals::from_lines(&lines);
        Order {
            id: "ORD-1".to_string(),
            store_id: "CVS-001".to_string(),
            store_name: "CVS Pharmacy - Brickell".to_string(),
            store_address: "1234 Brickell Ave, Miami, FL 33131".to_string(),
            created_at: Utc::now(),
            expected_delivery_at: Utc::now(),
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
    fn test_totals_from_lines() {
        let totals = OrderTotals::from_lines(&[line(5, 10.0)]);
        assert_eq!(totals.units, 5);
        assert!((totals.subtotal - 50.0).abs() < 1e-9);
        assert!((totals.tax - 4.25).abs() < 1e-9);
        assert!((totals.total - 54.25).abs() < 1e-9);
    }

    #[test]
    fn test_total_formula_holds() {
        let totals = OrderTotals::from_lines(&[line(3, 24.99), line(7, 16.99), line(1, 45.99)]);
        assert!((totals.total - totals.subtotal * (1.0 + TAX_RATE)).abs() < 1e-9);
    }

    #[test]
    fn test_effective_totals_prefers_stored_when_consistent() {
        let order = order_with(vec![line(2, 19.99)]);
        let totals = order.effective_totals();
        assert_eq!(totals.units, 2);
        assert!((totals.total - order.total).abs() < 1e-9);
    }

    #[test]
    fn test_effective_totals_recomputes_on_divergence() {
        let mut order = order_with(vec![line(4, 10.0)]);
        // Corrupt the stored aggregate the way a stale writer would
        order.total = 999.0;
        let totals = order.effective_totals();
        assert!((totals.total - 40.0 * 1.085).abs() < 1e-9);
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::to_string(&OrderStatus::Completed).unwrap(),
            "\"completed\""
        );
        let back: OrderStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(back, OrderStatus::Completed);
    }

    #[test]
    fn test_awaiting_proof() {
        let mut order = order_with(vec![line(1, 5.0)]);
        assert!(order.awaiting_proof());

        order.status = OrderStatus::Completed;
        order.proof = Some(ProofOfDelivery {
            image_data: "aGVsbG8=".to_string(),
            notes: None,
            completed_at: Utc::now(),
        });
        assert!(!order.awaiting_proof());
    }
}
