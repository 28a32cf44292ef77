//! Planogram Model

use serde::{Deserialize, Serialize};

/// Grid dimensions of a store planogram
pub const GRID_ROWS: u8 = 10;
pub const GRID_COLS: u8 = 10;

/// A single shelf position in the planogram grid.
///
/// Quantities are unsigned, so `quantity_to_order >= 0` holds by
/// construction; a cell with `quantity_to_order == 0` never becomes an
/// order line.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PlanogramCell {
    pub row: u8,
    pub col: u8,
    pub product_id: String,
    pub product_name: String,
    pub sku: String,
    /// Price in currency unit
    pub unit_price: f64,
    pub ideal_stock: u32,
    pub current_stock: u32,
    pub quantity_to_order: u32,
}

impl PlanogramCell {
    /// Whether this cell participates in order formation
    pub fn orders_units(&self) -> bool {
        self.quantity_to_order > 0
    }

    /// Value of the units this cell adds to an order
    pub fn order_value(&self) -> f64 {
        self.quantity_to_order as f64 * self.unit_price
    }
}
