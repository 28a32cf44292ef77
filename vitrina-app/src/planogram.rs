//! Planogram capture
//!
//! A 10×10 grid of shelf positions for the selected store. The grid seeds
//! with representative products; the rep walks the shelf recording current
//! stock and the quantity to order per position. Capture produces the cell
//! set that order derivation consumes.

use rand::Rng;
use shared::models::{GRID_COLS, GRID_ROWS, PlanogramCell};
use thiserror::Error;

struct SeedProduct {
    id: &'static str,
    name: &'static str,
    price: f64,
    ideal: u32,
}

/// Representative catalog used to seed a fresh grid
const SEED_PRODUCTS: &[SeedProduct] = &[
    SeedProduct { id: "LIP-001", name: "Eternal Matte Lipstick", price: 24.99, ideal: 6 },
    SeedProduct { id: "LIP-002", name: "Velvet Lip Gloss", price: 19.99, ideal: 8 },
    SeedProduct { id: "EYE-001", name: "HD Eyeshadow Palette", price: 45.99, ideal: 4 },
    SeedProduct { id: "EYE-002", name: "Precision Eyeliner", price: 16.99, ideal: 10 },
    SeedProduct { id: "FAC-001", name: "Foundation Perfect Match", price: 38.99, ideal: 5 },
    SeedProduct { id: "FAC-002", name: "HD Powder", price: 28.99, ideal: 6 },
    SeedProduct { id: "BLU-001", name: "Natural Blush", price: 22.99, ideal: 7 },
    SeedProduct { id: "MAS-001", name: "Volume Mascara", price: 21.99, ideal: 9 },
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanogramError {
    #[error("No shelf position at row {row}, col {col}")]
    UnknownPosition { row: u8, col: u8 },
}

/// The capture grid for one store visit
#[derive(Debug, Clone)]
pub struct Planogram {
    pub store_id: String,
    cells: Vec<PlanogramCell>,
}

impl Planogram {
    /// Seed a fresh grid for a store, one representative product per
    /// position, nothing captured yet.
    pub fn seed(store_id: &str) -> Self {
        let mut rng = rand::thread_rng();
        let mut cells = Vec::with_capacity(GRID_ROWS as usize * GRID_COLS as usize);

        for row in 0..GRID_ROWS {
            for col in 0..GRID_COLS {
                let product = &SEED_PRODUCTS[rng.gen_range(0..SEED_PRODUCTS.len())];
                cells.push(PlanogramCell {
                    row,
                    col,
                    product_id: product.id.to_string(),
                    product_name: product.name.to_string(),
                    sku: format!("SKU-{}", product.id),
                    unit_price: product.price,
                    ideal_stock: product.ideal,
                    current_stock: 0,
                    quantity_to_order: 0,
                });
            }
        }

        Self {
            store_id: store_id.to_string(),
            cells,
        }
    }

    /// Restore a grid from a draft's cells
    pub fn from_cells(store_id: &str, cells: Vec<PlanogramCell>) -> Self {
        Self {
            store_id: store_id.to_string(),
            cells,
        }
    }

    pub fn cells(&self) -> &[PlanogramCell] {
        &self.cells
    }

    pub fn into_cells(self) -> Vec<PlanogramCell> {
        self.cells
    }

    pub fn cell(&self, row: u8, col: u8) -> Option<&PlanogramCell> {
        self.cells.iter().find(|c| c.row == row && c.col == col)
    }

    /// Record a capture for one position
    pub fn update_cell(
        &mut self,
        row: u8,
        col: u8,
        current_stock: u32,
        quantity_to_order: u32,
    ) -> Result<(), PlanogramError> {
        let cell = self
            .cells
            .iter_mut()
            .find(|c| c.row == row && c.col == col)
            .ok_or(PlanogramError::UnknownPosition { row, col })?;
        cell.current_stock = current_stock;
        cell.quantity_to_order = quantity_to_order;
        Ok(())
    }

    /// Total units the capture would order
    pub fn units_to_order(&self) -> u32 {
        self.cells.iter().map(|c| c.quantity_to_order).sum()
    }

    /// Value of the units the capture would order
    pub fn order_value(&self) -> f64 {
        self.cells.iter().map(|c| c.order_value()).sum()
    }

    /// Share of positions with recorded stock, as a rounded percentage
    pub fn progress_percent(&self) -> u32 {
        if self.cells.is_empty() {
            return 0;
        }
        let completed = self.cells.iter().filter(|c| c.current_stock > 0).count();
        ((completed as f64 / self.cells.len() as f64) * 100.0).round() as u32
    }
}
