//! Sales reporting
//!
//! Aggregates over the order collection for the reporting screen: revenue
//! figures from completed orders, plus day/product/store breakdowns and a
//! CSV export. Every money figure is recomputed from order lines; stored
//! aggregates are display hints, not inputs.

use chrono::NaiveDate;
use shared::models::{Order, OrderStatus};

/// Filter over the reported order set.
///
/// The date range only applies when both ends are set, matching the
/// reporting screen's from/to pair.
#[derive(Debug, Clone, Default)]
pub struct ReportFilter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub status: Option<OrderStatus>,
    pub store_id: Option<String>,
}

impl ReportFilter {
    fn matches(&self, order: &Order) -> bool {
        if let Some(status) = self.status
            && order.status != status
        {
            return false;
        }
        if let Some(store_id) = &self.store_id
            && order.store_id != *store_id
        {
            return false;
        }
        if let (Some(from), Some(to)) = (self.from, self.to) {
            let date = order.created_at.date_naive();
            if date < from || date > to {
                return false;
            }
        }
        true
    }
}

/// Sales on one day
#[derive(Debug, Clone, PartialEq)]
pub struct DaySales {
    pub date: NaiveDate,
    pub sales: f64,
    pub orders: u32,
}

/// One product's movement across the reported orders
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSales {
    pub name: String,
    pub quantity: u32,
    pub revenue: f64,
}

/// One store's share of the reported orders
#[derive(Debug, Clone, PartialEq)]
pub struct StoreSales {
    pub store_id: String,
    pub store_name: String,
    pub sales: f64,
    pub orders: u32,
}

/// The reporting screen's aggregates
#[derive(Debug, Clone, Default)]
pub struct SalesReport {
    /// Revenue over completed orders only
    pub total_revenue: f64,
    pub completed_orders: u32,
    /// Units across completed orders' lines
    pub units_sold: u32,
    pub average_order: f64,
    /// Breakdowns over the whole filtered set, chronological
    pub by_day: Vec<DaySales>,
    /// Products by revenue, highest first
    pub top_products: Vec<ProductSales>,
    /// Stores by sales, highest first
    pub by_store: Vec<StoreSales>,
}

impl SalesReport {
    /// Build the report over the filtered order set
    pub fn build(orders: &[Order], filter: &ReportFilter) -> Self {
        let filtered: Vec<&Order> = orders.iter().filter(|o| filter.matches(o)).collect();

        let completed: Vec<&&Order> = filtered
            .iter()
            .filter(|o| o.status == OrderStatus::Completed)
            .collect();

        let total_revenue: f64 = completed.iter().map(|o| o.effective_totals().total).sum();
        let units_sold: u32 = completed
            .iter()
            .flat_map(|o| o.lines.iter())
            .map(|l| l.quantity)
            .sum();
        let average_order = if completed.is_empty() {
            0.0
        } else {
            total_revenue / completed.len() as f64
        };

        let mut by_day: Vec<DaySales> = Vec::new();
        for order in &filtered {
            let date = order.created_at.date_naive();
            let total = order.effective_totals().total;
            match by_day.iter_mut().find(|d| d.date == date) {
                Some(day) => {
                    day.sales += total;
                    day.orders += 1;
                }
                None => by_day.push(DaySales {
                    date,
                    sales: total,
                    orders: 1,
                }),
            }
        }
        by_day.sort_by_key(|d| d.date);

        let mut top_products: Vec<ProductSales> = Vec::new();
        for line in filtered.iter().flat_map(|o| o.lines.iter()) {
            let revenue = line.quantity as f64 * line.unit_price;
            match top_products.iter_mut().find(|p| p.name == line.product_name) {
                Some(product) => {
                    product.quantity += line.quantity;
                    product.revenue += revenue;
                }
                None => top_products.push(ProductSales {
                    name: line.product_name.clone(),
                    quantity: line.quantity,
                    revenue,
                }),
            }
        }
        top_products.sort_by(|a, b| b.revenue.total_cmp(&a.revenue));

        let mut by_store: Vec<StoreSales> = Vec::new();
        for order in &filtered {
            let total = order.effective_totals().total;
            match by_store.iter_mut().find(|s| s.store_id == order.store_id) {
                Some(store) => {
                    store.sales += total;
                    store.orders += 1;
                }
                None => by_store.push(StoreSales {
                    store_id: order.store_id.clone(),
                    store_name: order.store_name.clone(),
                    sales: total,
                    orders: 1,
                }),
            }
        }
        by_store.sort_by(|a, b| b.sales.total_cmp(&a.sales));

        Self {
            total_revenue,
            completed_orders: completed.len() as u32,
            units_sold,
            average_order,
            by_day,
            top_products,
            by_store,
        }
    }
}

/// Render the filtered orders as CSV rows for export
pub fn export_csv(orders: &[Order], filter: &ReportFilter) -> String {
    let mut out = String::from("ID,Fecha,Tienda,Estado,Total\n");
    for order in orders.iter().filter(|o| filter.matches(o)) {
        let status = match order.status {
            OrderStatus::Pending => "pending",
            OrderStatus::Completed => "completed",
        };
        out.push_str(&format!(
            "{},{},{},{},${:.2}\n",
            order.id,
            order.created_at.date_naive(),
            order.store_name,
            status,
            order.effective_totals().total
        ));
    }
    out
}
