//! Vitrina application core
//!
//! Field reps visit stores, record restocking quantities against the store
//! planogram, convert the capture into an order, and later close the order
//! out with mandatory proof of delivery. This crate holds the order
//! lifecycle, the local order store every screen reads through, and the
//! services wiring it all together; the page shell consumes it as a
//! library.

pub mod app;
pub mod config;
pub mod derive;
pub mod handoff;
pub mod lifecycle;
pub mod logging;
pub mod planogram;
pub mod pod;
pub mod queries;
pub mod report;
pub mod store;
pub mod stores;

pub use app::App;
pub use config::AppConfig;
pub use derive::{DeriveError, derive_order};
pub use handoff::{Handoff, OrderConfirmation, OrderReviewDraft, PlanogramDraft};
pub use lifecycle::{LifecycleController, LifecycleError};
pub use planogram::{Planogram, PlanogramError};
pub use pod::{PodCapture, PodPayload};
pub use queries::{OrderDetailView, OrderSummary, order_detail, order_history};
pub use report::{ReportFilter, SalesReport, export_csv};
pub use store::{OrderFilter, OrderStore, StoreError, StoreEvent, StoreResult};
pub use stores::StoreDirectory;

// Re-export the crates the shell needs alongside this one
pub use shared;
pub use vitrina_client;
