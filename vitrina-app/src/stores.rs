//! Store directory
//!
//! The stores a rep can visit. Backed by a built-in list until the route
//! assignment service exists; search semantics match the selection screen.

use chrono::NaiveDate;
use shared::models::StoreInfo;

/// Directory of visitable stores
#[derive(Debug, Clone)]
pub struct StoreDirectory {
    stores: Vec<StoreInfo>,
}

impl StoreDirectory {
    pub fn new(stores: Vec<StoreInfo>) -> Self {
        Self { stores }
    }

    /// The built-in route
    pub fn with_defaults() -> Self {
        let store = |id: &str, name: &str, address: &str, city: &str, last_visit: &str| StoreInfo {
            id: id.to_string(),
            name: name.to_string(),
            address: address.to_string(),
            city: city.to_string(),
            last_visit: NaiveDate::parse_from_str(last_visit, "%Y-%m-%d").ok(),
        };

        Self::new(vec![
            store(
                "CVS-001",
                "CVS Pharmacy - Brickell",
                "1234 Brickell Ave",
                "Miami, FL 33131",
                "2025-11-20",
            ),
            store(
                "CVS-002",
                "CVS Pharmacy - Downtown",
                "5678 Flagler St",
                "Miami, FL 33130",
                "2025-11-18",
            ),
            store(
                "CVS-003",
                "CVS Pharmacy - Coral Gables",
                "9012 Miracle Mile",
                "Coral Gables, FL 33134",
                "2025-11-15",
            ),
            store(
                "CVS-004",
                "CVS Pharmacy - Coconut Grove",
                "3456 Grand Ave",
                "Miami, FL 33133",
                "2025-11-10",
            ),
        ])
    }

    pub fn all(&self) -> &[StoreInfo] {
        &self.stores
    }

    pub fn get(&self, id: &str) -> Option<&StoreInfo> {
        self.stores.iter().find(|s| s.id == id)
    }

    /// Case-insensitive search over name, address and id
    pub fn search(&self, query: &str) -> Vec<&StoreInfo> {
        let needle = query.to_lowercase();
        self.stores
            .iter()
            .filter(|s| {
                s.name.to_lowercase().contains(&needle)
                    || s.address.to_lowercase().contains(&needle)
                    || s.id.to_lowercase().contains(&needle)
            })
            .collect()
    }
}
