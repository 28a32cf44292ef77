//! Store Info Model

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A store the field rep can visit
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StoreInfo {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    pub last_visit: Option<NaiveDate>,
}

impl StoreInfo {
    /// Street address and city joined for display and order stamping
    pub fn full_address(&self) -> String {
        if self.city.is_empty() {
            self.address.clone()
        } else {
            format!("{}, {}", self.address, self.city)
        }
    }

    /// Display name, falling back to the id when the name is blank
    pub fn display_name(&self) -> &str {
        if self.name.is_empty() { &self.id } else { &self.name }
    }
}
