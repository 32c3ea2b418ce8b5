use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::domain::item::Item;

/// Status stays free text in the data model; these are the values the
/// lifecycle endpoints produce and check.
pub const STATUS_OPEN: &str = "Open";
pub const STATUS_CANCELLED: &str = "Cancelled";
pub const STATUS_SHIPPED: &str = "Shipped";

fn default_status() -> String {
    STATUS_OPEN.to_string()
}

/// A customer purchase record with a shipping address and a lifecycle
/// status. Owns its items; the database cascade removes them with it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Order {
    /// Assigned by the repository on first persist.
    #[serde(default)]
    pub id: Option<i64>,
    pub name: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub shipping_price: f64,
    /// Rendered as an ISO-8601 date string in JSON.
    pub date_created: NaiveDate,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl Order {
    pub fn is_open(&self) -> bool {
        self.status == STATUS_OPEN
    }

    pub fn cancel(&mut self) {
        self.status = STATUS_CANCELLED.to_string();
    }
}
