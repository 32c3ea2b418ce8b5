use serde::{Deserialize, Serialize};

/// A line entry (SKU + price) belonging to exactly one Order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Item {
    /// Assigned by the repository on first persist.
    #[serde(default)]
    pub id: Option<i64>,
    pub order_id: i64,
    pub item_price: f64,
    pub sku: i64,
}
