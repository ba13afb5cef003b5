use serde::{Deserialize, Serialize};

use crate::ids::ProductId;

/// One line on an invoice or purchase order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    #[serde(default)]
    pub product_id: Option<ProductId>,
    pub quantity: u32,
    /// Unit price in cents.
    pub unit_price: i64,
    /// Whole-percent discount applied to this line, 0..=100.
    #[serde(default)]
    pub discount_percent: u8,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: u32, unit_price: i64) -> Self {
        Self {
            description: description.into(),
            product_id: None,
            quantity,
            unit_price,
            discount_percent: 0,
        }
    }

    pub fn with_discount(mut self, percent: u8) -> Self {
        self.discount_percent = percent.min(100);
        self
    }
}
