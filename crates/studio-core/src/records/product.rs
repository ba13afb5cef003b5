use std::cmp::Ordering;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::impl_record;
use crate::ids::ProductId;
use crate::query::{cmp_text, Searchable, Sortable};

/// An item in the studio's product library (furniture, lighting, finishes).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub category: Option<String>,
    /// Retail price in cents.
    #[serde(default)]
    pub price: i64,
    /// Storage object key of the product photo, if any.
    #[serde(default)]
    pub image_path: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl_record!(Product, ProductId, "products");

impl Searchable for Product {
    fn search_fields(&self) -> Vec<&str> {
        let mut fields = vec![self.name.as_str(), self.vendor.as_str()];
        if let Some(sku) = &self.sku {
            fields.push(sku);
        }
        fields
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortKey {
    Name,
    Vendor,
    Price,
    CreatedAt,
}

impl Sortable for Product {
    type SortKey = ProductSortKey;

    fn compare_by(&self, other: &Self, key: ProductSortKey) -> Ordering {
        match key {
            ProductSortKey::Name => cmp_text(&self.name, &other.name),
            ProductSortKey::Vendor => cmp_text(&self.vendor, &other.vendor),
            ProductSortKey::Price => self.price.cmp(&other.price),
            ProductSortKey::CreatedAt => self.created_at.cmp(&other.created_at),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::filter_by_search;

    fn product(name: &str, vendor: &str) -> Product {
        Product {
            id: ProductId::generate(),
            name: name.into(),
            sku: None,
            vendor: vendor.into(),
            category: None,
            price: 12_900,
            image_path: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn lamp_search_returns_the_two_lamps_in_order() {
        let products = vec![
            product("Arc Floor Lamp", "Lumen"),
            product("Oak Dining Chair", "Hearth"),
            product("Ceramic Table lamp", "Kiln & Co"),
            product("Jute Rug", "Loom"),
        ];
        let found = filter_by_search(products.clone(), "lamp");
        assert_eq!(found, vec![products[0].clone(), products[2].clone()]);
    }
}
