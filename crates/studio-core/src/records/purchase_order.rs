use std::cmp::Ordering;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{impl_record, LineItem};
use crate::ids::{ProjectId, PurchaseOrderId};
use crate::query::{cmp_option, cmp_text, HasStatus, Searchable, Sortable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderStatus {
    #[default]
    Draft,
    Ordered,
    Received,
    Cancelled,
}

impl PurchaseOrderStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Ordered => "Ordered",
            Self::Received => "Received",
            Self::Cancelled => "Cancelled",
        }
    }
}

/// An order placed with a vendor on behalf of a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub id: PurchaseOrderId,
    pub number: String,
    pub vendor: String,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub status: PurchaseOrderStatus,
    pub order_date: NaiveDate,
    #[serde(default)]
    pub expected_date: Option<NaiveDate>,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    #[serde(default)]
    pub tax_rate_bps: u32,
    #[serde(default)]
    pub currency: Option<String>,
}

impl_record!(PurchaseOrder, PurchaseOrderId, "purchase_orders");

impl Searchable for PurchaseOrder {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.vendor.as_str()]
    }
}

impl HasStatus for PurchaseOrder {
    type Status = PurchaseOrderStatus;

    fn status(&self) -> PurchaseOrderStatus {
        self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PurchaseOrderSortKey {
    Number,
    Vendor,
    OrderDate,
    ExpectedDate,
}

impl Sortable for PurchaseOrder {
    type SortKey = PurchaseOrderSortKey;

    fn compare_by(&self, other: &Self, key: PurchaseOrderSortKey) -> Ordering {
        match key {
            PurchaseOrderSortKey::Number => cmp_text(&self.number, &other.number),
            PurchaseOrderSortKey::Vendor => cmp_text(&self.vendor, &other.vendor),
            PurchaseOrderSortKey::OrderDate => self.order_date.cmp(&other.order_date),
            PurchaseOrderSortKey::ExpectedDate => {
                cmp_option(&self.expected_date, &other.expected_date)
            }
        }
    }
}
