use std::cmp::Ordering;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use super::{impl_record, LineItem};
use crate::ids::{InvoiceId, ProjectId};
use crate::query::{cmp_text, HasStatus, Searchable, Sortable};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceStatus {
    #[default]
    Draft,
    Sent,
    Paid,
    Overdue,
    Void,
}

impl InvoiceStatus {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Draft => "Draft",
            Self::Sent => "Sent",
            Self::Paid => "Paid",
            Self::Overdue => "Overdue",
            Self::Void => "Void",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invoice {
    pub id: InvoiceId,
    pub number: String,
    pub client_name: String,
    #[serde(default)]
    pub project_id: Option<ProjectId>,
    #[serde(default)]
    pub status: InvoiceStatus,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    #[serde(default)]
    pub line_items: Vec<LineItem>,
    /// Tax rate in basis points (825 = 8.25%).
    #[serde(default)]
    pub tax_rate_bps: u32,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub paid_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl_record!(Invoice, InvoiceId, "invoices");

impl Searchable for Invoice {
    fn search_fields(&self) -> Vec<&str> {
        vec![self.number.as_str(), self.client_name.as_str()]
    }
}

impl HasStatus for Invoice {
    type Status = InvoiceStatus;

    fn status(&self) -> InvoiceStatus {
        self.status
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InvoiceSortKey {
    Number,
    Client,
    IssueDate,
    DueDate,
    Total,
}

impl Sortable for Invoice {
    type SortKey = InvoiceSortKey;

    fn compare_by(&self, other: &Self, key: InvoiceSortKey) -> Ordering {
        match key {
            InvoiceSortKey::Number => cmp_text(&self.number, &other.number),
            InvoiceSortKey::Client => cmp_text(&self.client_name, &other.client_name),
            InvoiceSortKey::IssueDate => self.issue_date.cmp(&other.issue_date),
            InvoiceSortKey::DueDate => self.due_date.cmp(&other.due_date),
            InvoiceSortKey::Total => crate::finance::DocumentTotals::of_invoice(self)
                .total
                .cmp(&crate::finance::DocumentTotals::of_invoice(other).total),
        }
    }
}
