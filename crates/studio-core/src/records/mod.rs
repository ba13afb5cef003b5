//! Plain records fetched from and written back to the hosted data store.
//!
//! Records carry no lifecycle of their own: the backend row is authoritative,
//! and the client only derives display values (formatting, totals, overdue).

mod contact;
mod deal;
mod invoice;
mod lead;
mod line_item;
mod product;
mod project;
mod purchase_order;
mod time_entry;
mod user;

pub use contact::{Contact, ContactSortKey};
pub use deal::{Deal, DealSortKey, DealStage};
pub use invoice::{Invoice, InvoiceSortKey, InvoiceStatus};
pub use lead::{Lead, LeadSortKey, LeadStatus};
pub use line_item::LineItem;
pub use product::{Product, ProductSortKey};
pub use project::{Project, ProjectSortKey, ProjectStatus, Task};
pub use purchase_order::{PurchaseOrder, PurchaseOrderSortKey, PurchaseOrderStatus};
pub use time_entry::{TimeEntry, TimeEntrySortKey};
pub use user::{User, UserRole};

use std::fmt::Display;
use std::hash::Hash;

use serde::de::DeserializeOwned;
use serde::Serialize;

/// A row in one backend table.
pub trait Record: Clone + Send + Sync + Serialize + DeserializeOwned + 'static {
    type Id: Clone + Eq + Hash + Display + Send + Sync + 'static;

    /// Backend table name.
    const TABLE: &'static str;

    fn id(&self) -> &Self::Id;
}

macro_rules! impl_record {
    ($ty:ty, $id:ty, $table:literal) => {
        impl $crate::records::Record for $ty {
            type Id = $id;
            const TABLE: &'static str = $table;

            fn id(&self) -> &Self::Id {
                &self.id
            }
        }
    };
}

pub(crate) use impl_record;
