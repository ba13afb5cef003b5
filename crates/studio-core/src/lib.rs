//! StudioDesk domain core.
//!
//! Pure models and rules for the studio management app: the onboarding
//! wizard, record types, list querying, the pipeline board, finance math,
//! Gantt columns and display formatting, plus the ports the application
//! layer drives. Nothing in this crate performs I/O.

pub mod config;
pub mod finance;
pub mod format;
pub mod ids;
pub mod notification;
pub mod onboarding;
pub mod pipeline;
pub mod ports;
pub mod query;
pub mod records;
pub mod schedule;
pub mod session;
pub mod storage;

pub use config::AppConfig;
pub use ids::{
    ContactId, DealId, InvoiceId, LeadId, OrganizationId, ProductId, ProjectId, PurchaseOrderId,
    TaskId, TimeEntryId, UserId,
};
pub use notification::{Toast, ToastLevel};
pub use ports::BackendError;
