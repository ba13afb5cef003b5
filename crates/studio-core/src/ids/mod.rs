//! ID type wrappers for type safety.
//!
//! Every record fetched from the backend carries a string id. Wrapping them keeps
//! a `ProjectId` from being passed where a `TaskId` is expected.

mod id_macro;

use id_macro::record_id;

record_id!(
    /// Contact (client) identifier.
    ContactId,
    /// Sales lead identifier.
    LeadId,
    /// Pipeline deal identifier.
    DealId,
    /// Product library item identifier.
    ProductId,
    /// Invoice identifier.
    InvoiceId,
    /// Purchase order identifier.
    PurchaseOrderId,
    /// Project identifier.
    ProjectId,
    /// Project task identifier.
    TaskId,
    /// Studio user identifier.
    UserId,
    /// Time-tracking entry identifier.
    TimeEntryId,
    /// Organization identifier, assigned by the backend after onboarding.
    OrganizationId,
);
