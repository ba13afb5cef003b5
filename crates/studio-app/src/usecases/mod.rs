pub mod attachments;
pub mod finance;
pub mod onboarding;
pub mod pipeline;
pub mod records;
pub mod schedule;
pub mod session;

#[cfg(test)]
pub(crate) mod test_support;

pub use attachments::{AttachmentError, ManageAttachments};
pub use finance::{GetInvoiceDetail, GetPurchaseOrderDetail, InvoiceDetail, PurchaseOrderDetail};
pub use onboarding::{
    CompleteOnboarding, FinishOutcome, GetOnboardingStatus, OnboardingOrchestrator, SkipOutcome,
};
pub use pipeline::PipelineSession;
pub use records::{ListRecords, MutateRecord};
pub use schedule::{BuildProjectSchedule, ProjectScheduleError};
pub use session::SessionContext;
