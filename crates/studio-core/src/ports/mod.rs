//! Port interfaces for the application layer
//!
//! Ports define the contract between the use cases and the adapters that talk
//! to the hosted backend, the local disk, and the UI. The core never knows
//! which backend it is running against.
//!
//! ## Port Placement Guidelines
//!
//! A port belongs here when it is implemented outside the core (by
//! `studio-infra` or the host) and consumed by one or more use cases.
//! Pure helpers stay in their domain module.

mod backend;
mod clock;
mod notification;
pub mod onboarding;
mod session;
mod storage;

pub use backend::{BackendError, RecordRepositoryPort};
pub use clock::ClockPort;
pub use notification::NotificationPort;
pub use onboarding::{OnboardingStatusPort, OnboardingSubmissionPort};
pub use session::SessionPort;
pub use storage::{AttachmentStoragePort, StoredObject};
