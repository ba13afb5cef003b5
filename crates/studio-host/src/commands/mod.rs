//! Commands exposed to the UI shell.
//!
//! Each command takes the shared [`AppRuntime`](crate::bootstrap::AppRuntime),
//! runs inside a `command.<area>.<name>` span and returns
//! `Result<_, CommandError>`.

pub mod attachments;
pub mod dto;
pub mod error;
pub mod finance;
pub mod onboarding;
pub mod pipeline;
pub mod records;
pub mod schedule;
pub mod session;

pub use error::CommandError;
