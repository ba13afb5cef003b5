//! StudioDesk application layer
//!
//! Use cases and orchestrators over the core ports.

pub mod deps;
pub mod usecases;

pub use deps::{AppDeps, RecordRepositories};
