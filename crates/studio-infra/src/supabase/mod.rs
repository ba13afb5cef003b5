//! Adapters for the hosted backend: PostgREST data API, Storage API and the
//! Auth user endpoint.

mod client;
mod onboarding;
mod records;
mod session;
mod storage;

pub use client::SupabaseClient;
pub use onboarding::{SupabaseOnboardingSubmitter, COMPLETE_ONBOARDING_RPC};
pub use records::SupabaseRecordRepository;
pub use session::SupabaseSessionAdapter;
pub use storage::SupabaseStorage;
