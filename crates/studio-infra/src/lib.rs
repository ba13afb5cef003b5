//! Adapters behind the StudioDesk ports: the hosted backend over HTTP, an
//! in-memory record store, the local onboarding status file and the clock.

pub mod memory;
pub mod notification;
pub mod onboarding_status;
pub mod paths;
pub mod supabase;
pub mod time;

pub use memory::{
    InMemoryRecordRepository, InMemoryStorage, LocalOnboardingSubmitter, StaticSession,
};
pub use notification::BroadcastNotifier;
pub use onboarding_status::FileOnboardingStatusRepository;
pub use supabase::{
    SupabaseClient, SupabaseOnboardingSubmitter, SupabaseRecordRepository,
    SupabaseSessionAdapter, SupabaseStorage,
};
pub use time::SystemClock;
