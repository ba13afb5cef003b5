//! In-process adapters for offline demos and tests.
//!
//! 离线模式与测试使用的内存适配器。

mod onboarding;
mod records;
mod session;
mod storage;

pub use onboarding::LocalOnboardingSubmitter;
pub use records::InMemoryRecordRepository;
pub use session::StaticSession;
pub use storage::InMemoryStorage;
