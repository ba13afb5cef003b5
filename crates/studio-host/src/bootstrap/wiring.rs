//! # Dependency Injection / 依赖注入模块
//!
//! Creates the infra adapters and groups them into [`AppDeps`]. This is the
//! only place that depends on `studio-infra` and `studio-app` together, and
//! it assembles only: no business decisions, no config validation beyond what
//! an adapter needs to exist.

use std::sync::Arc;

use studio_app::{AppDeps, RecordRepositories};
use studio_core::config::AppConfig;
use studio_core::ports::RecordRepositoryPort;
use studio_core::records::{Record, User};
use studio_infra::{
    BroadcastNotifier, FileOnboardingStatusRepository, InMemoryRecordRepository, InMemoryStorage,
    LocalOnboardingSubmitter, StaticSession, SupabaseClient, SupabaseOnboardingSubmitter,
    SupabaseRecordRepository, SupabaseSessionAdapter, SupabaseStorage, SystemClock,
};

/// Result type for wiring operations
pub type WiringResult<T> = Result<T, WiringError>;

/// Errors during dependency injection
/// 依赖注入错误（基础设施初始化失败）
#[derive(Debug, thiserror::Error)]
pub enum WiringError {
    #[error("Backend client initialization failed: {0}")]
    BackendInit(String),

    #[error("Storage initialization failed: {0}")]
    StorageInit(String),
}

/// Which data source the ports talk to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendMode {
    /// The hosted backend at `AppConfig::backend_url`.
    Hosted,
    /// In-process stores seeded with one signed-in user.
    Offline { owner: User },
}

impl BackendMode {
    /// Hosted when a backend URL is configured.
    pub fn for_config(config: &AppConfig, offline_owner: impl FnOnce() -> User) -> Self {
        if config.backend_url.trim().is_empty() {
            Self::Offline {
                owner: offline_owner(),
            }
        } else {
            Self::Hosted
        }
    }
}

/// Wired ports plus the concrete notifier the UI subscribes to.
pub struct WiredDependencies {
    pub deps: AppDeps,
    pub notifier: Arc<BroadcastNotifier>,
}

fn hosted_repo<R: Record>(client: &Arc<SupabaseClient>) -> Arc<dyn RecordRepositoryPort<R>> {
    Arc::new(SupabaseRecordRepository::<R>::new(client.clone()))
}

fn memory_repo<R: Record>() -> Arc<dyn RecordRepositoryPort<R>> {
    Arc::new(InMemoryRecordRepository::<R>::new())
}

/// Build every port for `mode`.
/// 按模式构建所有端口。
pub fn wire_dependencies(config: &AppConfig, mode: BackendMode) -> WiringResult<WiredDependencies> {
    let notifier = Arc::new(BroadcastNotifier::new());
    let onboarding_status = Arc::new(FileOnboardingStatusRepository::in_data_dir(
        &config.data_dir,
    ));

    let deps = match mode {
        BackendMode::Hosted => {
            let client = Arc::new(
                SupabaseClient::from_config(config)
                    .map_err(|e| WiringError::BackendInit(e.to_string()))?,
            );
            let storage = SupabaseStorage::new(client.clone(), &config.attachment_bucket)
                .map_err(|e| WiringError::StorageInit(e.to_string()))?;

            AppDeps {
                records: RecordRepositories {
                    contacts: hosted_repo(&client),
                    leads: hosted_repo(&client),
                    deals: hosted_repo(&client),
                    products: hosted_repo(&client),
                    invoices: hosted_repo(&client),
                    purchase_orders: hosted_repo(&client),
                    projects: hosted_repo(&client),
                    tasks: hosted_repo(&client),
                    users: hosted_repo(&client),
                    time_entries: hosted_repo(&client),
                },
                onboarding_submission: Arc::new(SupabaseOnboardingSubmitter::new(client.clone())),
                onboarding_status,
                attachments: Arc::new(storage),
                session: Arc::new(SupabaseSessionAdapter::new(client)),
                notifier: notifier.clone(),
                clock: Arc::new(SystemClock),
            }
        }
        BackendMode::Offline { owner } => AppDeps {
            records: RecordRepositories {
                contacts: memory_repo(),
                leads: memory_repo(),
                deals: memory_repo(),
                products: memory_repo(),
                invoices: memory_repo(),
                purchase_orders: memory_repo(),
                projects: memory_repo(),
                tasks: memory_repo(),
                users: Arc::new(InMemoryRecordRepository::seeded(vec![owner.clone()])),
                time_entries: memory_repo(),
            },
            onboarding_submission: Arc::new(LocalOnboardingSubmitter::new()),
            onboarding_status,
            attachments: Arc::new(InMemoryStorage::new()),
            session: Arc::new(StaticSession::new(owner, Vec::new())),
            notifier: notifier.clone(),
            clock: Arc::new(SystemClock),
        },
    };

    tracing::debug!(data_dir = %config.data_dir.display(), "dependencies wired");
    Ok(WiredDependencies { deps, notifier })
}
