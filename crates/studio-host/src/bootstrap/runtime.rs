//! # Use Cases Accessor
//!
//! [`AppRuntime`] owns the wired ports and the long-lived, stateful pieces
//! (onboarding wizard, session context, pipeline board). Commands call
//! `runtime.usecases().xxx()` to get a use case with its ports pre-wired.
//!
//! ## Adding New Use Cases
//!
//! 1. Give the use case a `from_ports()` constructor taking its ports
//! 2. Add a method to `UseCases` that calls it with deps
//! 3. Commands can now call `runtime.usecases().your_use_case()`

use std::sync::Arc;

use studio_app::usecases::{
    BuildProjectSchedule, CompleteOnboarding, GetInvoiceDetail, GetOnboardingStatus,
    GetPurchaseOrderDetail, ListRecords, ManageAttachments, MutateRecord, OnboardingOrchestrator,
    PipelineSession, SessionContext,
};
use studio_app::{AppDeps, RecordRepositories};
use studio_core::config::AppConfig;
use studio_core::onboarding::OnboardingStateMachine;
use studio_core::ports::RecordRepositoryPort;
use studio_core::records::{
    Contact, Deal, Invoice, Lead, Product, Project, PurchaseOrder, Record, Task, TimeEntry, User,
};
use studio_core::Toast;
use studio_infra::BroadcastNotifier;
use tokio::sync::broadcast;

use super::wiring::WiredDependencies;

/// A record type with a repository in [`RecordRepositories`].
pub trait RecordTable: Record {
    fn repository(records: &RecordRepositories) -> Arc<dyn RecordRepositoryPort<Self>>;
}

macro_rules! record_table {
    ($($ty:ty => $field:ident),* $(,)?) => {
        $(
            impl RecordTable for $ty {
                fn repository(records: &RecordRepositories) -> Arc<dyn RecordRepositoryPort<Self>> {
                    records.$field.clone()
                }
            }
        )*
    };
}

record_table!(
    Contact => contacts,
    Lead => leads,
    Deal => deals,
    Product => products,
    Invoice => invoices,
    PurchaseOrder => purchase_orders,
    Project => projects,
    Task => tasks,
    User => users,
    TimeEntry => time_entries,
);

/// Application runtime with dependencies.
///
/// 包含所有应用依赖的运行时。
pub struct AppRuntime {
    /// Application dependencies
    pub deps: AppDeps,
    config: Arc<AppConfig>,
    notifier: Arc<BroadcastNotifier>,
    /// Shared across commands so the wizard state survives between calls.
    ///
    /// 在所有命令间共享，避免每次调用都重置向导状态。
    onboarding: Arc<OnboardingOrchestrator>,
    session: Arc<SessionContext>,
    pipeline: Arc<PipelineSession>,
}

impl AppRuntime {
    pub fn new(config: AppConfig, wired: WiredDependencies) -> Self {
        let WiredDependencies { deps, notifier } = wired;

        let complete = Arc::new(CompleteOnboarding::from_ports(
            deps.onboarding_status.clone(),
            deps.clock.clone(),
        ));
        let onboarding = Arc::new(OnboardingOrchestrator::new(
            OnboardingStateMachine::studio_default(),
            deps.onboarding_submission.clone(),
            complete,
            deps.notifier.clone(),
        ));
        let session = Arc::new(SessionContext::from_ports(
            deps.session.clone(),
            deps.clock.clone(),
        ));
        let pipeline = Arc::new(PipelineSession::from_ports(deps.records.deals.clone()));

        Self {
            deps,
            config: Arc::new(config),
            notifier,
            onboarding,
            session,
            pipeline,
        }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Toast stream for the UI shell.
    pub fn subscribe_toasts(&self) -> broadcast::Receiver<Toast> {
        self.notifier.subscribe()
    }

    pub fn usecases(&self) -> UseCases<'_> {
        UseCases::new(self)
    }
}

pub struct UseCases<'a> {
    runtime: &'a AppRuntime,
}

impl<'a> UseCases<'a> {
    pub fn new(runtime: &'a AppRuntime) -> Self {
        Self { runtime }
    }

    fn deps(&self) -> &AppDeps {
        &self.runtime.deps
    }

    // Onboarding / 入门引导

    pub fn onboarding_orchestrator(&self) -> Arc<OnboardingOrchestrator> {
        self.runtime.onboarding.clone()
    }

    pub fn get_onboarding_status(&self) -> GetOnboardingStatus {
        GetOnboardingStatus::from_ports(self.deps().onboarding_status.clone())
    }

    // Records / 记录

    pub fn list_records<R: RecordTable>(&self) -> ListRecords<R> {
        ListRecords::from_ports(R::repository(&self.deps().records))
    }

    pub fn mutate_record<R: RecordTable>(&self) -> MutateRecord<R> {
        MutateRecord::from_ports(
            R::repository(&self.deps().records),
            self.deps().notifier.clone(),
        )
    }

    pub fn pipeline_session(&self) -> Arc<PipelineSession> {
        self.runtime.pipeline.clone()
    }

    pub fn build_project_schedule(&self) -> BuildProjectSchedule {
        BuildProjectSchedule::from_ports(self.deps().records.tasks.clone())
    }

    pub fn get_invoice_detail(&self) -> GetInvoiceDetail {
        GetInvoiceDetail::from_ports(
            self.deps().records.invoices.clone(),
            self.deps().clock.clone(),
        )
    }

    pub fn get_purchase_order_detail(&self) -> GetPurchaseOrderDetail {
        GetPurchaseOrderDetail::from_ports(self.deps().records.purchase_orders.clone())
    }

    // Storage / 存储

    pub fn manage_attachments(&self) -> ManageAttachments {
        ManageAttachments::from_ports(
            self.deps().attachments.clone(),
            self.deps().notifier.clone(),
            &self.runtime.config,
        )
    }

    // Session / 会话

    pub fn session_context(&self) -> Arc<SessionContext> {
        self.runtime.session.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::wiring::{wire_dependencies, BackendMode};
    use studio_core::records::UserRole;
    use studio_core::UserId;

    fn runtime() -> (tempfile::TempDir, AppRuntime) {
        let dir = tempfile::tempdir().unwrap();
        let config = AppConfig::with_system_defaults(dir.path().to_path_buf());
        let owner = User {
            id: UserId::new("u1"),
            full_name: "Ana Reyes".into(),
            email: "ana@reyes-interiors.com".into(),
            role: UserRole::Owner,
            avatar_path: None,
        };
        let wired = wire_dependencies(&config, BackendMode::Offline { owner }).unwrap();
        (dir, AppRuntime::new(config, wired))
    }

    #[tokio::test]
    async fn test_orchestrator_is_shared_between_calls() {
        let (_dir, runtime) = runtime();

        runtime.usecases().onboarding_orchestrator().advance().await;
        let state = runtime.usecases().onboarding_orchestrator().get_state().await;

        assert_eq!(state.current.get(), 2);
    }

    #[tokio::test]
    async fn test_record_tables_resolve_their_repository() {
        let (_dir, runtime) = runtime();

        let users = runtime.usecases().list_records::<User>().fetch_all().await.unwrap();
        let deals = runtime.usecases().list_records::<Deal>().fetch_all().await.unwrap();

        assert_eq!(users.len(), 1);
        assert!(deals.is_empty());
    }

    #[tokio::test]
    async fn test_mutations_reach_toast_subscribers() {
        let (_dir, runtime) = runtime();
        let mut toasts = runtime.subscribe_toasts();

        let err = runtime
            .usecases()
            .mutate_record::<User>()
            .delete(&UserId::new("nobody"))
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        let toast = toasts.recv().await.unwrap();
        assert_eq!(toast.title, "Could not delete users");
    }
}
