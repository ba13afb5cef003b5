//! # Application Dependencies / 应用依赖
//!
//! Parameter grouping for building the application, nothing more.
//! 仅用于参数打包。
//!
//! - No build steps / 无构建步骤
//! - No default values / 无默认值
//! - No hidden logic / 无隐藏逻辑

use std::sync::Arc;

use studio_core::ports::*;
use studio_core::records::{
    Contact, Deal, Invoice, Lead, Product, Project, PurchaseOrder, Task, TimeEntry, User,
};

/// One repository per backend table.
/// 每个后端表一个仓储。
pub struct RecordRepositories {
    pub contacts: Arc<dyn RecordRepositoryPort<Contact>>,
    pub leads: Arc<dyn RecordRepositoryPort<Lead>>,
    pub deals: Arc<dyn RecordRepositoryPort<Deal>>,
    pub products: Arc<dyn RecordRepositoryPort<Product>>,
    pub invoices: Arc<dyn RecordRepositoryPort<Invoice>>,
    pub purchase_orders: Arc<dyn RecordRepositoryPort<PurchaseOrder>>,
    pub projects: Arc<dyn RecordRepositoryPort<Project>>,
    pub tasks: Arc<dyn RecordRepositoryPort<Task>>,
    pub users: Arc<dyn RecordRepositoryPort<User>>,
    pub time_entries: Arc<dyn RecordRepositoryPort<TimeEntry>>,
}

/// Application dependency grouping (non-Builder, just parameter grouping)
/// 应用依赖分组（非 Builder，仅参数打包）
///
/// All dependencies are required.
/// 所有依赖都是必需的。
pub struct AppDeps {
    // Backend data / 后端数据
    pub records: RecordRepositories,

    // Onboarding / 入门引导
    pub onboarding_submission: Arc<dyn OnboardingSubmissionPort>,
    pub onboarding_status: Arc<dyn OnboardingStatusPort>,

    // Storage / 存储
    pub attachments: Arc<dyn AttachmentStoragePort>,

    // Session / 会话
    pub session: Arc<dyn SessionPort>,

    // UI / 界面
    pub notifier: Arc<dyn NotificationPort>,

    // System / 系统
    pub clock: Arc<dyn ClockPort>,
}
