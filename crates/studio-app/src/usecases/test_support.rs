//! Hand-written port doubles shared by use case tests.

use std::sync::Mutex;

use chrono::{DateTime, Utc};
use studio_core::notification::Toast;
use studio_core::onboarding::OnboardingStatus;
use studio_core::ports::{
    BackendError, ClockPort, NotificationPort, OnboardingStatusPort, RecordRepositoryPort,
};
use studio_core::query::{paginate, Page, PageRequest};
use studio_core::records::Record;

/// Vec-backed repository; `fail_with` makes every call return that error.
pub struct MemoryRepo<R> {
    pub rows: Mutex<Vec<R>>,
    pub fail_with: Mutex<Option<BackendError>>,
    pub calls: Mutex<Vec<&'static str>>,
}

impl<R: Record> MemoryRepo<R> {
    pub fn new(rows: Vec<R>) -> Self {
        Self {
            rows: Mutex::new(rows),
            fail_with: Mutex::new(None),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn failing(error: BackendError) -> Self {
        let repo = Self::new(Vec::new());
        *repo.fail_with.lock().unwrap() = Some(error);
        repo
    }

    fn check(&self, call: &'static str) -> Result<(), BackendError> {
        self.calls.lock().unwrap().push(call);
        match self.fail_with.lock().unwrap().clone() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

#[async_trait::async_trait]
impl<R: Record> RecordRepositoryPort<R> for MemoryRepo<R> {
    async fn list(&self, page: Option<PageRequest>) -> Result<Page<R>, BackendError> {
        self.check("list")?;
        let rows = self.rows.lock().unwrap().clone();
        Ok(match page {
            Some(request) => paginate(rows, request),
            None => Page::whole(rows),
        })
    }

    async fn get(&self, id: &R::Id) -> Result<R, BackendError> {
        self.check("get")?;
        self.rows
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned()
            .ok_or(BackendError::NotFound)
    }

    async fn create(&self, record: &R) -> Result<R, BackendError> {
        self.check("create")?;
        self.rows.lock().unwrap().push(record.clone());
        Ok(record.clone())
    }

    async fn update(&self, record: &R) -> Result<R, BackendError> {
        self.check("update")?;
        let mut rows = self.rows.lock().unwrap();
        let row = rows
            .iter_mut()
            .find(|r| r.id() == record.id())
            .ok_or(BackendError::NotFound)?;
        *row = record.clone();
        Ok(record.clone())
    }

    async fn delete(&self, id: &R::Id) -> Result<(), BackendError> {
        self.check("delete")?;
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|r| r.id() != id);
        if rows.len() == before {
            return Err(BackendError::NotFound);
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct RecordingNotifier {
    pub toasts: Mutex<Vec<Toast>>,
}

impl RecordingNotifier {
    pub fn taken(&self) -> Vec<Toast> {
        std::mem::take(&mut *self.toasts.lock().unwrap())
    }
}

impl NotificationPort for RecordingNotifier {
    fn notify(&self, toast: Toast) {
        self.toasts.lock().unwrap().push(toast);
    }
}

pub struct FixedClock(pub DateTime<Utc>);

impl ClockPort for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

#[derive(Default)]
pub struct MemoryStatus {
    pub status: Mutex<OnboardingStatus>,
}

#[async_trait::async_trait]
impl OnboardingStatusPort for MemoryStatus {
    async fn get_status(&self) -> anyhow::Result<OnboardingStatus> {
        Ok(self.status.lock().unwrap().clone())
    }

    async fn set_status(&self, status: &OnboardingStatus) -> anyhow::Result<()> {
        *self.status.lock().unwrap() = status.clone();
        Ok(())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        *self.status.lock().unwrap() = OnboardingStatus::default();
        Ok(())
    }
}
