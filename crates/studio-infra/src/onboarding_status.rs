//! Onboarding completion flag, kept as a small JSON file in the data directory.
//!
//! The file is written once, right after the backend accepted the wizard
//! submission, and read on every launch. Writes go to a staging file that is
//! synced and then renamed over the real one, so a crash mid-write leaves the
//! previous status readable instead of a truncated file.

use std::ffi::OsString;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::Context;
use async_trait::async_trait;
use studio_core::onboarding::OnboardingStatus;
use studio_core::ports::OnboardingStatusPort;
use tokio::fs;
use tokio::io::AsyncWriteExt;

pub const ONBOARDING_STATUS_FILE: &str = "onboarding_status.json";

const STAGING_SUFFIX: &str = ".tmp";

pub struct FileOnboardingStatusRepository {
    path: PathBuf,
}

impl FileOnboardingStatusRepository {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }

    /// `<data_dir>/onboarding_status.json`
    pub fn in_data_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join(ONBOARDING_STATUS_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling the next write is staged in, e.g. `onboarding_status.json.tmp`.
    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(OsString::from)
            .unwrap_or_else(|| OsString::from(ONBOARDING_STATUS_FILE));
        name.push(STAGING_SUFFIX);
        self.path.with_file_name(name)
    }

    async fn write_staged(&self, staging: &Path, bytes: &[u8]) -> anyhow::Result<()> {
        // `create` truncates whatever an interrupted write left behind.
        let mut file = fs::File::create(staging).await?;
        file.write_all(bytes).await?;
        file.sync_all().await?;
        Ok(())
    }
}

async fn remove_if_present(path: &Path) -> std::io::Result<()> {
    match fs::remove_file(path).await {
        Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
        other => other,
    }
}

#[async_trait]
impl OnboardingStatusPort for FileOnboardingStatusRepository {
    /// Missing or blank file means the wizard has not been finished.
    async fn get_status(&self) -> anyhow::Result<OnboardingStatus> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                return Ok(OnboardingStatus::default())
            }
            Err(err) => {
                return Err(err).with_context(|| {
                    format!("Failed to read onboarding status {}", self.path.display())
                })
            }
        };
        if content.trim().is_empty() {
            return Ok(OnboardingStatus::default());
        }
        serde_json::from_str(&content).with_context(|| {
            format!("Failed to parse onboarding status {}", self.path.display())
        })
    }

    async fn set_status(&self, status: &OnboardingStatus) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let json = serde_json::to_vec_pretty(status)
            .context("Failed to serialize onboarding status")?;

        let staging = self.staging_path();
        if let Err(err) = self.write_staged(&staging, &json).await {
            // Best effort; a leftover staging file is ignored by reads anyway.
            let _ = remove_if_present(&staging).await;
            return Err(err)
                .with_context(|| format!("Failed to stage onboarding status {}", staging.display()));
        }
        fs::rename(&staging, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;

        tracing::debug!(
            path = %self.path.display(),
            completed = status.has_completed,
            "onboarding status saved"
        );
        Ok(())
    }

    async fn reset(&self) -> anyhow::Result<()> {
        remove_if_present(&self.path)
            .await
            .with_context(|| format!("Failed to remove {}", self.path.display()))?;
        remove_if_present(&self.staging_path()).await?;
        Ok(())
    }
}
