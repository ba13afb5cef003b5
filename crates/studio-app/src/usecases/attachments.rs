//! Task and project attachments.

use std::sync::Arc;

use thiserror::Error;
use tracing::{info_span, warn, Instrument};

use studio_core::config::AppConfig;
use studio_core::notification::Toast;
use studio_core::ports::{AttachmentStoragePort, BackendError, NotificationPort, StoredObject};
use studio_core::storage::{public_url, Attachment, AttachmentOwner, ObjectKey, StorageUrlError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AttachmentError {
    #[error(transparent)]
    Url(#[from] StorageUrlError),
    #[error(transparent)]
    Backend(#[from] BackendError),
}

pub struct ManageAttachments {
    storage: Arc<dyn AttachmentStoragePort>,
    notifier: Arc<dyn NotificationPort>,
    backend_url: String,
    bucket: String,
}

impl ManageAttachments {
    pub fn from_ports(
        storage: Arc<dyn AttachmentStoragePort>,
        notifier: Arc<dyn NotificationPort>,
        config: &AppConfig,
    ) -> Self {
        Self {
            storage,
            notifier,
            backend_url: config.backend_url.clone(),
            bucket: config.attachment_bucket.clone(),
        }
    }

    pub fn public_url(&self, key: &ObjectKey) -> Result<String, StorageUrlError> {
        public_url(&self.backend_url, &self.bucket, key)
    }

    fn describe(&self, object: StoredObject) -> Result<Attachment, StorageUrlError> {
        Ok(Attachment {
            public_url: self.public_url(&object.key)?,
            file_name: object.key.file_name().to_string(),
            key: object.key,
            size: object.size,
            content_type: object.content_type,
        })
    }

    pub async fn upload(
        &self,
        owner: &AttachmentOwner,
        file_name: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<Attachment, AttachmentError> {
        let key = ObjectKey::new(owner, file_name)?;
        let size = bytes.len() as u64;
        let span = info_span!("usecase.attachments.upload", key = %key, size);
        let result = self
            .storage
            .upload(&key, bytes, content_type)
            .instrument(span)
            .await;
        if let Err(err) = result {
            warn!(error = %err, key = %key, "attachment upload failed");
            self.notifier
                .notify(Toast::error("Upload failed", err.to_string()));
            return Err(err.into());
        }
        self.notifier.notify(Toast::success(format!("Uploaded {file_name}")));
        Ok(self.describe(StoredObject {
            key,
            size: Some(size),
            content_type: Some(content_type.to_string()),
        })?)
    }

    pub async fn list(&self, owner: &AttachmentOwner) -> Result<Vec<Attachment>, AttachmentError> {
        let span = info_span!("usecase.attachments.list", owner = %owner.prefix());
        let objects = self.storage.list(owner).instrument(span).await?;
        objects
            .into_iter()
            .map(|object| self.describe(object).map_err(AttachmentError::from))
            .collect()
    }

    pub async fn download(&self, key: &ObjectKey) -> Result<Vec<u8>, AttachmentError> {
        let span = info_span!("usecase.attachments.download", key = %key);
        Ok(self.storage.download(key).instrument(span).await?)
    }

    pub async fn remove(&self, key: &ObjectKey) -> Result<(), AttachmentError> {
        let span = info_span!("usecase.attachments.remove", key = %key);
        match self.storage.remove(key).instrument(span).await {
            Ok(()) => {
                self.notifier.notify(Toast::success("Attachment removed"));
                Ok(())
            }
            Err(err) => {
                self.notifier
                    .notify(Toast::error("Could not remove attachment", err.to_string()));
                Err(err.into())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::RecordingNotifier;
    use std::collections::BTreeMap;
    use std::path::PathBuf;
    use std::sync::Mutex;
    use studio_core::ids::{ProjectId, TaskId};
    use studio_core::notification::ToastLevel;

    #[derive(Default)]
    struct MemoryStorage {
        objects: Mutex<BTreeMap<String, (Vec<u8>, String)>>,
        offline: bool,
    }

    #[async_trait::async_trait]
    impl AttachmentStoragePort for MemoryStorage {
        async fn upload(
            &self,
            key: &ObjectKey,
            bytes: Vec<u8>,
            content_type: &str,
        ) -> Result<(), BackendError> {
            if self.offline {
                return Err(BackendError::Network("offline".into()));
            }
            self.objects
                .lock()
                .unwrap()
                .insert(key.to_string(), (bytes, content_type.to_string()));
            Ok(())
        }

        async fn download(&self, key: &ObjectKey) -> Result<Vec<u8>, BackendError> {
            self.objects
                .lock()
                .unwrap()
                .get(key.as_str())
                .map(|(bytes, _)| bytes.clone())
                .ok_or(BackendError::NotFound)
        }

        async fn list(&self, owner: &AttachmentOwner) -> Result<Vec<StoredObject>, BackendError> {
            let prefix = owner.prefix();
            self.objects
                .lock()
                .unwrap()
                .iter()
                .filter(|(key, _)| key.starts_with(&prefix))
                .map(|(key, (bytes, content_type))| {
                    Ok(StoredObject {
                        key: ObjectKey::parse(key).map_err(|e| BackendError::Decode(e.to_string()))?,
                        size: Some(bytes.len() as u64),
                        content_type: Some(content_type.clone()),
                    })
                })
                .collect()
        }

        async fn remove(&self, key: &ObjectKey) -> Result<(), BackendError> {
            self.objects
                .lock()
                .unwrap()
                .remove(key.as_str())
                .map(|_| ())
                .ok_or(BackendError::NotFound)
        }
    }

    fn config() -> AppConfig {
        let mut config = AppConfig::with_system_defaults(PathBuf::from("/tmp/studio"));
        config.backend_url = "https://demo.supabase.co".into();
        config
    }

    #[tokio::test]
    async fn upload_list_download_remove() {
        let storage = Arc::new(MemoryStorage::default());
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = ManageAttachments::from_ports(storage, notifier.clone(), &config());
        let task = AttachmentOwner::Task(TaskId::new("t1"));

        let uploaded = use_case
            .upload(&task, "mood board.png", vec![1, 2, 3], "image/png")
            .await
            .unwrap();
        assert_eq!(uploaded.key.as_str(), "tasks/t1/mood board.png");
        assert_eq!(
            uploaded.public_url,
            "https://demo.supabase.co/storage/v1/object/public/attachments/tasks/t1/mood%20board.png"
        );

        let listed = use_case.list(&task).await.unwrap();
        assert_eq!(listed, vec![uploaded.clone()]);
        assert!(use_case
            .list(&AttachmentOwner::Project(ProjectId::new("t1")))
            .await
            .unwrap()
            .is_empty());

        assert_eq!(use_case.download(&uploaded.key).await.unwrap(), vec![1, 2, 3]);
        use_case.remove(&uploaded.key).await.unwrap();
        assert_eq!(
            use_case.download(&uploaded.key).await,
            Err(AttachmentError::Backend(BackendError::NotFound))
        );
        assert!(notifier.taken().iter().all(|t| t.level == ToastLevel::Success));
    }

    #[tokio::test]
    async fn invalid_names_never_reach_storage() {
        let storage = Arc::new(MemoryStorage::default());
        let use_case = ManageAttachments::from_ports(
            storage.clone(),
            Arc::new(RecordingNotifier::default()),
            &config(),
        );
        let owner = AttachmentOwner::Task(TaskId::new("t1"));
        assert_eq!(
            use_case.upload(&owner, "", vec![], "text/plain").await,
            Err(AttachmentError::Url(StorageUrlError::EmptyFileName))
        );
        assert!(storage.objects.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upload_failure_toasts_an_error() {
        let storage = Arc::new(MemoryStorage {
            offline: true,
            ..Default::default()
        });
        let notifier = Arc::new(RecordingNotifier::default());
        let use_case = ManageAttachments::from_ports(storage, notifier.clone(), &config());
        let owner = AttachmentOwner::Project(ProjectId::new("p1"));
        assert!(use_case.upload(&owner, "plan.pdf", vec![0], "application/pdf").await.is_err());
        assert_eq!(notifier.taken()[0].level, ToastLevel::Error);
    }
}
