//! Attachment commands for tasks and projects
//! 任务与项目附件命令

use tracing::{info_span, Instrument};

use studio_core::storage::{Attachment, AttachmentOwner, ObjectKey};

use super::CommandError;
use crate::bootstrap::AppRuntime;

pub async fn upload_attachment(
    runtime: &AppRuntime,
    owner: AttachmentOwner,
    file_name: String,
    bytes: Vec<u8>,
    content_type: String,
) -> Result<Attachment, CommandError> {
    let span = info_span!(
        "command.attachments.upload",
        owner = %owner.prefix(),
        file_name = %file_name
    );
    async {
        let uc = runtime.usecases().manage_attachments();
        Ok(uc.upload(&owner, &file_name, bytes, &content_type).await?)
    }
    .instrument(span)
    .await
}

pub async fn list_attachments(
    runtime: &AppRuntime,
    owner: AttachmentOwner,
) -> Result<Vec<Attachment>, CommandError> {
    let span = info_span!("command.attachments.list", owner = %owner.prefix());
    async { Ok(runtime.usecases().manage_attachments().list(&owner).await?) }
        .instrument(span)
        .await
}

pub async fn download_attachment(
    runtime: &AppRuntime,
    key: String,
) -> Result<Vec<u8>, CommandError> {
    let span = info_span!("command.attachments.download", key = %key);
    async {
        let key = ObjectKey::parse(&key)?;
        Ok(runtime.usecases().manage_attachments().download(&key).await?)
    }
    .instrument(span)
    .await
}

pub async fn remove_attachment(runtime: &AppRuntime, key: String) -> Result<(), CommandError> {
    let span = info_span!("command.attachments.remove", key = %key);
    async {
        let key = ObjectKey::parse(&key)?;
        Ok(runtime.usecases().manage_attachments().remove(&key).await?)
    }
    .instrument(span)
    .await
}

/// Browser-loadable URL for a stored object; no request is made.
pub fn attachment_url(runtime: &AppRuntime, key: String) -> Result<String, CommandError> {
    let key = ObjectKey::parse(&key)?;
    Ok(runtime.usecases().manage_attachments().public_url(&key)?)
}
