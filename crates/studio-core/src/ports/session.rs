use async_trait::async_trait;

use super::BackendError;
use crate::records::User;

/// Who is signed in and who is on their team.
#[async_trait]
pub trait SessionPort: Send + Sync {
    async fn current_user(&self) -> Result<User, BackendError>;

    async fn team_members(&self) -> Result<Vec<User>, BackendError>;
}
