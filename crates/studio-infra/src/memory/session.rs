use async_trait::async_trait;
use studio_core::ports::SessionPort;
use studio_core::records::User;
use studio_core::BackendError;

/// A fixed signed-in user and team.
pub struct StaticSession {
    current: User,
    team: Vec<User>,
}

impl StaticSession {
    pub fn new(current: User, team: Vec<User>) -> Self {
        Self { current, team }
    }
}

#[async_trait]
impl SessionPort for StaticSession {
    async fn current_user(&self) -> Result<User, BackendError> {
        Ok(self.current.clone())
    }

    async fn team_members(&self) -> Result<Vec<User>, BackendError> {
        Ok(self.team.clone())
    }
}
