//! Centralized session context.
//!
//! One owned store for the signed-in user and their team, replacing per-screen
//! fetches. Reads never fetch; refreshes are serialized and replace the
//! snapshot atomically; a failed refresh leaves the previous snapshot intact.

use std::sync::Arc;

use tokio::sync::{Mutex, RwLock};
use tracing::{info, info_span, warn, Instrument};

use studio_core::ports::{BackendError, ClockPort, SessionPort};
use studio_core::session::SessionSnapshot;

pub struct SessionContext {
    port: Arc<dyn SessionPort>,
    clock: Arc<dyn ClockPort>,
    snapshot: RwLock<Option<Arc<SessionSnapshot>>>,
    refresh_lock: Mutex<()>,
}

impl SessionContext {
    pub fn from_ports(port: Arc<dyn SessionPort>, clock: Arc<dyn ClockPort>) -> Self {
        Self {
            port,
            clock,
            snapshot: RwLock::new(None),
            refresh_lock: Mutex::new(()),
        }
    }

    /// Current snapshot, if one has been loaded.
    pub async fn snapshot(&self) -> Option<Arc<SessionSnapshot>> {
        self.snapshot.read().await.clone()
    }

    pub async fn refresh(&self) -> Result<Arc<SessionSnapshot>, BackendError> {
        let _guard = self.refresh_lock.lock().await;
        self.load().await
    }

    /// Return the loaded snapshot, fetching only if none exists yet.
    pub async fn ensure_loaded(&self) -> Result<Arc<SessionSnapshot>, BackendError> {
        if let Some(snapshot) = self.snapshot().await {
            return Ok(snapshot);
        }
        let _guard = self.refresh_lock.lock().await;
        // Another caller may have loaded while we waited.
        if let Some(snapshot) = self.snapshot().await {
            return Ok(snapshot);
        }
        self.load().await
    }

    /// Forget the session (sign-out).
    pub async fn clear(&self) {
        let _guard = self.refresh_lock.lock().await;
        *self.snapshot.write().await = None;
    }

    /// Caller must hold `refresh_lock`.
    async fn load(&self) -> Result<Arc<SessionSnapshot>, BackendError> {
        let span = info_span!("usecase.session_context.load");
        async {
            let (current_user, team) =
                futures::try_join!(self.port.current_user(), self.port.team_members())
                    .inspect_err(|err| warn!(error = %err, "session refresh failed"))?;
            let team = team
                .into_iter()
                .filter(|member| member.id != current_user.id)
                .collect::<Vec<_>>();
            info!(user_id = %current_user.id, team = team.len(), "session loaded");
            let snapshot = Arc::new(SessionSnapshot {
                current_user,
                team,
                loaded_at: self.clock.now(),
            });
            *self.snapshot.write().await = Some(snapshot.clone());
            Ok(snapshot)
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::usecases::test_support::FixedClock;
    use chrono::Utc;
    use async_trait::async_trait;
    use mockall::mock;
    use mockall::Sequence;
    use studio_core::ids::UserId;
    use studio_core::records::{User, UserRole};

    mock! {
        pub Session {}

        #[async_trait]
        impl SessionPort for Session {
            async fn current_user(&self) -> Result<User, BackendError>;
            async fn team_members(&self) -> Result<Vec<User>, BackendError>;
        }
    }

    fn user(id: &str, role: UserRole) -> User {
        User {
            id: UserId::new(id),
            full_name: format!("Member {id}"),
            email: format!("{id}@studio.test"),
            role,
            avatar_path: None,
        }
    }

    fn context(port: MockSession) -> SessionContext {
        SessionContext::from_ports(Arc::new(port), Arc::new(FixedClock(Utc::now())))
    }

    #[tokio::test]
    async fn snapshot_is_empty_until_loaded_and_excludes_self_from_team() {
        let mut port = MockSession::new();
        port.expect_current_user()
            .returning(|| Ok(user("me", UserRole::Owner)));
        port.expect_team_members()
            .returning(|| Ok(vec![user("me", UserRole::Owner), user("c1", UserRole::Coach)]));
        let ctx = context(port);

        assert!(ctx.snapshot().await.is_none());
        let snapshot = ctx.refresh().await.unwrap();
        assert_eq!(snapshot.current_user.id, UserId::new("me"));
        assert_eq!(snapshot.team.len(), 1);
        assert_eq!(ctx.snapshot().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn concurrent_ensure_loaded_fetches_once() {
        let mut port = MockSession::new();
        port.expect_current_user()
            .times(1)
            .returning(|| Ok(user("me", UserRole::Admin)));
        port.expect_team_members().times(1).returning(|| Ok(vec![]));
        let ctx = context(port);

        let results = futures::future::join_all((0..4).map(|_| ctx.ensure_loaded())).await;
        assert!(results.iter().all(|r| r.is_ok()));
    }

    #[tokio::test]
    async fn failed_refresh_keeps_previous_snapshot() {
        let mut port = MockSession::new();
        let mut seq = Sequence::new();
        port.expect_current_user()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Ok(user("me", UserRole::Member)));
        port.expect_current_user()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|| Err(BackendError::Unauthorized));
        port.expect_team_members().returning(|| Ok(vec![]));
        let ctx = context(port);

        let first = ctx.refresh().await.unwrap();
        assert_eq!(ctx.refresh().await, Err(BackendError::Unauthorized));
        assert_eq!(ctx.snapshot().await, Some(first));
    }

    #[tokio::test]
    async fn clear_forgets_the_session() {
        let mut port = MockSession::new();
        port.expect_current_user()
            .returning(|| Ok(user("me", UserRole::Member)));
        port.expect_team_members().returning(|| Ok(vec![]));
        let ctx = context(port);
        ctx.ensure_loaded().await.unwrap();
        ctx.clear().await;
        assert!(ctx.snapshot().await.is_none());
    }
}
