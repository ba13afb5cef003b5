//! Session commands
//! 会话命令

use tracing::{info_span, Instrument};

use super::dto::SessionDto;
use super::CommandError;
use crate::bootstrap::AppRuntime;

/// Signed-in user and team, loaded once and then served from memory.
pub async fn get_session(runtime: &AppRuntime) -> Result<SessionDto, CommandError> {
    let span = info_span!("command.session.get");
    async {
        let snapshot = runtime.usecases().session_context().ensure_loaded().await?;
        Ok(SessionDto::from(snapshot.as_ref()))
    }
    .instrument(span)
    .await
}

pub async fn refresh_session(runtime: &AppRuntime) -> Result<SessionDto, CommandError> {
    let span = info_span!("command.session.refresh");
    async {
        let snapshot = runtime.usecases().session_context().refresh().await?;
        Ok(SessionDto::from(snapshot.as_ref()))
    }
    .instrument(span)
    .await
}

pub async fn sign_out(runtime: &AppRuntime) -> Result<(), CommandError> {
    let span = info_span!("command.session.sign_out");
    async {
        runtime.usecases().session_context().clear().await;
        Ok(())
    }
    .instrument(span)
    .await
}
