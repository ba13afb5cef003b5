use anyhow::Context;
use tracing::{info, warn};

use studio_core::records::{User, UserRole};
use studio_core::UserId;
use studio_host::bootstrap::tracing::init_tracing_subscriber;
use studio_host::bootstrap::{resolve_config, wire_dependencies, AppRuntime, BackendMode};
use studio_host::commands::{onboarding, session};

fn local_owner() -> User {
    User {
        id: UserId::new("local-owner"),
        full_name: "Studio Owner".into(),
        email: "owner@studio.local".into(),
        role: UserRole::Owner,
        avatar_path: None,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = resolve_config(None).context("Failed to load configuration")?;
    init_tracing_subscriber(&config.logs_dir())?;

    let mode = BackendMode::for_config(&config, local_owner);
    info!(
        offline = matches!(mode, BackendMode::Offline { .. }),
        data_dir = %config.data_dir.display(),
        "starting studiodesk"
    );
    let wired = wire_dependencies(&config, mode)?;
    let runtime = AppRuntime::new(config, wired);

    // An unreadable status file only costs the user a second pass through the wizard.
    let completed = match onboarding::get_onboarding_status(&runtime).await {
        Ok(status) if status.has_completed => {
            info!(organization_id = ?status.organization_id, "onboarding already completed");
            true
        }
        Ok(_) => false,
        Err(err) => {
            warn!(code = err.code, error = %err.message, "onboarding status unreadable");
            false
        }
    };
    if !completed {
        let state = onboarding::get_onboarding_state(&runtime).await?;
        info!(step = state.current_step, "onboarding wizard pending");
    }

    match session::get_session(&runtime).await {
        Ok(me) => info!(user = %me.current_user.full_name, team = me.team.len(), "session loaded"),
        Err(err) => warn!(code = err.code, error = %err.message, "session unavailable"),
    }

    Ok(())
}
