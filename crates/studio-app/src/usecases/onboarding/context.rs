use std::sync::Arc;

use tokio::sync::Mutex;
use studio_core::onboarding::OnboardingState;

/// Shared wizard context: the current state plus the dispatch lock.
///
/// ## Lock Ordering
/// Acquire `dispatch_lock` first, then `state`.
/// - `dispatch_lock`: held for a whole transition + action execution.
/// - `state`: short reads (`get_state`) and one write per transition, made
///   before that transition's actions run.
#[derive(Clone)]
pub struct OnboardingContext {
    state: Arc<Mutex<OnboardingState>>,
    dispatch_lock: Arc<Mutex<()>>,
}

impl OnboardingContext {
    pub fn new(initial_state: OnboardingState) -> Self {
        Self {
            state: Arc::new(Mutex::new(initial_state)),
            dispatch_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn arc(self) -> Arc<Self> {
        Arc::new(self)
    }

    /// Does not take `dispatch_lock`.
    pub async fn get_state(&self) -> OnboardingState {
        self.state.lock().await.clone()
    }

    pub async fn acquire_dispatch_lock(&self) -> tokio::sync::MutexGuard<'_, ()> {
        self.dispatch_lock.lock().await
    }

    /// Only call while holding `dispatch_lock`.
    pub async fn set_state(&self, state: OnboardingState) {
        *self.state.lock().await = state;
    }
}

impl Default for OnboardingContext {
    fn default() -> Self {
        Self::new(OnboardingState::initial())
    }
}
