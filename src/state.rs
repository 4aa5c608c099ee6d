use std::sync::Arc;

use crate::config::Config;
use crate::notifier::InvitationNotifier;

/// Shared application state, read-only after startup
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub notifier: Arc<InvitationNotifier>,
}

impl AppState {
    pub fn new(config: Config, notifier: InvitationNotifier) -> Self {
        Self {
            config: Arc::new(config),
            notifier: Arc::new(notifier),
        }
    }
}
