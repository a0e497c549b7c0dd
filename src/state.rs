use std::sync::Arc;

use crate::notify::Notifier;
use crate::store::MessageStore;

pub type SharedState = Arc<AppState>;

/// Handles shared by every request. Built once at startup.
pub struct AppState {
    pub store: Arc<dyn MessageStore>,
    pub notifier: Arc<dyn Notifier>,
}
