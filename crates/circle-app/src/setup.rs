use std::sync::Arc;

use circle_auth::LoginFlowController;
use circle_core::config::AppConfig;

use crate::directory::OfflineDirectory;

/// Build a login controller backed by the offline account directory.
pub fn create_controller(config: &AppConfig) -> LoginFlowController {
    if config.accounts.is_empty() {
        tracing::warn!("No accounts configured, every login will be rejected");
    }
    let directory = Arc::new(OfflineDirectory::from_config(config));
    LoginFlowController::new(directory.clone(), directory)
}
