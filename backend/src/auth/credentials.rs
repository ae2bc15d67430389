use uuid::Uuid;

use crate::config::AppConfig;

/// Demo credential check: every account shares the configured password.
pub fn check_password(cfg: &AppConfig, candidate: &str) -> bool {
    candidate == cfg.password
}

/// Fresh opaque session token.
pub fn generate_token() -> String {
    Uuid::new_v4().to_string()
}
