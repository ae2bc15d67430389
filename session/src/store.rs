use std::collections::HashSet;

use common::logger::redact;
use parking_lot::Mutex;
use tracing::{debug, instrument};

use crate::model::{Token, TokenState};

/// In-memory set of active session tokens.
///
/// Tokens carry no expiry and no identity; a token stays valid until it is
/// explicitly removed. All operations are total: removing an unknown token is
/// reported through the return value, never as an error.
#[derive(Default)]
pub struct TokenStore {
    active: Mutex<HashSet<Token>>,
}

impl TokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `token` as active. Adding an already active token is a no-op.
    #[instrument(skip_all, target = "session", fields(token = %redact(token)))]
    pub fn add_token(&self, token: &str) {
        let mut active = self.active.lock();
        let inserted = active.insert(token.to_owned());

        debug!(inserted, active = active.len(), "token added");
    }

    /// Returns `true` if the token was active and is now gone.
    #[instrument(skip_all, target = "session", fields(token = %redact(token)))]
    pub fn remove_token(&self, token: &str) -> bool {
        let mut active = self.active.lock();
        let removed = active.remove(token);

        if removed {
            debug!(active = active.len(), "token removed");
        } else {
            debug!("remove requested for unknown token");
        }
        removed
    }

    pub fn contains_token(&self, token: &str) -> bool {
        self.active.lock().contains(token)
    }

    pub fn state(&self, token: &str) -> TokenState {
        TokenState::from(self.contains_token(token))
    }

    /// Number of active tokens.
    pub fn len(&self) -> usize {
        self.active.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.lock().is_empty()
    }
}
