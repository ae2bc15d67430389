use std::sync::Arc;

use common::logger::{child_span, redact, root_span, TraceId};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reward::WinLimiter;
use session::TokenStore;
use tracing::{field, info, warn};

use crate::auth::{check_password, generate_token, validate_email};
use crate::config::AppConfig;
use crate::error::AppError;

/// Process-wide service state: configuration, active tokens and the daily
/// win limiter. Built once at startup and shared behind an [`Arc`].
pub struct AppState {
    pub config: AppConfig,
    pub tokens: TokenStore,
    pub limiter: WinLimiter,
    // Draws lock rng before the limiter's counter; never the other way round.
    rng: Mutex<StdRng>,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let limiter = WinLimiter::new(config.day_boundary);
        Self::with_parts(config, limiter, StdRng::from_os_rng())
    }

    /// Full control over the clock (via `limiter`) and the random source.
    pub fn with_parts(config: AppConfig, limiter: WinLimiter, rng: StdRng) -> Self {
        Self {
            config,
            tokens: TokenStore::new(),
            limiter,
            rng: Mutex::new(rng),
        }
    }

    pub fn shared(self) -> SharedState {
        Arc::new(self)
    }

    /// Validates the credentials and issues a new active token.
    pub fn login(&self, email: &str, password: &str) -> Result<String, AppError> {
        let span = root_span("login", &TraceId::default());
        let _enter = span.enter();

        let email = validate_email(email).inspect_err(|e| {
            warn!(error = %e, "login rejected: bad email");
        })?;

        if !check_password(&self.config, password) {
            warn!(%email, "login rejected: bad credentials");
            return Err(AppError::InvalidCredentials);
        }

        let token = generate_token();
        self.tokens.add_token(&token);
        span.record("token", field::display(redact(&token)));

        info!(%email, "login succeeded");
        Ok(token)
    }

    /// Invalidates `token`. Logging out an unknown or already revoked token is
    /// reported as [`AppError::InvalidToken`].
    pub fn logout(&self, token: &str) -> Result<(), AppError> {
        let span = root_span("logout", &TraceId::default());
        let _enter = span.enter();
        span.record("token", field::display(redact(token)));

        if !self.tokens.remove_token(token) {
            warn!("logout rejected: token not active");
            return Err(AppError::InvalidToken);
        }

        info!("logout succeeded");
        Ok(())
    }

    pub fn authorize(&self, token: &str) -> Result<(), AppError> {
        if self.tokens.contains_token(token) {
            Ok(())
        } else {
            Err(AppError::InvalidToken)
        }
    }

    /// Authorizes `token`, then runs one atomic draw against today's counter.
    pub fn try_luck(&self, token: &str) -> Result<bool, AppError> {
        let span = root_span("try_luck", &TraceId::default());
        let _enter = span.enter();
        span.record("token", field::display(redact(token)));

        self.authorize(token).inspect_err(|_| {
            warn!("draw rejected: token not active");
        })?;

        let outcome = {
            let _draw = child_span("draw").entered();
            let mut rng = self.rng.lock();
            self.limiter.draw(&mut *rng)
        };

        info!(
            win = outcome.win,
            wins_before = outcome.wins_before,
            date = %outcome.date,
            "luck tried"
        );
        Ok(outcome.win)
    }

    pub fn wins_today(&self) -> u32 {
        self.limiter.get_today_wins()
    }
}
