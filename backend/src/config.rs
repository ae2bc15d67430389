use std::path::Path;

use anyhow::{Context, Result};
use common::logger::LogFormat;
use reward::DayBoundary;

/// Shared demo password used when no secret is configured.
pub const DEFAULT_PASSWORD: &str = "r2isthebest";

/// Default location of the mounted password secret.
pub const DEFAULT_PASSWORD_FILE: &str = "/run/secrets/app_password";

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Zone whose midnight starts a new counting day for the win limiter.
    ///
    /// Env: `LUCK_TIMEZONE` (`UTC`, `Z`, `+HH:MM`, `-HH:MM`). Defaults to UTC
    /// so the day boundary never depends on the host's local zone.
    pub day_boundary: DayBoundary,

    /// Password every login is checked against.
    ///
    /// Resolution order:
    /// - `APP_PASSWORD`
    /// - contents of `APP_PASSWORD_FILE` (must exist when set)
    /// - contents of `/run/secrets/app_password` if present
    /// - [`DEFAULT_PASSWORD`]
    pub password: String,

    /// JSON logs when `APP_ENV=production`.
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn new(day_boundary: DayBoundary, password: impl Into<String>) -> Self {
        Self {
            day_boundary,
            password: password.into(),
            log_format: LogFormat::Pretty,
        }
    }

    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let day_boundary = match lookup("LUCK_TIMEZONE") {
            Some(raw) if !raw.trim().is_empty() => raw
                .parse::<DayBoundary>()
                .with_context(|| format!("Invalid LUCK_TIMEZONE {raw:?}"))?,
            _ => DayBoundary::utc(),
        };

        let password = load_password(lookup("APP_PASSWORD"), lookup("APP_PASSWORD_FILE"))?;

        let is_production = lookup("APP_ENV").as_deref() == Some("production");

        Ok(Self {
            day_boundary,
            password,
            log_format: LogFormat::for_env(is_production),
        })
    }

    /// Installs the process-wide tracing subscriber in the configured format.
    pub fn init_logging(&self) {
        common::logger::init_logger("backend", self.log_format);
    }
}

fn load_password(inline: Option<String>, file: Option<String>) -> Result<String> {
    if let Some(password) = inline.filter(|p| !p.is_empty()) {
        return Ok(password);
    }

    if let Some(path) = file {
        return read_secret(&path);
    }

    if Path::new(DEFAULT_PASSWORD_FILE).exists() {
        return read_secret(DEFAULT_PASSWORD_FILE);
    }

    tracing::warn!("no password configured; falling back to the built-in demo password");
    Ok(DEFAULT_PASSWORD.to_string())
}

fn read_secret(path: &str) -> Result<String> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read password file {path}"))?;

    let password = raw.trim();
    if password.is_empty() {
        anyhow::bail!("Password file {path} is empty");
    }
    Ok(password.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn temp_secret(contents: &str) -> std::path::PathBuf {
        let path = std::env::temp_dir().join(format!("app_password_{}", uuid::Uuid::new_v4()));
        std::fs::write(&path, contents).unwrap();
        path
    }

    #[test]
    fn inline_password_and_timezone() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("APP_PASSWORD", "hunter2"),
            ("LUCK_TIMEZONE", "+02:00"),
        ]))
        .unwrap();

        assert_eq!(cfg.password, "hunter2");
        assert_eq!(cfg.day_boundary.offset().local_minus_utc(), 7200);
        assert_eq!(cfg.log_format, LogFormat::Pretty);
    }

    #[test]
    fn timezone_defaults_to_utc() {
        let cfg = AppConfig::from_lookup(lookup_from(&[("APP_PASSWORD", "x")])).unwrap();
        assert_eq!(cfg.day_boundary, DayBoundary::utc());

        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("APP_PASSWORD", "x"),
            ("LUCK_TIMEZONE", "  "),
        ]))
        .unwrap();
        assert_eq!(cfg.day_boundary, DayBoundary::utc());
    }

    #[test]
    fn bad_timezone_is_reported() {
        let err = AppConfig::from_lookup(lookup_from(&[
            ("APP_PASSWORD", "x"),
            ("LUCK_TIMEZONE", "Mars/Olympus"),
        ]))
        .unwrap_err();

        assert!(format!("{err:?}").contains("LUCK_TIMEZONE"));
    }

    #[test]
    fn password_file_is_trimmed() {
        let path = temp_secret("  from-file\n");
        let cfg = AppConfig::from_lookup(lookup_from(&[(
            "APP_PASSWORD_FILE",
            path.to_str().unwrap(),
        )]))
        .unwrap();

        assert_eq!(cfg.password, "from-file");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn inline_password_wins_over_file() {
        let path = temp_secret("from-file");
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("APP_PASSWORD", "inline"),
            ("APP_PASSWORD_FILE", path.to_str().unwrap()),
        ]))
        .unwrap();

        assert_eq!(cfg.password, "inline");
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn missing_password_file_is_an_error() {
        let err = AppConfig::from_lookup(lookup_from(&[(
            "APP_PASSWORD_FILE",
            "/definitely/not/here/app_password",
        )]))
        .unwrap_err();

        assert!(format!("{err:?}").contains("Failed to read password file"));
    }

    #[test]
    fn empty_password_file_is_an_error() {
        let path = temp_secret("   \n");
        let err = AppConfig::from_lookup(lookup_from(&[(
            "APP_PASSWORD_FILE",
            path.to_str().unwrap(),
        )]))
        .unwrap_err();

        assert!(err.to_string().contains("is empty"));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn production_selects_json_logs() {
        let cfg = AppConfig::from_lookup(lookup_from(&[
            ("APP_PASSWORD", "x"),
            ("APP_ENV", "production"),
        ]))
        .unwrap();
        assert_eq!(cfg.log_format, LogFormat::Json);
    }
}
