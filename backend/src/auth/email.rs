use std::str::FromStr;

use email_address::EmailAddress;

use crate::error::AppError;

/// Syntax-checks `raw` and returns the normalised address (domain lowercased).
///
/// No deliverability or DNS checks. Surrounding whitespace is rejected rather
/// than trimmed.
pub fn validate_email(raw: &str) -> Result<String, AppError> {
    if raw.is_empty() {
        return Err(AppError::InvalidEmail("empty address".into()));
    }
    if raw.trim() != raw {
        return Err(AppError::InvalidEmail(
            "address contains leading or trailing whitespace".into(),
        ));
    }

    let email = EmailAddress::from_str(raw).map_err(|e| AppError::InvalidEmail(e.to_string()))?;

    Ok(format!(
        "{}@{}",
        email.local_part(),
        email.domain().to_ascii_lowercase()
    ))
}
