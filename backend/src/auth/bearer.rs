use crate::error::AppError;

const SCHEME: &str = "Bearer ";

/// Extracts the token from an `Authorization: Bearer <token>` header value.
pub fn bearer_token(header: Option<&str>) -> Result<&str, AppError> {
    let token = header
        .and_then(|h| h.strip_prefix(SCHEME))
        .map(str::trim)
        .ok_or(AppError::MissingToken)?;

    if token.is_empty() {
        return Err(AppError::MissingToken);
    }
    Ok(token)
}
