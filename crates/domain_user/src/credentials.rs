//! Credential rules

use validator::ValidateEmail;

use crate::error::UserError;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Canonical form used for storage and lookups
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// RFC-shaped address whose domain has at least one dot
pub fn validate_email(email: &str) -> Result<(), UserError> {
    let dotted_domain = email
        .rsplit_once('@')
        .map(|(_, domain)| domain.split('.').count() > 1 && !domain.split('.').any(str::is_empty))
        .unwrap_or(false);
    if !dotted_domain || !email.validate_email() {
        return Err(UserError::InvalidEmail);
    }
    Ok(())
}

pub fn validate_password(password: &str) -> Result<(), UserError> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(UserError::PasswordTooShort);
    }
    Ok(())
}
