use crate::{constants::MIN_PASSWORD_LENGTH, errors::AuthError};

/// Rules for a new admin password, checked in the order the admin form
/// reports them.
pub fn validate_new_password(new_password: &str, confirm_password: &str) -> Result<(), AuthError> {
    if new_password.chars().count() < MIN_PASSWORD_LENGTH {
        return Err(AuthError::PasswordTooShort(MIN_PASSWORD_LENGTH));
    }

    if new_password != confirm_password {
        return Err(AuthError::PasswordMismatch);
    }

    Ok(())
}
