use common::validate::{AtHandle, EmailAddress, Phone, WebUrl};
use serde::Deserialize;

use crate::error::AppError;

pub const PASSWORD_MIN_LEN: usize = 8;
pub const PASSWORD_MAX_LEN: usize = 128;

/// Request body for sign-up.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SignUpRequest {
    /// Unique at-handle (`@` plus 1-31 letters, digits, underscores).
    #[schema(example = "@phpunit")]
    pub at_handle: String,
    #[schema(example = "test@phpunit.de")]
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    /// Password (8-128 characters).
    pub password: String,
    /// Must match `password` exactly.
    pub password_confirm: String,
}

/// The fully-validated field set of a sign-up request. Construction is
/// all-or-nothing: the first failing field aborts, nothing partial
/// escapes.
pub struct ValidatedSignUp {
    pub at_handle: AtHandle,
    pub email: EmailAddress,
    pub phone: Option<Phone>,
    pub avatar_url: Option<WebUrl>,
}

pub fn validate_sign_up(payload: &SignUpRequest) -> Result<ValidatedSignUp, AppError> {
    let at_handle = AtHandle::parse(&payload.at_handle)?;
    let email = EmailAddress::parse(&payload.email)?;
    let phone = payload.phone.as_deref().map(Phone::parse).transpose()?;
    let avatar_url = payload
        .avatar_url
        .as_deref()
        .map(WebUrl::parse)
        .transpose()?;

    validate_password(&payload.password)?;
    if payload.password != payload.password_confirm {
        return Err(AppError::Validation(
            "Password confirmation does not match".into(),
        ));
    }

    Ok(ValidatedSignUp {
        at_handle,
        email,
        phone,
        avatar_url,
    })
}

/// Passwords are only ever bounded here; everything past this point
/// sees the Argon2 hash, never the password.
pub fn validate_password(password: &str) -> Result<(), AppError> {
    if password.len() < PASSWORD_MIN_LEN || password.len() > PASSWORD_MAX_LEN {
        return Err(AppError::Range(format!(
            "Password must be {PASSWORD_MIN_LEN}-{PASSWORD_MAX_LEN} characters"
        )));
    }
    Ok(())
}

/// Request body for sign-in.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct SignInRequest {
    #[schema(example = "test@phpunit.de")]
    pub email: String,
    pub password: String,
}

pub fn validate_sign_in(payload: &SignInRequest) -> Result<EmailAddress, AppError> {
    let email = EmailAddress::parse(&payload.email)?;
    if payload.password.is_empty() {
        return Err(AppError::Validation("Password must not be empty".into()));
    }
    Ok(email)
}
