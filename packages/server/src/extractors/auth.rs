use axum::{extract::FromRequestParts, http::request::Parts};
use jsonwebtoken::errors::ErrorKind;
use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;
use crate::session;
use crate::utils::jwt;

/// Header carrying the signed session token in both directions.
pub const JWT_HEADER: &str = "X-JWT-TOKEN";

/// Authenticated profile extracted from the `X-JWT-TOKEN` header.
///
/// Add this as a handler parameter to require authentication. The
/// presented token must match the session's mirrored copy, verify
/// against the session's signing secret, and still be within its expiry
/// window with its `sid` claim naming the live session. Each failing
/// check maps to its own status code, and any failure past "header
/// present" signs the session out.
pub struct AuthProfile {
    pub profile_id: Uuid,
    pub at_handle: String,
}

impl AuthProfile {
    /// Returns `Ok(())` when the caller owns the given profile,
    /// `Err(PermissionDenied)` otherwise.
    pub fn require_owner(&self, profile_id: Uuid) -> Result<(), AppError> {
        if self.profile_id == profile_id {
            Ok(())
        } else {
            Err(AppError::PermissionDenied)
        }
    }
}

impl<S> FromRequestParts<S> for AuthProfile
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let session = Session::from_request_parts(parts, state)
            .await
            .map_err(|(_, msg)| AppError::Internal(format!("Session unavailable: {msg}")))?;

        let presented = parts
            .headers
            .get(JWT_HEADER)
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::TokenMissing)?
            .to_owned();

        match verify_against_session(&session, &presented).await {
            Ok(claims) => Ok(AuthProfile {
                profile_id: claims.sub,
                at_handle: claims.handle,
            }),
            Err(err) => {
                // A token that fails any check is burned: drop the
                // session's copy so the caller is signed out.
                if let Err(clear_err) = session::clear_auth(&session).await {
                    tracing::warn!("Failed to clear session auth state: {clear_err:?}");
                }
                Err(err)
            }
        }
    }
}

async fn verify_against_session(
    session: &Session,
    presented: &str,
) -> Result<jwt::Claims, AppError> {
    if jsonwebtoken::decode_header(presented).is_err() {
        return Err(AppError::TokenMalformed);
    }

    let mirrored: Option<String> = session.get(session::JWT_TOKEN_KEY).await?;
    if mirrored.as_deref() != Some(presented) {
        return Err(AppError::TokenMismatch);
    }

    let secret: String = session
        .get(session::JWT_SECRET_KEY)
        .await?
        .ok_or(AppError::TokenMismatch)?;

    let claims = jwt::verify(presented, &secret).map_err(|e| match e.kind() {
        ErrorKind::InvalidSignature => AppError::TokenSignature,
        ErrorKind::ExpiredSignature | ErrorKind::InvalidIssuer | ErrorKind::InvalidAudience => {
            AppError::TokenExpired
        }
        _ => AppError::TokenMalformed,
    })?;

    if session::session_id(session).as_deref() != Some(claims.sid.as_str()) {
        return Err(AppError::TokenExpired);
    }

    Ok(claims)
}
