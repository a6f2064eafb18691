//! Keys and helpers for the per-session authentication state.
//!
//! The session is the explicit value threaded through the gate:
//! `NoSession → Active(xsrf token) → Authenticated(xsrf token, signing
//! secret, mirrored JWT, profile id)`. Nothing auth-related lives
//! anywhere else on the server.

use tower_sessions::Session;
use uuid::Uuid;

use crate::error::AppError;

pub const XSRF_TOKEN_KEY: &str = "xsrf.token";
pub const JWT_SECRET_KEY: &str = "auth.secret";
pub const JWT_TOKEN_KEY: &str = "auth.token";
pub const PROFILE_ID_KEY: &str = "auth.profile_id";

/// Store the authenticated state minted at sign-in.
pub async fn establish_auth(
    session: &Session,
    secret: &str,
    token: &str,
    profile_id: Uuid,
) -> Result<(), AppError> {
    session.insert(JWT_SECRET_KEY, secret).await?;
    session.insert(JWT_TOKEN_KEY, token).await?;
    session.insert(PROFILE_ID_KEY, profile_id).await?;
    Ok(())
}

/// Drop the session's authenticated state (token, secret, profile id),
/// leaving the XSRF token in place. Used by the gate when a presented
/// token fails verification: a failed token signs the caller out.
pub async fn clear_auth(session: &Session) -> Result<(), AppError> {
    session.remove::<String>(JWT_TOKEN_KEY).await?;
    session.remove::<String>(JWT_SECRET_KEY).await?;
    session.remove::<Uuid>(PROFILE_ID_KEY).await?;
    Ok(())
}

/// The live session id, as bound into XSRF tokens and JWT `sid` claims.
/// Only available once the session has been persisted.
pub fn session_id(session: &Session) -> Option<String> {
    session.id().map(|id| id.to_string())
}
