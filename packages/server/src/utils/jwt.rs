use anyhow::Result;
use chrono::{Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const ISSUER: &str = "chirp-api";
pub const AUDIENCE: &str = "chirp-web";

/// Tokens are bound 1:1 to a server-side session and expire on their own
/// an hour after issuance.
const TOKEN_TTL_HOURS: i64 = 1;

/// JWT Claims structure.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,      // Profile ID
    pub handle: String, // At-handle, for display without a lookup
    pub sid: String,    // Session the token is bound to
    pub iss: String,
    pub aud: String,
    pub iat: usize,
    pub exp: usize,
}

/// Mint a per-session signing secret: 32 random bytes, hex-encoded for
/// session storage. Never leaves the server.
pub fn mint_secret() -> String {
    let mut secret = [0u8; 32];
    rand::rng().fill_bytes(&mut secret);
    hex::encode(secret)
}

/// Sign a new token for a profile, keyed to the session's secret.
pub fn sign(profile_id: Uuid, handle: &str, session_id: &str, secret: &str) -> Result<String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
        .expect("valid timestamp")
        .timestamp();

    let claims = Claims {
        sub: profile_id,
        handle: handle.to_owned(),
        sid: session_id.to_owned(),
        iss: ISSUER.to_owned(),
        aud: AUDIENCE.to_owned(),
        iat: now.timestamp() as usize,
        exp: expiration as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

/// Verify and decode a token against a session's secret.
///
/// The raw jsonwebtoken error is returned so the caller can report which
/// check failed (signature vs expiry vs structure) as distinct statuses.
pub fn verify(token: &str, secret: &str) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.set_issuer(&[ISSUER]);
    validation.set_audience(&[AUDIENCE]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )?;
    Ok(token_data.claims)
}
