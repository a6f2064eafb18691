use axum::{extract::{Path, State}, http::StatusCode, response::IntoResponse};
use common::ident::generate_identity;
use common::validate::{ActivationToken, PasswordHashString, Phone, WebUrl};
use rand::RngCore;
use sea_orm::*;
use tower_sessions::Session;
use tracing::instrument;

use crate::entity::profile;
use crate::error::{AppError, StatusBody};
use crate::extractors::auth::{AuthProfile, JWT_HEADER};
use crate::extractors::json::AppJson;
use crate::models::auth::{SignInRequest, SignUpRequest, validate_sign_in, validate_sign_up};
use crate::models::profile::ProfileResponse;
use crate::models::shared::Envelope;
use crate::session;
use crate::state::AppState;
use crate::utils::{hash, jwt};

/// Handle profile sign-up.
///
/// The new profile starts pending: its activation token would ride an
/// activation mail in production, here it is surfaced via the log (mail
/// delivery is an external collaborator).
#[utoipa::path(
    post,
    path = "/sign-up",
    tag = "Auth",
    operation_id = "signUp",
    summary = "Create a new profile, pending activation",
    request_body = SignUpRequest,
    responses(
        (status = 201, description = "Profile created", body = Envelope<ProfileResponse>),
        (status = 400, description = "Malformed field or password mismatch", body = StatusBody),
        (status = 422, description = "Field exceeds its bound", body = StatusBody),
        (status = 409, description = "At-handle or email already registered", body = StatusBody),
    ),
)]
#[instrument(skip(state, payload), fields(at_handle = %payload.at_handle))]
pub async fn sign_up(
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignUpRequest>,
) -> Result<Envelope<ProfileResponse>, AppError> {
    let fields = validate_sign_up(&payload)?;

    let hashed = hash::hash_password(&payload.password)
        .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
    // Same gate a stored row passes through; a failure here is a bug,
    // not bad input.
    let hashed = PasswordHashString::parse(&hashed)
        .map_err(|e| AppError::Internal(format!("Unusable password hash: {e}")))?;

    let activation_token = mint_activation_token();

    let new_profile = profile::ActiveModel {
        id: Set(generate_identity()),
        at_handle: Set(fields.at_handle.into_inner()),
        email: Set(fields.email.into_inner()),
        password_hash: Set(hashed.into_inner()),
        phone: Set(fields.phone.map(Phone::into_inner)),
        avatar_url: Set(fields.avatar_url.map(WebUrl::into_inner)),
        activation_token: Set(Some(activation_token.clone())),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_profile.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::HandleTaken,
        _ => AppError::from(e),
    })?;

    tracing::info!(
        profile_id = %model.id,
        activation_token = %activation_token,
        "activation mail requested"
    );

    Ok(Envelope::created(ProfileResponse::from(model))
        .with_message("Profile created; activate it before signing in"))
}

/// Activate a pending profile by its mailed token.
#[utoipa::path(
    get,
    path = "/activate/{token}",
    tag = "Auth",
    operation_id = "activateProfile",
    summary = "Flip a pending profile to active",
    params(("token" = String, Path, description = "32-char hex activation token")),
    responses(
        (status = 200, description = "Profile activated", body = StatusBody),
        (status = 400, description = "Token is not hex", body = StatusBody),
        (status = 422, description = "Token has the wrong length", body = StatusBody),
        (status = 404, description = "No profile pending activation for that token", body = StatusBody),
    ),
)]
#[instrument(skip(state, token))]
pub async fn activate(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<StatusBody, AppError> {
    let token = ActivationToken::parse(&token)?;

    let pending = profile::Entity::find()
        .filter(profile::Column::ActivationToken.eq(token.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("No profile pending activation for that token".into()))?;

    let mut active: profile::ActiveModel = pending.into();
    active.activation_token = Set(None);
    active.update(&state.db).await?;

    Ok(StatusBody::new(
        StatusCode::OK,
        "Profile activated; you can sign in now",
    ))
}

/// Handle sign-in: credentials in, session-bound token out.
#[utoipa::path(
    post,
    path = "/sign-in",
    tag = "Auth",
    operation_id = "signIn",
    summary = "Authenticate and receive a session-bound token",
    description = "On success the signed token is returned in the `X-JWT-TOKEN` response header and mirrored into the server-side session.",
    request_body = SignInRequest,
    responses(
        (status = 200, description = "Signed in; token in X-JWT-TOKEN header", body = Envelope<ProfileResponse>),
        (status = 401, description = "Unknown email or wrong password", body = StatusBody),
        (status = 403, description = "Profile not yet activated", body = StatusBody),
    ),
)]
#[instrument(skip(session, state, payload), fields(email = %payload.email))]
pub async fn sign_in(
    session: Session,
    State(state): State<AppState>,
    AppJson(payload): AppJson<SignInRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = validate_sign_in(&payload)?;

    let found = profile::Entity::find()
        .filter(profile::Column::Email.eq(email.as_str()))
        .one(&state.db)
        .await?
        .ok_or(AppError::InvalidCredentials)?;

    // A pending profile has credentials but may not authenticate yet.
    if found.activation_token.is_some() {
        return Err(AppError::NotActivated);
    }

    let is_valid = hash::verify_password(&payload.password, &found.password_hash)
        .map_err(|e| AppError::Internal(format!("Password verify error: {}", e)))?;
    if !is_valid {
        return Err(AppError::InvalidCredentials);
    }

    // The XSRF gate persisted the session on first contact, so it has an
    // id for the token to bind to.
    let session_id = session::session_id(&session)
        .ok_or_else(|| AppError::Internal("Session has no id at sign-in".into()))?;

    let secret = jwt::mint_secret();
    let token = jwt::sign(found.id, &found.at_handle, &session_id, &secret)
        .map_err(|e| AppError::Internal(format!("JWT sign error: {}", e)))?;

    session::establish_auth(&session, &secret, &token, found.id).await?;

    Ok((
        [(JWT_HEADER, token)],
        Envelope::ok(ProfileResponse::from(found)).with_message("Signed in"),
    ))
}

/// Handle sign-out: the whole session dies, tokens with it.
#[utoipa::path(
    post,
    path = "/sign-out",
    tag = "Auth",
    operation_id = "signOut",
    summary = "Destroy the session and its tokens",
    responses(
        (status = 200, description = "Signed out", body = StatusBody),
        (status = 401, description = "Not signed in", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, session), fields(profile_id = %auth.profile_id))]
pub async fn sign_out(auth: AuthProfile, session: Session) -> Result<StatusBody, AppError> {
    session.flush().await?;
    Ok(StatusBody::new(StatusCode::OK, "Signed out"))
}

/// Return the current authenticated profile.
#[utoipa::path(
    get,
    path = "/me",
    tag = "Auth",
    operation_id = "me",
    summary = "Current authenticated profile",
    responses(
        (status = 200, description = "Current profile", body = Envelope<ProfileResponse>),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state), fields(profile_id = %auth.profile_id))]
pub async fn me(
    auth: AuthProfile,
    State(state): State<AppState>,
) -> Result<Envelope<ProfileResponse>, AppError> {
    let model = profile::Entity::find_by_id(auth.profile_id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;
    Ok(Envelope::ok(model.into()))
}

/// 16 random bytes, hex: the 32-char token mailed on sign-up.
fn mint_activation_token() -> String {
    let mut bytes = [0u8; 16];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
