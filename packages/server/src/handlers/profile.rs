use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::validate::{AtHandle, EmailAddress, Phone, WebUrl};
use sea_orm::sea_query::Query as SeaQuery;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{image, like, profile, tweet};
use crate::error::{AppError, StatusBody};
use crate::extractors::auth::AuthProfile;
use crate::extractors::json::AppJson;
use crate::models::auth::validate_password;
use crate::models::profile::{ProfileResponse, UpdateProfileRequest};
use crate::models::shared::Envelope;
use crate::state::AppState;
use crate::utils::hash;

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Profiles",
    operation_id = "getProfile",
    summary = "Get a profile by id",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile", body = Envelope<ProfileResponse>),
        (status = 404, description = "Profile not found", body = StatusBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_profile(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Envelope<ProfileResponse>, AppError> {
    let model = find_profile(&state.db, id).await?;
    Ok(Envelope::ok(model.into()))
}

#[utoipa::path(
    get,
    path = "/handle/{handle}",
    tag = "Profiles",
    operation_id = "getProfileByHandle",
    summary = "Get a profile by at-handle",
    params(("handle" = String, Path, description = "At-handle, e.g. @phpunit")),
    responses(
        (status = 200, description = "Profile", body = Envelope<ProfileResponse>),
        (status = 400, description = "Malformed handle", body = StatusBody),
        (status = 404, description = "Profile not found", body = StatusBody),
    ),
)]
#[instrument(skip(state, handle))]
pub async fn get_profile_by_handle(
    State(state): State<AppState>,
    Path(handle): Path<String>,
) -> Result<Envelope<ProfileResponse>, AppError> {
    let handle = AtHandle::parse(&handle)?;

    let model = profile::Entity::find()
        .filter(profile::Column::AtHandle.eq(handle.as_str()))
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;

    Ok(Envelope::ok(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Profiles",
    operation_id = "updateProfile",
    summary = "Update the caller's own profile",
    description = "Only provided fields change; every provided field is re-validated. Changing the password requires a matching confirmation.",
    params(("id" = Uuid, Path, description = "Profile ID")),
    request_body = UpdateProfileRequest,
    responses(
        (status = 200, description = "Profile updated", body = Envelope<ProfileResponse>),
        (status = 400, description = "Malformed field or password mismatch", body = StatusBody),
        (status = 422, description = "Field exceeds its bound", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 403, description = "Not the caller's profile", body = StatusBody),
        (status = 404, description = "Profile not found", body = StatusBody),
        (status = 409, description = "New handle or email already registered", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state, payload), fields(id = %id))]
pub async fn update_profile(
    auth: AuthProfile,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateProfileRequest>,
) -> Result<Envelope<ProfileResponse>, AppError> {
    auth.require_owner(id)?;

    let txn = state.db.begin().await?;
    let existing = find_profile(&txn, id).await?;
    let mut active: profile::ActiveModel = existing.into();

    if let Some(ref handle) = payload.at_handle {
        active.at_handle = Set(AtHandle::parse(handle)?.into_inner());
    }
    if let Some(ref email) = payload.email {
        active.email = Set(EmailAddress::parse(email)?.into_inner());
    }
    if let Some(ref phone) = payload.phone {
        active.phone = Set(phone.as_deref().map(Phone::parse).transpose()?.map(Phone::into_inner));
    }
    if let Some(ref url) = payload.avatar_url {
        active.avatar_url =
            Set(url.as_deref().map(WebUrl::parse).transpose()?.map(WebUrl::into_inner));
    }
    if let Some(ref password) = payload.password {
        validate_password(password)?;
        if payload.password_confirm.as_deref() != Some(password.as_str()) {
            return Err(AppError::Validation(
                "Password confirmation does not match".into(),
            ));
        }
        let hashed = hash::hash_password(password)
            .map_err(|e| AppError::Internal(format!("Password hash error: {}", e)))?;
        active.password_hash = Set(hashed);
    }

    let model = active.update(&txn).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => AppError::HandleTaken,
        _ => AppError::from(e),
    })?;
    txn.commit().await?;

    Ok(Envelope::ok(ProfileResponse::from(model)).with_message("Profile updated"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Profiles",
    operation_id = "deleteProfile",
    summary = "Delete the caller's own profile",
    description = "Removes the profile together with its tweets, the images and likes on those tweets, and the profile's own likes, in one transaction.",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Profile deleted", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 403, description = "Not the caller's profile", body = StatusBody),
        (status = 404, description = "Profile not found", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state), fields(id = %id))]
pub async fn delete_profile(
    auth: AuthProfile,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusBody, AppError> {
    auth.require_owner(id)?;

    let txn = state.db.begin().await?;
    let _profile = find_profile(&txn, id).await?;

    let owned_tweets = SeaQuery::select()
        .column(tweet::Column::Id)
        .from(tweet::Entity)
        .and_where(tweet::Column::ProfileId.eq(id))
        .to_owned();

    // Other profiles' likes on this profile's tweets go too.
    like::Entity::delete_many()
        .filter(like::Column::TweetId.in_subquery(owned_tweets.clone()))
        .exec(&txn)
        .await?;
    like::Entity::delete_many()
        .filter(like::Column::ProfileId.eq(id))
        .exec(&txn)
        .await?;
    image::Entity::delete_many()
        .filter(image::Column::TweetId.in_subquery(owned_tweets))
        .exec(&txn)
        .await?;
    tweet::Entity::delete_many()
        .filter(tweet::Column::ProfileId.eq(id))
        .exec(&txn)
        .await?;
    profile::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusBody::new(StatusCode::OK, "Profile deleted"))
}

async fn find_profile<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<profile::Model, AppError> {
    profile::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))
}
