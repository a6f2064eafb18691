use axum::extract::{Path, State};
use axum::http::StatusCode;
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{like, profile};
use crate::error::{AppError, StatusBody};
use crate::extractors::auth::AuthProfile;
use crate::extractors::json::AppJson;
use crate::models::like::{CreateLikeRequest, LikeResponse};
use crate::models::shared::Envelope;
use crate::state::AppState;

use super::tweet::find_tweet;

#[utoipa::path(
    post,
    path = "/",
    tag = "Likes",
    operation_id = "createLike",
    summary = "Like a tweet",
    description = "At most one like per (profile, tweet) pair; liking twice is a conflict.",
    request_body = CreateLikeRequest,
    responses(
        (status = 201, description = "Tweet liked", body = Envelope<LikeResponse>),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 404, description = "Tweet not found", body = StatusBody),
        (status = 409, description = "Already liked", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state, payload), fields(profile_id = %auth.profile_id, tweet_id = %payload.tweet_id))]
pub async fn create_like(
    auth: AuthProfile,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateLikeRequest>,
) -> Result<Envelope<LikeResponse>, AppError> {
    let _tweet = find_tweet(&state.db, payload.tweet_id).await?;

    let new_like = like::ActiveModel {
        profile_id: Set(auth.profile_id),
        tweet_id: Set(payload.tweet_id),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    match new_like.insert(&state.db).await {
        Ok(model) => Ok(Envelope::created(LikeResponse::from(model))),
        Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
            Err(AppError::Conflict("Tweet already liked".into()))
        }
        Err(e) => Err(e.into()),
    }
}

#[utoipa::path(
    delete,
    path = "/{tweet_id}",
    tag = "Likes",
    operation_id = "deleteLike",
    summary = "Remove the caller's like from a tweet",
    params(("tweet_id" = Uuid, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "Like removed", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 404, description = "The caller has not liked that tweet", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state), fields(profile_id = %auth.profile_id, tweet_id = %tweet_id))]
pub async fn delete_like(
    auth: AuthProfile,
    State(state): State<AppState>,
    Path(tweet_id): Path<Uuid>,
) -> Result<StatusBody, AppError> {
    let result = like::Entity::delete_by_id((auth.profile_id, tweet_id))
        .exec(&state.db)
        .await?;

    if result.rows_affected == 0 {
        return Err(AppError::NotFound("Like not found".into()));
    }

    Ok(StatusBody::new(StatusCode::OK, "Like removed"))
}

#[utoipa::path(
    get,
    path = "/{id}/likes",
    tag = "Likes",
    operation_id = "listTweetLikes",
    summary = "List the likes on a tweet, newest first",
    params(("id" = Uuid, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "Likes on the tweet", body = Envelope<Vec<LikeResponse>>),
        (status = 404, description = "Tweet not found", body = StatusBody),
    ),
)]
#[instrument(skip(state), fields(tweet_id = %id))]
pub async fn list_tweet_likes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Envelope<Vec<LikeResponse>>, AppError> {
    let _tweet = find_tweet(&state.db, id).await?;

    let likes = like::Entity::find()
        .filter(like::Column::TweetId.eq(id))
        .order_by(like::Column::CreatedAt, Order::Desc)
        .all(&state.db)
        .await?
        .into_iter()
        .map(LikeResponse::from)
        .collect();

    Ok(Envelope::ok(likes))
}

#[utoipa::path(
    get,
    path = "/{id}/likes",
    tag = "Likes",
    operation_id = "listProfileLikes",
    summary = "List a profile's likes, newest first",
    params(("id" = Uuid, Path, description = "Profile ID")),
    responses(
        (status = 200, description = "Likes by the profile", body = Envelope<Vec<LikeResponse>>),
        (status = 404, description = "Profile not found", body = StatusBody),
    ),
)]
#[instrument(skip(state), fields(profile_id = %id))]
pub async fn list_profile_likes(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Envelope<Vec<LikeResponse>>, AppError> {
    profile::Entity::find_by_id(id)
        .one(&state.db)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".into()))?;

    let likes = like::Entity::find()
        .filter(like::Column::ProfileId.eq(id))
        .order_by(like::Column::CreatedAt, Order::Desc)
        .all(&state.db)
        .await?
        .into_iter()
        .map(LikeResponse::from)
        .collect();

    Ok(Envelope::ok(likes))
}
