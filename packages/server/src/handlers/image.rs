use axum::extract::{Path, State};
use axum::http::StatusCode;
use common::ident::generate_identity;
use common::validate::{StorageToken, WebUrl};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::image;
use crate::error::{AppError, StatusBody};
use crate::extractors::auth::AuthProfile;
use crate::extractors::json::AppJson;
use crate::models::image::{CreateImageRequest, ImageResponse};
use crate::models::shared::Envelope;
use crate::state::AppState;

use super::tweet::find_tweet;

#[utoipa::path(
    post,
    path = "/",
    tag = "Images",
    operation_id = "createImage",
    summary = "Attach an uploaded image to a tweet",
    description = "The binary already lives with the external storage provider; this records the provider's opaque token and the public URL against a tweet the caller owns.",
    request_body = CreateImageRequest,
    responses(
        (status = 201, description = "Image attached", body = Envelope<ImageResponse>),
        (status = 400, description = "Malformed token or URL", body = StatusBody),
        (status = 422, description = "Token or URL exceeds its bound", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 403, description = "Not the caller's tweet", body = StatusBody),
        (status = 404, description = "Tweet not found", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state, payload), fields(tweet_id = %payload.tweet_id))]
pub async fn create_image(
    auth: AuthProfile,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateImageRequest>,
) -> Result<Envelope<ImageResponse>, AppError> {
    let storage_token = StorageToken::parse(&payload.storage_token)?;
    let url = WebUrl::parse(&payload.url)?;

    let tweet = find_tweet(&state.db, payload.tweet_id).await?;
    auth.require_owner(tweet.profile_id)?;

    let new_image = image::ActiveModel {
        id: Set(generate_identity()),
        tweet_id: Set(tweet.id),
        storage_token: Set(storage_token.into_inner()),
        url: Set(url.into_inner()),
        created_at: Set(chrono::Utc::now()),
        ..Default::default()
    };

    let model = new_image.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("An image with that id already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok(Envelope::created(ImageResponse::from(model)))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Images",
    operation_id = "getImage",
    summary = "Get an image record by id",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image record", body = Envelope<ImageResponse>),
        (status = 404, description = "Image not found", body = StatusBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_image(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Envelope<ImageResponse>, AppError> {
    let model = find_image(&state.db, id).await?;
    Ok(Envelope::ok(model.into()))
}

#[utoipa::path(
    get,
    path = "/{id}/images",
    tag = "Images",
    operation_id = "listTweetImages",
    summary = "List the images attached to a tweet",
    params(("id" = Uuid, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "Images on the tweet", body = Envelope<Vec<ImageResponse>>),
        (status = 404, description = "Tweet not found", body = StatusBody),
    ),
)]
#[instrument(skip(state), fields(tweet_id = %id))]
pub async fn list_tweet_images(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Envelope<Vec<ImageResponse>>, AppError> {
    let _tweet = find_tweet(&state.db, id).await?;

    let images = image::Entity::find()
        .filter(image::Column::TweetId.eq(id))
        .order_by(image::Column::CreatedAt, Order::Desc)
        .all(&state.db)
        .await?
        .into_iter()
        .map(ImageResponse::from)
        .collect();

    Ok(Envelope::ok(images))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Images",
    operation_id = "deleteImage",
    summary = "Detach an image from the caller's tweet",
    params(("id" = Uuid, Path, description = "Image ID")),
    responses(
        (status = 200, description = "Image removed", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 403, description = "Not the caller's tweet", body = StatusBody),
        (status = 404, description = "Image not found", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state), fields(id = %id))]
pub async fn delete_image(
    auth: AuthProfile,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusBody, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_image(&txn, id).await?;
    let tweet = find_tweet(&txn, existing.tweet_id).await?;
    auth.require_owner(tweet.profile_id)?;

    image::Entity::delete_by_id(id).exec(&txn).await?;
    txn.commit().await?;

    Ok(StatusBody::new(StatusCode::OK, "Image removed"))
}

async fn find_image<C: ConnectionTrait>(db: &C, id: Uuid) -> Result<image::Model, AppError> {
    image::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Image not found".into()))
}
