use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use common::datetime::parse_datetime_utc;
use common::ident::generate_identity;
use common::validate::TweetContent;
use sea_orm::prelude::Expr;
use sea_orm::sea_query::{Func, LikeExpr};
use sea_orm::*;
use tracing::instrument;
use uuid::Uuid;

use crate::entity::{image, like, tweet};
use crate::error::{AppError, StatusBody};
use crate::extractors::auth::AuthProfile;
use crate::extractors::json::AppJson;
use crate::models::shared::{Envelope, Pagination, escape_like};
use crate::models::tweet::{
    CreateTweetRequest, TweetListQuery, TweetListResponse, TweetResponse, UpdateTweetRequest,
};
use crate::state::AppState;

#[utoipa::path(
    post,
    path = "/",
    tag = "Tweets",
    operation_id = "createTweet",
    summary = "Post a tweet",
    request_body = CreateTweetRequest,
    responses(
        (status = 201, description = "Tweet posted", body = Envelope<TweetResponse>),
        (status = 400, description = "Malformed content or timestamp", body = StatusBody),
        (status = 422, description = "Content over 140 characters", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state, payload), fields(profile_id = %auth.profile_id))]
pub async fn create_tweet(
    auth: AuthProfile,
    State(state): State<AppState>,
    AppJson(payload): AppJson<CreateTweetRequest>,
) -> Result<Envelope<TweetResponse>, AppError> {
    let content = TweetContent::parse(&payload.content)?;
    let created_at = match payload.created_at.as_deref() {
        Some(raw) => parse_datetime_utc(raw)?,
        None => chrono::Utc::now(),
    };

    let new_tweet = tweet::ActiveModel {
        id: Set(generate_identity()),
        content: Set(content.into_inner()),
        profile_id: Set(auth.profile_id),
        created_at: Set(created_at),
        ..Default::default()
    };

    let model = new_tweet.insert(&state.db).await.map_err(|e| match e.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            AppError::Conflict("A tweet with that id already exists".into())
        }
        _ => AppError::from(e),
    })?;

    Ok(Envelope::created(TweetResponse::from(model)))
}

#[utoipa::path(
    get,
    path = "/",
    tag = "Tweets",
    operation_id = "listTweets",
    summary = "List tweets, newest first",
    description = "Optionally filtered by author, case-insensitive content substring, and an inclusive date range. Paginated.",
    params(TweetListQuery),
    responses(
        (status = 200, description = "Page of tweets", body = Envelope<TweetListResponse>),
        (status = 400, description = "Malformed date bound", body = StatusBody),
    ),
)]
#[instrument(skip(state, query))]
pub async fn list_tweets(
    State(state): State<AppState>,
    Query(query): Query<TweetListQuery>,
) -> Result<Envelope<TweetListResponse>, AppError> {
    let page = Ord::max(query.page.unwrap_or(1), 1);
    let per_page = query.per_page.unwrap_or(20).clamp(1, 100);

    let mut select = tweet::Entity::find();

    if let Some(profile_id) = query.profile_id {
        select = select.filter(tweet::Column::ProfileId.eq(profile_id));
    }

    if let Some(ref search) = query.search {
        let term = escape_like(search.trim());
        if !term.is_empty() {
            select = select.filter(
                Expr::expr(Func::lower(Expr::col(tweet::Column::Content)))
                    .like(LikeExpr::new(format!("%{}%", term.to_lowercase())).escape('\\')),
            );
        }
    }

    if let Some(ref from) = query.from {
        select = select.filter(tweet::Column::CreatedAt.gte(parse_datetime_utc(from)?));
    }
    if let Some(ref to) = query.to {
        select = select.filter(tweet::Column::CreatedAt.lte(parse_datetime_utc(to)?));
    }

    let total = select
        .clone()
        .paginate(&state.db, per_page)
        .num_items()
        .await?;
    let total_pages = total.div_ceil(per_page);

    let data = select
        .order_by(tweet::Column::CreatedAt, Order::Desc)
        .offset(Some((page - 1) * per_page))
        .limit(Some(per_page))
        .all(&state.db)
        .await?
        .into_iter()
        .map(TweetResponse::from)
        .collect();

    Ok(Envelope::ok(TweetListResponse {
        data,
        pagination: Pagination {
            page,
            per_page,
            total,
            total_pages,
        },
    }))
}

#[utoipa::path(
    get,
    path = "/{id}",
    tag = "Tweets",
    operation_id = "getTweet",
    summary = "Get a tweet by id",
    params(("id" = Uuid, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "Tweet", body = Envelope<TweetResponse>),
        (status = 404, description = "Tweet not found", body = StatusBody),
    ),
)]
#[instrument(skip(state), fields(id = %id))]
pub async fn get_tweet(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Envelope<TweetResponse>, AppError> {
    let model = find_tweet(&state.db, id).await?;
    Ok(Envelope::ok(model.into()))
}

#[utoipa::path(
    put,
    path = "/{id}",
    tag = "Tweets",
    operation_id = "updateTweet",
    summary = "Edit the caller's own tweet",
    params(("id" = Uuid, Path, description = "Tweet ID")),
    request_body = UpdateTweetRequest,
    responses(
        (status = 200, description = "Tweet updated", body = Envelope<TweetResponse>),
        (status = 400, description = "Malformed content", body = StatusBody),
        (status = 422, description = "Content over 140 characters", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 403, description = "Not the caller's tweet", body = StatusBody),
        (status = 404, description = "Tweet not found", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state, payload), fields(id = %id))]
pub async fn update_tweet(
    auth: AuthProfile,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    AppJson(payload): AppJson<UpdateTweetRequest>,
) -> Result<Envelope<TweetResponse>, AppError> {
    let content = TweetContent::parse(&payload.content)?;

    let txn = state.db.begin().await?;
    let existing = find_tweet(&txn, id).await?;
    auth.require_owner(existing.profile_id)?;

    let mut active: tweet::ActiveModel = existing.into();
    active.content = Set(content.into_inner());
    let model = active.update(&txn).await?;
    txn.commit().await?;

    Ok(Envelope::ok(TweetResponse::from(model)).with_message("Tweet updated"))
}

#[utoipa::path(
    delete,
    path = "/{id}",
    tag = "Tweets",
    operation_id = "deleteTweet",
    summary = "Delete the caller's own tweet",
    description = "Removes the tweet and its dependent likes and images in one transaction.",
    params(("id" = Uuid, Path, description = "Tweet ID")),
    responses(
        (status = 200, description = "Tweet deleted", body = StatusBody),
        (status = 401, description = "Missing or mismatched token", body = StatusBody),
        (status = 403, description = "Not the caller's tweet", body = StatusBody),
        (status = 404, description = "Tweet not found", body = StatusBody),
    ),
    security(("session_jwt" = [])),
)]
#[instrument(skip(auth, state), fields(id = %id))]
pub async fn delete_tweet(
    auth: AuthProfile,
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusBody, AppError> {
    let txn = state.db.begin().await?;
    let existing = find_tweet(&txn, id).await?;
    auth.require_owner(existing.profile_id)?;

    like::Entity::delete_many()
        .filter(like::Column::TweetId.eq(id))
        .exec(&txn)
        .await?;
    image::Entity::delete_many()
        .filter(image::Column::TweetId.eq(id))
        .exec(&txn)
        .await?;
    tweet::Entity::delete_by_id(id).exec(&txn).await?;

    txn.commit().await?;
    Ok(StatusBody::new(StatusCode::OK, "Tweet deleted"))
}

pub(super) async fn find_tweet<C: ConnectionTrait>(
    db: &C,
    id: Uuid,
) -> Result<tweet::Model, AppError> {
    tweet::Entity::find_by_id(id)
        .one(db)
        .await?
        .ok_or_else(|| AppError::NotFound("Tweet not found".into()))
}
