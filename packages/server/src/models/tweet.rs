use common::datetime::epoch_millis;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::tweet;

use super::shared::Pagination;

/// Request body for posting a tweet.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateTweetRequest {
    /// Tweet text (1-140 characters).
    #[schema(example = "hello from the integration suite")]
    pub content: String,
    /// Optional timestamp in `YYYY-MM-DD HH:MM:SS[.ffffff]` form;
    /// defaults to the server clock.
    pub created_at: Option<String>,
}

/// Request body for editing a tweet.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct UpdateTweetRequest {
    pub content: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TweetResponse {
    pub id: Uuid,
    pub profile_id: Uuid,
    pub content: String,
    /// Timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl From<tweet::Model> for TweetResponse {
    fn from(model: tweet::Model) -> Self {
        Self {
            id: model.id,
            profile_id: model.profile_id,
            content: model.content,
            created_at: epoch_millis(&model.created_at),
        }
    }
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct TweetListResponse {
    pub data: Vec<TweetResponse>,
    pub pagination: Pagination,
}

#[derive(Deserialize, utoipa::IntoParams)]
pub struct TweetListQuery {
    /// Restrict to one author.
    pub profile_id: Option<Uuid>,
    /// Case-insensitive content substring.
    pub search: Option<String>,
    /// Inclusive lower bound, `YYYY-MM-DD[ HH:MM:SS[.ffffff]]`.
    pub from: Option<String>,
    /// Inclusive upper bound, same format.
    pub to: Option<String>,
    pub page: Option<u64>,
    pub per_page: Option<u64>,
}
