use common::datetime::epoch_millis;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::like;

/// Request body for liking a tweet. The liking profile comes from the
/// authenticated session, never from the payload.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateLikeRequest {
    pub tweet_id: Uuid,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct LikeResponse {
    pub profile_id: Uuid,
    pub tweet_id: Uuid,
    /// Timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl From<like::Model> for LikeResponse {
    fn from(model: like::Model) -> Self {
        Self {
            profile_id: model.profile_id,
            tweet_id: model.tweet_id,
            created_at: epoch_millis(&model.created_at),
        }
    }
}
