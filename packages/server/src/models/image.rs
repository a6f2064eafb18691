use common::datetime::epoch_millis;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::image;

/// Request body for attaching an image to a tweet. The upload already
/// happened against the external storage provider; this records its
/// token and public URL.
#[derive(Deserialize, utoipa::ToSchema)]
pub struct CreateImageRequest {
    pub tweet_id: Uuid,
    #[schema(example = "cloudinary:v1712/chirp/abc123")]
    pub storage_token: String,
    #[schema(example = "https://cdn.example.com/chirp/abc123.png")]
    pub url: String,
}

#[derive(Serialize, utoipa::ToSchema)]
pub struct ImageResponse {
    pub id: Uuid,
    pub tweet_id: Uuid,
    pub storage_token: String,
    pub url: String,
    /// Timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl From<image::Model> for ImageResponse {
    fn from(model: image::Model) -> Self {
        Self {
            id: model.id,
            tweet_id: model.tweet_id,
            storage_token: model.storage_token,
            url: model.url,
            created_at: epoch_millis(&model.created_at),
        }
    }
}
