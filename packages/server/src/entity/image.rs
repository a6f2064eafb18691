use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Weak entity scoped to a tweet: the upload itself lives with an
/// external storage provider, this row only keeps the provider's opaque
/// token and the public URL.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "image")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    pub tweet_id: Uuid,
    #[sea_orm(belongs_to, from = "tweet_id", to = "id")]
    pub tweet: HasOne<super::tweet::Entity>,

    pub storage_token: String,
    pub url: String,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
