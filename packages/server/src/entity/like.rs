use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// Join entity: at most one like per (profile, tweet) pair, enforced by
/// the composite primary key.
#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "like")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub profile_id: Uuid,
    #[sea_orm(primary_key)]
    pub tweet_id: Uuid,

    #[sea_orm(belongs_to, from = "profile_id", to = "id")]
    pub profile: BelongsTo<super::profile::Entity>,
    #[sea_orm(belongs_to, from = "tweet_id", to = "id")]
    pub tweet: BelongsTo<super::tweet::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
