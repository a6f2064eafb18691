use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[sea_orm::model]
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profile")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub at_handle: String,
    #[sea_orm(unique)]
    pub email: String,

    /// Argon2id PHC string. Never serialized to clients.
    pub password_hash: String,

    pub phone: Option<String>,
    pub avatar_url: Option<String>,

    /// 32-char hex while the profile is pending activation, NULL once
    /// activated. Only an active profile can sign in.
    pub activation_token: Option<String>,

    #[sea_orm(has_many)]
    pub tweets: HasMany<super::tweet::Entity>,

    #[sea_orm(has_many)]
    pub likes: HasMany<super::like::Entity>,

    pub created_at: DateTimeUtc,
}

impl ActiveModelBehavior for ActiveModel {}
