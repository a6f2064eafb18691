use common::datetime::epoch_millis;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::profile;

use super::shared::double_option;

/// Public representation of a profile. The password hash and the
/// activation token never leave the server.
#[derive(Serialize, utoipa::ToSchema)]
pub struct ProfileResponse {
    pub id: Uuid,
    /// At-handle, e.g. `@phpunit`.
    #[schema(example = "@phpunit")]
    pub at_handle: String,
    #[schema(example = "test@phpunit.de")]
    pub email: String,
    pub phone: Option<String>,
    pub avatar_url: Option<String>,
    /// Creation timestamp in epoch milliseconds.
    pub created_at: i64,
}

impl From<profile::Model> for ProfileResponse {
    fn from(model: profile::Model) -> Self {
        Self {
            id: model.id,
            at_handle: model.at_handle,
            email: model.email,
            phone: model.phone,
            avatar_url: model.avatar_url,
            created_at: epoch_millis(&model.created_at),
        }
    }
}

/// Request body for updating a profile. Only provided fields change;
/// `phone` and `avatar_url` distinguish "absent" from "set to null".
#[derive(Deserialize, Default, utoipa::ToSchema)]
pub struct UpdateProfileRequest {
    pub at_handle: Option<String>,
    pub email: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub phone: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>)]
    pub avatar_url: Option<Option<String>>,
    /// New password; requires a matching `password_confirm`.
    pub password: Option<String>,
    pub password_confirm: Option<String>,
}
