use utoipa_axum::{router::OpenApiRouter, routes};

use crate::handlers;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/auth", auth_routes())
        .nest("/profiles", profile_routes())
        .nest("/tweets", tweet_routes())
        .nest("/likes", like_routes())
        .nest("/images", image_routes())
}

fn auth_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::auth::sign_up))
        .routes(routes!(handlers::auth::activate))
        .routes(routes!(handlers::auth::sign_in))
        .routes(routes!(handlers::auth::sign_out))
        .routes(routes!(handlers::auth::me))
}

fn profile_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::profile::get_profile_by_handle))
        .routes(routes!(
            handlers::profile::get_profile,
            handlers::profile::update_profile,
            handlers::profile::delete_profile
        ))
        .routes(routes!(handlers::like::list_profile_likes))
}

fn tweet_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            handlers::tweet::list_tweets,
            handlers::tweet::create_tweet
        ))
        .routes(routes!(
            handlers::tweet::get_tweet,
            handlers::tweet::update_tweet,
            handlers::tweet::delete_tweet
        ))
        .routes(routes!(handlers::like::list_tweet_likes))
        .routes(routes!(handlers::image::list_tweet_images))
}

fn like_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::like::create_like))
        .routes(routes!(handlers::like::delete_like))
}

fn image_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(handlers::image::create_image))
        .routes(routes!(
            handlers::image::get_image,
            handlers::image::delete_image
        ))
}
