
mod auth;
mod tweet;
