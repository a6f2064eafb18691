pub mod image;
pub mod like;
pub mod profile;
pub mod tweet;
