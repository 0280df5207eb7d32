//! SeaORM entities, one per table.

pub mod comment;
pub mod follow;
pub mod hashtag;
pub mod like;
pub mod post;
pub mod post_hashtag;
pub mod post_image;
pub mod user;
