//! Domain entities - the core business objects.

mod comment;
mod follow;
mod hashtag;
mod like;
mod post;
mod post_image;
mod slug;
mod user;

pub use comment::Comment;
pub use follow::Follow;
pub use hashtag::{HASHTAG_MAX_LENGTH, HashTag};
pub use like::Like;
pub use post::{Post, PostState};
pub use post_image::{PostImage, file_extension, post_image_file_path};
pub use slug::slugify;
pub use user::{User, user_image_file_path};
