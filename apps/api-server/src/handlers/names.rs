//! Route names, used both when registering resources and when building URLs.

pub const API_ROOT: &str = "api-root";

pub const USER_REGISTER: &str = "user:register";
pub const USER_LOGIN: &str = "user:login";
pub const USER_LOGOUT: &str = "user:logout";
pub const USER_LIST: &str = "user:user-list";
pub const USER_DETAIL: &str = "user:user-detail";
pub const USER_FOLLOW: &str = "user:user-follow";
pub const MANAGE_DETAIL: &str = "user:manage-detail";
pub const MANAGE_UPLOAD_IMAGE: &str = "user:manage-upload-image";
pub const MANAGE_CHANGE_PASSWORD: &str = "user:manage-change-password";

pub const POST_LIST: &str = "feed:post-list";
pub const POST_FOLLOWED_AUTHORS: &str = "feed:post-followed-authors-posts";
pub const POST_LIKED: &str = "feed:post-liked-posts";
pub const POST_DETAIL: &str = "feed:post-detail";
pub const POST_PUBLISH: &str = "feed:post-publish";
pub const POST_UPLOAD_IMAGE: &str = "feed:post-upload-image";
pub const POST_COMMENTS: &str = "feed:post-comments";
pub const COMMENT_DETAIL: &str = "feed:comment-detail";
pub const POST_LIKES: &str = "feed:post-likes";
pub const HASHTAG_LIST: &str = "feed:hashtag-list";
pub const HASHTAG_DETAIL: &str = "feed:hashtag-detail";
pub const POSTPONED_POST_LIST: &str = "feed:postponed-post-list";
