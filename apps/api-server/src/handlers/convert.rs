//! Domain values to wire DTOs.

use social_core::domain::{Comment, Follow, HashTag, Like, Post, PostImage, User};
use social_core::services::PostDetail;
use social_shared::dto::{
    CommentResponse, FollowResponse, HashTagResponse, LikeResponse, PostDetailResponse,
    PostImageResponse, PostResponse, UserResponse,
};

pub fn user(user: User) -> UserResponse {
    UserResponse {
        id: user.id,
        username: user.username,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        bio: user.bio,
        image: user.image,
        created_at: user.created_at,
    }
}

pub fn follow(follow: Follow) -> FollowResponse {
    FollowResponse {
        follower_id: follow.follower_id,
        followee_id: follow.followee_id,
        created_at: follow.created_at,
    }
}

pub fn post(post: Post) -> PostResponse {
    PostResponse {
        id: post.id,
        author_id: post.author_id,
        text: post.text,
        created_at: post.created_at,
        published_at: post.published_at,
        is_published: post.is_published,
    }
}

pub fn posts(posts: Vec<Post>) -> Vec<PostResponse> {
    posts.into_iter().map(post).collect()
}

pub fn post_detail(detail: PostDetail) -> PostDetailResponse {
    PostDetailResponse {
        post: post(detail.post),
        hashtags: detail.hashtags.into_iter().map(|t| t.name).collect(),
        images: detail.images.into_iter().map(post_image).collect(),
        likes_count: detail.likes_count,
        comments_count: detail.comments_count,
    }
}

pub fn post_image(image: PostImage) -> PostImageResponse {
    PostImageResponse {
        id: image.id,
        post_id: image.post_id,
        image: image.image,
    }
}

pub fn comment(comment: Comment) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        author_id: comment.author_id,
        post_id: comment.post_id,
        text: comment.text,
        created_at: comment.created_at,
    }
}

pub fn like(like: Like) -> LikeResponse {
    LikeResponse {
        id: like.id,
        user_id: like.user_id,
        post_id: like.post_id,
    }
}

pub fn hashtag(hashtag: HashTag) -> HashTagResponse {
    HashTagResponse {
        id: hashtag.id,
        name: hashtag.name,
    }
}
