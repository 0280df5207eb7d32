//! Post handlers: the feed, authoring, publishing and images.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use social_core::services::{CreatePost, FeedFilter, UpdatePost};
use social_shared::dto::{CreatePostRequest, PostListQuery, UpdatePostRequest};

use super::{convert, upload};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/feed/posts?hashtag=&author=
pub async fn list(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<PostListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let posts = state
        .posts
        .feed(FeedFilter {
            hashtag: query.hashtag,
            author: query.author,
        })
        .await?;

    Ok(HttpResponse::Ok().json(convert::posts(posts)))
}

/// POST /api/feed/posts
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let detail = state
        .posts
        .create(
            identity.user_id,
            CreatePost {
                text: req.text,
                published_at: req.published_at,
                is_published: req.is_published,
                hashtags: req.hashtags,
            },
        )
        .await?;

    Ok(HttpResponse::Created().json(convert::post_detail(detail)))
}

/// GET /api/feed/posts/followed-authors-posts
pub async fn followed_authors(
    state: web::Data<AppState>,
    identity: Identity,
) -> AppResult<HttpResponse> {
    let posts = state.posts.followed_authors(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(convert::posts(posts)))
}

/// GET /api/feed/posts/liked-posts
pub async fn liked(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.liked_by(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(convert::posts(posts)))
}

/// GET /api/feed/postponed-posts
pub async fn postponed(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let posts = state.posts.postponed(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(convert::posts(posts)))
}

/// GET /api/feed/posts/{pk}
pub async fn detail(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let detail = state.posts.get(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(convert::post_detail(detail)))
}

/// PATCH /api/feed/posts/{pk}
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let detail = state
        .posts
        .update(
            identity.user_id,
            path.into_inner(),
            UpdatePost {
                text: req.text,
                published_at: req.published_at,
                hashtags: req.hashtags,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(convert::post_detail(detail)))
}

/// DELETE /api/feed/posts/{pk}
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.posts.delete(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// POST /api/feed/posts/{pk}/publish
pub async fn publish(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.posts.publish(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(convert::post(post)))
}

/// POST /api/feed/posts/{pk}/upload-image
pub async fn upload_image(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let image = upload::read_image(payload).await?;
    let stored = state
        .posts
        .attach_image(identity.user_id, path.into_inner(), &image.filename, image.bytes)
        .await?;

    Ok(HttpResponse::Created().json(convert::post_image(stored)))
}
