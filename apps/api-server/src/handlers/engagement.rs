//! Comment and like handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use social_shared::dto::CommentRequest;

use super::convert;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/feed/posts/{pk}/comments
pub async fn comments(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state
        .engagement
        .comments(identity.user_id, path.into_inner())
        .await?;
    let body: Vec<_> = comments.into_iter().map(convert::comment).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/feed/posts/{pk}/comments
pub async fn add_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    body: web::Json<CommentRequest>,
) -> AppResult<HttpResponse> {
    let comment = state
        .engagement
        .comment(identity.user_id, path.into_inner(), body.into_inner().text)
        .await?;
    Ok(HttpResponse::Created().json(convert::comment(comment)))
}

/// DELETE /api/feed/comments/{pk}
pub async fn delete_comment(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state
        .engagement
        .delete_comment(identity.user_id, path.into_inner())
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/feed/posts/{pk}/likes
pub async fn likes(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let likes = state.engagement.likes(identity.user_id, path.into_inner()).await?;
    let body: Vec<_> = likes.into_iter().map(convert::like).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/feed/posts/{pk}/likes
pub async fn like(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let like = state.engagement.like(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Created().json(convert::like(like)))
}

/// DELETE /api/feed/posts/{pk}/likes
pub async fn unlike(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.engagement.unlike(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}
