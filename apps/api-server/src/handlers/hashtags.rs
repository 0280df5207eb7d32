//! Hashtag handlers.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use social_shared::dto::HashTagRequest;

use super::convert;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/feed/hashtags
pub async fn list(state: web::Data<AppState>, _identity: Identity) -> AppResult<HttpResponse> {
    let hashtags = state.hashtags.list().await?;
    let body: Vec<_> = hashtags.into_iter().map(convert::hashtag).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// POST /api/feed/hashtags
pub async fn create(
    state: web::Data<AppState>,
    _identity: Identity,
    body: web::Json<HashTagRequest>,
) -> AppResult<HttpResponse> {
    let hashtag = state.hashtags.create(&body.name).await?;
    Ok(HttpResponse::Created().json(convert::hashtag(hashtag)))
}

/// GET /api/feed/hashtags/{pk}
pub async fn detail(
    state: web::Data<AppState>,
    _identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let hashtag = state.hashtags.get(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(convert::hashtag(hashtag)))
}
