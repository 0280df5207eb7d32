//! User discovery and own-profile handlers.

use actix_multipart::Multipart;
use actix_web::{HttpResponse, web};
use uuid::Uuid;

use social_core::services::UpdateProfile;
use social_shared::dto::{
    ChangePasswordRequest, UpdateProfileRequest, UserListQuery, UserProfileResponse,
};

use super::{convert, upload};
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/user/users
pub async fn list(
    state: web::Data<AppState>,
    _identity: Identity,
    query: web::Query<UserListQuery>,
) -> AppResult<HttpResponse> {
    let users = state.users.list(query.username.as_deref()).await?;
    let body: Vec<_> = users.into_iter().map(convert::user).collect();
    Ok(HttpResponse::Ok().json(body))
}

/// GET /api/user/users/{pk} - the user with the posts the caller may see.
pub async fn detail(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let user = state.users.get(user_id).await?;
    let posts = state.posts.by_author(identity.user_id, user_id).await?;

    Ok(HttpResponse::Ok().json(UserProfileResponse {
        user: convert::user(user),
        posts: convert::posts(posts),
    }))
}

/// POST /api/user/users/{pk}/follow
pub async fn follow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let follow = state.users.follow(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::Created().json(convert::follow(follow)))
}

/// DELETE /api/user/users/{pk}/follow
pub async fn unfollow(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    state.users.unfollow(identity.user_id, path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// GET /api/user/me
pub async fn me(state: web::Data<AppState>, identity: Identity) -> AppResult<HttpResponse> {
    let user = state.users.get(identity.user_id).await?;
    Ok(HttpResponse::Ok().json(convert::user(user)))
}

/// PATCH /api/user/me
pub async fn update_me(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<UpdateProfileRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let user = state
        .users
        .update_profile(
            identity.user_id,
            UpdateProfile {
                username: req.username,
                first_name: req.first_name,
                last_name: req.last_name,
                bio: req.bio,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(convert::user(user)))
}

/// POST /api/user/me/upload-image
pub async fn upload_image(
    state: web::Data<AppState>,
    identity: Identity,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let image = upload::read_image(payload).await?;
    let user = state
        .users
        .set_image(identity.user_id, &image.filename, image.bytes)
        .await?;

    Ok(HttpResponse::Ok().json(convert::user(user)))
}

/// POST /api/user/me/change-password
pub async fn change_password(
    state: web::Data<AppState>,
    identity: Identity,
    body: web::Json<ChangePasswordRequest>,
) -> AppResult<HttpResponse> {
    state
        .users
        .change_password(identity.user_id, &body.old_password, &body.new_password)
        .await?;

    Ok(HttpResponse::NoContent().finish())
}
