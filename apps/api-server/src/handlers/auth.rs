//! Authentication handlers.

use actix_web::{HttpResponse, web};
use std::sync::Arc;

use social_core::domain::User;
use social_core::ports::TokenService;
use social_core::services::RegisterUser;
use social_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

fn issue_token(token_service: &dyn TokenService, user: &User) -> AppResult<AuthResponse> {
    let token = token_service
        .generate_token(user.id, &user.username)
        .map_err(|e| AppError::Internal(e.to_string()))?;

    Ok(AuthResponse {
        access_token: token,
        token_type: "Bearer".to_string(),
        expires_in: token_service.expiration_seconds() as u64,
    })
}

/// POST /api/user/register
pub async fn register(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state
        .users
        .register(RegisterUser {
            username: req.username,
            email: req.email,
            password: req.password,
            first_name: req.first_name,
            last_name: req.last_name,
        })
        .await?;

    Ok(HttpResponse::Created().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// POST /api/user/login
pub async fn login(
    state: web::Data<AppState>,
    token_service: web::Data<Arc<dyn TokenService>>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let user = state.users.authenticate(&req.email, &req.password).await?;
    tracing::info!(user_id = %user.id, "User logged in");

    Ok(HttpResponse::Ok().json(issue_token(token_service.get_ref().as_ref(), &user)?))
}

/// POST /api/user/logout - tokens are stateless, the client drops its copy.
pub async fn logout(identity: Identity) -> HttpResponse {
    tracing::info!(user_id = %identity.user_id, username = %identity.username, "User logged out");
    HttpResponse::NoContent().finish()
}
