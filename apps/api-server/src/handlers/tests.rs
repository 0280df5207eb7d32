//! HTTP scenarios against in-memory repositories and a fixed clock.

use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use chrono::{TimeDelta, TimeZone, Utc};
use serde_json::{Value, json};
use uuid::Uuid;

use social_core::ports::{
    AuthError, FixedClock, PasswordService, SequentialIdGenerator, TokenService,
};
use social_infra::{InMemoryMediaStorage, InMemoryStore, JwtConfig, JwtTokenService};

use super::configure_routes;
use crate::state::AppState;

struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain:{password}"))
    }
}

struct TestContext {
    state: web::Data<AppState>,
    tokens: web::Data<Arc<dyn TokenService>>,
    clock: Arc<FixedClock>,
    storage: Arc<InMemoryMediaStorage>,
}

impl TestContext {
    fn new() -> Self {
        let clock = Arc::new(FixedClock::new(
            Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0).unwrap(),
        ));
        let storage = Arc::new(InMemoryMediaStorage::new());
        let state = AppState::build(
            Arc::new(InMemoryStore::new()).repositories(),
            Arc::new(PlainPasswords),
            storage.clone(),
            clock.clone(),
            Arc::new(SequentialIdGenerator::new()),
        );
        let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
            secret: "test-secret".to_string(),
            expiration_hours: 1,
            issuer: "test".to_string(),
        }));

        Self {
            state: web::Data::new(state),
            tokens: web::Data::new(tokens),
            clock,
            storage,
        }
    }
}

macro_rules! service {
    ($ctx:expr) => {
        test::init_service(
            App::new()
                .app_data($ctx.state.clone())
                .app_data($ctx.tokens.clone())
                .configure(configure_routes),
        )
        .await
    };
}

fn bearer(token: &str) -> (header::HeaderName, String) {
    (header::AUTHORIZATION, format!("Bearer {token}"))
}

/// Register `username` and return `(token, user_id)`.
macro_rules! register {
    ($app:expr, $username:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/user/register")
            .set_json(json!({
                "username": $username,
                "email": format!("{}@example.com", $username),
                "password": "correct-horse",
                "first_name": $username,
            }))
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        let token = body["access_token"].as_str().unwrap().to_string();

        let req = test::TestRequest::get()
            .uri("/api/user/me")
            .insert_header(bearer(&token))
            .to_request();
        let me: Value = test::call_and_read_body_json(&$app, req).await;
        let id: Uuid = me["id"].as_str().unwrap().parse().unwrap();
        (token, id)
    }};
}

macro_rules! create_post {
    ($app:expr, $token:expr, $body:expr) => {{
        let req = test::TestRequest::post()
            .uri("/api/feed/posts")
            .insert_header(bearer(&$token))
            .set_json($body)
            .to_request();
        let resp = test::call_service(&$app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        body["id"].as_str().unwrap().to_string()
    }};
}

#[actix_web::test]
async fn test_api_root_lists_absolute_urls_for_caller() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (token, user_id) = register!(app, "alice");

    let req = test::TestRequest::get()
        .uri("/api/")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;

    let profile = body["Managing own profile endpoints"]["view profile and posts"]
        .as_str()
        .unwrap();
    assert!(profile.starts_with("http://"));
    assert!(profile.ends_with(&format!("/api/user/users/{user_id}")));

    let logout = body["Auth endpoints"]["logout"].as_str().unwrap();
    assert!(logout.ends_with("/api/user/logout"));

    let discovery = &body["Retrieving users and posts endpoints"];
    assert!(
        discovery["posts of users you follow"]
            .as_str()
            .unwrap()
            .ends_with("/api/feed/posts/followed-authors-posts")
    );
    assert!(
        discovery["your postponed posts"]
            .as_str()
            .unwrap()
            .ends_with("/api/feed/postponed-posts")
    );
}

#[actix_web::test]
async fn test_api_root_requires_authentication() {
    let ctx = TestContext::new();
    let app = service!(ctx);

    let req = test::TestRequest::get().uri("/api/").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[actix_web::test]
async fn test_health_is_public() {
    let ctx = TestContext::new();
    let app = service!(ctx);

    let req = test::TestRequest::get().uri("/api/health").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["status"], "ok");
}

#[actix_web::test]
async fn test_duplicate_like_is_conflict() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (alice, _) = register!(app, "alice");
    let (bob, _) = register!(app, "bob");
    let post_id = create_post!(app, alice, json!({ "text": "hello" }));

    let like = || {
        test::TestRequest::post()
            .uri(&format!("/api/feed/posts/{post_id}/likes"))
            .insert_header(bearer(&bob))
            .to_request()
    };

    let first = test::call_service(&app, like()).await;
    assert_eq!(first.status(), StatusCode::CREATED);

    let second = test::call_service(&app, like()).await;
    assert_eq!(second.status(), StatusCode::CONFLICT);
    let body: Value = test::read_body_json(second).await;
    assert_eq!(body["detail"], "You have already liked this post.");

    let req = test::TestRequest::get()
        .uri("/api/feed/posts/liked-posts")
        .insert_header(bearer(&bob))
        .to_request();
    let liked: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(liked.as_array().unwrap().len(), 1);
}

#[actix_web::test]
async fn test_past_publish_time_is_bad_request() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (alice, _) = register!(app, "alice");

    let req = test::TestRequest::post()
        .uri("/api/feed/posts")
        .insert_header(bearer(&alice))
        .set_json(json!({
            "text": "too late",
            "published_at": "2023-12-31T10:00:00Z",
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Start time must be later than now.");
}

#[actix_web::test]
async fn test_postponed_post_is_published_on_request() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (alice, _) = register!(app, "alice");
    let (bob, _) = register!(app, "bob");
    let post_id = create_post!(
        app,
        alice,
        json!({
            "text": "later",
            "published_at": "2024-01-02T10:00:00Z",
            "is_published": false,
        })
    );

    let req = test::TestRequest::get()
        .uri("/api/feed/postponed-posts")
        .insert_header(bearer(&alice))
        .to_request();
    let postponed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(postponed.as_array().unwrap().len(), 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/feed/posts/{post_id}"))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    ctx.clock.advance(TimeDelta::minutes(1));
    let publish = || {
        test::TestRequest::post()
            .uri(&format!("/api/feed/posts/{post_id}/publish"))
            .insert_header(bearer(&alice))
            .to_request()
    };
    let resp = test::call_service(&app, publish()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["is_published"], true);
    assert_eq!(body["published_at"], "2024-01-01T10:01:00Z");

    let again = test::call_service(&app, publish()).await;
    assert_eq!(again.status(), StatusCode::BAD_REQUEST);

    let req = test::TestRequest::get()
        .uri(&format!("/api/feed/posts/{post_id}"))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
}

#[actix_web::test]
async fn test_other_users_cannot_delete_post() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (alice, _) = register!(app, "alice");
    let (bob, _) = register!(app, "bob");
    let post_id = create_post!(app, alice, json!({ "text": "mine" }));

    let req = test::TestRequest::delete()
        .uri(&format!("/api/feed/posts/{post_id}"))
        .insert_header(bearer(&bob))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/feed/posts/{post_id}"))
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NO_CONTENT);
}

#[actix_web::test]
async fn test_upload_post_image() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (alice, _) = register!(app, "alice");
    let post_id = create_post!(app, alice, json!({ "text": "with picture" }));

    let boundary = "social-test-boundary";
    let body = format!(
        "--{boundary}\r\n\
         Content-Disposition: form-data; name=\"image\"; filename=\"photo.JPG\"\r\n\
         Content-Type: image/jpeg\r\n\r\n\
         fakejpeg\r\n\
         --{boundary}--\r\n"
    );
    let req = test::TestRequest::post()
        .uri(&format!("/api/feed/posts/{post_id}/upload-image"))
        .insert_header(bearer(&alice))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);

    let image: Value = test::read_body_json(resp).await;
    let path = image["image"].as_str().unwrap();
    assert_eq!(
        path,
        format!("uploads/posts/alice_2024-01-01_10-00-00-{}.JPG", Uuid::from_u128(1))
    );
    assert_eq!(ctx.storage.get(path).await, Some(b"fakejpeg".to_vec()));
}

#[actix_web::test]
async fn test_invalid_hashtag_is_rejected() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (alice, _) = register!(app, "alice");

    let create = |name: &str| {
        test::TestRequest::post()
            .uri("/api/feed/hashtags")
            .insert_header(bearer(&alice))
            .set_json(json!({ "name": name }))
            .to_request()
    };

    let resp = test::call_service(&app, create("tech-news")).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["detail"], "Hashtag doesnt comply");

    let resp = test::call_service(&app, create("technews")).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
}

#[actix_web::test]
async fn test_follow_feeds_followed_authors_posts() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (alice, _) = register!(app, "alice");
    let (bob, bob_id) = register!(app, "bob");
    create_post!(app, bob, json!({ "text": "bob writes" }));

    let req = test::TestRequest::post()
        .uri(&format!("/api/user/users/{bob_id}/follow"))
        .insert_header(bearer(&alice))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CREATED);

    let req = test::TestRequest::get()
        .uri("/api/feed/posts/followed-authors-posts")
        .insert_header(bearer(&alice))
        .to_request();
    let feed: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);
    assert_eq!(feed[0]["author_id"], bob_id.to_string());
}

#[actix_web::test]
async fn test_logout_requires_token_and_returns_no_content() {
    let ctx = TestContext::new();
    let app = service!(ctx);
    let (token, _) = register!(app, "alice");

    let req = test::TestRequest::post().uri("/api/user/logout").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::post()
        .uri("/api/user/logout")
        .insert_header(bearer(&token))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NO_CONTENT);
}
