//! HTTP handlers and route configuration.

mod auth;
mod convert;
mod engagement;
mod hashtags;
mod health;
pub mod names;
mod posts;
pub mod root;
mod upload;
mod users;

#[cfg(test)]
mod tests;

use actix_web::web;

/// Configure all application routes. Every resource that the root document
/// links to is registered under its name.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(
                web::resource("/")
                    .name(names::API_ROOT)
                    .route(web::get().to(root::api_root)),
            )
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .service(web::scope("/user").configure(user_routes))
            .service(web::scope("/feed").configure(feed_routes)),
    );
}

fn user_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/register")
            .name(names::USER_REGISTER)
            .route(web::post().to(auth::register)),
    )
    .service(
        web::resource("/login")
            .name(names::USER_LOGIN)
            .route(web::post().to(auth::login)),
    )
    .service(
        web::resource("/logout")
            .name(names::USER_LOGOUT)
            .route(web::post().to(auth::logout)),
    )
    .service(
        web::resource("/users")
            .name(names::USER_LIST)
            .route(web::get().to(users::list)),
    )
    .service(
        web::resource("/users/{pk}")
            .name(names::USER_DETAIL)
            .route(web::get().to(users::detail)),
    )
    .service(
        web::resource("/users/{pk}/follow")
            .name(names::USER_FOLLOW)
            .route(web::post().to(users::follow))
            .route(web::delete().to(users::unfollow)),
    )
    .service(
        web::resource("/me")
            .name(names::MANAGE_DETAIL)
            .route(web::get().to(users::me))
            .route(web::patch().to(users::update_me)),
    )
    .service(
        web::resource("/me/upload-image")
            .name(names::MANAGE_UPLOAD_IMAGE)
            .route(web::post().to(users::upload_image)),
    )
    .service(
        web::resource("/me/change-password")
            .name(names::MANAGE_CHANGE_PASSWORD)
            .route(web::post().to(users::change_password)),
    );
}

fn feed_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/posts")
            .name(names::POST_LIST)
            .route(web::get().to(posts::list))
            .route(web::post().to(posts::create)),
    )
    // Static segments go before `/posts/{pk}` so they are not taken for ids
    .service(
        web::resource("/posts/followed-authors-posts")
            .name(names::POST_FOLLOWED_AUTHORS)
            .route(web::get().to(posts::followed_authors)),
    )
    .service(
        web::resource("/posts/liked-posts")
            .name(names::POST_LIKED)
            .route(web::get().to(posts::liked)),
    )
    .service(
        web::resource("/posts/{pk}")
            .name(names::POST_DETAIL)
            .route(web::get().to(posts::detail))
            .route(web::patch().to(posts::update))
            .route(web::delete().to(posts::delete)),
    )
    .service(
        web::resource("/posts/{pk}/publish")
            .name(names::POST_PUBLISH)
            .route(web::post().to(posts::publish)),
    )
    .service(
        web::resource("/posts/{pk}/upload-image")
            .name(names::POST_UPLOAD_IMAGE)
            .route(web::post().to(posts::upload_image)),
    )
    .service(
        web::resource("/posts/{pk}/comments")
            .name(names::POST_COMMENTS)
            .route(web::get().to(engagement::comments))
            .route(web::post().to(engagement::add_comment)),
    )
    .service(
        web::resource("/posts/{pk}/likes")
            .name(names::POST_LIKES)
            .route(web::get().to(engagement::likes))
            .route(web::post().to(engagement::like))
            .route(web::delete().to(engagement::unlike)),
    )
    .service(
        web::resource("/comments/{pk}")
            .name(names::COMMENT_DETAIL)
            .route(web::delete().to(engagement::delete_comment)),
    )
    .service(
        web::resource("/hashtags")
            .name(names::HASHTAG_LIST)
            .route(web::get().to(hashtags::list))
            .route(web::post().to(hashtags::create)),
    )
    .service(
        web::resource("/hashtags/{pk}")
            .name(names::HASHTAG_DETAIL)
            .route(web::get().to(hashtags::detail)),
    )
    .service(
        web::resource("/postponed-posts")
            .name(names::POSTPONED_POST_LIST)
            .route(web::get().to(posts::postponed)),
    );
}
