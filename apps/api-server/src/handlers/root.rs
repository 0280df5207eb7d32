//! API root: a directory of the most useful endpoints for the caller.

use actix_web::{HttpRequest, HttpResponse};
use social_shared::ApiRootResponse;
use social_shared::root::{AuthEndpoints, DiscoveryEndpoints, OwnProfileEndpoints};

use super::names;
use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;

/// A named route could not be turned into a URL.
#[derive(Debug, thiserror::Error)]
pub enum RouteError {
    #[error("route `{name}` cannot be resolved: {reason}")]
    Missing { name: String, reason: String },
}

/// Turns route names into absolute URLs.
pub trait UrlResolver {
    fn resolve(&self, name: &str, params: &[&str]) -> Result<String, RouteError>;
}

impl UrlResolver for HttpRequest {
    fn resolve(&self, name: &str, params: &[&str]) -> Result<String, RouteError> {
        self.url_for(name, params)
            .map(|url| url.to_string())
            .map_err(|e| RouteError::Missing {
                name: name.to_string(),
                reason: e.to_string(),
            })
    }
}

/// Build the root document for the user identified by `user_id`.
pub fn describe(resolver: &impl UrlResolver, user_id: &str) -> Result<ApiRootResponse, RouteError> {
    let url = |name: &str| resolver.resolve(name, &[]);

    Ok(ApiRootResponse {
        auth: AuthEndpoints {
            register: url(names::USER_REGISTER)?,
            login: url(names::USER_LOGIN)?,
            logout: url(names::USER_LOGOUT)?,
        },
        own_profile: OwnProfileEndpoints {
            view_profile: resolver.resolve(names::USER_DETAIL, &[user_id])?,
            manage_profile: url(names::MANAGE_DETAIL)?,
            upload_profile_image: url(names::MANAGE_UPLOAD_IMAGE)?,
            change_password: url(names::MANAGE_CHANGE_PASSWORD)?,
            create_post: url(names::POST_LIST)?,
        },
        discovery: DiscoveryEndpoints {
            users: url(names::USER_LIST)?,
            followed_authors_posts: url(names::POST_FOLLOWED_AUTHORS)?,
            liked_posts: url(names::POST_LIKED)?,
            hashtags: url(names::HASHTAG_LIST)?,
            postponed_posts: url(names::POSTPONED_POST_LIST)?,
        },
    })
}

/// GET /api/
pub async fn api_root(req: HttpRequest, identity: Identity) -> AppResult<HttpResponse> {
    let root = describe(&req, &identity.user_id.to_string())?;
    Ok(HttpResponse::Ok().json(root))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    /// Resolves against a fixed table of path templates.
    struct StaticResolver(HashMap<&'static str, &'static str>);

    impl StaticResolver {
        fn complete() -> Self {
            Self(HashMap::from([
                (names::USER_REGISTER, "/api/user/register"),
                (names::USER_LOGIN, "/api/user/login"),
                (names::USER_LOGOUT, "/api/user/logout"),
                (names::USER_DETAIL, "/api/user/users/{pk}"),
                (names::USER_LIST, "/api/user/users"),
                (names::MANAGE_DETAIL, "/api/user/me"),
                (names::MANAGE_UPLOAD_IMAGE, "/api/user/me/upload-image"),
                (names::MANAGE_CHANGE_PASSWORD, "/api/user/me/change-password"),
                (names::POST_LIST, "/api/feed/posts"),
                (names::POST_FOLLOWED_AUTHORS, "/api/feed/posts/followed-authors-posts"),
                (names::POST_LIKED, "/api/feed/posts/liked-posts"),
                (names::HASHTAG_LIST, "/api/feed/hashtags"),
                (names::POSTPONED_POST_LIST, "/api/feed/postponed-posts"),
            ]))
        }
    }

    impl UrlResolver for StaticResolver {
        fn resolve(&self, name: &str, params: &[&str]) -> Result<String, RouteError> {
            let template = self.0.get(name).ok_or_else(|| RouteError::Missing {
                name: name.to_string(),
                reason: "unknown".to_string(),
            })?;
            let path = params
                .iter()
                .fold(template.to_string(), |path, p| path.replacen("{pk}", p, 1));
            Ok(format!("http://testserver{}", path))
        }
    }

    #[test]
    fn test_profile_url_carries_caller_id() {
        let root = describe(&StaticResolver::complete(), "7").unwrap();

        assert_eq!(root.own_profile.view_profile, "http://testserver/api/user/users/7");
        assert_eq!(root.auth.logout, "http://testserver/api/user/logout");
        assert_eq!(
            root.discovery.postponed_posts,
            "http://testserver/api/feed/postponed-posts"
        );
    }

    #[test]
    fn test_missing_route_is_reported() {
        let mut resolver = StaticResolver::complete();
        resolver.0.remove(names::POST_LIKED);

        match describe(&resolver, "7") {
            Err(RouteError::Missing { name, .. }) => assert_eq!(name, names::POST_LIKED),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
