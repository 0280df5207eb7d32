//! Shape of the API root document: three groups of labelled, absolute URLs.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApiRootResponse {
    #[serde(rename = "Auth endpoints")]
    pub auth: AuthEndpoints,
    #[serde(rename = "Managing own profile endpoints")]
    pub own_profile: OwnProfileEndpoints,
    #[serde(rename = "Retrieving users and posts endpoints")]
    pub discovery: DiscoveryEndpoints,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthEndpoints {
    pub register: String,
    pub login: String,
    pub logout: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OwnProfileEndpoints {
    #[serde(rename = "view profile and posts")]
    pub view_profile: String,
    #[serde(rename = "manage profile")]
    pub manage_profile: String,
    pub upload_profile_image: String,
    pub change_password: String,
    #[serde(rename = "create post")]
    pub create_post: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveryEndpoints {
    #[serde(rename = "users list")]
    pub users: String,
    #[serde(rename = "posts of users you follow")]
    pub followed_authors_posts: String,
    #[serde(rename = "posts that you liked")]
    pub liked_posts: String,
    #[serde(rename = "hashtags list")]
    pub hashtags: String,
    #[serde(rename = "your postponed posts")]
    pub postponed_posts: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_with_human_readable_labels() {
        let url = |p: &str| format!("http://localhost/api/{}", p);
        let root = ApiRootResponse {
            auth: AuthEndpoints {
                register: url("user/register"),
                login: url("user/login"),
                logout: url("user/logout"),
            },
            own_profile: OwnProfileEndpoints {
                view_profile: url("user/users/7"),
                manage_profile: url("user/me"),
                upload_profile_image: url("user/me/upload-image"),
                change_password: url("user/me/change-password"),
                create_post: url("feed/posts"),
            },
            discovery: DiscoveryEndpoints {
                users: url("user/users"),
                followed_authors_posts: url("feed/posts/followed-authors-posts"),
                liked_posts: url("feed/posts/liked-posts"),
                hashtags: url("feed/hashtags"),
                postponed_posts: url("feed/postponed-posts"),
            },
        };

        let json = serde_json::to_value(&root).unwrap();

        assert_eq!(
            json["Managing own profile endpoints"]["view profile and posts"],
            "http://localhost/api/user/users/7"
        );
        assert_eq!(
            json["Retrieving users and posts endpoints"]["your postponed posts"],
            "http://localhost/api/feed/postponed-posts"
        );
        assert_eq!(json["Auth endpoints"].as_object().unwrap().len(), 3);
    }
}
