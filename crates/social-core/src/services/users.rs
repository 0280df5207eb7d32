use std::sync::Arc;

use uuid::Uuid;

use super::Repositories;
use crate::domain::{Follow, User, user_image_file_path};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    BaseRepository, Clock, FollowRepository, IdGenerator, MediaStorage, PasswordService,
    UserRepository,
};

pub const PASSWORD_MIN_LENGTH: usize = 8;

#[derive(Debug, Clone, Default)]
pub struct RegisterUser {
    pub username: String,
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateProfile {
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub bio: Option<String>,
}

#[derive(Clone)]
pub struct UserService {
    users: Arc<dyn UserRepository>,
    follows: Arc<dyn FollowRepository>,
    passwords: Arc<dyn PasswordService>,
    storage: Arc<dyn MediaStorage>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdGenerator>,
}

impl UserService {
    pub fn new(
        repos: &Repositories,
        passwords: Arc<dyn PasswordService>,
        storage: Arc<dyn MediaStorage>,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            users: repos.users.clone(),
            follows: repos.follows.clone(),
            passwords,
            storage,
            clock,
            ids,
        }
    }

    pub async fn register(&self, input: RegisterUser) -> Result<User, DomainError> {
        validate_password(&input.password)?;
        User::validate_username(&input.username)?;
        User::validate_email(&input.email)?;

        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(DomainError::Duplicate("Email already registered".into()));
        }
        if self.users.find_by_username(&input.username).await?.is_some() {
            return Err(DomainError::Duplicate("Username already taken".into()));
        }

        let password_hash = self.passwords.hash(&input.password)?;
        let user = User::new(input.username, input.email, password_hash, self.clock.now())?
            .with_names(input.first_name, input.last_name);
        let user = self.users.save(user).await?;

        tracing::info!(user_id = %user.id, username = %user.username, "User registered");
        Ok(user)
    }

    /// Check credentials. Unknown emails and wrong passwords look the same.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let user = self
            .users
            .find_by_email(email)
            .await?
            .ok_or(DomainError::Unauthorized)?;

        if !self.passwords.verify(password, &user.password_hash)? {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(DomainError::Unauthorized);
        }
        Ok(user)
    }

    pub async fn get(&self, id: Uuid) -> Result<User, DomainError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))
    }

    pub async fn list(&self, username_contains: Option<&str>) -> Result<Vec<User>, DomainError> {
        Ok(self.users.list(username_contains).await?)
    }

    pub async fn update_profile(&self, id: Uuid, input: UpdateProfile) -> Result<User, DomainError> {
        let mut user = self.get(id).await?;

        if let Some(username) = input.username {
            if username != user.username {
                User::validate_username(&username)?;
                if self.users.find_by_username(&username).await?.is_some() {
                    return Err(DomainError::Duplicate("Username already taken".into()));
                }
                user.username = username;
            }
        }
        if let Some(first_name) = input.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = input.last_name {
            user.last_name = last_name;
        }
        if let Some(bio) = input.bio {
            user.bio = bio;
        }
        user.updated_at = self.clock.now();

        Ok(self.users.save(user).await?)
    }

    pub async fn change_password(
        &self,
        id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), DomainError> {
        let mut user = self.get(id).await?;

        if !self.passwords.verify(old_password, &user.password_hash)? {
            return Err(DomainError::validation("Old password is incorrect."));
        }
        validate_password(new_password)?;

        user.password_hash = self.passwords.hash(new_password)?;
        user.updated_at = self.clock.now();
        self.users.save(user).await?;

        tracing::info!(user_id = %id, "Password changed");
        Ok(())
    }

    /// Store a new profile picture and point the user at it.
    pub async fn set_image(&self, id: Uuid, filename: &str, bytes: Vec<u8>) -> Result<User, DomainError> {
        if bytes.is_empty() {
            return Err(DomainError::validation("The submitted file is empty."));
        }

        let mut user = self.get(id).await?;
        let path = user_image_file_path(&user.username, self.ids.new_id(), filename)?;
        self.storage.save(&path, bytes).await?;

        user.image = Some(path);
        user.updated_at = self.clock.now();
        Ok(self.users.save(user).await?)
    }

    pub async fn follow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<Follow, DomainError> {
        let follow = Follow::new(follower_id, followee_id, self.clock.now())?;
        self.get(followee_id).await?;

        let follow = self.follows.follow(follow).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::Duplicate("You already follow this user.".into()),
            other => other.into(),
        })?;

        tracing::info!(follower_id = %follower_id, followee_id = %followee_id, "User followed");
        Ok(follow)
    }

    pub async fn unfollow(&self, follower_id: Uuid, followee_id: Uuid) -> Result<(), DomainError> {
        self.follows
            .unfollow(follower_id, followee_id)
            .await
            .map_err(|e| match e {
                RepoError::NotFound => DomainError::not_found("Follow", followee_id),
                other => other.into(),
            })
    }
}

fn validate_password(password: &str) -> Result<(), DomainError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(DomainError::validation(format!(
            "Password must be at least {} characters",
            PASSWORD_MIN_LENGTH
        )));
    }
    Ok(())
}
