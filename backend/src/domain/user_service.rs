use std::sync::Arc;

use anyhow::{bail, Result};
use shared::{CreateUserRequest, HostRef, User, UserType};
use tracing::{info, warn};

use super::ids;
use crate::storage::json::{JsonConnection, UserRepository};
use crate::storage::traits::UserStorage;

const MAX_NAME_LEN: usize = 15;

/// Service for managing users (offer hosts and comment authors).
#[derive(Clone)]
pub struct UserService {
    user_repository: UserRepository,
}

impl UserService {
    pub fn new(connection: Arc<JsonConnection>) -> Self {
        Self { user_repository: UserRepository::new(connection) }
    }

    /// Register a new user. Emails are unique.
    pub async fn create(&self, request: CreateUserRequest) -> Result<User> {
        info!("Creating user: {}", request.email);
        Self::validate(&request.name, &request.email)?;

        if self.user_repository.find_user_by_email(&request.email).await?.is_some() {
            bail!("User with email {} already exists", request.email);
        }

        let user = User {
            id: ids::new_id("user"),
            name: request.name.trim().to_string(),
            email: request.email.trim().to_string(),
            avatar_url: request.avatar_url,
            user_type: request.user_type,
        };
        self.user_repository.store_user(&user).await?;

        info!("Created user {} with ID {}", user.email, user.id);
        Ok(user)
    }

    pub async fn get(&self, user_id: &str) -> Result<Option<User>> {
        let user = self.user_repository.get_user(user_id).await?;
        if user.is_none() {
            warn!("User not found: {}", user_id);
        }
        Ok(user)
    }

    pub async fn list(&self) -> Result<Vec<User>> {
        self.user_repository.list_users().await
    }

    /// Look the host up by email, registering them on first sight. Used by
    /// the import pipeline, where hosts arrive as inline row descriptors.
    pub async fn find_or_create(&self, host: &HostRef) -> Result<User> {
        if let Some(existing) = self.user_repository.find_user_by_email(&host.email).await? {
            return Ok(existing);
        }

        let user = User {
            id: ids::new_id("user"),
            name: host.name.clone(),
            email: host.email.clone(),
            avatar_url: host.avatar_url.clone(),
            user_type: UserType::Regular,
        };
        self.user_repository.store_user(&user).await?;
        info!("Registered host {} during import", user.email);
        Ok(user)
    }

    fn validate(name: &str, email: &str) -> Result<()> {
        let name = name.trim();
        if name.is_empty() || name.chars().count() > MAX_NAME_LEN {
            bail!("User name must be 1 to {} characters", MAX_NAME_LEN);
        }
        if !email.contains('@') {
            bail!("`{}` is not a valid email address", email);
        }
        Ok(())
    }
}
