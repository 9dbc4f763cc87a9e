use log::debug;
use std::sync::Arc;

use super::users_model::{NewUser, Profile, User, UserUpdate};
use super::users_traits::{UserRepositoryTrait, UserServiceTrait};
use crate::errors::Result;
use crate::wallets::default_wallet_seeds;

/// Service for managing users and their profiles.
pub struct UserService {
    repository: Arc<dyn UserRepositoryTrait>,
}

impl UserService {
    /// Creates a new UserService instance
    pub fn new(repository: Arc<dyn UserRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait::async_trait]
impl UserServiceTrait for UserService {
    /// Registers a new user.
    ///
    /// The profile and the starter wallets are created in the same storage
    /// transaction, so signup never yields a half-provisioned account.
    async fn register_user(&self, new_user: NewUser) -> Result<User> {
        new_user.validate()?;
        debug!("Registering user {}", new_user.email);
        self.repository
            .create_provisioned(new_user, default_wallet_seeds())
            .await
    }

    /// Applies a partial update to an existing user.
    async fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        update.validate()?;
        self.repository.update(user_id, update).await
    }

    /// Deletes a user by ID.
    async fn delete_user(&self, user_id: &str) -> Result<()> {
        self.repository.delete(user_id).await?;
        Ok(())
    }

    fn get_user(&self, user_id: &str) -> Result<User> {
        self.repository.get_by_id(user_id)
    }

    fn get_user_by_email(&self, email: &str) -> Result<User> {
        self.repository.get_by_email(email)
    }

    fn list_users(&self) -> Result<Vec<User>> {
        self.repository.list()
    }

    fn get_profile(&self, profile_id: &str) -> Result<Profile> {
        self.repository.get_profile(profile_id)
    }

    fn get_profile_for_user(&self, user_id: &str) -> Result<Profile> {
        self.repository.get_profile_for_user(user_id)
    }

    fn list_profiles(&self) -> Result<Vec<Profile>> {
        self.repository.list_profiles()
    }
}
