//! User repository and service traits.
//!
//! These traits define the contract for user operations without any
//! database-specific types, allowing for different storage implementations.

use async_trait::async_trait;

use super::users_model::{NewUser, Profile, User, UserUpdate};
use crate::errors::Result;
use crate::wallets::WalletSeed;

/// Trait defining the contract for User repository operations.
#[async_trait]
pub trait UserRepositoryTrait: Send + Sync {
    /// Creates the user together with their profile and one wallet per seed,
    /// all in a single storage transaction.
    async fn create_provisioned(
        &self,
        new_user: NewUser,
        wallet_seeds: Vec<WalletSeed>,
    ) -> Result<User>;

    /// Applies a partial update to an existing user.
    async fn update(&self, user_id: &str, update: UserUpdate) -> Result<User>;

    /// Deletes a user; wallets, profile, and ledger rows cascade with it.
    ///
    /// Returns the number of deleted user records.
    async fn delete(&self, user_id: &str) -> Result<usize>;

    /// Retrieves a user by ID.
    fn get_by_id(&self, user_id: &str) -> Result<User>;

    /// Retrieves a user by email.
    fn get_by_email(&self, email: &str) -> Result<User>;

    /// Lists all users.
    fn list(&self) -> Result<Vec<User>>;

    /// Retrieves a profile by its own ID.
    fn get_profile(&self, profile_id: &str) -> Result<Profile>;

    /// Retrieves the profile belonging to `user_id`.
    fn get_profile_for_user(&self, user_id: &str) -> Result<Profile>;

    /// Lists all profiles.
    fn list_profiles(&self) -> Result<Vec<Profile>>;
}

/// Trait defining the contract for User service operations.
#[async_trait]
pub trait UserServiceTrait: Send + Sync {
    /// Registers a new user and provisions their profile and starter wallets.
    async fn register_user(&self, new_user: NewUser) -> Result<User>;

    /// Applies a partial update with business validation.
    async fn update_user(&self, user_id: &str, update: UserUpdate) -> Result<User>;

    /// Deletes a user and everything hanging off them.
    async fn delete_user(&self, user_id: &str) -> Result<()>;

    fn get_user(&self, user_id: &str) -> Result<User>;

    fn get_user_by_email(&self, email: &str) -> Result<User>;

    fn list_users(&self) -> Result<Vec<User>>;

    fn get_profile(&self, profile_id: &str) -> Result<Profile>;

    fn get_profile_for_user(&self, user_id: &str) -> Result<Profile>;

    fn list_profiles(&self) -> Result<Vec<Profile>>;
}
