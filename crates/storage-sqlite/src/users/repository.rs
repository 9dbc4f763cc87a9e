use async_trait::async_trait;
use diesel::prelude::*;
use diesel::r2d2::{self, Pool};
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use std::sync::Arc;
use uuid::Uuid;

use coinvest_core::users::{NewUser, Profile, User, UserRepositoryTrait, UserUpdate};
use coinvest_core::wallets::WalletSeed;
use coinvest_core::Result;

use super::model::{ProfileDB, UserDB};
use crate::db::{get_connection, WriteHandle};
use crate::errors::StorageError;
use crate::schema::{profiles, users, wallets};
use crate::wallets::WalletDB;

/// Repository for managing user and profile data in the database
pub struct UserRepository {
    pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
    writer: WriteHandle,
}

impl UserRepository {
    pub fn new(
        pool: Arc<Pool<r2d2::ConnectionManager<SqliteConnection>>>,
        writer: WriteHandle,
    ) -> Self {
        UserRepository { pool, writer }
    }
}

#[async_trait]
impl UserRepositoryTrait for UserRepository {
    /// Inserts the user, their profile, and one zero-balance wallet per seed
    /// in a single write transaction. A failure on any row rolls back the
    /// whole signup.
    async fn create_provisioned(
        &self,
        new_user: NewUser,
        wallet_seeds: Vec<WalletSeed>,
    ) -> Result<User> {
        self.writer
            .exec(move |conn| {
                let mut user_db: UserDB = new_user.into();
                if user_db.id.is_empty() {
                    user_db.id = Uuid::new_v4().to_string();
                }

                diesel::insert_into(users::table)
                    .values(&user_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let profile_db = ProfileDB {
                    id: Uuid::new_v4().to_string(),
                    user_id: user_db.id.clone(),
                };
                diesel::insert_into(profiles::table)
                    .values(&profile_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                for seed in wallet_seeds {
                    let wallet_db = WalletDB {
                        id: Uuid::new_v4().to_string(),
                        user_id: user_db.id.clone(),
                        title: seed.title,
                        wallet_address: seed.wallet_address,
                        balance: Decimal::ZERO.to_string(),
                    };
                    diesel::insert_into(wallets::table)
                        .values(&wallet_db)
                        .execute(conn)
                        .map_err(StorageError::from)?;
                }

                Ok(user_db.into())
            })
            .await
    }

    async fn update(&self, user_id: &str, update: UserUpdate) -> Result<User> {
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let mut user_db = users::table
                    .select(UserDB::as_select())
                    .find(&user_id_owned)
                    .first::<UserDB>(conn)
                    .map_err(StorageError::from)?;

                if let Some(email) = update.email {
                    user_db.email = email;
                }
                if let Some(password_hash) = update.password_hash {
                    user_db.password_hash = password_hash;
                }
                if let Some(full_name) = update.full_name {
                    user_db.full_name = Some(full_name);
                }
                if let Some(profile_picture) = update.profile_picture {
                    user_db.profile_picture = profile_picture;
                }
                if let Some(is_active) = update.is_active {
                    user_db.is_active = is_active;
                }
                if let Some(is_staff) = update.is_staff {
                    user_db.is_staff = is_staff;
                }
                if let Some(is_superuser) = update.is_superuser {
                    user_db.is_superuser = is_superuser;
                }

                diesel::update(users::table.find(&user_db.id))
                    .set(&user_db)
                    .execute(conn)
                    .map_err(StorageError::from)?;

                Ok(user_db.into())
            })
            .await
    }

    /// Deletes a user; the profile, wallets, and ledger rows cascade via
    /// foreign keys.
    async fn delete(&self, user_id: &str) -> Result<usize> {
        let user_id_owned = user_id.to_string();
        self.writer
            .exec(move |conn| {
                let affected_rows = diesel::delete(users::table.find(user_id_owned))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected_rows)
            })
            .await
    }

    fn get_by_id(&self, user_id: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user_db = users::table
            .select(UserDB::as_select())
            .find(user_id)
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(user_db.into())
    }

    fn get_by_email(&self, email: &str) -> Result<User> {
        let mut conn = get_connection(&self.pool)?;

        let user_db = users::table
            .select(UserDB::as_select())
            .filter(users::email.eq(email))
            .first::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(user_db.into())
    }

    fn list(&self) -> Result<Vec<User>> {
        let mut conn = get_connection(&self.pool)?;

        let results = users::table
            .select(UserDB::as_select())
            .order(users::date_joined.asc())
            .load::<UserDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(User::from).collect())
    }

    fn get_profile(&self, profile_id: &str) -> Result<Profile> {
        let mut conn = get_connection(&self.pool)?;

        let profile_db = profiles::table
            .select(ProfileDB::as_select())
            .find(profile_id)
            .first::<ProfileDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(profile_db.into())
    }

    fn get_profile_for_user(&self, user_id: &str) -> Result<Profile> {
        let mut conn = get_connection(&self.pool)?;

        let profile_db = profiles::table
            .select(ProfileDB::as_select())
            .filter(profiles::user_id.eq(user_id))
            .first::<ProfileDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(profile_db.into())
    }

    fn list_profiles(&self) -> Result<Vec<Profile>> {
        let mut conn = get_connection(&self.pool)?;

        let results = profiles::table
            .select(ProfileDB::as_select())
            .load::<ProfileDB>(&mut conn)
            .map_err(StorageError::from)?;

        Ok(results.into_iter().map(Profile::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, write_actor::spawn_writer};
    use crate::wallets::WalletRepository;
    use coinvest_core::errors::{DatabaseError, Error};
    use coinvest_core::users::DEFAULT_PROFILE_PICTURE;
    use coinvest_core::wallets::WalletRepositoryTrait;
    use diesel::r2d2::ConnectionManager;
    use tempfile::tempdir;

    /// Creates a test repository backed by a real migrated temp database.
    /// Returns the repository, pool, and temp dir (to keep it alive).
    async fn create_test_repository() -> (
        UserRepository,
        Arc<Pool<ConnectionManager<SqliteConnection>>>,
        tempfile::TempDir,
    ) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let db_path_str = db_path.to_string_lossy().to_string();

        let pool = create_pool(&db_path_str).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");

        let writer = spawn_writer((*pool).clone());

        let repo = UserRepository::new(Arc::clone(&pool), writer);
        (repo, pool, temp_dir)
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            id: None,
            email: email.to_string(),
            password_hash: "argon2-phc-string".to_string(),
            full_name: Some("Test User".to_string()),
            is_staff: false,
            is_superuser: false,
        }
    }

    fn starter_seeds() -> Vec<WalletSeed> {
        vec![
            WalletSeed {
                title: "USDT(TRC20)".to_string(),
                wallet_address: "addr-usdt".to_string(),
            },
            WalletSeed {
                title: "BNB".to_string(),
                wallet_address: "addr-bnb".to_string(),
            },
        ]
    }

    #[tokio::test]
    async fn test_create_provisioned_creates_profile_and_wallets() {
        let (repo, pool, _temp_dir) = create_test_repository().await;

        let user = repo
            .create_provisioned(new_user("alice@example.com"), starter_seeds())
            .await
            .expect("Failed to provision user");

        assert_eq!(user.email, "alice@example.com");
        assert_eq!(user.profile_picture, DEFAULT_PROFILE_PICTURE);
        assert!(user.is_active);

        let profile = repo
            .get_profile_for_user(&user.id)
            .expect("Profile should exist after signup");
        assert_eq!(profile.user_id, user.id);

        let wallet_repo = WalletRepository::new(Arc::clone(&pool));
        let user_wallets = wallet_repo
            .list_for_user(&user.id)
            .expect("Failed to list wallets");
        assert_eq!(user_wallets.len(), 2);
        assert!(user_wallets
            .iter()
            .all(|w| w.balance == rust_decimal::Decimal::ZERO));
    }

    #[tokio::test]
    async fn test_duplicate_email_maps_to_unique_violation() {
        let (repo, pool, _temp_dir) = create_test_repository().await;

        repo.create_provisioned(new_user("bob@example.com"), starter_seeds())
            .await
            .expect("First signup should succeed");

        let err = repo
            .create_provisioned(new_user("bob@example.com"), starter_seeds())
            .await
            .expect_err("Duplicate email should fail");
        assert!(matches!(
            err,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));

        // The failed signup must not leave partial rows behind.
        let wallet_repo = WalletRepository::new(Arc::clone(&pool));
        assert_eq!(wallet_repo.list().expect("list failed").len(), 2);
        assert_eq!(repo.list_profiles().expect("list failed").len(), 1);
    }

    #[tokio::test]
    async fn test_update_retains_unset_fields() {
        let (repo, _pool, _temp_dir) = create_test_repository().await;

        let user = repo
            .create_provisioned(new_user("carol@example.com"), vec![])
            .await
            .expect("Failed to provision user");

        let updated = repo
            .update(
                &user.id,
                UserUpdate {
                    full_name: Some("Carol Updated".to_string()),
                    ..Default::default()
                },
            )
            .await
            .expect("Update should succeed");

        assert_eq!(updated.full_name.as_deref(), Some("Carol Updated"));
        assert_eq!(updated.email, "carol@example.com");
        assert_eq!(updated.profile_picture, DEFAULT_PROFILE_PICTURE);
        assert_eq!(updated.password_hash, user.password_hash);
    }

    #[tokio::test]
    async fn test_delete_cascades_to_profile_and_wallets() {
        let (repo, pool, _temp_dir) = create_test_repository().await;

        let user = repo
            .create_provisioned(new_user("dave@example.com"), starter_seeds())
            .await
            .expect("Failed to provision user");

        let deleted = repo.delete(&user.id).await.expect("Delete should succeed");
        assert_eq!(deleted, 1);

        let err = repo.get_by_id(&user.id).expect_err("User should be gone");
        assert!(matches!(err, Error::Database(DatabaseError::NotFound(_))));

        let wallet_repo = WalletRepository::new(Arc::clone(&pool));
        assert!(wallet_repo
            .list_for_user(&user.id)
            .expect("list failed")
            .is_empty());
        assert!(repo.list_profiles().expect("list failed").is_empty());
    }
}
