#[cfg(test)]
mod tests {
    use crate::errors::{DatabaseError, Error, Result, ValidationError};
    use crate::users::users_model::*;
    use crate::users::{UserRepositoryTrait, UserService, UserServiceTrait};
    use crate::wallets::{WalletSeed, BNB_WALLET_TITLE, USDT_WALLET_ADDRESS, USDT_WALLET_TITLE};
    use async_trait::async_trait;
    use chrono::Utc;
    use std::sync::{Arc, Mutex};

    // --- Mock UserRepository ---
    #[derive(Clone, Default)]
    struct MockUserRepository {
        users: Arc<Mutex<Vec<User>>>,
        provisioned_seeds: Arc<Mutex<Vec<Vec<WalletSeed>>>>,
    }

    impl MockUserRepository {
        fn new() -> Self {
            Self::default()
        }

        fn add_user(&self, user: User) {
            self.users.lock().unwrap().push(user);
        }
    }

    #[async_trait]
    impl UserRepositoryTrait for MockUserRepository {
        async fn create_provisioned(
            &self,
            new_user: NewUser,
            wallet_seeds: Vec<WalletSeed>,
        ) -> Result<User> {
            {
                let users = self.users.lock().unwrap();
                if users.iter().any(|u| u.email == new_user.email) {
                    return Err(Error::Database(DatabaseError::UniqueViolation(format!(
                        "email '{}' is already registered",
                        new_user.email
                    ))));
                }
            }
            self.provisioned_seeds.lock().unwrap().push(wallet_seeds);
            let user = User {
                id: new_user.id.unwrap_or_else(|| "user-1".to_string()),
                email: new_user.email,
                password_hash: new_user.password_hash,
                full_name: new_user.full_name,
                profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
                is_active: true,
                is_staff: new_user.is_staff,
                is_superuser: new_user.is_superuser,
                date_joined: Utc::now().naive_utc(),
            };
            self.add_user(user.clone());
            Ok(user)
        }

        async fn update(&self, user_id: &str, update: UserUpdate) -> Result<User> {
            let mut users = self.users.lock().unwrap();
            let user = users
                .iter_mut()
                .find(|u| u.id == user_id)
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!("user {user_id}")))
                })?;
            if let Some(email) = update.email {
                user.email = email;
            }
            if let Some(picture) = update.profile_picture {
                user.profile_picture = picture;
            }
            Ok(user.clone())
        }

        async fn delete(&self, _user_id: &str) -> Result<usize> {
            unimplemented!()
        }

        fn get_by_id(&self, user_id: &str) -> Result<User> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.id == user_id)
                .cloned()
                .ok_or_else(|| Error::Database(DatabaseError::NotFound(format!("user {user_id}"))))
        }

        fn get_by_email(&self, email: &str) -> Result<User> {
            self.users
                .lock()
                .unwrap()
                .iter()
                .find(|u| u.email == email)
                .cloned()
                .ok_or_else(|| {
                    Error::Database(DatabaseError::NotFound(format!("user with email {email}")))
                })
        }

        fn list(&self) -> Result<Vec<User>> {
            Ok(self.users.lock().unwrap().clone())
        }

        fn get_profile(&self, _profile_id: &str) -> Result<Profile> {
            unimplemented!()
        }

        fn get_profile_for_user(&self, _user_id: &str) -> Result<Profile> {
            unimplemented!()
        }

        fn list_profiles(&self) -> Result<Vec<Profile>> {
            unimplemented!()
        }
    }

    fn new_user(email: &str) -> NewUser {
        NewUser {
            id: None,
            email: email.to_string(),
            password_hash: "$argon2id$dummy".to_string(),
            full_name: Some("Test User".to_string()),
            is_staff: false,
            is_superuser: false,
        }
    }

    #[tokio::test]
    async fn register_user_provisions_starter_wallets() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(repository.clone());

        let user = service.register_user(new_user("ada@example.com")).await.unwrap();
        assert_eq!(user.email, "ada@example.com");
        assert_eq!(user.profile_picture, DEFAULT_PROFILE_PICTURE);

        let seeds = repository.provisioned_seeds.lock().unwrap();
        assert_eq!(seeds.len(), 1);
        let titles: Vec<&str> = seeds[0].iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec![USDT_WALLET_TITLE, BNB_WALLET_TITLE]);
        assert_eq!(seeds[0][0].wallet_address, USDT_WALLET_ADDRESS);
    }

    #[tokio::test]
    async fn register_user_rejects_invalid_email() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let result = service.register_user(new_user("not-an-email")).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::InvalidInput(_)))
        ));
    }

    #[tokio::test]
    async fn register_user_requires_password_hash() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let mut input = new_user("ada@example.com");
        input.password_hash = String::new();
        let result = service.register_user(input).await;
        assert!(matches!(
            result,
            Err(Error::Validation(ValidationError::MissingField(_)))
        ));
    }

    #[tokio::test]
    async fn register_user_surfaces_duplicate_email() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(repository.clone());

        service.register_user(new_user("ada@example.com")).await.unwrap();
        let result = service.register_user(new_user("ada@example.com")).await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::UniqueViolation(_)))
        ));
        // Nothing gets provisioned a second time
        assert_eq!(repository.provisioned_seeds.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn update_user_retains_profile_picture_when_absent() {
        let repository = Arc::new(MockUserRepository::new());
        let service = UserService::new(repository.clone());
        let user = service.register_user(new_user("ada@example.com")).await.unwrap();

        let updated = service
            .update_user(
                &user.id,
                UserUpdate {
                    full_name: Some("Ada L.".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.profile_picture, DEFAULT_PROFILE_PICTURE);

        let updated = service
            .update_user(
                &user.id,
                UserUpdate {
                    profile_picture: Some("ada.png".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(updated.profile_picture, "ada.png");
    }

    #[tokio::test]
    async fn update_user_rejects_invalid_email() {
        let service = UserService::new(Arc::new(MockUserRepository::new()));

        let result = service
            .update_user(
                "user-1",
                UserUpdate {
                    email: Some("nope".to_string()),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(Error::Validation(_))));
    }
}
