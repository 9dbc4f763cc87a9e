//! Database models for users and profiles.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use coinvest_core::users::{NewUser, Profile, User, DEFAULT_PROFILE_PICTURE};

/// Database model for users
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    AsChangeset,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(table_name = crate::schema::users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct UserDB {
    pub id: String,
    pub email: String,
    pub password_hash: String,
    pub full_name: Option<String>,
    pub profile_picture: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: NaiveDateTime,
}

/// Database model for profiles
#[derive(
    Queryable,
    Identifiable,
    Insertable,
    Associations,
    Selectable,
    PartialEq,
    Serialize,
    Deserialize,
    Debug,
    Clone,
)]
#[diesel(belongs_to(UserDB, foreign_key = user_id))]
#[diesel(table_name = crate::schema::profiles)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct ProfileDB {
    pub id: String,
    pub user_id: String,
}

// Conversion to domain models
impl From<UserDB> for User {
    fn from(db: UserDB) -> Self {
        Self {
            id: db.id,
            email: db.email,
            password_hash: db.password_hash,
            full_name: db.full_name,
            profile_picture: db.profile_picture,
            is_active: db.is_active,
            is_staff: db.is_staff,
            is_superuser: db.is_superuser,
            date_joined: db.date_joined,
        }
    }
}

impl From<NewUser> for UserDB {
    fn from(domain: NewUser) -> Self {
        Self {
            id: domain.id.unwrap_or_default(),
            email: domain.email,
            password_hash: domain.password_hash,
            full_name: domain.full_name,
            profile_picture: DEFAULT_PROFILE_PICTURE.to_string(),
            is_active: true,
            is_staff: domain.is_staff,
            is_superuser: domain.is_superuser,
            date_joined: chrono::Utc::now().naive_utc(),
        }
    }
}

impl From<ProfileDB> for Profile {
    fn from(db: ProfileDB) -> Self {
        Self {
            id: db.id,
            user_id: db.user_id,
        }
    }
}
