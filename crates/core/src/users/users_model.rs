//! User and profile domain models.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::{errors::ValidationError, Error, Result};

/// Avatar assigned at signup until the user sets one.
pub const DEFAULT_PROFILE_PICTURE: &str = "default.png";

/// Domain model representing a platform user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    /// Argon2 PHC string; never serialized out.
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub full_name: Option<String>,
    pub profile_picture: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: NaiveDateTime,
}

/// Input model for creating a new user.
///
/// Password hashing happens at the API boundary; the domain only ever sees
/// the hash.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    #[serde(skip_serializing, default)]
    pub password_hash: String,
    pub full_name: Option<String>,
    #[serde(default)]
    pub is_staff: bool,
    #[serde(default)]
    pub is_superuser: bool,
}

impl NewUser {
    /// Validates the new user data.
    pub fn validate(&self) -> Result<()> {
        if self.email.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "email".to_string(),
            )));
        }
        if !self.email.contains('@') {
            return Err(Error::Validation(ValidationError::InvalidInput(format!(
                "'{}' is not a valid email address",
                self.email
            ))));
        }
        if self.password_hash.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "password_hash".to_string(),
            )));
        }
        Ok(())
    }
}

/// Partial update for an existing user.
///
/// `None` fields are left unchanged; `profile_picture` in particular is
/// replaced only when a new value arrives and retained otherwise.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    pub email: Option<String>,
    #[serde(skip_serializing, default)]
    pub password_hash: Option<String>,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

impl UserUpdate {
    /// Validates the update data.
    pub fn validate(&self) -> Result<()> {
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(Error::Validation(ValidationError::InvalidInput(format!(
                    "'{}' is not a valid email address",
                    email
                ))));
            }
        }
        Ok(())
    }
}

/// 1:1 companion record created alongside every user.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub id: String,
    pub user_id: String,
}
