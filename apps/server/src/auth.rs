use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use argon2::{
    password_hash::{
        rand_core::OsRng, Error as PasswordHashError, PasswordHash, SaltString,
    },
    Argon2, PasswordHasher, PasswordVerifier,
};
use axum::{
    extract::FromRequestParts,
    http::{header::AUTHORIZATION, request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use coinvest_core::users::User;

use crate::main_lib::AppState;

const ACCESS_TOKEN_TYPE: &str = "access";
const REFRESH_TOKEN_TYPE: &str = "refresh";

/// Hashes passwords and signs/validates the two JWT kinds.
pub struct AuthManager {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    access_token_ttl: Duration,
    refresh_token_ttl: Duration,
}

#[derive(Debug)]
pub enum AuthError {
    Unauthorized,
    /// Deliberately vague: unknown email, wrong password, and a deactivated
    /// account all surface the same way.
    InvalidCredentials,
    Internal(String),
}

#[derive(Serialize)]
struct AuthErrorBody {
    error: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub token_type: String,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub iat: usize,
    pub exp: usize,
}

impl AuthManager {
    pub fn new(secret: &[u8], access_token_ttl: Duration, refresh_token_ttl: Duration) -> Self {
        let encoding_key = EncodingKey::from_secret(secret);
        let decoding_key = DecodingKey::from_secret(secret);
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        Self {
            encoding_key,
            decoding_key,
            validation,
            access_token_ttl,
            refresh_token_ttl,
        }
    }

    pub fn hash_password(&self, password: &str) -> Result<String, AuthError> {
        let salt = SaltString::generate(&mut OsRng);
        Argon2::default()
            .hash_password(password.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::Internal(format!("Failed to hash password: {e}")))
    }

    pub fn verify_password(&self, candidate: &str, stored_hash: &str) -> Result<(), AuthError> {
        let parsed = PasswordHash::new(stored_hash)
            .map_err(|e| AuthError::Internal(format!("Invalid stored password hash: {e}")))?;
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .map_err(|err| match err {
                PasswordHashError::Password => AuthError::InvalidCredentials,
                other => AuthError::Internal(format!("Password verification failed: {other}")),
            })
    }

    pub fn issue_access_token(&self, user: &User) -> Result<String, AuthError> {
        self.issue_token(user, ACCESS_TOKEN_TYPE, self.access_token_ttl)
    }

    pub fn issue_refresh_token(&self, user: &User) -> Result<String, AuthError> {
        self.issue_token(user, REFRESH_TOKEN_TYPE, self.refresh_token_ttl)
    }

    fn issue_token(
        &self,
        user: &User,
        token_type: &str,
        ttl: Duration,
    ) -> Result<String, AuthError> {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_err(|_| AuthError::Internal("System clock is before UNIX_EPOCH".into()))?;
        let exp = now + ttl;
        let claims = Claims {
            sub: user.id.clone(),
            token_type: token_type.to_string(),
            is_staff: user.is_staff,
            is_superuser: user.is_superuser,
            iat: now.as_secs() as usize,
            exp: exp.as_secs() as usize,
        };
        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|e| AuthError::Internal(format!("Failed to sign token: {e}")))
    }

    pub fn decode_access_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_token(token, ACCESS_TOKEN_TYPE)
    }

    pub fn decode_refresh_token(&self, token: &str) -> Result<Claims, AuthError> {
        self.decode_token(token, REFRESH_TOKEN_TYPE)
    }

    fn decode_token(&self, token: &str, expected_type: &str) -> Result<Claims, AuthError> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(
            |err| match err.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature
                | jsonwebtoken::errors::ErrorKind::InvalidToken
                | jsonwebtoken::errors::ErrorKind::InvalidSignature
                | jsonwebtoken::errors::ErrorKind::MissingRequiredClaim(_) => {
                    AuthError::Unauthorized
                }
                other => AuthError::Internal(format!("Failed to validate token: {other:?}")),
            },
        )?;
        // An access token must not pass where a refresh token is expected,
        // and vice versa.
        if data.claims.token_type != expected_type {
            return Err(AuthError::Unauthorized);
        }
        Ok(data.claims)
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        let (status, message) = match self {
            AuthError::Unauthorized => (StatusCode::UNAUTHORIZED, "Unauthorized".to_string()),
            AuthError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid email or password".to_string(),
            ),
            AuthError::Internal(msg) => {
                tracing::error!("Auth error: {msg}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };
        let body = Json(AuthErrorBody { error: message });
        (status, body).into_response()
    }
}

/// Identity of the authenticated caller, decoded from the Bearer access
/// token. Handlers take this as an extractor argument; requests without a
/// valid token are rejected with 401 before the handler runs.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: String,
    pub is_staff: bool,
    pub is_superuser: bool,
}

impl AuthUser {
    /// Staff and superusers see and mutate every user's records.
    pub fn is_operator(&self) -> bool {
        self.is_staff || self.is_superuser
    }

    /// True when the caller owns the record or is an operator.
    pub fn can_access(&self, owner_id: &str) -> bool {
        self.is_operator() || self.user_id == owner_id
    }
}

impl FromRequestParts<Arc<AppState>> for AuthUser {
    type Rejection = AuthError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &Arc<AppState>,
    ) -> Result<Self, Self::Rejection> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AuthError::Unauthorized)?;

        let mut pieces = header.splitn(2, ' ');
        let (Some(scheme), Some(token)) = (pieces.next(), pieces.next()) else {
            return Err(AuthError::Unauthorized);
        };

        if !scheme.eq_ignore_ascii_case("Bearer") {
            return Err(AuthError::Unauthorized);
        }

        let token = token.trim();
        if token.is_empty() {
            return Err(AuthError::Unauthorized);
        }

        let claims = state.auth.decode_access_token(token)?;
        Ok(AuthUser {
            user_id: claims.sub,
            is_staff: claims.is_staff,
            is_superuser: claims.is_superuser,
        })
    }
}
