use std::time::Duration;

use rand::RngCore;

/// Runtime configuration, read once at startup from the environment
/// (`.env` is loaded by the binary before this runs).
#[derive(Clone)]
pub struct Config {
    pub listen_addr: String,
    /// Directory holding the SQLite database file.
    pub data_dir: String,
    /// HMAC secret for signing JWTs.
    pub secret_key: String,
    pub access_token_ttl: Duration,
    pub refresh_token_ttl: Duration,
    pub accrual_interval_secs: u64,
    /// When set, restricts CORS to this origin; otherwise any origin is allowed.
    pub cors_origin: Option<String>,
    /// Superuser provisioned at startup when both are set and the email is unknown.
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Config {
    pub fn from_env() -> Self {
        let secret_key = match std::env::var("CV_SECRET_KEY") {
            Ok(value) if !value.trim().is_empty() => value,
            _ => {
                tracing::warn!(
                    "CV_SECRET_KEY is not set; using a random secret, tokens will not survive a restart"
                );
                random_secret()
            }
        };

        Self {
            listen_addr: env_or("CV_LISTEN_ADDR", "0.0.0.0:8080"),
            data_dir: env_or("CV_DATA_DIR", "./data"),
            secret_key,
            access_token_ttl: Duration::from_secs(env_u64("CV_ACCESS_TOKEN_TTL_SECS", 900)),
            refresh_token_ttl: Duration::from_secs(env_u64("CV_REFRESH_TOKEN_TTL_SECS", 604_800)),
            // 20 hours, the cadence the accrual engine was deployed with.
            accrual_interval_secs: env_u64("CV_ACCRUAL_INTERVAL_SECS", 72_000),
            cors_origin: env_opt("CV_CORS_ORIGIN"),
            admin_email: env_opt("CV_ADMIN_EMAIL"),
            admin_password: env_opt("CV_ADMIN_PASSWORD"),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_opt(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_u64(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(value) => value.parse().unwrap_or_else(|_| {
            tracing::warn!("Ignoring non-numeric {key}={value}, using {default}");
            default
        }),
        Err(_) => default,
    }
}

fn random_secret() -> String {
    let mut bytes = [0u8; 32];
    rand::rngs::OsRng.fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}
