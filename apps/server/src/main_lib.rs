use std::sync::Arc;

use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

use coinvest_core::errors::{DatabaseError, Error};
use coinvest_core::plans::{InvestmentPlanService, InvestmentPlanServiceTrait};
use coinvest_core::subscriptions::{
    AccrualService, AccrualServiceTrait, SubscriptionService, SubscriptionServiceTrait,
};
use coinvest_core::transactions::{TransactionService, TransactionServiceTrait};
use coinvest_core::users::{NewUser, UserService, UserServiceTrait};
use coinvest_core::wallets::{WalletService, WalletServiceTrait};
use coinvest_storage_sqlite::{
    db::{self, write_actor},
    plans::InvestmentPlanRepository,
    subscriptions::SubscriptionRepository,
    transactions::TransactionRepository,
    users::UserRepository,
    wallets::WalletRepository,
};

use crate::{auth::AuthManager, config::Config};

pub struct AppState {
    pub user_service: Arc<dyn UserServiceTrait>,
    pub wallet_service: Arc<dyn WalletServiceTrait>,
    pub transaction_service: Arc<dyn TransactionServiceTrait>,
    pub plan_service: Arc<dyn InvestmentPlanServiceTrait>,
    pub subscription_service: Arc<dyn SubscriptionServiceTrait>,
    pub accrual_service: Arc<dyn AccrualServiceTrait>,
    pub auth: Arc<AuthManager>,
    pub db_path: String,
}

pub fn init_tracing() {
    let log_format = std::env::var("CV_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let registry = tracing_subscriber::registry().with(filter);

    if log_format.eq_ignore_ascii_case("json") {
        registry
            .with(fmt::layer().json().with_current_span(false))
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(true).with_line_number(true))
            .init();
    }
}

pub async fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let db_path = db::init(&config.data_dir)?;
    tracing::info!("Database path in use: {}", db_path);

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = write_actor::spawn_writer((*pool).clone());

    let user_repository = Arc::new(UserRepository::new(pool.clone(), writer.clone()));
    let wallet_repository = Arc::new(WalletRepository::new(pool.clone()));
    let transaction_repository = Arc::new(TransactionRepository::new(pool.clone(), writer.clone()));
    let plan_repository = Arc::new(InvestmentPlanRepository::new(pool.clone(), writer.clone()));
    let subscription_repository = Arc::new(SubscriptionRepository::new(pool.clone(), writer));

    let user_service: Arc<dyn UserServiceTrait> = Arc::new(UserService::new(user_repository));
    let wallet_service: Arc<dyn WalletServiceTrait> =
        Arc::new(WalletService::new(wallet_repository.clone()));
    let transaction_service: Arc<dyn TransactionServiceTrait> = Arc::new(TransactionService::new(
        transaction_repository,
        wallet_repository.clone(),
    ));
    let plan_service: Arc<dyn InvestmentPlanServiceTrait> =
        Arc::new(InvestmentPlanService::new(plan_repository.clone()));
    let subscription_service: Arc<dyn SubscriptionServiceTrait> = Arc::new(
        SubscriptionService::new(
            subscription_repository.clone(),
            wallet_repository,
            plan_repository,
        ),
    );
    let accrual_service: Arc<dyn AccrualServiceTrait> =
        Arc::new(AccrualService::new(subscription_repository));

    let auth = Arc::new(AuthManager::new(
        config.secret_key.as_bytes(),
        config.access_token_ttl,
        config.refresh_token_ttl,
    ));

    bootstrap_admin(config, &auth, user_service.as_ref()).await?;

    Ok(Arc::new(AppState {
        user_service,
        wallet_service,
        transaction_service,
        plan_service,
        subscription_service,
        accrual_service,
        auth,
        db_path,
    }))
}

/// Provisions the configured superuser on first start. A no-op when the
/// env vars are absent or the email is already taken.
async fn bootstrap_admin(
    config: &Config,
    auth: &AuthManager,
    user_service: &dyn UserServiceTrait,
) -> anyhow::Result<()> {
    let (Some(email), Some(password)) = (&config.admin_email, &config.admin_password) else {
        return Ok(());
    };

    match user_service.get_user_by_email(email) {
        Ok(_) => {
            tracing::debug!("Admin user {} already present", email);
            Ok(())
        }
        Err(Error::Database(DatabaseError::NotFound(_))) => {
            let password_hash = auth
                .hash_password(password)
                .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {e:?}"))?;
            let admin = NewUser {
                id: None,
                email: email.clone(),
                password_hash,
                full_name: Some("Coinvest Admin".to_string()),
                is_staff: true,
                is_superuser: true,
            };
            user_service.register_user(admin).await?;
            tracing::info!("Provisioned admin user {}", email);
            Ok(())
        }
        Err(e) => Err(e.into()),
    }
}
