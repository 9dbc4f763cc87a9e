use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use coinvest_core::plans::{InvestmentPlan, PlanTier};
use coinvest_core::subscriptions::Subscription;
use coinvest_core::transactions::{Transaction, TransactionStatus, TransactionType};
use coinvest_core::users::User;
use coinvest_core::wallets::Wallet;

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
    pub full_name: Option<String>,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SigninRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SigninResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub user_id: String,
    pub is_superuser: bool,
    pub profile_picture: String,
}

#[derive(Deserialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub access_token: String,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub full_name: Option<String>,
    pub profile_picture: String,
    pub is_active: bool,
    pub is_staff: bool,
    pub is_superuser: bool,
    pub date_joined: NaiveDateTime,
}

impl From<User> for UserResponse {
    fn from(u: User) -> Self {
        Self {
            id: u.id,
            email: u.email,
            full_name: u.full_name,
            profile_picture: u.profile_picture,
            is_active: u.is_active,
            is_staff: u.is_staff,
            is_superuser: u.is_superuser,
            date_joined: u.date_joined,
        }
    }
}

/// Partial user update. `password` arrives in the clear and is re-hashed by
/// the handler before it reaches the domain layer.
#[derive(Deserialize, ToSchema, Debug, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdateRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub full_name: Option<String>,
    pub profile_picture: Option<String>,
    pub is_active: Option<bool>,
    pub is_staff: Option<bool>,
    pub is_superuser: Option<bool>,
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WalletResponse {
    pub id: String,
    pub user_id: String,
    pub title: String,
    pub wallet_address: String,
    #[schema(value_type = f64)]
    pub balance: Decimal,
}

impl From<Wallet> for WalletResponse {
    fn from(w: Wallet) -> Self {
        Self {
            id: w.id,
            user_id: w.user_id,
            title: w.title,
            wallet_address: w.wallet_address,
            balance: w.balance,
        }
    }
}

#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPlanResponse {
    pub id: String,
    #[schema(value_type = String)]
    pub tier: PlanTier,
    #[schema(value_type = f64)]
    pub daily_return_rate: Decimal,
    pub duration_days: i32,
    #[schema(value_type = f64)]
    pub minimum_amount: Decimal,
    #[schema(value_type = f64)]
    pub maximum_amount: Decimal,
}

impl From<InvestmentPlan> for InvestmentPlanResponse {
    fn from(p: InvestmentPlan) -> Self {
        Self {
            id: p.id,
            tier: p.tier,
            daily_return_rate: p.daily_return_rate,
            duration_days: p.duration_days,
            minimum_amount: p.minimum_amount,
            maximum_amount: p.maximum_amount,
        }
    }
}

/// Transaction as served to clients: the stored record plus the wallet title
/// and account holder name resolved server-side.
#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub id: String,
    pub user_id: String,
    pub user_name: Option<String>,
    pub wallet_id: String,
    pub wallet_title: Option<String>,
    #[schema(value_type = String)]
    pub transaction_type: TransactionType,
    pub wallet_address: Option<String>,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(value_type = String)]
    pub status: TransactionStatus,
    pub created_at: NaiveDateTime,
}

impl TransactionResponse {
    pub fn from_transaction(
        t: Transaction,
        wallet_title: Option<String>,
        user_name: Option<String>,
    ) -> Self {
        Self {
            id: t.id,
            user_id: t.user_id,
            user_name,
            wallet_id: t.wallet_id,
            wallet_title,
            transaction_type: t.transaction_type,
            wallet_address: t.wallet_address,
            amount: t.amount,
            status: t.status,
            created_at: t.created_at,
        }
    }
}

/// Subscription as served to clients, enriched with the wallet title and
/// plan tier.
#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct SubscriptionResponse {
    pub id: String,
    pub user_id: String,
    pub wallet_id: String,
    pub wallet_title: Option<String>,
    pub plan_id: String,
    #[schema(value_type = Option<String>)]
    pub plan_tier: Option<PlanTier>,
    #[schema(value_type = f64)]
    pub amount: Decimal,
    #[schema(value_type = f64)]
    pub total_return: Decimal,
    pub subscribed_at: NaiveDateTime,
    pub end_date: NaiveDateTime,
    pub last_accrued_on: Option<NaiveDate>,
    pub settled_at: Option<NaiveDateTime>,
}

impl SubscriptionResponse {
    pub fn from_subscription(
        s: Subscription,
        wallet_title: Option<String>,
        plan_tier: Option<PlanTier>,
    ) -> Self {
        Self {
            id: s.id,
            user_id: s.user_id,
            wallet_id: s.wallet_id,
            wallet_title,
            plan_id: s.plan_id,
            plan_tier,
            amount: s.amount,
            total_return: s.total_return,
            subscribed_at: s.subscribed_at,
            end_date: s.end_date,
            last_accrued_on: s.last_accrued_on,
            settled_at: s.settled_at,
        }
    }
}

/// One user's dashboard: the profile row joined with everything the user
/// owns, plus the balance total across their wallets.
#[derive(Serialize, ToSchema, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ProfileDashboard {
    pub id: String,
    pub user: UserResponse,
    pub wallets: Vec<WalletResponse>,
    pub transactions: Vec<TransactionResponse>,
    pub investments: Vec<SubscriptionResponse>,
    #[schema(value_type = f64)]
    pub total_wallet_balance: Decimal,
}

