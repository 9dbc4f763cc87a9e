//! Investment plan defaults.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Percent of principal credited per accrual day unless the plan overrides it.
pub const DEFAULT_DAILY_RETURN_RATE: Decimal = dec!(10);

/// Accrual window length in days unless the plan overrides it.
pub const DEFAULT_DURATION_DAYS: i32 = 30;
