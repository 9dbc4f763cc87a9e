/// Decimal scale for monetary amounts
pub const MONEY_SCALE: u32 = 2;

/// Storage format for accrual day stamps
pub const ACCRUAL_DATE_FORMAT: &str = "%Y-%m-%d";
