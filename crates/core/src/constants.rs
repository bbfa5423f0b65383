/// Sector label used for holdings without one
pub const DEFAULT_SECTOR: &str = "Others";

/// Value reported as portfolio weight when it cannot be computed
pub const ZERO_PERCENT: &str = "0.00";

/// Decimal places kept for portfolio weights
pub const PERCENT_DECIMAL_PRECISION: u32 = 2;
