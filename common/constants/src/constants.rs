#![no_std]

pub const SECONDS_PER_YEAR: u64 = 31_536_000;
pub const SECONDS_PER_DAY: u64 = 86_400;

pub const RAY: u128 = 1_000_000_000_000_000_000_000_000_000;
pub const RAY_PRECISION: usize = 27;

/// Basis points scale used for every ratio, rate and fee: 10_000 = 100.00%
pub const BPS: usize = 10_000;

/// Collateral ratio reported for a position without debt
pub const INFINITE_COLLATERAL_RATIO: u64 = u64::MAX;

/// Upper bound of Taylor terms summed by the exponential approximation.
/// With `x <= 1` at 27 decimals the series reaches a zero term before 30.
pub const MAX_TAYLOR_TERMS: u64 = 32;

/// Largest token precision accepted for the stable and reserve assets
pub const MAX_TOKEN_DECIMALS: usize = 18;

/// Shortest conversion path: collateral -> reserve
pub const MIN_CONVERSION_PATH_LEN: usize = 2;
