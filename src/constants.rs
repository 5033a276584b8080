use near_sdk::Gas;

/// A draft always keeps at least one payee for the offered asset.
pub const MIN_SPLITS: usize = 1;
/// Upper bound on payout fan-out.
pub const MAX_SPLITS: usize = 5;

/// Split percentages must sum to exactly this value before submission.
pub const REQUIRED_TOTAL_PERCENTAGE: i64 = 100;
/// Percentage given to the single split a fresh draft starts with.
pub const INITIAL_SPLIT_PERCENTAGE: i32 = 100;

/// yoctoNEAR per NEAR is 10^24.
pub const NATIVE_DECIMALS: u32 = 24;

pub const DEFAULT_SETTLEMENT_GAS: Gas = Gas::from_tgas(30);
