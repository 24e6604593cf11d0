/// Constants shared across the dashboard crates

// ============================================================================
// APY Bounds
// ============================================================================

/// Lowest APY (percent) a vault may drift to
pub const MIN_APY: f64 = 5.0;

/// Highest APY (percent) a vault may drift to
pub const MAX_APY: f64 = 30.0;

/// Initial catalog jitter, ±1 percentage point
pub const INITIAL_APY_JITTER: f64 = 1.0;

/// Periodic random walk step, ±0.25 percentage points
pub const APY_WALK_STEP: f64 = 0.25;

// ============================================================================
// Market Noise
// ============================================================================

/// Upper bound of the additive TVL noise applied to the catalog
pub const INITIAL_TVL_NOISE: f64 = 50_000.0;

/// Upper bound of the additive 24h volume noise applied to the catalog
pub const INITIAL_VOLUME_NOISE: f64 = 20_000.0;

/// Upper bound of the TVL increase when APY rises
pub const TVL_UPSIDE_NOISE: f64 = 10_000.0;

/// Upper bound of the TVL decrease when APY falls
pub const TVL_DOWNSIDE_NOISE: f64 = 5_000.0;

/// Probability that a catalog vault starts active
pub const VAULT_ACTIVE_PROBABILITY: f64 = 0.9;

// ============================================================================
// Yield Accrual
// ============================================================================

/// Days per year used to derive daily yield from APY
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Fraction of a day's yield credited per growth tick
pub const GROWTH_TICK_SCALE: f64 = 0.1;

// ============================================================================
// Cosmetic Counters
// ============================================================================

/// Base value of the displayed user count
pub const BASE_USER_COUNT: u64 = 1247;

/// Exclusive upper bound of the random user count increment
pub const USER_COUNT_JITTER: u64 = 50;

/// Base value of the displayed total yield
pub const BASE_TOTAL_YIELD: f64 = 125_000.0;

/// Upper bound of the random total yield increment
pub const TOTAL_YIELD_JITTER: f64 = 25_000.0;

// ============================================================================
// Identifiers
// ============================================================================

/// Hex digits in a synthetic transaction hash (after `0x`)
pub const TX_HASH_HEX_LEN: usize = 64;

/// Hex digits in a synthetic XCM message id (after `xcm_`)
pub const XCM_MESSAGE_ID_HEX_LEN: usize = 32;

/// Prefix of synthetic transaction hashes
pub const TX_HASH_PREFIX: &str = "0x";

/// Prefix of synthetic XCM message ids
pub const XCM_MESSAGE_ID_PREFIX: &str = "xcm_";

// ============================================================================
// Wallet
// ============================================================================

/// Address assigned by the synthetic wallet connection
pub const DEMO_WALLET_ADDRESS: &str = "5GrwvaEF5zXb26Fz9rcQpDWS57CtERHpNehXCPcNoHGKutQY";

/// Network label shown for the synthetic wallet
pub const DEFAULT_NETWORK: &str = "Polkadot Hub TestNet";

/// Fixed-point scale of balances reported by the wallet provider (10^18)
pub const BALANCE_DECIMALS: u32 = 18;

// ============================================================================
// Notifications
// ============================================================================

/// Default time a notification stays visible
pub const DEFAULT_NOTIFICATION_MS: u64 = 4_000;

/// Number of past notifications retained for inspection
pub const NOTIFICATION_HISTORY_LIMIT: usize = 50;
