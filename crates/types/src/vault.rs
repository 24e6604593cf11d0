/// Vault records and market-wide statistics

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ============================================================================
// Vault
// ============================================================================

/// Strategy a vault runs on its parachain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Strategy {
    pub name: String,
    pub description: String,
    /// Protocols the strategy routes through
    pub protocols: Vec<String>,
}

/// A synthetic yield-bearing target on one parachain
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Vault {
    /// Catalog identifier, e.g. `"acala"`
    pub id: String,
    pub chain_name: String,
    /// Parachain id
    pub chain_id: u32,
    /// Annual percentage yield in percent
    pub apy: f64,
    /// Total value locked in USD
    pub tvl: f64,
    /// Risk score from 1 (safest) to 10
    pub risk_score: u8,
    /// Category label, e.g. `"Liquid Staking"`
    #[serde(rename = "type")]
    pub category: String,
    pub logo: String,
    pub strategy: Strategy,
    pub is_active: bool,
    /// Derived: active and holding the maximum APY among active vaults
    pub is_best: bool,
    pub last_update: DateTime<Utc>,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    /// Fee in percent
    pub fees: f64,
}

impl Vault {
    /// Yield a deposit of `amount` would earn over a year at the current APY
    pub fn yearly_return(&self, amount: f64) -> f64 {
        amount * self.apy / 100.0
    }
}

/// Preview of a deposit before it is submitted
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DepositQuote {
    pub amount: f64,
    /// Shares are minted 1:1 with the deposit amount
    pub estimated_shares: f64,
    pub estimated_yearly_return: f64,
}

impl DepositQuote {
    pub fn for_vault(vault: &Vault, amount: f64) -> Self {
        Self {
            amount,
            estimated_shares: amount,
            estimated_yearly_return: vault.yearly_return(amount),
        }
    }
}

// ============================================================================
// Statistics
// ============================================================================

/// Aggregate figures shown in the stats grid
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AppStats {
    #[serde(rename = "totalTVL")]
    pub total_tvl: f64,
    /// Maximum APY among active vaults, 0 when none is active
    #[serde(rename = "bestAPY")]
    pub best_apy: f64,
    pub active_chains: usize,
    pub total_users: u64,
    #[serde(rename = "volume24h")]
    pub volume_24h: f64,
    pub total_yield_generated: f64,
}
