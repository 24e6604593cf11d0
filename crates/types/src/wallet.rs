/// Synthetic wallet state and balance decoding

use serde::{Deserialize, Serialize};

use crate::{DashboardError, DashboardResult, BALANCE_DECIMALS, DEFAULT_NETWORK};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct WalletState {
    pub is_connected: bool,
    pub address: Option<String>,
    pub balance: f64,
    /// Network label
    pub network: String,
}

impl WalletState {
    pub fn disconnected(network: &str) -> Self {
        Self {
            is_connected: false,
            address: None,
            balance: 0.0,
            network: network.to_string(),
        }
    }
}

impl Default for WalletState {
    fn default() -> Self {
        Self::disconnected(DEFAULT_NETWORK)
    }
}

/// Decode a hex-encoded integer balance scaled by 10^18.
///
/// Accepts an optional `0x`/`0X` prefix. Values wider than 128 bits are rejected.
pub fn parse_hex_balance(raw: &str) -> DashboardResult<f64> {
    let trimmed = raw.trim();
    let digits = trimmed
        .strip_prefix("0x")
        .or_else(|| trimmed.strip_prefix("0X"))
        .unwrap_or(trimmed);

    if digits.is_empty() {
        return Err(DashboardError::invalid_balance(raw, "no hex digits"));
    }

    let units = u128::from_str_radix(digits, 16)
        .map_err(|e| DashboardError::invalid_balance(raw, &e.to_string()))?;

    let scale = 10u128.pow(BALANCE_DECIMALS);
    let whole = (units / scale) as f64;
    let fraction = (units % scale) as f64 / scale as f64;
    Ok(whole + fraction)
}
