/// User positions and the portfolio aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A user's stake in one vault
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub vault_id: String,
    /// Amount deposited in USD
    pub amount: f64,
    /// Always equal to `amount`
    pub shares: f64,
    pub deposited_at: DateTime<Utc>,
    pub current_value: f64,
    /// Cumulative simulated yield
    pub earned: f64,
    /// APY at the last valuation
    pub apy: f64,
}

impl Position {
    pub fn gain_loss(&self) -> f64 {
        self.current_value - self.amount
    }

    pub fn gain_loss_percent(&self) -> f64 {
        if self.amount == 0.0 {
            return 0.0;
        }
        self.gain_loss() / self.amount * 100.0
    }
}

/// Aggregate of all positions.
///
/// `total_value` and `avg_apy` are derived and recomputed from `positions`
/// after every change, see [`Portfolio::recompute`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub total_deposited: f64,
    pub total_value: f64,
    pub total_earned: f64,
    pub positions: Vec<Position>,
    /// Amount-weighted mean of position APYs
    pub avg_apy: f64,
    pub last_update: DateTime<Utc>,
}

impl Portfolio {
    /// Zero-valued portfolio with no positions
    pub fn empty(now: DateTime<Utc>) -> Self {
        Self {
            total_deposited: 0.0,
            total_value: 0.0,
            total_earned: 0.0,
            positions: Vec::new(),
            avg_apy: 0.0,
            last_update: now,
        }
    }

    /// Recompute every aggregate from the position list
    pub fn recompute(&mut self, now: DateTime<Utc>) {
        let total_amount: f64 = self.positions.iter().map(|p| p.amount).sum();
        self.total_deposited = total_amount;
        self.total_value = self.positions.iter().map(|p| p.current_value).sum();
        self.total_earned = self.positions.iter().map(|p| p.earned).sum();
        self.avg_apy = if total_amount > 0.0 {
            self.positions.iter().map(|p| p.apy * p.amount).sum::<f64>() / total_amount
        } else {
            0.0
        };
        self.last_update = now;
    }

    /// Earned yield as a percentage of deposits
    pub fn return_percent(&self) -> f64 {
        if self.total_deposited <= 0.0 {
            return 0.0;
        }
        self.total_earned / self.total_deposited * 100.0
    }

    pub fn position_count(&self) -> usize {
        self.positions.len()
    }

    pub fn positions_in<'a>(&'a self, vault_id: &'a str) -> impl Iterator<Item = &'a Position> + 'a {
        self.positions.iter().filter(move |p| p.vault_id == vault_id)
    }
}
