use chrono::{DateTime, Utc};
use xcm_yield_types::{Portfolio, Position, Vault, DAYS_PER_YEAR, GROWTH_TICK_SCALE};

pub fn generate_empty_portfolio(now: DateTime<Utc>) -> Portfolio {
    Portfolio::empty(now)
}

/// Append a fresh position (shares = amount) and recompute the aggregates
pub fn add_position_to_portfolio(
    portfolio: &mut Portfolio,
    vault_id: &str,
    amount: f64,
    apy: f64,
    now: DateTime<Utc>,
) {
    portfolio.positions.push(Position {
        vault_id: vault_id.to_string(),
        amount,
        shares: amount,
        deposited_at: now,
        current_value: amount,
        earned: 0.0,
        apy,
    });
    portfolio.recompute(now);
}

/// Accrue one tick of yield on every position.
///
/// Each position grows by `current_value * apy / 365 / 100 * 0.1` using its
/// vault's live APY, which also becomes the position's APY. Positions whose
/// vault is no longer listed are left as they are. An empty portfolio is not
/// touched at all.
pub fn simulate_portfolio_growth(portfolio: &mut Portfolio, vaults: &[Vault], now: DateTime<Utc>) {
    if portfolio.positions.is_empty() {
        return;
    }

    for position in portfolio.positions.iter_mut() {
        let Some(vault) = vaults.iter().find(|v| v.id == position.vault_id) else {
            continue;
        };

        let daily_rate = vault.apy / DAYS_PER_YEAR / 100.0;
        let growth = position.current_value * daily_rate * GROWTH_TICK_SCALE;

        position.current_value += growth;
        position.earned += growth;
        position.apy = vault.apy;
    }

    portfolio.recompute(now);
}
