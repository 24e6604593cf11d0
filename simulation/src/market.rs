use chrono::{DateTime, Utc};
use rand::Rng;
use xcm_yield_types::{
    AppStats, Vault, APY_WALK_STEP, BASE_TOTAL_YIELD, BASE_USER_COUNT, MAX_APY, MIN_APY,
    TOTAL_YIELD_JITTER, TVL_DOWNSIDE_NOISE, TVL_UPSIDE_NOISE, USER_COUNT_JITTER,
};

/// Random-walk every vault's APY by up to ±0.25pp, clamped to [5, 30].
///
/// TVL follows the direction of the drawn step: a rise adds up to 10k, a fall
/// removes up to 5k. TVL never drops below zero.
pub fn update_vault_apys<R: Rng + ?Sized>(vaults: &mut [Vault], rng: &mut R, now: DateTime<Utc>) {
    for vault in vaults.iter_mut() {
        let change = (rng.gen::<f64>() - 0.5) * 2.0 * APY_WALK_STEP;
        vault.apy = (vault.apy + change).clamp(MIN_APY, MAX_APY);
        vault.last_update = now;

        let tvl_delta = if change > 0.0 {
            rng.gen::<f64>() * TVL_UPSIDE_NOISE
        } else {
            -rng.gen::<f64>() * TVL_DOWNSIDE_NOISE
        };
        vault.tvl = (vault.tvl + tvl_delta).max(0.0);
    }
}

/// Highest APY among active vaults, `None` when nothing is active
fn max_active_apy(vaults: &[Vault]) -> Option<f64> {
    vaults
        .iter()
        .filter(|v| v.is_active)
        .map(|v| v.apy)
        .fold(None, |acc: Option<f64>, apy| Some(acc.map_or(apy, |m| m.max(apy))))
}

/// Recompute `is_best` on every vault.
///
/// Every active vault whose APY equals the active maximum is flagged, so ties
/// flag several vaults. With no active vault nothing is flagged.
pub fn find_best_vault(vaults: &mut [Vault]) {
    let max_apy = max_active_apy(vaults);
    for vault in vaults.iter_mut() {
        vault.is_best = match max_apy {
            Some(max) => vault.is_active && vault.apy == max,
            None => false,
        };
    }
}

/// First vault in catalog order carrying the best flag
pub fn best_vault(vaults: &[Vault]) -> Option<&Vault> {
    vaults.iter().find(|v| v.is_best)
}

/// Aggregate stats across the catalog.
///
/// User count and total yield are cosmetic counters drawn from `rng`.
pub fn generate_app_stats<R: Rng + ?Sized>(vaults: &[Vault], rng: &mut R) -> AppStats {
    AppStats {
        total_tvl: vaults.iter().map(|v| v.tvl).sum(),
        best_apy: max_active_apy(vaults).unwrap_or(0.0),
        active_chains: vaults.iter().filter(|v| v.is_active).count(),
        total_users: BASE_USER_COUNT + rng.gen_range(0..USER_COUNT_JITTER),
        volume_24h: vaults.iter().map(|v| v.volume_24h).sum(),
        total_yield_generated: BASE_TOTAL_YIELD + rng.gen::<f64>() * TOTAL_YIELD_JITTER,
    }
}
