use chrono::{DateTime, Utc};
use rand::Rng;
use xcm_yield_types::{
    Strategy, Vault, INITIAL_APY_JITTER, INITIAL_TVL_NOISE, INITIAL_VOLUME_NOISE, MAX_APY,
    MIN_APY, VAULT_ACTIVE_PROBABILITY,
};

/// Static description of a catalog vault before jitter is applied
#[derive(Debug, Clone, Copy)]
pub struct VaultTemplate {
    pub id: &'static str,
    pub chain_name: &'static str,
    pub chain_id: u32,
    pub apy: f64,
    pub tvl: f64,
    pub risk_score: u8,
    pub category: &'static str,
    pub logo: &'static str,
    pub volume_24h: f64,
    pub fees: f64,
    pub strategy_name: &'static str,
    pub strategy_description: &'static str,
    pub protocols: &'static [&'static str],
}

const CATALOG: [VaultTemplate; 6] = [
    VaultTemplate {
        id: "acala",
        chain_name: "Acala",
        chain_id: 2000,
        apy: 22.8,
        tvl: 850_000.0,
        risk_score: 4,
        category: "Liquid Staking",
        logo: "🔴",
        volume_24h: 125_000.0,
        fees: 0.3,
        strategy_name: "LDOT Liquid Staking",
        strategy_description: "Stake DOT and receive LDOT while maintaining liquidity",
        protocols: &["Acala DEX", "Honzon Protocol"],
    },
    VaultTemplate {
        id: "hydradx",
        chain_name: "HydraDX",
        chain_id: 2034,
        apy: 19.5,
        tvl: 420_000.0,
        risk_score: 7,
        category: "DEX LP",
        logo: "🌊",
        volume_24h: 89_000.0,
        fees: 0.25,
        strategy_name: "Omnipool LP",
        strategy_description: "Provide liquidity to the universal Omnipool",
        protocols: &["HydraDX Omnipool"],
    },
    VaultTemplate {
        id: "moonbeam",
        chain_name: "Moonbeam",
        chain_id: 1000,
        apy: 15.3,
        tvl: 650_000.0,
        risk_score: 5,
        category: "DeFi Lending",
        logo: "🌙",
        volume_24h: 78_000.0,
        fees: 0.5,
        strategy_name: "Multi-Protocol Lending",
        strategy_description: "Automated lending across Moonwell and StellaSwap",
        protocols: &["Moonwell", "StellaSwap", "BeamSwap"],
    },
    VaultTemplate {
        id: "interlay",
        chain_name: "Interlay",
        chain_id: 2032,
        apy: 12.1,
        tvl: 320_000.0,
        risk_score: 3,
        category: "BTC Yield",
        logo: "⚡",
        volume_24h: 45_000.0,
        fees: 0.2,
        strategy_name: "iBTC Vault Strategy",
        strategy_description: "Earn yield on Bitcoin through iBTC vaults",
        protocols: &["Interlay Vaults", "Kintsugi"],
    },
    VaultTemplate {
        id: "astar",
        chain_name: "Astar",
        chain_id: 2006,
        apy: 14.7,
        tvl: 180_000.0,
        risk_score: 6,
        category: "dApp Staking",
        logo: "⭐",
        volume_24h: 32_000.0,
        fees: 0.35,
        strategy_name: "dApp Staking Plus",
        strategy_description: "Stake ASTAR in dApps and farming protocols",
        protocols: &["Astar dApp Staking", "ArthSwap"],
    },
    VaultTemplate {
        id: "bifrost",
        chain_name: "Bifrost",
        chain_id: 2001,
        apy: 16.2,
        tvl: 270_000.0,
        risk_score: 4,
        category: "Liquid Staking",
        logo: "🌈",
        volume_24h: 56_000.0,
        fees: 0.28,
        strategy_name: "vToken Strategy",
        strategy_description: "Stake multiple assets and receive liquid vTokens",
        protocols: &["Bifrost SLP", "Zenlink DEX"],
    },
];

/// The fixed six-vault catalog
pub fn base_catalog() -> &'static [VaultTemplate] {
    &CATALOG
}

impl VaultTemplate {
    /// Materialize the template without any jitter
    pub fn to_vault(&self, now: DateTime<Utc>) -> Vault {
        Vault {
            id: self.id.to_string(),
            chain_name: self.chain_name.to_string(),
            chain_id: self.chain_id,
            apy: self.apy,
            tvl: self.tvl,
            risk_score: self.risk_score,
            category: self.category.to_string(),
            logo: self.logo.to_string(),
            strategy: Strategy {
                name: self.strategy_name.to_string(),
                description: self.strategy_description.to_string(),
                protocols: self.protocols.iter().map(|p| p.to_string()).collect(),
            },
            is_active: true,
            is_best: false,
            last_update: now,
            volume_24h: self.volume_24h,
            fees: self.fees,
        }
    }
}

/// Generate the catalog with randomized market jitter.
///
/// APY moves by up to ±1pp and is clamped to [5, 30], TVL and 24h volume get
/// additive noise, and each vault is active with probability 0.9. `is_best`
/// is left unset; run [`crate::find_best_vault`] afterwards.
pub fn generate_mock_vaults<R: Rng + ?Sized>(rng: &mut R, now: DateTime<Utc>) -> Vec<Vault> {
    let vaults: Vec<Vault> = base_catalog()
        .iter()
        .map(|template| {
            let mut vault = template.to_vault(now);
            let jitter = (rng.gen::<f64>() - 0.5) * 2.0 * INITIAL_APY_JITTER;
            vault.apy = (template.apy + jitter).clamp(MIN_APY, MAX_APY);
            vault.tvl = template.tvl + rng.gen::<f64>() * INITIAL_TVL_NOISE;
            vault.is_active = rng.gen_bool(VAULT_ACTIVE_PROBABILITY);
            vault.volume_24h = template.volume_24h + rng.gen::<f64>() * INITIAL_VOLUME_NOISE;
            vault
        })
        .collect();

    log::debug!(
        "Generated {} mock vaults ({} active)",
        vaults.len(),
        vaults.iter().filter(|v| v.is_active).count()
    );

    vaults
}
