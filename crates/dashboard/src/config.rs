use std::fs;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use xcm_yield_simulation::XcmDelayRange;
use xcm_yield_types::{
    DashboardError, DashboardResult, DEFAULT_NETWORK, DEFAULT_NOTIFICATION_MS, DEMO_WALLET_ADDRESS,
};

/// Dashboard configuration loaded from TOML file
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Network label shown for the wallet
    pub network: String,

    /// Address assigned on wallet connection
    pub wallet_address: String,

    /// Seed for the random source; entropy when absent
    pub seed: Option<u64>,

    /// Period of the background refresh in seconds
    pub refresh_interval_secs: u64,

    /// Simulated latencies
    pub delays: DelayConfig,

    /// Market and fault simulation knobs
    pub simulation: SimulationConfig,
}

/// Simulated latencies, all in milliseconds
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct DelayConfig {
    pub wallet_connect_ms: u64,
    pub vault_refresh_ms: u64,
    pub optimize_analysis_ms: u64,
    /// Lower bound of the cross-chain settlement delay
    pub xcm_min_ms: u64,
    /// Upper bound (exclusive) of the cross-chain settlement delay
    pub xcm_max_ms: u64,
    /// How long a notification stays visible
    pub notification_ms: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct SimulationConfig {
    /// Chance that a background tick random-walks the APYs
    pub apy_update_probability: f64,

    /// Chance that a deposit's XCM message fails to settle
    pub deposit_failure_rate: f64,

    /// Lowest synthetic wallet balance
    pub min_balance: f64,

    /// Width of the synthetic balance range above `min_balance`
    pub balance_range: f64,
}

impl DashboardConfig {
    /// Load configuration from TOML file
    pub fn load(path: &str) -> DashboardResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| DashboardError::config(&format!("Failed to read config file {}: {}", path, e)))?;

        let config: DashboardConfig = toml::from_str(&content)
            .map_err(|e| DashboardError::config(&format!("Failed to parse config file {}: {}", path, e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save(&self, path: &str) -> DashboardResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DashboardError::Serialization(format!("Failed to serialize config: {}", e)))?;
        fs::write(path, content)
            .map_err(|e| DashboardError::config(&format!("Failed to write config file {}: {}", path, e)))?;
        Ok(())
    }

    /// Validate configuration
    pub fn validate(&self) -> DashboardResult<()> {
        if self.network.trim().is_empty() {
            return Err(DashboardError::invalid_parameter("network", "empty", "non-empty string"));
        }

        if self.wallet_address.trim().is_empty() {
            return Err(DashboardError::invalid_parameter("wallet_address", "empty", "non-empty string"));
        }

        if self.refresh_interval_secs == 0 {
            return Err(DashboardError::invalid_parameter("refresh_interval_secs", "0", "greater than 0"));
        }

        self.delays.validate()?;
        self.simulation.validate()?;

        Ok(())
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_interval_secs)
    }

    /// Same configuration with every simulated latency set to zero
    pub fn without_delays(mut self) -> Self {
        self.delays = DelayConfig {
            wallet_connect_ms: 0,
            vault_refresh_ms: 0,
            optimize_analysis_ms: 0,
            xcm_min_ms: 0,
            xcm_max_ms: 0,
            notification_ms: self.delays.notification_ms,
        };
        self
    }
}

impl DelayConfig {
    fn validate(&self) -> DashboardResult<()> {
        if self.xcm_max_ms < self.xcm_min_ms {
            return Err(DashboardError::invalid_parameter(
                "xcm_max_ms",
                &self.xcm_max_ms.to_string(),
                &format!("greater than or equal to xcm_min_ms ({})", self.xcm_min_ms),
            ));
        }

        if self.notification_ms == 0 {
            return Err(DashboardError::invalid_parameter("notification_ms", "0", "greater than 0"));
        }

        Ok(())
    }

    pub fn wallet_connect(&self) -> Duration {
        Duration::from_millis(self.wallet_connect_ms)
    }

    pub fn vault_refresh(&self) -> Duration {
        Duration::from_millis(self.vault_refresh_ms)
    }

    pub fn optimize_analysis(&self) -> Duration {
        Duration::from_millis(self.optimize_analysis_ms)
    }

    pub fn notification(&self) -> Duration {
        Duration::from_millis(self.notification_ms)
    }

    pub fn xcm_range(&self) -> XcmDelayRange {
        XcmDelayRange::from_millis(self.xcm_min_ms, self.xcm_max_ms)
    }
}

impl SimulationConfig {
    fn validate(&self) -> DashboardResult<()> {
        for (name, value) in [
            ("apy_update_probability", self.apy_update_probability),
            ("deposit_failure_rate", self.deposit_failure_rate),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(DashboardError::invalid_parameter(name, &value.to_string(), "within [0, 1]"));
            }
        }

        if !self.min_balance.is_finite() || self.min_balance < 0.0 {
            return Err(DashboardError::invalid_parameter(
                "min_balance",
                &self.min_balance.to_string(),
                "a non-negative number",
            ));
        }

        if !self.balance_range.is_finite() || self.balance_range <= 0.0 {
            return Err(DashboardError::invalid_parameter(
                "balance_range",
                &self.balance_range.to_string(),
                "greater than 0",
            ));
        }

        Ok(())
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            wallet_address: DEMO_WALLET_ADDRESS.to_string(),
            seed: None,
            refresh_interval_secs: 10,
            delays: DelayConfig::default(),
            simulation: SimulationConfig::default(),
        }
    }
}

impl Default for DelayConfig {
    fn default() -> Self {
        Self {
            wallet_connect_ms: 2_000,
            vault_refresh_ms: 2_000,
            optimize_analysis_ms: 3_000,
            xcm_min_ms: 2_000,
            xcm_max_ms: 4_000,
            notification_ms: DEFAULT_NOTIFICATION_MS,
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            apy_update_probability: 0.3,
            deposit_failure_rate: 0.0,
            min_balance: 1_000.0,
            balance_range: 5_000.0,
        }
    }
}
