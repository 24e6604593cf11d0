use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use rand::{rngs::StdRng, Rng, SeedableRng};
use tokio::sync::{Mutex, RwLock};
use xcm_yield_simulation::{generate_tx_hash, generate_xcm_message_id, xcm_delay};
use xcm_yield_types::{
    format_usd, parse_hex_balance, AppStats, DashboardError, DashboardResult, DepositQuote,
    NotificationId, NotificationLevel, Tab, Transaction, WalletState,
};

use crate::config::DashboardConfig;
use crate::refresh::RefreshHandle;
use crate::runtime::{Clock, Sleeper, SystemClock, TokioSleeper};
use crate::state::{ActionKey, AppState};
use crate::wallet::WalletProvider;

fn seeded_rng(config: &DashboardConfig) -> StdRng {
    match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}

/// Coordinator that owns the application state and runs the simulated actions.
///
/// Cloning is cheap and every clone drives the same state, so actions can run
/// concurrently on the runtime. Each mutation is applied under the write lock
/// against the latest state.
#[derive(Clone)]
pub struct Dashboard {
    /// Canonical application state
    state: Arc<RwLock<AppState>>,

    /// Shared random source
    rng: Arc<Mutex<StdRng>>,

    /// Simulated latency
    sleeper: Arc<dyn Sleeper>,

    /// Timestamp source
    clock: Arc<dyn Clock>,

    config: Arc<DashboardConfig>,
}

impl Dashboard {
    /// Create a dashboard with an initialized vault catalog
    pub fn new(
        config: DashboardConfig,
        sleeper: Arc<dyn Sleeper>,
        clock: Arc<dyn Clock>,
    ) -> DashboardResult<Self> {
        config.validate()?;

        let mut rng = seeded_rng(&config);
        let now = clock.now();
        let mut state = AppState::new(&config.network, now);
        state.initialize_vaults(&mut rng, now);

        log::info!(
            "Dashboard initialized with {} vaults ({} active), best APY {:.2}%",
            state.vaults.len(),
            state.stats.active_chains,
            state.stats.best_apy
        );

        Ok(Self::assemble(config, state, rng, sleeper, clock))
    }

    /// Resume from an existing state, e.g. a deserialized snapshot
    pub fn with_state(
        config: DashboardConfig,
        state: AppState,
        sleeper: Arc<dyn Sleeper>,
        clock: Arc<dyn Clock>,
    ) -> DashboardResult<Self> {
        config.validate()?;
        let rng = seeded_rng(&config);
        Ok(Self::assemble(config, state, rng, sleeper, clock))
    }

    fn assemble(
        config: DashboardConfig,
        state: AppState,
        rng: StdRng,
        sleeper: Arc<dyn Sleeper>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            state: Arc::new(RwLock::new(state)),
            rng: Arc::new(Mutex::new(rng)),
            sleeper,
            clock,
            config: Arc::new(config),
        }
    }

    /// Real timers and the system clock
    pub fn with_config(config: DashboardConfig) -> DashboardResult<Self> {
        Self::new(config, Arc::new(TokioSleeper), Arc::new(SystemClock))
    }

    pub fn config(&self) -> &DashboardConfig {
        &self.config
    }

    /// Copy of the current state
    pub async fn snapshot(&self) -> AppState {
        self.state.read().await.clone()
    }

    /// Apply a mutation to the latest state
    async fn update<T, F>(&self, f: F) -> T
    where
        F: FnOnce(&mut AppState, &mut StdRng, DateTime<Utc>) -> T,
    {
        let mut state = self.state.write().await;
        let mut rng = self.rng.lock().await;
        let now = self.clock.now();
        f(&mut *state, &mut *rng, now)
    }

    // ========================================================================
    // Notifications
    // ========================================================================

    /// Show a notification and schedule its hide.
    ///
    /// The hide only applies while this notification is still the visible one.
    pub async fn show_notification(
        &self,
        message: impl Into<String>,
        level: NotificationLevel,
        duration: Option<Duration>,
    ) -> NotificationId {
        let message = message.into();
        log::debug!("Notification [{:?}]: {}", level, message);

        let id = self.update(|state, _, _| state.show_notification(message, level)).await;

        let duration = duration.unwrap_or_else(|| self.config.delays.notification());
        let dashboard = self.clone();
        tokio::spawn(async move {
            dashboard.sleeper.sleep(duration).await;
            dashboard.hide_notification(id).await;
        });

        id
    }

    pub async fn hide_notification(&self, id: NotificationId) -> bool {
        self.update(|state, _, _| state.hide_notification(id)).await
    }

    async fn notify(&self, message: impl Into<String>, level: NotificationLevel) -> NotificationId {
        self.show_notification(message, level, None).await
    }

    // ========================================================================
    // Wallet
    // ========================================================================

    /// Simulated wallet connection; always succeeds after the configured delay
    pub async fn connect_wallet(&self) -> DashboardResult<WalletState> {
        log::info!("Connecting wallet on {}", self.config.network);
        self.update(|state, _, _| state.begin_action(ActionKey::Wallet)).await;

        self.sleeper.sleep(self.config.delays.wallet_connect()).await;

        let address = self.config.wallet_address.clone();
        let min_balance = self.config.simulation.min_balance;
        let balance_range = self.config.simulation.balance_range;
        let wallet = self
            .update(|state, rng, _| {
                let balance = min_balance + rng.gen::<f64>() * balance_range;
                state.connect_wallet(&address, balance);
                state.settle_action(ActionKey::Wallet);
                state.wallet.clone()
            })
            .await;

        log::info!("Wallet {} connected with balance {:.2}", address, wallet.balance);
        self.notify("Wallet connected successfully!", NotificationLevel::Success).await;
        Ok(wallet)
    }

    pub async fn disconnect_wallet(&self) {
        self.update(|state, _, _| state.disconnect_wallet()).await;
        log::info!("Wallet disconnected");
        self.notify("Wallet disconnected", NotificationLevel::Info).await;
    }

    /// Mirror an external provider's session into the wallet state
    pub async fn sync_wallet_provider(&self, provider: &dyn WalletProvider) -> DashboardResult<WalletState> {
        if !provider.ready() {
            log::debug!("Wallet provider not ready, keeping current wallet state");
            return Ok(self.state.read().await.wallet.clone());
        }

        if !provider.authenticated() {
            return Ok(self
                .update(|state, _, _| {
                    state.disconnect_wallet();
                    state.wallet.clone()
                })
                .await);
        }

        let raw = provider.balance_hex().await?;
        let balance = parse_hex_balance(&raw)?;
        let address = provider
            .address()
            .unwrap_or_else(|| self.config.wallet_address.clone());

        log::info!("Synced wallet {} from provider, balance {:.4}", address, balance);
        Ok(self
            .update(|state, _, _| {
                state.connect_wallet(&address, balance);
                state.wallet.clone()
            })
            .await)
    }

    // ========================================================================
    // Market
    // ========================================================================

    /// Simulated fetch of fresh yields from every parachain
    pub async fn refresh_vaults(&self) -> DashboardResult<AppStats> {
        log::info!("Refreshing vault yields");
        self.update(|state, _, _| state.begin_action(ActionKey::VaultRefresh)).await;

        self.sleeper.sleep(self.config.delays.vault_refresh()).await;

        let stats = self
            .update(|state, rng, now| {
                state.refresh_vaults(rng, now);
                state.settle_action(ActionKey::VaultRefresh);
                state.stats.clone()
            })
            .await;

        log::info!("Vault yields refreshed, best APY {:.2}%", stats.best_apy);
        self.notify("Yield data updated from all parachains via XCM", NotificationLevel::Info)
            .await;
        Ok(stats)
    }

    /// One periodic refresh step; returns whether APYs moved
    pub async fn background_tick(&self) -> bool {
        let probability = self.config.simulation.apy_update_probability;
        self.update(|state, rng, now| state.background_tick(rng, now, probability))
            .await
    }

    /// Run [`Dashboard::background_tick`] every `refresh_interval_secs` until the
    /// handle is stopped or dropped
    pub fn spawn_background_refresh(&self) -> RefreshHandle {
        RefreshHandle::spawn(self.clone(), self.config.refresh_interval())
    }

    pub async fn quote_deposit(&self, vault_id: &str, amount: f64) -> DashboardResult<DepositQuote> {
        let state = self.state.read().await;
        let vault = state
            .vault(vault_id)
            .ok_or_else(|| DashboardError::vault_not_found(vault_id))?;
        Ok(DepositQuote::for_vault(vault, amount))
    }

    // ========================================================================
    // Deposits
    // ========================================================================

    /// Wait out the simulated settlement latency of one XCM message.
    ///
    /// Fails with `XcmDeliveryFailed` at the configured fault injection rate.
    pub async fn simulate_xcm_delay(&self, message_id: &str) -> DashboardResult<Duration> {
        let range = self.config.delays.xcm_range();
        let delay = {
            let mut rng = self.rng.lock().await;
            xcm_delay(&mut *rng, range)
        };

        log::debug!("XCM message {} in flight for {}ms", message_id, delay.as_millis());
        self.sleeper.sleep(delay).await;

        let failure_rate = self.config.simulation.deposit_failure_rate;
        if failure_rate > 0.0 {
            let failed = self.rng.lock().await.gen_bool(failure_rate);
            if failed {
                return Err(DashboardError::xcm_delivery_failed(message_id));
            }
        }

        Ok(delay)
    }

    async fn reject(&self, err: DashboardError) -> DashboardError {
        log::warn!("Action rejected: {}", err);
        let message = match &err {
            DashboardError::WalletNotConnected => "Please connect your wallet first".to_string(),
            DashboardError::VaultNotFound { vault_id } => format!("Vault not found: {}", vault_id),
            DashboardError::InvalidAmount { .. } => "Please enter an amount greater than zero".to_string(),
            DashboardError::NoBestVault => "No active vault available for optimization".to_string(),
            other => other.to_string(),
        };
        let level = if err.is_guard_failure() {
            NotificationLevel::Warning
        } else {
            NotificationLevel::Error
        };
        self.notify(message, level).await;
        err
    }

    /// Deposit `amount` into `vault_id` through a simulated XCM message.
    ///
    /// The pending transaction is visible as soon as the guards pass. The
    /// position is credited at the vault's APY as read when the action starts.
    pub async fn deposit_to_vault(&self, vault_id: &str, amount: f64) -> DashboardResult<Transaction> {
        let guard = {
            let state = self.state.read().await;
            if !state.wallet.is_connected {
                Err(DashboardError::WalletNotConnected)
            } else if !amount.is_finite() || amount <= 0.0 {
                Err(DashboardError::InvalidAmount { amount })
            } else {
                state
                    .vault(vault_id)
                    .map(|v| (v.chain_name.clone(), v.apy))
                    .ok_or_else(|| DashboardError::vault_not_found(vault_id))
            }
        };
        let (chain_name, apy) = match guard {
            Ok(found) => found,
            Err(err) => return Err(self.reject(err).await),
        };

        let pending = self
            .update(|state, rng, now| {
                let tx = Transaction::pending_deposit(
                    generate_tx_hash(rng),
                    vault_id,
                    amount,
                    generate_xcm_message_id(rng),
                    now,
                );
                state.begin_action(ActionKey::deposit(vault_id, &tx.id));
                state.record_transaction(tx.clone());
                tx
            })
            .await;
        let message_id = pending.xcm_message_id.clone().unwrap_or_default();

        log::info!(
            "Deposit {} of ${} to {} pending, XCM message {}",
            pending.id,
            format_usd(amount),
            chain_name,
            message_id
        );
        self.notify(
            format!("Depositing ${} to {}. XCM message sent...", format_usd(amount), chain_name),
            NotificationLevel::Info,
        )
        .await;

        let settled = match self.simulate_xcm_delay(&message_id).await {
            Ok(_) => {
                self.update(|state, rng, now| {
                    let tx_hash = generate_tx_hash(rng);
                    state.settle_deposit(&pending.id, tx_hash, apy, rng, now)
                })
                .await
            }
            Err(err) => Err(err),
        };

        match settled {
            Ok(tx) => {
                log::info!("Deposit {} completed, settlement hash {:?}", tx.id, tx.tx_hash);
                self.notify(
                    format!("Successfully deposited ${} to {}!", format_usd(amount), chain_name),
                    NotificationLevel::Success,
                )
                .await;
                Ok(tx)
            }
            Err(err) => {
                log::error!("Deposit {} failed: {}", pending.id, err);
                self.update(|state, _, _| {
                    state.fail_transaction(&pending.id);
                    state.fail_action(ActionKey::deposit(vault_id, &pending.id));
                })
                .await;
                self.notify("Deposit failed. Please try again.", NotificationLevel::Error)
                    .await;
                Err(err)
            }
        }
    }

    /// Find the best vault and deposit `amount` into it
    pub async fn optimize_yield(&self, amount: f64) -> DashboardResult<Transaction> {
        if !self.state.read().await.wallet.is_connected {
            return Err(self.reject(DashboardError::WalletNotConnected).await);
        }

        log::info!("Optimizing ${} across all parachains", format_usd(amount));
        self.update(|state, _, _| state.begin_action(ActionKey::Optimize)).await;
        self.notify("Analyzing yields across all parachains...", NotificationLevel::Info)
            .await;

        self.sleeper.sleep(self.config.delays.optimize_analysis()).await;

        let best = self
            .state
            .read()
            .await
            .best_vault()
            .map(|v| (v.id.clone(), v.chain_name.clone(), v.apy));

        let Some((vault_id, chain_name, apy)) = best else {
            self.update(|state, _, _| state.fail_action(ActionKey::Optimize)).await;
            return Err(self.reject(DashboardError::NoBestVault).await);
        };

        self.notify(
            format!("Best yield found: {} ({:.1}% APY). Executing deposit...", chain_name, apy),
            NotificationLevel::Info,
        )
        .await;

        let result = self.deposit_to_vault(&vault_id, amount).await;

        let deposited = result.is_ok();
        self.update(|state, _, _| {
            if deposited {
                state.settle_action(ActionKey::Optimize);
            } else {
                state.fail_action(ActionKey::Optimize);
            }
        })
        .await;

        result
    }

    // ========================================================================
    // UI
    // ========================================================================

    pub async fn switch_tab(&self, tab: Tab) {
        self.update(|state, _, _| state.switch_tab(tab)).await;
    }

    pub async fn select_vault(&self, vault_id: Option<&str>) -> DashboardResult<()> {
        self.update(|state, _, _| state.select_vault(vault_id)).await
    }
}
