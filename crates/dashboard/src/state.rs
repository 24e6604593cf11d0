//! Application state and its reducers.
//!
//! [`AppState`] is the single owner of everything the dashboard shows. Each
//! reducer is synchronous: it takes the random source and timestamp it needs
//! as arguments and recomputes derived fields (best flags, portfolio totals,
//! stats) before returning. Sleeping and notification scheduling live in
//! [`crate::Dashboard`].

use std::collections::{BTreeMap, VecDeque};
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use xcm_yield_simulation::{
    add_position_to_portfolio, best_vault, find_best_vault, generate_app_stats,
    generate_empty_portfolio, generate_mock_vaults, simulate_portfolio_growth, update_vault_apys,
};
use xcm_yield_types::{
    AppStats, DashboardError, DashboardResult, Notification, NotificationId, NotificationLevel,
    Portfolio, Tab, Transaction, Vault, WalletState, NOTIFICATION_HISTORY_LIMIT,
};

// ============================================================================
// Action Tracking
// ============================================================================

/// Entity an asynchronous action runs against
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum ActionKey {
    Wallet,
    VaultRefresh,
    Optimize,
    /// One key per deposit transaction, so overlapping deposits into the
    /// same vault are tracked independently
    Deposit { vault_id: String, tx_id: String },
}

impl ActionKey {
    pub fn deposit(vault_id: &str, tx_id: &str) -> Self {
        ActionKey::Deposit {
            vault_id: vault_id.to_string(),
            tx_id: tx_id.to_string(),
        }
    }
}

impl fmt::Display for ActionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKey::Wallet => write!(f, "wallet"),
            ActionKey::VaultRefresh => write!(f, "vaults"),
            ActionKey::Optimize => write!(f, "optimize"),
            ActionKey::Deposit { vault_id, tx_id } => write!(f, "deposit:{}:{}", vault_id, tx_id),
        }
    }
}

impl FromStr for ActionKey {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "wallet" => Ok(ActionKey::Wallet),
            "vaults" => Ok(ActionKey::VaultRefresh),
            "optimize" => Ok(ActionKey::Optimize),
            other => match other.strip_prefix("deposit:").and_then(|rest| rest.split_once(':')) {
                Some((vault_id, tx_id)) if !vault_id.is_empty() && !tx_id.is_empty() => {
                    Ok(ActionKey::deposit(vault_id, tx_id))
                }
                _ => Err(DashboardError::invalid_parameter(
                    "action_key",
                    other,
                    "wallet, vaults, optimize or deposit:<vault>:<tx>",
                )),
            },
        }
    }
}

impl From<ActionKey> for String {
    fn from(key: ActionKey) -> Self {
        key.to_string()
    }
}

impl TryFrom<String> for ActionKey {
    type Error = DashboardError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// `Idle -> Loading -> {Settled, Failed}`; a new run starts from any state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ActionStatus {
    #[default]
    Idle,
    Loading,
    Settled,
    Failed,
}

/// Per-category loading view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LoadingFlags {
    pub vaults: bool,
    pub deposit: bool,
    pub optimize: bool,
    pub wallet: bool,
}

// ============================================================================
// Application State
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub vaults: Vec<Vault>,
    pub portfolio: Portfolio,
    pub stats: AppStats,
    pub wallet: WalletState,
    /// Newest first
    pub transactions: Vec<Transaction>,
    /// Id of the vault open in the detail view
    pub selected_vault: Option<String>,
    pub actions: BTreeMap<ActionKey, ActionStatus>,
    pub current_tab: Tab,
    pub notification: Notification,
    pub notification_history: VecDeque<Notification>,
}

impl AppState {
    /// Empty state: no vaults, empty portfolio, disconnected wallet
    pub fn new(network: &str, now: DateTime<Utc>) -> Self {
        Self {
            vaults: Vec::new(),
            portfolio: generate_empty_portfolio(now),
            stats: AppStats::default(),
            wallet: WalletState::disconnected(network),
            transactions: Vec::new(),
            selected_vault: None,
            actions: BTreeMap::new(),
            current_tab: Tab::default(),
            notification: Notification::default(),
            notification_history: VecDeque::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Queries
    // ------------------------------------------------------------------------

    pub fn vault(&self, vault_id: &str) -> Option<&Vault> {
        self.vaults.iter().find(|v| v.id == vault_id)
    }

    pub fn best_vault(&self) -> Option<&Vault> {
        best_vault(&self.vaults)
    }

    pub fn selected_vault(&self) -> Option<&Vault> {
        self.selected_vault.as_deref().and_then(|id| self.vault(id))
    }

    pub fn transaction(&self, tx_id: &str) -> Option<&Transaction> {
        self.transactions.iter().find(|tx| tx.id == tx_id)
    }

    pub fn action_status(&self, key: &ActionKey) -> ActionStatus {
        self.actions.get(key).copied().unwrap_or_default()
    }

    pub fn is_loading(&self, key: &ActionKey) -> bool {
        self.action_status(key) == ActionStatus::Loading
    }

    /// Any deposit into `vault_id` still in flight
    pub fn is_depositing(&self, vault_id: &str) -> bool {
        self.actions.iter().any(|(key, status)| {
            *status == ActionStatus::Loading
                && matches!(key, ActionKey::Deposit { vault_id: v, .. } if v == vault_id)
        })
    }

    /// Collapse per-entity statuses into the four category flags
    pub fn loading(&self) -> LoadingFlags {
        let mut flags = LoadingFlags::default();
        for (key, status) in &self.actions {
            if *status != ActionStatus::Loading {
                continue;
            }
            match key {
                ActionKey::Wallet => flags.wallet = true,
                ActionKey::VaultRefresh => flags.vaults = true,
                ActionKey::Optimize => flags.optimize = true,
                ActionKey::Deposit { .. } => flags.deposit = true,
            }
        }
        flags
    }

    // ------------------------------------------------------------------------
    // Action lifecycle
    // ------------------------------------------------------------------------

    pub fn begin_action(&mut self, key: ActionKey) {
        self.actions.insert(key, ActionStatus::Loading);
    }

    pub fn settle_action(&mut self, key: ActionKey) {
        self.actions.insert(key, ActionStatus::Settled);
    }

    pub fn fail_action(&mut self, key: ActionKey) {
        self.actions.insert(key, ActionStatus::Failed);
    }

    // ------------------------------------------------------------------------
    // Market
    // ------------------------------------------------------------------------

    /// Generate the catalog, flag the best vault and compute stats
    pub fn initialize_vaults<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) {
        self.vaults = generate_mock_vaults(rng, now);
        find_best_vault(&mut self.vaults);
        self.recompute_stats(rng);
    }

    pub fn recompute_stats<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.stats = generate_app_stats(&self.vaults, rng);
    }

    /// Random-walk APYs, reflag the best vault and recompute stats
    pub fn refresh_vaults<R: Rng + ?Sized>(&mut self, rng: &mut R, now: DateTime<Utc>) {
        update_vault_apys(&mut self.vaults, rng, now);
        find_best_vault(&mut self.vaults);
        self.recompute_stats(rng);
    }

    /// One background refresh step.
    ///
    /// With an empty catalog nothing changes. Otherwise APYs move with
    /// probability `apy_update_probability`, and portfolio growth and stats
    /// are recomputed on every call. Returns whether APYs moved.
    pub fn background_tick<R: Rng + ?Sized>(
        &mut self,
        rng: &mut R,
        now: DateTime<Utc>,
        apy_update_probability: f64,
    ) -> bool {
        if self.vaults.is_empty() {
            return false;
        }

        let update_apys = rng.gen_bool(apy_update_probability.clamp(0.0, 1.0));
        if update_apys {
            update_vault_apys(&mut self.vaults, rng, now);
            find_best_vault(&mut self.vaults);
        }

        simulate_portfolio_growth(&mut self.portfolio, &self.vaults, now);
        self.recompute_stats(rng);
        update_apys
    }

    // ------------------------------------------------------------------------
    // Wallet
    // ------------------------------------------------------------------------

    pub fn connect_wallet(&mut self, address: &str, balance: f64) {
        self.wallet.is_connected = true;
        self.wallet.address = Some(address.to_string());
        self.wallet.balance = balance;
    }

    pub fn disconnect_wallet(&mut self) {
        self.wallet = WalletState::disconnected(&self.wallet.network);
    }

    // ------------------------------------------------------------------------
    // Transactions and deposits
    // ------------------------------------------------------------------------

    pub fn record_transaction(&mut self, tx: Transaction) {
        self.transactions.insert(0, tx);
    }

    /// Returns false when the transaction is unknown or already terminal
    pub fn complete_transaction(&mut self, tx_id: &str, tx_hash: String) -> bool {
        self.transactions
            .iter_mut()
            .find(|tx| tx.id == tx_id)
            .map_or(false, |tx| tx.complete(tx_hash))
    }

    /// Returns false when the transaction is unknown or already terminal
    pub fn fail_transaction(&mut self, tx_id: &str) -> bool {
        self.transactions
            .iter_mut()
            .find(|tx| tx.id == tx_id)
            .map_or(false, |tx| tx.fail())
    }

    /// Credit a settled deposit: new position at `apy`, vault TVL up by `amount`
    pub fn apply_deposit<R: Rng + ?Sized>(
        &mut self,
        vault_id: &str,
        amount: f64,
        apy: f64,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> DashboardResult<()> {
        let vault = self
            .vaults
            .iter_mut()
            .find(|v| v.id == vault_id)
            .ok_or_else(|| DashboardError::vault_not_found(vault_id))?;
        vault.tvl += amount;

        add_position_to_portfolio(&mut self.portfolio, vault_id, amount, apy, now);
        self.recompute_stats(rng);
        Ok(())
    }

    /// Settle a pending deposit in one step.
    ///
    /// Checks everything before writing, so on error the state is unchanged.
    pub fn settle_deposit<R: Rng + ?Sized>(
        &mut self,
        tx_id: &str,
        tx_hash: String,
        apy: f64,
        rng: &mut R,
        now: DateTime<Utc>,
    ) -> DashboardResult<Transaction> {
        let (vault_id, amount) = match self.transaction(tx_id) {
            Some(tx) if !tx.status.is_terminal() => (tx.vault_id.clone(), tx.amount),
            Some(_) => {
                return Err(DashboardError::generic(&format!("Transaction {} already settled", tx_id)))
            }
            None => return Err(DashboardError::generic(&format!("Unknown transaction {}", tx_id))),
        };
        if self.vault(&vault_id).is_none() {
            return Err(DashboardError::vault_not_found(&vault_id));
        }

        self.complete_transaction(tx_id, tx_hash);
        self.apply_deposit(&vault_id, amount, apy, rng, now)?;
        self.settle_action(ActionKey::deposit(&vault_id, tx_id));

        self.transaction(tx_id)
            .cloned()
            .ok_or_else(|| DashboardError::generic(&format!("Unknown transaction {}", tx_id)))
    }

    // ------------------------------------------------------------------------
    // UI
    // ------------------------------------------------------------------------

    pub fn switch_tab(&mut self, tab: Tab) {
        self.current_tab = tab;
    }

    /// Select a vault by id, or clear the selection with `None`
    pub fn select_vault(&mut self, vault_id: Option<&str>) -> DashboardResult<()> {
        match vault_id {
            Some(id) if self.vault(id).is_none() => Err(DashboardError::vault_not_found(id)),
            Some(id) => {
                self.selected_vault = Some(id.to_string());
                Ok(())
            }
            None => {
                self.selected_vault = None;
                Ok(())
            }
        }
    }

    /// Replace the visible notification and return its id
    pub fn show_notification(&mut self, message: String, level: NotificationLevel) -> NotificationId {
        let id = self.notification.id.next();
        self.notification = Notification {
            id,
            show: true,
            message,
            level,
        };

        self.notification_history.push_back(self.notification.clone());
        while self.notification_history.len() > NOTIFICATION_HISTORY_LIMIT {
            self.notification_history.pop_front();
        }
        id
    }

    /// Hide notification `id` if it is still the visible one
    pub fn hide_notification(&mut self, id: NotificationId) -> bool {
        if self.notification.id != id || !self.notification.show {
            return false;
        }
        self.notification.show = false;
        true
    }
}
