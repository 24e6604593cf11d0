//! Wallet/auth collaborator seam.
//!
//! The dashboard only consumes four signals from the authentication provider:
//! readiness, authentication, login/logout, and a hex-encoded balance.

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use xcm_yield_types::{DashboardError, DashboardResult};

#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Provider finished initializing
    fn ready(&self) -> bool;

    fn authenticated(&self) -> bool;

    /// Account address, when authenticated
    fn address(&self) -> Option<String>;

    async fn login(&self) -> DashboardResult<()>;

    async fn logout(&self) -> DashboardResult<()>;

    /// Balance as a hex integer scaled by 10^18, e.g. `"0xde0b6b3a7640000"`
    async fn balance_hex(&self) -> DashboardResult<String>;
}

/// In-memory provider with a fixed balance
#[derive(Debug)]
pub struct MockWalletProvider {
    address: String,
    balance_units: u128,
    ready: AtomicBool,
    authenticated: AtomicBool,
}

impl MockWalletProvider {
    pub fn new(address: &str, balance_units: u128) -> Self {
        Self {
            address: address.to_string(),
            balance_units,
            ready: AtomicBool::new(true),
            authenticated: AtomicBool::new(false),
        }
    }

    pub fn set_ready(&self, ready: bool) {
        self.ready.store(ready, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletProvider for MockWalletProvider {
    fn ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    fn authenticated(&self) -> bool {
        self.authenticated.load(Ordering::SeqCst)
    }

    fn address(&self) -> Option<String> {
        self.authenticated().then(|| self.address.clone())
    }

    async fn login(&self) -> DashboardResult<()> {
        if !self.ready() {
            return Err(DashboardError::generic("Wallet provider is not ready"));
        }
        self.authenticated.store(true, Ordering::SeqCst);
        log::debug!("Mock wallet {} logged in", self.address);
        Ok(())
    }

    async fn logout(&self) -> DashboardResult<()> {
        self.authenticated.store(false, Ordering::SeqCst);
        log::debug!("Mock wallet {} logged out", self.address);
        Ok(())
    }

    async fn balance_hex(&self) -> DashboardResult<String> {
        if !self.authenticated() {
            return Err(DashboardError::WalletNotConnected);
        }
        Ok(format!("{:#x}", self.balance_units))
    }
}
