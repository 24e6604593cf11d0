/// Shared types for the cross-chain yield dashboard
///
/// This crate provides the data model (vaults, positions, portfolio,
/// transactions, wallet and UI state), the shared error type and the
/// constants used by the simulation and dashboard crates.

pub mod constants;
pub mod errors;
pub mod format;
pub mod portfolio;
pub mod transaction;
pub mod ui;
pub mod vault;
pub mod wallet;

// Re-export all public types
pub use constants::*;
pub use errors::*;
pub use format::*;
pub use portfolio::*;
pub use transaction::*;
pub use ui::*;
pub use vault::*;
pub use wallet::*;
