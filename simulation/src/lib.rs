/// Mock data service for the cross-chain yield dashboard
///
/// Provides utilities for:
/// - Generating the synthetic vault catalog
/// - Random-walking APYs and TVL to simulate market movement
/// - Flagging the best vault and aggregating dashboard statistics
/// - Building positions and accruing simulated yield
/// - Drawing synthetic identifiers and cross-chain settlement delays
///
/// Every function is pure apart from its return value or the records it is
/// handed: randomness comes from the caller's `Rng` and timestamps are passed
/// in explicitly, so seeded runs are reproducible.

pub mod catalog;
pub mod market;
pub mod portfolio;
pub mod xcm;

pub use catalog::{base_catalog, generate_mock_vaults, VaultTemplate};
pub use market::{best_vault, find_best_vault, generate_app_stats, update_vault_apys};
pub use portfolio::{add_position_to_portfolio, generate_empty_portfolio, simulate_portfolio_growth};
pub use xcm::{generate_tx_hash, generate_xcm_message_id, xcm_delay, XcmDelayRange};
