//! End-to-end flows through the dashboard coordinator

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use rand::{rngs::StdRng, SeedableRng};
use tokio_test::{assert_err, assert_ok};
use xcm_yield_dashboard::{
    ActionKey, ActionStatus, AppState, Clock, Dashboard, DashboardConfig, InstantSleeper,
    ManualClock, MockWalletProvider, TokioSleeper, WalletProvider,
};
use xcm_yield_types::{
    DashboardError, NotificationLevel, Tab, TransactionKind, TransactionStatus, DEMO_WALLET_ADDRESS,
};

const SEED: u64 = 7;

fn seeded_config() -> DashboardConfig {
    DashboardConfig {
        seed: Some(SEED),
        ..DashboardConfig::default()
    }
}

/// Dashboard with instant delays and a fixed clock
fn instant_dashboard(config: DashboardConfig) -> Result<(Dashboard, Arc<InstantSleeper>)> {
    let sleeper = Arc::new(InstantSleeper::new());
    let dashboard = Dashboard::new(config, sleeper.clone(), Arc::new(ManualClock::default()))?;
    Ok((dashboard, sleeper))
}

/// Initialized state with a connected wallet, passed through `edit` first
fn prepared_state(edit: impl FnOnce(&mut AppState)) -> AppState {
    let clock = ManualClock::default();
    let mut rng = StdRng::seed_from_u64(SEED);
    let mut state = AppState::new("Polkadot Hub TestNet", clock.now());
    state.initialize_vaults(&mut rng, clock.now());
    state.connect_wallet(DEMO_WALLET_ADDRESS, 2_500.0);
    edit(&mut state);
    state
}

fn has_message(state: &AppState, level: NotificationLevel, message: &str) -> bool {
    state
        .notification_history
        .iter()
        .any(|n| n.level == level && n.message == message)
}

// ============================================================================
// Wallet
// ============================================================================

#[tokio::test]
async fn test_deposit_requires_connected_wallet() -> Result<()> {
    let (dashboard, _) = instant_dashboard(seeded_config())?;
    let before = dashboard.snapshot().await;

    let err = assert_err!(dashboard.deposit_to_vault("acala", 1_000.0).await);
    assert_eq!(err, DashboardError::WalletNotConnected);

    let after = dashboard.snapshot().await;
    assert!(after.transactions.is_empty());
    assert_eq!(after.vaults, before.vaults);
    assert!(after.portfolio.positions.is_empty());
    assert!(has_message(&after, NotificationLevel::Warning, "Please connect your wallet first"));
    Ok(())
}

#[tokio::test]
async fn test_connect_wallet_assigns_balance() -> Result<()> {
    let (dashboard, sleeper) = instant_dashboard(seeded_config())?;

    let wallet = assert_ok!(dashboard.connect_wallet().await);
    assert!(wallet.is_connected);
    assert_eq!(wallet.address.as_deref(), Some(DEMO_WALLET_ADDRESS));
    assert!((1_000.0..6_000.0).contains(&wallet.balance));
    assert_eq!(wallet.network, "Polkadot Hub TestNet");

    let state = dashboard.snapshot().await;
    assert_eq!(state.action_status(&ActionKey::Wallet), ActionStatus::Settled);
    assert!(has_message(&state, NotificationLevel::Success, "Wallet connected successfully!"));
    assert!(sleeper.requested().contains(&Duration::from_millis(2_000)));

    dashboard.disconnect_wallet().await;
    let state = dashboard.snapshot().await;
    assert!(!state.wallet.is_connected);
    assert!(state.wallet.address.is_none());
    assert_eq!(state.wallet.balance, 0.0);
    Ok(())
}

#[tokio::test]
async fn test_sync_wallet_provider() -> Result<()> {
    let (dashboard, _) = instant_dashboard(seeded_config())?;
    let provider = MockWalletProvider::new("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty", 1_500_000_000_000_000_000);

    provider.set_ready(false);
    let wallet = dashboard.sync_wallet_provider(&provider).await?;
    assert!(!wallet.is_connected);

    provider.set_ready(true);
    provider.login().await?;
    let wallet = dashboard.sync_wallet_provider(&provider).await?;
    assert!(wallet.is_connected);
    assert_eq!(wallet.address.as_deref(), Some("5FHneW46xGXgs5mUiveU4sbTyGBzmstUspZC92UhjJM694ty"));
    assert!((wallet.balance - 1.5).abs() < 1e-12);

    provider.logout().await?;
    let wallet = dashboard.sync_wallet_provider(&provider).await?;
    assert!(!wallet.is_connected);
    Ok(())
}

// ============================================================================
// Deposits
// ============================================================================

#[tokio::test]
async fn test_deposit_credits_position_at_vault_apy() -> Result<()> {
    let state = prepared_state(|state| {
        if let Some(vault) = state.vaults.iter_mut().find(|v| v.id == "acala") {
            vault.apy = 20.0;
        }
    });
    let tvl_before = state.vault("acala").map(|v| v.tvl).unwrap_or_default();
    let sleeper = Arc::new(InstantSleeper::new());
    let dashboard = Dashboard::with_state(
        seeded_config(),
        state,
        sleeper.clone(),
        Arc::new(ManualClock::default()),
    )?;

    let tx = assert_ok!(dashboard.deposit_to_vault("acala", 1_000.0).await);
    assert_eq!(tx.status, TransactionStatus::Completed);
    assert_eq!(tx.kind, TransactionKind::Deposit);
    assert_eq!(tx.amount, 1_000.0);
    let tx_hash = tx.tx_hash.clone().unwrap_or_default();
    assert!(tx_hash.starts_with("0x"));
    assert_eq!(tx_hash.len(), 66);
    assert!(tx.xcm_message_id.as_deref().is_some_and(|id| id.starts_with("xcm_")));

    let state = dashboard.snapshot().await;
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.portfolio.positions.len(), 1);
    let position = &state.portfolio.positions[0];
    assert_eq!(position.vault_id, "acala");
    assert_eq!(position.amount, 1_000.0);
    assert_eq!(position.shares, 1_000.0);
    assert_eq!(position.apy, 20.0);
    assert_eq!(state.portfolio.total_deposited, 1_000.0);
    assert_eq!(state.portfolio.avg_apy, 20.0);

    let tvl_after = state.vault("acala").map(|v| v.tvl).unwrap_or_default();
    assert!((tvl_after - tvl_before - 1_000.0).abs() < 1e-6);

    let key = ActionKey::deposit("acala", &tx.id);
    assert_eq!(state.action_status(&key), ActionStatus::Settled);
    assert!(has_message(&state, NotificationLevel::Info, "Depositing $1,000 to Acala. XCM message sent..."));
    assert!(has_message(&state, NotificationLevel::Success, "Successfully deposited $1,000 to Acala!"));

    let xcm_range = Duration::from_millis(2_000)..Duration::from_millis(4_000);
    assert!(sleeper.requested().iter().any(|d| xcm_range.contains(d)));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_pending_transaction_visible_during_settlement() -> Result<()> {
    let dashboard = Dashboard::with_state(
        seeded_config(),
        prepared_state(|_| {}),
        Arc::new(TokioSleeper),
        Arc::new(ManualClock::default()),
    )?;

    let task = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.deposit_to_vault("hydradx", 250.0).await })
    };

    tokio::time::sleep(Duration::from_millis(100)).await;
    let state = dashboard.snapshot().await;
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.transactions[0].status, TransactionStatus::Pending);
    assert!(state.transactions[0].tx_hash.is_none());
    assert!(state.is_loading(&ActionKey::deposit("hydradx", &state.transactions[0].id)));
    assert!(state.is_depositing("hydradx"));
    assert!(state.loading().deposit);
    assert!(state.portfolio.positions.is_empty());

    let tx = task.await??;
    assert_eq!(tx.status, TransactionStatus::Completed);

    let state = dashboard.snapshot().await;
    assert!(!state.loading().deposit);
    assert_eq!(state.portfolio.positions.len(), 1);
    Ok(())
}

#[tokio::test]
async fn test_deposit_rejections() -> Result<()> {
    let dashboard = Dashboard::with_state(
        seeded_config(),
        prepared_state(|_| {}),
        Arc::new(InstantSleeper::new()),
        Arc::new(ManualClock::default()),
    )?;

    let err = assert_err!(dashboard.deposit_to_vault("polkadex", 100.0).await);
    assert_eq!(err, DashboardError::vault_not_found("polkadex"));

    let err = assert_err!(dashboard.deposit_to_vault("acala", 0.0).await);
    assert!(matches!(err, DashboardError::InvalidAmount { .. }));

    let err = assert_err!(dashboard.deposit_to_vault("acala", f64::NAN).await);
    assert!(matches!(err, DashboardError::InvalidAmount { .. }));

    let state = dashboard.snapshot().await;
    assert!(state.transactions.is_empty());
    assert!(has_message(&state, NotificationLevel::Warning, "Vault not found: polkadex"));
    assert!(has_message(&state, NotificationLevel::Warning, "Please enter an amount greater than zero"));
    Ok(())
}

#[tokio::test]
async fn test_failed_delivery_marks_transaction_failed() -> Result<()> {
    let mut config = seeded_config();
    config.simulation.deposit_failure_rate = 1.0;
    let state = prepared_state(|_| {});
    let tvl_before = state.vault("moonbeam").map(|v| v.tvl).unwrap_or_default();

    let dashboard = Dashboard::with_state(
        config,
        state,
        Arc::new(InstantSleeper::new()),
        Arc::new(ManualClock::default()),
    )?;

    let err = assert_err!(dashboard.deposit_to_vault("moonbeam", 500.0).await);
    assert!(matches!(err, DashboardError::XcmDeliveryFailed { .. }));

    let state = dashboard.snapshot().await;
    assert_eq!(state.transactions.len(), 1);
    assert_eq!(state.transactions[0].status, TransactionStatus::Failed);
    assert!(state.transactions[0].tx_hash.is_none());
    assert!(state.portfolio.positions.is_empty());
    assert_eq!(state.vault("moonbeam").map(|v| v.tvl).unwrap_or_default(), tvl_before);
    assert_eq!(
        state.action_status(&ActionKey::deposit("moonbeam", &state.transactions[0].id)),
        ActionStatus::Failed
    );
    assert!(has_message(&state, NotificationLevel::Error, "Deposit failed. Please try again."));
    Ok(())
}

#[tokio::test]
async fn test_concurrent_deposits_tracked_per_vault() -> Result<()> {
    let dashboard = Dashboard::with_state(
        seeded_config(),
        prepared_state(|_| {}),
        Arc::new(InstantSleeper::new()),
        Arc::new(ManualClock::default()),
    )?;

    let (first, second) = tokio::join!(
        dashboard.deposit_to_vault("acala", 100.0),
        dashboard.deposit_to_vault("astar", 300.0),
    );
    let first = first?;
    let second = second?;
    assert_ne!(first.id, second.id);

    let state = dashboard.snapshot().await;
    assert_eq!(state.transactions.len(), 2);
    assert!(state
        .transactions
        .iter()
        .all(|tx| tx.status == TransactionStatus::Completed));
    assert_eq!(state.portfolio.positions.len(), 2);
    assert_eq!(state.portfolio.total_deposited, 400.0);
    assert_eq!(state.action_status(&ActionKey::deposit("acala", &first.id)), ActionStatus::Settled);
    assert_eq!(state.action_status(&ActionKey::deposit("astar", &second.id)), ActionStatus::Settled);
    assert!(!state.loading().deposit);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_deposits_into_same_vault() -> Result<()> {
    let mut config = seeded_config();
    config.delays.xcm_min_ms = 2_000;
    config.delays.xcm_max_ms = 2_000;
    let dashboard = Dashboard::with_state(
        config,
        prepared_state(|_| {}),
        Arc::new(TokioSleeper),
        Arc::new(ManualClock::default()),
    )?;

    let spawn_deposit = |amount: f64| {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.deposit_to_vault("acala", amount).await })
    };

    // Settles at t=2s
    let first = spawn_deposit(100.0);
    tokio::time::sleep(Duration::from_secs(1)).await;
    // Settles at t=3s
    let second = spawn_deposit(200.0);
    tokio::time::sleep(Duration::from_millis(1_500)).await;

    let state = dashboard.snapshot().await;
    let pending: Vec<_> = state
        .transactions
        .iter()
        .filter(|tx| tx.status == TransactionStatus::Pending)
        .collect();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].amount, 200.0);
    assert!(state.loading().deposit);
    assert!(state.is_depositing("acala"));
    assert!(state.is_loading(&ActionKey::deposit("acala", &pending[0].id)));
    assert_eq!(state.portfolio.positions.len(), 1);

    let first = first.await??;
    let second = second.await??;
    let state = dashboard.snapshot().await;
    assert_eq!(state.action_status(&ActionKey::deposit("acala", &first.id)), ActionStatus::Settled);
    assert_eq!(state.action_status(&ActionKey::deposit("acala", &second.id)), ActionStatus::Settled);
    assert!(!state.loading().deposit);
    assert_eq!(state.portfolio.positions_in("acala").count(), 2);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_disconnect_during_settlement_still_credits() -> Result<()> {
    let dashboard = Dashboard::with_state(
        seeded_config(),
        prepared_state(|_| {}),
        Arc::new(TokioSleeper),
        Arc::new(ManualClock::default()),
    )?;

    let task = {
        let dashboard = dashboard.clone();
        tokio::spawn(async move { dashboard.deposit_to_vault("astar", 400.0).await })
    };

    // XCM delay is at least 2s, so the deposit is still in flight
    tokio::time::sleep(Duration::from_millis(100)).await;
    dashboard.disconnect_wallet().await;
    let state = dashboard.snapshot().await;
    assert!(!state.wallet.is_connected);
    assert_eq!(state.transactions[0].status, TransactionStatus::Pending);

    let tx = task.await??;
    assert_eq!(tx.status, TransactionStatus::Completed);

    let state = dashboard.snapshot().await;
    assert!(!state.wallet.is_connected);
    assert_eq!(state.portfolio.positions.len(), 1);
    assert_eq!(state.portfolio.positions[0].vault_id, "astar");
    assert_eq!(state.portfolio.total_deposited, 400.0);
    assert_eq!(state.action_status(&ActionKey::deposit("astar", &tx.id)), ActionStatus::Settled);

    // New deposits are guarded again
    let err = assert_err!(dashboard.deposit_to_vault("astar", 400.0).await);
    assert_eq!(err, DashboardError::WalletNotConnected);
    Ok(())
}

// ============================================================================
// Optimizer
// ============================================================================

#[tokio::test]
async fn test_optimize_deposits_into_best_vault() -> Result<()> {
    let state = prepared_state(|_| {});
    let best = state.best_vault().map(|v| (v.id.clone(), v.chain_name.clone(), v.apy));
    let Some((best_id, chain_name, apy)) = best else {
        anyhow::bail!("seeded catalog has no active vault");
    };

    let sleeper = Arc::new(InstantSleeper::new());
    let dashboard = Dashboard::with_state(
        seeded_config(),
        state,
        sleeper.clone(),
        Arc::new(ManualClock::default()),
    )?;

    let tx = assert_ok!(dashboard.optimize_yield(750.0).await);
    assert_eq!(tx.vault_id, best_id);
    assert_eq!(tx.status, TransactionStatus::Completed);

    let state = dashboard.snapshot().await;
    assert_eq!(state.action_status(&ActionKey::Optimize), ActionStatus::Settled);
    assert!(has_message(&state, NotificationLevel::Info, "Analyzing yields across all parachains..."));
    let found = format!("Best yield found: {} ({:.1}% APY). Executing deposit...", chain_name, apy);
    assert!(has_message(&state, NotificationLevel::Info, &found));
    assert!(sleeper.requested().contains(&Duration::from_millis(3_000)));
    Ok(())
}

#[tokio::test]
async fn test_optimize_without_active_vaults() -> Result<()> {
    let state = prepared_state(|state| {
        for vault in state.vaults.iter_mut() {
            vault.is_active = false;
            vault.is_best = false;
        }
    });
    let dashboard = Dashboard::with_state(
        seeded_config(),
        state,
        Arc::new(InstantSleeper::new()),
        Arc::new(ManualClock::default()),
    )?;

    let err = assert_err!(dashboard.optimize_yield(500.0).await);
    assert_eq!(err, DashboardError::NoBestVault);

    let state = dashboard.snapshot().await;
    assert!(state.transactions.is_empty());
    assert_eq!(state.action_status(&ActionKey::Optimize), ActionStatus::Failed);
    assert!(!state.loading().optimize);
    assert!(has_message(
        &state,
        NotificationLevel::Warning,
        "No active vault available for optimization"
    ));
    Ok(())
}

#[tokio::test]
async fn test_optimize_requires_connected_wallet() -> Result<()> {
    let (dashboard, sleeper) = instant_dashboard(seeded_config())?;

    let err = assert_err!(dashboard.optimize_yield(500.0).await);
    assert_eq!(err, DashboardError::WalletNotConnected);
    assert!(!sleeper.requested().contains(&Duration::from_millis(3_000)));

    let state = dashboard.snapshot().await;
    assert_eq!(state.action_status(&ActionKey::Optimize), ActionStatus::Idle);
    Ok(())
}

// ============================================================================
// Market refresh
// ============================================================================

#[tokio::test]
async fn test_refresh_vaults_restamps_and_reflags() -> Result<()> {
    let clock = Arc::new(ManualClock::default());
    let dashboard = Dashboard::new(seeded_config(), Arc::new(InstantSleeper::new()), clock.clone())?;

    clock.advance(chrono::Duration::minutes(5));
    let stats = assert_ok!(dashboard.refresh_vaults().await);

    let state = dashboard.snapshot().await;
    assert_eq!(state.stats, stats);
    assert!(state.vaults.iter().all(|v| v.last_update == clock.now()));
    assert!(state.vaults.iter().all(|v| (5.0..=30.0).contains(&v.apy)));

    let max_active = state
        .vaults
        .iter()
        .filter(|v| v.is_active)
        .map(|v| v.apy)
        .fold(0.0, f64::max);
    assert_eq!(stats.best_apy, max_active);
    assert!(state.vaults.iter().filter(|v| v.is_best).all(|v| v.apy == max_active));
    assert_eq!(state.action_status(&ActionKey::VaultRefresh), ActionStatus::Settled);
    assert!(has_message(
        &state,
        NotificationLevel::Info,
        "Yield data updated from all parachains via XCM"
    ));
    Ok(())
}

#[tokio::test]
async fn test_quote_deposit() -> Result<()> {
    let (dashboard, _) = instant_dashboard(seeded_config())?;
    let apy = dashboard
        .snapshot()
        .await
        .vault("bifrost")
        .map(|v| v.apy)
        .unwrap_or_default();

    let quote = dashboard.quote_deposit("bifrost", 2_000.0).await?;
    assert_eq!(quote.estimated_shares, 2_000.0);
    assert!((quote.estimated_yearly_return - 2_000.0 * apy / 100.0).abs() < 1e-9);

    assert_err!(dashboard.quote_deposit("unknown", 2_000.0).await);
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn test_background_refresh_grows_until_stopped() -> Result<()> {
    let (dashboard, _) = instant_dashboard(seeded_config())?;
    dashboard.connect_wallet().await?;
    dashboard.deposit_to_vault("interlay", 1_000.0).await?;

    let refresh = dashboard.spawn_background_refresh();
    tokio::time::sleep(Duration::from_secs(35)).await;
    assert!(!refresh.is_finished());
    refresh.stop();

    let state = dashboard.snapshot().await;
    assert!(state.portfolio.total_earned > 0.0);
    assert!(state.portfolio.total_value > 1_000.0);

    tokio::time::sleep(Duration::from_secs(60)).await;
    let later = dashboard.snapshot().await;
    assert_eq!(later.portfolio, state.portfolio);
    Ok(())
}

// ============================================================================
// Notifications and UI
// ============================================================================

#[tokio::test(start_paused = true)]
async fn test_stale_hide_does_not_clear_newer_notification() -> Result<()> {
    let dashboard = Dashboard::new(
        seeded_config(),
        Arc::new(TokioSleeper),
        Arc::new(ManualClock::default()),
    )?;

    dashboard.show_notification("first", NotificationLevel::Info, None).await;
    tokio::time::sleep(Duration::from_secs(2)).await;
    let second = dashboard
        .show_notification("second", NotificationLevel::Success, None)
        .await;

    // The first notification's timer fires in between
    tokio::time::sleep(Duration::from_millis(2_500)).await;
    let state = dashboard.snapshot().await;
    assert!(state.notification.show);
    assert_eq!(state.notification.id, second);
    assert_eq!(state.notification.message, "second");

    tokio::time::sleep(Duration::from_secs(2)).await;
    let state = dashboard.snapshot().await;
    assert!(!state.notification.show);
    assert_eq!(state.notification.message, "second");
    Ok(())
}

#[tokio::test]
async fn test_tab_and_selection() -> Result<()> {
    let (dashboard, _) = instant_dashboard(seeded_config())?;

    dashboard.switch_tab(Tab::Portfolio).await;
    dashboard.select_vault(Some("astar")).await?;
    let state = dashboard.snapshot().await;
    assert_eq!(state.current_tab, Tab::Portfolio);
    assert_eq!(state.selected_vault().map(|v| v.id.as_str()), Some("astar"));

    assert_err!(dashboard.select_vault(Some("kusama")).await);
    assert_eq!(dashboard.snapshot().await.selected_vault.as_deref(), Some("astar"));

    dashboard.select_vault(None).await?;
    assert!(dashboard.snapshot().await.selected_vault.is_none());
    Ok(())
}

#[tokio::test]
async fn test_invalid_config_rejected() {
    let mut config = seeded_config();
    config.simulation.deposit_failure_rate = 1.5;
    assert!(instant_dashboard(config).is_err());
}
