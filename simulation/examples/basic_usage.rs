/// Basic usage example for the yield dashboard mock data service
///
/// This example demonstrates:
/// - Generating the vault catalog from a fixed seed
/// - Flagging the best vault and computing dashboard statistics
/// - Opening a position and accruing a few ticks of simulated yield
/// - Drawing synthetic settlement identifiers and delays
use chrono::Utc;
use rand::{rngs::StdRng, SeedableRng};
use xcm_yield_simulation::{
    add_position_to_portfolio, best_vault, find_best_vault, generate_app_stats,
    generate_empty_portfolio, generate_mock_vaults, generate_tx_hash, generate_xcm_message_id,
    simulate_portfolio_growth, update_vault_apys, xcm_delay, XcmDelayRange,
};
use xcm_yield_types::format_usd;

fn main() {
    println!("Cross-Chain Yield Simulation - Basic Usage");
    println!("==========================================\n");

    let mut rng = StdRng::seed_from_u64(42);
    let now = Utc::now();

    // Step 1: Generate the catalog
    println!("1. Generating vault catalog...");
    let mut vaults = generate_mock_vaults(&mut rng, now);
    find_best_vault(&mut vaults);
    for vault in &vaults {
        println!(
            "   {} {:<9} {:>5.2}% APY  TVL ${:>12}  risk {}/10{}{}",
            vault.logo,
            vault.chain_name,
            vault.apy,
            format_usd(vault.tvl.round()),
            vault.risk_score,
            if vault.is_active { "" } else { "  (inactive)" },
            if vault.is_best { "  <- best" } else { "" }
        );
    }
    println!();

    // Step 2: Aggregate statistics
    println!("2. Dashboard statistics:");
    let stats = generate_app_stats(&vaults, &mut rng);
    println!("   - Total TVL: ${}", format_usd(stats.total_tvl.round()));
    println!("   - Best APY: {:.2}%", stats.best_apy);
    println!("   - Active chains: {}", stats.active_chains);
    println!("   - Users: {}\n", stats.total_users);

    // Step 3: Deposit into the best vault and let it grow
    println!("3. Depositing $10,000 into the best vault...");
    let mut portfolio = generate_empty_portfolio(now);
    match best_vault(&vaults) {
        Some(vault) => {
            add_position_to_portfolio(&mut portfolio, &vault.id, 10_000.0, vault.apy, now);
            println!("   - Position opened in {} at {:.2}% APY", vault.chain_name, vault.apy);
        }
        None => println!("   - No active vault, skipping deposit"),
    }

    for tick in 1..=5 {
        update_vault_apys(&mut vaults, &mut rng, Utc::now());
        find_best_vault(&mut vaults);
        simulate_portfolio_growth(&mut portfolio, &vaults, Utc::now());
        println!(
            "   - Tick {}: value ${:.4}, earned ${:.4}, avg APY {:.2}%",
            tick, portfolio.total_value, portfolio.total_earned, portfolio.avg_apy
        );
    }
    println!();

    // Step 4: Settlement identifiers
    println!("4. Simulated XCM settlement:");
    println!("   - Message id: {}", generate_xcm_message_id(&mut rng));
    println!("   - Tx hash:    {}", generate_tx_hash(&mut rng));
    println!(
        "   - Delay:      {}ms",
        xcm_delay(&mut rng, XcmDelayRange::default()).as_millis()
    );

    println!("\nBasic usage example completed successfully!");
}
