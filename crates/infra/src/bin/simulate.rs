//! Play a batch of simulated players against an in-memory store.
//!
//! Usage: cargo run --bin yams-sim -- --players 500 --seed 7
//!
//! Prints how often each payout tier came up and checks that every awarded
//! pastry is accounted for in some player's winnings.

use std::collections::BTreeMap;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use yams_game::{PayoutTier, SeededRandom};
use yams_infra::seed::{DEMO_PASTRIES, seed_inventory};
use yams_infra::store::{InMemoryDocumentStore, InventoryStore, PlayerFilter, PlayerStore};
use yams_infra::{GameDispatcher, GameError};
use yams_core::PlayerId;
use yams_players::Player;

#[derive(Parser, Debug)]
#[command(name = "yams-sim")]
#[command(about = "Simulate players rolling for pastries")]
struct Args {
    /// Number of players to register
    #[arg(short, long, default_value_t = 100)]
    players: usize,

    /// RNG seed
    #[arg(short, long, default_value_t = 42)]
    seed: u64,

    /// Stock per demo pastry (overrides the catalogue)
    #[arg(long)]
    stock: Option<u32>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    yams_observability::init();
    let args = Args::parse();

    let store = Arc::new(InMemoryDocumentStore::new());
    let catalogue: Vec<(&str, u32)> = DEMO_PASTRIES
        .iter()
        .map(|(name, stock)| (*name, args.stock.unwrap_or(*stock)))
        .collect();
    seed_inventory(store.as_ref(), &catalogue).await?;
    let initial: u32 = catalogue.iter().map(|(_, s)| s).sum();

    let game = GameDispatcher::new(
        store.clone(),
        store.clone(),
        Arc::new(SeededRandom::new(args.seed)),
    );

    let mut tiers: BTreeMap<String, usize> = BTreeMap::new();
    for n in 0..args.players {
        let id = PlayerId::new();
        let player = Player::register(
            id,
            format!("player-{n}"),
            format!("player-{n}@sim.local"),
            "",
            chrono::Utc::now(),
        )?;
        store.insert_player(player).await?;

        loop {
            match game.play(id).await {
                Ok(outcome) => *tiers.entry(outcome.tier.to_string()).or_default() += 1,
                Err(GameError::NoTurnsRemaining) => break,
                Err(e) => return Err(e.into()),
            }
        }
    }

    let rolls: usize = tiers.values().sum();
    println!("{rolls} rolls by {} players (seed {})", args.players, args.seed);
    for tier in [
        PayoutTier::FiveOfAKind,
        PayoutTier::FourOfAKind,
        PayoutTier::TwoPair,
        PayoutTier::None,
    ] {
        let count = tiers.get(&tier.to_string()).copied().unwrap_or(0);
        let pct = if rolls == 0 { 0.0 } else { 100.0 * count as f64 / rolls as f64 };
        println!("  {:<16} {count:>6}  {pct:>6.2}%", tier.to_string());
    }

    let items = store.list_items().await?;
    let awarded: u32 = items.iter().map(|i| i.awarded()).sum();
    let remaining: u32 = items.iter().map(|i| i.stock()).sum();
    let won: u32 = store
        .find_players(&PlayerFilter::default())
        .await?
        .iter()
        .map(Player::winnings)
        .sum();

    println!("pastries awarded {awarded}, credited {won}, left {remaining} of {initial}");
    if awarded != won || awarded + remaining != initial {
        anyhow::bail!("conservation violated: awarded {awarded}, credited {won}, left {remaining}");
    }
    info!(rolls, awarded, "simulation complete");
    Ok(())
}
