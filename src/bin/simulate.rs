//! Headless fishing simulator.
//!
//! Drives `FishingGame` with auto-reel on until a number of fish are landed
//! and prints what the run earned. Useful for checking catch rates and the
//! level curve without a terminal.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                        # 100 catches on the first stage
//!   cargo run --bin simulate -- --catches 500 --stage 3
//!   cargo run --bin simulate -- --seed 42           # Reproducible run

use gofish::core::game_loop::{FishingGame, FishingPhase, GameLoop};
use gofish::core::game_state::GameState;
use gofish::fishing::data::STAGES;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::BTreeMap;
use std::env;

const STEP_MS: u64 = 50;
/// A run that lands nothing for this long is stuck.
const MAX_SIM_MS: u64 = 1000 * 60 * 60 * 24;

struct SimConfig {
    catches: u64,
    seed: Option<u64>,
    stage: usize,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            catches: 100,
            seed: None,
            stage: 0,
        }
    }
}

#[derive(Default)]
struct SimReport {
    landed: u64,
    lost: u64,
    missed: u64,
    perfect: u64,
    best_combo: u32,
    elapsed_ms: u64,
    by_rarity: BTreeMap<u8, u64>,
    by_fish: BTreeMap<String, u64>,
    achievements: usize,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let config = parse_args(&args);
    let seed = config.seed.unwrap_or_else(rand::random);

    println!("╔═══════════════════════════════════════════════════════════════╗");
    println!("║                  GO FISH! SIMULATOR                           ║");
    println!("╚═══════════════════════════════════════════════════════════════╝");
    println!();
    println!("Configuration:");
    println!("  Catches:        {}", config.catches);
    println!("  Stage:          {}", STAGES[config.stage].name);
    println!("  Seed:           {}", seed);
    println!();

    let mut rng = StdRng::seed_from_u64(seed);
    let mut game = FishingGame::with_clock(
        GameState::new(format!("sim_{}", seed)),
        chrono::Utc::now().timestamp_millis(),
    );
    game.state_mut().settings.auto_reel = true;
    game.start(config.stage, &mut rng);

    let mut report = SimReport::default();
    while report.landed < config.catches && report.elapsed_ms < MAX_SIM_MS {
        if game.phase() == FishingPhase::Idle && game.session().recast_timer_ms.is_none() {
            if game.state().rod_durability == 0 {
                game.state_mut().repair_rod();
            }
            game.cast();
        }
        if game.cutscene().is_some() {
            game.skip_cutscene();
        }

        let result = game.tick(STEP_MS, &mut rng);
        report.elapsed_ms += STEP_MS;
        if let Some(caught) = &result.caught {
            report.landed += 1;
            if caught.perfect {
                report.perfect += 1;
            }
            report.best_combo = report.best_combo.max(caught.combo);
            *report.by_rarity.entry(caught.item.rarity).or_default() += 1;
            *report.by_fish.entry(caught.item.name.clone()).or_default() += 1;
        }
        if result.line_broke {
            report.lost += 1;
        }
        if result.missed {
            report.missed += 1;
        }
        report.achievements += result.achievements_unlocked.len();
    }

    print_report(&report, game.state());
}

fn print_report(report: &SimReport, state: &GameState) {
    let minutes = report.elapsed_ms as f64 / 60_000.0;
    println!("Results:");
    println!("  Landed:         {}", report.landed);
    println!("  Lines broken:   {}", report.lost);
    println!("  Bites missed:   {}", report.missed);
    println!("  Perfect:        {}", report.perfect);
    println!("  Best combo:     {}", report.best_combo);
    println!("  Game time:      {:.1} min", minutes);
    if minutes > 0.0 {
        println!("  Catch rate:     {:.2} fish/min", report.landed as f64 / minutes);
    }
    println!();
    println!("Progress:");
    println!("  Score:          {}", state.score);
    println!("  Level:          {}", state.level);
    println!("  Angler level:   {}", state.experience.level);
    println!("  Achievements:   {}", report.achievements);
    println!();
    println!("By rarity:");
    for (rarity, count) in &report.by_rarity {
        println!("  {:<14}  {}", format!("rarity {}", rarity), count);
    }
    println!();
    println!("By fish:");
    for (name, count) in &report.by_fish {
        println!("  {:<14}  {}", name, count);
    }
}

fn parse_args(args: &[String]) -> SimConfig {
    let mut config = SimConfig::default();

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "-c" | "--catches" => {
                if i + 1 < args.len() {
                    config.catches = args[i + 1].parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if i + 1 < args.len() {
                    config.seed = args[i + 1].parse().ok();
                    i += 1;
                }
            }
            "-k" | "--stage" => {
                if i + 1 < args.len() {
                    config.stage = args[i + 1].parse().unwrap_or(0);
                    i += 1;
                }
            }
            "-h" | "--help" => {
                print_help();
                std::process::exit(0);
            }
            _ => {}
        }
        i += 1;
    }

    config.stage = config.stage.min(STAGES.len() - 1);
    config
}

fn print_help() {
    println!("GO FISH! Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -c, --catches <N>   Fish to land before stopping (default: 100)");
    println!("    -s, --seed <S>      Random seed for reproducibility");
    println!("    -k, --stage <K>     Stage index to fish (default: 0)");
    println!("    -h, --help          Show this help");
}
