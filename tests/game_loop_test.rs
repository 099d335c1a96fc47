//! Integration test: Fishing loop
//!
//! Drives `FishingGame` through whole sessions the way the terminal front-end
//! and the simulator do: start, cast, reel, land, recast, prestige, save.

use gofish::achievements::AchievementId;
use gofish::core::constants::{ROD_MAX_DURABILITY, TICK_INTERVAL_MS};
use gofish::core::game_loop::{FishingGame, FishingPhase, GameLoop, TickResult};
use gofish::core::game_state::GameState;
use gofish::fishing::data::STAGES;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

const START_MS: i64 = 1_735_732_800_000;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn create_game(stage: usize, rng: &mut ChaCha8Rng) -> FishingGame {
    let mut game = FishingGame::with_clock(GameState::new("term_it".to_string()), START_MS);
    game.start(stage, rng);
    game
}

/// Ticks at the front-end rate, casting whenever the line is idle, until
/// `count` fish are landed. Returns every tick result.
fn land_fish(game: &mut FishingGame, rng: &mut ChaCha8Rng, count: u64) -> Vec<TickResult> {
    let mut results = Vec::new();
    let mut landed = 0;
    let mut elapsed = 0;
    while landed < count {
        assert!(elapsed < 600_000, "no progress after {} ms", elapsed);
        if game.phase() == FishingPhase::Idle && game.session().recast_timer_ms.is_none() {
            if game.state().rod_durability == 0 {
                game.state_mut().repair_rod();
            }
            game.cast();
        }
        let result = game.tick(TICK_INTERVAL_MS, rng);
        elapsed += TICK_INTERVAL_MS;
        if result.caught.is_some() {
            landed += 1;
        }
        results.push(result);
    }
    results
}

fn wait_for_phase(game: &mut FishingGame, rng: &mut ChaCha8Rng, phase: FishingPhase) -> bool {
    for _ in 0..2_000 {
        if game.phase() == phase {
            return true;
        }
        game.tick(TICK_INTERVAL_MS, rng);
    }
    false
}

// =============================================================================
// Sessions
// =============================================================================

#[test]
fn test_start_enters_stage() {
    let mut rng = create_test_rng();
    let game = create_game(3, &mut rng);

    assert!(game.state().playing);
    assert_eq!(game.state().current_stage, 3);
    assert_eq!(game.state().time_of_day, STAGES[3].time_of_day);
    assert_eq!(game.phase(), FishingPhase::Idle);
}

#[test]
fn test_auto_reel_session_lands_fish() {
    let mut rng = create_test_rng();
    let mut game = create_game(0, &mut rng);
    game.state_mut().settings.auto_reel = true;

    let results = land_fish(&mut game, &mut rng, 5);
    let points: u64 = results
        .iter()
        .filter_map(|r| r.caught.as_ref())
        .map(|c| c.points)
        .sum();
    let state = game.state();

    assert_eq!(state.total_catches, 5);
    assert_eq!(state.session_catches, 5);
    assert_eq!(state.tacklebox.len(), 5);
    assert_eq!(state.remaining, state.fish_per_level - 5);
    assert!(state.score >= points);
    assert!(state.high_score >= state.score);
    assert!(state.rod_durability < ROD_MAX_DURABILITY);
    assert!(state.achievements.is_unlocked(AchievementId::FirstCatch));
    assert!(state.experience.total_experience > 0);
}

#[test]
fn test_every_catch_is_stored_with_its_stage() {
    let mut rng = create_test_rng();
    let mut game = create_game(2, &mut rng);
    game.state_mut().settings.auto_reel = true;

    let results = land_fish(&mut game, &mut rng, 3);
    for report in results.iter().filter_map(|r| r.caught.as_ref()) {
        let stored = game
            .state()
            .tacklebox
            .get(&report.item.id)
            .expect("caught fish is in the tacklebox");
        assert_eq!(stored.stage, 2);
        assert_eq!(stored.name, report.fish.name);
        // The tacklebox keeps the species' base value, the score gets the bonus
        assert_eq!(stored.points, report.fish.points);
        assert!(report.points >= report.fish.points);
    }
}

#[test]
fn test_tacklebox_value_sums_base_points() {
    let mut rng = create_test_rng();
    let mut game = create_game(1, &mut rng);
    game.state_mut().settings.auto_reel = true;

    let results = land_fish(&mut game, &mut rng, 4);
    let base: u64 = results
        .iter()
        .filter_map(|r| r.caught.as_ref())
        .map(|c| c.fish.points)
        .sum();
    assert_eq!(game.state().tacklebox.total_value, base);
}

#[test]
fn test_combo_grows_across_consecutive_catches() {
    let mut rng = create_test_rng();
    let mut game = create_game(0, &mut rng);
    game.state_mut().settings.auto_reel = true;

    let results = land_fish(&mut game, &mut rng, 3);
    let combos: Vec<u32> = results
        .iter()
        .filter_map(|r| r.caught.as_ref())
        .map(|c| c.combo)
        .collect();
    let broke = results.iter().any(|r| r.line_broke);

    if !broke {
        assert_eq!(combos, vec![1, 2, 3]);
        assert!(game.state().achievements.is_unlocked(AchievementId::Combo3));
    }
    assert!(game.state().max_combo >= *combos.last().unwrap_or(&0));
}

#[test]
fn test_manual_reel_hooks_the_fish() {
    let mut rng = create_test_rng();
    let mut game = create_game(0, &mut rng);

    assert!(game.cast());
    assert!(wait_for_phase(&mut game, &mut rng, FishingPhase::Bite));
    assert!(game.reel(&mut rng));
    assert_eq!(game.phase(), FishingPhase::Reeling);
    assert!(game.session().fish.is_some());
}

#[test]
fn test_leaving_mid_fight_loses_the_fish() {
    let mut rng = create_test_rng();
    let mut game = create_game(0, &mut rng);

    game.cast();
    assert!(wait_for_phase(&mut game, &mut rng, FishingPhase::Bite));
    game.reel(&mut rng);
    game.stop();

    assert!(!game.state().playing);
    assert_eq!(game.phase(), FishingPhase::Idle);
    assert!(game.session().fish.is_none());
    assert!(game.state().tacklebox.is_empty());
}

#[test]
fn test_stopped_game_does_not_recast() {
    let mut rng = create_test_rng();
    let mut game = create_game(0, &mut rng);
    game.state_mut().settings.auto_reel = true;
    land_fish(&mut game, &mut rng, 1);
    game.stop();

    for _ in 0..200 {
        game.tick(TICK_INTERVAL_MS, &mut rng);
    }
    assert_eq!(game.phase(), FishingPhase::Idle);
}

// =============================================================================
// Prestige
// =============================================================================

#[test]
fn test_prestige_requires_level_fifty() {
    let mut rng = create_test_rng();
    let mut game = create_game(0, &mut rng);
    game.state_mut().set_level_for_testing(49);
    assert!(!game.can_prestige());
    game.prestige();
    assert_eq!(game.state().prestige, 0);
    assert_eq!(game.state().level, 49);
}

#[test]
fn test_prestige_resets_run_and_reports_achievement() {
    let mut rng = create_test_rng();
    let mut game = create_game(0, &mut rng);
    game.state_mut().settings.auto_reel = true;
    land_fish(&mut game, &mut rng, 2);
    game.state_mut().set_level_for_testing(50);
    let high_score = game.state().high_score;

    assert!(game.tick(TICK_INTERVAL_MS, &mut rng).can_prestige);
    game.prestige();
    let result = game.tick(TICK_INTERVAL_MS, &mut rng);
    let state = game.state();

    assert_eq!(state.prestige, 1);
    assert_eq!(state.level, 1);
    assert!(!state.playing);
    assert!(state.tacklebox.is_empty());
    assert_eq!(state.tacklebox.total_fish_caught, 2);
    assert_eq!(state.total_catches, 2);
    assert!(state.high_score >= high_score);
    assert!(result.achievements_unlocked.contains(&AchievementId::Prestige1));
}

// =============================================================================
// Persistence
// =============================================================================

#[test]
fn test_profile_survives_a_session() {
    let mut rng = create_test_rng();
    let mut game = create_game(1, &mut rng);
    game.state_mut().settings.auto_reel = true;
    land_fish(&mut game, &mut rng, 3);

    let profile = game.state().to_profile();
    let restored = GameState::from_profile(profile);
    let original = game.state();

    assert_eq!(restored.total_catches, original.total_catches);
    assert_eq!(restored.high_score, original.high_score);
    assert_eq!(restored.tacklebox.len(), original.tacklebox.len());
    assert_eq!(restored.max_combo, original.max_combo);
    assert_eq!(
        restored.achievements.unlocked_count(),
        original.achievements.unlocked_count()
    );
    assert_eq!(restored.experience.level, original.experience.level);
    // A new run starts from zero
    assert_eq!(restored.score, 0);
    assert_eq!(restored.level, 1);
    assert!(!restored.playing);
}
