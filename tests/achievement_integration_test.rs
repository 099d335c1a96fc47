//! Integration test: Achievement unlock system
//!
//! Checks achievements unlock from the game events that drive them (catches,
//! levels, purchases, whales, prestige), pay their rewards once, and agree
//! with the catalog the backend serves.

use gofish::achievements::{
    get_achievement_def, shared_achievements, AchievementCategory, AchievementId, Achievements,
    CatchSummary,
};
use gofish::api::GameApi;
use gofish::backend::LocalBackend;
use gofish::core::constants::TICK_INTERVAL_MS;
use gofish::core::game_loop::{FishingGame, GameLoop};
use gofish::core::game_state::GameState;
use gofish::fishing::data::LURES;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn catch(total: u64) -> CatchSummary {
    CatchSummary {
        total_catches: total,
        size: 20,
        ..Default::default()
    }
}

// =============================================================================
// Catch milestones
// =============================================================================

#[test]
fn test_catch_counts_unlock_in_order() {
    let mut achievements = Achievements::default();
    let mut unlocked = Vec::new();
    for total in 1..=100 {
        unlocked.extend(achievements.on_catch(&catch(total), Some("Marlin")));
    }
    assert_eq!(
        unlocked,
        vec![
            AchievementId::FirstCatch,
            AchievementId::Catch10,
            AchievementId::Catch50,
            AchievementId::Catch100,
        ]
    );
    let progress = achievements
        .get_progress(AchievementId::Catch1000)
        .expect("tracked");
    assert_eq!((progress.current, progress.target), (100, 1000));
}

#[test]
fn test_single_catch_can_unlock_several() {
    let mut achievements = Achievements::default();
    let summary = CatchSummary {
        total_catches: 1,
        perfect_catches: 1,
        combo: 5,
        size: 120,
        rarity: 3,
        golden_koi: true,
        storm_catches: 0,
    };
    let unlocked = achievements.on_catch(&summary, None);
    for id in [
        AchievementId::FirstCatch,
        AchievementId::PerfectFirst,
        AchievementId::Combo3,
        AchievementId::Combo5,
        AchievementId::BigFish,
        AchievementId::HugeFish,
        AchievementId::RareFirst,
        AchievementId::GoldenKoi,
    ] {
        assert!(unlocked.contains(&id), "{:?} should unlock", id);
    }
    assert!(!unlocked.contains(&AchievementId::Combo10));
    assert!(achievements.on_catch(&summary, None).is_empty());
}

// =============================================================================
// Rewards through the game
// =============================================================================

#[test]
fn test_buying_every_lure_pays_out_on_next_tick() {
    let mut rng = create_test_rng();
    let mut game = FishingGame::new(GameState::new("term_ach".to_string()));
    let price: u64 = LURES.iter().map(|l| l.price).sum();
    let max_level = LURES.iter().map(|l| l.unlock_level).max().unwrap_or(1);
    game.state_mut().set_level_for_testing(max_level);
    game.state_mut().add_score(price + 100);

    for index in 1..LURES.len() {
        game.buy_lure(index).expect("affordable");
    }
    let reward = get_achievement_def(AchievementId::AllLures)
        .expect("defined")
        .reward;
    assert_eq!(game.state().score, 100 + reward.coins);

    let result = game.tick(TICK_INTERVAL_MS, &mut rng);
    assert_eq!(result.achievements_unlocked, vec![AchievementId::AllLures]);
    assert!(result
        .messages
        .iter()
        .any(|m| m.starts_with("Achievement unlocked:")));

    let again = game.tick(TICK_INTERVAL_MS, &mut rng);
    assert!(again.achievements_unlocked.is_empty());
}

#[test]
fn test_granting_pays_coins_and_xp() {
    let mut state = GameState::new("term_ach".to_string());
    let ids = state.achievements.on_level_up(10, Some("Marlin"));
    assert_eq!(ids, vec![AchievementId::Level10]);

    let reward = get_achievement_def(AchievementId::Level10).unwrap().reward;
    state.grant_achievements(ids);
    assert_eq!(state.score, reward.coins);
    assert_eq!(state.experience.total_experience, reward.xp);
}

#[test]
fn test_whale_watcher_tracks_progress() {
    let mut achievements = Achievements::default();
    for seen in 1..10 {
        assert!(achievements.on_whale_seen(seen, None).is_empty());
    }
    let progress = achievements.get_progress(AchievementId::WhaleWatcher).unwrap();
    assert_eq!(progress.current, 9);
    assert_eq!(
        achievements.on_whale_seen(10, None),
        vec![AchievementId::WhaleWatcher]
    );
}

#[test]
fn test_unlock_records_the_angler() {
    let mut achievements = Achievements::default();
    achievements.on_prestige(1, Some("Marlin"));
    let record = &achievements.unlocked[&AchievementId::Prestige1];
    assert_eq!(record.username.as_deref(), Some("Marlin"));
    assert_eq!(achievements.highest_prestige, 1);
}

// =============================================================================
// Catalog
// =============================================================================

#[test]
fn test_categories_cover_every_achievement() {
    let achievements = Achievements::default();
    let total: usize = AchievementCategory::ALL
        .iter()
        .map(|c| achievements.count_by_category(*c).1)
        .sum();
    assert_eq!(total, achievements.total_count());
}

#[test]
fn test_secret_achievement_hidden_until_unlocked() {
    let def = get_achievement_def(AchievementId::GoldenKoi).unwrap();
    assert!(def.secret);
    assert_eq!(def.display_name(false), "???");
    assert_eq!(def.display_name(true), def.name);
}

#[test]
fn test_backend_catalog_matches_shared_set() {
    let mut backend = LocalBackend::default();
    let served: Vec<String> = backend
        .achievements()
        .unwrap()
        .achievements
        .into_iter()
        .map(|a| a.id)
        .collect();
    let shared: Vec<String> = shared_achievements()
        .iter()
        .map(|d| d.id.wire_id().to_string())
        .collect();
    assert_eq!(served, shared);
}

#[test]
fn test_remote_merge_skips_unknown_and_held() {
    let mut achievements = Achievements::default();
    achievements.on_catch(&catch(1), None);
    let remote = vec![
        "first_catch".to_string(),
        "level_10".to_string(),
        "not_a_real_one".to_string(),
    ];
    assert_eq!(achievements.merge_remote(&remote, Some("Marlin")), 1);
    assert!(achievements.is_unlocked(AchievementId::Level10));
    assert_eq!(
        achievements.unlocked_wire_ids(),
        vec!["first_catch".to_string(), "level_10".to_string()]
    );
}
