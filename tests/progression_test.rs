//! Integration test: Angler progression
//!
//! Experience, skills, angler prestige and the rotating daily/weekly
//! challenges, both directly and as the fishing loop feeds them.

use chrono::{Duration as ChronoDuration, TimeZone, Utc};
use gofish::core::constants::TICK_INTERVAL_MS;
use gofish::core::game_loop::{FishingGame, FishingPhase, GameLoop};
use gofish::core::game_state::{GameState, Profile};
use gofish::fishing::data::STAGES;
use gofish::progression::challenges::{
    ChallengeContext, ChallengeKind, Challenges, DAILY_CHALLENGE_COUNT, WEEKLY_CHALLENGE_COUNT,
};
use gofish::progression::experience::{
    level_curve, Experience, LevelReward, Skill, MAX_LEVEL, MAX_SKILL_RANK, PRESTIGE_MIN_LEVEL,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn experience_at(level: u32) -> Experience {
    let mut xp = Experience::new();
    let needed = level_curve(MAX_LEVEL)[level as usize - 1];
    xp.add_experience(needed, "test");
    xp
}

// =============================================================================
// Experience
// =============================================================================

#[test]
fn test_curve_walks_level_by_level() {
    let curve = level_curve(MAX_LEVEL);
    let mut xp = Experience::new();
    for level in 2..=10u32 {
        let missing = curve[level as usize - 1] - xp.experience;
        let gain = xp.add_experience(missing, "test");
        assert_eq!(xp.level, level);
        assert_eq!(gain.level_ups.len(), 1);
        assert_eq!(gain.level_ups[0].level, level);
    }
}

#[test]
fn test_big_gain_reports_every_level() {
    let xp = experience_at(12);
    assert_eq!(xp.level, 12);
    // Levels 2..=12 with bonus points on 5 and 10
    assert_eq!(xp.total_skill_points, 9 + 2 + 3);
    assert_eq!(xp.skill_points, xp.total_skill_points);
}

#[test]
fn test_level_thirty_boosts_xp_permanently() {
    let mut xp = experience_at(29);
    let needed = level_curve(MAX_LEVEL)[29] - xp.experience;
    let gain = xp.add_experience(needed, "test");
    assert!(gain.level_ups[0]
        .rewards
        .iter()
        .any(|r| matches!(r, LevelReward::XpBoost(_))));
    assert!((xp.multipliers.xp - 1.1).abs() < 1e-9);

    let boosted = xp.add_experience(100, "test");
    assert_eq!(boosted.amount, 110);
}

#[test]
fn test_experience_stops_at_level_cap() {
    let mut xp = experience_at(MAX_LEVEL);
    assert_eq!(xp.level, MAX_LEVEL);
    assert_eq!(xp.xp_for_next_level(), None);
    let gain = xp.add_experience(1_000_000, "test");
    assert!(gain.level_ups.is_empty());
    assert_eq!(xp.level_progress(), 1.0);
}

// =============================================================================
// Skills
// =============================================================================

#[test]
fn test_skill_points_improve_bonuses() {
    let mut xp = experience_at(6);
    let base = xp.skill_bonus();
    assert!(xp.spend_skill_point(Skill::Casting));
    assert!(xp.spend_skill_point(Skill::Strength));

    let bonus = xp.skill_bonus();
    assert!(bonus.cast_distance > base.cast_distance);
    assert!(bonus.tension_resist < base.tension_resist);
    assert_eq!(bonus.reel_speed, base.reel_speed);
}

#[test]
fn test_skill_rank_is_capped() {
    let mut xp = experience_at(60);
    for _ in 0..MAX_SKILL_RANK {
        assert!(xp.spend_skill_point(Skill::Luck));
    }
    let left = xp.skill_points;
    assert!(left > 0);
    assert!(!xp.spend_skill_point(Skill::Luck));
    assert_eq!(xp.skill_points, left);
}

// =============================================================================
// Angler prestige
// =============================================================================

#[test]
fn test_angler_prestige_trades_levels_for_multipliers() {
    let mut xp = experience_at(PRESTIGE_MIN_LEVEL);
    let total_points = xp.total_skill_points;
    let xp_multiplier = xp.multipliers.xp;
    let bonus = xp.prestige().expect("eligible");

    assert_eq!(bonus.prestige, 1);
    assert_eq!(xp.level, 1);
    assert_eq!(xp.experience, 0);
    assert_eq!(xp.skill_points, total_points / 10);
    assert!((xp.multipliers.xp - (xp_multiplier + 0.05)).abs() < 1e-9);
    assert_eq!(xp.scale_coins(1000), 1050);
    assert!(xp.prestige().is_none());
}

// =============================================================================
// Challenges
// =============================================================================

#[test]
fn test_challenges_roll_and_expire() {
    let mut rng = create_test_rng();
    let now = Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap();
    let mut challenges = Challenges::new();

    assert_eq!(challenges.check_resets(&now, &mut rng), (true, true));
    assert_eq!(challenges.daily.len(), DAILY_CHALLENGE_COUNT);
    assert_eq!(challenges.weekly.len(), WEEKLY_CHALLENGE_COUNT);
    assert_eq!(challenges.check_resets(&now, &mut rng), (false, false));

    let tomorrow = now + ChronoDuration::days(1);
    assert_eq!(challenges.check_resets(&tomorrow, &mut rng), (true, false));

    let next_week = now + ChronoDuration::days(7);
    assert_eq!(challenges.check_resets(&next_week, &mut rng), (true, true));
}

#[test]
fn test_every_rolled_challenge_can_be_completed_and_claimed_once() {
    let mut rng = create_test_rng();
    let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    let mut challenges = Challenges::new();
    challenges.check_resets(&now, &mut rng);

    let rolled: Vec<_> = challenges.all().cloned().collect();
    for c in &rolled {
        if c.kind == ChallengeKind::AllStages {
            for stage in 0..STAGES.len() {
                let ctx = ChallengeContext {
                    stage: Some(stage),
                    ..Default::default()
                };
                challenges.update_progress(c.kind, 1, &ctx);
            }
        } else {
            let ctx = ChallengeContext {
                stage: c.stage.or(Some(0)),
                weather: c.weather,
                time: c.time,
            };
            challenges.update_progress(c.kind, c.target, &ctx);
        }
    }

    assert!(challenges.all().all(|c| c.completed));
    for c in &rolled {
        let reward = challenges.claim_reward(&c.id).expect("completed");
        assert_eq!(reward, c.reward);
        assert!(challenges.claim_reward(&c.id).is_none());
    }
    assert_eq!(challenges.completed.len(), rolled.len());
}

#[test]
fn test_stage_challenge_ignores_other_stages() {
    let mut rng = create_test_rng();
    let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    let mut challenges = Challenges::new();
    challenges.check_resets(&now, &mut rng);
    if let Some(c) = challenges.daily.first_mut() {
        c.kind = ChallengeKind::SpecificStage;
        c.stage = Some(1);
        c.target = 5;
        c.progress = 0;
    }

    let wrong = ChallengeContext {
        stage: Some(2),
        ..Default::default()
    };
    let done = challenges.update_progress(ChallengeKind::SpecificStage, 5, &wrong);
    assert!(done.iter().all(|c| c.stage != Some(1)));
    assert_eq!(challenges.daily[0].progress, 0);
}

// =============================================================================
// Through the fishing loop
// =============================================================================

#[test]
fn test_catches_feed_experience_and_challenges() {
    let mut rng = create_test_rng();
    let mut game = FishingGame::with_clock(
        GameState::new("term_prog".to_string()),
        1_735_732_800_000,
    );
    game.state_mut().settings.auto_reel = true;
    game.start(0, &mut rng);

    let mut landed = 0;
    let mut xp_gained = 0;
    for _ in 0..20_000 {
        if landed == 3 {
            break;
        }
        if game.phase() == FishingPhase::Idle && game.session().recast_timer_ms.is_none() {
            game.cast();
        }
        let result = game.tick(TICK_INTERVAL_MS, &mut rng);
        xp_gained += result.xp_gained;
        if result.caught.is_some() {
            landed += 1;
        }
    }

    let state = game.state();
    assert_eq!(landed, 3);
    // Achievement rewards add experience outside the tick report
    assert!(xp_gained > 0);
    assert!(state.experience.total_experience >= xp_gained);
    assert_eq!(state.experience.stats.fish_caught, 3);
    assert!(!state.challenges.daily.is_empty());
    let catch_progress = state
        .challenges
        .all()
        .filter(|c| c.kind == ChallengeKind::CatchFish)
        .all(|c| c.progress == 3.min(c.target));
    assert!(catch_progress);
}

#[test]
fn test_progression_survives_profile_json() {
    let mut rng = create_test_rng();
    let mut state = GameState::new("term_prog".to_string());
    state.experience.add_experience(5_000, "test");
    state.experience.spend_skill_point(Skill::Reeling);
    let now = Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap();
    state.challenges.check_resets(&now, &mut rng);

    let json = serde_json::to_string(&state.to_profile()).unwrap();
    let profile: Profile = serde_json::from_str(&json).unwrap();
    let restored = GameState::from_profile(profile);

    assert_eq!(restored.experience.level, state.experience.level);
    assert_eq!(restored.experience.skills.reeling, 1);
    assert_eq!(
        restored.experience.xp_for_next_level(),
        state.experience.xp_for_next_level()
    );
    assert_eq!(restored.challenges.daily, state.challenges.daily);
    assert_eq!(restored.challenges.weekly, state.challenges.weekly);
}
