//! Integration test: Backend sync
//!
//! Runs `BackendSync` against the in-process `LocalBackend` the way `--offline`
//! play does, and against a dead backend to check the game keeps going.

use gofish::api::{
    AchievementCatalog, AddFishResponse, ApiError, ApiResult, BackendSync, CircuitState,
    DailyChallenge, GameApi, LeaderboardEntry, NewFish, PrestigeResponse, RetryPolicy, Score,
    ScoreSubmission, SuccessResponse, SyncEvent, SyncJob, SyncSnapshot, SyncWorker,
    TackleboxResponse, UnlockAchievementResponse, UnlockLureResponse, User,
};
use gofish::achievements::AchievementId;
use gofish::backend::LocalBackend;
use gofish::core::constants::TICK_INTERVAL_MS;
use gofish::core::game_loop::{FishingGame, FishingPhase, GameLoop};
use gofish::core::game_state::GameState;
use gofish::environment::weather::WeatherReport;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

fn create_test_rng() -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(12345)
}

fn no_wait() -> RetryPolicy {
    RetryPolicy {
        max_attempts: 1,
        base_delay: Duration::ZERO,
        max_delay: Duration::ZERO,
    }
}

fn local_sync() -> BackendSync {
    BackendSync::with_policy(Box::new(LocalBackend::default()), no_wait())
}

/// A backend whose every request fails, optionally after a delay.
struct DownApi {
    calls: Arc<AtomicU32>,
    delay: Duration,
}

impl DownApi {
    fn new(calls: &Arc<AtomicU32>) -> Self {
        Self {
            calls: Arc::clone(calls),
            delay: Duration::ZERO,
        }
    }

    fn fail<T>(&self) -> ApiResult<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::thread::sleep(self.delay);
        Err(ApiError::Transport("connection refused".to_string()))
    }
}

impl GameApi for DownApi {
    fn create_user(&mut self, _: &str, _: &str) -> ApiResult<User> {
        self.fail()
    }
    fn get_user(&mut self, _: &str) -> ApiResult<User> {
        self.fail()
    }
    fn unlock_lure(&mut self, _: &str, _: usize) -> ApiResult<UnlockLureResponse> {
        self.fail()
    }
    fn update_high_score(&mut self, _: &str, _: u64) -> ApiResult<SuccessResponse> {
        self.fail()
    }
    fn increment_catches(&mut self, _: &str, _: u64) -> ApiResult<SuccessResponse> {
        self.fail()
    }
    fn set_level(&mut self, _: &str, _: u32) -> ApiResult<SuccessResponse> {
        self.fail()
    }
    fn prestige(&mut self, _: &str) -> ApiResult<PrestigeResponse> {
        self.fail()
    }
    fn unlock_achievement(&mut self, _: &str, _: &str) -> ApiResult<UnlockAchievementResponse> {
        self.fail()
    }
    fn complete_daily(&mut self, _: &str) -> ApiResult<SuccessResponse> {
        self.fail()
    }
    fn submit_score(&mut self, _: &ScoreSubmission) -> ApiResult<Score> {
        self.fail()
    }
    fn leaderboard(&mut self, _: usize) -> ApiResult<Vec<LeaderboardEntry>> {
        self.fail()
    }
    fn weather(&mut self) -> ApiResult<WeatherReport> {
        self.fail()
    }
    fn add_fish(&mut self, _: &str, _: &NewFish) -> ApiResult<AddFishResponse> {
        self.fail()
    }
    fn tacklebox(&mut self, _: &str, _: usize) -> ApiResult<TackleboxResponse> {
        self.fail()
    }
    fn daily_challenge(&mut self) -> ApiResult<DailyChallenge> {
        self.fail()
    }
    fn achievements(&mut self) -> ApiResult<AchievementCatalog> {
        self.fail()
    }
}

/// Plays with auto-reel until one fish is landed, pushing it like the front-end.
fn land_and_push(game: &mut FishingGame, sync: &mut BackendSync, rng: &mut ChaCha8Rng) {
    game.state_mut().settings.auto_reel = true;
    for _ in 0..20_000 {
        if game.phase() == FishingPhase::Idle && game.session().recast_timer_ms.is_none() {
            game.cast();
        }
        let result = game.tick(TICK_INTERVAL_MS, rng);
        if let Some(report) = &result.caught {
            sync.push_catch(game.state(), &report.item).unwrap();
            sync.push_achievements(game.state(), &result.achievements_unlocked)
                .unwrap();
            return;
        }
    }
    panic!("no fish landed");
}

// =============================================================================
// Offline backend
// =============================================================================

#[test]
fn test_bootstrap_signs_in_and_fetches_weather() {
    let mut sync = local_sync();
    let mut state = GameState::new("term_sync".to_string());
    let report = sync.bootstrap(&mut state);

    assert!(report.user_id.is_some());
    assert_eq!(state.user_id, report.user_id);
    assert!(state.weather.is_some());
    assert!(state.daily.challenge.is_some());
    assert_eq!(sync.breaker().state(), CircuitState::Closed);
}

#[test]
fn test_catch_reaches_remote_tacklebox() {
    let mut rng = create_test_rng();
    let mut sync = local_sync();
    let mut state = GameState::new("term_sync".to_string());
    sync.bootstrap(&mut state);

    let mut game = FishingGame::new(state);
    game.start(0, &mut rng);
    land_and_push(&mut game, &mut sync, &mut rng);

    let remote = sync.remote_tacklebox(game.state(), 10).unwrap();
    let local = &game.state().tacklebox.items[0];
    assert_eq!(remote.count, 1);
    assert_eq!(remote.fish[0].name, local.name);
    assert_eq!(remote.fish[0].points, local.points);
}

#[test]
fn test_achievements_follow_the_device() {
    let mut rng = create_test_rng();
    let mut sync = local_sync();
    let mut state = GameState::new("term_sync".to_string());
    sync.bootstrap(&mut state);
    let mut game = FishingGame::new(state);
    game.start(0, &mut rng);
    land_and_push(&mut game, &mut sync, &mut rng);

    // Same device, fresh install
    let mut reinstalled = GameState::new("term_sync".to_string());
    let report = sync.bootstrap(&mut reinstalled);
    assert_eq!(report.user_id, game.state().user_id);
    assert!(reinstalled.achievements.is_unlocked(AchievementId::FirstCatch));
}

#[test]
fn test_session_scores_rank_on_leaderboard() {
    let mut sync = local_sync();
    for (device, points) in [("term_a", 300), ("term_b", 900), ("term_c", 600)] {
        let mut state = GameState::new(device.to_string());
        state.username = device.to_uppercase();
        sync.bootstrap(&mut state);
        state.add_score(points);
        let score = sync.submit_session_score(&state).unwrap().unwrap();
        assert_eq!(score.score, points);
    }

    let board = sync.leaderboard(2).unwrap();
    assert_eq!(board.len(), 2);
    assert_eq!(board[0].username, "TERM_B");
    assert_eq!(board[0].score, 900);
    assert_eq!(board[1].score, 600);
}

#[test]
fn test_empty_session_is_not_submitted() {
    let mut sync = local_sync();
    let mut state = GameState::new("term_sync".to_string());
    sync.bootstrap(&mut state);
    assert_eq!(sync.submit_session_score(&state).unwrap(), None);
    assert!(sync.leaderboard(10).unwrap().is_empty());
}

#[test]
fn test_prestige_and_lures_sync() {
    let mut sync = local_sync();
    let mut state = GameState::new("term_sync".to_string());
    sync.bootstrap(&mut state);
    state.unlock_lure(1);
    sync.push_lure(&state, 1).unwrap();
    assert_eq!(sync.push_prestige(&state).unwrap(), 1);
    assert_eq!(sync.push_prestige(&state).unwrap(), 2);

    let mut reinstalled = GameState::new("term_sync".to_string());
    let report = sync.bootstrap(&mut reinstalled);
    assert_eq!(report.lures_merged, 1);
    assert!(reinstalled.unlocked_lures.contains(&1));
}

#[test]
fn test_pushes_without_sign_in_are_refused() {
    let mut rng = create_test_rng();
    let mut sync = local_sync();
    let mut state = GameState::new("term_sync".to_string());
    let item = state.simulate_catch(0, 1_000, &mut rng);

    assert!(matches!(
        sync.push_catch(&state, &item),
        Err(ApiError::NotFound(_))
    ));
    assert!(matches!(sync.push_level(&state), Err(ApiError::NotFound(_))));
}

// =============================================================================
// Dead backend
// =============================================================================

#[test]
fn test_dead_backend_leaves_game_playable() {
    let calls = Arc::new(AtomicU32::new(0));
    let mut sync = BackendSync::with_policy(Box::new(DownApi::new(&calls)), no_wait());
    let mut state = GameState::new("term_down".to_string());
    let report = sync.bootstrap(&mut state);

    assert!(report.user_id.is_none());
    assert!(!report.weather);
    assert!(state.user_id.is_none());
    assert!(state.weather.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 2);

    let mut rng = create_test_rng();
    let mut game = FishingGame::new(state);
    game.start(0, &mut rng);
    assert!(game.cast());
}

#[test]
fn test_breaker_opens_after_repeated_failures() {
    let calls = Arc::new(AtomicU32::new(0));
    let mut sync = BackendSync::with_policy(Box::new(DownApi::new(&calls)), no_wait());

    for _ in 0..5 {
        assert!(matches!(sync.leaderboard(10), Err(ApiError::Transport(_))));
    }
    assert_eq!(sync.breaker().state(), CircuitState::Open);
    assert_eq!(calls.load(Ordering::SeqCst), 5);

    assert_eq!(sync.leaderboard(10), Err(ApiError::CircuitOpen));
    assert_eq!(calls.load(Ordering::SeqCst), 5);
}

// =============================================================================
// Sync thread
// =============================================================================

#[test]
fn test_slow_backend_does_not_block_the_caller() {
    let calls = Arc::new(AtomicU32::new(0));
    let api = DownApi {
        calls: Arc::clone(&calls),
        delay: Duration::from_millis(400),
    };
    let worker = SyncWorker::spawn(BackendSync::with_policy(Box::new(api), no_wait()));

    let mut rng = create_test_rng();
    let mut state = GameState::new("term_slow".to_string());
    state.user_id = Some("user-1".to_string());
    let item = state.simulate_catch(0, 1_000, &mut rng);

    let start = Instant::now();
    worker.submit(SyncJob::Catch(SyncSnapshot::from(&state), item));
    worker.submit(SyncJob::Leaderboard(10));
    assert!(start.elapsed() < Duration::from_millis(200));

    let deadline = Instant::now() + Duration::from_secs(10);
    let event = loop {
        if let Some(event) = worker.poll().into_iter().next() {
            break event;
        }
        assert!(Instant::now() < deadline, "leaderboard never answered");
        std::thread::sleep(Duration::from_millis(10));
    };
    assert!(matches!(event, SyncEvent::Leaderboard(Err(ApiError::Transport(_)))));
    // The catch stopped at its first failing request
    assert_eq!(calls.load(Ordering::SeqCst), 2);
}

#[test]
fn test_worker_pushes_reach_the_backend() {
    let mut sync = local_sync();
    let mut state = GameState::new("term_worker".to_string());
    sync.bootstrap(&mut state);
    let mut rng = create_test_rng();
    let item = state.simulate_catch(1, 2_000, &mut rng);
    state.add_score(250);
    let session_score = state.session_score;

    let worker = SyncWorker::spawn(sync);
    worker.submit(SyncJob::Catch(SyncSnapshot::from(&state), item));
    worker.submit(SyncJob::SessionScore(SyncSnapshot::from(&state)));
    worker.submit(SyncJob::Leaderboard(5));

    let mut events = Vec::new();
    let deadline = Instant::now() + Duration::from_secs(5);
    while events.len() < 2 {
        events.extend(worker.poll());
        assert!(Instant::now() < deadline, "worker replies missing");
        std::thread::sleep(Duration::from_millis(5));
    }
    assert!(matches!(&events[0], SyncEvent::SessionSubmitted(score) if score.score == session_score));
    match &events[1] {
        SyncEvent::Leaderboard(Ok(board)) => assert_eq!(board[0].username, state.username),
        other => panic!("unexpected {:?}", other),
    }
    worker.shutdown();
}
