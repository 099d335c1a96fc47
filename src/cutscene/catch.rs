//! The overlay shown after landing a fish.

use super::particles::{spawn_burst, Particle, PARTICLE_STEP_MS};
use crate::fishing::types::HookedFish;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CutscenePhase {
    Start,
    FishAppears,
    TextAppears,
    PointsFly,
    FadeOut,
    Complete,
}

impl CutscenePhase {
    /// Phase reached after `elapsed_ms`.
    pub fn at(elapsed_ms: u64) -> Self {
        match elapsed_ms {
            0..=99 => CutscenePhase::Start,
            100..=499 => CutscenePhase::FishAppears,
            500..=1199 => CutscenePhase::TextAppears,
            1200..=2199 => CutscenePhase::PointsFly,
            2200..=2799 => CutscenePhase::FadeOut,
            _ => CutscenePhase::Complete,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CatchCutscene {
    pub fish: HookedFish,
    pub is_perfect: bool,
    pub points: u64,
    pub elapsed_ms: u64,
    pub phase: CutscenePhase,
    pub particles: Vec<Particle>,
    /// Time not yet turned into particle steps
    particle_clock_ms: u64,
}

impl CatchCutscene {
    pub fn new(fish: HookedFish, is_perfect: bool, points: u64, rng: &mut impl Rng) -> Self {
        Self {
            fish,
            is_perfect,
            points,
            elapsed_ms: 0,
            phase: CutscenePhase::Start,
            particles: spawn_burst(is_perfect, rng),
            particle_clock_ms: 0,
        }
    }

    /// Advances the animation. Returns true once the cutscene has finished.
    pub fn update(&mut self, dt_ms: u64) -> bool {
        self.elapsed_ms += dt_ms;
        self.phase = CutscenePhase::at(self.elapsed_ms);

        if self.phase >= CutscenePhase::FishAppears {
            self.particle_clock_ms += dt_ms;
            while self.particle_clock_ms >= PARTICLE_STEP_MS {
                self.particle_clock_ms -= PARTICLE_STEP_MS;
                for p in &mut self.particles {
                    p.step();
                }
            }
        }
        self.is_complete()
    }

    pub fn is_complete(&self) -> bool {
        self.phase == CutscenePhase::Complete
    }

    /// Skips straight to the end (any key dismisses the overlay).
    pub fn skip(&mut self) {
        self.elapsed_ms = self.elapsed_ms.max(2800);
        self.phase = CutscenePhase::Complete;
    }

    pub fn show_text(&self) -> bool {
        self.phase >= CutscenePhase::TextAppears && self.phase < CutscenePhase::Complete
    }

    pub fn show_points(&self) -> bool {
        self.phase >= CutscenePhase::PointsFly && self.phase < CutscenePhase::Complete
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn koi() -> HookedFish {
        HookedFish {
            kind: 5,
            name: "Golden Koi".to_string(),
            size: 140,
            rarity: 3,
            points: 300,
            color: "#FFD700".to_string(),
            resistance: 0.5,
        }
    }

    #[test]
    fn test_phase_boundaries() {
        assert_eq!(CutscenePhase::at(0), CutscenePhase::Start);
        assert_eq!(CutscenePhase::at(100), CutscenePhase::FishAppears);
        assert_eq!(CutscenePhase::at(500), CutscenePhase::TextAppears);
        assert_eq!(CutscenePhase::at(1200), CutscenePhase::PointsFly);
        assert_eq!(CutscenePhase::at(2200), CutscenePhase::FadeOut);
        assert_eq!(CutscenePhase::at(2799), CutscenePhase::FadeOut);
        assert_eq!(CutscenePhase::at(2800), CutscenePhase::Complete);
    }

    #[test]
    fn test_particles_wait_for_first_phase() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut scene = CatchCutscene::new(koi(), true, 600, &mut rng);
        let before = scene.particles.clone();
        scene.update(90);
        assert_eq!(scene.particles, before);

        // 100ms in: FishAppears, 10ms banked, no step yet
        scene.update(10);
        assert_eq!(scene.phase, CutscenePhase::FishAppears);
        assert_eq!(scene.particles, before);

        scene.update(20);
        assert_ne!(scene.particles, before);
        assert!((scene.particles[0].vy - (before[0].vy + 0.5)).abs() < 1e-9);
    }

    #[test]
    fn test_runs_to_completion() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut scene = CatchCutscene::new(koi(), false, 300, &mut rng);
        let mut done = false;
        for _ in 0..70 {
            done = scene.update(40);
        }
        assert!(done);
        assert!(!scene.show_text());
    }

    #[test]
    fn test_skip() {
        let mut rng = ChaCha8Rng::seed_from_u64(12345);
        let mut scene = CatchCutscene::new(koi(), false, 300, &mut rng);
        scene.update(600);
        assert!(scene.show_text());
        assert!(!scene.show_points());
        scene.skip();
        assert!(scene.is_complete());
    }
}
