//! Celebration particles, positioned in percent of the overlay (0-100).

use rand::Rng;

pub const PARTICLE_COUNT: usize = 30;
pub const PARTICLE_STEP_MS: u64 = 30;

pub const PERFECT_PALETTE: [&str; 5] = ["#FFD700", "#FFA500", "#FF6B6B", "#4ECDC4", "#45B7D1"];
pub const NORMAL_PALETTE: [&str; 4] = ["#4ECDC4", "#45B7D1", "#96E6A1", "#87CEEB"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParticleShape {
    Star,
    Circle,
}

impl ParticleShape {
    pub fn glyph(&self) -> char {
        match self {
            ParticleShape::Star => '*',
            ParticleShape::Circle => 'o',
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
    pub size: f64,
    pub color: &'static str,
    /// Degrees
    pub rotation: f64,
    pub shape: ParticleShape,
}

impl Particle {
    pub fn spawn(perfect: bool, rng: &mut impl Rng) -> Self {
        let color = if perfect {
            PERFECT_PALETTE[rng.gen_range(0..PERFECT_PALETTE.len())]
        } else {
            NORMAL_PALETTE[rng.gen_range(0..NORMAL_PALETTE.len())]
        };
        Self {
            x: 50.0 + (rng.gen::<f64>() - 0.5) * 20.0,
            y: 40.0,
            vx: (rng.gen::<f64>() - 0.5) * 15.0,
            vy: -25.0 + rng.gen::<f64>() * 15.0,
            size: 6.0 + rng.gen::<f64>() * 10.0,
            color,
            rotation: rng.gen::<f64>() * 360.0,
            shape: if rng.gen::<f64>() > 0.5 {
                ParticleShape::Star
            } else {
                ParticleShape::Circle
            },
        }
    }

    /// One 30 ms animation step with gravity and shrinking.
    pub fn step(&mut self) {
        self.x += self.vx * 0.1;
        self.y += self.vy * 0.1;
        self.vy += 0.5;
        self.rotation += 5.0;
        self.size *= 0.98;
    }

    pub fn opacity(&self) -> f64 {
        (self.size / 8.0).min(1.0)
    }
}

pub fn spawn_burst(perfect: bool, rng: &mut impl Rng) -> Vec<Particle> {
    (0..PARTICLE_COUNT)
        .map(|_| Particle::spawn(perfect, rng))
        .collect()
}
