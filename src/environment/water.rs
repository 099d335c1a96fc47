//! One-dimensional spring model of the water surface, used for the wave
//! line in the fishing scene and for splash ripples.

use rand::Rng;

const DAMPING: f64 = 0.98;
const TENSION: f64 = 0.03;
const SPREAD: f64 = 0.25;
const DISTURBANCE_LIFETIME_S: f64 = 5.0;

#[derive(Debug, Clone)]
struct Disturbance {
    age: f64,
}

#[derive(Debug, Clone)]
pub struct WaterSurface {
    heights: Vec<f64>,
    velocities: Vec<f64>,
    disturbances: Vec<Disturbance>,
    /// Seconds of simulated time, drives the ambient swell
    elapsed: f64,
    pub clarity: f64,
}

impl WaterSurface {
    pub fn new(resolution: usize) -> Self {
        let resolution = resolution.max(2);
        Self {
            heights: vec![0.0; resolution],
            velocities: vec![0.0; resolution],
            disturbances: Vec::new(),
            elapsed: 0.0,
            clarity: 0.7,
        }
    }

    pub fn resolution(&self) -> usize {
        self.heights.len()
    }

    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn active_disturbances(&self) -> usize {
        self.disturbances.len()
    }

    pub fn update(&mut self, dt_ms: u64) {
        let dt = dt_ms as f64 / 1000.0;
        // Integrate in steps no longer than one 60 Hz frame
        let steps = (dt * 60.0).ceil().max(1.0) as usize;
        let h = dt / steps as f64;
        for _ in 0..steps {
            self.step(h);
        }

        self.disturbances.retain_mut(|d| {
            d.age += dt;
            d.age < DISTURBANCE_LIFETIME_S
        });
    }

    fn step(&mut self, h: f64) {
        self.elapsed += h;
        let frames = h * 60.0;

        let count = self.heights.len();
        let mut forces = vec![0.0; count];
        for i in 0..count {
            forces[i] = -TENSION * self.heights[i];
            if i > 0 {
                forces[i] += SPREAD * (self.heights[i - 1] - self.heights[i]);
            }
            if i + 1 < count {
                forces[i] += SPREAD * (self.heights[i + 1] - self.heights[i]);
            }
        }

        for i in 0..count {
            self.velocities[i] += forces[i] * frames;
            self.velocities[i] *= DAMPING;
            self.heights[i] += self.velocities[i] * frames;
        }

        let t = self.elapsed;
        for (i, height) in self.heights.iter_mut().enumerate() {
            let x = i as f64 / count as f64;
            let swell = (t * 2.0 + x * 10.0).sin() * 0.5
                + (t * 1.5 + x * 8.0 + 1.0).sin() * 0.3
                + (t * 3.0 + x * 15.0 + 2.0).sin() * 0.2;
            *height += swell * 0.01 * frames;
        }
    }

    /// Splash at `x` in 0.0..=1.0 across the surface.
    pub fn disturb(&mut self, x: f64, magnitude: f64, radius: usize) {
        let radius = radius.max(1) as i64;
        let center = (x.clamp(0.0, 1.0) * self.heights.len() as f64) as i64;
        let lo = (center - radius).max(0);
        let hi = (center + radius).min(self.heights.len() as i64);
        for i in lo..hi {
            let dist = (i - center).abs() as f64;
            let factor = 1.0 - dist / radius as f64;
            self.heights[i as usize] += magnitude * factor * factor;
            self.velocities[i as usize] += magnitude * factor * 0.5;
        }
        self.disturbances.push(Disturbance { age: 0.0 });
    }

    /// Linear interpolation of the surface height at `x` in 0.0..=1.0.
    pub fn height_at(&self, x: f64) -> f64 {
        let grid = x * self.heights.len() as f64;
        if grid <= 0.0 {
            return self.heights[0];
        }
        let i = grid.floor() as usize;
        if i >= self.heights.len() - 1 {
            return self.heights[self.heights.len() - 1];
        }
        let t = grid - i as f64;
        self.heights[i] * (1.0 - t) + self.heights[i + 1] * t
    }

    /// Rain drops and gusts. `rain` is 0.0..=1.0, `wind` in km/h.
    pub fn apply_weather(&mut self, rain: f64, wind: f64, rng: &mut impl Rng) {
        if wind > 20.0 {
            let t = self.elapsed;
            for (i, h) in self.heights.iter_mut().enumerate() {
                *h += (t * wind * 0.1 + i as f64 * 0.5).sin() * wind * 0.001;
            }
        }
        if rain > 0.0 {
            self.clarity = (0.7 - rain * 0.3).max(0.3);
            if rng.gen::<f64>() < rain * 0.1 {
                let x = rng.gen::<f64>();
                self.disturb(x, rain * 2.0, 3);
            }
        }
    }
}
