//! Boids-style schooling for the fish silhouettes drawn under the water.

use super::types::Vec2;
use rand::Rng;

const COHESION_WEIGHT: f64 = 1.0;
const SEPARATION_WEIGHT: f64 = 1.5;
const ALIGNMENT_WEIGHT: f64 = 1.0;
const AVOIDANCE_WEIGHT: f64 = 2.0;
const NEIGHBOR_RADIUS: f64 = 50.0;
const SEPARATION_RADIUS: f64 = 15.0;
const PREDATOR_RADIUS: f64 = 100.0;
const MAX_FORCE: f64 = 0.1;

#[derive(Debug, Clone, PartialEq)]
pub struct SchoolMember {
    pub position: Vec2,
    pub velocity: Vec2,
}

#[derive(Debug, Clone)]
pub struct FishSchool {
    pub members: Vec<SchoolMember>,
    pub max_speed: f64,
    /// The school wraps around horizontally within 0..width
    pub width: f64,
    pub depth: f64,
}

impl FishSchool {
    pub fn new(count: usize, width: f64, depth: f64, rng: &mut impl Rng) -> Self {
        let members = (0..count)
            .map(|_| SchoolMember {
                position: Vec2::new(
                    width / 2.0 + (rng.gen::<f64>() - 0.5) * 100.0,
                    depth / 2.0 + (rng.gen::<f64>() - 0.5) * 50.0,
                ),
                velocity: Vec2::new((rng.gen::<f64>() - 0.5) * 2.0, (rng.gen::<f64>() - 0.5) * 1.0),
            })
            .collect();
        Self {
            members,
            max_speed: 3.0,
            width,
            depth,
        }
    }

    /// A school with no fish yet.
    pub fn empty(width: f64, depth: f64) -> Self {
        Self {
            members: Vec::new(),
            max_speed: 3.0,
            width,
            depth,
        }
    }

    pub fn center(&self) -> Vec2 {
        if self.members.is_empty() {
            return Vec2::ZERO;
        }
        let sum = self
            .members
            .iter()
            .fold(Vec2::ZERO, |acc, m| acc + m.position);
        sum.scale(1.0 / self.members.len() as f64)
    }

    pub fn average_velocity(&self) -> Vec2 {
        if self.members.is_empty() {
            return Vec2::ZERO;
        }
        let sum = self
            .members
            .iter()
            .fold(Vec2::ZERO, |acc, m| acc + m.velocity);
        sum.scale(1.0 / self.members.len() as f64)
    }

    /// Steering force on member `index` from its neighbours and any threats.
    pub fn steering(&self, index: usize, threats: &[Vec2]) -> Vec2 {
        let me = &self.members[index];
        let neighbors: Vec<&SchoolMember> = self
            .members
            .iter()
            .enumerate()
            .filter(|(i, other)| {
                *i != index && me.position.distance(other.position) < NEIGHBOR_RADIUS
            })
            .map(|(_, other)| other)
            .collect();

        let mut force = Vec2::ZERO;
        if neighbors.is_empty() {
            force += (self.center() - me.position).normalized();
        } else {
            let n = neighbors.len() as f64;
            let avg_pos = neighbors
                .iter()
                .fold(Vec2::ZERO, |acc, o| acc + o.position)
                .scale(1.0 / n);
            force += (avg_pos - me.position).normalized().scale(COHESION_WEIGHT);

            for other in &neighbors {
                let dist = me.position.distance(other.position);
                if dist > 0.0 && dist < SEPARATION_RADIUS {
                    let strength = (SEPARATION_RADIUS - dist) / SEPARATION_RADIUS;
                    force += (me.position - other.position)
                        .normalized()
                        .scale(strength * SEPARATION_WEIGHT);
                }
            }

            let avg_vel = neighbors
                .iter()
                .fold(Vec2::ZERO, |acc, o| acc + o.velocity)
                .scale(1.0 / n);
            force += avg_vel.normalized().scale(ALIGNMENT_WEIGHT);
        }

        for threat in threats {
            let dist = me.position.distance(*threat);
            if dist < PREDATOR_RADIUS {
                let strength = ((PREDATOR_RADIUS - dist) / PREDATOR_RADIUS).powi(2);
                force += (me.position - *threat)
                    .normalized()
                    .scale(strength * AVOIDANCE_WEIGHT);
            }
        }
        force
    }

    pub fn update(&mut self, dt_ms: u64, threats: &[Vec2]) {
        let frames = dt_ms as f64 / 16.0;
        let forces: Vec<Vec2> = (0..self.members.len())
            .map(|i| self.steering(i, threats).clamp_length(MAX_FORCE * 10.0))
            .collect();
        for (member, force) in self.members.iter_mut().zip(forces) {
            member.velocity = (member.velocity + force.scale(MAX_FORCE * frames))
                .clamp_length(self.max_speed);
            member.position += member.velocity.scale(frames);
            member.position.x = member.position.x.rem_euclid(self.width.max(1.0));
            member.position.y = member.position.y.clamp(0.0, self.depth);
        }
    }
}
