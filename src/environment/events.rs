//! Ambient scenery: passing boats, the whale and lightning flashes.

use crate::core::constants::{
    BOAT_FIRST_MS, BOAT_INTERVAL_MS, BOAT_VISIBLE_MS, LIGHTNING_CHANCE_PER_SECOND,
    LIGHTNING_FLASH_MS, WHALE_INTERVAL_MS, WHALE_MIN_STAGE, WHALE_VISIBLE_MS,
};
use crate::fishing::data::BOAT_TYPES;
use rand::Rng;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AmbientEvent {
    /// Index into `BOAT_TYPES`
    BoatArrived(usize),
    BoatLeft,
    WhaleSurfaced,
    WhaleDove,
    Lightning,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VisibleBoat {
    pub kind: usize,
    pub remaining_ms: u64,
}

impl VisibleBoat {
    /// 0.0 when the boat enters, 1.0 as it leaves.
    pub fn progress(&self) -> f64 {
        1.0 - self.remaining_ms as f64 / BOAT_VISIBLE_MS as f64
    }
}

#[derive(Debug, Clone)]
pub struct AmbientEvents {
    elapsed_ms: u64,
    next_boat_ms: u64,
    next_boat_kind: usize,
    pub boat: Option<VisibleBoat>,
    whale_timer_ms: u64,
    pub whale_remaining_ms: Option<u64>,
    pub lightning_remaining_ms: u64,
}

impl Default for AmbientEvents {
    fn default() -> Self {
        Self::new()
    }
}

impl AmbientEvents {
    pub fn new() -> Self {
        Self {
            elapsed_ms: 0,
            next_boat_ms: BOAT_FIRST_MS,
            next_boat_kind: 0,
            boat: None,
            whale_timer_ms: 0,
            whale_remaining_ms: None,
            lightning_remaining_ms: 0,
        }
    }

    pub fn whale_visible(&self) -> bool {
        self.whale_remaining_ms.is_some()
    }

    pub fn lightning_active(&self) -> bool {
        self.lightning_remaining_ms > 0
    }

    /// Forgets the whale schedule, e.g. after switching stage.
    pub fn reset_whale(&mut self) {
        self.whale_timer_ms = 0;
        self.whale_remaining_ms = None;
    }

    pub fn update(
        &mut self,
        dt_ms: u64,
        stage_index: usize,
        lightning_stage: bool,
        rng: &mut impl Rng,
    ) -> Vec<AmbientEvent> {
        let mut events = Vec::new();
        self.elapsed_ms += dt_ms;

        // Boats: first after a short delay, then on a fixed interval
        if let Some(boat) = self.boat.as_mut() {
            boat.remaining_ms = boat.remaining_ms.saturating_sub(dt_ms);
            if boat.remaining_ms == 0 {
                self.boat = None;
                events.push(AmbientEvent::BoatLeft);
            }
        }
        if self.elapsed_ms >= self.next_boat_ms {
            let kind = self.next_boat_kind % BOAT_TYPES.len();
            self.boat = Some(VisibleBoat {
                kind,
                remaining_ms: BOAT_VISIBLE_MS,
            });
            self.next_boat_kind = kind + 1;
            self.next_boat_ms = (self.elapsed_ms / BOAT_INTERVAL_MS + 1) * BOAT_INTERVAL_MS;
            events.push(AmbientEvent::BoatArrived(kind));
        }

        // Whale: deep-water stages only
        if let Some(remaining) = self.whale_remaining_ms {
            let remaining = remaining.saturating_sub(dt_ms);
            if remaining == 0 {
                self.whale_remaining_ms = None;
                events.push(AmbientEvent::WhaleDove);
            } else {
                self.whale_remaining_ms = Some(remaining);
            }
        }
        if stage_index >= WHALE_MIN_STAGE {
            self.whale_timer_ms += dt_ms;
            if self.whale_timer_ms >= WHALE_INTERVAL_MS {
                self.whale_timer_ms -= WHALE_INTERVAL_MS;
                self.whale_remaining_ms = Some(WHALE_VISIBLE_MS);
                events.push(AmbientEvent::WhaleSurfaced);
            }
        } else {
            self.reset_whale();
        }

        // Lightning flashes
        self.lightning_remaining_ms = self.lightning_remaining_ms.saturating_sub(dt_ms);
        if lightning_stage
            && rng.gen::<f64>() < LIGHTNING_CHANCE_PER_SECOND * dt_ms as f64 / 1000.0
        {
            self.flash();
            events.push(AmbientEvent::Lightning);
        }

        events
    }

    pub fn flash(&mut self) {
        self.lightning_remaining_ms = LIGHTNING_FLASH_MS;
    }
}
