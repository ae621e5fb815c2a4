//! The dial rig: a pointer sweeps eight detents; aligning while the
//! pointer sits on the highlighted target pays out and picks a new target.
//! Aligning anywhere else is a miss and the engine never hears about it.

use crate::engine::{Store, ToolId};
use crate::time::{secs_to_ticks, TICKS_PER_SEC};

/// Detent positions around the dial face.
pub const DETENTS: u8 = 8;
/// Miss feedback duration.
pub const MISS_FLASH_TICKS: u32 = 3;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DialPhase {
    Sweeping,
    Cooldown,
}

pub struct DialRig {
    pub phase: DialPhase,
    pub phase_ticks: u32,
    /// Current pointer detent, 0..DETENTS.
    pub pointer: u8,
    /// Detent the operator must catch.
    pub target: u8,
    /// Fractional detents accumulated between steps.
    sweep_acc: f64,
    /// Ticks of miss feedback remaining.
    pub miss_flash: u32,
    rng_state: u32,
}

impl DialRig {
    pub fn new(seed: u32) -> Self {
        let mut rig = Self {
            phase: DialPhase::Sweeping,
            phase_ticks: 0,
            pointer: 0,
            target: 0,
            sweep_acc: 0.0,
            miss_flash: 0,
            rng_state: seed | 1, // xorshift must not start at zero
        };
        rig.target = rig.pick_target();
        rig
    }

    fn next_rand(&mut self) -> u32 {
        // xorshift32
        let mut x = self.rng_state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.rng_state = x;
        x
    }

    /// A new target detent, never the one the pointer currently occupies
    /// (an instant re-hit would make automation trivial and manual play
    /// confusing).
    fn pick_target(&mut self) -> u8 {
        let t = (self.next_rand() % DETENTS as u32) as u8;
        if t == self.pointer {
            (t + 1) % DETENTS
        } else {
            t
        }
    }

    /// Attempt an alignment. On target: payout and cooldown. Off target:
    /// miss feedback only.
    pub fn align(&mut self, store: &mut Store) {
        if self.phase != DialPhase::Sweeping {
            return;
        }
        if self.pointer == self.target {
            let params = store.params(ToolId::Dial);
            store.add_currency(params.yield_per_action);
            self.target = self.pick_target();
            self.phase = DialPhase::Cooldown;
            self.phase_ticks = 0;
        } else {
            self.miss_flash = MISS_FLASH_TICKS;
        }
    }

    pub fn tick(&mut self, store: &mut Store, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            self.step(store);
        }
    }

    fn step(&mut self, store: &mut Store) {
        if self.miss_flash > 0 {
            self.miss_flash -= 1;
        }
        let params = store.params(ToolId::Dial);
        match self.phase {
            DialPhase::Sweeping => {
                self.sweep_acc += params.response_speed / TICKS_PER_SEC as f64;
                while self.sweep_acc >= 1.0 {
                    self.sweep_acc -= 1.0;
                    self.pointer = (self.pointer + 1) % DETENTS;
                }
                if params.automation && self.pointer == self.target {
                    self.align(store);
                }
            }
            DialPhase::Cooldown => {
                self.phase_ticks += 1;
                let cooldown = secs_to_ticks(params.cooldown_duration);
                if self.phase_ticks >= cooldown {
                    self.phase = DialPhase::Sweeping;
                    self.phase_ticks = 0;
                }
            }
        }
    }
}
