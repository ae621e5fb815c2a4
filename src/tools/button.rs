//! The button rig: engage to charge, five status lights fill across the
//! hold duration, payout on full charge, flashing cooldown after.
//!
//! Terminal input has no key-release events, so the interaction is a
//! toggle: one press starts the charge, a second press mid-charge
//! abandons it (the engine never hears about abandoned attempts).

use crate::engine::{Store, ToolId};
use crate::time::secs_to_ticks;

/// Status lights above the button.
pub const LIGHT_COUNT: u32 = 5;
/// Cooldown flash period (~350ms at 10 ticks/sec).
pub const FLASH_TICKS: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum ButtonPhase {
    Idle,
    Charging,
    Cooldown,
}

pub struct ButtonRig {
    pub phase: ButtonPhase,
    /// Ticks spent in the current phase.
    pub phase_ticks: u32,
}

impl ButtonRig {
    pub fn new() -> Self {
        Self {
            phase: ButtonPhase::Idle,
            phase_ticks: 0,
        }
    }

    /// Toggle the charge: start from idle, abandon mid-charge.
    /// Ignored during cooldown.
    pub fn press(&mut self) {
        match self.phase {
            ButtonPhase::Idle => {
                self.phase = ButtonPhase::Charging;
                self.phase_ticks = 0;
            }
            ButtonPhase::Charging => {
                self.phase = ButtonPhase::Idle;
                self.phase_ticks = 0;
            }
            ButtonPhase::Cooldown => {}
        }
    }

    pub fn tick(&mut self, store: &mut Store, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            self.step(store);
        }
    }

    fn step(&mut self, store: &mut Store) {
        let params = store.params(ToolId::Button);
        match self.phase {
            ButtonPhase::Idle => {
                if params.automation {
                    self.phase = ButtonPhase::Charging;
                    self.phase_ticks = 0;
                }
            }
            ButtonPhase::Charging => {
                self.phase_ticks += 1;
                let hold = secs_to_ticks(params.action_duration);
                if self.phase_ticks >= hold {
                    store.add_currency(params.yield_per_action);
                    self.phase = ButtonPhase::Cooldown;
                    self.phase_ticks = 0;
                }
            }
            ButtonPhase::Cooldown => {
                self.phase_ticks += 1;
                let cooldown = secs_to_ticks(params.cooldown_duration);
                if self.phase_ticks >= cooldown {
                    self.phase = ButtonPhase::Idle;
                    self.phase_ticks = 0;
                }
            }
        }
    }

    /// How many of the five lights are lit. The first lights on the press
    /// itself, the rest fill across the hold; during cooldown all five
    /// flash together.
    pub fn lights_lit(&self, hold_ticks: u32) -> u32 {
        match self.phase {
            ButtonPhase::Idle => 0,
            ButtonPhase::Charging => {
                let filled = 1 + (LIGHT_COUNT - 1) * self.phase_ticks / hold_ticks.max(1);
                filled.min(LIGHT_COUNT)
            }
            ButtonPhase::Cooldown => {
                if self.cooldown_flash_on() {
                    LIGHT_COUNT
                } else {
                    0
                }
            }
        }
    }

    pub fn cooldown_flash_on(&self) -> bool {
        (self.phase_ticks / FLASH_TICKS) % 2 == 0
    }
}
