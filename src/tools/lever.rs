//! The lever rig: engage to send the handle down its track, payout at the
//! bottom, spring back on an early disengage.
//!
//! Travel time is the tool's action duration divided by its response
//! speed, so the Ergonomic Adjustment purchases shorten the pull.

use crate::engine::{Store, ToolId};
use crate::time::secs_to_ticks;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LeverPhase {
    Idle,
    Pulling,
    Cooldown,
}

pub struct LeverRig {
    pub phase: LeverPhase,
    /// Ticks spent in the current phase.
    pub phase_ticks: u32,
}

impl LeverRig {
    pub fn new() -> Self {
        Self {
            phase: LeverPhase::Idle,
            phase_ticks: 0,
        }
    }

    /// Ticks for a full pull at the given parameters.
    pub fn travel_ticks(store: &Store) -> u32 {
        let p = store.params(ToolId::Lever);
        let speed = if p.response_speed > 0.0 {
            p.response_speed
        } else {
            1.0
        };
        secs_to_ticks(p.action_duration / speed)
    }

    /// Toggle the pull: engage from idle, let go mid-travel (the handle
    /// springs back and nothing is earned). Ignored during cooldown.
    pub fn pull(&mut self) {
        match self.phase {
            LeverPhase::Idle => {
                self.phase = LeverPhase::Pulling;
                self.phase_ticks = 0;
            }
            LeverPhase::Pulling => {
                self.phase = LeverPhase::Idle;
                self.phase_ticks = 0;
            }
            LeverPhase::Cooldown => {}
        }
    }

    pub fn tick(&mut self, store: &mut Store, delta_ticks: u32) {
        for _ in 0..delta_ticks {
            self.step(store);
        }
    }

    fn step(&mut self, store: &mut Store) {
        let params = store.params(ToolId::Lever);
        match self.phase {
            LeverPhase::Idle => {
                if params.automation {
                    self.phase = LeverPhase::Pulling;
                    self.phase_ticks = 0;
                }
            }
            LeverPhase::Pulling => {
                self.phase_ticks += 1;
                if self.phase_ticks >= Self::travel_ticks(store) {
                    store.add_currency(params.yield_per_action);
                    self.phase = LeverPhase::Cooldown;
                    self.phase_ticks = 0;
                }
            }
            LeverPhase::Cooldown => {
                self.phase_ticks += 1;
                let cooldown = secs_to_ticks(params.cooldown_duration);
                if self.phase_ticks >= cooldown {
                    self.phase = LeverPhase::Idle;
                    self.phase_ticks = 0;
                }
            }
        }
    }

    /// Handle position along the track: 0.0 at rest, 1.0 fully pulled.
    /// Held at the bottom through the cooldown, snaps back on idle.
    pub fn position(&self, travel_ticks: u32) -> f64 {
        match self.phase {
            LeverPhase::Idle => 0.0,
            LeverPhase::Pulling => (self.phase_ticks as f64 / travel_ticks.max(1) as f64).min(1.0),
            LeverPhase::Cooldown => 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{StoreConfig, UpgradeId};

    fn rich_store() -> Store {
        let mut store = Store::with_config(StoreConfig {
            starting_merits: 10_000.0,
            shop_unlocked: false,
        });
        store.add_currency(0.0);
        store
    }

    #[test]
    fn baseline_travel_is_two_seconds() {
        let store = Store::new();
        assert_eq!(LeverRig::travel_ticks(&store), 20);
    }

    #[test]
    fn full_pull_pays_out_then_cools_down() {
        let mut store = Store::new();
        let mut rig = LeverRig::new();

        rig.pull();
        rig.tick(&mut store, 20);
        assert_eq!(rig.phase, LeverPhase::Cooldown);
        assert!((store.merits() - 1.0).abs() < 0.001);

        rig.tick(&mut store, 30); // 3.0s baseline reset
        assert_eq!(rig.phase, LeverPhase::Idle);
    }

    #[test]
    fn letting_go_springs_back_without_payout() {
        let mut store = Store::new();
        let mut rig = LeverRig::new();

        rig.pull();
        rig.tick(&mut store, 10);
        assert!(rig.position(20) > 0.4);

        rig.pull(); // let go
        assert_eq!(rig.phase, LeverPhase::Idle);
        assert!(rig.position(20).abs() < 0.001);
        assert!(store.merits().abs() < 0.001);
    }

    #[test]
    fn speed_upgrades_shorten_the_pull() {
        let mut store = rich_store();
        let base = LeverRig::travel_ticks(&store);
        assert!(store.purchase_upgrade(ToolId::Lever, UpgradeId::DragSpeed));
        let faster = LeverRig::travel_ticks(&store);
        assert!(faster < base, "{faster} should be under {base}");

        // At the speed cap the pull takes 2.0s / 5 = 0.4s.
        for _ in 0..3 {
            assert!(store.purchase_upgrade(ToolId::Lever, UpgradeId::DragSpeed));
        }
        assert_eq!(LeverRig::travel_ticks(&store), 4);
    }

    #[test]
    fn automation_cycles_on_its_own() {
        let mut store = rich_store();
        assert!(store.purchase_upgrade(ToolId::Lever, UpgradeId::AutoPress));
        let mut rig = LeverRig::new();

        let merits_before = store.merits();
        // Pull 20 + reset 30 ticks per cycle: at least three payouts fit
        // in 180 ticks.
        rig.tick(&mut store, 180);
        assert!(store.merits() >= merits_before + 3.0);
    }
}
