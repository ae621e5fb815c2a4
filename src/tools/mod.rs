//! Widget-side interaction rigs.
//!
//! Each rig owns its animation timers and phase machine, reads the store's
//! derived parameters every tick (so a purchase applies mid-interaction),
//! and talks back to the engine only through its public operations. A rig
//! that abandons an interaction simply never calls `add_currency`.

pub mod button;
pub mod dial;
pub mod lever;

pub use button::ButtonRig;
pub use dial::DialRig;
pub use lever::LeverRig;

use crate::engine::Store;

/// All three rigs. Locked rigs tick too; their automation flags cannot be
/// set before their tool unlocks, so ticking them is inert.
pub struct ToolSet {
    pub button: ButtonRig,
    pub lever: LeverRig,
    pub dial: DialRig,
}

impl ToolSet {
    pub fn new(dial_seed: u32) -> Self {
        Self {
            button: ButtonRig::new(),
            lever: LeverRig::new(),
            dial: DialRig::new(dial_seed),
        }
    }

    pub fn tick(&mut self, store: &mut Store, delta_ticks: u32) {
        self.button.tick(store, delta_ticks);
        self.lever.tick(store, delta_ticks);
        self.dial.tick(store, delta_ticks);
    }
}
