//! Top-level application state: the store, the three rigs, and input
//! dispatch. The shell owns one `App` behind `Rc<RefCell<...>>` and calls
//! `tick` from the frame loop and `handle_input` from the event handlers.

use crate::actions;
use crate::engine::{Store, StoreConfig, ToolId, UpgradeId};
use crate::input::InputEvent;
use crate::tools::ToolSet;

/// Shop rows in display order: every upgrade of every unlocked tool.
/// Render and click dispatch both build rows from here so a click index
/// always resolves to the row the player saw.
pub fn shop_rows(store: &Store) -> Vec<(ToolId, UpgradeId)> {
    let mut rows = Vec::new();
    for &tool in ToolId::all() {
        if !store.tool_unlocked(tool) {
            continue;
        }
        for st in store.upgrades_for(tool) {
            rows.push((tool, st.def.id));
        }
    }
    rows
}

pub struct App {
    pub store: Store,
    pub rigs: ToolSet,
    pub show_shop: bool,
}

impl App {
    pub fn new(cfg: StoreConfig, dial_seed: u32) -> Self {
        Self {
            store: Store::with_config(cfg),
            rigs: ToolSet::new(dial_seed),
            show_shop: false,
        }
    }

    /// Advance the engine clock first so milestone unlocks land before the
    /// rigs read their parameters for this batch of ticks.
    pub fn tick(&mut self, delta_ticks: u32) {
        if delta_ticks == 0 {
            return;
        }
        self.store.tick(delta_ticks);
        self.rigs.tick(&mut self.store, delta_ticks);
    }

    /// Returns whether the event did anything.
    pub fn handle_input(&mut self, event: &InputEvent) -> bool {
        match event {
            InputEvent::Key(c) => self.handle_key(c.to_ascii_lowercase()),
            InputEvent::Click(action) => self.handle_action(*action),
        }
    }

    fn handle_key(&mut self, c: char) -> bool {
        match c {
            'b' if !self.show_shop => self.handle_action(actions::PRESS_BUTTON),
            'l' if !self.show_shop => self.handle_action(actions::PULL_LEVER),
            'd' if !self.show_shop => self.handle_action(actions::ALIGN_DIAL),
            'o' => self.handle_action(actions::TOGGLE_SHOP),
            'x' if self.show_shop => self.handle_action(actions::CLOSE_SHOP),
            // Shop rows are keyed a, b, c... in display order.
            'a'..='z' if self.show_shop => {
                let idx = (c as u16) - ('a' as u16);
                self.handle_action(actions::BUY_UPGRADE_BASE + idx)
            }
            _ => false,
        }
    }

    fn handle_action(&mut self, action: u16) -> bool {
        match action {
            actions::PRESS_BUTTON => {
                if self.show_shop {
                    return false;
                }
                self.rigs.button.press();
                true
            }
            actions::PULL_LEVER => {
                if self.show_shop || !self.store.tool_unlocked(ToolId::Lever) {
                    return false;
                }
                self.rigs.lever.pull();
                true
            }
            actions::ALIGN_DIAL => {
                if self.show_shop || !self.store.tool_unlocked(ToolId::Dial) {
                    return false;
                }
                self.rigs.dial.align(&mut self.store);
                true
            }
            actions::TOGGLE_SHOP => {
                if !self.store.shop_unlocked() {
                    return false;
                }
                self.show_shop = !self.show_shop;
                true
            }
            actions::CLOSE_SHOP => {
                if !self.show_shop {
                    return false;
                }
                self.show_shop = false;
                true
            }
            a if a >= actions::BUY_UPGRADE_BASE => {
                if !self.show_shop {
                    return false;
                }
                let idx = (a - actions::BUY_UPGRADE_BASE) as usize;
                let rows = shop_rows(&self.store);
                match rows.get(idx) {
                    Some(&(tool, id)) => self.store.purchase_upgrade(tool, id),
                    None => false,
                }
            }
            _ => false,
        }
    }
}
