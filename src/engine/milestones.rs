//! One-shot progression milestones, evaluated in declared order.
//!
//! Every entry is a named predicate over the current snapshot plus an
//! effect run at most once per session. The store walks this table on
//! every earn/spend and on the tick cadence; order matters, because a
//! later predicate may depend on a flag an earlier effect just set (the
//! lever waits for the shop).

use crate::engine::store::{Snapshot, Store};
use crate::time::TICKS_PER_SEC;

pub const FIRST_MERIT: &str = "first-merit";
pub const SUSTAINED_OUTPUT: &str = "sustained-output";
pub const SHOP_UNLOCK: &str = "shop-unlock";
pub const LEVER_UNLOCK: &str = "lever-unlock";
pub const DIAL_UNLOCK: &str = "dial-unlock";
pub const AUTOMATION_UNLOCK: &str = "automation-unlock";
pub const WEALTH_THRESHOLD: &str = "wealth-threshold";
pub const IDLE_REMINDER: &str = "idle-reminder";

/// Seconds without an earn before the reminder fires, in ticks.
pub const IDLE_REMINDER_TICKS: u64 = 30 * TICKS_PER_SEC as u64;

pub struct Milestone {
    /// Stable identity for the fired set.
    pub id: &'static str,
    pub predicate: fn(&Snapshot) -> bool,
    pub effect: fn(&mut Store),
}

pub const MILESTONES: &[Milestone] = &[
    Milestone {
        id: FIRST_MERIT,
        predicate: |s| s.merits >= 1.0,
        effect: |store| {
            store.log_message(
                "Your first Merit™ has been deposited. Objet Systems thanks you for your contribution.",
            )
        },
    },
    Milestone {
        id: SUSTAINED_OUTPUT,
        predicate: |s| s.merits >= 3.0,
        effect: |store| store.log_message("Sustained output detected. Do not let it lapse."),
    },
    Milestone {
        id: SHOP_UNLOCK,
        predicate: |s| s.merits >= 5.0,
        effect: |store| {
            store.unlock_shop();
            store.log_message(
                "Expanded Operations are now available to you. Spend your Merits™ responsibly.",
            );
        },
    },
    Milestone {
        id: LEVER_UNLOCK,
        predicate: |s| s.merits >= 10.0 && s.shop_unlocked,
        effect: |store| {
            store.unlock_lever();
            store.log_message("A lever has been installed at your workstation. Pull it.");
        },
    },
    Milestone {
        id: DIAL_UNLOCK,
        predicate: |s| s.merits >= 150.0,
        effect: |store| {
            store.unlock_dial();
            store.log_message(
                "A dial has been installed at your workstation. Alignment is now among your duties.",
            );
        },
    },
    Milestone {
        id: AUTOMATION_UNLOCK,
        predicate: |s| s.merits >= 200.0,
        effect: |store| {
            store.unlock_automation();
            store.log_message(
                "The Automation Program has been approved for your tier. See Expanded Operations.",
            );
        },
    },
    Milestone {
        id: WEALTH_THRESHOLD,
        predicate: |s| s.merits >= 500.0,
        effect: |store| {
            store.log_message(
                "Employee wealth threshold exceeded. A commemorative plaque is being engraved.",
            )
        },
    },
    Milestone {
        id: IDLE_REMINDER,
        predicate: |s| s.idle_ticks >= IDLE_REMINDER_TICKS,
        effect: |store| store.log_message("The button misses you."),
    },
];
