//! Semantic action IDs for click targets.
//!
//! Render code registers `Rect → action id` pairs each frame; the mouse
//! handler resolves a click to one of these and `App::handle_input`
//! dispatches on it. Keyboard shortcuts map to the same dispatch arms.

// ── rig panels ─────────────────────────────────────────────────

pub const PRESS_BUTTON: u16 = 1;
pub const PULL_LEVER: u16 = 2;
pub const ALIGN_DIAL: u16 = 3;

// ── header / shop ──────────────────────────────────────────────

pub const TOGGLE_SHOP: u16 = 10;
pub const CLOSE_SHOP: u16 = 11;

// ── shop purchase rows (BUY_UPGRADE_BASE + visible row index) ──

pub const BUY_UPGRADE_BASE: u16 = 200;
