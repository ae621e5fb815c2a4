//! The progression engine: currency, upgrades, derived parameters, and
//! milestones, behind an observable store.
//!
//! Everything in here is pure single-threaded Rust with no rendering or
//! browser dependencies (diagnostics aside), so the whole progression can
//! be driven and asserted from plain unit tests.

pub mod catalog;
pub mod curves;
pub mod milestones;
pub mod simulator;
pub mod store;

pub use catalog::{DerivedParams, ToolId, UpgradeId};
pub use store::{Snapshot, Store, StoreConfig, StoreEvent};
