//! Adapter utilities for the `dragdrop` crate.
//!
//! The `dragdrop` crate is UI-agnostic and focuses on the core geometry
//! and state machines. This crate provides small, framework-neutral
//! pieces commonly needed when wiring it to a host:
//!
//! - [`SortableList`]: one reorderable list, fully wired (tree, drag,
//!   sortable preview, FLIP transitions) behind pointer + tick calls
//! - [`Store`]: a reducer-style state container with change callbacks
//! - [`Persistence`] / [`DebouncedSaver`]: write-behind state saving
//! - [`Date`] helpers for day-keyed lists, [`IconCache`] for assets
//!
//! This crate is intentionally framework-agnostic (no DOM/ratatui/egui
//! bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod controller;
mod dates;
mod icons;
mod persist;
mod store;

#[cfg(test)]
mod tests;

pub use controller::{SortableList, SortableListOptions, TickOutput};
pub use dates::{DAY_NAMES, Date, MONTH_NAMES, ordinal_suffix};
pub use icons::IconCache;
pub use persist::{DebouncedSaver, MemoryPersistence, Persistence};
#[cfg(feature = "serde")]
pub use persist::{load_json, save_json};
pub use store::Store;
