#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type KeyMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type KeyMap<K, V> = BTreeMap<K, V>;

/// Bound for stable keys used to correlate entities with visual nodes
/// across renders and snapshots.
#[cfg(feature = "std")]
pub trait StableKey: core::hash::Hash + Eq + Clone {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq + Clone> StableKey for K {}

#[cfg(not(feature = "std"))]
pub trait StableKey: Ord + Clone {}
#[cfg(not(feature = "std"))]
impl<K: Ord + Clone> StableKey for K {}
