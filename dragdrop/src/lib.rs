//! Headless drag-and-drop and layout-transition engine.
//!
//! `dragdrop` owns the hard parts of interactive list manipulation and
//! leaves rendering to the host: it tracks a [`VisualTree`] of
//! rectangles, runs pointer input through a [`DragManager`], resolves
//! drop targets by proximity, previews and commits reorders with
//! [`Sortable`], and plays First-Last-Invert-Play transitions with a
//! [`FlipEngine`] whenever the tree changes shape. [`reconcile`] keeps
//! the tree matched to host data by stable key, so nodes keep their
//! identity (and in-flight animations) across re-renders.
//!
//! Nothing here touches a windowing system. The host feeds pointer
//! samples and a monotonic clock in, and reads node rectangles,
//! transforms, and opacities back out each frame:
//!
//! ```
//! use dragdrop::{
//!     DragManager, DragOptions, Point, Pointer, PointerButton, Rect, VisualTree,
//! };
//!
//! let mut tree: VisualTree<u32> = VisualTree::new();
//! let item = tree.create(Some(1));
//! tree.set_rect(item, Rect::new(0.0, 0.0, 100.0, 40.0));
//! tree.attach(item, tree.root());
//!
//! let mut drag = DragManager::new(DragOptions::default());
//! let press = Pointer::Mouse { button: PointerButton::Primary };
//! drag.pointer_down(&tree, item, Point::new(10.0, 10.0), press, 0);
//! let events = drag.pointer_move(&mut tree, Point::new(40.0, 10.0), 16);
//! assert!(drag.is_dragging());
//! assert!(!events.is_empty());
//! ```
//!
//! ## Feature flags
//!
//! - `std` (default): hash-map key storage and `std` error sources.
//!   Disable for `no_std` + `alloc` targets; keys then require `Ord`.
//! - `serde`: `Serialize`/`Deserialize` on geometry and option types.
//! - `tracing`: emits spans of engine activity under the `dragdrop`
//!   target. Implies `std`.

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
#![warn(missing_debug_implementations)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod drag;
mod events;
mod flip;
mod key;
mod options;
mod reconcile;
mod resolver;
mod sortable;
mod tree;
mod tween;
mod types;


pub use drag::{DragManager, Pointer, PointerButton, Viewport};
pub use events::{DragEvent, SortableEvent};
pub use flip::{FlipEngine, Snapshot, SnapshotEntry};
pub use key::StableKey;
pub use options::{DragOptions, FlipOptions};
pub use reconcile::{reconcile, ReconcileResult, ReconcileStats};
pub use resolver::resolve_target;
pub use sortable::Sortable;
pub use tree::{NodeFlags, NodeId, VisualNode, VisualTree};
pub use tween::{Easing, Tween};
pub use types::{Axis, Point, Rect, Vec2};
