use crate::{NodeId, Point, Vec2};

/// Lifecycle events of one drag session.
///
/// There is no event bus: engine calls return the events they produced,
/// in dispatch order, and the adapter routes them to whoever listens
/// (typically one [`crate::Sortable`] per container).
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEvent {
    /// The session crossed the drag threshold and became a real drag.
    Start {
        source: NodeId,
        ghost: NodeId,
        origin: Point,
        position: Point,
        /// Cursor-to-source offset; the ghost is anchored so the grab
        /// point stays under the pointer.
        grab: Vec2,
    },
    /// The ghost moved.
    Move { ghost: NodeId, position: Point },
    /// The resolved drop target changed to `target`.
    TargetEnter { target: NodeId },
    /// The previously resolved drop target is no longer current.
    TargetLeave { target: NodeId },
    /// Heartbeat over the current target (~50ms), re-fired even without
    /// movement so time-based reactions stay live.
    Over { target: NodeId, position: Point },
    /// Released over `target`. The manager tears the ghost down after
    /// emitting this, exactly once.
    Drop { target: NodeId },
    /// Released with no target; the session ended without a drop.
    Cancel,
    /// The pointer is near a viewport edge; the adapter should scroll by
    /// `delta`. Re-emitted once per tick while the edge condition holds.
    AutoScroll { delta: Vec2 },
}

/// Events emitted by a [`crate::Sortable`] container.
#[derive(Clone, Debug, PartialEq)]
pub enum SortableEvent<K> {
    /// The pending insertion index changed. `index` is `None` when the
    /// ghost left the container (the placeholder was removed).
    Preview {
        container: NodeId,
        index: Option<usize>,
        placeholder: Option<NodeId>,
    },
    /// The drag ended inside the container; apply the reorder.
    Commit {
        container: NodeId,
        key: K,
        index: usize,
    },
}
