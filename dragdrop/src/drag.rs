use alloc::vec::Vec;

use crate::{
    DragEvent, DragOptions, NodeFlags, NodeId, Point, Rect, Vec2, VisualTree, resolver,
};

/// Which physical device started a pointer gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pointer {
    Mouse { button: PointerButton },
    Touch { touches: u8 },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerButton {
    Primary,
    Secondary,
    Auxiliary,
}

/// Viewport geometry used for edge auto-scroll.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Viewport {
    /// The visible area, in the same coordinates as pointer positions.
    pub rect: Rect,
    /// Current scroll offsets; scrolling up/left stops at zero.
    pub scroll: Vec2,
}

/// One in-flight gesture, from arming pointer-down to drop/cancel.
#[derive(Clone, Copy, Debug)]
struct Session {
    source: NodeId,
    origin: Point,
    position: Point,
    start_ms: u64,
    touch: bool,
    dragging: bool,
    ghost: Option<NodeId>,
    ghost_source: Option<NodeId>,
    grab: Vec2,
    target: Option<NodeId>,
    next_over_ms: u64,
}

/// Owns at most one drag session per interactive root.
///
/// The manager is headless: the adapter feeds it pointer input and calls
/// [`DragManager::tick`] once per frame; it returns [`DragEvent`]s in
/// dispatch order. A second concurrent gesture is structurally impossible
/// (a single physical pointer drives it; multi-touch starts are rejected).
#[derive(Clone, Debug)]
pub struct DragManager {
    options: DragOptions,
    viewport: Option<Viewport>,
    session: Option<Session>,
    suppress_next_click: bool,
}

impl DragManager {
    pub fn new(options: DragOptions) -> Self {
        Self {
            options,
            viewport: None,
            session: None,
            suppress_next_click: false,
        }
    }

    pub fn options(&self) -> &DragOptions {
        &self.options
    }

    /// Sets the viewport used for edge auto-scroll. Without one, no
    /// `AutoScroll` events are emitted.
    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.viewport = viewport;
    }

    pub fn is_dragging(&self) -> bool {
        self.session.map(|s| s.dragging).unwrap_or(false)
    }

    /// Whether a click synthesized from the current or just-ended gesture
    /// should be suppressed. True only while (or right after) an actual
    /// drag; an armed-but-unpromoted press lets clicks through.
    pub fn suppresses_click(&self) -> bool {
        self.is_dragging() || self.suppress_next_click
    }

    pub fn source(&self) -> Option<NodeId> {
        self.session.map(|s| s.source)
    }

    pub fn ghost(&self) -> Option<NodeId> {
        self.session.and_then(|s| s.ghost)
    }

    pub fn current_target(&self) -> Option<NodeId> {
        self.session.and_then(|s| s.target)
    }

    pub fn origin(&self) -> Option<Point> {
        self.session.map(|s| s.origin)
    }

    pub fn position(&self) -> Option<Point> {
        self.session.map(|s| s.position)
    }

    /// Arms a session on a qualifying press. Returns whether the press
    /// was accepted (no drag starts until the movement threshold).
    pub fn pointer_down<K>(
        &mut self,
        tree: &VisualTree<K>,
        node: NodeId,
        point: Point,
        pointer: Pointer,
        now_ms: u64,
    ) -> bool {
        self.suppress_next_click = false;

        if self.session.is_some() {
            return false;
        }
        if !tree.contains(node) || tree.flags(node).contains(NodeFlags::NO_DRAG) {
            return false;
        }
        let touch = match pointer {
            Pointer::Mouse { button } => {
                if button != PointerButton::Primary {
                    return false;
                }
                false
            }
            Pointer::Touch { touches } => {
                if touches > 1 {
                    return false;
                }
                true
            }
        };

        ddtrace!(x = point.x, y = point.y, touch, "drag armed");
        self.session = Some(Session {
            source: node,
            origin: point,
            position: point,
            start_ms: now_ms,
            touch,
            dragging: false,
            ghost: None,
            ghost_source: None,
            grab: Vec2::ZERO,
            target: None,
            next_over_ms: 0,
        });
        true
    }

    pub fn pointer_move<K>(
        &mut self,
        tree: &mut VisualTree<K>,
        point: Point,
        now_ms: u64,
    ) -> Vec<DragEvent> {
        let mut events = Vec::new();
        let Some(mut session) = self.session else {
            return events;
        };
        session.position = point;

        if session.dragging {
            if let Some(ghost) = session.ghost {
                let rect = tree.rect(ghost).at_origin(point - session.grab);
                tree.set_rect(ghost, rect);
                events.push(DragEvent::Move {
                    ghost,
                    position: point,
                });
            }
            Self::retarget(&self.options, tree, &mut session, &mut events);
            self.session = Some(session);
            return events;
        }

        let delta = point - session.origin;
        if delta.x.abs() < self.options.drag_threshold && delta.y.abs() < self.options.drag_threshold
        {
            self.session = Some(session);
            return events;
        }

        // A short touch that moves this far is a scroll, not a drag.
        if session.touch && now_ms.saturating_sub(session.start_ms) < self.options.touch_hold_ms {
            ddtrace!("touch moved before hold delay, disarming");
            self.session = None;
            return events;
        }

        session.dragging = true;
        let source = session.source;
        let ghost = Self::build_ghost(tree, &mut session, source);
        dddebug!(
            origin_x = session.origin.x,
            origin_y = session.origin.y,
            "drag start"
        );

        events.push(DragEvent::Start {
            source: session.source,
            ghost,
            origin: session.origin,
            position: point,
            grab: session.grab,
        });
        events.push(DragEvent::Move {
            ghost,
            position: point,
        });
        Self::retarget(&self.options, tree, &mut session, &mut events);
        if let Some(target) = session.target {
            events.push(DragEvent::Over {
                target,
                position: point,
            });
        }
        session.next_over_ms = now_ms + self.options.over_interval_ms;

        self.session = Some(session);
        events
    }

    /// Ends the gesture: `Drop` on the current target when one exists,
    /// `Cancel` otherwise. Either path tears the ghost down and resets
    /// the session; the teardown runs exactly once by construction.
    pub fn pointer_up<K>(&mut self, tree: &mut VisualTree<K>, _now_ms: u64) -> Vec<DragEvent> {
        let mut events = Vec::new();
        let Some(mut session) = self.session.take() else {
            return events;
        };
        if !session.dragging {
            return events;
        }

        Self::retarget(&self.options, tree, &mut session, &mut events);
        match session.target {
            Some(target) => events.push(DragEvent::Drop { target }),
            None => events.push(DragEvent::Cancel),
        }
        dddebug!(dropped = session.target.is_some(), "drag end");

        if let Some(ghost) = session.ghost {
            tree.free(ghost);
        }
        self.suppress_next_click = true;
        events
    }

    /// Advances time-based behavior: the ~50ms `Over` heartbeat on the
    /// current target, and edge auto-scroll once per tick.
    pub fn tick(&mut self, now_ms: u64) -> Vec<DragEvent> {
        let mut events = Vec::new();
        let Some(session) = self.session.as_mut() else {
            return events;
        };
        if !session.dragging {
            return events;
        }

        if let Some(target) = session.target {
            if now_ms >= session.next_over_ms {
                events.push(DragEvent::Over {
                    target,
                    position: session.position,
                });
                session.next_over_ms = now_ms + self.options.over_interval_ms;
            }
        }

        if let Some(viewport) = self.viewport {
            let delta = Self::auto_scroll_delta(&self.options, viewport, session.position);
            if !delta.is_zero() {
                events.push(DragEvent::AutoScroll { delta });
            }
        }

        events
    }

    /// Replaces the ghost's visual source mid-drag: the old ghost is torn
    /// down and a new proxy is anchored to the same gesture. No-op unless
    /// dragging, or when `source` already drives the ghost. Returns the
    /// current ghost.
    pub fn set_ghost_source<K>(
        &mut self,
        tree: &mut VisualTree<K>,
        source: NodeId,
    ) -> Option<NodeId> {
        let mut session = self.session?;
        if !session.dragging {
            return None;
        }
        if session.ghost_source == Some(source) {
            return session.ghost;
        }
        if let Some(old) = session.ghost {
            tree.free(old);
        }
        let ghost = Self::build_ghost(tree, &mut session, source);
        self.session = Some(session);
        Some(ghost)
    }

    fn build_ghost<K>(
        tree: &mut VisualTree<K>,
        session: &mut Session,
        source: NodeId,
    ) -> NodeId {
        let source_rect = tree.effective_rect(source);
        session.grab = session.origin - source_rect.origin();
        session.ghost_source = Some(source);

        let ghost = tree.create(None);
        if let Some(node) = tree.node_mut(ghost) {
            node.rect = source_rect.at_origin(session.position - session.grab);
            node.flags = NodeFlags::FLOATING | NodeFlags::NO_ANIMATE;
        }
        tree.attach(ghost, tree.root());
        session.ghost = Some(ghost);
        ghost
    }

    fn retarget<K>(
        options: &DragOptions,
        tree: &VisualTree<K>,
        session: &mut Session,
        events: &mut Vec<DragEvent>,
    ) {
        let next = resolver::resolve_target(tree, session.position, options.drop_range);
        if next == session.target {
            return;
        }
        if let Some(old) = session.target {
            events.push(DragEvent::TargetLeave { target: old });
        }
        if let Some(new) = next {
            events.push(DragEvent::TargetEnter { target: new });
        }
        session.target = next;
    }

    fn auto_scroll_delta(options: &DragOptions, viewport: Viewport, position: Point) -> Vec2 {
        let mut x = 0.0;
        let mut y = 0.0;

        if position.x < viewport.rect.left + options.scroll_threshold {
            if viewport.scroll.x > 0.0 {
                x = -1.0;
            }
        } else if position.x > viewport.rect.right - options.scroll_threshold {
            x = 1.0;
        }

        if position.y < viewport.rect.top + options.scroll_threshold {
            if viewport.scroll.y > 0.0 {
                y = -1.0;
            }
        } else if position.y > viewport.rect.bottom - options.scroll_threshold {
            y = 1.0;
        }

        Vec2::new(x, y).scaled(options.scroll_speed)
    }
}
