use alloc::vec::Vec;

use dragdrop::{
    Axis, DragEvent, DragManager, DragOptions, FlipEngine, FlipOptions, NodeFlags, NodeId, Point,
    Pointer, Rect, Sortable, SortableEvent, StableKey, Vec2, Viewport, VisualTree, reconcile,
};

/// Configuration for [`SortableList`].
#[derive(Clone, Copy, Debug)]
pub struct SortableListOptions {
    pub drag: DragOptions,
    pub flip: FlipOptions,
    pub axis: Axis,
    /// Where the first item lands.
    pub origin: Point,
    /// Space between stacked items.
    pub gap: f64,
}

impl Default for SortableListOptions {
    fn default() -> Self {
        Self {
            drag: DragOptions::default(),
            flip: FlipOptions::default(),
            axis: Axis::Vertical,
            origin: Point::ZERO,
            gap: 0.0,
        }
    }
}

impl SortableListOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_drag(mut self, drag: DragOptions) -> Self {
        self.drag = drag;
        self
    }

    pub fn with_flip(mut self, flip: FlipOptions) -> Self {
        self.flip = flip;
        self
    }

    pub fn with_axis(mut self, axis: Axis) -> Self {
        self.axis = axis;
        self
    }

    pub fn with_origin(mut self, origin: Point) -> Self {
        self.origin = origin;
        self
    }

    pub fn with_gap(mut self, gap: f64) -> Self {
        self.gap = gap;
        self
    }
}

/// What one frame produced: sortable events to react to, and an
/// auto-scroll request for the host's scroll container.
#[derive(Clone, Debug)]
pub struct TickOutput<K> {
    pub events: Vec<SortableEvent<K>>,
    pub auto_scroll: Option<Vec2>,
}

/// A framework-neutral controller wiring one reorderable list together:
/// a `dragdrop::VisualTree` for geometry, a `DragManager` for input, a
/// `Sortable` for insertion previews and a `FlipEngine` for transitions.
///
/// This type holds no UI objects. Adapters drive it by calling:
/// - [`SortableList::sync`] whenever the host's entity list changes
/// - `pointer_down` / `pointer_move` / `pointer_up` on input events
/// - [`SortableList::tick`] each frame
///
/// and render from the tree: each item's displayed rectangle is
/// `tree().effective_rect(node)`, its opacity `tree().opacity(node)`.
#[derive(Clone, Debug)]
pub struct SortableList<K> {
    tree: VisualTree<K>,
    drag: DragManager,
    sortable: Sortable<K>,
    flip: FlipEngine<K>,
    container: NodeId,
    axis: Axis,
    origin: Point,
    gap: f64,
}

impl<K: StableKey> SortableList<K> {
    pub fn new(options: SortableListOptions) -> Self {
        let mut tree = VisualTree::new();
        let container = tree.create(None);
        if let Some(node) = tree.node_mut(container) {
            node.flags.insert(NodeFlags::DROP_TARGET);
        }
        tree.attach(container, tree.root());

        Self {
            drag: DragManager::new(options.drag),
            sortable: Sortable::new(container, options.axis),
            flip: FlipEngine::new(options.flip),
            tree,
            container,
            axis: options.axis,
            origin: options.origin,
            gap: options.gap,
        }
    }

    pub fn tree(&self) -> &VisualTree<K> {
        &self.tree
    }

    pub fn tree_mut(&mut self) -> &mut VisualTree<K> {
        &mut self.tree
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn drag(&self) -> &DragManager {
        &self.drag
    }

    pub fn node_for(&self, key: &K) -> Option<NodeId> {
        self.tree.find_child_by_key(self.container, key)
    }

    pub fn is_dragging(&self) -> bool {
        self.drag.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.flip.is_animating()
    }

    /// Whether a click derived from the current or just-ended gesture
    /// should be ignored by the host.
    pub fn suppresses_click(&self) -> bool {
        self.drag.suppresses_click()
    }

    pub fn set_viewport(&mut self, viewport: Option<Viewport>) {
        self.drag.set_viewport(viewport);
    }

    /// Mirrors the host's entity list into the tree and lays items out.
    ///
    /// Runs one FLIP cycle around the whole mutation, so every sync that
    /// changes geometry animates: nodes keep their identity by key, new
    /// entities fade in, vanished ones fade out where they stood.
    pub fn sync<E>(
        &mut self,
        entities: &[E],
        key_of: impl Fn(&E) -> K,
        size_of: impl Fn(&E) -> (f64, f64),
    ) {
        self.flip.before_change(&self.tree);

        let result = reconcile(
            &mut self.tree,
            self.container,
            entities,
            &key_of,
            |tree, entity| {
                let (width, height) = size_of(entity);
                let node = tree.create(None);
                tree.set_rect(node, Rect::from_origin_size(0.0, 0.0, width, height));
                node
            },
            |tree, node, entity| {
                let (width, height) = size_of(entity);
                let rect = tree.rect(node);
                tree.set_rect(
                    node,
                    Rect::from_origin_size(rect.left, rect.top, width, height),
                );
            },
        );
        adtrace!(
            created = result.stats.created,
            removed = result.stats.removed,
            "list synced"
        );

        self.relayout(entities, &size_of);

        let adopted = self.flip.after_change(&mut self.tree);
        for id in result.detached {
            if !adopted.contains(&id) {
                self.tree.free(id);
            }
        }
    }

    fn relayout<E>(&mut self, entities: &[E], size_of: &impl Fn(&E) -> (f64, f64)) {
        let extent = self
            .tree
            .layout_stack(self.container, self.axis, self.origin, self.gap);

        let cross = entities
            .iter()
            .map(|e| {
                let (width, height) = size_of(e);
                match self.axis {
                    Axis::Vertical => width,
                    Axis::Horizontal => height,
                }
            })
            .fold(0.0, f64::max);
        let rect = match self.axis {
            Axis::Vertical => Rect::from_origin_size(self.origin.x, self.origin.y, cross, extent),
            Axis::Horizontal => Rect::from_origin_size(self.origin.x, self.origin.y, extent, cross),
        };
        self.tree.set_rect(self.container, rect);
    }

    /// Forwards a press on the item carrying `key`. Returns whether the
    /// press armed a session.
    pub fn pointer_down(&mut self, key: &K, point: Point, pointer: Pointer, now_ms: u64) -> bool {
        let Some(node) = self.node_for(key) else {
            return false;
        };
        self.drag.pointer_down(&self.tree, node, point, pointer, now_ms)
    }

    pub fn pointer_move(&mut self, point: Point, now_ms: u64) -> Vec<SortableEvent<K>> {
        let events = self.drag.pointer_move(&mut self.tree, point, now_ms);
        self.route(&events)
    }

    /// Ends the gesture. A drop inside the container yields a
    /// `SortableEvent::Commit`; the host applies it to its entity list and
    /// calls [`SortableList::sync`].
    pub fn pointer_up(&mut self, now_ms: u64) -> Vec<SortableEvent<K>> {
        let events = self.drag.pointer_up(&mut self.tree, now_ms);
        self.route(&events)
    }

    /// Advances one frame: the drag heartbeat and edge auto-scroll, then
    /// in-flight FLIP animations.
    pub fn tick(&mut self, now_ms: u64) -> TickOutput<K> {
        let drag_events = self.drag.tick(now_ms);
        let auto_scroll = drag_events.iter().find_map(|e| match e {
            DragEvent::AutoScroll { delta } => Some(*delta),
            _ => None,
        });
        let events = self.route(&drag_events);

        self.flip.tick(&mut self.tree, now_ms);

        TickOutput {
            events,
            auto_scroll,
        }
    }

    fn route(&mut self, events: &[DragEvent]) -> Vec<SortableEvent<K>> {
        events
            .iter()
            .filter_map(|e| self.sortable.on_drag_event(&mut self.tree, &self.drag, e))
            .collect()
    }
}
