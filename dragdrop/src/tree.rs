use alloc::vec::Vec;

use bitflags::bitflags;

use crate::{Axis, Point, Rect, Vec2};

bitflags! {
    /// Per-node behavior flags.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    pub struct NodeFlags: u8 {
        /// Never starts a drag session.
        const NO_DRAG = 1 << 0;
        /// Excluded from FLIP snapshots and animation passes (ghost, placeholder).
        const NO_ANIMATE = 1 << 1;
        /// A candidate drop region for the target resolver.
        const DROP_TARGET = 1 << 2;
        /// Positioned outside normal flow; skipped by `layout_stack` (ghost).
        const FLOATING = 1 << 3;
        /// A pending-insertion stand-in owned by a sortable.
        const PLACEHOLDER = 1 << 4;
    }
}

/// A generational handle to a node in a [`VisualTree`].
///
/// Handles to freed nodes are safe: every query degrades to "missing"
/// (zero rectangle, no children) instead of panicking.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId {
    index: u32,
    generation: u32,
}

/// A visual proxy for one rendered element.
///
/// `rect` is the node's natural (laid-out) rectangle; `transform` is a
/// semantic translation applied by the application, and `invert` is the
/// engine-applied inverse transform during a FLIP cycle. Snapshots read
/// only `transform`, so engine state never leaks into delta math.
#[derive(Clone, Debug)]
pub struct VisualNode<K> {
    pub key: Option<K>,
    pub rect: Rect,
    pub transform: Vec2,
    pub invert: Vec2,
    pub opacity: f64,
    pub flags: NodeFlags,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

#[derive(Clone, Debug)]
struct Slot<K> {
    generation: u32,
    node: Option<VisualNode<K>>,
}

/// A headless stand-in for the visual tree the engines operate on.
///
/// The adapter owns one tree per interactive root, measures real geometry
/// into node rectangles, and mirrors structural changes back out to its
/// UI layer.
#[derive(Clone, Debug)]
pub struct VisualTree<K> {
    slots: Vec<Slot<K>>,
    free: Vec<u32>,
    root: NodeId,
}

const EMPTY_CHILDREN: &[NodeId] = &[];

impl<K> VisualTree<K> {
    pub fn new() -> Self {
        let mut tree = Self {
            slots: Vec::new(),
            free: Vec::new(),
            root: NodeId {
                index: 0,
                generation: 0,
            },
        };
        tree.root = tree.create(None);
        tree
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Creates a detached node.
    pub fn create(&mut self, key: Option<K>) -> NodeId {
        let node = VisualNode {
            key,
            rect: Rect::ZERO,
            transform: Vec2::ZERO,
            invert: Vec2::ZERO,
            opacity: 1.0,
            flags: NodeFlags::empty(),
            parent: None,
            children: Vec::new(),
        };

        if let Some(index) = self.free.pop() {
            let slot = &mut self.slots[index as usize];
            slot.node = Some(node);
            NodeId {
                index,
                generation: slot.generation,
            }
        } else {
            let index = self.slots.len() as u32;
            self.slots.push(Slot {
                generation: 0,
                node: Some(node),
            });
            NodeId {
                index,
                generation: 0,
            }
        }
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.node(id).is_some()
    }

    pub fn node(&self, id: NodeId) -> Option<&VisualNode<K>> {
        let slot = self.slots.get(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_ref()
    }

    pub fn node_mut(&mut self, id: NodeId) -> Option<&mut VisualNode<K>> {
        let slot = self.slots.get_mut(id.index as usize)?;
        if slot.generation != id.generation {
            return None;
        }
        slot.node.as_mut()
    }

    pub fn key(&self, id: NodeId) -> Option<&K> {
        self.node(id)?.key.as_ref()
    }

    pub fn flags(&self, id: NodeId) -> NodeFlags {
        self.node(id).map(|n| n.flags).unwrap_or_default()
    }

    /// The node's natural rectangle; `Rect::ZERO` for missing nodes.
    pub fn rect(&self, id: NodeId) -> Rect {
        self.node(id).map(|n| n.rect).unwrap_or(Rect::ZERO)
    }

    pub fn set_rect(&mut self, id: NodeId, rect: Rect) {
        if let Some(node) = self.node_mut(id) {
            node.rect = rect;
        }
    }

    /// The rectangle as currently displayed: natural rect plus the
    /// semantic and engine-applied transforms of the node and all its
    /// ancestors (transforms cascade, as they do in a real scene graph).
    pub fn effective_rect(&self, id: NodeId) -> Rect {
        let Some(node) = self.node(id) else {
            return Rect::ZERO;
        };
        let mut offset = node.transform + node.invert;
        let mut current = node.parent;
        while let Some(parent) = current {
            let Some(parent_node) = self.node(parent) else {
                break;
            };
            offset += parent_node.transform + parent_node.invert;
            current = parent_node.parent;
        }
        node.rect.translated(offset)
    }

    /// Like [`Self::effective_rect`], but ignoring engine-applied inverse
    /// transforms: the rectangle the node will occupy once any running
    /// FLIP animation has settled. Snapshots are built from this, so
    /// stale animation state never leaks into the next cycle's deltas.
    pub fn resting_rect(&self, id: NodeId) -> Rect {
        let Some(node) = self.node(id) else {
            return Rect::ZERO;
        };
        let mut offset = node.transform;
        let mut current = node.parent;
        while let Some(parent) = current {
            let Some(parent_node) = self.node(parent) else {
                break;
            };
            offset += parent_node.transform;
            current = parent_node.parent;
        }
        node.rect.translated(offset)
    }

    pub fn opacity(&self, id: NodeId) -> f64 {
        self.node(id).map(|n| n.opacity).unwrap_or(1.0)
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id)?.parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        self.node(id)
            .map(|n| n.children.as_slice())
            .unwrap_or(EMPTY_CHILDREN)
    }

    pub fn child_index(&self, parent: NodeId, child: NodeId) -> Option<usize> {
        self.children(parent).iter().position(|&c| c == child)
    }

    /// Appends `child` to `parent`, detaching it from any previous parent.
    pub fn attach(&mut self, child: NodeId, parent: NodeId) {
        let len = self.children(parent).len();
        self.insert_at(parent, len, child);
    }

    /// Inserts `child` into `parent` at `index` (clamped), detaching it
    /// from any previous parent first. Re-inserting an existing child at
    /// another index repositions it.
    pub fn insert_at(&mut self, parent: NodeId, index: usize, child: NodeId) {
        if child == self.root || !self.contains(child) || !self.contains(parent) {
            return;
        }
        if child == parent || self.is_ancestor(child, parent) {
            debug_assert!(false, "insert_at would create a cycle");
            return;
        }

        self.detach(child);

        if let Some(node) = self.node_mut(child) {
            node.parent = Some(parent);
        }
        if let Some(node) = self.node_mut(parent) {
            let index = index.min(node.children.len());
            node.children.insert(index, child);
        }
    }

    /// Unlinks a node from its parent. The node and its subtree stay
    /// alive so they can be re-attached (e.g. for a FLIP fade-out).
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        if let Some(node) = self.node_mut(parent) {
            node.children.retain(|&c| c != id);
        }
        if let Some(node) = self.node_mut(id) {
            node.parent = None;
        }
    }

    /// Detaches and destroys a node together with its subtree.
    pub fn free(&mut self, id: NodeId) {
        if id == self.root || !self.contains(id) {
            return;
        }
        self.detach(id);

        let mut stack = alloc::vec![id];
        while let Some(next) = stack.pop() {
            let slot = &mut self.slots[next.index as usize];
            if slot.generation != next.generation {
                continue;
            }
            if let Some(node) = slot.node.take() {
                slot.generation = slot.generation.wrapping_add(1);
                self.free.push(next.index);
                stack.extend(node.children);
            }
        }
    }

    /// Whether `ancestor` is a strict ancestor of `node`.
    pub fn is_ancestor(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = self.parent(node);
        while let Some(id) = current {
            if id == ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }

    /// The nearest ancestor that participates in FLIP tracking (keyed and
    /// not flagged `NO_ANIMATE`), excluding the root.
    pub fn nearest_tracked_ancestor(&self, id: NodeId) -> Option<NodeId> {
        let mut current = self.parent(id);
        while let Some(candidate) = current {
            if candidate == self.root {
                return None;
            }
            if let Some(node) = self.node(candidate) {
                if node.key.is_some() && !node.flags.contains(NodeFlags::NO_ANIMATE) {
                    return Some(candidate);
                }
            }
            current = self.parent(candidate);
        }
        None
    }

    /// Visits `of` and all its live descendants in pre-order.
    pub fn for_each_descendant(&self, of: NodeId, mut f: impl FnMut(NodeId, &VisualNode<K>)) {
        let mut stack = alloc::vec![of];
        while let Some(id) = stack.pop() {
            let Some(node) = self.node(id) else {
                continue;
            };
            f(id, node);
            for &child in node.children.iter().rev() {
                stack.push(child);
            }
        }
    }

    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.node.is_some()).count()
    }

    /// Assigns positions to the non-floating children of `parent`,
    /// stacked along `axis` from `origin` with `gap` between items.
    /// Sizes are preserved; this is the headless stand-in for layout.
    ///
    /// Returns the total extent along the stacking axis.
    pub fn layout_stack(&mut self, parent: NodeId, axis: Axis, origin: Point, gap: f64) -> f64 {
        let children: Vec<NodeId> = self.children(parent).to_vec();
        let mut cursor = 0.0;
        let mut first = true;

        for child in children {
            let Some(node) = self.node(child) else {
                continue;
            };
            if node.flags.contains(NodeFlags::FLOATING) {
                continue;
            }
            if !first {
                cursor += gap;
            }
            first = false;

            let rect = node.rect;
            let placed = match axis {
                Axis::Vertical => rect.at_origin(Point::new(origin.x, origin.y + cursor)),
                Axis::Horizontal => rect.at_origin(Point::new(origin.x + cursor, origin.y)),
            };
            cursor += rect.size_along(axis);
            self.set_rect(child, placed);
        }

        cursor
    }
}

impl<K> Default for VisualTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: PartialEq> VisualTree<K> {
    /// Finds a direct child of `parent` carrying `key`.
    pub fn find_child_by_key(&self, parent: NodeId, key: &K) -> Option<NodeId> {
        self.children(parent)
            .iter()
            .copied()
            .find(|&c| self.node(c).and_then(|n| n.key.as_ref()) == Some(key))
    }
}
