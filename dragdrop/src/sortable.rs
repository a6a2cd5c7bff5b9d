use crate::{
    Axis, DragEvent, DragManager, NodeFlags, NodeId, Rect, SortableEvent, StableKey, VisualTree,
};

/// Turns "the ghost is over this container" into a concrete insertion
/// index and a placeholder node.
///
/// One `Sortable` is scoped to one container and reacts to the
/// [`DragEvent`]s of one active session. It emits a `Preview` whenever
/// the pending index changes, and a `Commit` when the drag drops inside
/// its container; the external state transition applies the commit and
/// re-renders.
#[derive(Clone, Debug)]
pub struct Sortable<K> {
    container: NodeId,
    axis: Axis,
    placeholder: Option<NodeId>,
    placeholder_source: Option<NodeId>,
    current_index: Option<usize>,
    /// Captured on first contact. The source node may be freed before the
    /// drop (its place is held by the placeholder), so the key cannot be
    /// re-read from the tree at commit time.
    dragged: Option<K>,
}

impl<K: StableKey> Sortable<K> {
    pub fn new(container: NodeId, axis: Axis) -> Self {
        Self {
            container,
            axis,
            placeholder: None,
            placeholder_source: None,
            current_index: None,
            dragged: None,
        }
    }

    pub fn container(&self) -> NodeId {
        self.container
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The pending insertion index; `None` while the ghost is not over
    /// this container.
    pub fn current_index(&self) -> Option<usize> {
        self.current_index
    }

    pub fn placeholder(&self) -> Option<NodeId> {
        self.placeholder
    }

    /// Routes one drag event through this container.
    pub fn on_drag_event(
        &mut self,
        tree: &mut VisualTree<K>,
        manager: &DragManager,
        event: &DragEvent,
    ) -> Option<SortableEvent<K>> {
        match *event {
            DragEvent::Over { target, .. } if target == self.container => {
                if self.dragged.is_none() {
                    self.dragged = manager.source().and_then(|s| tree.key(s).cloned());
                }
                let ghost_rect = manager
                    .ghost()
                    .map(|g| tree.effective_rect(g))
                    .unwrap_or(Rect::ZERO);
                let index = self.calculate_index(tree, ghost_rect);
                self.apply_index(tree, manager, Some(index))
            }
            DragEvent::TargetLeave { target } if target == self.container => {
                self.apply_index(tree, manager, None)
            }
            DragEvent::Drop { target } if target == self.container => {
                let commit = match (self.dragged.clone(), self.current_index) {
                    (Some(key), Some(index)) => Some(SortableEvent::Commit {
                        container: self.container,
                        key,
                        index,
                    }),
                    _ => None,
                };
                self.clean_up(tree);
                commit
            }
            // A drop in another container still ends this session.
            DragEvent::Drop { .. } | DragEvent::Cancel => {
                self.clean_up(tree);
                None
            }
            _ => None,
        }
    }

    fn apply_index(
        &mut self,
        tree: &mut VisualTree<K>,
        manager: &DragManager,
        index: Option<usize>,
    ) -> Option<SortableEvent<K>> {
        if index == self.current_index {
            return None;
        }
        self.current_index = index;
        ddtrace!(index = ?index, "sortable preview");

        match index {
            Some(i) => {
                self.ensure_placeholder(tree, manager);
                self.insert_placeholder(tree, i);

                // The original of the dragged item leaves the container;
                // only the placeholder marks its pending position.
                if let Some(key) = self.dragged.clone() {
                    if let Some(original) = tree.find_child_by_key(self.container, &key) {
                        tree.free(original);
                    }
                }
            }
            None => self.remove_placeholder(tree),
        }

        Some(SortableEvent::Preview {
            container: self.container,
            index,
            placeholder: self.placeholder,
        })
    }

    /// Lazily clones the dragged source's visual as the placeholder: same
    /// size, key stripped, excluded from animation passes.
    fn ensure_placeholder(&mut self, tree: &mut VisualTree<K>, manager: &DragManager) {
        let source = manager.source();
        if self.placeholder.is_some() && self.placeholder_source == source {
            return;
        }
        if let Some(old) = self.placeholder.take() {
            tree.free(old);
        }
        let Some(source) = source else {
            return;
        };

        let rect = tree.rect(source);
        let placeholder = tree.create(None);
        if let Some(node) = tree.node_mut(placeholder) {
            node.rect = rect;
            node.flags = NodeFlags::NO_ANIMATE | NodeFlags::PLACEHOLDER;
        }
        self.placeholder = Some(placeholder);
        self.placeholder_source = Some(source);
    }

    fn insert_placeholder(&self, tree: &mut VisualTree<K>, index: usize) {
        let Some(placeholder) = self.placeholder else {
            return;
        };
        if tree.children(self.container).get(index).copied() == Some(placeholder) {
            return;
        }
        tree.insert_at(self.container, index, placeholder);
    }

    fn remove_placeholder(&self, tree: &mut VisualTree<K>) {
        if let Some(placeholder) = self.placeholder {
            tree.detach(placeholder);
        }
    }

    fn clean_up(&mut self, tree: &mut VisualTree<K>) {
        if let Some(placeholder) = self.placeholder.take() {
            tree.free(placeholder);
        }
        self.placeholder_source = None;
        self.current_index = None;
        self.dragged = None;
    }

    /// Content insertion index for a ghost rectangle: the position of the
    /// first child whose midpoint (along the container axis) lies at or
    /// beyond the ghost's midpoint, with the placeholder counted out.
    fn calculate_index(&self, tree: &VisualTree<K>, ghost_rect: Rect) -> usize {
        let children = tree.children(self.container);
        if children.is_empty() {
            return 0;
        }

        let ghost_mid = ghost_rect.midpoint_along(self.axis);
        let mut placeholder_before = 0usize;

        for (i, &child) in children.iter().enumerate() {
            let child_mid = tree.effective_rect(child).midpoint_along(self.axis);
            if ghost_mid <= child_mid {
                return i.saturating_sub(placeholder_before);
            }
            if Some(child) == self.placeholder {
                placeholder_before = 1;
            }
        }

        children.len() - placeholder_before
    }
}
