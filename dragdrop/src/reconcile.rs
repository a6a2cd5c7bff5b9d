use alloc::vec::Vec;

use crate::key::KeyMap;
use crate::{NodeId, StableKey, VisualTree};

/// Counters describing one reconciliation pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ReconcileStats {
    pub created: usize,
    pub reused: usize,
    pub removed: usize,
    pub moved: usize,
}

/// Outcome of [`reconcile`]: pass statistics plus the obsolete nodes.
///
/// Obsolete nodes are detached, not freed. Hand the tree to a
/// [`FlipEngine`](crate::FlipEngine) cycle first if they should fade
/// out; any node the engine does not adopt must be freed by the caller.
#[derive(Clone, Debug)]
pub struct ReconcileResult {
    pub stats: ReconcileStats,
    pub detached: Vec<NodeId>,
}

/// Matches the children of `container` against `entities` by stable key.
///
/// Keyed children whose key matches an entity are kept and refreshed in
/// place; entities without a match get a fresh node from `create`;
/// children with no matching entity are detached. A final positional
/// pass reorders survivors to entity order with minimal moves, so a node
/// carrying transient state (an in-flight animation, a focus mark) never
/// loses it to an unrelated insertion above it.
pub fn reconcile<K, E>(
    tree: &mut VisualTree<K>,
    container: NodeId,
    entities: &[E],
    key_of: impl Fn(&E) -> K,
    mut create: impl FnMut(&mut VisualTree<K>, &E) -> NodeId,
    mut refresh: impl FnMut(&mut VisualTree<K>, NodeId, &E),
) -> ReconcileResult
where
    K: StableKey,
{
    let mut stats = ReconcileStats::default();

    let mut by_key: KeyMap<K, NodeId> = KeyMap::new();
    let mut obsolete: Vec<NodeId> = Vec::new();
    for &child in tree.children(container) {
        if let Some(key) = tree.key(child) {
            by_key.insert(key.clone(), child);
        }
        obsolete.push(child);
    }

    let mut desired: Vec<NodeId> = Vec::with_capacity(entities.len());
    for entity in entities {
        let key = key_of(entity);
        let node = match by_key.get(&key) {
            Some(&existing) => {
                obsolete.retain(|&id| id != existing);
                stats.reused += 1;
                existing
            }
            None => {
                let fresh = create(tree, entity);
                if let Some(node) = tree.node_mut(fresh) {
                    node.key = Some(key);
                }
                tree.attach(fresh, container);
                stats.created += 1;
                fresh
            }
        };
        refresh(tree, node, entity);
        desired.push(node);
    }

    for &id in &obsolete {
        tree.detach(id);
        stats.removed += 1;
    }

    // Positional pass: only children out of place move, so untouched
    // prefixes and suffixes keep their slots.
    for (index, &node) in desired.iter().enumerate() {
        if tree.children(container).get(index) != Some(&node) {
            tree.insert_at(container, index, node);
            stats.moved += 1;
        }
    }

    ddtrace!(
        created = stats.created,
        reused = stats.reused,
        removed = stats.removed,
        moved = stats.moved,
        "reconciled container"
    );

    ReconcileResult {
        stats,
        detached: obsolete,
    }
}
