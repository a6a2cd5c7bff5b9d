use alloc::vec::Vec;
use core::cmp::Ordering;

use crate::{NodeFlags, NodeId, Point, VisualTree};

/// Resolves the best drop target for a point.
///
/// Candidates are the live `DROP_TARGET` nodes of the tree. Each is ranked
/// by squared distance from the point to its displayed rectangle (zero
/// when the point is inside); candidates farther than `drop_range` are
/// discarded. When the point is inside two candidates at once, the more
/// specific one wins: a region that is a descendant of another region
/// ranks before its ancestor.
///
/// This is a pure query; callers re-run it every movement tick and are
/// responsible for deduplicating enter/leave notifications.
pub fn resolve_target<K>(tree: &VisualTree<K>, point: Point, drop_range: f64) -> Option<NodeId> {
    let range_squared = drop_range * drop_range;
    let mut candidates: Vec<(NodeId, f64)> = Vec::new();

    tree.for_each_descendant(tree.root(), |id, node| {
        if !node.flags.contains(NodeFlags::DROP_TARGET) {
            return;
        }
        let distance_squared = tree.effective_rect(id).distance_squared(point);
        if distance_squared > range_squared {
            return;
        }
        candidates.push((id, distance_squared));
    });

    candidates.sort_by(|a, b| {
        if a.1 == 0.0 && b.1 == 0.0 {
            // The point is inside both rectangles; prefer the inner region.
            return if tree.is_ancestor(a.0, b.0) {
                Ordering::Greater
            } else if tree.is_ancestor(b.0, a.0) {
                Ordering::Less
            } else {
                Ordering::Equal
            };
        }
        a.1.total_cmp(&b.1)
    });

    candidates.first().map(|&(id, _)| id)
}
