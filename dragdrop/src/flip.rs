use alloc::vec::Vec;

use crate::key::KeyMap;
use crate::{FlipOptions, NodeFlags, NodeId, Rect, StableKey, Tween, Vec2, VisualTree};

/// One tracked node's geometry at a point in time.
#[derive(Clone, Debug)]
pub struct SnapshotEntry<K> {
    pub node: NodeId,
    /// Resting screen rectangle (semantic transforms applied, engine
    /// inverse transforms stripped).
    pub rect: Rect,
    /// The node's own semantic transform at capture time.
    pub transform: Vec2,
    /// Key of the nearest tracked ancestor, if any; a child's delta is
    /// computed relative to its moving ancestor, not the viewport.
    pub ancestor: Option<K>,
}

/// Geometry of every tracked node, captured at one instant.
///
/// Exactly two snapshots exist during a transition cycle: "before" and
/// "after", built from the same tracking rule (keyed nodes not flagged
/// `NO_ANIMATE`) evaluated across a tree mutation.
#[derive(Clone, Debug)]
pub struct Snapshot<K> {
    entries: KeyMap<K, SnapshotEntry<K>>,
}

impl<K: StableKey> Snapshot<K> {
    pub fn capture(tree: &VisualTree<K>) -> Self {
        let mut entries: KeyMap<K, SnapshotEntry<K>> = KeyMap::new();

        tree.for_each_descendant(tree.root(), |id, node| {
            let Some(key) = &node.key else {
                return;
            };
            if node.flags.contains(NodeFlags::NO_ANIMATE) {
                return;
            }
            if entries.contains_key(key) {
                ddwarn!("duplicate stable key in snapshot; keeping the first");
                return;
            }
            entries.insert(
                key.clone(),
                SnapshotEntry {
                    node: id,
                    rect: tree.resting_rect(id),
                    transform: node.transform,
                    ancestor: None,
                },
            );
        });

        let ancestors: Vec<(K, K)> = entries
            .iter()
            .filter_map(|(key, entry)| {
                let ancestor = tree.nearest_tracked_ancestor(entry.node)?;
                let ancestor_key = tree.key(ancestor)?;
                Some((key.clone(), ancestor_key.clone()))
            })
            .collect();
        for (key, ancestor_key) in ancestors {
            if let Some(entry) = entries.get_mut(&key) {
                entry.ancestor = Some(ancestor_key);
            }
        }

        Self { entries }
    }

    pub fn get(&self, key: &K) -> Option<&SnapshotEntry<K>> {
        self.entries.get(key)
    }

    pub fn contains(&self, key: &K) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
enum AnimKind {
    /// Inverse transform shrinking back to rest.
    Move { from: Vec2 },
    /// Fade from transparent to natural appearance.
    Appear,
    /// Fade out a resurrected node, then free it.
    Remove { detach_at: Option<u64> },
}

#[derive(Clone, Copy, Debug)]
enum Phase {
    /// The inverted state must be observable before the release plays;
    /// otherwise the jump and the release coalesce into nothing.
    Delay { frames: u8 },
    Play { tween: Tween },
}

#[derive(Clone, Copy, Debug)]
struct Animation {
    node: NodeId,
    kind: AnimKind,
    phase: Phase,
}

const PRE_PLAY_FRAMES: u8 = 2;

/// First-Last-Invert-Play transitions over a [`VisualTree`].
///
/// Wrap any burst of tree mutations in [`FlipEngine::before_change`] /
/// [`FlipEngine::after_change`]; the engine diffs keyed geometry across
/// the mutation and plays move, appear, and removal animations on
/// subsequent [`FlipEngine::tick`]s. Nested before/after pairs inside
/// one synchronous update are no-ops, so independent mutation sources
/// share a single animation pass.
#[derive(Clone, Debug)]
pub struct FlipEngine<K> {
    options: FlipOptions,
    enabled: bool,
    enable_at: Option<u64>,
    level: usize,
    first: Option<Snapshot<K>>,
    animations: Vec<Animation>,
}

impl<K: StableKey> FlipEngine<K> {
    pub fn new(options: FlipOptions) -> Self {
        Self {
            enabled: options.initial_delay_ms == 0,
            enable_at: None,
            level: 0,
            first: None,
            animations: Vec::new(),
            options,
        }
    }

    pub fn options(&self) -> &FlipOptions {
        &self.options
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_animating(&self) -> bool {
        !self.animations.is_empty()
    }

    /// Call strictly before mutating the tree. Only the outermost call of
    /// a cycle takes the "before" snapshot.
    pub fn before_change(&mut self, tree: &VisualTree<K>) {
        if !self.enabled {
            return;
        }
        self.level += 1;
        if self.level > 1 {
            return;
        }
        self.first = Some(Snapshot::capture(tree));
    }

    /// Call after the mutation. The outermost call takes the "after"
    /// snapshot, resurrects removed nodes for their fade-out, and applies
    /// inverse transforms for moved/appeared nodes.
    ///
    /// Returns the node ids adopted for removal animation; any other node
    /// the caller detached is its own to free.
    pub fn after_change(&mut self, tree: &mut VisualTree<K>) -> Vec<NodeId> {
        if !self.enabled {
            return Vec::new();
        }
        if self.level == 0 {
            ddwarn!("after_change without matching before_change");
            return Vec::new();
        }
        self.level -= 1;
        if self.level > 0 {
            return Vec::new();
        }
        let Some(first) = self.first.take() else {
            return Vec::new();
        };
        let last = Snapshot::capture(tree);
        dddebug!(
            before = first.len(),
            after = last.len(),
            "flip cycle complete"
        );

        let adopted = self.invert_for_removal(tree, &first, &last);
        self.invert_for_animation(tree, &first, &last);
        adopted
    }

    /// Reinserts every removed node at its former screen rectangle, out
    /// of flow, ready to fade. A node covered by an ancestor that is
    /// itself being removed rides along with it instead.
    fn invert_for_removal(
        &mut self,
        tree: &mut VisualTree<K>,
        first: &Snapshot<K>,
        last: &Snapshot<K>,
    ) -> Vec<NodeId> {
        let mut adopted = Vec::new();

        for (key, entry) in first.entries.iter() {
            if !needs_removal(first, last, key) {
                continue;
            }
            let Some(node) = tree.node_mut(entry.node) else {
                // Already freed by the caller; nothing left to fade.
                continue;
            };
            node.rect = entry.rect;
            node.transform = Vec2::ZERO;
            node.invert = Vec2::ZERO;
            node.flags.insert(NodeFlags::FLOATING);
            tree.attach(entry.node, tree.root());

            self.animations.push(Animation {
                node: entry.node,
                kind: AnimKind::Remove { detach_at: None },
                phase: Phase::Delay {
                    frames: PRE_PLAY_FRAMES,
                },
            });
            adopted.push(entry.node);
        }

        adopted
    }

    /// "Invert": jump moved nodes back to their old position and make new
    /// nodes transparent, instantly. The release plays after the
    /// two-frame delay, on `tick`.
    fn invert_for_animation(
        &mut self,
        tree: &mut VisualTree<K>,
        first: &Snapshot<K>,
        last: &Snapshot<K>,
    ) {
        let mut deltas: KeyMap<K, Vec2> = KeyMap::new();

        for (key, entry) in last.entries.iter() {
            if first.contains(key) {
                let delta = ancestor_relative_delta(key, first, last, &mut deltas);
                if delta.is_zero() {
                    continue;
                }
                if let Some(node) = tree.node_mut(entry.node) {
                    node.invert = delta;
                }
                self.animations.push(Animation {
                    node: entry.node,
                    kind: AnimKind::Move { from: delta },
                    phase: Phase::Delay {
                        frames: PRE_PLAY_FRAMES,
                    },
                });
            } else {
                if let Some(node) = tree.node_mut(entry.node) {
                    node.opacity = 0.0;
                }
                self.animations.push(Animation {
                    node: entry.node,
                    kind: AnimKind::Appear,
                    phase: Phase::Delay {
                        frames: PRE_PLAY_FRAMES,
                    },
                });
            }
        }
    }

    /// Advances one animation frame. Also arms the initial-delay gate on
    /// the first call.
    pub fn tick(&mut self, tree: &mut VisualTree<K>, now_ms: u64) {
        if !self.enabled {
            match self.enable_at {
                None => self.enable_at = Some(now_ms + self.options.initial_delay_ms),
                Some(at) if now_ms >= at => self.enabled = true,
                Some(_) => {}
            }
        }

        let transition_ms = self.options.transition_ms;
        let remove_timeout_ms = self.options.remove_timeout_ms;
        let easing = self.options.easing;
        let mut finished: Vec<usize> = Vec::new();

        for (i, anim) in self.animations.iter_mut().enumerate() {
            match anim.phase {
                Phase::Delay { frames } => {
                    if frames > 1 {
                        anim.phase = Phase::Delay { frames: frames - 1 };
                        continue;
                    }
                    if let AnimKind::Remove { detach_at } = &mut anim.kind {
                        *detach_at = Some(now_ms + remove_timeout_ms);
                    }
                    anim.phase = Phase::Play {
                        tween: Tween::new(0.0, 1.0, now_ms, transition_ms, easing),
                    };
                }
                Phase::Play { tween } => {
                    let progress = tween.sample(now_ms);
                    let done = tween.is_done(now_ms);
                    match anim.kind {
                        AnimKind::Move { from } => {
                            if let Some(node) = tree.node_mut(anim.node) {
                                node.invert = if done {
                                    Vec2::ZERO
                                } else {
                                    from.scaled(1.0 - progress)
                                };
                            }
                            if done {
                                finished.push(i);
                            }
                        }
                        AnimKind::Appear => {
                            if let Some(node) = tree.node_mut(anim.node) {
                                node.opacity = if done { 1.0 } else { progress };
                            }
                            if done {
                                finished.push(i);
                            }
                        }
                        AnimKind::Remove { detach_at } => {
                            if let Some(node) = tree.node_mut(anim.node) {
                                node.opacity = (1.0 - progress).max(0.0);
                            }
                            if detach_at.map(|at| now_ms >= at).unwrap_or(false) {
                                tree.free(anim.node);
                                finished.push(i);
                            }
                        }
                    }
                }
            }
        }

        for i in finished.into_iter().rev() {
            self.animations.swap_remove(i);
        }
    }
}

fn needs_removal<K: StableKey>(first: &Snapshot<K>, last: &Snapshot<K>, key: &K) -> bool {
    let Some(entry) = first.get(key) else {
        return false;
    };
    if let Some(ancestor) = &entry.ancestor {
        if needs_removal(first, last, ancestor) {
            return false;
        }
    }
    !last.contains(key)
}

/// The inverse-transform delta for `key`, relative to its nearest moved
/// ancestor (transforms cascade, so a child must not re-apply movement
/// its ancestor already carries). Memoized: each delta is computed
/// exactly once per cycle.
fn ancestor_relative_delta<K: StableKey>(
    key: &K,
    first: &Snapshot<K>,
    last: &Snapshot<K>,
    deltas: &mut KeyMap<K, Vec2>,
) -> Vec2 {
    if let Some(delta) = deltas.get(key) {
        return *delta;
    }

    let delta = match (first.get(key), last.get(key)) {
        (Some(before), Some(after)) => {
            let mut delta = before.rect.origin() - after.rect.origin();
            if let Some(ancestor) = &after.ancestor {
                delta = delta - ancestor_relative_delta(ancestor, first, last, deltas);
            }
            delta
        }
        // Appearing nodes carry no inverse transform.
        _ => Vec2::ZERO,
    };

    deltas.insert(key.clone(), delta);
    delta
}
