// Example: a full drag gesture over a sortable container, headlessly.
use dragdrop::{
    Axis, DragManager, DragOptions, NodeFlags, Point, Pointer, PointerButton, Rect, Sortable,
    VisualTree,
};

fn main() {
    let mut tree: VisualTree<&'static str> = VisualTree::new();
    let root = tree.root();

    let container = tree.create(None);
    tree.set_rect(container, Rect::new(0.0, 0.0, 200.0, 300.0));
    if let Some(node) = tree.node_mut(container) {
        node.flags.insert(NodeFlags::DROP_TARGET);
    }
    tree.attach(container, root);

    for (i, key) in ["alpha", "beta", "gamma"].into_iter().enumerate() {
        let item = tree.create(Some(key));
        let top = i as f64 * 100.0;
        tree.set_rect(item, Rect::new(0.0, top, 200.0, top + 100.0));
        tree.attach(item, container);
    }

    let mut drag = DragManager::new(DragOptions::default());
    let mut sortable: Sortable<&'static str> = Sortable::new(container, Axis::Vertical);

    let source = tree.children(container)[0];
    let press = Pointer::Mouse {
        button: PointerButton::Primary,
    };
    drag.pointer_down(&tree, source, Point::new(100.0, 50.0), press, 0);

    // Drag "alpha" down past "gamma", then release.
    for (point, now) in [
        (Point::new(100.0, 120.0), 16),
        (Point::new(100.0, 280.0), 100),
    ] {
        let events = drag.pointer_move(&mut tree, point, now);
        for event in &events {
            if let Some(out) = sortable.on_drag_event(&mut tree, &drag, event) {
                println!("{out:?}");
            }
        }
        // The Over heartbeat re-evaluates the insertion index.
        for event in &drag.tick(now) {
            if let Some(out) = sortable.on_drag_event(&mut tree, &drag, event) {
                println!("{out:?}");
            }
        }
    }

    let events = drag.pointer_up(&mut tree, 200);
    for event in &events {
        if let Some(out) = sortable.on_drag_event(&mut tree, &drag, event) {
            println!("{out:?}");
        }
    }
}
