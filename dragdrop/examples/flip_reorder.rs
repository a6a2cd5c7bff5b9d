// Example: FLIP transitions across a keyed re-render.
use dragdrop::{Axis, FlipEngine, FlipOptions, Point, Rect, VisualTree, reconcile};

fn main() {
    let mut tree: VisualTree<u64> = VisualTree::new();
    let root = tree.root();
    let list = tree.create(None);
    tree.attach(list, root);

    let mut flip: FlipEngine<u64> =
        FlipEngine::new(FlipOptions::default().with_initial_delay_ms(0));

    let render = |tree: &mut VisualTree<u64>, flip: &mut FlipEngine<u64>, order: &[u64]| {
        flip.before_change(tree);
        let result = reconcile(
            tree,
            list,
            order,
            |&k| k,
            |tree, _| {
                let node = tree.create(None);
                tree.set_rect(node, Rect::new(0.0, 0.0, 120.0, 30.0));
                node
            },
            |_, _, _| {},
        );
        tree.layout_stack(list, Axis::Vertical, Point::ZERO, 4.0);
        let adopted = flip.after_change(tree);
        for id in result.detached {
            if !adopted.contains(&id) {
                tree.free(id);
            }
        }
    };

    render(&mut tree, &mut flip, &[1, 2, 3]);
    render(&mut tree, &mut flip, &[3, 1, 2]);

    // Items still display where they were; the release plays over time.
    for now in [0u64, 16, 66, 116, 166, 216] {
        flip.tick(&mut tree, now);
        let displayed: Vec<f64> = tree
            .children(list)
            .iter()
            .map(|&c| tree.effective_rect(c).top)
            .collect();
        println!("t={now:>3}ms tops={displayed:?}");
    }
}
