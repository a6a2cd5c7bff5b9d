// Example: a reorderable todo list driven end to end through the
// controller, with reducer state and debounced saving.
use dragdrop::{Point, Pointer, PointerButton, SortableEvent};
use dragdrop_adapter::{
    Date, DebouncedSaver, MemoryPersistence, Persistence, SortableList, SortableListOptions, Store,
};

#[derive(Clone, Debug)]
enum Action {
    MoveTask { id: u64, to: usize },
}

fn reduce(tasks: &Vec<(u64, String)>, action: &Action) -> Vec<(u64, String)> {
    let mut next = tasks.clone();
    match action {
        Action::MoveTask { id, to } => {
            if let Some(from) = next.iter().position(|(k, _)| k == id) {
                let task = next.remove(from);
                next.insert((*to).min(next.len()), task);
            }
        }
    }
    next
}

fn main() {
    println!("{}", Date::new(2026, 8, 29).format_long());

    let mut store = Store::new(
        vec![
            (1u64, "water the plants".to_string()),
            (2, "fix the gate".to_string()),
            (3, "call the plumber".to_string()),
        ],
        reduce,
    );
    let mut saver = DebouncedSaver::new(100);
    let mut persistence = MemoryPersistence::new();

    let mut list: SortableList<u64> = SortableList::new(SortableListOptions::new().with_gap(4.0));
    let sync = |list: &mut SortableList<u64>, tasks: &[(u64, String)]| {
        list.sync(tasks, |(k, _)| *k, |_| (240.0, 32.0));
    };
    sync(&mut list, store.state());

    // Drag task 1 below task 3.
    let press = Pointer::Mouse {
        button: PointerButton::Primary,
    };
    list.pointer_down(&1, Point::new(120.0, 16.0), press, 0);
    list.pointer_move(Point::new(120.0, 100.0), 16);
    for event in list.pointer_up(32) {
        if let SortableEvent::Commit { key, index, .. } = event {
            println!("commit: task {key} to index {index}");
            store.dispatch(&Action::MoveTask { id: key, to: index });
        }
    }
    sync(&mut list, store.state());

    for (key, title) in store.state() {
        println!("  [{key}] {title}");
    }

    // Edits save once, 100ms after the burst settles.
    if store.take_dirty() {
        saver.mark_dirty(32);
    }
    for now in [48u64, 132] {
        list.tick(now);
        if saver.tick(now) {
            persistence.save(&format!("{:?}", store.state()));
            println!("saved at t={now}ms");
        }
    }
}
