use crate::*;

use alloc::string::{String, ToString};
use alloc::vec;
use alloc::vec::Vec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dragdrop::{FlipOptions, NodeFlags, Point, Pointer, PointerButton, SortableEvent};

fn mouse() -> Pointer {
    Pointer::Mouse {
        button: PointerButton::Primary,
    }
}

fn test_list() -> SortableList<u64> {
    SortableList::new(
        SortableListOptions::new()
            .with_flip(FlipOptions::default().with_initial_delay_ms(0)),
    )
}

fn row_size(_: &u64) -> (f64, f64) {
    (100.0, 40.0)
}

fn child_keys(list: &SortableList<u64>) -> Vec<Option<u64>> {
    list.tree()
        .children(list.container())
        .iter()
        .map(|&c| list.tree().key(c).copied())
        .collect()
}

// ------------------------------------------------------------ controller

#[test]
fn sync_lays_out_and_sizes_container() {
    let mut list = test_list();
    list.sync(&[1u64, 2, 3], |&e| e, row_size);

    let tops: Vec<f64> = list
        .tree()
        .children(list.container())
        .iter()
        .map(|&c| list.tree().rect(c).top)
        .collect();
    assert_eq!(tops, vec![0.0, 40.0, 80.0]);
    assert_eq!(list.tree().rect(list.container()).bottom, 120.0);
    assert_eq!(child_keys(&list), vec![Some(1), Some(2), Some(3)]);
}

#[test]
fn drag_to_end_commits_and_resyncs() {
    let mut list = test_list();
    let mut entities = vec![1u64, 2, 3];
    list.sync(&entities, |&e| e, row_size);

    assert!(list.pointer_down(&1, Point::new(50.0, 10.0), mouse(), 0));
    let events = list.pointer_move(Point::new(50.0, 115.0), 10);
    assert!(events
        .iter()
        .any(|e| matches!(e, SortableEvent::Preview { index: Some(_), .. })));
    assert!(list.is_dragging());
    // The dragged original has left the container; the placeholder holds
    // its pending slot.
    assert!(list.node_for(&1).is_none());

    let events = list.pointer_up(20);
    let Some(SortableEvent::Commit { key, index, .. }) = events.first() else {
        panic!("expected a commit");
    };
    assert_eq!(*key, 1);
    assert!(list.suppresses_click());

    let at = (*index).min(entities.len() - 1);
    entities.retain(|e| e != key);
    entities.insert(at.min(entities.len()), *key);
    assert_eq!(entities, vec![2, 3, 1]);

    list.sync(&entities, |&e| e, row_size);
    assert_eq!(child_keys(&list), vec![Some(2), Some(3), Some(1)]);
    // No placeholder survives the round trip.
    assert!(!list
        .tree()
        .children(list.container())
        .iter()
        .any(|&c| list.tree().flags(c).contains(NodeFlags::PLACEHOLDER)));
}

#[test]
fn resync_animates_moves_and_appearances() {
    let mut list = test_list();
    list.sync(&[1u64, 2], |&e| e, row_size);

    list.sync(&[2u64, 1, 3], |&e| e, row_size);
    assert!(list.is_animating());

    let n1 = list.node_for(&1).unwrap();
    let n2 = list.node_for(&2).unwrap();
    let n3 = list.node_for(&3).unwrap();
    // Still displayed at the old positions right after the swap.
    assert_eq!(list.tree().effective_rect(n1).top, 0.0);
    assert_eq!(list.tree().effective_rect(n2).top, 40.0);
    // The newcomer starts invisible.
    assert_eq!(list.tree().opacity(n3), 0.0);

    for now in [0u64, 16, 116, 216, 416] {
        list.tick(now);
    }
    assert!(!list.is_animating());
    assert_eq!(list.tree().effective_rect(n1).top, 40.0);
    assert_eq!(list.tree().effective_rect(n2).top, 0.0);
    assert_eq!(list.tree().opacity(n3), 1.0);
}

#[test]
fn removed_entity_fades_out_in_place() {
    let mut list = test_list();
    list.sync(&[1u64, 2], |&e| e, row_size);
    let n1 = list.node_for(&1).unwrap();

    list.sync(&[2u64], |&e| e, row_size);
    // Resurrected at its old rectangle, floating over the list.
    assert!(list.tree().contains(n1));
    assert!(list.tree().flags(n1).contains(NodeFlags::FLOATING));
    assert_eq!(list.tree().rect(n1).top, 0.0);

    for now in [0u64, 16, 116, 216, 416] {
        list.tick(now);
    }
    assert!(!list.tree().contains(n1));
}

#[test]
fn abandoned_drag_cancels_cleanly() {
    let mut list = test_list();
    list.sync(&[1u64, 2, 3], |&e| e, row_size);

    list.pointer_down(&2, Point::new(50.0, 60.0), mouse(), 0);
    list.pointer_move(Point::new(50.0, 100.0), 10);
    // Way outside the container and its drop range.
    list.pointer_move(Point::new(900.0, 900.0), 20);
    let events = list.pointer_up(30);
    assert!(!events
        .iter()
        .any(|e| matches!(e, SortableEvent::Commit { .. })));
    assert!(!list.is_dragging());
}

// ----------------------------------------------------------------- store

#[test]
fn store_reduces_and_notifies() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let seen_in_callback = Arc::clone(&seen);

    let mut store = Store::new(0i64, |state: &i64, action: &i64| state + action)
        .with_on_change(move |state: &i64| {
            seen_in_callback.lock().unwrap().push(*state);
        });

    store.dispatch(&5);
    store.dispatch(&-2);
    assert_eq!(*store.state(), 3);
    assert_eq!(*seen.lock().unwrap(), vec![5, 3]);

    assert!(store.take_dirty());
    assert!(!store.is_dirty());

    store.replace(100);
    assert_eq!(*store.state(), 100);
    assert!(!store.is_dirty());
}

#[test]
fn debounced_saver_collapses_bursts() {
    let mut saver = DebouncedSaver::new(100);
    assert!(!saver.tick(0));

    saver.mark_dirty(0);
    saver.mark_dirty(50);
    assert!(saver.is_pending());
    // The second edit pushed the deadline out.
    assert!(!saver.tick(120));
    assert!(saver.tick(150));
    assert!(!saver.is_pending());
    assert!(!saver.tick(151));

    saver.mark_dirty(200);
    assert!(saver.flush());
    assert!(!saver.tick(1000));
}

#[cfg(feature = "serde")]
#[test]
fn json_persistence_round_trips_and_survives_corruption() {
    #[derive(Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
    struct State {
        items: Vec<String>,
    }

    let mut persistence = MemoryPersistence::new();
    // Nothing saved yet: the default comes back.
    let state: State = load_json(&mut persistence);
    assert_eq!(state, State::default());

    let state = State {
        items: vec!["water the plants".to_string()],
    };
    save_json(&mut persistence, &state);
    let loaded: State = load_json(&mut persistence);
    assert_eq!(loaded, state);

    persistence.save("{not json");
    let recovered: State = load_json(&mut persistence);
    assert_eq!(recovered, State::default());
}

// ----------------------------------------------------------------- dates

#[test]
fn date_id_round_trips() {
    let date = Date::new(2026, 8, 29);
    assert_eq!(date.id(), "2026-08-29");
    assert_eq!(Date::parse_id("2026-08-29"), Some(date));

    assert_eq!(Date::parse_id(""), None);
    assert_eq!(Date::parse_id("2026-13-01"), None);
    assert_eq!(Date::parse_id("2026-08"), None);
    assert_eq!(Date::parse_id("not-a-date"), None);
}

#[test]
fn date_ids_sort_chronologically() {
    let mut ids: Vec<String> = vec![
        Date::new(2026, 8, 29).id(),
        Date::new(2025, 12, 31).id(),
        Date::new(2026, 1, 2).id(),
    ];
    ids.sort();
    assert_eq!(ids, vec!["2025-12-31", "2026-01-02", "2026-08-29"]);
}

#[test]
fn weekdays_match_known_dates() {
    assert_eq!(Date::new(2000, 1, 1).weekday_name(), "Saturday");
    assert_eq!(Date::new(2026, 8, 29).weekday_name(), "Saturday");
    assert_eq!(Date::new(2026, 8, 31).weekday_name(), "Monday");
    assert_eq!(Date::new(1999, 2, 28).weekday_name(), "Sunday");
}

#[test]
fn long_format_uses_ordinals() {
    assert_eq!(
        Date::new(2026, 8, 29).format_long(),
        "Saturday, August 29th"
    );
    assert_eq!(Date::new(2026, 3, 1).format_long(), "Sunday, March 1st");
    assert_eq!(Date::new(2026, 3, 22).format_long(), "Sunday, March 22nd");
}

#[test]
fn ordinal_suffixes_handle_teens() {
    assert_eq!(ordinal_suffix(1), "st");
    assert_eq!(ordinal_suffix(2), "nd");
    assert_eq!(ordinal_suffix(3), "rd");
    assert_eq!(ordinal_suffix(4), "th");
    assert_eq!(ordinal_suffix(11), "th");
    assert_eq!(ordinal_suffix(12), "th");
    assert_eq!(ordinal_suffix(13), "th");
    assert_eq!(ordinal_suffix(21), "st");
    assert_eq!(ordinal_suffix(23), "rd");
    assert_eq!(ordinal_suffix(31), "st");
}

// ----------------------------------------------------------------- icons

#[test]
fn icon_cache_loads_each_id_once() {
    let calls = Arc::new(AtomicUsize::new(0));
    let calls_in_loader = Arc::clone(&calls);

    let mut cache = IconCache::new(move |id: &str| {
        calls_in_loader.fetch_add(1, Ordering::SeqCst);
        if id == "check" {
            Some("<svg>check</svg>".to_string())
        } else {
            None
        }
    });

    assert_eq!(cache.get("check"), Some("<svg>check</svg>"));
    assert_eq!(cache.get("check"), Some("<svg>check</svg>"));
    assert_eq!(calls.load(Ordering::SeqCst), 1);

    // Failures are cached too.
    assert_eq!(cache.get("missing"), None);
    assert_eq!(cache.get("missing"), None);
    assert_eq!(calls.load(Ordering::SeqCst), 2);
    assert!(cache.is_cached("missing"));
    assert_eq!(cache.len(), 2);
}
