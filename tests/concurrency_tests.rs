#![cfg(feature = "std")]

use std::sync::Barrier;
use std::thread;

use woodland_battleship::{IdentityKey, Layout, MatchError, Phase, PieceSet, Role, SharedMatch};

#[test]
fn racing_registrations_seat_exactly_two() {
    let shared = SharedMatch::default();
    let barrier = Barrier::new(8);
    let results: Vec<_> = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let (shared, barrier) = (&shared, &barrier);
                s.spawn(move || {
                    barrier.wait();
                    shared.register(IdentityKey::new(format!("10.0.0.{}", i)))
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).collect()
    });

    let mut roles: Vec<Role> = results
        .iter()
        .filter_map(|r| r.as_ref().ok().map(|reg| reg.role))
        .collect();
    roles.sort_by_key(|r| r.name());
    assert_eq!(roles, vec![Role::Badger, Role::Fox]);
    assert_eq!(
        results
            .iter()
            .filter(|r| **r == Err(MatchError::MatchFull))
            .count(),
        6
    );
    assert_eq!(shared.phase(), Phase::AwaitingLayouts);
}

#[test]
fn racing_layouts_accept_one() {
    let shared = SharedMatch::default();
    let fox = IdentityKey::from("10.0.0.1");
    shared.register(fox.clone()).unwrap();
    let layout = Layout::columns(&PieceSet::standard());
    let barrier = Barrier::new(4);

    let accepted = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                s.spawn(|| {
                    barrier.wait();
                    shared.submit_layout(&fox, "fox", Some(&layout))
                })
            })
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.is_ok())
            .count()
    });
    assert_eq!(accepted, 1);
}

#[test]
fn racing_shots_at_one_cell_record_it_once() {
    let shared = SharedMatch::default();
    let (fox, badger) = (IdentityKey::from("10.0.0.1"), IdentityKey::from("10.0.0.2"));
    shared.register(fox.clone()).unwrap();
    shared.register(badger.clone()).unwrap();
    let layout = Layout::columns(&PieceSet::standard());
    shared.submit_layout(&fox, "fox", Some(&layout)).unwrap();
    shared.submit_layout(&badger, "badger", Some(&layout)).unwrap();

    let repeats = thread::scope(|s| {
        let handles: Vec<_> = (0..4)
            .map(|_| s.spawn(|| shared.submit_shot(&fox, (4, 0)).unwrap()))
            .collect();
        handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|r| r.repeated)
            .count()
    });
    assert_eq!(repeats, 3);
    let snapshot = shared.snapshot();
    assert_eq!(snapshot.participants()[0].shots().len(), 1);
}
