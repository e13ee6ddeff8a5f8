use pinboard_core::{CoordinatorError, IntegrityCoordinator, ValidationError};
use std::sync::{Arc, Barrier};
use std::thread;

const ROUNDS: usize = 50;

#[test]
fn racing_create_list_and_delete_card_never_leave_dangling_references() {
    for _ in 0..ROUNDS {
        let coordinator = IntegrityCoordinator::in_memory();
        let card = coordinator.create_card("Contested", "card").unwrap();
        let barrier = Arc::new(Barrier::new(2));

        let creator = {
            let coordinator = coordinator.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                coordinator.create_list("Racing", vec![card.id, card.id])
            })
        };
        let deleter = {
            let coordinator = coordinator.clone();
            let barrier = Arc::clone(&barrier);
            thread::spawn(move || {
                barrier.wait();
                coordinator.delete_card(card.id)
            })
        };

        let created = creator.join().unwrap();
        deleter.join().unwrap().unwrap();

        match created {
            Ok(list) => {
                assert!(coordinator.get_list(list.id).unwrap().card_ids.is_empty());
            }
            Err(err) => {
                assert_eq!(
                    err,
                    CoordinatorError::Validation(ValidationError::UnknownCard(
                        card.id.to_string()
                    ))
                );
                assert!(coordinator.list_lists().unwrap().is_empty());
            }
        }
        assert!(coordinator
            .snapshot()
            .unwrap()
            .dangling_references()
            .is_empty());
    }
}

#[test]
fn readers_never_observe_a_half_applied_cascade() {
    let coordinator = IntegrityCoordinator::in_memory();
    let mut card_ids = Vec::new();
    for index in 0..40 {
        let card = coordinator
            .create_card(&format!("card {index}"), "body")
            .unwrap();
        card_ids.push(card.id);
    }
    for index in 0..10 {
        coordinator
            .create_list(&format!("list {index}"), card_ids.clone())
            .unwrap();
    }

    let deleter = {
        let coordinator = coordinator.clone();
        let card_ids = card_ids.clone();
        thread::spawn(move || {
            for card_id in card_ids {
                coordinator.delete_card(card_id).unwrap();
            }
        })
    };
    let readers: Vec<_> = (0..4)
        .map(|_| {
            let coordinator = coordinator.clone();
            thread::spawn(move || {
                for _ in 0..200 {
                    let snapshot = coordinator.snapshot().unwrap();
                    assert!(snapshot.dangling_references().is_empty());
                }
            })
        })
        .collect();

    deleter.join().unwrap();
    for reader in readers {
        reader.join().unwrap();
    }

    let snapshot = coordinator.snapshot().unwrap();
    assert!(snapshot.cards.is_empty());
    assert_eq!(snapshot.lists.len(), 10);
    assert!(snapshot.lists.iter().all(|list| list.card_ids.is_empty()));
}

#[test]
fn concurrent_creates_keep_every_record() {
    let coordinator = IntegrityCoordinator::in_memory();

    let writers: Vec<_> = (0..8)
        .map(|worker| {
            let coordinator = coordinator.clone();
            thread::spawn(move || {
                for index in 0..25 {
                    coordinator
                        .create_card(&format!("w{worker}-{index}"), "body")
                        .unwrap();
                }
            })
        })
        .collect();
    for writer in writers {
        writer.join().unwrap();
    }

    assert_eq!(coordinator.list_cards().unwrap().len(), 200);
}
