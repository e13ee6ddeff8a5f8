use pinboard_core::{
    Board, CardRepository, CoordinatorError, EntityKind, IntegrityCoordinator, ListRepository,
    MemoryCardStore, MemoryListStore, SharedBoard, Status, ValidationError,
};
use std::collections::HashSet;
use std::thread;
use uuid::Uuid;

fn setup() -> IntegrityCoordinator {
    IntegrityCoordinator::in_memory()
}

#[test]
fn created_card_reads_back_identically() {
    let coordinator = setup();

    let card = coordinator
        .create_card("Task One", "This is card one")
        .unwrap();
    assert!(!card.id.is_nil());

    let loaded = coordinator.get_card(card.id).unwrap();
    assert_eq!(loaded, card);
    assert_eq!(coordinator.list_cards().unwrap(), vec![card]);
}

#[test]
fn whitespace_only_fields_count_as_text_and_are_stored_as_given() {
    let coordinator = setup();

    let card = coordinator.create_card(" ", "\t").unwrap();
    assert_eq!(coordinator.get_card(card.id).unwrap().title, " ");
    assert_eq!(card.content, "\t");

    let list = coordinator.create_list("  ", vec![card.id]).unwrap();
    assert_eq!(coordinator.get_list(list.id).unwrap().header, "  ");
}

#[test]
fn create_card_requires_title_and_content() {
    let coordinator = setup();

    let err = coordinator.create_card("", "body").unwrap_err();
    assert_eq!(err, CoordinatorError::Validation(ValidationError::MissingTitle));
    let err = coordinator.create_card("title", "").unwrap_err();
    assert_eq!(
        err,
        CoordinatorError::Validation(ValidationError::MissingContent)
    );
    assert!(coordinator.list_cards().unwrap().is_empty());
}

#[test]
fn ids_stay_unique_across_many_creates() {
    let coordinator = setup();
    let mut card_ids = HashSet::new();
    let mut list_ids = HashSet::new();

    for index in 0..200 {
        let card = coordinator
            .create_card(&format!("card {index}"), "body")
            .unwrap();
        assert!(card_ids.insert(card.id));
        let list = coordinator
            .create_list(&format!("list {index}"), vec![card.id])
            .unwrap();
        assert!(list_ids.insert(list.id));
    }

    assert_eq!(coordinator.list_cards().unwrap().len(), 200);
    assert_eq!(coordinator.list_lists().unwrap().len(), 200);
}

#[test]
fn listing_preserves_insertion_order() {
    let coordinator = setup();
    let first = coordinator.create_card("first", "1").unwrap();
    let second = coordinator.create_card("second", "2").unwrap();
    let third = coordinator.create_card("third", "3").unwrap();
    coordinator.delete_card(second.id).unwrap();

    let ids: Vec<Uuid> = coordinator
        .list_cards()
        .unwrap()
        .into_iter()
        .map(|card| card.id)
        .collect();
    assert_eq!(ids, vec![first.id, third.id]);
}

#[test]
fn create_list_succeeds_only_when_every_reference_resolves() {
    let coordinator = setup();
    let a = coordinator.create_card("A", "a").unwrap();
    let b = coordinator.create_card("B", "b").unwrap();
    let ghost = Uuid::new_v4();

    let err = coordinator
        .create_list("Mixed", vec![a.id, ghost, b.id])
        .unwrap_err();
    assert_eq!(
        err,
        CoordinatorError::Validation(ValidationError::UnknownCard(ghost.to_string()))
    );
    assert!(coordinator.list_lists().unwrap().is_empty());

    let list = coordinator.create_list("Valid", vec![b.id, a.id]).unwrap();
    assert_eq!(list.card_ids, vec![b.id, a.id]);
    assert_eq!(coordinator.list_lists().unwrap().len(), 1);
}

#[test]
fn create_list_checks_header_before_references() {
    let coordinator = setup();

    let err = coordinator
        .create_list("", vec![Uuid::new_v4()])
        .unwrap_err();
    assert_eq!(
        err,
        CoordinatorError::Validation(ValidationError::MissingHeader)
    );
}

#[test]
fn create_list_accepts_empty_references() {
    let coordinator = setup();

    let list = coordinator.create_list("Empty", Vec::new()).unwrap();
    assert!(list.card_ids.is_empty());
    assert_eq!(coordinator.get_list(list.id).unwrap(), list);
}

#[test]
fn delete_card_cascades_into_every_referencing_list() {
    let coordinator = setup();
    let a = coordinator.create_card("A", "a").unwrap();
    let b = coordinator.create_card("B", "b").unwrap();
    let c = coordinator.create_card("C", "c").unwrap();

    let with_a = coordinator
        .create_list("with a", vec![b.id, a.id, c.id, a.id])
        .unwrap();
    let only_a = coordinator.create_list("only a", vec![a.id]).unwrap();
    let without_a = coordinator.create_list("without a", vec![c.id, b.id]).unwrap();

    coordinator.delete_card(a.id).unwrap();

    assert_eq!(
        coordinator.get_list(with_a.id).unwrap().card_ids,
        vec![b.id, c.id]
    );
    assert!(coordinator.get_list(only_a.id).unwrap().card_ids.is_empty());
    assert_eq!(coordinator.get_list(without_a.id).unwrap(), without_a);
    assert!(coordinator
        .snapshot()
        .unwrap()
        .dangling_references()
        .is_empty());
}

#[test]
fn duplicate_references_are_kept_and_removed_together() {
    let coordinator = setup();
    let a = coordinator.create_card("A", "a").unwrap();

    let list = coordinator.create_list("Twice", vec![a.id, a.id]).unwrap();
    assert_eq!(list.card_ids, vec![a.id, a.id]);

    coordinator.delete_card(a.id).unwrap();
    assert!(coordinator.get_list(list.id).unwrap().card_ids.is_empty());
}

#[test]
fn second_delete_reports_not_found() {
    let coordinator = setup();
    let card = coordinator.create_card("A", "a").unwrap();
    let list = coordinator.create_list("L", Vec::new()).unwrap();

    coordinator.delete_card(card.id).unwrap();
    assert_eq!(
        coordinator.delete_card(card.id).unwrap_err(),
        CoordinatorError::not_found(EntityKind::Card, card.id)
    );

    coordinator.delete_list(list.id).unwrap();
    assert_eq!(
        coordinator.delete_list(list.id).unwrap_err(),
        CoordinatorError::not_found(EntityKind::List, list.id)
    );
}

#[test]
fn deleting_missing_card_leaves_lists_untouched() {
    let coordinator = setup();
    let a = coordinator.create_card("A", "a").unwrap();
    let list = coordinator.create_list("L", vec![a.id]).unwrap();

    let err = coordinator.delete_card(Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, CoordinatorError::NotFound { kind: EntityKind::Card, .. }));
    assert_eq!(coordinator.get_list(list.id).unwrap(), list);
}

#[test]
fn deleting_a_list_keeps_its_cards() {
    let coordinator = setup();
    let a = coordinator.create_card("A", "a").unwrap();
    let list = coordinator.create_list("L", vec![a.id]).unwrap();

    coordinator.delete_list(list.id).unwrap();

    assert_eq!(coordinator.get_card(a.id).unwrap(), a);
    assert!(matches!(
        coordinator.get_list(list.id).unwrap_err(),
        CoordinatorError::NotFound { kind: EntityKind::List, .. }
    ));
}

#[test]
fn seed_demo_creates_linked_card_and_list() {
    let coordinator = setup();

    let (card, list) = coordinator.seed_demo().unwrap();
    assert_eq!(card.title, "Task One");
    assert_eq!(card.content, "This is card one");
    assert_eq!(list.header, "List One");
    assert_eq!(list.card_ids, vec![card.id]);
}

#[test]
fn coordinator_works_over_an_injected_board() {
    let board = SharedBoard::new(Board::new(MemoryCardStore::new(), MemoryListStore::new()));
    let coordinator = IntegrityCoordinator::new(board.clone());

    let card = coordinator.create_card("A", "a").unwrap();
    coordinator.create_list("L", vec![card.id]).unwrap();

    let guard = board.read().unwrap();
    assert_eq!(guard.cards().card_count(), 1);
    assert_eq!(guard.lists().list_count(), 1);
}

#[test]
fn operations_after_a_panicked_writer_report_inconsistent_state() {
    let coordinator = setup();
    let card = coordinator.create_card("A", "a").unwrap();

    let board = coordinator.board().clone();
    let _ = thread::spawn(move || {
        let _guard = board.write().unwrap();
        panic!("writer panics while holding the board lock");
    })
    .join();

    let expected = CoordinatorError::InconsistentState("board lock poisoned");
    assert_eq!(Status::for_error(&expected).code(), 500);
    assert_eq!(coordinator.create_card("B", "b").unwrap_err(), expected);
    assert_eq!(coordinator.delete_card(card.id).unwrap_err(), expected);
    assert_eq!(coordinator.get_card(card.id).unwrap_err(), expected);
    assert_eq!(coordinator.list_lists().unwrap_err(), expected);
    assert_eq!(
        coordinator.create_list("L", vec![card.id]).unwrap_err(),
        expected
    );
}
