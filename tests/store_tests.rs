mod common;

use chapterdesk::{CopyStatus, FileStorage, Role, Store};
use common::date;
use std::fs;

fn open_dir(dir: &std::path::Path) -> Store {
    Store::open(FileStorage::open(dir).unwrap()).unwrap()
}

#[test]
fn test_first_run_seeds_and_writes_layout() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_dir(dir.path());

    assert_eq!(store.chapters.len(), 3);
    assert_eq!(store.members.len(), 6);
    assert_eq!(store.events.len(), 13);
    assert_eq!(store.books.len(), 2);
    assert_eq!(store.copies.len(), 3);
    assert_eq!(store.loans.len(), 1);
    assert_eq!(store.reports.len(), 3);
    assert!(store.session.is_none());

    for key in [
        "chapters",
        "members",
        "events",
        "attendances",
        "books",
        "copies",
        "loans",
        "reports",
    ] {
        assert!(dir.path().join(format!("{key}.json")).exists(), "{key}");
    }
}

#[test]
fn test_seeded_lookups() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_dir(dir.path());

    assert_eq!(store.chapter_name("c1"), Some("그랜드"));
    assert_eq!(store.chapter_name("zz"), None);
    assert_eq!(store.member("bni.sn").unwrap().role, Role::Master);
    assert_eq!(store.book("b2").unwrap().report_score, 20);
    assert_eq!(store.event("e13").unwrap().name, "리더십 포럼 1회");

    // Seeded overdue showcase loan.
    let c = store
        .copies
        .iter()
        .find(|c| c.registration_number == "000001")
        .unwrap();
    assert_eq!(c.status, CopyStatus::OnLoan);
    assert_eq!(c.due_date, Some(date(2024, 7, 15)));
}

#[test]
fn test_mutations_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        store.settle_deposit("01033333333").unwrap();
        store.return_copy("000001", date(2024, 7, 10)).unwrap();
        store.login("01011111111", "password").unwrap();
    }

    let store = open_dir(dir.path());
    assert_eq!(
        store.member("01033333333").unwrap().deposit_status,
        chapterdesk::DepositStatus::Ok
    );
    let c = store
        .copies
        .iter()
        .find(|c| c.registration_number == "000001")
        .unwrap();
    assert_eq!(c.status, CopyStatus::Available);
    assert_eq!(store.loans[0].return_date, Some(date(2024, 7, 10)));
    // The session slot also persists.
    assert_eq!(store.current_member().unwrap().phone, "01011111111");
}

#[test]
fn test_corrupt_slot_is_reseeded() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        store.delete_member("01044444444").unwrap();
    }
    fs::write(dir.path().join("members.json"), "{not json").unwrap();

    let store = open_dir(dir.path());
    // Corrupt members slot comes back as the seed set; intact slots are
    // left alone.
    assert_eq!(store.members.len(), 6);
    assert_eq!(store.events.len(), 13);
}

#[test]
fn test_corrupt_session_slot_is_cleared() {
    let dir = tempfile::tempdir().unwrap();
    {
        let mut store = open_dir(dir.path());
        store.login("01011111111", "password").unwrap();
    }
    fs::write(dir.path().join("session.json"), "[3]").unwrap();

    let store = open_dir(dir.path());
    assert!(store.session.is_none());
}

#[test]
fn test_stored_rows_keep_original_field_names() {
    let dir = tempfile::tempdir().unwrap();
    let _store = open_dir(dir.path());

    let members = fs::read_to_string(dir.path().join("members.json")).unwrap();
    assert!(members.contains("\"chapterId\""));
    assert!(members.contains("\"depositStatus\""));
    let copies = fs::read_to_string(dir.path().join("copies.json")).unwrap();
    assert!(copies.contains("\"registrationNumber\""));
    assert!(copies.contains("대여 중"));
    assert!(copies.contains("대여 가능"));
}

#[test]
fn test_debug_shows_counts_not_contents() {
    let dir = tempfile::tempdir().unwrap();
    let store = open_dir(dir.path());
    let rendered = format!("{store:?}");
    assert!(rendered.contains("members: 6"));
    assert!(!rendered.contains("password"));
}
