mod common;

use chapterdesk::{Error, NewEvent, ProgressField, Rejection};
use common::{attendance, blank_store, book, date, datetime, event, member, seeded_store};

fn training_store() -> chapterdesk::Store {
    let mut store = blank_store();
    store.members.push(member("0101", "갑", "c1"));
    store.events.push(event("e1", "MSP 기본", 3, datetime(2024, 7, 10, 9)));
    store
}

#[test]
fn test_add_event_gets_fresh_id() {
    let mut store = training_store();
    let id = store
        .add_event(NewEvent {
            name: "파워팀입문".to_string(),
            score: 2,
            date: datetime(2024, 8, 1, 9),
            end_date: Some(datetime(2024, 8, 1, 11)),
            instructor: None,
            location: None,
            price: None,
            category: chapterdesk::EventCategory::Training,
        })
        .unwrap();
    assert_ne!(id, "e1");
    assert!(store.events.iter().any(|e| e.event_id == id));
    assert_eq!(store.event_named("파워팀입문").unwrap().event_id, id);
}

#[test]
fn test_apply_then_duplicate_declined() {
    let mut store = training_store();
    let attendance_id = store.apply_for_event("0101", "e1").unwrap();

    let row = store
        .attendances
        .iter()
        .find(|a| a.attendance_id == attendance_id)
        .unwrap();
    assert!(row.is_applied);
    assert!(!row.is_attended && !row.is_review_submitted);
    assert!(row.completion_date.is_none());

    let err = store.apply_for_event("0101", "e1").unwrap_err();
    assert!(matches!(err, Error::Rejected(Rejection::AlreadyApplied)));
    assert_eq!(store.attendances.len(), 1);
}

#[test]
fn test_set_attended_stamps_once() {
    let mut store = training_store();
    let id = store.apply_for_event("0101", "e1").unwrap();

    store.set_attended(&id, true, date(2024, 7, 10)).unwrap();
    assert_eq!(store.attendances[0].completion_date, Some(date(2024, 7, 10)));

    // Clearing the flag keeps the stamp; re-setting later never moves it.
    store.set_attended(&id, false, date(2024, 7, 11)).unwrap();
    assert!(!store.attendances[0].is_attended);
    assert_eq!(store.attendances[0].completion_date, Some(date(2024, 7, 10)));

    store.set_attended(&id, true, date(2024, 8, 1)).unwrap();
    assert_eq!(store.attendances[0].completion_date, Some(date(2024, 7, 10)));
}

#[test]
fn test_set_review_forces_attended_without_stamp() {
    let mut store = training_store();
    let id = store.apply_for_event("0101", "e1").unwrap();

    store.set_review(&id, true).unwrap();
    let row = &store.attendances[0];
    assert!(row.is_review_submitted);
    assert!(row.is_attended);
    assert!(row.completion_date.is_none());

    // Withdrawing the review leaves attendance in place.
    store.set_review(&id, false).unwrap();
    let row = &store.attendances[0];
    assert!(!row.is_review_submitted);
    assert!(row.is_attended);
}

#[test]
fn test_setters_reject_unknown_attendance() {
    let mut store = training_store();
    assert!(matches!(
        store.set_attended("nope", true, date(2024, 7, 10)).unwrap_err(),
        Error::Rejected(Rejection::UnknownAttendance(_))
    ));
    assert!(matches!(
        store.set_review("nope", true).unwrap_err(),
        Error::Rejected(Rejection::UnknownAttendance(_))
    ));
}

#[test]
fn test_mark_course_creates_implicit_row() {
    let mut store = training_store();
    store
        .mark_course("0101", "e1", ProgressField::Attended, true, date(2024, 7, 10))
        .unwrap();

    assert_eq!(store.attendances.len(), 1);
    let row = &store.attendances[0];
    assert!(row.is_applied);
    assert!(row.is_attended);
    assert!(!row.is_review_submitted);
    assert_eq!(row.completion_date, Some(date(2024, 7, 10)));
}

#[test]
fn test_mark_course_review_on_fresh_row() {
    let mut store = training_store();
    store
        .mark_course("0101", "e1", ProgressField::Review, true, date(2024, 7, 10))
        .unwrap();
    let row = &store.attendances[0];
    assert!(row.is_review_submitted);
    assert!(row.is_attended);
    assert!(row.completion_date.is_none());
}

#[test]
fn test_mark_course_patches_existing_row() {
    let mut store = training_store();
    store.attendances.push(attendance("a1", "0101", "e1", false, false));

    store
        .mark_course("0101", "e1", ProgressField::Attended, true, date(2024, 7, 10))
        .unwrap();
    assert_eq!(store.attendances.len(), 1);
    assert!(store.attendances[0].is_attended);
    assert_eq!(store.attendances[0].completion_date, Some(date(2024, 7, 10)));

    store
        .mark_course("0101", "e1", ProgressField::Review, true, date(2024, 7, 11))
        .unwrap();
    assert!(store.attendances[0].is_review_submitted);
    // Review cascade keeps the original stamp.
    assert_eq!(store.attendances[0].completion_date, Some(date(2024, 7, 10)));
}

#[test]
fn test_submit_report_then_duplicate_declined() {
    let mut store = blank_store();
    store.members.push(member("0101", "갑", "c1"));
    store.books.push(book("b1", "책", 20, "c1"));

    let report_id = store.submit_report("0101", "b1", date(2024, 7, 20)).unwrap();
    let row = store
        .reports
        .iter()
        .find(|r| r.report_id == report_id)
        .unwrap();
    assert!(row.is_submitted);
    assert_eq!(row.submission_date, Some(date(2024, 7, 20)));

    let err = store.submit_report("0101", "b1", date(2024, 7, 21)).unwrap_err();
    assert!(matches!(
        err,
        Error::Rejected(Rejection::ReportAlreadySubmitted)
    ));
    assert_eq!(store.reports.len(), 1);

    // A different book is still fine.
    store.books.push(book("b2", "다른 책", 20, "c1"));
    store.submit_report("0101", "b2", date(2024, 7, 22)).unwrap();
}

#[test]
fn test_seeded_ids_are_skipped_by_fresh_ids() {
    let mut store = seeded_store();
    // Seed reports run br1..br3; a new one must not collide.
    let id = store.submit_report("01055555555", "b1", date(2024, 8, 1)).unwrap();
    assert!(!["br1", "br2", "br3"].contains(&id.as_str()));
    let ids: Vec<_> = store.reports.iter().map(|r| r.report_id.as_str()).collect();
    assert_eq!(ids.iter().filter(|i| **i == id).count(), 1);
}
