#![allow(dead_code)]

use chapterdesk::{
    Attendance, Book, BookCopy, BookReport, CopyStatus, DepositStatus, EventCategory, Member,
    MemoryStorage, Role, Store, TrainingEvent,
};
use chrono::{NaiveDate, NaiveDateTime};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32) -> NaiveDateTime {
    date(y, m, d).and_hms_opt(h, 0, 0).unwrap()
}

/// A store populated with the first-run seed data, over in-memory storage.
pub fn seeded_store() -> Store {
    Store::open(MemoryStorage::default()).unwrap()
}

/// A store with every collection emptied, for tests that build their own
/// rows directly.
pub fn blank_store() -> Store {
    let mut store = seeded_store();
    store.chapters.clear();
    store.members.clear();
    store.events.clear();
    store.attendances.clear();
    store.books.clear();
    store.copies.clear();
    store.loans.clear();
    store.reports.clear();
    store.session = None;
    store
}

pub fn member(phone: &str, name: &str, chapter_id: &str) -> Member {
    Member {
        phone: phone.to_string(),
        password: Some("password".to_string()),
        name: name.to_string(),
        chapter_id: chapter_id.to_string(),
        role: Role::Member,
        specialty: None,
        company_name: None,
        deposit_status: DepositStatus::Ok,
        password_reset_required: false,
    }
}

pub fn event(event_id: &str, name: &str, score: u32, date: NaiveDateTime) -> TrainingEvent {
    TrainingEvent {
        event_id: event_id.to_string(),
        name: name.to_string(),
        score,
        date,
        end_date: None,
        instructor: None,
        location: None,
        price: None,
        category: EventCategory::Seongnam,
    }
}

pub fn attendance(
    attendance_id: &str,
    user_id: &str,
    event_id: &str,
    attended: bool,
    reviewed: bool,
) -> Attendance {
    Attendance {
        attendance_id: attendance_id.to_string(),
        user_id: user_id.to_string(),
        event_id: event_id.to_string(),
        is_attended: attended,
        is_review_submitted: reviewed,
        is_applied: true,
        completion_date: None,
    }
}

pub fn book(book_id: &str, title: &str, report_score: u32, chapter_id: &str) -> Book {
    Book {
        book_id: book_id.to_string(),
        title: title.to_string(),
        author: "저자".to_string(),
        date_added: date(2024, 1, 1),
        report_score,
        chapter_id: chapter_id.to_string(),
        price: None,
        genre: None,
        publisher: None,
    }
}

pub fn copy(registration_number: &str, book_id: &str) -> BookCopy {
    BookCopy {
        registration_number: registration_number.to_string(),
        book_id: book_id.to_string(),
        is_lost: false,
        status: CopyStatus::Available,
        current_borrower_id: None,
        loan_date: None,
        due_date: None,
    }
}

pub fn report(report_id: &str, user_id: &str, book_id: &str) -> BookReport {
    BookReport {
        report_id: report_id.to_string(),
        user_id: user_id.to_string(),
        book_id: book_id.to_string(),
        is_submitted: true,
        submission_date: Some(date(2024, 7, 20)),
    }
}
