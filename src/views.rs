//! Derived views: pure, side-effect-free metrics computed from a store
//! snapshot.
//!
//! None of these raise errors. A dangling reference (an attendance or
//! report pointing at a deleted event or book) contributes zero instead
//! of failing, so partial data still renders. "Now" is always an explicit
//! parameter.

use crate::model::{BookCopy, Member, is_canonical_course};
use crate::store::Store;
use chrono::{Datelike, NaiveDate};
use std::collections::HashSet;

/// Sum of event scores over this member's attended-and-reviewed rows.
/// Rows whose event no longer exists contribute 0.
pub fn training_score(store: &Store, phone: &str) -> u32 {
    store
        .attendances
        .iter()
        .filter(|a| a.user_id == phone && a.is_attended && a.is_review_submitted)
        .map(|a| store.event(&a.event_id).map_or(0, |e| e.score))
        .sum()
}

/// Sum of book report scores over this member's submitted reports.
/// Reports whose book no longer exists contribute 0.
pub fn report_score(store: &Store, phone: &str) -> u32 {
    store
        .reports
        .iter()
        .filter(|r| r.user_id == phone && r.is_submitted)
        .map(|r| store.book(&r.book_id).map_or(0, |b| b.report_score))
        .sum()
}

/// Number of distinct canonical courses this member has attended.
/// Review submission is not required for this count.
pub fn completed_course_count(store: &Store, phone: &str) -> usize {
    let mut seen = HashSet::new();
    for attendance in store
        .attendances
        .iter()
        .filter(|a| a.user_id == phone && a.is_attended)
    {
        if let Some(event) = store.event(&attendance.event_id)
            && is_canonical_course(&event.name)
        {
            seen.insert(event.name.as_str());
        }
    }
    seen.len()
}

/// Attended rows whose effective date falls in the same calendar month as
/// `today`. The effective date is the completion date when stamped, else
/// the event's start date; rows where neither resolves are excluded.
pub fn monthly_completions(store: &Store, phone: &str, today: NaiveDate) -> usize {
    store
        .attendances
        .iter()
        .filter(|a| a.user_id == phone && a.is_attended)
        .filter(|a| {
            let effective = a
                .completion_date
                .or_else(|| store.event(&a.event_id).map(|e| e.date.date()));
            effective.is_some_and(|d| same_month(d, today))
        })
        .count()
}

/// The copy this member currently has out, if any. At most one is
/// expected; the loan handler enforces that.
pub fn current_loan<'a>(store: &'a Store, phone: &str) -> Option<&'a BookCopy> {
    store
        .copies
        .iter()
        .find(|c| c.current_borrower_id.as_deref() == Some(phone))
}

/// A copy is overdue when its due date is set and strictly before today.
pub fn is_overdue(copy: &BookCopy, today: NaiveDate) -> bool {
    copy.due_date.is_some_and(|due| due < today)
}

/// Per-chapter completion figures for one course.
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStats {
    pub attended_count: usize,
    pub review_count: usize,
    /// Percentage of chapter members with an attended row, two decimals.
    pub attendance_rate: f64,
    /// Percentage of chapter members with a reviewed row, two decimals.
    pub review_rate: f64,
}

/// Attendance and review rates for one course across a chapter's members.
/// An empty chapter yields 0.00 for both rates.
pub fn chapter_course_stats(store: &Store, chapter_id: &str, course_name: &str) -> CourseStats {
    let members: Vec<&Member> = store
        .members
        .iter()
        .filter(|m| m.chapter_id == chapter_id)
        .collect();
    if members.is_empty() {
        return CourseStats {
            attended_count: 0,
            review_count: 0,
            attendance_rate: 0.0,
            review_rate: 0.0,
        };
    }

    let has_mark = |phone: &str, reviewed: bool| {
        store.attendances.iter().any(|a| {
            a.user_id == phone
                && store.event(&a.event_id).is_some_and(|e| e.name == course_name)
                && if reviewed { a.is_review_submitted } else { a.is_attended }
        })
    };

    let attended_count = members.iter().filter(|m| has_mark(&m.phone, false)).count();
    let review_count = members.iter().filter(|m| has_mark(&m.phone, true)).count();
    let total = members.len() as f64;

    CourseStats {
        attended_count,
        review_count,
        attendance_rate: round2(attended_count as f64 / total * 100.0),
        review_rate: round2(review_count as f64 / total * 100.0),
    }
}

/// Members with no attended row for an event dated in today's month,
/// optionally restricted to one chapter.
///
/// Unlike [`monthly_completions`] this keys off the event date alone;
/// a stamped completion date in the month does not excuse a member whose
/// event was scheduled outside it.
pub fn monthly_non_attendees<'a>(
    store: &'a Store,
    chapter_id: Option<&str>,
    today: NaiveDate,
) -> Vec<&'a Member> {
    let attended: HashSet<&str> = store
        .attendances
        .iter()
        .filter(|a| a.is_attended)
        .filter(|a| {
            store
                .event(&a.event_id)
                .is_some_and(|e| same_month(e.date.date(), today))
        })
        .map(|a| a.user_id.as_str())
        .collect();

    store
        .members
        .iter()
        .filter(|m| chapter_id.is_none_or(|c| m.chapter_id == c))
        .filter(|m| !attended.contains(m.phone.as_str()))
        .collect()
}

/// Members who applied for an event, in application order. Rows whose
/// member no longer exists are skipped.
pub fn event_applicants<'a>(store: &'a Store, event_id: &str) -> Vec<&'a Member> {
    store
        .attendances
        .iter()
        .filter(|a| a.event_id == event_id && a.is_applied)
        .filter_map(|a| store.member(&a.user_id))
        .collect()
}

/// Applicant counts per chapter for one event, for the calendar day
/// view. Chapters appear in first-applicant order, keyed by name; an
/// applicant whose chapter no longer exists is counted under "N/A".
pub fn applicants_by_chapter(store: &Store, event_id: &str) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for member in event_applicants(store, event_id) {
        let chapter = store.chapter_name(&member.chapter_id).unwrap_or("N/A");
        match counts.iter_mut().find(|(name, _)| name == chapter) {
            Some((_, count)) => *count += 1,
            None => counts.push((chapter.to_string(), 1)),
        }
    }
    counts
}

/// One scored line in a member's activity breakdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityLine {
    pub name: String,
    pub score: u32,
}

/// Attended-and-reviewed events with their scores, for the member detail
/// view. A deleted event shows up under a placeholder name with score 0.
pub fn training_activity(store: &Store, phone: &str) -> Vec<ActivityLine> {
    store
        .attendances
        .iter()
        .filter(|a| a.user_id == phone && a.is_attended && a.is_review_submitted)
        .map(|a| match store.event(&a.event_id) {
            Some(event) => ActivityLine {
                name: event.name.clone(),
                score: event.score,
            },
            None => ActivityLine {
                name: "알 수 없는 교육".to_string(),
                score: 0,
            },
        })
        .collect()
}

/// Submitted book reports with their scores, placeholder for deleted books.
pub fn reading_activity(store: &Store, phone: &str) -> Vec<ActivityLine> {
    store
        .reports
        .iter()
        .filter(|r| r.user_id == phone && r.is_submitted)
        .map(|r| match store.book(&r.book_id) {
            Some(book) => ActivityLine {
                name: book.title.clone(),
                score: book.report_score,
            },
            None => ActivityLine {
                name: "알 수 없는 책".to_string(),
                score: 0,
            },
        })
        .collect()
}

fn same_month(a: NaiveDate, b: NaiveDate) -> bool {
    a.year() == b.year() && a.month() == b.month()
}

fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}
