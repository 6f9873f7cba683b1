//! Training events, attendance records, and book reports.
//!
//! Attendance edits carry two one-directional cascades: a submitted
//! review forces the attended flag, and the first transition to attended
//! stamps the completion date. Re-applying the same boolean is a no-op.

use crate::error::{Rejection, Result};
use crate::model::{Attendance, BookReport, EventCategory, TrainingEvent};
use crate::store::{Store, fresh_id};
use chrono::{NaiveDate, NaiveDateTime};

/// Fields for a newly scheduled training event.
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub name: String,
    pub score: u32,
    pub date: NaiveDateTime,
    pub end_date: Option<NaiveDateTime>,
    pub instructor: Option<String>,
    pub location: Option<String>,
    pub price: Option<String>,
    pub category: EventCategory,
}

/// Which attendance flag an admin edit targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressField {
    Attended,
    Review,
}

impl Store {
    /// Schedule a new event. Returns its id.
    pub fn add_event(&mut self, event: NewEvent) -> Result<String> {
        let event_id = fresh_id("e", |id| self.events.iter().any(|e| e.event_id == id));
        self.events.push(TrainingEvent {
            event_id: event_id.clone(),
            name: event.name,
            score: event.score,
            date: event.date,
            end_date: event.end_date,
            instructor: event.instructor,
            location: event.location,
            price: event.price,
            category: event.category,
        });
        self.save_events()?;
        Ok(event_id)
    }

    /// The event carrying this exact name, if scheduled. Canonical-course
    /// admin edits resolve the course name through this.
    pub fn event_named(&self, name: &str) -> Option<&TrainingEvent> {
        self.events.iter().find(|e| e.name == name)
    }

    /// A member signs up for an event. Declined when any row for this
    /// member/event pair already exists. Returns the new attendance id.
    pub fn apply_for_event(&mut self, phone: &str, event_id: &str) -> Result<String> {
        if self
            .attendances
            .iter()
            .any(|a| a.user_id == phone && a.event_id == event_id)
        {
            return Err(Rejection::AlreadyApplied.into());
        }
        let attendance_id = fresh_id("ea", |id| {
            self.attendances.iter().any(|a| a.attendance_id == id)
        });
        self.attendances.push(Attendance {
            attendance_id: attendance_id.clone(),
            user_id: phone.to_string(),
            event_id: event_id.to_string(),
            is_attended: false,
            is_review_submitted: false,
            is_applied: true,
            completion_date: None,
        });
        self.save_attendances()?;
        Ok(attendance_id)
    }

    /// Set the attended flag on an existing row. The first transition to
    /// true with no completion date stamps `today`; clearing the flag
    /// does not unstamp it.
    pub fn set_attended(&mut self, attendance_id: &str, value: bool, today: NaiveDate) -> Result<()> {
        let row = self
            .attendances
            .iter_mut()
            .find(|a| a.attendance_id == attendance_id)
            .ok_or_else(|| Rejection::UnknownAttendance(attendance_id.to_string()))?;
        if value && row.completion_date.is_none() {
            row.completion_date = Some(today);
        }
        row.is_attended = value;
        self.save_attendances()?;
        Ok(())
    }

    /// Set the review flag on an existing row. A submitted review forces
    /// the attended flag (review implies attendance); it does not stamp
    /// a completion date, and clearing the review never clears attendance.
    pub fn set_review(&mut self, attendance_id: &str, value: bool) -> Result<()> {
        let row = self
            .attendances
            .iter_mut()
            .find(|a| a.attendance_id == attendance_id)
            .ok_or_else(|| Rejection::UnknownAttendance(attendance_id.to_string()))?;
        row.is_review_submitted = value;
        if value {
            row.is_attended = true;
        }
        self.save_attendances()?;
        Ok(())
    }

    /// Admin grid edit by (member, event) rather than attendance id.
    ///
    /// When no row exists one is created with `is_applied` set, since ticking
    /// the grid implies the application happened. Cascades match the
    /// per-row setters.
    pub fn mark_course(
        &mut self,
        phone: &str,
        event_id: &str,
        field: ProgressField,
        value: bool,
        today: NaiveDate,
    ) -> Result<()> {
        let existing = self
            .attendances
            .iter_mut()
            .find(|a| a.user_id == phone && a.event_id == event_id);

        if let Some(row) = existing {
            match field {
                ProgressField::Attended => {
                    if value && row.completion_date.is_none() {
                        row.completion_date = Some(today);
                    }
                    row.is_attended = value;
                }
                ProgressField::Review => {
                    row.is_review_submitted = value;
                    if value {
                        row.is_attended = true;
                    }
                }
            }
        } else {
            let attendance_id = fresh_id("ea", |id| {
                self.attendances.iter().any(|a| a.attendance_id == id)
            });
            self.attendances.push(Attendance {
                attendance_id,
                user_id: phone.to_string(),
                event_id: event_id.to_string(),
                is_attended: value,
                is_review_submitted: field == ProgressField::Review && value,
                is_applied: true,
                completion_date: if field == ProgressField::Attended && value {
                    Some(today)
                } else {
                    None
                },
            });
        }
        self.save_attendances()?;
        Ok(())
    }

    /// Record a member's book report. Declined when a report for this
    /// member/book pair already exists. Returns the new report id.
    pub fn submit_report(&mut self, phone: &str, book_id: &str, today: NaiveDate) -> Result<String> {
        if self
            .reports
            .iter()
            .any(|r| r.user_id == phone && r.book_id == book_id)
        {
            return Err(Rejection::ReportAlreadySubmitted.into());
        }
        let report_id = fresh_id("br", |id| self.reports.iter().any(|r| r.report_id == id));
        self.reports.push(BookReport {
            report_id: report_id.clone(),
            user_id: phone.to_string(),
            book_id: book_id.to_string(),
            is_submitted: true,
            submission_date: Some(today),
        });
        self.save_reports()?;
        Ok(report_id)
    }
}
