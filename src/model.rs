use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// The twelve canonical training courses and their fixed scores.
///
/// Completing eleven of these earns the top-performer badge on the
/// leaderboard. Course identity is by name: an event created from a
/// canonical preset carries the course name and its fixed score.
pub const CANONICAL_COURSES: [(&str, u32); 12] = [
    ("MSP 기본", 3),
    ("MSP 심화", 3),
    ("BNI에서의 대화법", 2),
    ("리퍼럴마케팅입문", 2),
    ("파워팀워크샵", 2),
    ("파워팀입문", 2),
    ("사업가들의 꿈을 이루는 시간관리법", 2),
    ("성공지도그리기", 2),
    ("리퍼럴스킬워크샵", 2),
    ("위클리프리젠테이션", 2),
    ("피쳐프리젠테이션", 2),
    ("멘토입문", 2),
];

/// Returns the fixed score of a canonical course, or `None` for an
/// ordinary event name.
pub fn canonical_course_score(name: &str) -> Option<u32> {
    CANONICAL_COURSES
        .iter()
        .find(|(course, _)| *course == name)
        .map(|(_, score)| *score)
}

pub fn is_canonical_course(name: &str) -> bool {
    canonical_course_score(name).is_some()
}

/// A regional sub-organization. Members and books each belong to exactly one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Chapter {
    pub chapter_id: String,
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Member,
    Coordinator,
    Master,
}

impl Role {
    /// Coordinators and the Master hold administrative access.
    pub fn is_admin(self) -> bool {
        matches!(self, Role::Coordinator | Role::Master)
    }
}

/// Per-member financial gate. `Pending` blocks new book loans until an
/// administrator settles the deposit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DepositStatus {
    #[serde(rename = "OK")]
    Ok,
    Pending,
}

/// A member profile, keyed by phone number.
///
/// The password is stored and compared in clear text; the credential
/// check is a gate on a single-session client, not a security mechanism.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub phone: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    pub name: String,
    pub chapter_id: String,
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub specialty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_name: Option<String>,
    pub deposit_status: DepositStatus,
    #[serde(default)]
    pub password_reset_required: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventCategory {
    #[serde(rename = "성남교육")]
    Seongnam,
    #[serde(rename = "트레이닝교육")]
    Training,
    #[serde(rename = "포럼")]
    Forum,
    #[serde(rename = "리더십 포럼")]
    LeadershipForum,
}

/// A scheduled training event.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrainingEvent {
    pub event_id: String,
    pub name: String,
    pub score: u32,
    pub date: NaiveDateTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_date: Option<NaiveDateTime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructor: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    pub category: EventCategory,
}

/// One member's relationship to one training event.
///
/// The (member, event) pair is not unique-constrained in storage; the
/// apply handler guards against duplicates at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attendance {
    pub attendance_id: String,
    pub user_id: String,
    pub event_id: String,
    pub is_attended: bool,
    pub is_review_submitted: bool,
    pub is_applied: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<NaiveDate>,
}

/// A book title. Physical units are tracked separately as [`BookCopy`] rows.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: String,
    pub title: String,
    pub author: String,
    pub date_added: NaiveDate,
    pub report_score: u32,
    pub chapter_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genre: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
}

/// Circulation state of one physical copy.
///
/// The lost flag is an independent axis: toggling it forces the status,
/// but the loan fields are untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyStatus {
    #[serde(rename = "대여 가능")]
    Available,
    #[serde(rename = "대여 중")]
    OnLoan,
    #[serde(rename = "대여 불가")]
    Unavailable,
}

/// One physical, individually tracked unit of a book.
///
/// `status == OnLoan` iff `current_borrower_id` is set; the loan handler
/// maintains that pairing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookCopy {
    pub registration_number: String,
    pub book_id: String,
    pub is_lost: bool,
    pub status: CopyStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_borrower_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub loan_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
}

/// One checkout. A row with no return date is the copy's active loan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanRecord {
    pub loan_id: String,
    pub registration_number: String,
    pub user_id: String,
    pub checkout_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub return_date: Option<NaiveDate>,
}

/// A member's report on a book. At most one counts per (member, book);
/// the submit handler enforces that, not storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookReport {
    pub report_id: String,
    pub user_id: String,
    pub book_id: String,
    pub is_submitted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub submission_date: Option<NaiveDate>,
}
