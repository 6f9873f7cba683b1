//! First-run seed data: a small, self-consistent dataset covering every
//! entity, including one overdue loan and one member one course short of
//! the top-performer badge.

use crate::model::{
    Attendance, Book, BookCopy, BookReport, CANONICAL_COURSES, Chapter, CopyStatus, DepositStatus,
    EventCategory, LoanRecord, Member, Role, TrainingEvent,
};
use chrono::{NaiveDate, NaiveDateTime};

pub(crate) struct SeedData {
    pub chapters: Vec<Chapter>,
    pub members: Vec<Member>,
    pub events: Vec<TrainingEvent>,
    pub attendances: Vec<Attendance>,
    pub books: Vec<Book>,
    pub copies: Vec<BookCopy>,
    pub loans: Vec<LoanRecord>,
    pub reports: Vec<BookReport>,
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).expect("valid seed date")
}

fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    date(y, m, d)
        .and_hms_opt(h, min, 0)
        .expect("valid seed time")
}

fn member(
    phone: &str,
    name: &str,
    chapter_id: &str,
    role: Role,
    company: &str,
    specialty: &str,
) -> Member {
    Member {
        phone: phone.to_string(),
        password: Some("password".to_string()),
        name: name.to_string(),
        chapter_id: chapter_id.to_string(),
        role,
        specialty: Some(specialty.to_string()),
        company_name: Some(company.to_string()),
        deposit_status: DepositStatus::Ok,
        password_reset_required: false,
    }
}

pub(crate) fn initial() -> SeedData {
    let chapters = vec![
        Chapter {
            chapter_id: "c1".to_string(),
            name: "그랜드".to_string(),
        },
        Chapter {
            chapter_id: "c2".to_string(),
            name: "더유니온".to_string(),
        },
        Chapter {
            chapter_id: "c3".to_string(),
            name: "드림컴트루".to_string(),
        },
    ];

    let mut members = vec![
        member("bni.sn", "마스터 관리자", "c3", Role::Master, "BNI Korea", "관리"),
        member("01011111111", "김교육", "c3", Role::Coordinator, "교육회사", "교육"),
        member("01022222222", "이회원", "c3", Role::Member, "디자인 스튜디오", "디자인"),
        member("01033333333", "박참여", "c1", Role::Member, "건설", "건축"),
        member("01044444444", "최성실", "c2", Role::Member, "마케팅랩", "마케팅"),
        member("01055555555", "정열심", "c1", Role::Coordinator, "금융 컨설팅", "금융"),
    ];
    members[0].password = Some("0p9o8i7u!".to_string());
    // Forced-reset showcase account.
    members[2].password_reset_required = true;
    members[3].deposit_status = DepositStatus::Pending;

    // One event per canonical course, plus a leadership forum.
    let mut events: Vec<TrainingEvent> = CANONICAL_COURSES
        .iter()
        .enumerate()
        .map(|(i, (name, score))| {
            let day = 10 + i as u32;
            let category = [
                EventCategory::Seongnam,
                EventCategory::Training,
                EventCategory::Forum,
            ][i % 3];
            TrainingEvent {
                event_id: format!("e{}", i + 1),
                name: name.to_string(),
                score: *score,
                date: datetime(2024, 7, day, 9, 0),
                end_date: Some(datetime(2024, 7, day, 11, 0)),
                instructor: Some("BNI 강사".to_string()),
                location: Some("온라인 Zoom".to_string()),
                price: Some("유료".to_string()),
                category,
            }
        })
        .collect();
    events.push(TrainingEvent {
        event_id: "e13".to_string(),
        name: "리더십 포럼 1회".to_string(),
        score: 5,
        date: datetime(2024, 8, 20, 10, 0),
        end_date: Some(datetime(2024, 8, 20, 12, 0)),
        instructor: None,
        location: Some("본사".to_string()),
        price: Some("참가비 없음".to_string()),
        category: EventCategory::LeadershipForum,
    });

    let mut attendances = vec![
        Attendance {
            attendance_id: "ea1".to_string(),
            user_id: "bni.sn".to_string(),
            event_id: "e1".to_string(),
            is_attended: true,
            is_review_submitted: true,
            is_applied: true,
            completion_date: Some(date(2024, 7, 11)),
        },
        Attendance {
            attendance_id: "ea2".to_string(),
            user_id: "01022222222".to_string(),
            event_id: "e2".to_string(),
            is_attended: true,
            is_review_submitted: false,
            is_applied: true,
            completion_date: Some(date(2024, 7, 16)),
        },
        Attendance {
            attendance_id: "ea3".to_string(),
            user_id: "01033333333".to_string(),
            event_id: "e1".to_string(),
            is_attended: true,
            is_review_submitted: false,
            is_applied: true,
            completion_date: Some(date(2024, 7, 11)),
        },
        Attendance {
            attendance_id: "ea4".to_string(),
            user_id: "01033333333".to_string(),
            event_id: "e2".to_string(),
            is_attended: false,
            is_review_submitted: false,
            is_applied: true,
            completion_date: None,
        },
    ];
    // A member who has finished the full canonical curriculum.
    for i in 0..CANONICAL_COURSES.len() {
        attendances.push(Attendance {
            attendance_id: format!("ea-top-{}", i + 1),
            user_id: "01044444444".to_string(),
            event_id: format!("e{}", i + 1),
            is_attended: true,
            is_review_submitted: true,
            is_applied: true,
            completion_date: Some(date(2024, 7, 10 + i as u32)),
        });
    }

    let books = vec![
        Book {
            book_id: "b1".to_string(),
            title: "성공하는 사람들의 7가지 습관".to_string(),
            author: "스티븐 코비".to_string(),
            date_added: date(2024, 1, 1),
            report_score: 20,
            chapter_id: "c3".to_string(),
            price: Some("15,000원".to_string()),
            genre: Some("자기계발".to_string()),
            publisher: Some("김영사".to_string()),
        },
        Book {
            book_id: "b2".to_string(),
            title: "데일 카네기 인간관계론".to_string(),
            author: "데일 카네기".to_string(),
            date_added: date(2024, 2, 1),
            report_score: 20,
            chapter_id: "c1".to_string(),
            price: Some("11,500원".to_string()),
            genre: Some("자기계발".to_string()),
            publisher: Some("현대지성".to_string()),
        },
    ];

    let copies = vec![
        // Overdue from day one relative to the seeded due date.
        BookCopy {
            registration_number: "000001".to_string(),
            book_id: "b1".to_string(),
            is_lost: false,
            status: CopyStatus::OnLoan,
            current_borrower_id: Some("01011111111".to_string()),
            loan_date: Some(date(2024, 7, 1)),
            due_date: Some(date(2024, 7, 15)),
        },
        BookCopy {
            registration_number: "000002".to_string(),
            book_id: "b1".to_string(),
            is_lost: false,
            status: CopyStatus::Available,
            current_borrower_id: None,
            loan_date: None,
            due_date: None,
        },
        BookCopy {
            registration_number: "000003".to_string(),
            book_id: "b2".to_string(),
            is_lost: false,
            status: CopyStatus::Available,
            current_borrower_id: None,
            loan_date: None,
            due_date: None,
        },
    ];

    let loans = vec![LoanRecord {
        loan_id: "lh1".to_string(),
        registration_number: "000001".to_string(),
        user_id: "01011111111".to_string(),
        checkout_date: date(2024, 7, 1),
        return_date: None,
    }];

    let reports = vec![
        BookReport {
            report_id: "br1".to_string(),
            user_id: "01022222222".to_string(),
            book_id: "b1".to_string(),
            is_submitted: true,
            submission_date: Some(date(2024, 7, 20)),
        },
        BookReport {
            report_id: "br2".to_string(),
            user_id: "01044444444".to_string(),
            book_id: "b1".to_string(),
            is_submitted: true,
            submission_date: Some(date(2024, 7, 21)),
        },
        BookReport {
            report_id: "br3".to_string(),
            user_id: "01044444444".to_string(),
            book_id: "b2".to_string(),
            is_submitted: true,
            submission_date: Some(date(2024, 7, 22)),
        },
    ];

    SeedData {
        chapters,
        members,
        events,
        attendances,
        books,
        copies,
        loans,
        reports,
    }
}
