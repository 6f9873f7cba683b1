mod circulation;
mod directory;
mod error;
mod leaderboard;
mod model;
mod seed;
mod store;
mod training;
pub mod views;

pub use circulation::{BookUpdate, LOAN_PERIOD_DAYS, NewBook, ReturnReceipt};
pub use directory::{DEFAULT_PASSWORD, MIN_PASSWORD_LEN, MemberForm, SignUpForm};
pub use error::{Error, Rejection, Result, StoreError};
pub use leaderboard::{Ranking, TOP_BADGE_THRESHOLD, ranking_of, rankings, rankings_for_chapter};
pub use model::{
    Attendance, Book, BookCopy, BookReport, CANONICAL_COURSES, Chapter, CopyStatus, DepositStatus,
    EventCategory, LoanRecord, Member, Role, TrainingEvent, canonical_course_score,
    is_canonical_course,
};
pub use store::{FileStorage, MemoryStorage, Storage, Store};
pub use training::{NewEvent, ProgressField};
