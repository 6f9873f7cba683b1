use thiserror::Error;

/// Failure at the persistence boundary.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("storage I/O: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage encoding: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// A declined operation: a precondition was not met, nothing changed.
///
/// Rejections carry the user-facing reason and are surfaced locally by
/// the handler that was invoked; they never propagate through layers.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    #[error("phone number is already registered")]
    DuplicatePhone,
    #[error("password must be at least 6 characters")]
    PasswordTooShort,
    #[error("phone number or password does not match")]
    InvalidCredentials,
    #[error("no member registered under {0}")]
    UnknownMember(String),
    #[error("no copy registered under {0}")]
    UnknownCopy(String),
    #[error("no book registered under {0}")]
    UnknownBook(String),
    #[error("no attendance record {0}")]
    UnknownAttendance(String),
    #[error("copy is not available for loan")]
    CopyNotAvailable,
    #[error("member already has a book on loan")]
    AlreadyBorrowing,
    #[error("deposit is pending; loans are blocked until it is settled")]
    DepositPending,
    #[error("copy is not on loan")]
    CopyNotOnLoan,
    #[error("copy is on loan and cannot be deleted")]
    CopyOnLoan,
    #[error("book still has registered copies")]
    BookHasCopies,
    #[error("already applied for this event")]
    AlreadyApplied,
    #[error("report already submitted for this book")]
    ReportAlreadySubmitted,
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Rejected(#[from] Rejection),
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl Error {
    /// The rejection behind this error, if the operation was declined
    /// rather than failed.
    pub fn as_rejection(&self) -> Option<&Rejection> {
        match self {
            Error::Rejected(rejection) => Some(rejection),
            Error::Store(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
