//! Circulation: copy state transitions, the loan ledger, and the deposit
//! side effect of an overdue return.
//!
//! Every handler checks its preconditions against immutable borrows
//! first and only then mutates, so a declined operation leaves no
//! partial state behind.

use crate::error::{Rejection, Result};
use crate::model::{Book, BookCopy, CopyStatus, DepositStatus, LoanRecord};
use crate::store::{Store, fresh_id};
use chrono::{Days, NaiveDate};

/// Loan period in days.
pub const LOAN_PERIOD_DAYS: u64 = 14;

/// What a [`Store::return_copy`] call did, for the caller's confirmation
/// message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReturnReceipt {
    pub borrower: Option<String>,
    /// True when the return was past due; the borrower's deposit status
    /// has been forced to Pending.
    pub overdue: bool,
}

/// Fields for a newly registered book title.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub report_score: u32,
    pub chapter_id: String,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<String>,
}

/// Editable fields of an existing book title.
#[derive(Debug, Clone)]
pub struct BookUpdate {
    pub title: String,
    pub author: String,
    pub report_score: u32,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub price: Option<String>,
}

impl Store {
    /// Check a copy out to a member.
    ///
    /// Declined when the copy is not available, when the member already
    /// holds a copy on loan anywhere in the system, or when their deposit
    /// is pending. On success the copy goes on loan until
    /// `today + 14 days` and an open loan row is appended.
    pub fn loan(&mut self, registration_number: &str, phone: &str, today: NaiveDate) -> Result<()> {
        let member = self
            .member(phone)
            .ok_or_else(|| Rejection::UnknownMember(phone.to_string()))?;
        if member.deposit_status == DepositStatus::Pending {
            return Err(Rejection::DepositPending.into());
        }
        if self
            .copies
            .iter()
            .any(|c| c.status == CopyStatus::OnLoan && c.current_borrower_id.as_deref() == Some(phone))
        {
            return Err(Rejection::AlreadyBorrowing.into());
        }
        let idx = self
            .copies
            .iter()
            .position(|c| c.registration_number == registration_number)
            .ok_or_else(|| Rejection::UnknownCopy(registration_number.to_string()))?;
        if self.copies[idx].status != CopyStatus::Available {
            return Err(Rejection::CopyNotAvailable.into());
        }

        let loan_id = fresh_id("lh", |id| self.loans.iter().any(|l| l.loan_id == id));
        let copy = &mut self.copies[idx];
        copy.status = CopyStatus::OnLoan;
        copy.current_borrower_id = Some(phone.to_string());
        copy.loan_date = Some(today);
        copy.due_date = today.checked_add_days(Days::new(LOAN_PERIOD_DAYS));
        self.loans.push(LoanRecord {
            loan_id,
            registration_number: registration_number.to_string(),
            user_id: phone.to_string(),
            checkout_date: today,
            return_date: None,
        });

        self.save_copies()?;
        self.save_loans()?;
        Ok(())
    }

    /// Take a copy back in.
    ///
    /// Overdue is judged against the due date before the fields are
    /// cleared. The matching open loan row gets its return date; an
    /// overdue return additionally forces the borrower's deposit status
    /// to Pending, the one cross-entity cascade in the system, cleared
    /// only by [`Store::settle_deposit`].
    pub fn return_copy(&mut self, registration_number: &str, today: NaiveDate) -> Result<ReturnReceipt> {
        let idx = self
            .copies
            .iter()
            .position(|c| c.registration_number == registration_number)
            .ok_or_else(|| Rejection::UnknownCopy(registration_number.to_string()))?;
        if self.copies[idx].status != CopyStatus::OnLoan {
            return Err(Rejection::CopyNotOnLoan.into());
        }

        let copy = &mut self.copies[idx];
        let overdue = copy.due_date.is_some_and(|due| due < today);
        let borrower = copy.current_borrower_id.take();
        copy.status = CopyStatus::Available;
        copy.loan_date = None;
        copy.due_date = None;

        if let Some(open) = self
            .loans
            .iter_mut()
            .find(|l| l.registration_number == registration_number && l.return_date.is_none())
        {
            open.return_date = Some(today);
        }

        let mut deposit_changed = false;
        if overdue && let Some(phone) = borrower.as_deref() {
            if let Some(member) = self.members.iter_mut().find(|m| m.phone == phone) {
                member.deposit_status = DepositStatus::Pending;
                deposit_changed = true;
            }
        }

        self.save_copies()?;
        self.save_loans()?;
        if deposit_changed {
            self.save_members()?;
        }
        Ok(ReturnReceipt { borrower, overdue })
    }

    /// Clear a member's pending deposit back to OK. Admin action.
    pub fn settle_deposit(&mut self, phone: &str) -> Result<()> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.phone == phone)
            .ok_or_else(|| Rejection::UnknownMember(phone.to_string()))?;
        member.deposit_status = DepositStatus::Ok;
        self.save_members()?;
        Ok(())
    }

    /// Flip a copy's lost flag: lost forces Unavailable, recovered forces
    /// Available. The status is recomputed from the flag on every flip.
    ///
    /// There is deliberately no guard against toggling a copy that is on
    /// loan; the lost toggle is only exposed for copies that are not.
    pub fn toggle_lost(&mut self, registration_number: &str) -> Result<()> {
        let copy = self
            .copies
            .iter_mut()
            .find(|c| c.registration_number == registration_number)
            .ok_or_else(|| Rejection::UnknownCopy(registration_number.to_string()))?;
        copy.is_lost = !copy.is_lost;
        copy.status = if copy.is_lost {
            CopyStatus::Unavailable
        } else {
            CopyStatus::Available
        };
        self.save_copies()?;
        Ok(())
    }

    /// Remove a copy. Declined while the copy is on loan.
    pub fn delete_copy(&mut self, registration_number: &str) -> Result<()> {
        let idx = self
            .copies
            .iter()
            .position(|c| c.registration_number == registration_number)
            .ok_or_else(|| Rejection::UnknownCopy(registration_number.to_string()))?;
        if self.copies[idx].status == CopyStatus::OnLoan {
            return Err(Rejection::CopyOnLoan.into());
        }
        self.copies.remove(idx);
        self.save_copies()?;
        Ok(())
    }

    /// Register a new title with `quantity` copies. Registration numbers
    /// continue from the current maximum, zero-padded to six digits.
    /// Returns the new book's id.
    pub fn add_book(&mut self, book: NewBook, quantity: u32, today: NaiveDate) -> Result<String> {
        let book_id = fresh_id("b", |id| self.books.iter().any(|b| b.book_id == id));
        self.books.push(Book {
            book_id: book_id.clone(),
            title: book.title,
            author: book.author,
            date_added: today,
            report_score: book.report_score,
            chapter_id: book.chapter_id,
            price: book.price,
            genre: book.genre,
            publisher: book.publisher,
        });
        let start = self.next_registration_number();
        for i in 0..quantity {
            self.copies.push(BookCopy {
                registration_number: format!("{:06}", start + i),
                book_id: book_id.clone(),
                is_lost: false,
                status: CopyStatus::Available,
                current_borrower_id: None,
                loan_date: None,
                due_date: None,
            });
        }
        self.save_books()?;
        if quantity > 0 {
            self.save_copies()?;
        }
        Ok(book_id)
    }

    /// Patch a title's editable fields.
    pub fn update_book(&mut self, book_id: &str, update: BookUpdate) -> Result<()> {
        let book = self
            .books
            .iter_mut()
            .find(|b| b.book_id == book_id)
            .ok_or_else(|| Rejection::UnknownBook(book_id.to_string()))?;
        book.title = update.title;
        book.author = update.author;
        book.report_score = update.report_score;
        book.genre = update.genre;
        book.publisher = update.publisher;
        book.price = update.price;
        self.save_books()?;
        Ok(())
    }

    /// Remove a title. Declined while any copy still references it;
    /// copies must be deleted first, one by one.
    pub fn delete_book(&mut self, book_id: &str) -> Result<()> {
        if !self.books.iter().any(|b| b.book_id == book_id) {
            return Err(Rejection::UnknownBook(book_id.to_string()).into());
        }
        if self.copies.iter().any(|c| c.book_id == book_id) {
            return Err(Rejection::BookHasCopies.into());
        }
        self.books.retain(|b| b.book_id != book_id);
        self.save_books()?;
        Ok(())
    }
}
