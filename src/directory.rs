//! Membership: signup, the credential gate, password lifecycle, and
//! admin member management.
//!
//! The password check is a plain equality comparison on a single-session
//! client; there is no hashing and no intention of any.

use crate::error::{Rejection, Result};
use crate::model::{DepositStatus, Member, Role};
use crate::store::Store;

pub const MIN_PASSWORD_LEN: usize = 6;

/// Password assigned by an admin reset; the member is forced to change
/// it at next login.
pub const DEFAULT_PASSWORD: &str = "password";

/// Self-service signup fields.
#[derive(Debug, Clone)]
pub struct SignUpForm {
    pub phone: String,
    pub password: String,
    pub name: String,
    pub chapter_id: String,
    pub specialty: Option<String>,
    pub company_name: Option<String>,
}

/// Admin create/edit fields. Role and deposit status are admin-assigned;
/// self-service signup always produces a plain member.
#[derive(Debug, Clone)]
pub struct MemberForm {
    pub phone: String,
    pub name: String,
    pub chapter_id: String,
    pub role: Role,
    pub specialty: Option<String>,
    pub company_name: Option<String>,
    pub deposit_status: DepositStatus,
}

/// Phone numbers are stored without hyphens; the master account's alias
/// id is kept verbatim.
fn normalize_phone(phone: &str) -> String {
    phone.replace('-', "")
}

impl Store {
    /// Register a new member. Declined on a duplicate phone number or a
    /// password shorter than six characters.
    pub fn sign_up(&mut self, form: SignUpForm) -> Result<()> {
        let phone = normalize_phone(&form.phone);
        if self.members.iter().any(|m| m.phone == phone) {
            return Err(Rejection::DuplicatePhone.into());
        }
        if form.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Rejection::PasswordTooShort.into());
        }
        self.members.push(Member {
            phone,
            password: Some(form.password),
            name: form.name,
            chapter_id: form.chapter_id,
            role: Role::Member,
            specialty: form.specialty,
            company_name: form.company_name,
            deposit_status: DepositStatus::Ok,
            password_reset_required: false,
        });
        self.save_members()?;
        Ok(())
    }

    /// Check credentials and open a session. The session slot is
    /// persisted, so it survives a reload.
    pub fn login(&mut self, phone: &str, password: &str) -> Result<Member> {
        let member = self
            .members
            .iter()
            .find(|m| m.phone == phone && m.password.as_deref() == Some(password))
            .cloned()
            .ok_or(Rejection::InvalidCredentials)?;
        self.session = Some(member.phone.clone());
        self.save_session()?;
        Ok(member)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.session = None;
        self.save_session()?;
        Ok(())
    }

    /// The member behind the persisted session, if any.
    pub fn current_member(&self) -> Option<&Member> {
        self.session.as_deref().and_then(|phone| self.member(phone))
    }

    /// A member picks a new password; clears the forced-reset flag.
    pub fn change_password(&mut self, phone: &str, new_password: &str) -> Result<()> {
        if new_password.chars().count() < MIN_PASSWORD_LEN {
            return Err(Rejection::PasswordTooShort.into());
        }
        let member = self
            .members
            .iter_mut()
            .find(|m| m.phone == phone)
            .ok_or_else(|| Rejection::UnknownMember(phone.to_string()))?;
        member.password = Some(new_password.to_string());
        member.password_reset_required = false;
        self.save_members()?;
        Ok(())
    }

    /// Admin reset: back to the default password, with a forced change at
    /// next login.
    pub fn reset_password(&mut self, phone: &str) -> Result<()> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.phone == phone)
            .ok_or_else(|| Rejection::UnknownMember(phone.to_string()))?;
        member.password = Some(DEFAULT_PASSWORD.to_string());
        member.password_reset_required = true;
        self.save_members()?;
        Ok(())
    }

    /// Admin-created member. Gets the default password and a clear
    /// deposit; declined on a duplicate phone number.
    pub fn create_member(&mut self, form: MemberForm) -> Result<()> {
        let phone = normalize_phone(&form.phone);
        if self.members.iter().any(|m| m.phone == phone) {
            return Err(Rejection::DuplicatePhone.into());
        }
        self.members.push(Member {
            phone,
            password: Some(DEFAULT_PASSWORD.to_string()),
            name: form.name,
            chapter_id: form.chapter_id,
            role: form.role,
            specialty: form.specialty,
            company_name: form.company_name,
            deposit_status: DepositStatus::Ok,
            password_reset_required: false,
        });
        self.save_members()?;
        Ok(())
    }

    /// Admin edit of an existing member's profile fields. The phone key
    /// itself is immutable; password and reset flag are untouched.
    pub fn update_member(&mut self, phone: &str, form: MemberForm) -> Result<()> {
        let member = self
            .members
            .iter_mut()
            .find(|m| m.phone == phone)
            .ok_or_else(|| Rejection::UnknownMember(phone.to_string()))?;
        member.name = form.name;
        member.chapter_id = form.chapter_id;
        member.role = form.role;
        member.specialty = form.specialty;
        member.company_name = form.company_name;
        member.deposit_status = form.deposit_status;
        self.save_members()?;
        Ok(())
    }

    /// Remove a member entirely. Their attendance, report, and loan rows
    /// stay behind; derived views tolerate the dangling references.
    pub fn delete_member(&mut self, phone: &str) -> Result<()> {
        if !self.members.iter().any(|m| m.phone == phone) {
            return Err(Rejection::UnknownMember(phone.to_string()).into());
        }
        self.members.retain(|m| m.phone != phone);
        self.save_members()?;
        Ok(())
    }

    /// Hand the Master role over: the current Master becomes a plain
    /// member, the successor becomes Master.
    pub fn transfer_master(&mut self, current: &str, successor: &str) -> Result<()> {
        if !self.members.iter().any(|m| m.phone == current) {
            return Err(Rejection::UnknownMember(current.to_string()).into());
        }
        if !self.members.iter().any(|m| m.phone == successor) {
            return Err(Rejection::UnknownMember(successor.to_string()).into());
        }
        for member in &mut self.members {
            if member.phone == current {
                member.role = Role::Member;
            } else if member.phone == successor {
                member.role = Role::Master;
            }
        }
        self.save_members()?;
        Ok(())
    }
}
