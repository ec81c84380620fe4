//! Local sign-in/sign-up and the active owner.
//!
//! There is no credential check: signing in validates the form and records
//! who is using the device. The signed-in email is the owner id stamped on
//! every event that user creates.

use std::sync::OnceLock;

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::calendar::Store;
use crate::error::StoreError;

pub const ACTIVE_USER_KEY: &str = "activeUser";
pub const USER_NAME_KEY: &str = "userName";
pub const ACCOUNTS_KEY: &str = "accounts";

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Email and password are required.")]
    MissingCredentials,

    #[error("Invalid email format.")]
    BadEmailFormat,

    #[error("Please fill all fields")]
    MissingFields,

    #[error("Passwords do not match")]
    PasswordMismatch,

    #[error("That email address is invalid!")]
    EmailInvalid,

    #[error("Password should be at least 6 characters!")]
    WeakPassword,

    #[error("That email address is already in use!")]
    EmailInUse,

    #[error(transparent)]
    Store(#[from] StoreError),
}

fn email_pattern() -> &'static Regex {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL.get_or_init(|| Regex::new(r"^\S+@\S+\.\S+$").expect("valid email pattern"))
}

pub fn is_valid_email(email: &str) -> bool {
    email_pattern().is_match(email)
}

#[derive(Debug, Clone, Default)]
pub struct SignInForm {
    pub email: String,
    pub password: String,
}

impl SignInForm {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.email.is_empty() || self.password.is_empty() {
            return Err(SessionError::MissingCredentials);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(SessionError::BadEmailFormat);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default)]
pub struct SignUpForm {
    pub name: String,
    pub email: String,
    pub password: String,
    pub confirm: String,
}

impl SignUpForm {
    pub fn validate(&self) -> Result<(), SessionError> {
        if self.name.trim().is_empty()
            || self.email.is_empty()
            || self.password.is_empty()
            || self.confirm.is_empty()
        {
            return Err(SessionError::MissingFields);
        }
        if self.password != self.confirm {
            return Err(SessionError::PasswordMismatch);
        }
        if !is_valid_email(self.email.trim()) {
            return Err(SessionError::EmailInvalid);
        }
        if self.password.chars().count() < MIN_PASSWORD_LEN {
            return Err(SessionError::WeakPassword);
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    pub email: String,
}

/// Who is signed in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

impl Profile {
    pub fn owner(&self) -> &str {
        &self.email
    }

    pub fn display_name(&self) -> &str {
        if self.name.trim().is_empty() {
            "User"
        } else {
            &self.name
        }
    }

    /// Dashboard header, e.g. "Good Morning, Alice".
    pub fn salutation(&self, hour: u32) -> String {
        format!("{}, {}", greeting(hour), self.display_name())
    }

    /// First letter of each word of the display name.
    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .collect()
    }
}

pub fn greeting(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Good Morning",
        12..=17 => "Good Afternoon",
        _ => "Good Evening",
    }
}

/// Owner ids are compared exactly, so every entry point stores the same
/// spelling of an address.
fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

fn accounts(store: &Store) -> Result<Vec<Account>, SessionError> {
    Ok(store.get_json(ACCOUNTS_KEY)?.unwrap_or_default())
}

pub async fn register(store: &mut Store, form: &SignUpForm) -> Result<Account, SessionError> {
    form.validate()?;

    let email = normalize_email(&form.email);
    let mut known = accounts(store)?;
    if known.iter().any(|a| a.email.eq_ignore_ascii_case(&email)) {
        return Err(SessionError::EmailInUse);
    }

    let account = Account {
        name: form.name.trim().to_string(),
        email,
    };
    known.push(account.clone());
    store.set_json(ACCOUNTS_KEY, &known).await?;

    info!(email = %account.email, "registered account");
    Ok(account)
}

pub async fn sign_in(store: &mut Store, form: &SignInForm) -> Result<Profile, SessionError> {
    form.validate()?;

    let email = normalize_email(&form.email);
    let name = accounts(store)?
        .into_iter()
        .find(|a| a.email.eq_ignore_ascii_case(&email))
        .map(|a| a.name)
        .unwrap_or_else(|| email.split('@').next().unwrap_or_default().to_string());

    store.set_item(ACTIVE_USER_KEY, email.clone()).await?;
    store.set_item(USER_NAME_KEY, name.clone()).await?;

    info!(%email, "signed in");
    Ok(Profile { name, email })
}

pub async fn sign_out(store: &mut Store) -> Result<(), SessionError> {
    store.remove_item(ACTIVE_USER_KEY).await?;
    info!("signed out");
    Ok(())
}

/// The profile persisted by the last sign-in, if any.
pub fn current_profile(store: &Store) -> Option<Profile> {
    let email = store.get_item(ACTIVE_USER_KEY)?.to_string();
    let name = store.get_item(USER_NAME_KEY).unwrap_or_default().to_string();
    Some(Profile { name, email })
}
