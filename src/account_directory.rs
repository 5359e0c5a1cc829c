mod errors;
mod internal;

use async_trait::async_trait;
use crate::username_string::{UsernameStr, UsernameString};

pub use errors::*;
pub use internal::{AccountDirectoryImpl, ProductionAccountDirectory};

/// Registered accounts and the single current-session pointer.
///
/// Passwords are stored and compared verbatim.
#[async_trait]
pub trait AccountDirectory: Send + Sync {
    /// Adds an account. Does not start a session.
    async fn register(
        &self,
        username: &UsernameStr,
        password: &str,
    ) -> Result<(), AccountError>;

    /// Checks the credentials and points the session at `username`.
    ///
    /// Unknown users and wrong passwords fail the same way.
    async fn authenticate(
        &self,
        username: &UsernameStr,
        password: &str,
    ) -> Result<(), AccountError>;

    /// Same check as [`AccountDirectory::authenticate`], leaving the
    /// session alone. Storage faults read as `false`.
    async fn verify_credentials(
        &self,
        username: &UsernameStr,
        password: &str,
    ) -> bool;

    /// Points the session at `username` without checking that the account
    /// exists.
    async fn switch_session(
        &self,
        username: &UsernameStr,
    ) -> Result<(), AccountError>;

    async fn current_session(&self) -> Option<UsernameString>;

    /// In registration order.
    async fn list_usernames(&self) -> Vec<UsernameString>;

    /// Best effort; failures are only logged.
    async fn end_session(&self);
}
