use std::fmt;
use serde::{Deserialize, Serialize};
use crate::username_string::{UsernameStr, UsernameString};

#[derive(Clone, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Account {
    pub username: UsernameString,
    pub password: String,
}

impl Account {
    pub fn matches(&self, username: &UsernameStr, password: &str) -> bool {
        *self.username == *username && self.password == password
    }
}

impl fmt::Debug for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Account")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}
