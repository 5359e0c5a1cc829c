use std::borrow::Borrow;
use std::fmt;
use std::fmt::Formatter;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::str::FromStr;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde::de::Error;
use serde::de::Unexpected::Str;
use thiserror::Error;
use crate::lib_constants::NOTES_KEY_PREFIX;

/// An account name as typed at registration.
///
/// Names are compared byte for byte: no case folding, no trimming.
#[derive(Clone, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct UsernameString(String);

#[repr(transparent)]
pub struct UsernameStr(str);

#[derive(Debug, Error)]
#[error("username must not be empty")]
pub struct UsernameParseError;

impl UsernameString {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl UsernameStr {
    pub fn from_str_unchecked(s: &str) -> &UsernameStr {
        // SAFETY: UsernameStr is a transparent wrapper over str
        unsafe { &*(s as *const str as *const UsernameStr) }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Storage key of this user's note collection.
    pub fn notes_key(&self) -> String {
        format!("{NOTES_KEY_PREFIX}{}", &self.0)
    }
}

impl FromStr for UsernameString {
    type Err = UsernameParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(UsernameParseError);
        }
        Ok(UsernameString(s.to_string()))
    }
}

impl Deref for UsernameString {
    type Target = UsernameStr;
    fn deref(&self) -> &UsernameStr {
        UsernameStr::from_str_unchecked(&self.0)
    }
}

impl Deref for UsernameStr {
    type Target = str;
    fn deref(&self) -> &str {
        &self.0
    }
}

impl Borrow<UsernameStr> for UsernameString {
    fn borrow(&self) -> &UsernameStr {
        self
    }
}

impl ToOwned for UsernameStr {
    type Owned = UsernameString;

    fn to_owned(&self) -> UsernameString {
        UsernameString(self.0.to_owned())
    }
}

impl PartialEq for UsernameStr {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl Eq for UsernameStr {}

impl Hash for UsernameStr {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.0.hash(state)
    }
}

impl PartialEq<str> for UsernameStr {
    fn eq(&self, other: &str) -> bool {
        &self.0 == other
    }
}

impl fmt::Display for UsernameStr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UsernameStr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl fmt::Display for UsernameString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for UsernameString {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&self.0, f)
    }
}

impl Serialize for UsernameString {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for UsernameString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct Visitor;
        impl serde::de::Visitor<'_> for Visitor {
            type Value = UsernameString;

            fn expecting(&self, formatter: &mut Formatter) -> fmt::Result {
                formatter.write_str("string containing a valid username")
            }

            fn visit_str<E>(self, v: &str) -> Result<UsernameString, E>
            where
                E: Error
            {
                UsernameString::from_str(v)
                    .map_err(|_| Error::invalid_value(Str(v), &self))
            }
        }

        deserializer.deserialize_str(Visitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_username_rejected() {
        assert!(UsernameString::from_str("").is_err());
    }

    #[test]
    fn no_normalization() {
        let upper = UsernameString::from_str("Alice").unwrap();
        let lower = UsernameString::from_str("alice").unwrap();
        let padded = UsernameString::from_str(" alice").unwrap();
        assert_ne!(upper, lower);
        assert_ne!(lower, padded);
        assert_eq!(padded.as_str(), " alice");
    }

    #[test]
    fn notes_key_is_prefixed() {
        let username = UsernameString::from_str("bob").unwrap();
        assert_eq!(username.notes_key(), "@notes_bob");
    }

    #[test]
    fn deserialize_rejects_empty() {
        assert!(serde_json::from_str::<UsernameString>("\"\"").is_err());
        let parsed: UsernameString = serde_json::from_str("\"carol\"").unwrap();
        assert_eq!(parsed.as_str(), "carol");
    }
}
