//! The persisted `Subscriber` record and the validated email it is built from.

use chrono::{DateTime, Local};
use lazy_regex::regex_is_match;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use unicode_segmentation::UnicodeSegmentation;
use validator::ValidateEmail;

/// Attribute older records were written with. Dropped whenever a list is loaded.
pub const LEGACY_IP_FIELD: &str = "ip";

/// Format of the `date` attribute, server local time.
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// ###################################
// ->   STRUCTS
// ###################################
/// A single newsletter sign-up as it is persisted.
/// Attributes this service does not know about are kept in `extra` and written back untouched.
/// Hand-edited records may lack `email` or `date`, such records round-trip as they are.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Subscriber {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Subscriber {
    pub fn new(email: &ValidEmail, subscribed_at: DateTime<Local>) -> Self {
        Subscriber {
            email: Some(email.as_ref().to_owned()),
            date: Some(subscribed_at.format(DATE_FORMAT).to_string()),
            extra: Map::new(),
        }
    }

    /// Whether this record was made for exactly `email`, records without an email never match.
    pub fn has_email(&self, email: &ValidEmail) -> bool {
        self.email.as_deref() == Some(email.as_ref())
    }

    /// Removes attributes that must not survive a load, currently only `ip`.
    pub fn scrub_legacy_fields(&mut self) {
        self.extra.remove(LEGACY_IP_FIELD);
    }
}

/// Validated Subscriber Email
/// Trimmed of surrounding whitespace, case is preserved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidEmail(String);

impl AsRef<str> for ValidEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ValidEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl ValidEmail {
    pub fn parse<S>(value: S) -> Result<Self, DataParsingError>
    where
        S: AsRef<str>,
    {
        let value = value.as_ref().trim();

        if value.is_empty() {
            return Err(DataParsingError::EmailEmpty);
        }

        if value.graphemes(true).count() > 256 {
            return Err(DataParsingError::EmailTooLong);
        }

        // `validate_email` accepts dotless domains like `user@localhost`, we want a tld-like suffix.
        if value.validate_email() && regex_is_match!(r"^[^@\s]+@[^@\s.]+(\.[^@\s.]+)+$", value) {
            Ok(ValidEmail(value.to_owned()))
        } else {
            Err(DataParsingError::EmailInvalid)
        }
    }
}

// ###################################
// ->   ERROR
// ###################################
#[derive(Debug, thiserror::Error)]
pub enum DataParsingError {
    #[error("email empty")]
    EmailEmpty,
    #[error("email invalid")]
    EmailInvalid,
    #[error("email too long")]
    EmailTooLong,
}
