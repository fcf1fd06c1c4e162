//! Input validation predicates and a small schema validator.
//!
//! The predicates are pure and only look at the string they are given.
//! [`create_validator`] combines per-field checks into a record validator that
//! reports every failing field at once.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::config::{
    MAX_USERNAME_LENGTH, MIN_PASSWORD_LENGTH, MIN_USERNAME_LENGTH, PASSWORD_SYMBOLS,
};

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$").expect("valid email regex")
});

// The regex crate has no lookahead, so the letter/digit requirement is checked separately.
static PASSWORD_CHARSET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!("^[A-Za-z0-9{}]+$", regex::escape(PASSWORD_SYMBOLS)))
        .expect("valid password regex")
});

/// Validates an email address (`local@domain.tld`, TLD of 2+ letters).
pub fn is_valid_email(email: &str) -> bool {
    !email.is_empty() && EMAIL_PATTERN.is_match(email)
}

/// Validates a password: at least 8 characters from letters, digits and
/// `@$!%*#?&`, with at least one letter and one digit.
pub fn is_valid_password(password: &str) -> bool {
    password.len() >= MIN_PASSWORD_LENGTH
        && PASSWORD_CHARSET.is_match(password)
        && password.chars().any(|c| c.is_ascii_alphabetic())
        && password.chars().any(|c| c.is_ascii_digit())
}

/// Validates a username length (3 to 20 characters).
pub fn is_valid_username(username: &str) -> bool {
    let len = username.chars().count();
    (MIN_USERNAME_LENGTH..=MAX_USERNAME_LENGTH).contains(&len)
}

/// Result of running a single field validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldCheck {
    pub is_valid: bool,
    pub message: String,
}

/// A boxed check over an optional field value.
#[derive(Clone)]
pub struct FieldValidator {
    check: Arc<dyn Fn(Option<&str>) -> FieldCheck + Send + Sync>,
}

impl FieldValidator {
    pub fn check(&self, value: Option<&str>) -> FieldCheck {
        (self.check)(value)
    }
}

impl fmt::Debug for FieldValidator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FieldValidator")
    }
}

/// Adapt a string predicate into a [`FieldValidator`].
///
/// A missing value never satisfies the predicate.
pub fn field_validator<P>(predicate: P, message: impl Into<String>) -> FieldValidator
where
    P: Fn(&str) -> bool + Send + Sync + 'static,
{
    let message = message.into();
    FieldValidator {
        check: Arc::new(move |value: Option<&str>| FieldCheck {
            is_valid: value.map(&predicate).unwrap_or(false),
            message: message.clone(),
        }),
    }
}

/// Anything whose fields can be looked up by name for validation.
pub trait FieldSource {
    fn field(&self, name: &str) -> Option<&str>;
}

impl FieldSource for BTreeMap<String, String> {
    fn field(&self, name: &str) -> Option<&str> {
        self.get(name).map(String::as_str)
    }
}

/// Outcome of validating a whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

/// Record validator built from a field schema.
#[derive(Debug, Clone)]
pub struct Validator {
    schema: Vec<(String, FieldValidator)>,
}

impl Validator {
    /// Run every field validator; fields not in the schema are ignored.
    pub fn validate<R: FieldSource + ?Sized>(&self, record: &R) -> ValidationOutcome {
        let errors: BTreeMap<String, String> = self
            .schema
            .iter()
            .filter_map(|(field, validator)| {
                let FieldCheck { is_valid, message } = validator.check(record.field(field));
                (!is_valid).then(|| (field.clone(), message))
            })
            .collect();

        ValidationOutcome {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Build a [`Validator`] from `(field, validator)` pairs.
pub fn create_validator<I, K>(schema: I) -> Validator
where
    I: IntoIterator<Item = (K, FieldValidator)>,
    K: Into<String>,
{
    Validator {
        schema: schema.into_iter().map(|(k, v)| (k.into(), v)).collect(),
    }
}

/// Schema applied to account creation payloads.
pub fn new_user_validator() -> Validator {
    create_validator([
        ("email", field_validator(is_valid_email, "Invalid email format")),
        (
            "username",
            field_validator(
                is_valid_username,
                "Username must be between 3 and 20 characters",
            ),
        ),
        (
            "password",
            field_validator(
                is_valid_password,
                "Password must be at least 8 characters and contain a letter and a number",
            ),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_email_shapes() {
        assert!(is_valid_email("jane.doe+tag@mail.example.com"));
        assert!(is_valid_email("a_b%c@x.io"));
        assert!(!is_valid_email(""));
        assert!(!is_valid_email("no-at-sign.com"));
        assert!(!is_valid_email("user@localhost"));
        assert!(!is_valid_email("user@example.c"));
        assert!(!is_valid_email("us er@example.com"));
    }

    #[test]
    fn test_password_rules() {
        assert!(is_valid_password("abcdefg1"));
        assert!(is_valid_password("P@ssw0rd!"));
        assert!(!is_valid_password("short1a"));
        assert!(!is_valid_password("allletters"));
        assert!(!is_valid_password("12345678"));
        assert!(!is_valid_password("abcdefg1^"));
        assert!(!is_valid_password(""));
    }

    #[test]
    fn test_username_bounds() {
        assert!(!is_valid_username("ab"));
        assert!(is_valid_username("abc"));
        assert!(is_valid_username(&"x".repeat(20)));
        assert!(!is_valid_username(&"x".repeat(21)));
        assert!(!is_valid_username(""));
    }

    #[test]
    fn test_field_validator_rejects_missing_value() {
        let v = field_validator(|s: &str| !s.is_empty(), "required");
        assert!(v.check(Some("x")).is_valid);

        let missing = v.check(None);
        assert!(!missing.is_valid);
        assert_eq!(missing.message, "required");
    }

    #[test]
    fn test_validator_collects_every_failure() {
        let outcome = new_user_validator().validate(&record(&[
            ("email", "not-an-email"),
            ("username", "ok_name"),
        ]));

        assert!(!outcome.is_valid);
        assert_eq!(outcome.errors.len(), 2);
        assert_eq!(outcome.errors["email"], "Invalid email format");
        assert!(outcome.errors.contains_key("password"));
        assert!(!outcome.errors.contains_key("username"));
    }

    #[test]
    fn test_validator_ignores_fields_outside_schema() {
        let validator =
            create_validator([("name", field_validator(|s: &str| s.len() > 1, "bad"))]);
        let outcome = validator.validate(&record(&[("name", "ok"), ("other", "")]));

        assert_eq!(
            outcome,
            ValidationOutcome {
                is_valid: true,
                errors: BTreeMap::new()
            }
        );
    }
}
