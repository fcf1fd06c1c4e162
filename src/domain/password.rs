//! Password value object.
//!
//! Credentials arrive already hashed by whoever owns authentication; the store
//! only keeps them. The wrapper makes sure the secret never leaks through
//! `Debug`, serialization or equality checks.

use serde::{Deserialize, Deserializer};

/// Opaque stored credential.
#[derive(Clone)]
pub struct Password {
    secret: String,
}

impl std::fmt::Debug for Password {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Password")
            .field("secret", &"[REDACTED]")
            .finish()
    }
}

impl Password {
    /// Wrap a credential as received.
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
        }
    }

    /// Borrow the raw credential (for handing to a verifier).
    pub fn expose(&self) -> &str {
        &self.secret
    }

    pub fn is_empty(&self) -> bool {
        self.secret.is_empty()
    }
}

impl<'de> Deserialize<'de> for Password {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Password::new)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_is_redacted() {
        let password = Password::new("Secret123");
        let debug = format!("{:?}", password);
        assert!(!debug.contains("Secret123"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn test_deserialize_from_string() {
        let password: Password = serde_json::from_str("\"abc12345\"").unwrap();
        assert_eq!(password.expose(), "abc12345");
        assert!(!password.is_empty());
    }
}
