//! User domain entity and related types.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::password::Password;
use crate::config::{ROLE_ADMIN, ROLE_USER};
use crate::utils::FieldSource;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    User,
    Admin,
}

impl UserRole {
    /// Check if this role has admin privileges
    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }
}

impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s {
            ROLE_ADMIN => UserRole::Admin,
            _ => UserRole::User,
        }
    }
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UserRole::Admin => write!(f, "{}", ROLE_ADMIN),
            UserRole::User => write!(f, "{}", ROLE_USER),
        }
    }
}

/// User domain entity.
///
/// Deliberately not `Serialize`: the only externally visible shape is
/// [`SafeUser`], produced by [`User::to_safe`].
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub password: Password,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl User {
    /// Create a new user with default role and empty names
    pub fn new(id: Uuid, email: String, username: String, password: Password) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            username,
            password,
            first_name: String::new(),
            last_name: String::new(),
            role: UserRole::User,
            created_at: now,
            updated_at: now,
        }
    }

    /// Check if user has admin role
    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// First and last name joined, without stray whitespace
    pub fn full_name(&self) -> String {
        join_names(&self.first_name, &self.last_name)
    }

    /// Projection without the credential.
    pub fn to_safe(&self) -> SafeUser {
        SafeUser {
            id: self.id,
            email: self.email.clone(),
            username: self.username.clone(),
            first_name: self.first_name.clone(),
            last_name: self.last_name.clone(),
            role: self.role,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }

    /// Merge permitted changes and refresh `updated_at`.
    pub fn apply(&mut self, changes: PermittedChanges) {
        let PermittedChanges {
            email,
            username,
            first_name,
            last_name,
        } = changes;

        if let Some(email) = email {
            self.email = email;
        }
        if let Some(username) = username {
            self.username = username;
        }
        if let Some(first_name) = first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = last_name {
            self.last_name = last_name;
        }

        self.touch();
    }

    /// Bump `updated_at`; always strictly later than the previous value.
    pub fn touch(&mut self) {
        let now = Utc::now();
        self.updated_at = if now > self.updated_at {
            now
        } else {
            self.updated_at + Duration::microseconds(1)
        };
    }
}

fn join_names(first: &str, last: &str) -> String {
    format!("{} {}", first, last).trim().to_string()
}

/// User as seen outside the store (no credential).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SafeUser {
    /// Unique user identifier
    #[schema(example = "550e8400-e29b-41d4-a716-446655440000")]
    pub id: Uuid,
    /// User email address
    #[schema(example = "jane@example.com")]
    pub email: String,
    /// Unique handle
    #[schema(example = "jane_doe")]
    pub username: String,
    #[schema(example = "Jane")]
    pub first_name: String,
    #[schema(example = "Doe")]
    pub last_name: String,
    pub role: UserRole,
    /// Account creation timestamp
    pub created_at: DateTime<Utc>,
    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

impl SafeUser {
    pub fn full_name(&self) -> String {
        join_names(&self.first_name, &self.last_name)
    }
}

impl From<&User> for SafeUser {
    fn from(user: &User) -> Self {
        user.to_safe()
    }
}

/// User creation payload.
///
/// Every field is optional at the type level so that missing required values
/// are reported as validation errors rather than deserialization failures.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "jane_doe")]
    pub username: Option<String>,
    /// Credential, already hashed by the caller
    #[schema(value_type = Option<String>, example = "S3cretPass")]
    pub password: Option<Password>,
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
    /// Role for the new account (defaults to `user`)
    pub role: Option<UserRole>,
}

impl NewUser {
    pub fn new(
        email: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            email: Some(email.into()),
            username: Some(username.into()),
            password: Some(Password::new(password)),
            ..Self::default()
        }
    }

    pub fn with_names(
        mut self,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        self.first_name = Some(first_name.into());
        self.last_name = Some(last_name.into());
        self
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = Some(role);
        self
    }

    /// Email, username and password are all present and non-empty.
    pub fn has_required_fields(&self) -> bool {
        let present = |v: &Option<String>| v.as_deref().is_some_and(|s| !s.is_empty());
        present(&self.email)
            && present(&self.username)
            && self.password.as_ref().is_some_and(|p| !p.is_empty())
    }
}

impl FieldSource for NewUser {
    fn field(&self, name: &str) -> Option<&str> {
        match name {
            "email" => self.email.as_deref(),
            "username" => self.username.as_deref(),
            "password" => self.password.as_ref().map(Password::expose),
            "firstName" => self.first_name.as_deref(),
            "lastName" => self.last_name.as_deref(),
            _ => None,
        }
    }
}

/// Generic update payload.
///
/// `id`, `password` and `role` are accepted so that callers may send whole
/// records, but [`UserUpdate::into_permitted`] always discards them.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserUpdate {
    #[schema(value_type = Option<Object>)]
    pub id: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub password: Option<serde_json::Value>,
    #[schema(value_type = Option<Object>)]
    pub role: Option<serde_json::Value>,
    #[schema(example = "jane@example.com")]
    pub email: Option<String>,
    #[schema(example = "jane_doe")]
    pub username: Option<String>,
    #[schema(example = "Jane")]
    pub first_name: Option<String>,
    #[schema(example = "Doe")]
    pub last_name: Option<String>,
}

/// Changes that the generic update path may apply.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermittedChanges {
    pub email: Option<String>,
    pub username: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

impl UserUpdate {
    /// Drop protected fields.
    pub fn into_permitted(self) -> PermittedChanges {
        let UserUpdate {
            id: _,
            password: _,
            role: _,
            email,
            username,
            first_name,
            last_name,
        } = self;

        PermittedChanges {
            email,
            username,
            first_name,
            last_name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> User {
        User::new(
            Uuid::new_v4(),
            "jane@example.com".into(),
            "jane".into(),
            Password::new("hash"),
        )
    }

    #[test]
    fn test_user_role_display() {
        assert_eq!(UserRole::User.to_string(), "user");
        assert_eq!(UserRole::Admin.to_string(), "admin");
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("root"), UserRole::User);
    }

    #[test]
    fn test_safe_view_has_no_password_key() {
        let user = sample();
        let json = serde_json::to_value(user.to_safe()).unwrap();
        let object = json.as_object().unwrap();

        assert!(!object.contains_key("password"));
        for key in [
            "id",
            "email",
            "username",
            "firstName",
            "lastName",
            "role",
            "createdAt",
            "updatedAt",
        ] {
            assert!(object.contains_key(key), "missing {}", key);
        }
        assert_eq!(object["role"], "user");
    }

    #[test]
    fn test_full_name_trims() {
        let mut user = sample();
        assert_eq!(user.full_name(), "");
        user.first_name = "Jane".into();
        assert_eq!(user.full_name(), "Jane");
        user.last_name = "Doe".into();
        assert_eq!(user.to_safe().full_name(), "Jane Doe");
    }

    #[test]
    fn test_touch_is_strictly_increasing() {
        let mut user = sample();
        let mut previous = user.updated_at;
        for _ in 0..100 {
            user.touch();
            assert!(user.updated_at > previous);
            previous = user.updated_at;
        }
        assert!(user.updated_at >= user.created_at);
    }

    #[test]
    fn test_update_payload_drops_protected_fields() {
        let update: UserUpdate = serde_json::from_value(serde_json::json!({
            "id": "hijack",
            "password": "new-pass",
            "role": "admin",
            "firstName": "X",
            "createdAt": "1970-01-01T00:00:00Z"
        }))
        .unwrap();

        let permitted = update.into_permitted();
        assert_eq!(
            permitted,
            PermittedChanges {
                first_name: Some("X".into()),
                ..PermittedChanges::default()
            }
        );
    }

    #[test]
    fn test_new_user_required_fields() {
        assert!(NewUser::new("a@b.co", "abc", "pass1234").has_required_fields());
        assert!(!NewUser::new("", "abc", "pass1234").has_required_fields());
        assert!(!NewUser {
            password: None,
            ..NewUser::new("a@b.co", "abc", "x")
        }
        .has_required_fields());
    }
}
