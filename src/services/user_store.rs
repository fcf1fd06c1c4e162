//! User store - owns the account collection and enforces its invariants.
//!
//! Every operation takes the collection lock once and holds it for the whole
//! read-modify-write, so checks and mutations never interleave.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::domain::{NewUser, SafeUser, User, UserUpdate};
use crate::errors::{AppError, AppResult};
use crate::types::PageRequest;
use crate::utils::{new_user_validator, Validator};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

const REQUIRED_FIELDS_MESSAGE: &str = "Email, username and password are required";
const INVALID_FIELDS_MESSAGE: &str = "Invalid user data";
const DUPLICATE_USER_MESSAGE: &str = "User with this email or username already exists";

/// One page of users plus the unfiltered total.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPage {
    pub users: Vec<SafeUser>,
    pub total: usize,
    pub page: i64,
    pub limit: i64,
}

/// User store contract.
///
/// Every value crossing this boundary is a [`SafeUser`]; the stored
/// credential never leaves the implementation.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Register a new account. Fails with `InvalidInput` or `Conflict`.
    async fn create_user(&self, data: NewUser) -> AppResult<SafeUser>;

    async fn get_user_by_id(&self, id: Uuid) -> AppResult<SafeUser>;

    /// Exact, case-sensitive email match.
    async fn get_user_by_email(&self, email: &str) -> AppResult<SafeUser>;

    /// Merge the permitted fields of `updates`; `id`, `password` and `role`
    /// are silently ignored.
    async fn update_user(&self, id: Uuid, updates: UserUpdate) -> AppResult<SafeUser>;

    /// Hard delete. The id is never handed out again.
    async fn delete_user(&self, id: Uuid) -> AppResult<bool>;

    /// Insertion-ordered page of users.
    async fn get_all_users(&self, request: PageRequest) -> AppResult<UserPage>;

    /// Number of live users.
    async fn count(&self) -> usize;
}

#[derive(Debug, Default)]
struct Collection {
    users: HashMap<Uuid, User>,
    order: Vec<Uuid>,
    /// Every id ever assigned, including deleted ones.
    issued: HashSet<Uuid>,
}

impl Collection {
    fn issue_id(&mut self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if self.issued.insert(id) {
                return id;
            }
        }
    }

    fn is_taken(&self, email: &str, username: &str) -> bool {
        self.users
            .values()
            .any(|u| u.email == email || u.username == username)
    }

    fn insert(&mut self, user: User) {
        self.order.push(user.id);
        self.users.insert(user.id, user);
    }

    fn remove(&mut self, id: Uuid) -> Option<User> {
        let user = self.users.remove(&id)?;
        self.order.retain(|existing| *existing != id);
        Some(user)
    }

    fn ordered(&self) -> impl Iterator<Item = &User> {
        self.order.iter().filter_map(|id| self.users.get(id))
    }
}

/// In-process implementation backed by a single lock-guarded collection.
#[derive(Debug)]
pub struct InMemoryUserStore {
    inner: RwLock<Collection>,
    validator: Validator,
}

impl Default for InMemoryUserStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self {
            inner: RwLock::new(Collection::default()),
            validator: new_user_validator(),
        }
    }

    fn check_new_user(&self, data: &NewUser) -> AppResult<()> {
        if !data.has_required_fields() {
            return Err(AppError::invalid_input(REQUIRED_FIELDS_MESSAGE));
        }

        let outcome = self.validator.validate(data);
        if !outcome.is_valid {
            return Err(AppError::invalid_fields(INVALID_FIELDS_MESSAGE, outcome.errors));
        }

        Ok(())
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn create_user(&self, data: NewUser) -> AppResult<SafeUser> {
        self.check_new_user(&data)?;

        let NewUser {
            email: Some(email),
            username: Some(username),
            password: Some(password),
            first_name,
            last_name,
            role,
        } = data
        else {
            return Err(AppError::invalid_input(REQUIRED_FIELDS_MESSAGE));
        };

        let mut collection = self.inner.write().await;

        if collection.is_taken(&email, &username) {
            tracing::debug!(%email, %username, "Rejected duplicate user");
            return Err(AppError::conflict(DUPLICATE_USER_MESSAGE));
        }

        let id = collection.issue_id();
        let mut user = User::new(id, email, username, password);
        user.first_name = first_name.unwrap_or_default();
        user.last_name = last_name.unwrap_or_default();
        user.role = role.unwrap_or_default();

        let safe = user.to_safe();
        collection.insert(user);

        tracing::info!(user_id = %id, role = %safe.role, "User created");
        Ok(safe)
    }

    async fn get_user_by_id(&self, id: Uuid) -> AppResult<SafeUser> {
        let collection = self.inner.read().await;
        collection
            .users
            .get(&id)
            .map(User::to_safe)
            .ok_or_else(|| AppError::user_not_found(id))
    }

    async fn get_user_by_email(&self, email: &str) -> AppResult<SafeUser> {
        let collection = self.inner.read().await;
        let found = collection
            .ordered()
            .find(|u| u.email == email)
            .map(User::to_safe);

        found.ok_or_else(|| AppError::not_found(format!("User with email {} not found", email)))
    }

    async fn update_user(&self, id: Uuid, updates: UserUpdate) -> AppResult<SafeUser> {
        let mut collection = self.inner.write().await;
        let user = collection
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::user_not_found(id))?;

        user.apply(updates.into_permitted());

        tracing::info!(user_id = %id, "User updated");
        Ok(user.to_safe())
    }

    async fn delete_user(&self, id: Uuid) -> AppResult<bool> {
        let mut collection = self.inner.write().await;
        collection
            .remove(id)
            .ok_or_else(|| AppError::user_not_found(id))?;

        tracing::info!(user_id = %id, "User deleted");
        Ok(true)
    }

    async fn get_all_users(&self, request: PageRequest) -> AppResult<UserPage> {
        let collection = self.inner.read().await;
        let total = collection.order.len();
        let (start, end) = request.window(total);

        let users = collection
            .ordered()
            .skip(start)
            .take(end - start)
            .map(User::to_safe)
            .collect();

        tracing::debug!(page = request.page, limit = request.limit, total, "Listed users");
        Ok(UserPage {
            users,
            total,
            page: request.page,
            limit: request.limit,
        })
    }

    async fn count(&self) -> usize {
        self.inner.read().await.users.len()
    }
}
