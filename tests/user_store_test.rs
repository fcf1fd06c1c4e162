//! User store contract tests, run against the store through its trait.

use std::collections::HashSet;
use std::sync::Arc;

use user_accounts_api::domain::{NewUser, UserUpdate};
use user_accounts_api::errors::AppError;
use user_accounts_api::services::{InMemoryUserStore, UserStore};
use user_accounts_api::types::PageRequest;

fn store() -> Arc<dyn UserStore> {
    Arc::new(InMemoryUserStore::new())
}

fn payload(tag: &str) -> NewUser {
    NewUser::new(format!("{}@example.com", tag), format!("user_{}", tag), "passw0rd")
}

#[tokio::test]
async fn test_created_user_is_retrievable_by_id_and_email() {
    let store = store();
    let created = store.create_user(payload("jane")).await.unwrap();

    assert_eq!(store.get_user_by_id(created.id).await.unwrap(), created);
    assert_eq!(store.get_user_by_email("jane@example.com").await.unwrap(), created);
    assert!(matches!(
        store.get_user_by_email("JANE@example.com").await,
        Err(AppError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_failed_creates_leave_collection_untouched() {
    let store = store();
    store.create_user(payload("jane")).await.unwrap();

    let attempts = [
        NewUser { password: None, ..payload("a") },
        NewUser::new("jane@example.com", "someone_else", "passw0rd"),
        NewUser::new("bad-email", "user_b", "passw0rd"),
    ];
    for data in attempts {
        assert!(store.create_user(data).await.is_err());
    }

    assert_eq!(store.count().await, 1);
}

#[tokio::test]
async fn test_update_role_attempt_keeps_role() {
    let store = store();
    let created = store.create_user(payload("jane")).await.unwrap();

    let updates: UserUpdate =
        serde_json::from_value(serde_json::json!({ "role": "admin", "firstName": "X" })).unwrap();
    let updated = store.update_user(created.id, updates).await.unwrap();

    assert_eq!(updated.role, created.role);
    assert_eq!(updated.first_name, "X");
    assert!(updated.updated_at > created.updated_at);
    assert_eq!(updated.created_at, created.created_at);
}

#[tokio::test]
async fn test_deleted_ids_never_come_back() {
    let store = store();
    let mut deleted = HashSet::new();

    for round in 0..20 {
        let user = store.create_user(payload(&format!("u{}", round))).await.unwrap();
        assert!(!deleted.contains(&user.id));

        assert!(store.delete_user(user.id).await.unwrap());
        assert!(matches!(
            store.get_user_by_id(user.id).await,
            Err(AppError::NotFound(_))
        ));
        deleted.insert(user.id);
    }
}

#[tokio::test]
async fn test_page_two_of_five() {
    let store = store();
    let mut created = Vec::new();
    for tag in ["a", "b", "c", "d", "e"] {
        created.push(store.create_user(payload(tag)).await.unwrap());
    }

    let page = store.get_all_users(PageRequest::new(2, 2)).await.unwrap();

    assert_eq!(page.users, vec![created[2].clone(), created[3].clone()]);
    assert_eq!(page.total, 5);
    assert_eq!((page.page, page.limit), (2, 2));

    let again = store.get_all_users(PageRequest::new(2, 2)).await.unwrap();
    assert_eq!(again, page);
}

#[tokio::test]
async fn test_listing_is_a_copy() {
    let store = store();
    store.create_user(payload("jane")).await.unwrap();

    let mut page = store.get_all_users(PageRequest::default()).await.unwrap();
    page.users.clear();
    page.users.push(store.create_user(payload("john")).await.unwrap());

    assert_eq!(store.get_all_users(PageRequest::default()).await.unwrap().users.len(), 2);
}

#[tokio::test]
async fn test_parallel_registrations_of_same_email_admit_one() {
    let store = store();
    let mut handles = Vec::new();

    for n in 0..16 {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move {
            store
                .create_user(NewUser::new("race@example.com", format!("racer{}", n), "passw0rd"))
                .await
        }));
    }

    let mut created = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => created += 1,
            Err(err) => assert!(matches!(err, AppError::Conflict(_))),
        }
    }

    assert_eq!(created, 1);
    assert_eq!(store.count().await, 1);
}
