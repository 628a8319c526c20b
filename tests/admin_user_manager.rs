use std::sync::Arc;

use admin_users_api::errors::AppError;
use admin_users_api::models::admin::Admin;
use admin_users_api::repositories::admin_repository::AdminStore;
use admin_users_api::services::admin_listener::AdminCreatedListener;
use admin_users_api::services::admin_user_manager::AdminUserManager;
use admin_users_api::services::password_hasher::{BcryptHasher, PasswordHasher};
use admin_users_api::test_helpers::{InMemoryAdminStore, StubHasher};

const EMAIL: &str = "admin@mail.com";
const PASSWORD: &str = "test";

#[tokio::test]
async fn email_is_unique_until_an_admin_uses_it() {
    let store = InMemoryAdminStore::new();
    let manager = AdminUserManager::new(Arc::new(store.clone()));
    assert!(manager.email_is_unique(EMAIL).await.unwrap());

    store.save(&mut Admin::new(EMAIL)).await.unwrap();
    assert!(!manager.email_is_unique(EMAIL).await.unwrap());
}

#[tokio::test]
async fn created_admin_waits_for_the_pre_flush_step() {
    // No listener: the store saves the admin exactly as the manager built it
    let store = InMemoryAdminStore::new();
    let manager = AdminUserManager::new(Arc::new(store.clone()));

    let mut admin = manager
        .create_admin(EMAIL, PASSWORD, Some("Admin".into()), Some("Admin".into()))
        .await
        .unwrap();

    assert_eq!(admin.email, EMAIL);
    assert_eq!(admin.plain_password.as_deref(), Some(PASSWORD));
    assert_eq!(admin.first_name.as_deref(), Some("Admin"));
    assert_eq!(admin.last_name.as_deref(), Some("Admin"));
    assert!(admin.password.is_none());
    assert!(admin.created_at().is_none());

    AdminCreatedListener::new(Arc::new(StubHasher))
        .pre_flush(&mut admin)
        .await
        .unwrap();

    assert_eq!(admin.password.as_deref(), Some("hashed:test"));
    assert!(admin.created_at().is_some());
    assert_eq!(admin.email, EMAIL);
}

#[tokio::test]
async fn store_listener_hashes_before_persisting() {
    let hasher = Arc::new(BcryptHasher::new(4));
    let store =
        InMemoryAdminStore::new().with_listener(AdminCreatedListener::new(hasher.clone()));
    let manager = AdminUserManager::new(Arc::new(store.clone()));

    let admin = manager.create_admin(EMAIL, PASSWORD, None, None).await.unwrap();

    let saved = store.admins();
    assert_eq!(saved.len(), 1);
    assert_eq!(saved[0].id, admin.id);
    assert!(saved[0].plain_password.is_none());
    assert!(saved[0].created_at().is_some());
    let hash = saved[0].password.as_deref().expect("hash");
    assert!(hasher.verify(hash, PASSWORD).await.unwrap());
}

#[tokio::test]
async fn second_admin_with_same_email_conflicts() {
    let store = InMemoryAdminStore::new();
    let manager = AdminUserManager::new(Arc::new(store));

    manager.create_admin(EMAIL, PASSWORD, None, None).await.unwrap();
    let err = manager
        .create_admin(EMAIL, PASSWORD, None, None)
        .await
        .unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}
