// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use conta::api::MemoryApi;
use conta::error::{ApiError, ValidationError};
use conta::session::{FileStore, KeyValueStore, MemoryStore, ProfileChange, SessionContext};
use tempfile::tempdir;

fn api() -> MemoryApi {
    MemoryApi::new().with_user(7, "ana@empresa.com", "Ana", "segredo")
}

#[test]
fn starts_logged_out_without_stored_user() {
    let ctx = SessionContext::open(MemoryStore::default()).unwrap();
    assert!(!ctx.session().authenticated);
    assert_eq!(ctx.token(), None);
}

#[test]
fn login_persists_user_under_the_user_key() {
    let api = api();
    let mut ctx = SessionContext::open(MemoryStore::default()).unwrap();
    ctx.login(&api, "ana@empresa.com", "segredo").unwrap();

    assert!(ctx.session().authenticated);
    assert_eq!(ctx.session().id, 7);
    assert_eq!(ctx.token(), Some("token-7"));

    let raw = ctx.store().get("user").unwrap().unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored["isAuthenticated"], true);
    assert_eq!(stored["email"], "ana@empresa.com");
}

#[test]
fn bad_credentials_keep_the_session_logged_out() {
    let api = api();
    let mut ctx = SessionContext::open(MemoryStore::default()).unwrap();
    let err = ctx.login(&api, "ana@empresa.com", "errada").unwrap_err();
    let api_err = err.downcast_ref::<ApiError>().unwrap();
    assert_eq!(api_err.user_message(), "E-mail ou senha inválidos");
    assert!(!ctx.session().authenticated);
    assert!(ctx.store().get("user").unwrap().is_none());
}

#[test]
fn logout_removes_the_stored_user() {
    let api = api();
    let mut ctx = SessionContext::open(MemoryStore::default()).unwrap();
    ctx.login(&api, "ana@empresa.com", "segredo").unwrap();
    ctx.logout().unwrap();
    assert!(!ctx.session().authenticated);
    assert_eq!(ctx.token(), None);
    assert!(ctx.store().get("user").unwrap().is_none());
}

#[test]
fn session_survives_reopening_the_file_store() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("session.json");
    let api = api();
    {
        let mut ctx = SessionContext::open(FileStore::new(path.clone())).unwrap();
        ctx.login(&api, "ana@empresa.com", "segredo").unwrap();
    }
    let ctx = SessionContext::open(FileStore::new(path.clone())).unwrap();
    assert!(ctx.session().authenticated);
    assert_eq!(ctx.session().name, "Ana");
}

#[test]
fn corrupt_session_entry_starts_logged_out() {
    let store = MemoryStore::default();
    store.set("user", "{not json").unwrap();
    let ctx = SessionContext::open(store).unwrap();
    assert!(!ctx.session().authenticated);
}

#[test]
fn profile_update_changes_name_and_email() {
    let api = api();
    let mut ctx = SessionContext::open(MemoryStore::default()).unwrap();
    ctx.login(&api, "ana@empresa.com", "segredo").unwrap();
    ctx.update_profile(
        &api,
        &ProfileChange {
            name: "Ana Souza".into(),
            email: "ana.souza@empresa.com".into(),
            new_password: Some("nova".into()),
            confirm_password: Some("nova".into()),
        },
    )
    .unwrap();
    assert_eq!(ctx.session().name, "Ana Souza");
    assert_eq!(ctx.session().email, "ana.souza@empresa.com");

    // the new password is the one the backend accepts now
    let mut again = SessionContext::open(MemoryStore::default()).unwrap();
    assert!(again.login(&api, "ana.souza@empresa.com", "nova").is_ok());
}

#[test]
fn profile_update_validates_before_sending() {
    let api = api();
    let mut ctx = SessionContext::open(MemoryStore::default()).unwrap();
    ctx.login(&api, "ana@empresa.com", "segredo").unwrap();
    let err = ctx
        .update_profile(
            &api,
            &ProfileChange {
                name: "Ana".into(),
                email: "sem-arroba".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ValidationError>(),
        Some(ValidationError::InvalidEmail(_))
    ));
    assert_eq!(api.call_count("update_profile"), 0);
}

#[test]
fn profile_update_requires_login() {
    let api = api();
    let mut ctx = SessionContext::open(MemoryStore::default()).unwrap();
    let err = ctx
        .update_profile(
            &api,
            &ProfileChange {
                name: "Ana".into(),
                email: "ana@empresa.com".into(),
                ..Default::default()
            },
        )
        .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<ApiError>(),
        Some(ApiError::Unauthenticated)
    ));
}
