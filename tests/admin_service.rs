// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Admin service behaviour over in-memory storage.

mod common;

use std::sync::Arc;

use common::{ALICE, BOB, ROOT, fixture};
use serde_json::{Value, json};
use vent::prelude::*;

fn form(value: Value) -> RecordData {
    match value {
        Value::Object(map) => map,
        _ => panic!("expected object")
    }
}

#[tokio::test]
async fn login_then_authenticate_round_trip() {
    let fx = fixture();
    let token = fx
        .service
        .login("alice@example.com", "hunter2")
        .await
        .unwrap();
    assert_eq!(token, "token:1");

    let principal = fx.service.authenticate(Some(&token)).await.unwrap();
    assert_eq!(principal.id(), Some(ALICE));
    let user = principal.user().unwrap();
    assert!(user.has_edge("groups"));

    let lookup = fx.users.lists.lock().unwrap()[0].clone();
    assert_eq!(lookup.limit, 1);
    assert_eq!(lookup.filters.get("email"), Some(&json!("alice@example.com")));

    let fetch = fx.users.gets.lock().unwrap()[0].clone();
    assert_eq!(fetch.with_edges, PRINCIPAL_EDGE_PATHS);
}

#[tokio::test]
async fn login_failures_are_uniform() {
    let fx = fixture();
    let unknown = fx
        .service
        .login("nobody@example.com", "hunter2")
        .await
        .unwrap_err();
    let wrong = fx
        .service
        .login("alice@example.com", "hunter3")
        .await
        .unwrap_err();

    assert!(matches!(unknown, AdminError::InvalidCredentials));
    assert!(matches!(wrong, AdminError::InvalidCredentials));
    assert_eq!(unknown.to_string(), wrong.to_string());
    assert_eq!(wrong.status(), 401);
}

#[tokio::test]
async fn missing_or_bad_token() {
    let fx = fixture();
    assert!(fx.service.authenticate(None).await.unwrap().is_anonymous());
    assert!(fx.service.authenticate(Some("")).await.unwrap().is_anonymous());

    let err = fx.service.authenticate(Some("forged")).await.unwrap_err();
    assert!(err.is_unauthenticated());

    let err = fx.service.authenticate(Some("token:alice")).await.unwrap_err();
    assert!(matches!(err, AdminError::Auth(AuthError::InvalidClaims(_))));
}

#[tokio::test]
async fn anonymous_is_unauthenticated_not_forbidden() {
    let fx = fixture();
    let err = fx
        .service
        .list(&Principal::Anonymous, "Post", QueryOptions::new())
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::Unauthenticated));
    assert_eq!(err.status(), 401);
}

#[tokio::test]
async fn missing_permission_is_forbidden() {
    let fx = fixture();
    let bob = fx.principal(BOB).await;
    let err = fx
        .service
        .list(&bob, "Post", QueryOptions::new())
        .await
        .unwrap_err();
    assert!(err.is_forbidden());
    assert_eq!(err.status(), 403);
    assert_eq!(err.to_string(), "missing permission `view_post`");

    let alice = fx.principal(ALICE).await;
    assert!(fx.service.list(&alice, "Post", QueryOptions::new()).await.is_ok());
    let err = fx.service.delete(&alice, "Post", 1).await.unwrap_err();
    assert!(err.is_forbidden());
}

#[tokio::test]
async fn superuser_bypasses_permissions() {
    let fx = fixture();
    let root = fx.principal(ROOT).await;
    fx.service.delete(&root, "User", BOB).await.unwrap();
    assert!(fx.users.record(BOB).is_none());
}

#[tokio::test]
async fn list_defaults_to_id_order() {
    let fx = fixture();
    let alice = fx.principal(ALICE).await;
    fx.service
        .list(&alice, "Post", QueryOptions::new().limit(5))
        .await
        .unwrap();
    fx.service
        .list(
            &alice,
            "Post",
            QueryOptions::new().order_by("title", SortDirection::Desc)
        )
        .await
        .unwrap();

    let lists = fx.posts.lists.lock().unwrap();
    assert_eq!(lists[0].order_by.as_deref(), Some("id"));
    assert_eq!(lists[0].limit, 5);
    assert_eq!(lists[1].order_by.as_deref(), Some("title"));
    assert!(lists[1].order.is_desc());
}

#[tokio::test]
async fn list_rejects_undeclared_edges_before_storage() {
    let fx = fixture();
    let root = fx.principal(ROOT).await;

    let err = fx
        .service
        .list(&root, "User", QueryOptions::new().with_edges(["nickname"]))
        .await
        .unwrap_err();
    assert!(matches!(&err, AdminError::UnknownField { schema, field } if schema == "User" && field == "nickname"));

    let err = fx
        .service
        .list(&root, "User", QueryOptions::new().with_edges(["groups__members"]))
        .await
        .unwrap_err();
    assert!(matches!(&err, AdminError::UnknownField { schema, field } if schema == "Group" && field == "members"));
    assert_eq!(err.status(), 400);
    assert!(fx.users.lists.lock().unwrap().is_empty());

    fx.service
        .list(&root, "User", QueryOptions::new().with_edges(["groups"]))
        .await
        .unwrap();
    assert_eq!(fx.users.lists.lock().unwrap()[0].with_edges, ["groups"]);
}

#[tokio::test]
async fn create_runs_coercion_and_mappers_before_storage() {
    let fx = fixture();
    let alice = fx.principal(ALICE).await;
    let created = fx
        .service
        .create(
            &alice,
            "Post",
            &form(json!({"id": 99, "title": "  Hello  ", "author": "1", "spam": true}))
        )
        .await
        .unwrap();

    let writes = fx.posts.writes.lock().unwrap();
    assert_eq!(
        Value::Object(writes[0].clone()),
        json!({"title": "Hello", "author": 1, "views": 0})
    );
    assert_eq!(created.get_string("title"), "Hello");
    assert_ne!(created.id(), 99);
}

#[tokio::test]
async fn failed_mapper_stores_nothing() {
    let fx = fixture();
    let alice = fx.principal(ALICE).await;
    let err = fx
        .service
        .create(&alice, "Post", &form(json!({"title": "   "})))
        .await
        .unwrap_err();

    assert!(matches!(&err, AdminError::Mapper(e) if e.stage() == "\"title\" -> \"title\""));
    assert_eq!(err.status(), 422);
    assert_eq!(fx.posts.write_count(), 0);
}

#[tokio::test]
async fn invalid_form_stores_nothing() {
    let fx = fixture();
    let alice = fx.principal(ALICE).await;
    let err = fx
        .service
        .update(&alice, "Post", 1, &form(json!({"author": "someone"})))
        .await
        .unwrap_err();

    assert!(matches!(&err, AdminError::InvalidForm { field, .. } if field == "author"));
    assert_eq!(err.status(), 400);
    assert_eq!(fx.posts.write_count(), 0);
}

#[tokio::test]
async fn password_is_hashed_before_storage() {
    let fx = fixture();
    let root = fx.principal(ROOT).await;
    let created = fx
        .service
        .create(
            &root,
            "User",
            &form(json!({"email": "carol@example.com", "password": "s3cret", "password_hash": "forged"}))
        )
        .await
        .unwrap();

    let write = fx.users.writes.lock().unwrap()[0].clone();
    assert!(!write.contains_key("password"));
    assert_eq!(write["password_hash"], json!("plain:s3cret"));

    let token = fx
        .service
        .login("carol@example.com", "s3cret")
        .await
        .unwrap();
    assert_eq!(token, format!("token:{}", created.id()));
}

#[tokio::test]
async fn empty_password_keeps_stored_hash() {
    let fx = fixture();
    let root = fx.principal(ROOT).await;
    fx.service
        .update(
            &root,
            "User",
            ALICE,
            &form(json!({"email": "alice@example.org", "password": ""}))
        )
        .await
        .unwrap();

    let write = fx.users.writes.lock().unwrap()[0].clone();
    assert_eq!(Value::Object(write), json!({"email": "alice@example.org"}));
    assert!(
        fx.service
            .login("alice@example.org", "hunter2")
            .await
            .is_ok()
    );
}

#[tokio::test]
async fn get_eager_loads_declared_relations() {
    let fx = fixture();
    let alice = fx.principal(ALICE).await;
    let fetched = fx.service.get(&alice, "User", ALICE).await.unwrap();
    assert_eq!(fetched.get_string("email"), "alice@example.com");

    let gets = fx.users.gets.lock().unwrap();
    assert_eq!(gets.last().unwrap().with_edges, ["groups"]);
}

#[tokio::test]
async fn storage_errors_propagate() {
    let fx = fixture();
    let root = fx.principal(ROOT).await;
    let err = fx.service.get(&root, "Post", 404).await.unwrap_err();
    assert!(matches!(err, AdminError::Storage(_)));
    assert_eq!(err.to_string(), "storage error: record 404 not found");
}

#[tokio::test]
async fn relation_options_for_declared_relations_only() {
    let fx = fixture();
    let alice = fx.principal(ALICE).await;
    let options = fx
        .service
        .relation_options(&alice, "Post", "author")
        .await
        .unwrap();
    assert_eq!(options[0].label, "alice@example.com");

    let err = fx
        .service
        .relation_options(&alice, "Post", "title")
        .await
        .unwrap_err();
    assert!(matches!(err, AdminError::UnknownField { .. }));
}

#[tokio::test]
async fn unknown_schema_is_not_found() {
    let fx = fixture();
    let root = fx.principal(ROOT).await;
    let err = fx
        .service
        .list(&root, "Comment", QueryOptions::new())
        .await
        .unwrap_err();
    assert_eq!(err.status(), 404);
}

#[test]
fn navigation_is_sorted_with_urls() {
    let fx = fixture();
    let nav = fx.service.navigation();
    let names: Vec<&str> = nav.iter().map(|l| l.name.as_str()).collect();
    assert_eq!(names, ["Group", "Post", "User"]);
    assert_eq!(nav[1].url, "/admin/posts/");
}

#[test]
fn build_requires_auth_services_and_user_schema() {
    let users = Arc::new(common::MemoryClient::default());
    let posts = Arc::new(common::MemoryClient::default());
    let registry = common::registry(users, posts, Arc::new(common::fake_hash));

    let err = AdminService::builder(AdminConfig::default(), registry.clone())
        .token_services(Arc::new(common::fake_sign), Arc::new(common::fake_verify))
        .build()
        .unwrap_err();
    assert!(matches!(err, AdminError::Config(msg) if msg.contains("credential")));

    let config = AdminConfig {
        user_schema: "Account".into(),
        ..AdminConfig::default()
    };
    let err = AdminService::builder(config, registry)
        .credentials(common::fake_check)
        .token_services(Arc::new(common::fake_sign), Arc::new(common::fake_verify))
        .build()
        .unwrap_err();
    assert!(matches!(err, AdminError::UnknownSchema(name) if name == "Account"));
}

#[cfg(feature = "auth")]
mod default_auth {
    use super::*;

    #[tokio::test]
    async fn argon2_and_jwt_round_trip() {
        let credentials = Argon2Credentials::default();
        let users = Arc::new(common::users_store(|p| credentials.generate(p).unwrap()));
        let posts = Arc::new(common::MemoryClient::default());
        let registry = common::registry(users, posts, Arc::new(credentials.clone()));

        let service = AdminService::builder(AdminConfig::default(), registry)
            .default_auth(b"integration-secret-at-least-32-bytes!".to_vec())
            .build()
            .unwrap();

        let token = service.login("alice@example.com", "hunter2").await.unwrap();
        assert_eq!(token.split('.').count(), 3);
        let principal = service.authenticate(Some(&token)).await.unwrap();
        assert_eq!(principal.id(), Some(ALICE));

        assert!(matches!(
            service.login("alice@example.com", "wrong").await,
            Err(AdminError::InvalidCredentials)
        ));
        assert!(service.authenticate(Some("a.b.c")).await.unwrap_err().is_unauthenticated());
    }
}
