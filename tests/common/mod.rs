// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! In-memory storage and fixtures for admin service tests.

#![allow(dead_code)]

use std::{
    collections::BTreeMap,
    sync::{
        Arc, Mutex, Once,
        atomic::{AtomicI64, Ordering}
    }
};

use serde_json::Value;
use vent::prelude::*;

/// Schema client over a map, recording every call it receives.
#[derive(Default)]
pub struct MemoryClient {
    records:     Mutex<BTreeMap<i64, EntityData>>,
    next_id:     AtomicI64,
    pub writes:  Mutex<Vec<RecordData>>,
    pub lists:   Mutex<Vec<QueryOptions>>,
    pub gets:    Mutex<Vec<GetOptions>>,
    pub options: Vec<SelectOption>
}

impl MemoryClient {
    pub fn with_records(records: impl IntoIterator<Item = EntityData>) -> Self {
        let records: BTreeMap<i64, EntityData> = records.into_iter().map(|r| (r.id(), r)).collect();
        let next_id = records.keys().max().copied().unwrap_or_default() + 1;
        Self {
            records: Mutex::new(records),
            next_id: AtomicI64::new(next_id),
            ..Self::default()
        }
    }

    pub fn record(&self, id: i64) -> Option<EntityData> {
        self.records.lock().unwrap().get(&id).cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().unwrap().len()
    }
}

fn from_json(data: &RecordData) -> EntityData {
    data.iter()
        .filter_map(|(name, value)| {
            let value = match value {
                Value::String(s) => FieldValue::string(s.clone()),
                Value::Bool(b) => FieldValue::bool(*b),
                Value::Number(n) => FieldValue::int(n.as_i64()?),
                _ => return None
            };
            Some((name.clone(), value))
        })
        .collect()
}

#[async_trait]
impl SchemaClient for MemoryClient {
    async fn list(&self, opts: QueryOptions) -> Result<Vec<EntityData>, ClientError> {
        self.lists.lock().unwrap().push(opts.clone());
        let records = self.records.lock().unwrap();
        let matching: Vec<EntityData> = records
            .values()
            .filter(|record| {
                let json = record.to_json();
                opts.filters
                    .iter()
                    .all(|(field, value)| json.get(field) == Some(value))
            })
            .skip(opts.offset)
            .take(if opts.limit == 0 { usize::MAX } else { opts.limit })
            .cloned()
            .collect();
        Ok(matching)
    }

    async fn get(&self, id: i64, opts: GetOptions) -> Result<EntityData, ClientError> {
        self.gets.lock().unwrap().push(opts);
        self.record(id)
            .ok_or_else(|| format!("record {id} not found").into())
    }

    async fn create(&self, data: RecordData) -> Result<EntityData, ClientError> {
        self.writes.lock().unwrap().push(data.clone());
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let record = from_json(&data).with("id", id);
        self.records.lock().unwrap().insert(id, record.clone());
        Ok(record)
    }

    async fn update(&self, id: i64, data: RecordData) -> Result<(), ClientError> {
        self.writes.lock().unwrap().push(data.clone());
        let mut records = self.records.lock().unwrap();
        let Some(current) = records.remove(&id) else {
            return Err(format!("record {id} not found").into());
        };
        let updated = from_json(&data)
            .into_iter()
            .fold(current, |record, (name, value)| record.with(name, value));
        records.insert(id, updated);
        Ok(())
    }

    async fn delete(&self, id: i64) -> Result<(), ClientError> {
        self.records
            .lock()
            .unwrap()
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| format!("record {id} not found").into())
    }

    async fn relation_options(
        &self,
        _relation: &RelationDef
    ) -> Result<Vec<SelectOption>, ClientError> {
        Ok(self.options.clone())
    }
}

pub fn fake_hash(password: &str) -> Result<String, AuthError> {
    Ok(format!("plain:{password}"))
}

pub fn fake_check(password: &str, hash: &str) -> Result<(), AuthError> {
    if hash.strip_prefix("plain:") == Some(password) {
        Ok(())
    } else {
        Err(AuthError::PasswordMismatch)
    }
}

pub fn fake_sign(claims: &Claims) -> Result<String, AuthError> {
    Ok(format!("token:{}", claims.sub))
}

pub fn fake_verify(token: &str) -> Result<Claims, AuthError> {
    let sub = token
        .strip_prefix("token:")
        .ok_or_else(|| AuthError::InvalidToken("bad prefix".into()))?;
    Ok(Claims {
        sub: sub.to_owned(),
        iat: 0,
        exp: i64::MAX
    })
}

pub fn group(name: &str, permissions: &[&str]) -> EntityData {
    let permissions = permissions
        .iter()
        .map(|p| EntityData::new().with("name", *p))
        .collect();
    EntityData::new().with("name", name).with(
        "permissions",
        FieldValue::relation(RelationData::loaded("Permission", "permissions/", permissions))
    )
}

pub fn user(id: i64, email: &str, password_hash: &str, groups: Vec<EntityData>) -> EntityData {
    EntityData::new()
        .with("id", id)
        .with("email", email)
        .with("password_hash", password_hash)
        .with("is_superuser", false)
        .with(
            "groups",
            FieldValue::relation(RelationData::loaded("Group", "groups/", groups))
        )
}

/// Stores and service wired together.
pub struct Fixture {
    pub users:   Arc<MemoryClient>,
    pub posts:   Arc<MemoryClient>,
    pub service: AdminService
}

pub const ALICE: i64 = 1;
pub const BOB: i64 = 2;
pub const ROOT: i64 = 3;

pub fn users_store(hash: impl Fn(&str) -> String) -> MemoryClient {
    MemoryClient::with_records([
        user(
            ALICE,
            "alice@example.com",
            &hash("hunter2"),
            vec![
                group("editors", &["view_post", "add_post", "change_post"]),
                group("staff", &["view_user"]),
            ]
        ),
        user(BOB, "bob@example.com", &hash("letmein"), vec![]),
        user(ROOT, "root@example.com", &hash("toor"), vec![]).with("is_superuser", true),
    ])
}

pub fn registry(
    users: Arc<MemoryClient>,
    posts: Arc<MemoryClient>,
    generator: Arc<dyn CredentialGenerator>
) -> SchemaRegistry {
    let user_schema = SchemaConfig::builder("User", users)
        .display_field("email")
        .field(FieldConfig::new("id", FieldType::Int).read_only())
        .field(FieldConfig::new("email", FieldType::String))
        .field(FieldConfig::new("password", FieldType::String).input_type("password"))
        .field(FieldConfig::new("password_hash", FieldType::String).read_only())
        .field(FieldConfig::new("is_superuser", FieldType::Bool))
        .field(
            FieldConfig::new("groups", FieldType::Relation)
                .relation(RelationDef::to_many("Group", "name", "groups/"))
        )
        .columns(["id", "email"])
        .field_mappers([hash_password("password", "password_hash", generator)])
        .build()
        .unwrap();

    let post_schema = SchemaConfig::builder("Post", posts)
        .display_field("title")
        .field(FieldConfig::new("id", FieldType::Int).read_only())
        .field(FieldConfig::new("title", FieldType::String))
        .field(
            FieldConfig::new("author", FieldType::ForeignKey)
                .relation(RelationDef::to_one("User", "email", "users/"))
        )
        .field_mappers([
            transform_field("title", |title: Value| match title.as_str() {
                Some(t) if !t.trim().is_empty() => Ok(Value::String(t.trim().to_owned())),
                _ => Err("title must not be blank")
            }),
            set_default("views", serde_json::json!(0)),
        ])
        .build()
        .unwrap();

    let group_schema = SchemaConfig::builder("Group", Arc::new(MemoryClient::default()))
        .display_field("name")
        .field(FieldConfig::new("id", FieldType::Int).read_only())
        .field(FieldConfig::new("name", FieldType::String))
        .build()
        .unwrap();

    SchemaRegistry::new()
        .with(user_schema)
        .and_then(|r| r.with(post_schema))
        .and_then(|r| r.with(group_schema))
        .unwrap()
}

/// Route service logs to the test writer, filtered by `RUST_LOG`.
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

/// Service with deterministic fake credential and token services.
pub fn fixture() -> Fixture {
    init_tracing();
    let users = Arc::new(users_store(|p| format!("plain:{p}")));
    let posts = Arc::new(MemoryClient {
        options: vec![SelectOption {
            value: ALICE,
            label: "alice@example.com".into()
        }],
        ..MemoryClient::with_records(Vec::new())
    });
    let registry = registry(users.clone(), posts.clone(), Arc::new(fake_hash));
    let service = AdminService::builder(AdminConfig::default(), registry)
        .credentials(fake_check)
        .token_services(Arc::new(fake_sign), Arc::new(fake_verify))
        .build()
        .unwrap();
    Fixture {
        users,
        posts,
        service
    }
}

impl Fixture {
    pub async fn principal(&self, id: i64) -> Principal {
        self.service
            .authenticate(Some(&format!("token:{id}")))
            .await
            .unwrap()
    }
}
