#![allow(dead_code)]

use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::http::HeaderValue;
use chrono::Utc;
use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use uuid::Uuid;

use contact_relay::config::Config;
use contact_relay::models::{Message, NewMessage};
use contact_relay::notify::{NotifyError, Notifier};
use contact_relay::store::{MessageStore, PgMessageStore, StoreError};

/// In-memory message store with switchable failures.
#[derive(Default)]
pub struct MemoryStore {
    rows: Mutex<Vec<Message>>,
    fail_writes: AtomicBool,
    fail_reads: AtomicBool,
}

impl MemoryStore {
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    pub fn len(&self) -> usize {
        self.rows.lock().unwrap().len()
    }
}

#[async_trait]
impl MessageStore for MemoryStore {
    async fn create(&self, draft: &NewMessage) -> Result<Message, StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut));
        }
        let now = Utc::now();
        let message = Message {
            id: Uuid::now_v7(),
            name: draft.name().to_string(),
            email: draft.email().to_string(),
            message: draft.message().to_string(),
            created_at: now,
            updated_at: now,
        };
        self.rows.lock().unwrap().push(message.clone());
        Ok(message)
    }

    async fn list_all(&self) -> Result<Vec<Message>, StoreError> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(StoreError::Unavailable(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.rows.lock().unwrap().clone();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(rows)
    }
}

/// Records every notification; optionally fails each one.
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Message>>,
    attempts: AtomicUsize,
    fail: AtomicBool,
}

impl RecordingNotifier {
    pub fn failing() -> Self {
        let notifier = Self::default();
        notifier.fail.store(true, Ordering::SeqCst);
        notifier
    }

    pub fn attempts(&self) -> usize {
        self.attempts.load(Ordering::SeqCst)
    }

    pub fn sent(&self) -> Vec<Message> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn notify(&self, message: &Message) -> Result<(), NotifyError> {
        self.attempts.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(NotifyError::NotConfigured);
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// A running test server backed by store `S`.
pub struct TestApp<S> {
    pub addr: SocketAddr,
    pub client: Client,
    pub store: Arc<S>,
}

impl<S> TestApp<S> {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// POST a JSON body to the contact endpoint, return (body, status).
    pub async fn submit(&self, data: &Value) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .json(data)
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    /// POST a raw body with the given content type, return (body, status).
    pub async fn submit_raw(&self, content_type: &str, body: &str) -> (Value, StatusCode) {
        let resp = self
            .client
            .post(self.url("/api/contact"))
            .header("content-type", content_type)
            .body(body.to_string())
            .send()
            .await
            .expect("submit request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }

    pub async fn list(&self) -> (Value, StatusCode) {
        let resp = self
            .client
            .get(self.url("/api/messages"))
            .send()
            .await
            .expect("list request failed");
        let status = resp.status();
        let body: Value = resp.json().await.unwrap_or(json!(null));
        (body, status)
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused/unused".to_string(),
        database_max_connections: 1,
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        cors_origins: vec![HeaderValue::from_static("http://localhost:5173")],
        max_body_size: 16 * 1024,
        log_level: "warn".to_string(),
        smtp: None,
    }
}

/// Serve the app on a random port with the given store and notifier.
pub async fn serve<S>(store: Arc<S>, notifier: Arc<dyn Notifier>) -> TestApp<S>
where
    S: MessageStore + 'static,
{
    let app = contact_relay::build_app(store.clone(), notifier, &test_config());

    // Bind to random port
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind to random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("Server failed");
    });

    TestApp {
        addr,
        client: Client::new(),
        store,
    }
}

/// Spawn the app with an in-memory store and the given notifier.
pub async fn spawn_app(notifier: Arc<dyn Notifier>) -> TestApp<MemoryStore> {
    serve(Arc::new(MemoryStore::default()), notifier).await
}

/// Spawn the app on a fresh PostgreSQL database. Drop it with `drop_test_db`.
pub async fn spawn_pg_app(notifier: Arc<dyn Notifier>) -> (TestApp<PgMessageStore>, TestDb) {
    let db = create_test_db().await;
    let app = serve(Arc::new(PgMessageStore::new(db.pool.clone())), notifier).await;
    (app, db)
}

/// A throwaway database created from `DATABASE_URL`.
pub struct TestDb {
    pub pool: PgPool,
    pub name: String,
    admin_url: String,
}

fn admin_url(base_url: &str) -> String {
    base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/postgres"))
        .unwrap_or_else(|| base_url.to_string())
}

/// Create a uniquely named database and run migrations on it.
pub async fn create_test_db() -> TestDb {
    let _ = dotenvy::dotenv();
    let base_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for tests");
    let admin_url = admin_url(&base_url);
    let name = format!("contact_test_{}", Uuid::now_v7().simple());

    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&admin_url)
        .await
        .expect("Failed to connect to postgres for test DB creation");
    sqlx::query(&format!("CREATE DATABASE \"{name}\""))
        .execute(&admin_pool)
        .await
        .expect("Failed to create test database");
    admin_pool.close().await;

    let test_url = base_url
        .rsplit_once('/')
        .map(|(base, _)| format!("{base}/{name}"))
        .unwrap_or_else(|| base_url.clone());
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&test_url)
        .await
        .expect("Failed to connect to test database");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to run migrations on test database");

    TestDb {
        pool,
        name,
        admin_url,
    }
}

/// Drop the test database after tests complete.
pub async fn drop_test_db(db: TestDb) {
    db.pool.close().await;

    let admin_pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&db.admin_url)
        .await
        .expect("Failed to connect for cleanup");
    let _ = sqlx::query(&format!("DROP DATABASE IF EXISTS \"{}\" WITH (FORCE)", db.name))
        .execute(&admin_pool)
        .await;
    admin_pool.close().await;
}
