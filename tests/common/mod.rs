#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use interview_scheduler::{
    database::bootstrap,
    middleware::cors::cors_layer,
    error::Result,
    services::{
        email::{EmailProvider, Mailer},
        notification_service::NotificationService,
    },
    AppState,
};
use serde_json::Value as JsonValue;
use sqlx::{postgres::PgPoolOptions, PgPool};
use tokio::sync::OnceCell;
use tower::ServiceExt;

static BOOTSTRAPPED: OnceCell<()> = OnceCell::const_new();

pub fn database_url() -> Option<String> {
    dotenvy::dotenv().ok();
    std::env::var("DATABASE_URL").ok().filter(|v| !v.is_empty())
}

/// Pool against `DATABASE_URL` with the schema in place, or `None` when no
/// database is configured and the calling test should be skipped.
pub async fn test_pool() -> Option<PgPool> {
    let Some(url) = database_url() else {
        eprintln!("DATABASE_URL not set, skipping database test");
        return None;
    };

    BOOTSTRAPPED
        .get_or_init(|| async {
            bootstrap::run(&url).await.expect("bootstrap");
        })
        .await;

    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(&url)
        .await
        .expect("pool");
    Some(pool)
}

pub fn app_with_pool(pool: PgPool) -> Router {
    app_with_mailer(pool, Arc::new(EmailProvider::Disabled))
}

pub fn app_with_mailer(pool: PgPool, mailer: Arc<dyn Mailer>) -> Router {
    let (notifications, _worker) = NotificationService::spawn(mailer);
    let state = AppState::new(pool, notifications);
    interview_scheduler::app(state, cors_layer(None).expect("cors"))
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub to: String,
    pub subject: String,
    pub html: String,
}

/// Keeps every email handed to it, in delivery order.
#[derive(Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<SentEmail>>,
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<SentEmail> {
        self.sent.lock().unwrap().clone()
    }

    /// Waits up to two seconds for at least `count` deliveries.
    pub async fn wait_for(&self, count: usize) -> Vec<SentEmail> {
        for _ in 0..100 {
            let sent = self.sent();
            if sent.len() >= count {
                return sent;
            }
            tokio::time::sleep(Duration::from_millis(20)).await;
        }
        self.sent()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, to: &str, subject: &str, html: &str) -> Result<()> {
        self.sent.lock().unwrap().push(SentEmail {
            to: to.to_string(),
            subject: subject.to_string(),
            html: html.to_string(),
        });
        Ok(())
    }
}

pub fn unique_email(prefix: &str) -> String {
    format!("{}_{}@example.com", prefix, uuid::Uuid::new_v4().simple())
}

pub async fn send(app: &Router, request: Request<Body>) -> (StatusCode, JsonValue) {
    let resp = app.clone().oneshot(request).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        JsonValue::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null)
    };
    (status, body)
}

pub fn json_request(method: &str, uri: &str, body: &JsonValue) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}
