#![allow(dead_code)]

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use event_booking::{app, config::Config, AppState};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

pub struct TestApp {
    pub router: Router,
    pub state: Arc<AppState>,
    _dir: tempfile::TempDir,
}

/// Fresh SQLite file per test, migrated and seeded with the default event.
pub async fn spawn_app() -> TestApp {
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite://{}", dir.path().join("app.db").display());
    let config = Config::from_lookup(|key| match key {
        "DATABASE_URL" => Some(url.clone()),
        "DB_POOL_SIZE" => Some("8".to_string()),
        _ => None,
    })
    .unwrap();

    let state = AppState::new(config).await.unwrap();
    TestApp {
        router: app(state.clone()),
        state,
        _dir: dir,
    }
}

impl TestApp {
    pub async fn get(&self, uri: &str) -> (StatusCode, Value) {
        let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
        send(self.router.clone(), request).await
    }

    pub async fn reserve(&self, body: Value) -> (StatusCode, Value) {
        self.post_raw("/api/bookings/reserve", body.to_string()).await
    }

    pub async fn post_raw(&self, uri: &str, body: String) -> (StatusCode, Value) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap();
        send(self.router.clone(), request).await
    }

    pub async fn booking_count(&self, event_id: i64) -> i64 {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE event_id = ?")
            .bind(event_id)
            .fetch_one(&self.state.db.pool)
            .await
            .unwrap()
    }
}

pub async fn send(router: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).into_owned()))
    };
    (status, body)
}
