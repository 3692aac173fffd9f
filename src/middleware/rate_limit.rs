use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use tracing::warn;

const WINDOW: Duration = Duration::from_secs(1);

#[derive(Debug)]
struct WindowState {
    start: Instant,
    count: u32,
}

/// Fixed one-second window shared by every route the layer wraps.
#[derive(Clone, Debug)]
pub struct SubmissionThrottle {
    rps: u32,
    window: Arc<Mutex<WindowState>>,
}

impl SubmissionThrottle {
    pub fn new(rps: u32) -> Self {
        Self {
            rps: rps.max(1),
            window: Arc::new(Mutex::new(WindowState {
                start: Instant::now(),
                count: 0,
            })),
        }
    }

    pub fn rps(&self) -> u32 {
        self.rps
    }

    fn try_acquire(&self, now: Instant) -> bool {
        // A panic while holding the lock cannot leave the counter inconsistent.
        let mut guard = self.window.lock().unwrap_or_else(PoisonError::into_inner);
        if now.duration_since(guard.start) >= WINDOW {
            guard.start = now;
            guard.count = 0;
        }
        if guard.count < self.rps {
            guard.count += 1;
            true
        } else {
            false
        }
    }
}

pub async fn throttle_middleware(
    State(throttle): State<SubmissionThrottle>,
    req: Request<Body>,
    next: Next,
) -> Response {
    if !throttle.try_acquire(Instant::now()) {
        warn!(path = %req.uri().path(), rps = throttle.rps(), "submission rate limit exceeded");
        return (
            StatusCode::TOO_MANY_REQUESTS,
            [(header::RETRY_AFTER, "1")],
            Json(json!({ "error": "Too many requests, please try again shortly" })),
        )
            .into_response();
    }
    next.run(req).await
}
