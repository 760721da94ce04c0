use axum::body::Body;
use axum::extract::State;
use axum::http::{Request, StatusCode};
use axum::middleware::Next;
use axum::response::Response;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

/// Fixed one-minute windows keyed by client IP.
#[derive(Clone)]
pub struct RateLimitState {
    windows: Arc<Mutex<HashMap<String, u32>>>,
    pub max_per_minute: u32,
}

impl RateLimitState {
    pub fn new(max_per_minute: u32) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            max_per_minute,
        }
    }

    /// Returns the request count for `ip` in the current minute, this one included.
    pub async fn hit(&self, ip: &str, minute: &str) -> u32 {
        let suffix = format!(":{}", minute);
        let key = format!("rate:{}{}", ip, suffix);
        let mut windows = self.windows.lock().await;
        windows.retain(|k, _| k.ends_with(&suffix));
        let count = windows.entry(key).or_insert(0);
        *count += 1;
        *count
    }
}

pub async fn enforce(
    State(state): State<RateLimitState>,
    request: Request<Body>,
    next: Next,
) -> Response {
    if state.max_per_minute == 0 {
        return next.run(request).await;
    }

    let ip = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
        .split(',')
        .next()
        .unwrap_or("unknown")
        .trim()
        .to_string();

    let minute = chrono::Utc::now().format("%Y%m%d%H%M").to_string();
    let count = state.hit(&ip, &minute).await;
    if count > state.max_per_minute {
        tracing::warn!("rate limit exceeded ip={} count={}", ip, count);
        return Response::builder()
            .status(StatusCode::TOO_MANY_REQUESTS)
            .body(Body::from("rate limit exceeded"))
            .unwrap_or_else(|_| Response::new(Body::from("rate limit exceeded")));
    }

    next.run(request).await
}
