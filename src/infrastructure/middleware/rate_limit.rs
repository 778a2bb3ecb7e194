// Rate limiting middleware - fixed window per client address

use axum::{
    extract::{ConnectInfo, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;
use crate::error::AppError;

/// Rate limiter for API requests
#[derive(Debug)]
pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    trust_forwarded_for: bool,
    state: Arc<RwLock<LimiterState>>,
}

#[derive(Debug)]
struct LimiterState {
    windows: HashMap<String, RateLimitWindow>,
    last_sweep: Instant,
}

#[derive(Debug)]
struct RateLimitWindow {
    requests: u32,
    window_start: Instant,
}

impl RateLimiter {
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            trust_forwarded_for: false,
            state: Arc::new(RwLock::new(LimiterState {
                windows: HashMap::new(),
                last_sweep: Instant::now(),
            })),
        }
    }

    /// Key clients by `X-Forwarded-For` instead of the socket peer.
    pub fn trust_forwarded_for(mut self, trust: bool) -> Self {
        self.trust_forwarded_for = trust;
        self
    }

    pub fn from_config(config: &RateLimitConfig) -> Self {
        Self::new(config.max_requests, config.window())
            .trust_forwarded_for(config.trust_forwarded_for)
    }

    /// Count one request for `identifier`. Returns false once the window's
    /// budget is spent.
    pub async fn check_rate_limit(&self, identifier: &str) -> bool {
        self.check_at(identifier, Instant::now()).await
    }

    async fn check_at(&self, identifier: &str, now: Instant) -> bool {
        let mut state = self.state.write().await;

        // Expired windows carry no budget, so dropping them changes nothing
        // except memory. At most one sweep per window length.
        if now.saturating_duration_since(state.last_sweep) >= self.window {
            let window = self.window;
            let before = state.windows.len();
            state
                .windows
                .retain(|_, w| now.saturating_duration_since(w.window_start) < window);
            state.last_sweep = now;
            debug!(evicted = before - state.windows.len(), "Swept expired rate limit windows");
        }

        let window = state.windows.entry(identifier.to_string()).or_insert(RateLimitWindow {
            requests: 0,
            window_start: now,
        });

        if now.saturating_duration_since(window.window_start) >= self.window {
            window.requests = 0;
            window.window_start = now;
        }

        if window.requests >= self.max_requests {
            false
        } else {
            window.requests += 1;
            true
        }
    }

    #[cfg(test)]
    async fn tracked_clients(&self) -> usize {
        self.state.read().await.windows.len()
    }

    /// Peer IP, or the first `X-Forwarded-For` hop when the proxy is trusted.
    fn client_key(&self, headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
        let forwarded = if self.trust_forwarded_for {
            headers
                .get("x-forwarded-for")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.split(',').next())
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        } else {
            None
        };

        forwarded
            .or_else(|| peer.map(|addr| addr.ip().to_string()))
            .unwrap_or_else(|| "unknown".to_string())
    }
}

pub async fn rate_limit_middleware(
    State(limiter): State<Arc<RateLimiter>>,
    request: Request,
    next: Next,
) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0);
    let key = limiter.client_key(request.headers(), peer);

    if limiter.check_rate_limit(&key).await {
        next.run(request).await
    } else {
        warn!(client = %key, path = %request.uri().path(), "Rate limit exceeded");
        AppError::TooManyRequests("Too many requests, please try again later".to_string())
            .into_response()
    }
}
