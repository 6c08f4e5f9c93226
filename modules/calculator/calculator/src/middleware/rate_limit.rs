//! Fixed-window rate limiting keyed by client address.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{ConnectInfo, Request};
use axum::http::header::RETRY_AFTER;
use axum::http::{HeaderMap, HeaderValue};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use calc_errors::ErrorCode;
use dashmap::DashMap;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::config::RateLimitConfig;

const UNKNOWN_CLIENT: &str = "unknown";

#[derive(Debug, Clone, Copy)]
struct Window {
    started: Instant,
    count: u32,
}

/// Counts requests per client in fixed windows. The window of a client starts with its
/// first request and resets once `window` has elapsed.
#[derive(Debug)]
pub struct FixedWindowLimiter {
    enabled: bool,
    limit: u32,
    window: Duration,
    exclude_paths: Vec<String>,
    windows: DashMap<String, Window>,
}

impl FixedWindowLimiter {
    #[must_use]
    pub fn new(config: &RateLimitConfig, exclude_paths: Vec<String>) -> Self {
        Self {
            enabled: config.enabled,
            limit: config.limit,
            window: config.window,
            exclude_paths,
            windows: DashMap::new(),
        }
    }

    #[must_use]
    pub fn window(&self) -> Duration {
        self.window
    }

    /// Whether requests to `path` are counted at all.
    #[must_use]
    pub fn applies_to(&self, path: &str) -> bool {
        self.enabled && !self.exclude_paths.iter().any(|p| p == path)
    }

    /// Count one request for `key`.
    ///
    /// # Errors
    /// Returns the time until the current window ends when the client is over its limit.
    pub fn try_acquire(&self, key: &str) -> Result<(), Duration> {
        self.try_acquire_at(key, Instant::now())
    }

    /// # Errors
    /// See [`Self::try_acquire`].
    pub fn try_acquire_at(&self, key: &str, now: Instant) -> Result<(), Duration> {
        if !self.enabled {
            return Ok(());
        }
        let mut entry = self.windows.entry(key.to_owned()).or_insert(Window {
            started: now,
            count: 0,
        });
        let elapsed = now.saturating_duration_since(entry.started);
        if elapsed >= self.window {
            *entry = Window {
                started: now,
                count: 0,
            };
        }
        if entry.count < self.limit {
            entry.count += 1;
            Ok(())
        } else {
            Err(self.window.saturating_sub(elapsed))
        }
    }

    /// Drop windows that have fully elapsed. Returns how many were removed.
    #[must_use]
    pub fn purge_expired(&self) -> usize {
        self.purge_expired_at(Instant::now())
    }

    #[must_use]
    pub fn purge_expired_at(&self, now: Instant) -> usize {
        let before = self.windows.len();
        self.windows
            .retain(|_, w| now.saturating_duration_since(w.started) < self.window);
        before.saturating_sub(self.windows.len())
    }

    #[must_use]
    pub fn tracked_clients(&self) -> usize {
        self.windows.len()
    }

    /// Purge expired windows every `interval` until `cancel` fires.
    pub async fn run_purge(self: Arc<Self>, interval: Duration, cancel: CancellationToken) {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            tokio::select! {
                () = cancel.cancelled() => break,
                _ = ticker.tick() => {
                    let purged = self.purge_expired();
                    if purged > 0 {
                        debug!(purged, remaining = self.tracked_clients(), "purged rate limit windows");
                    }
                }
            }
        }
        debug!("rate limit purge task stopped");
    }
}

/// First `X-Forwarded-For` entry, else `X-Real-IP`, else the peer address.
#[must_use]
pub fn client_key(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
    };

    if let Some(first) = header("x-forwarded-for")
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    {
        return first.to_owned();
    }
    if let Some(real_ip) = header("x-real-ip") {
        return real_ip.to_owned();
    }
    peer.map_or_else(|| UNKNOWN_CLIENT.to_owned(), |addr| addr.ip().to_string())
}

fn retry_after_secs(remaining: Duration) -> u64 {
    let secs = remaining.as_secs() + u64::from(remaining.subsec_nanos() > 0);
    secs.max(1)
}

pub async fn rate_limit_middleware(
    limiter: Arc<FixedWindowLimiter>,
    req: Request,
    next: Next,
) -> Response {
    if !limiter.applies_to(req.uri().path()) {
        return next.run(req).await;
    }

    let peer = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let key = client_key(req.headers(), peer);

    match limiter.try_acquire(&key) {
        Ok(()) => next.run(req).await,
        Err(remaining) => {
            let retry_after = retry_after_secs(remaining);
            warn!(client = %key, path = %req.uri().path(), retry_after, "rate limit exceeded");
            let mut response = ErrorCode::RateLimited
                .to_error()
                .with_details("Too many requests. Please try again later.")
                .into_response();
            response
                .headers_mut()
                .insert(RETRY_AFTER, HeaderValue::from(retry_after));
            response
        }
    }
}
