// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Client-side rate limiting for RPC requests.
//!
//! A token bucket that lets callers go into debt: each request takes one
//! token immediately and, if the bucket is overdrawn, sleeps until its token
//! would have been refilled. The fan-out waves enqueue hundreds of requests
//! at once, and reserving a slot up front spreads them evenly without a
//! polling loop.

use std::{
    future::Future,
    pin::Pin,
    sync::Arc,
    task::{Context, Poll},
    time::Duration,
};

use tokio::{sync::Mutex, time::Instant};
use tower::Layer;

/// Token bucket state shared by every clone of the service.
#[derive(Debug)]
struct Bucket {
    capacity: f64,
    tokens: f64,
    per_token: Duration,
    updated: Instant,
}

impl Bucket {
    fn new(requests: u32, period: Duration) -> Self {
        let requests = requests.max(1);
        Self {
            capacity: f64::from(requests),
            tokens: f64::from(requests),
            per_token: period / requests,
            updated: Instant::now(),
        }
    }

    /// Takes one token at `now`; returns how long the caller must wait.
    fn take(&mut self, now: Instant) -> Duration {
        let elapsed = now.saturating_duration_since(self.updated);
        if !self.per_token.is_zero() {
            let refill = elapsed.as_secs_f64() / self.per_token.as_secs_f64();
            self.tokens = (self.tokens + refill).min(self.capacity);
        }
        self.updated = now;
        self.tokens -= 1.0;

        if self.tokens >= 0.0 {
            Duration::ZERO
        } else {
            self.per_token.mul_f64(-self.tokens)
        }
    }
}

/// Limits requests to `requests` per `period`.
///
/// ```rust
/// use balancegraph::transport::RateLimitLayer;
/// use std::time::Duration;
///
/// let per_second = RateLimitLayer::per_second(25);
/// let spaced = RateLimitLayer::with_min_delay(Duration::from_millis(100));
/// ```
#[derive(Clone, Debug)]
pub struct RateLimitLayer {
    bucket: Arc<Mutex<Bucket>>,
}

impl RateLimitLayer {
    pub fn new(requests: u32, period: Duration) -> Self {
        Self {
            bucket: Arc::new(Mutex::new(Bucket::new(requests, period))),
        }
    }

    pub fn per_second(requests: u32) -> Self {
        Self::new(requests, Duration::from_secs(1))
    }

    /// At most one request per `delay`, no bursts.
    pub fn with_min_delay(delay: Duration) -> Self {
        Self::new(1, delay)
    }
}

impl<S> Layer<S> for RateLimitLayer {
    type Service = RateLimitService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RateLimitService {
            inner,
            bucket: self.bucket.clone(),
        }
    }
}

/// Service produced by [`RateLimitLayer`].
#[derive(Clone, Debug)]
pub struct RateLimitService<S> {
    inner: S,
    bucket: Arc<Mutex<Bucket>>,
}

impl<S, Request> tower::Service<Request> for RateLimitService<S>
where
    S: tower::Service<Request> + Clone + Send + 'static,
    S::Future: Send,
    Request: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request) -> Self::Future {
        let bucket = self.bucket.clone();
        let mut inner = self.inner.clone();

        Box::pin(async move {
            let wait = bucket.lock().await.take(Instant::now());
            if !wait.is_zero() {
                tokio::time::sleep(wait).await;
            }
            inner.call(request).await
        })
    }
}
