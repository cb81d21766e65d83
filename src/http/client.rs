//! HTTP transport with rate limiting and a caller-visible TLS policy.
//!
//! Transport failures (timeout, connection refused, TLS error) are recovered
//! locally: callers get `None` and the failure is logged at debug level. No
//! classifier ever treats a missing response as evidence.

use crate::core::rate_limit::RateLimiter;
use crate::http::response::HttpResponse;
use anyhow::Result;
use reqwest::{header, redirect::Policy, Client};
use std::time::{Duration, Instant};
use url::Url;

pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

pub struct HttpClient {
    client: Client,
    limiter: RateLimiter,
    timeout: Duration,
}

impl HttpClient {
    /// `accept_invalid_certs` disables TLS certificate validation. This is a
    /// deliberate trade-off for scanning self-signed lab targets and must be
    /// requested explicitly by the caller.
    pub fn new(timeout: Duration, limiter: RateLimiter, accept_invalid_certs: bool) -> Result<Self> {
        let mut default_headers = header::HeaderMap::new();
        default_headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static(
                "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
            ),
        );
        default_headers.insert(
            header::ACCEPT_LANGUAGE,
            header::HeaderValue::from_static("en-US,en;q=0.5"),
        );

        let client = Client::builder()
            .user_agent(DEFAULT_USER_AGENT)
            .default_headers(default_headers)
            .danger_accept_invalid_certs(accept_invalid_certs)
            .redirect(Policy::limited(5))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            limiter,
            timeout,
        })
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Issue a GET request. Returns `None` on any transport failure.
    pub async fn get(&self, url: &Url) -> Option<HttpResponse> {
        self.limiter.wait().await;

        let start = Instant::now();
        let result = self.client.get(url.clone()).send().await;
        self.materialize(url, start, result).await
    }

    /// Issue an `application/x-www-form-urlencoded` POST. Returns `None` on
    /// any transport failure.
    pub async fn post_form(&self, url: &Url, fields: &[(String, String)]) -> Option<HttpResponse> {
        self.limiter.wait().await;

        let start = Instant::now();
        let result = self.client.post(url.clone()).form(fields).send().await;
        self.materialize(url, start, result).await
    }

    async fn materialize(
        &self,
        url: &Url,
        start: Instant,
        result: reqwest::Result<reqwest::Response>,
    ) -> Option<HttpResponse> {
        let response = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::debug!("request to {} failed: {}", url, e);
                return None;
            }
        };

        let status = response.status().as_u16();
        let body = match response.text().await {
            Ok(b) => b,
            Err(e) => {
                tracing::debug!("failed to read body from {}: {}", url, e);
                return None;
            }
        };

        Some(HttpResponse {
            status,
            body,
            elapsed: start.elapsed(),
        })
    }
}
