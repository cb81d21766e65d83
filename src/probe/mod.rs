//! Probe delivery.
//!
//! A probe is one payload sent through one injection point. The outcome is
//! always an explicit value: either a materialized response or an
//! unavailability record. Classifiers branch on the outcome instead of
//! unwinding, so "the server never answered" stays distinguishable from
//! "the server answered with nothing interesting".

use crate::http::client::HttpClient;
use crate::http::response::HttpResponse;
use crate::payload::injector::rewrite_query;
use crate::scanner::surface::FormField;
use std::time::{Duration, Instant};
use url::Url;

/// Placeholder submitted in form fields that are not under test.
pub const NEUTRAL_FIELD_VALUE: &str = "normalvalue";

#[derive(Debug, Clone)]
pub enum ProbeOutcome {
    Received { status: u16, body: String },
    Unavailable { reason: String },
}

/// The result of one delivered probe. `elapsed` is measured from send to
/// outcome even when the outcome is `Unavailable`; time-blind classification
/// needs the duration of timed-out exchanges too.
#[derive(Debug, Clone)]
pub struct ProbeResult {
    pub url: String,
    pub payload: String,
    pub outcome: ProbeOutcome,
    pub elapsed: Duration,
}

impl ProbeResult {
    pub fn body(&self) -> Option<&str> {
        match &self.outcome {
            ProbeOutcome::Received { body, .. } => Some(body),
            ProbeOutcome::Unavailable { .. } => None,
        }
    }

    pub fn received(&self) -> bool {
        matches!(self.outcome, ProbeOutcome::Received { .. })
    }

    pub fn elapsed_secs(&self) -> f64 {
        self.elapsed.as_secs_f64()
    }
}

pub struct ProbeEngine<'a> {
    client: &'a HttpClient,
}

impl<'a> ProbeEngine<'a> {
    pub fn new(client: &'a HttpClient) -> Self {
        Self { client }
    }

    pub fn request_timeout(&self) -> Duration {
        self.client.timeout()
    }

    /// Deliver `payload` into one query parameter of `target` and GET the
    /// rewritten URL.
    pub async fn probe_get(&self, target: &Url, param: &str, payload: &str) -> ProbeResult {
        let probe_url = rewrite_query(target, param, payload);
        let start = Instant::now();
        let response = self.client.get(&probe_url).await;
        Self::finish(probe_url.to_string(), payload, start, response)
    }

    /// Deliver `payload` into one field of a form and POST the whole form to
    /// its action URL. Every other field carries a neutral placeholder.
    pub async fn probe_post(
        &self,
        action: &Url,
        fields: &[FormField],
        target_field: &str,
        payload: &str,
    ) -> ProbeResult {
        let body = form_body(fields, target_field, payload);
        let start = Instant::now();
        let response = self.client.post_form(action, &body).await;
        Self::finish(action.to_string(), payload, start, response)
    }

    /// GET a URL unchanged, for re-fetching a page during stored-payload
    /// verification.
    pub async fn probe_get_raw(&self, url: &Url) -> ProbeResult {
        let start = Instant::now();
        let response = self.client.get(url).await;
        Self::finish(url.to_string(), "", start, response)
    }

    fn finish(
        url: String,
        payload: &str,
        start: Instant,
        response: Option<HttpResponse>,
    ) -> ProbeResult {
        match response {
            Some(r) => ProbeResult {
                url,
                payload: payload.to_string(),
                elapsed: r.elapsed,
                outcome: ProbeOutcome::Received {
                    status: r.status,
                    body: r.body,
                },
            },
            None => ProbeResult {
                url,
                payload: payload.to_string(),
                elapsed: start.elapsed(),
                outcome: ProbeOutcome::Unavailable {
                    reason: "request failed or timed out".to_string(),
                },
            },
        }
    }
}

/// Build the urlencoded field set for a form probe: the target field gets the
/// payload, everything else a neutral value.
pub fn form_body(fields: &[FormField], target_field: &str, payload: &str) -> Vec<(String, String)> {
    fields
        .iter()
        .map(|f| {
            let value = if f.name == target_field {
                payload.to_string()
            } else {
                NEUTRAL_FIELD_VALUE.to_string()
            };
            (f.name.clone(), value)
        })
        .collect()
}
