//! Verdict builders.
//!
//! Each classifier drives a bounded probe sequence against one injection
//! point and decides from explicit probe outcomes. Families run in a fixed
//! priority order and the chain short-circuits on the first positive, so a
//! point yields at most one SQL injection verdict per scan.

pub mod sqli;
pub mod xss;

use crate::probe::{ProbeEngine, ProbeResult};
use crate::reporting::model::Severity;
use crate::scanner::surface::{InjectionPoint, Location};
use url::Url;

/// A positive classification, later lifted into a `Finding` by the engine.
#[derive(Debug, Clone)]
pub struct Verdict {
    pub vuln_type: &'static str,
    pub url: String,
    pub payload: String,
    pub evidence: String,
    pub severity: Severity,
}

/// SQL injection detection families, in chain priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SqliFamily {
    ErrorBased,
    UnionBased,
    BooleanBlind,
    TimeBlind,
}

/// Families probed for URL query parameters.
pub const SQLI_FAMILY_ORDER_GET: &[SqliFamily] = &[
    SqliFamily::ErrorBased,
    SqliFamily::UnionBased,
    SqliFamily::BooleanBlind,
    SqliFamily::TimeBlind,
];

/// Families probed for form fields. Union and boolean families need a stable
/// reflected page to compare against, which form submissions rarely give, so
/// forms get only the error and time families.
pub const SQLI_FAMILY_ORDER_POST: &[SqliFamily] =
    &[SqliFamily::ErrorBased, SqliFamily::TimeBlind];

pub fn family_order(point: &InjectionPoint) -> &'static [SqliFamily] {
    match point.location {
        Location::Query => SQLI_FAMILY_ORDER_GET,
        Location::FormField => SQLI_FAMILY_ORDER_POST,
    }
}

/// Deliver one payload through an injection point, dispatching on whether the
/// point is a query parameter or a form field.
pub async fn deliver(
    engine: &ProbeEngine<'_>,
    target: &Url,
    point: &InjectionPoint,
    payload: &str,
) -> ProbeResult {
    match &point.form {
        None => engine.probe_get(target, &point.name, payload).await,
        Some(form) => {
            engine
                .probe_post(&form.action, &form.fields, &point.name, payload)
                .await
        }
    }
}
