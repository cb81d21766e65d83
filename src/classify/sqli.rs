//! SQL injection classifiers.
//!
//! Four families, probed in priority order per injection point:
//! error-based, union-based, boolean-blind, time-blind. Each family has a
//! bounded payload slice and a pure decision helper; the async drivers only
//! move bytes and hand observations to the helpers.

use crate::classify::{deliver, family_order, SqliFamily, Verdict};
use crate::payload::sqli::{contains_error_signature, ERROR_BASED, TIME_BASED, UNION_BASED};
use crate::probe::ProbeEngine;
use crate::reporting::model::Severity;
use crate::scanner::surface::{InjectionPoint, Location};
use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

pub const ERROR_CAP_GET: usize = 15;
pub const ERROR_CAP_POST: usize = 10;
pub const UNION_CAP: usize = 10;
pub const TIME_CAP_GET: usize = 5;
pub const TIME_CAP_POST: usize = 3;

/// Form input types that never reach a SQL backend as data.
const SKIPPED_FIELD_TYPES: &[&str] = &["submit", "button", "hidden"];

/// Per-point tuning, lifted out of the scan configuration.
#[derive(Debug, Clone, Copy)]
pub struct SqliTuning {
    /// Expected sleep length of the time-based payloads, in seconds.
    pub time_delay_secs: f64,
    /// Body-length gap separating "same page" from "different page" in the
    /// boolean-blind comparison.
    pub boolean_gap: usize,
    /// Total probe budget for one injection point across all families.
    pub max_payloads: usize,
}

static VERSION_LEAK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\b\d+\.\d+\.\d+").expect("static pattern"));

static UUID_LEAK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}\b")
        .expect("static pattern")
});

const SCHEMA_LEAKS: &[&str] = &["information_schema", "mysql", "postgres", "mssql"];

/// Does the body look like a UNION SELECT landed, i.e. database internals
/// leaked into the page.
pub fn union_leak(body: &str) -> bool {
    if VERSION_LEAK.is_match(body) || UUID_LEAK.is_match(body) {
        return true;
    }
    let lower = body.to_lowercase();
    SCHEMA_LEAKS.iter().any(|s| lower.contains(s))
}

/// Boolean-blind decision: the TRUE-condition page must look like the
/// baseline while the FALSE-condition page must differ from it.
pub fn boolean_verdict(baseline_len: usize, true_len: usize, false_len: usize, gap: usize) -> bool {
    let base_diff = (true_len as i64 - baseline_len as i64).unsigned_abs() as usize;
    let pair_diff = (true_len as i64 - false_len as i64).unsigned_abs() as usize;
    base_diff < gap && pair_diff > gap
}

/// Time-blind decision. A probe that never produced a body is only credible
/// evidence of a delay when the request timeout itself is at least the sleep
/// length; otherwise the timeout fired before the sleep could be observed.
pub fn time_verdict(
    elapsed_secs: f64,
    delay_secs: f64,
    body_received: bool,
    request_timeout_secs: f64,
) -> bool {
    if elapsed_secs < delay_secs - 1.0 {
        return false;
    }
    body_received || request_timeout_secs >= delay_secs
}

/// Should a form field be probed for SQL injection at all.
pub fn probeable_field(field_type: Option<&str>) -> bool {
    match field_type {
        Some(t) => !SKIPPED_FIELD_TYPES.contains(&t.to_lowercase().as_str()),
        None => true,
    }
}

/// Run the full SQLi family chain against one injection point. Stops at the
/// first positive family or when the probe budget runs out.
pub async fn classify(
    engine: &ProbeEngine<'_>,
    target: &Url,
    point: &InjectionPoint,
    tuning: SqliTuning,
) -> Option<Verdict> {
    if !probeable_field(point.field_type.as_deref()) {
        return None;
    }

    let mut budget = tuning.max_payloads;
    for family in family_order(point) {
        if budget == 0 {
            tracing::debug!("payload budget exhausted for parameter {}", point.name);
            break;
        }
        let verdict = match family {
            SqliFamily::ErrorBased => error_based(engine, target, point, &mut budget).await,
            SqliFamily::UnionBased => union_based(engine, target, point, &mut budget).await,
            SqliFamily::BooleanBlind => {
                boolean_blind(engine, target, point, tuning.boolean_gap, &mut budget).await
            }
            SqliFamily::TimeBlind => {
                time_blind(engine, target, point, tuning.time_delay_secs, &mut budget).await
            }
        };
        if verdict.is_some() {
            return verdict;
        }
    }
    None
}

async fn error_based(
    engine: &ProbeEngine<'_>,
    target: &Url,
    point: &InjectionPoint,
    budget: &mut usize,
) -> Option<Verdict> {
    let cap = match point.location {
        Location::Query => ERROR_CAP_GET,
        Location::FormField => ERROR_CAP_POST,
    };
    for payload in ERROR_BASED.iter().take(cap.min(*budget)) {
        *budget = budget.saturating_sub(1);
        let result = deliver(engine, target, point, payload).await;
        if let Some(body) = result.body() {
            if contains_error_signature(body) {
                return Some(Verdict {
                    vuln_type: "Error-based SQL Injection",
                    url: result.url,
                    payload: result.payload,
                    evidence: "SQL error detected in response".to_string(),
                    severity: Severity::High,
                });
            }
        }
    }
    None
}

async fn union_based(
    engine: &ProbeEngine<'_>,
    target: &Url,
    point: &InjectionPoint,
    budget: &mut usize,
) -> Option<Verdict> {
    for payload in UNION_BASED.iter().take(UNION_CAP.min(*budget)) {
        *budget = budget.saturating_sub(1);
        let result = deliver(engine, target, point, payload).await;
        if let Some(body) = result.body() {
            if union_leak(body) {
                return Some(Verdict {
                    vuln_type: "Union-based SQL Injection",
                    url: result.url,
                    payload: result.payload,
                    evidence: "Union query successful".to_string(),
                    severity: Severity::High,
                });
            }
        }
    }
    None
}

/// Boolean-blind comparison: baseline with the original value, then a
/// TRUE/FALSE condition pair appended to it. Needs all three responses.
async fn boolean_blind(
    engine: &ProbeEngine<'_>,
    target: &Url,
    point: &InjectionPoint,
    gap: usize,
    budget: &mut usize,
) -> Option<Verdict> {
    if *budget < 3 {
        return None;
    }
    *budget -= 3;

    let baseline = deliver(engine, target, point, &point.value).await;
    let true_payload = format!("{}' AND '1'='1", point.value);
    let false_payload = format!("{}' AND '1'='2", point.value);
    let true_result = deliver(engine, target, point, &true_payload).await;
    let false_result = deliver(engine, target, point, &false_payload).await;

    let (baseline_body, true_body, false_body) =
        match (baseline.body(), true_result.body(), false_result.body()) {
            (Some(b), Some(t), Some(f)) => (b, t, f),
            _ => return None,
        };

    let (b_len, t_len, f_len) = (baseline_body.len(), true_body.len(), false_body.len());
    if boolean_verdict(b_len, t_len, f_len, gap) {
        return Some(Verdict {
            vuln_type: "Boolean-based Blind SQL Injection",
            url: true_result.url,
            payload: true_result.payload,
            evidence: format!("Response length differs: True={}, False={}", t_len, f_len),
            severity: Severity::High,
        });
    }
    None
}

async fn time_blind(
    engine: &ProbeEngine<'_>,
    target: &Url,
    point: &InjectionPoint,
    delay_secs: f64,
    budget: &mut usize,
) -> Option<Verdict> {
    let cap = match point.location {
        Location::Query => TIME_CAP_GET,
        Location::FormField => TIME_CAP_POST,
    };
    let request_timeout = engine.request_timeout().as_secs_f64();
    for payload in TIME_BASED.iter().take(cap.min(*budget)) {
        *budget = budget.saturating_sub(1);
        let result = deliver(engine, target, point, payload).await;
        let elapsed = result.elapsed_secs();
        if time_verdict(elapsed, delay_secs, result.received(), request_timeout) {
            return Some(Verdict {
                vuln_type: "Time-based Blind SQL Injection",
                url: result.url,
                payload: result.payload,
                evidence: format!("Response delayed by {:.2} seconds", elapsed),
                severity: Severity::High,
            });
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boolean_requires_true_like_baseline_and_false_unlike_true() {
        // true page matches baseline, false page collapses
        assert!(boolean_verdict(5000, 5020, 4500, 100));
        // true page already differs from baseline
        assert!(!boolean_verdict(5000, 5500, 4500, 100));
        // true and false pages are the same page
        assert!(!boolean_verdict(5000, 5020, 5010, 100));
    }

    #[test]
    fn boolean_gap_is_strict_on_both_sides() {
        assert!(!boolean_verdict(1000, 1100, 500, 100)); // base diff == gap
        assert!(!boolean_verdict(1000, 1000, 1100, 100)); // pair diff == gap
        assert!(boolean_verdict(1000, 1099, 500, 100));
    }

    #[test]
    fn time_verdict_tolerates_one_second_of_jitter() {
        assert!(time_verdict(4.2, 5.0, true, 10.0));
        assert!(!time_verdict(3.9, 5.0, true, 10.0));
        assert!(time_verdict(5.7, 5.0, true, 10.0));
    }

    #[test]
    fn timed_out_probe_counts_only_with_long_enough_timeout() {
        // timeout of 10s covers a 5s sleep, so a bodiless 10s probe is credible
        assert!(time_verdict(10.0, 5.0, false, 10.0));
        // a 3s timeout fires before a 5s sleep could ever be observed
        assert!(!time_verdict(3.0, 5.0, false, 3.0));
    }

    #[test]
    fn union_leak_spots_database_internals() {
        assert!(union_leak("MySQL 8.0.36 on x86_64"));
        assert!(union_leak("row: 550e8400-e29b-41d4-a716-446655440000"));
        assert!(union_leak("SELECT * FROM information_schema.tables"));
        assert!(!union_leak("<html><body>Hello world</body></html>"));
    }

    #[test]
    fn union_leak_matches_every_engine_literal() {
        assert!(union_leak("driver: mssql"));
        assert!(union_leak("role postgres exists"));
        // the shorter literal also covers the full engine name
        assert!(union_leak("PostgreSQL banner"));
        assert!(union_leak("Mysqli handle"));
    }

    #[test]
    fn submit_button_hidden_fields_are_skipped() {
        assert!(!probeable_field(Some("submit")));
        assert!(!probeable_field(Some("BUTTON")));
        assert!(!probeable_field(Some("hidden")));
        assert!(probeable_field(Some("text")));
        assert!(probeable_field(None));
    }
}
