//! Cross-site scripting classifiers.
//!
//! Reflected detection checks whether a probe payload comes back in the
//! response inside a context where a browser would execute it. Stored
//! detection submits marker-bearing payloads through forms and later
//! re-fetches the page to look for the marker.

use crate::classify::Verdict;
use crate::payload::xss::{
    basic_payloads, correlation_payload, CorrelationVariant, XSS_DETECTION_PATTERNS,
};
use crate::probe::ProbeEngine;
use crate::reporting::model::Severity;
use crate::scanner::surface::{InjectionPoint, Location};
use url::Url;

/// Reflected payload cap for form submissions.
pub const REFLECTED_CAP_POST: usize = 15;

/// Form input types that carry no renderable data.
const SKIPPED_FIELD_TYPES: &[&str] = &["submit", "button"];

/// A stored-XSS submission awaiting the verification pass. `page` is the URL
/// that gets re-fetched to look for the marker.
#[derive(Debug, Clone)]
pub struct PendingStoredProbe {
    pub marker: String,
    pub payload: String,
    pub page: Url,
    pub parameter: String,
    pub action: Url,
}

/// Would a browser execute `payload` as found in `body`?
///
/// The payload must be present verbatim in the raw body; a server that
/// entity-escapes the reflection has sanitized it and never yields a
/// positive. Context and pattern checks then run on the entity-decoded view
/// so quoting variations around the reflection do not hide it.
pub fn payload_executes(payload: &str, body: &str) -> bool {
    if !body.contains(payload) {
        return false;
    }

    let decoded = html_escape::decode_html_entities(body);
    let dangerous_contexts = [
        format!(">{payload}<"),
        format!(">{payload}"),
        format!("{payload}<"),
        format!("\"{payload}\""),
        format!("'{payload}'"),
    ];
    if dangerous_contexts.iter().any(|c| decoded.contains(c)) {
        return true;
    }

    XSS_DETECTION_PATTERNS.iter().any(|p| p.is_match(&decoded))
}

pub fn probeable_field(field_type: Option<&str>) -> bool {
    match field_type {
        Some(t) => !SKIPPED_FIELD_TYPES.contains(&t.to_lowercase().as_str()),
        None => true,
    }
}

/// Reflected XSS: probe basic payloads through the point and classify each
/// response. First executing reflection wins.
pub async fn reflected(
    engine: &ProbeEngine<'_>,
    target: &Url,
    point: &InjectionPoint,
    max_payloads: usize,
) -> Option<Verdict> {
    if !probeable_field(point.field_type.as_deref()) {
        return None;
    }

    let cap = match point.location {
        Location::Query => max_payloads,
        Location::FormField => REFLECTED_CAP_POST.min(max_payloads),
    };
    for payload in basic_payloads().into_iter().take(cap) {
        let result = crate::classify::deliver(engine, target, point, payload).await;
        if let Some(body) = result.body() {
            if payload_executes(payload, body) {
                return Some(Verdict {
                    vuln_type: "Reflected XSS",
                    url: result.url,
                    payload: result.payload,
                    evidence: "Payload reflected in response without sanitization".to_string(),
                    severity: Severity::Medium,
                });
            }
        }
    }
    None
}

/// Stored XSS, submission phase: push a marker-bearing payload through a form
/// field. A reflection in the immediate response is already a finding; the
/// pending probe is recorded for the verification pass regardless.
pub async fn submit_stored(
    engine: &ProbeEngine<'_>,
    page: &Url,
    point: &InjectionPoint,
) -> Option<(Option<Verdict>, PendingStoredProbe)> {
    if !probeable_field(point.field_type.as_deref()) {
        return None;
    }
    let form = point.form.as_ref()?;

    let (payload, marker) = correlation_payload(CorrelationVariant::Script);
    let result = engine
        .probe_post(&form.action, &form.fields, &point.name, &payload)
        .await;

    let immediate = match result.body() {
        Some(body) if body.contains(&marker) && payload_executes(&payload, body) => Some(Verdict {
            vuln_type: "Stored XSS",
            url: result.url.clone(),
            payload: payload.clone(),
            evidence: format!("Payload stored and reflected (ID: {marker})"),
            severity: Severity::High,
        }),
        _ => None,
    };

    let pending = PendingStoredProbe {
        marker,
        payload,
        page: page.clone(),
        parameter: point.name.clone(),
        action: form.action.clone(),
    };
    Some((immediate, pending))
}

/// Stored XSS, verification phase: re-fetch each pending probe's page and
/// look for its marker in an executing context. Already-confirmed markers
/// are skipped so re-running the pass cannot duplicate findings.
pub async fn verify_stored(
    engine: &ProbeEngine<'_>,
    pending: &[PendingStoredProbe],
    confirmed: &mut std::collections::HashSet<String>,
) -> Vec<(PendingStoredProbe, Verdict)> {
    let mut verdicts = Vec::new();
    for probe in pending {
        if confirmed.contains(&probe.marker) {
            continue;
        }
        let result = engine.probe_get_raw(&probe.page).await;
        if let Some(body) = result.body() {
            if body.contains(&probe.marker) && payload_executes(&probe.payload, body) {
                confirmed.insert(probe.marker.clone());
                verdicts.push((
                    probe.clone(),
                    Verdict {
                        vuln_type: "Stored XSS",
                        url: probe.page.to_string(),
                        payload: probe.payload.clone(),
                        evidence: format!(
                            "Payload persistently stored and reflected (ID: {})",
                            probe.marker
                        ),
                        severity: Severity::High,
                    },
                ));
            }
        }
    }
    verdicts
}
