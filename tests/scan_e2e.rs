//! End-to-end scans against mock vulnerable applications.

use std::sync::{Arc, Mutex};
use std::time::Duration;
use websweep::core::engine::Engine;
use websweep::core::session::{ScanStatus, SessionRegistry};
use websweep::payload::xss::BASIC_XSS;
use websweep::{ScanConfig, ScanKind, Severity};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

fn fast_config() -> ScanConfig {
    ScanConfig {
        rate: 0,
        stored_settle_ms: 50,
        ..ScanConfig::default()
    }
}

fn query_value(req: &Request, name: &str) -> Option<String> {
    req.url
        .query_pairs()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.into_owned())
}

/// Leaks a database error whenever the `q` parameter carries a quote.
struct ErrorProneApp;

impl Respond for ErrorProneApp {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let q = query_value(req, "q").unwrap_or_default();
        if q.contains('\'') {
            ResponseTemplate::new(200)
                .set_body_string("You have an error in your SQL syntax near line 1")
        } else {
            ResponseTemplate::new(200).set_body_string("<html><body>all good</body></html>")
        }
    }
}

#[tokio::test]
async fn error_based_sqli_is_found_once_per_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ErrorProneApp)
        .mount(&server)
        .await;

    let engine = Engine::new(fast_config(), ScanKind::Sqli).unwrap();
    // the repeated key must collapse to a single injection point
    let target = format!("{}/item?q=1&q=2", server.uri());
    let (findings, status) = engine.scan(&target).await;

    assert_eq!(status, ScanStatus::Completed);
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.vuln_type, "Error-based SQL Injection");
    assert_eq!(f.severity, Severity::High);
    assert_eq!(f.parameter, "q");
    assert_eq!(f.method, "GET");
    assert_eq!(f.payload, "'");
    assert_eq!(f.evidence, "SQL error detected in response");
}

/// Echoes the `name` parameter unescaped between div tags.
struct EchoApp;

impl Respond for EchoApp {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let name = query_value(req, "name").unwrap_or_default();
        ResponseTemplate::new(200)
            .set_body_string(format!("<html><body><div>{name}</div></body></html>"))
    }
}

#[tokio::test]
async fn reflected_xss_is_found_with_reproducible_payload() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(EchoApp)
        .mount(&server)
        .await;

    let engine = Engine::new(fast_config(), ScanKind::Xss).unwrap();
    let target = format!("{}/greet?name=world", server.uri());
    let (findings, status) = engine.scan(&target).await;

    assert_eq!(status, ScanStatus::Completed);
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.vuln_type, "Reflected XSS");
    assert_eq!(f.severity, Severity::Medium);
    assert_eq!(f.parameter, "name");
    // the reported payload is byte-identical to the one that was delivered
    assert_eq!(f.payload, BASIC_XSS[0]);
    assert_eq!(f.evidence, "Payload reflected in response without sanitization");
}

/// Echoes the `name` parameter with HTML entities escaped.
struct EscapingApp;

impl Respond for EscapingApp {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let name = query_value(req, "name").unwrap_or_default();
        let escaped = name
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#x27;");
        ResponseTemplate::new(200)
            .set_body_string(format!("<html><body><div>{escaped}</div></body></html>"))
    }
}

#[tokio::test]
async fn escaped_reflection_yields_no_xss_findings() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(EscapingApp)
        .mount(&server)
        .await;

    let engine = Engine::new(fast_config(), ScanKind::Xss).unwrap();
    let target = format!("{}/greet?name=world", server.uri());
    let (findings, status) = engine.scan(&target).await;

    assert_eq!(status, ScanStatus::Completed);
    assert!(findings.is_empty());
}

/// Sleeps when the `id` parameter carries a SLEEP(5) payload.
struct SleepyApp;

impl Respond for SleepyApp {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let id = query_value(req, "id").unwrap_or_default();
        let template =
            ResponseTemplate::new(200).set_body_string("<html><body>all good</body></html>");
        if id.contains("SLEEP(5)") {
            template.set_delay(Duration::from_secs(2))
        } else {
            template
        }
    }
}

#[tokio::test]
async fn time_blind_sqli_is_found_when_delay_matches() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(SleepyApp)
        .mount(&server)
        .await;

    // the fixture sleeps 2s, so classify against a 2s expected delay
    let config = ScanConfig {
        time_delay_secs: 2.0,
        ..fast_config()
    };
    let engine = Engine::new(config, ScanKind::Sqli).unwrap();
    let target = format!("{}/item?id=1", server.uri());
    let (findings, status) = engine.scan(&target).await;

    assert_eq!(status, ScanStatus::Completed);
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.vuln_type, "Time-based Blind SQL Injection");
    assert_eq!(f.severity, Severity::High);
    assert!(f.payload.contains("SLEEP(5)"));
    assert!(f.evidence.starts_with("Response delayed by"));
}

/// Serves a long page normally, a much shorter page when the injected
/// condition is false.
struct BooleanApp;

impl Respond for BooleanApp {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let id = query_value(req, "id").unwrap_or_default();
        let body = if id.ends_with("' AND '1'='2") {
            "x".repeat(350)
        } else {
            "x".repeat(500)
        };
        ResponseTemplate::new(200).set_body_string(body)
    }
}

#[tokio::test]
async fn boolean_blind_sqli_is_found_from_length_differential() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(BooleanApp)
        .mount(&server)
        .await;

    let engine = Engine::new(fast_config(), ScanKind::Sqli).unwrap();
    let target = format!("{}/item?id=1", server.uri());
    let (findings, status) = engine.scan(&target).await;

    assert_eq!(status, ScanStatus::Completed);
    assert_eq!(findings.len(), 1);
    let f = &findings[0];
    assert_eq!(f.vuln_type, "Boolean-based Blind SQL Injection");
    assert_eq!(f.payload, "1' AND '1'='1");
    assert_eq!(f.evidence, "Response length differs: True=500, False=350");
}

/// A guestbook: the front page carries a comment form and renders every
/// stored comment unescaped.
struct GuestbookPage {
    comments: Arc<Mutex<Vec<String>>>,
}

impl Respond for GuestbookPage {
    fn respond(&self, _req: &Request) -> ResponseTemplate {
        let comments = self.comments.lock().unwrap();
        let rendered: String = comments
            .iter()
            .map(|c| format!("<div class=\"comment\">{c}</div>\n"))
            .collect();
        ResponseTemplate::new(200).set_body_string(format!(
            "<html><body>\
             <form action=\"/comment\" method=\"post\">\
             <input type=\"text\" name=\"author\">\
             <textarea name=\"message\"></textarea>\
             <input type=\"submit\" value=\"Post\">\
             </form>\
             {rendered}\
             </body></html>"
        ))
    }
}

struct GuestbookSubmit {
    comments: Arc<Mutex<Vec<String>>>,
}

impl Respond for GuestbookSubmit {
    fn respond(&self, req: &Request) -> ResponseTemplate {
        let body = String::from_utf8_lossy(&req.body).into_owned();
        for (_, value) in url::form_urlencoded::parse(body.as_bytes()) {
            self.comments.lock().unwrap().push(value.into_owned());
        }
        ResponseTemplate::new(200).set_body_string("<html><body>thanks</body></html>")
    }
}

#[tokio::test]
async fn stored_xss_is_confirmed_by_marker_on_revisit() {
    let server = MockServer::start().await;
    let comments = Arc::new(Mutex::new(Vec::new()));
    Mock::given(method("GET"))
        .respond_with(GuestbookPage {
            comments: Arc::clone(&comments),
        })
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(GuestbookSubmit {
            comments: Arc::clone(&comments),
        })
        .mount(&server)
        .await;

    let engine = Engine::new(fast_config(), ScanKind::Xss).unwrap();
    let target = format!("{}/", server.uri());
    let (findings, status) = engine.scan(&target).await;

    assert_eq!(status, ScanStatus::Completed);
    let stored: Vec<_> = findings
        .iter()
        .filter(|f| f.vuln_type == "Stored XSS")
        .collect();
    assert_eq!(stored.len(), 2, "one stored finding per form field");
    let mut parameters: Vec<&str> = stored.iter().map(|f| f.parameter.as_str()).collect();
    parameters.sort_unstable();
    assert_eq!(parameters, ["author", "message"]);
    for f in &stored {
        assert_eq!(f.severity, Severity::High);
        assert_eq!(f.method, "POST");
        assert!(f
            .evidence
            .starts_with("Payload persistently stored and reflected (ID: "));
    }
}

/// The submission page itself: carries the comment form but renders nothing
/// that was submitted.
struct SubmissionOnlyPage;

impl Respond for SubmissionOnlyPage {
    fn respond(&self, _req: &Request) -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_string(
            "<html><body>\
             <form action=\"/comment\" method=\"post\">\
             <textarea name=\"message\"></textarea>\
             </form>\
             </body></html>",
        )
    }
}

/// An unrelated page that renders every stored comment unescaped.
struct UnrelatedSinkPage {
    comments: Arc<Mutex<Vec<String>>>,
}

impl Respond for UnrelatedSinkPage {
    fn respond(&self, _req: &Request) -> ResponseTemplate {
        let comments = self.comments.lock().unwrap();
        let rendered: String = comments
            .iter()
            .map(|c| format!("<div>{c}</div>\n"))
            .collect();
        ResponseTemplate::new(200)
            .set_body_string(format!("<html><body>{rendered}</body></html>"))
    }
}

#[tokio::test]
async fn stored_marker_on_an_unrelated_page_is_not_confirmed() {
    let server = MockServer::start().await;
    let comments = Arc::new(Mutex::new(Vec::new()));
    Mock::given(method("GET"))
        .and(path("/post"))
        .respond_with(SubmissionOnlyPage)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/feed"))
        .respond_with(UnrelatedSinkPage {
            comments: Arc::clone(&comments),
        })
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .respond_with(GuestbookSubmit {
            comments: Arc::clone(&comments),
        })
        .mount(&server)
        .await;

    let engine = Engine::new(fast_config(), ScanKind::Xss).unwrap();
    let target = format!("{}/post", server.uri());
    let (findings, status) = engine.scan(&target).await;

    // the submitted marker is live on /feed, but verification only re-fetches
    // the page it was submitted through
    let stored_payloads = comments.lock().unwrap();
    assert!(
        stored_payloads.iter().any(|c| c.contains("XSS-")),
        "marker payload was submitted and persisted"
    );
    assert_eq!(status, ScanStatus::Completed);
    assert!(
        !findings.iter().any(|f| f.vuln_type == "Stored XSS"),
        "no stored finding may come from a page the payload was never submitted to"
    );
}

#[tokio::test]
async fn abort_skips_probing_but_completes_cleanly() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ErrorProneApp)
        .mount(&server)
        .await;

    let engine = Engine::new(fast_config(), ScanKind::Sqli).unwrap();
    engine
        .abort_handle()
        .store(true, std::sync::atomic::Ordering::Relaxed);
    let target = format!("{}/item?q=1", server.uri());
    let (findings, status) = engine.scan(&target).await;

    assert_eq!(status, ScanStatus::Completed);
    assert!(findings.is_empty());
}

#[tokio::test]
async fn registry_reports_terminal_status_and_finding_count() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ErrorProneApp)
        .mount(&server)
        .await;

    let registry = SessionRegistry::new();
    let engine =
        Engine::with_registry(fast_config(), ScanKind::Sqli, registry.clone()).unwrap();
    let scan_id = engine.scan_id().to_string();
    let target = format!("{}/item?q=1", server.uri());
    let (findings, _) = engine.scan(&target).await;

    let entry = registry.entry(&scan_id).expect("session registered");
    assert_eq!(entry.status, ScanStatus::Completed);
    assert_eq!(entry.findings, findings.len());
}

#[tokio::test]
async fn unreachable_target_yields_no_findings() {
    // nothing listens on this port
    let engine = Engine::new(fast_config(), ScanKind::All).unwrap();
    let (findings, status) = engine.scan("http://127.0.0.1:9/?id=1").await;

    assert_eq!(status, ScanStatus::Completed);
    assert!(findings.is_empty());
}
