//! Scan orchestration.
//!
//! One engine drives one target: enumerate injection points, run the SQLi
//! family chain and then the XSS checks per point, then the stored-XSS
//! verification pass. Probing is sequential; the boolean and time
//! classifiers compare timings and body lengths that concurrent probes on
//! the same target would corrupt.

use crate::classify::sqli::{self, SqliTuning};
use crate::classify::xss;
use crate::classify::Verdict;
use crate::core::context::{ScanConfig, ScanKind};
use crate::core::rate_limit::RateLimiter;
use crate::core::session::{ScanPhase, ScanSession, ScanStatus, SessionRegistry};
use crate::http::client::HttpClient;
use crate::probe::ProbeEngine;
use crate::reporting::model::Finding;
use crate::scanner::surface::{self, InjectionPoint, Location};
use anyhow::Result;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use url::Url;

pub struct Engine {
    config: ScanConfig,
    kind: ScanKind,
    client: HttpClient,
    registry: SessionRegistry,
    scan_id: String,
    abort: Arc<AtomicBool>,
}

impl Engine {
    pub fn new(config: ScanConfig, kind: ScanKind) -> Result<Self> {
        Self::with_registry(config, kind, SessionRegistry::global())
    }

    pub fn with_registry(
        config: ScanConfig,
        kind: ScanKind,
        registry: SessionRegistry,
    ) -> Result<Self> {
        let limiter = RateLimiter::new(config.rate);
        let client = HttpClient::new(
            Duration::from_secs(config.timeout_secs),
            limiter,
            config.insecure,
        )?;
        let scan_id: String = thread_rng()
            .sample_iter(&Alphanumeric)
            .take(12)
            .map(char::from)
            .collect();

        Ok(Self {
            config,
            kind,
            client,
            registry,
            scan_id,
            abort: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn scan_id(&self) -> &str {
        &self.scan_id
    }

    /// Cooperative abort flag, checked between injection points. Setting it
    /// skips remaining points without losing collected findings.
    pub fn abort_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.abort)
    }

    /// Run a full scan. Findings collected before a failure or an abort are
    /// always returned alongside the terminal status.
    pub async fn scan(&self, target: &str) -> (Vec<Finding>, ScanStatus) {
        self.registry.register(&self.scan_id);

        let target_url = match Url::parse(target) {
            Ok(u) => u,
            Err(e) => {
                let status = ScanStatus::Failed(format!("invalid target URL {target:?}: {e}"));
                self.registry.set_status(&self.scan_id, status.clone());
                return (Vec::new(), status);
            }
        };

        tracing::info!(scan_id = %self.scan_id, "scanning {}", target_url);
        let probe = ProbeEngine::new(&self.client);
        let mut session = ScanSession::new();

        let forms = surface::discover_forms(&self.client, &target_url).await;
        let points = surface::injection_points(&target_url, &forms);
        tracing::info!(
            "enumeration done: {} query parameter(s), {} form(s), {} injection point(s)",
            surface::query_parameters(&target_url).len(),
            forms.len(),
            points.len()
        );
        self.registry
            .set_status(&self.scan_id, ScanStatus::Running(ScanPhase::Probing));

        let tuning = SqliTuning {
            time_delay_secs: self.config.time_delay_secs,
            boolean_gap: self.config.boolean_gap,
            max_payloads: self.config.sqli_max_payloads,
        };

        for point in &points {
            if self.abort.load(Ordering::Relaxed) {
                tracing::warn!("scan aborted, keeping findings collected so far");
                break;
            }
            if !session.tested.insert(point.name.clone()) {
                continue;
            }
            tracing::debug!("probing parameter {:?} ({})", point.name, point.method);

            if self.kind.wants_sqli() {
                if let Some(verdict) = sqli::classify(&probe, &target_url, point, tuning).await {
                    tracing::info!("{} at parameter {:?}", verdict.vuln_type, point.name);
                    session.reporter.add(sqli_finding(point, &verdict));
                }
            }

            if self.kind.wants_xss() {
                if let Some(verdict) =
                    xss::reflected(&probe, &target_url, point, self.config.xss_max_payloads).await
                {
                    tracing::info!("{} at parameter {:?}", verdict.vuln_type, point.name);
                    session.reporter.add(xss_finding(point, &verdict));
                }

                if point.form.is_some() {
                    if let Some((immediate, pending)) =
                        xss::submit_stored(&probe, &target_url, point).await
                    {
                        if let Some(verdict) = immediate {
                            tracing::info!(
                                "{} at parameter {:?} (immediate)",
                                verdict.vuln_type,
                                point.name
                            );
                            session.reporter.add(xss_finding(point, &verdict));
                        }
                        session.pending_stored.push(pending);
                    }
                }
            }

            self.registry
                .set_findings(&self.scan_id, session.reporter.findings().len());
        }
        tracing::info!(
            "probing done: {} finding(s) so far",
            session.reporter.findings().len()
        );

        if self.kind.wants_xss()
            && !session.pending_stored.is_empty()
            && !self.abort.load(Ordering::Relaxed)
        {
            self.registry.set_status(
                &self.scan_id,
                ScanStatus::Running(ScanPhase::StoredVerification),
            );
            // give server-side persistence time to commit before re-fetching
            tokio::time::sleep(Duration::from_millis(self.config.stored_settle_ms)).await;

            let confirmed = xss::verify_stored(
                &probe,
                &session.pending_stored,
                &mut session.confirmed_markers,
            )
            .await;
            for (pending, verdict) in confirmed {
                tracing::info!("{} at parameter {:?}", verdict.vuln_type, pending.parameter);
                session.reporter.add(Finding::xss(
                    verdict.vuln_type,
                    &verdict.url,
                    &pending.parameter,
                    "POST",
                    &verdict.payload,
                    &verdict.evidence,
                    verdict.severity,
                ));
            }
        }

        self.registry
            .set_findings(&self.scan_id, session.reporter.findings().len());
        self.registry.set_status(&self.scan_id, ScanStatus::Completed);
        tracing::info!(
            "scan complete: {} finding(s)",
            session.reporter.findings().len()
        );
        (session.reporter.into_findings(), ScanStatus::Completed)
    }
}

fn delivery_method(point: &InjectionPoint) -> &'static str {
    match point.location {
        Location::Query => "GET",
        Location::FormField => "POST",
    }
}

fn sqli_finding(point: &InjectionPoint, verdict: &Verdict) -> Finding {
    Finding::sql_injection(
        verdict.vuln_type,
        &verdict.url,
        &point.name,
        delivery_method(point),
        &verdict.payload,
        &verdict.evidence,
    )
}

fn xss_finding(point: &InjectionPoint, verdict: &Verdict) -> Finding {
    Finding::xss(
        verdict.vuln_type,
        &verdict.url,
        &point.name,
        delivery_method(point),
        &verdict.payload,
        &verdict.evidence,
        verdict.severity,
    )
}
