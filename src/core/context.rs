//! Scan configuration.

/// Which vulnerability classes a scan probes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanKind {
    Sqli,
    Xss,
    All,
}

impl ScanKind {
    pub fn wants_sqli(self) -> bool {
        matches!(self, ScanKind::Sqli | ScanKind::All)
    }

    pub fn wants_xss(self) -> bool {
        matches!(self, ScanKind::Xss | ScanKind::All)
    }
}

/// Tunables consumed by the scan engine. Every field has a working default;
/// the CLI overrides them from flags.
#[derive(Debug, Clone)]
pub struct ScanConfig {
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Outbound request rate cap, requests per second. 0 disables pacing.
    pub rate: u32,
    /// Probe budget per injection point across all SQLi families.
    pub sqli_max_payloads: usize,
    /// Reflected-XSS payload cap per injection point.
    pub xss_max_payloads: usize,
    /// Sleep length the time-based payloads induce, in seconds.
    pub time_delay_secs: f64,
    /// Body-length gap for the boolean-blind comparison, in characters.
    pub boolean_gap: usize,
    /// Wait before the stored-XSS verification pass, in milliseconds.
    pub stored_settle_ms: u64,
    /// Skip TLS certificate validation. Off unless explicitly requested.
    pub insecure: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 10,
            rate: 5,
            sqli_max_payloads: 50,
            xss_max_payloads: 30,
            time_delay_secs: 5.0,
            boolean_gap: 100,
            stored_settle_ms: 1000,
            insecure: false,
        }
    }
}
