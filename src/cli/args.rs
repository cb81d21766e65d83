use clap::{Parser, ValueEnum};

/// websweep - black-box SQL injection and XSS scanner
#[derive(Parser, Debug)]
#[command(
    name = "websweep",
    version,
    about = "websweep - black-box SQL injection and XSS scanner",
    long_about = r#"
websweep probes a target URL for injection vulnerabilities without any
knowledge of the backend:

SQL INJECTION DETECTION:
  • Error-based (database errors leaking into responses)
  • Union-based (UNION SELECT data exfiltration)
  • Boolean-based blind (response-length differential analysis)
  • Time-based blind (induced delay measurement)

CROSS-SITE SCRIPTING (XSS) DETECTION:
  • Reflected XSS (payload echoed unescaped in the same response)
  • Stored XSS (marker-correlated persistence across requests)

Injection points are enumerated from the target's query string and from
HTML forms found on the page. Each point is probed at most once per scan.
"#,
    after_help = r#"EXAMPLES:

  websweep -u "http://testphp.example.com/listproducts.php?cat=1"
  websweep -u "http://target.local/search?q=test" -t xss
  websweep -u "http://target.local/item?id=1" -t sqli --time-delay 5
  websweep -u "http://target.local/page?id=1" -o report.json --format json
  websweep -u "https://lab.local/app?id=1" --insecure --rate 10
"#
)]
pub struct Cli {
    /// Target URL to scan (include query parameters to have them probed)
    #[arg(short = 'u', long, required = true)]
    pub url: String,

    /// Vulnerability classes to probe for
    #[arg(short = 't', long = "type", value_enum, default_value = "all", help_heading = "SCAN SELECTION")]
    pub scan_type: ScanType,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = 10, help_heading = "TUNING")]
    pub timeout: u64,

    /// Outbound request rate cap, requests per second (0 = unlimited)
    #[arg(long, default_value_t = 5, help_heading = "TUNING")]
    pub rate: u32,

    /// Probe budget per injection point across all SQLi families
    #[arg(long = "sqli-max-payloads", default_value_t = 50, help_heading = "TUNING")]
    pub sqli_max_payloads: usize,

    /// Reflected-XSS payload cap per injection point
    #[arg(long = "xss-max-payloads", default_value_t = 30, help_heading = "TUNING")]
    pub xss_max_payloads: usize,

    /// Expected sleep length of time-based payloads, in seconds
    #[arg(long = "time-delay", default_value_t = 5.0, help_heading = "TUNING")]
    pub time_delay: f64,

    /// Body-length gap for the boolean-blind comparison, in characters
    #[arg(long = "boolean-gap", default_value_t = 100, help_heading = "TUNING")]
    pub boolean_gap: usize,

    /// Wait before the stored-XSS verification pass, in milliseconds
    #[arg(long = "stored-settle-ms", default_value_t = 1000, help_heading = "TUNING")]
    pub stored_settle_ms: u64,

    /// Skip TLS certificate validation (self-signed lab targets only)
    #[arg(long, help_heading = "TUNING")]
    pub insecure: bool,

    /// Write the report to a file instead of stdout
    #[arg(short = 'o', long, help_heading = "OUTPUT")]
    pub output: Option<std::path::PathBuf>,

    /// Report format
    #[arg(long, value_enum, default_value = "text", help_heading = "OUTPUT")]
    pub format: OutputFormat,

    /// Suppress the banner and non-essential logging
    #[arg(short = 'q', long, help_heading = "OUTPUT")]
    pub quiet: bool,

    /// Enable debug-level logging
    #[arg(short = 'v', long, help_heading = "OUTPUT")]
    pub verbose: bool,

    /// Do not print the banner
    #[arg(long = "no-banner", help_heading = "OUTPUT")]
    pub no_banner: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ScanType {
    Sqli,
    Xss,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

impl Cli {
    pub fn scan_kind(&self) -> crate::core::context::ScanKind {
        match self.scan_type {
            ScanType::Sqli => crate::core::context::ScanKind::Sqli,
            ScanType::Xss => crate::core::context::ScanKind::Xss,
            ScanType::All => crate::core::context::ScanKind::All,
        }
    }

    pub fn scan_config(&self) -> crate::core::context::ScanConfig {
        crate::core::context::ScanConfig {
            timeout_secs: self.timeout,
            rate: self.rate,
            sqli_max_payloads: self.sqli_max_payloads,
            xss_max_payloads: self.xss_max_payloads,
            time_delay_secs: self.time_delay,
            boolean_gap: self.boolean_gap,
            stored_settle_ms: self.stored_settle_ms,
            insecure: self.insecure,
        }
    }
}
