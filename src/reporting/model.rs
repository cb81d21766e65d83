use serde::Serialize;

/// Vulnerability class a finding belongs to.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
pub enum Category {
    #[serde(rename = "SQL Injection")]
    SqlInjection,
    #[serde(rename = "Cross-Site Scripting (XSS)")]
    Xss,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::SqlInjection => write!(f, "SQL Injection"),
            Category::Xss => write!(f, "Cross-Site Scripting (XSS)"),
        }
    }
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Low => write!(f, "LOW"),
            Severity::Medium => write!(f, "MEDIUM"),
            Severity::High => write!(f, "HIGH"),
        }
    }
}

const SQLI_RECOMMENDATION: &str = "Use parameterized queries or prepared \
statements. Validate and sanitize all user inputs.";

const XSS_RECOMMENDATION: &str = "Encode all user inputs before rendering. \
Use Content Security Policy (CSP). Validate and sanitize all user inputs.";

/// A confirmed observation of probable vulnerability. This flat record is the
/// wire contract consumed by the report renderers; every finding carries the
/// literal payload that produced it and a human-readable evidence string.
#[derive(Debug, Serialize, Clone)]
pub struct Finding {
    #[serde(rename = "type")]
    pub vuln_type: String,
    pub category: Category,
    pub url: String,
    pub parameter: String,
    pub method: String,
    pub payload: String,
    pub evidence: String,
    pub severity: Severity,
    pub recommendation: String,
}

impl Finding {
    pub fn sql_injection(
        vuln_type: &str,
        url: &str,
        parameter: &str,
        method: &str,
        payload: &str,
        evidence: &str,
    ) -> Self {
        Self {
            vuln_type: vuln_type.to_string(),
            category: Category::SqlInjection,
            url: url.to_string(),
            parameter: parameter.to_string(),
            method: method.to_string(),
            payload: payload.to_string(),
            evidence: evidence.to_string(),
            severity: Severity::High,
            recommendation: SQLI_RECOMMENDATION.to_string(),
        }
    }

    pub fn xss(
        vuln_type: &str,
        url: &str,
        parameter: &str,
        method: &str,
        payload: &str,
        evidence: &str,
        severity: Severity,
    ) -> Self {
        Self {
            vuln_type: vuln_type.to_string(),
            category: Category::Xss,
            url: url.to_string(),
            parameter: parameter.to_string(),
            method: method.to_string(),
            payload: payload.to_string(),
            evidence: evidence.to_string(),
            severity,
            recommendation: XSS_RECOMMENDATION.to_string(),
        }
    }
}
