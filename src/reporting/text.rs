use crate::reporting::model::{Finding, Severity};
use std::fmt::Write;

const RULE_WIDTH: usize = 70;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Render a human-readable report. Returned as a string so the caller can
/// write it to a file or stdout.
pub fn render(target: &str, findings: &[Finding]) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "SCAN REPORT: {}", target);
    let _ = writeln!(out, "{}", rule());

    if findings.is_empty() {
        let _ = writeln!(out, "No vulnerabilities detected.");
        let _ = writeln!(out, "All tested injection points appear secure.");
        let _ = writeln!(out, "{}", rule());
        return out;
    }

    let high = findings.iter().filter(|f| matches!(f.severity, Severity::High)).count();
    let medium = findings.iter().filter(|f| matches!(f.severity, Severity::Medium)).count();
    let low = findings.iter().filter(|f| matches!(f.severity, Severity::Low)).count();

    let _ = writeln!(out, "Total Findings: {}", findings.len());
    if high > 0 {
        let _ = writeln!(out, "  High:   {}", high);
    }
    if medium > 0 {
        let _ = writeln!(out, "  Medium: {}", medium);
    }
    if low > 0 {
        let _ = writeln!(out, "  Low:    {}", low);
    }
    let _ = writeln!(out, "{}", rule());

    for (idx, f) in findings.iter().enumerate() {
        let _ = writeln!(out);
        let _ = writeln!(out, "FINDING #{}: {} [{}]", idx + 1, f.vuln_type, f.severity);
        let _ = writeln!(out, "  Category:       {}", f.category);
        let _ = writeln!(out, "  URL:            {}", f.url);
        let _ = writeln!(out, "  Parameter:      {}", f.parameter);
        let _ = writeln!(out, "  Method:         {}", f.method);
        let _ = writeln!(out, "  Payload:        {}", f.payload);
        let _ = writeln!(out, "  Evidence:       {}", f.evidence);
        let _ = writeln!(out, "  Recommendation: {}", f.recommendation);
    }

    let _ = writeln!(out);
    let _ = writeln!(out, "{}", rule());
    let _ = writeln!(out, "Address HIGH severity findings first, then re-scan to verify fixes.");
    let _ = writeln!(out, "{}", rule());

    out
}
