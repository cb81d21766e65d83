//! Injection-surface enumeration.
//!
//! Extracts candidate injection points from a target: query-string
//! parameters, and `<form>` definitions discovered by fetching the target
//! page once. Fetch or parse trouble is never fatal; it yields an empty form
//! list and a warning.

use crate::http::client::HttpClient;
use scraper::{Html, Selector};
use url::Url;

/// Where an injection point lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Location {
    Query,
    FormField,
}

#[derive(Debug, Clone)]
pub struct FormField {
    pub name: String,
    /// Declared `type` attribute, defaulting to "text". Used downstream to
    /// skip non-data fields (submit, button, hidden).
    pub field_type: String,
}

#[derive(Debug, Clone)]
pub struct FormDescriptor {
    pub action: Url,
    pub method: String,
    pub fields: Vec<FormField>,
}

/// A user-controllable input discovered during enumeration. Immutable after
/// creation; identified by `name` within a scan (first occurrence wins).
#[derive(Debug, Clone)]
pub struct InjectionPoint {
    pub name: String,
    pub location: Location,
    pub method: String,
    /// Current value for query parameters, used as the boolean-blind baseline.
    pub value: String,
    /// Declared input type for form-backed points.
    pub field_type: Option<String>,
    /// Action URL and sibling fields for form-backed points.
    pub form: Option<FormDescriptor>,
}

/// Query parameters of the target URL in order, first value winning for
/// repeated keys.
pub fn query_parameters(url: &Url) -> Vec<(String, String)> {
    let mut params: Vec<(String, String)> = Vec::new();
    for (k, v) in url.query_pairs() {
        if params.iter().any(|(seen, _)| seen == k.as_ref()) {
            continue;
        }
        params.push((k.to_string(), v.to_string()));
    }
    params
}

/// Parse `<form>` descriptors out of a page. Only forms with at least one
/// named input/textarea/select are returned.
pub fn parse_forms(base: &Url, html: &str) -> Vec<FormDescriptor> {
    let document = Html::parse_document(html);

    let form_sel = match Selector::parse("form") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };
    let field_sel = match Selector::parse("input[name], textarea[name], select[name]") {
        Ok(s) => s,
        Err(_) => return Vec::new(),
    };

    let mut forms = Vec::new();
    for form in document.select(&form_sel) {
        let action_attr = form.value().attr("action").unwrap_or("");
        let action = if action_attr.is_empty() {
            base.clone()
        } else {
            match base.join(action_attr) {
                Ok(u) => u,
                Err(e) => {
                    tracing::warn!("skipping form with unresolvable action {:?}: {}", action_attr, e);
                    continue;
                }
            }
        };
        let method = form
            .value()
            .attr("method")
            .unwrap_or("get")
            .to_uppercase();

        let mut fields = Vec::new();
        for field in form.select(&field_sel) {
            if let Some(name) = field.value().attr("name") {
                fields.push(FormField {
                    name: name.to_string(),
                    field_type: field.value().attr("type").unwrap_or("text").to_string(),
                });
            }
        }

        if !fields.is_empty() {
            forms.push(FormDescriptor {
                action,
                method,
                fields,
            });
        }
    }

    forms
}

/// Fetch the target page and extract its forms. Transport failure yields an
/// empty list.
pub async fn discover_forms(client: &HttpClient, target: &Url) -> Vec<FormDescriptor> {
    match client.get(target).await {
        Some(response) => parse_forms(target, &response.body),
        None => {
            tracing::warn!("could not fetch {} for form discovery", target);
            Vec::new()
        }
    }
}

/// Build the full list of injection points for a target: one per query
/// parameter, one per data-bearing form field.
pub fn injection_points(target: &Url, forms: &[FormDescriptor]) -> Vec<InjectionPoint> {
    let mut points = Vec::new();

    for (name, value) in query_parameters(target) {
        points.push(InjectionPoint {
            name,
            location: Location::Query,
            method: "GET".to_string(),
            value,
            field_type: None,
            form: None,
        });
    }

    for form in forms {
        for field in &form.fields {
            points.push(InjectionPoint {
                name: field.name.clone(),
                location: Location::FormField,
                method: form.method.clone(),
                value: String::new(),
                field_type: Some(field.field_type.clone()),
                form: Some(form.clone()),
            });
        }
    }

    points
}
