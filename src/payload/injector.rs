use url::Url;

/// Rebuild a URL's query string with exactly one parameter's value replaced.
/// All other parameters keep their original values and order; repeated keys
/// keep only their first occurrence. If the parameter is absent it is
/// appended.
pub fn rewrite_query(base: &Url, param: &str, value: &str) -> Url {
    let mut pairs: Vec<(String, String)> = Vec::new();
    for (k, v) in base.query_pairs() {
        if pairs.iter().any(|(seen, _)| seen == k.as_ref()) {
            continue;
        }
        pairs.push((k.to_string(), v.to_string()));
    }

    let mut found = false;
    for (k, v) in pairs.iter_mut() {
        if k == param {
            *v = value.to_string();
            found = true;
        }
    }
    if !found {
        pairs.push((param.to_string(), value.to_string()));
    }

    let mut url = base.clone();
    url.query_pairs_mut().clear().extend_pairs(pairs);
    url
}
