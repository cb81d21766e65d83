use std::time::Duration;

/// Materialized HTTP response. The classifiers only ever look at the body
/// text and the wall-clock time the exchange took.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
    pub elapsed: Duration,
}
