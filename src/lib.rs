//! Black-box web vulnerability scanner: SQL injection and cross-site
//! scripting detection via payload probing and response classification.
//!
//! The library surface is [`scan`] plus the [`Engine`] for callers that need
//! the abort handle, a private session registry, or partial results from a
//! failed scan.

pub mod classify;
pub mod cli;
pub mod core;
pub mod http;
pub mod payload;
pub mod probe;
pub mod reporting;
pub mod scanner;

pub use crate::core::context::{ScanConfig, ScanKind};
pub use crate::core::engine::Engine;
pub use crate::core::session::{ScanStatus, SessionRegistry};
pub use crate::reporting::model::{Finding, Severity};

/// Scan a target for both vulnerability classes and return the findings.
pub async fn scan(target: &str, config: ScanConfig) -> anyhow::Result<Vec<Finding>> {
    let engine = Engine::new(config, ScanKind::All)?;
    let (findings, status) = engine.scan(target).await;
    match status {
        ScanStatus::Failed(msg) => Err(anyhow::anyhow!(msg)),
        _ => Ok(findings),
    }
}
