//! Scan engine internals: configuration, orchestration, sessions, pacing.

pub mod context;
pub mod engine;
pub mod rate_limit;
pub mod session;
