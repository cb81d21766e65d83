//! Per-scan state and the process-wide session registry.
//!
//! The registry lets status-polling callers observe running scans without
//! touching scan internals. Only the owning scan's task mutates an entry;
//! everyone else reads. Entries are evictable after a retention window.

use crate::classify::xss::PendingStoredProbe;
use crate::reporting::reporter::Reporter;
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

/// Coarse progress milestones, advisory only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanPhase {
    Enumeration,
    Probing,
    StoredVerification,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanStatus {
    Running(ScanPhase),
    Completed,
    Failed(String),
}

/// Mutable state owned by one running scan.
pub struct ScanSession {
    /// Injection-point names already probed this scan. A point is tested at
    /// most once.
    pub tested: HashSet<String>,
    pub reporter: Reporter,
    pub pending_stored: Vec<PendingStoredProbe>,
    pub confirmed_markers: HashSet<String>,
}

impl ScanSession {
    pub fn new() -> Self {
        Self {
            tested: HashSet::new(),
            reporter: Reporter::new(),
            pending_stored: Vec::new(),
            confirmed_markers: HashSet::new(),
        }
    }
}

impl Default for ScanSession {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct SessionEntry {
    pub status: ScanStatus,
    pub created_at: DateTime<Utc>,
    pub findings: usize,
}

/// Registry of scan sessions keyed by scan id. Cheap to clone; all clones
/// share the same map.
#[derive(Clone)]
pub struct SessionRegistry {
    inner: Arc<Mutex<HashMap<String, SessionEntry>>>,
}

static GLOBAL_REGISTRY: Lazy<SessionRegistry> = Lazy::new(SessionRegistry::new);

impl SessionRegistry {
    pub fn new() -> Self {
        Self {
            inner: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// The process-wide registry used by scans that are not given one.
    pub fn global() -> Self {
        GLOBAL_REGISTRY.clone()
    }

    pub fn register(&self, scan_id: &str) {
        let mut map = self.inner.lock().expect("registry poisoned");
        map.insert(
            scan_id.to_string(),
            SessionEntry {
                status: ScanStatus::Running(ScanPhase::Enumeration),
                created_at: Utc::now(),
                findings: 0,
            },
        );
    }

    pub fn set_status(&self, scan_id: &str, status: ScanStatus) {
        let mut map = self.inner.lock().expect("registry poisoned");
        if let Some(entry) = map.get_mut(scan_id) {
            entry.status = status;
        }
    }

    pub fn set_findings(&self, scan_id: &str, count: usize) {
        let mut map = self.inner.lock().expect("registry poisoned");
        if let Some(entry) = map.get_mut(scan_id) {
            entry.findings = count;
        }
    }

    pub fn entry(&self, scan_id: &str) -> Option<SessionEntry> {
        let map = self.inner.lock().expect("registry poisoned");
        map.get(scan_id).cloned()
    }

    /// Drop entries older than the retention window. Returns how many were
    /// evicted.
    pub fn evict_older_than(&self, retention: chrono::Duration) -> usize {
        let cutoff = Utc::now() - retention;
        let mut map = self.inner.lock().expect("registry poisoned");
        let before = map.len();
        map.retain(|_, entry| entry.created_at >= cutoff);
        before - map.len()
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
