use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Paces outbound requests to at most `rate` per second by handing out send
/// slots spaced one gap apart. Probing is sequential per scan, so this
/// doubles as the politeness cap toward the target.
#[derive(Clone)]
pub struct RateLimiter {
    /// Minimum spacing between sends; `None` disables pacing.
    gap: Option<Duration>,
    next_slot: Arc<Mutex<Instant>>,
}

impl RateLimiter {
    /// `rate` is requests per second; 0 means unlimited.
    pub fn new(rate: u32) -> Self {
        let gap = (rate > 0).then(|| Duration::from_secs_f64(1.0 / f64::from(rate)));
        Self {
            gap,
            next_slot: Arc::new(Mutex::new(Instant::now())),
        }
    }

    /// Block until the next send slot opens, then claim it.
    pub async fn wait(&self) {
        let Some(gap) = self.gap else {
            return;
        };

        let mut slot = self.next_slot.lock().await;
        let now = Instant::now();
        if now < *slot {
            tokio::time::sleep(*slot - now).await;
        }
        *slot = Instant::now() + gap;
    }
}
