//! Cosmetic upload progress.
//!
//! Progress is a separate ticking task, not a measurement: it increments by
//! random steps while the real call is in flight, never passes 89, and is
//! cancelled unconditionally when the call resolves. Success jumps the
//! value to 100.

use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

use rand::Rng;
use tokio::task::JoinHandle;

const PROGRESS_CEILING: u8 = 89;

pub struct ProgressTicker {
    value: Arc<AtomicU8>,
    handle: JoinHandle<()>,
}

impl ProgressTicker {
    /// Spawns the ticking task. `tick` is the interval between increments.
    pub fn start(tick: Duration) -> Self {
        let value = Arc::new(AtomicU8::new(0));
        let ticking = Arc::clone(&value);
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(tick);
            loop {
                interval.tick().await;
                let step = rand::rng().random_range(5..=15);
                let current = ticking.load(Ordering::Relaxed);
                let next = current.saturating_add(step).min(PROGRESS_CEILING);
                ticking.store(next, Ordering::Relaxed);
                if next >= PROGRESS_CEILING {
                    break;
                }
            }
        });
        Self { value, handle }
    }

    pub fn value(&self) -> u8 {
        self.value.load(Ordering::Relaxed)
    }

    /// Stops ticking and pins the value at 100.
    pub fn complete(self) -> u8 {
        self.handle.abort();
        self.value.store(100, Ordering::Relaxed);
        100
    }

    /// Stops ticking, leaving the value where it was.
    pub fn halt(self) -> u8 {
        self.handle.abort();
        self.value.load(Ordering::Relaxed)
    }
}

impl Drop for ProgressTicker {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_never_exceeds_ceiling_while_ticking() {
        let ticker = ProgressTicker::start(Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(ticker.value() <= PROGRESS_CEILING);
    }

    #[tokio::test]
    async fn test_complete_jumps_to_full() {
        let ticker = ProgressTicker::start(Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(5)).await;
        assert_eq!(ticker.complete(), 100);
    }

    #[tokio::test]
    async fn test_halt_preserves_partial_value() {
        let ticker = ProgressTicker::start(Duration::from_millis(1));
        tokio::time::sleep(Duration::from_millis(20)).await;
        let v = ticker.halt();
        assert!(v > 0 && v <= PROGRESS_CEILING);
    }

    #[tokio::test]
    async fn test_immediate_completion_does_not_deadlock() {
        // Real call may finish before the first tick fires.
        let ticker = ProgressTicker::start(Duration::from_secs(60));
        assert_eq!(ticker.complete(), 100);
    }
}
