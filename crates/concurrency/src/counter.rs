//! GuardedCounter: the lost-update demonstration
//!
//! Both increment paths perform the same three steps:
//!
//! ```text
//! 1. read the current value
//! 2. pause (simulated processing)
//! 3. write back read_value + 1
//! ```
//!
//! `increment_unguarded` runs them with no exclusion, so two threads can read
//! the same value during each other's pause and one update is lost.
//! `increment_guarded` runs them while holding the counter's lock.
//!
//! The value lives in an `AtomicU64` and the unguarded path uses a separate
//! load and store. The race is therefore a logical lost update, never a data
//! race in the memory-model sense.
//!
//! Mixing both paths on one counter is allowed, but the guarded invariant
//! (`value == completed increments`) only holds if every caller is guarded.

use parking_lot::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// Pause between read and write-back when none is configured
pub const DEFAULT_INCREMENT_DELAY: Duration = Duration::from_micros(100);

/// Shared counter with a racy and a lock-protected increment
#[derive(Debug)]
pub struct GuardedCounter {
    value: AtomicU64,
    guard: Mutex<()>,
    delay: Duration,
}

impl GuardedCounter {
    /// Create a counter at zero with the default increment delay
    pub fn new() -> Self {
        Self::with_delay(DEFAULT_INCREMENT_DELAY)
    }

    /// Create a counter at zero that pauses `delay` inside every increment
    ///
    /// A zero delay still yields the thread between read and write.
    pub fn with_delay(delay: Duration) -> Self {
        GuardedCounter {
            value: AtomicU64::new(0),
            guard: Mutex::new(()),
            delay,
        }
    }

    /// Configured pause between read and write-back
    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Current value
    pub fn read(&self) -> u64 {
        self.value.load(Ordering::SeqCst)
    }

    /// Read, pause, write back without exclusion
    ///
    /// Concurrent callers may overwrite each other's update.
    pub fn increment_unguarded(&self) {
        self.read_pause_write();
    }

    /// Read, pause, write back while holding the lock
    ///
    /// The guard is dropped on every exit path, including unwinding.
    pub fn increment_guarded(&self) {
        let _guard = self.guard.lock();
        self.read_pause_write();
    }

    fn read_pause_write(&self) {
        let current = self.value.load(Ordering::SeqCst);
        self.pause();
        self.value.store(current + 1, Ordering::SeqCst);
    }

    fn pause(&self) {
        if self.delay.is_zero() {
            thread::yield_now();
        } else {
            thread::sleep(self.delay);
        }
    }
}

impl Default for GuardedCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_new_counter_is_zero() {
        let counter = GuardedCounter::new();
        assert_eq!(counter.read(), 0);
        assert_eq!(counter.delay(), DEFAULT_INCREMENT_DELAY);
    }

    #[test]
    fn test_single_thread_paths_agree() {
        let counter = GuardedCounter::with_delay(Duration::ZERO);
        for _ in 0..10 {
            counter.increment_unguarded();
        }
        for _ in 0..10 {
            counter.increment_guarded();
        }
        assert_eq!(counter.read(), 20);
    }

    #[test]
    fn test_guarded_increments_from_threads() {
        let counter = Arc::new(GuardedCounter::with_delay(Duration::from_micros(10)));

        let handles: Vec<_> = (0..4)
            .map(|_| {
                let counter = Arc::clone(&counter);
                thread::spawn(move || {
                    for _ in 0..25 {
                        counter.increment_guarded();
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(counter.read(), 100);
    }

    #[test]
    fn test_guard_released_after_panic() {
        let counter = Arc::new(GuardedCounter::with_delay(Duration::ZERO));

        let panicking = Arc::clone(&counter);
        let result = thread::spawn(move || {
            let _guard = panicking.guard.lock();
            panic!("worker failed inside critical section");
        })
        .join();
        assert!(result.is_err());

        // parking_lot guards release on unwind and do not poison
        counter.increment_guarded();
        assert_eq!(counter.read(), 1);
    }
}
