//! Per-call extraction state.
//!
//! `ImageCounter` numbers images across one extraction. `DescentGuard`
//! bounds candidate scoring and the recursive serializer by a wall-clock
//! deadline and an optional cancellation flag shared with another thread.
//! The serializer is also bounded by depth.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Sequential image numbering, starting at 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageCounter {
    count: usize,
}

impl ImageCounter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Increment and return the new image number.
    pub fn next_number(&mut self) -> usize {
        self.count += 1;
        self.count
    }

    /// Number of images seen so far.
    #[must_use]
    pub fn count(&self) -> usize {
        self.count
    }
}

/// Why a descent was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interruption {
    /// Nesting went past `max_depth`.
    DepthExceeded {
        /// The configured limit.
        limit: usize,
    },
    /// The deadline passed.
    TimedOut,
    /// The cancellation flag was raised.
    Cancelled,
}

/// Limits checked before every descent.
///
/// Once tripped, the guard refuses all further descents and keeps the first
/// interruption it recorded.
#[derive(Debug, Clone)]
pub struct DescentGuard {
    max_depth: usize,
    deadline: Option<Instant>,
    cancel: Option<Arc<AtomicBool>>,
    interruption: Option<Interruption>,
}

impl DescentGuard {
    /// Guard with only a depth limit.
    #[must_use]
    pub fn new(max_depth: usize) -> Self {
        Self {
            max_depth,
            deadline: None,
            cancel: None,
            interruption: None,
        }
    }

    /// Add a deadline `timeout` from now.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.deadline = timeout.and_then(|t| Instant::now().checked_add(t));
        self
    }

    /// Add a cancellation flag.
    #[must_use]
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    #[must_use]
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Check whether descending to `depth` is allowed.
    ///
    /// Records the interruption on the first refusal.
    pub fn allow(&mut self, depth: usize) -> bool {
        if self.interruption.is_none() && depth > self.max_depth {
            self.interruption = Some(Interruption::DepthExceeded { limit: self.max_depth });
        }
        self.check()
    }

    /// Check the cancellation flag and the deadline, ignoring depth.
    ///
    /// Used by walks whose depth is not bounded by `max_depth`, such as
    /// candidate scoring over the whole document.
    pub fn check(&mut self) -> bool {
        if self.interruption.is_none() {
            if self.cancel.as_ref().is_some_and(|flag| flag.load(Ordering::Relaxed)) {
                self.interruption = Some(Interruption::Cancelled);
            } else if self.deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                self.interruption = Some(Interruption::TimedOut);
            }
        }
        self.interruption.is_none()
    }

    /// First interruption recorded, if any.
    #[must_use]
    pub fn interruption(&self) -> Option<Interruption> {
        self.interruption
    }
}

impl Default for DescentGuard {
    fn default() -> Self {
        Self::new(crate::options::DEFAULT_MAX_DEPTH)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_image_counter_starts_at_one() {
        let mut counter = ImageCounter::new();
        assert_eq!(counter.count(), 0);
        assert_eq!(counter.next_number(), 1);
        assert_eq!(counter.next_number(), 2);
        assert_eq!(counter.count(), 2);
    }

    #[test]
    fn test_depth_limit_is_inclusive() {
        let mut guard = DescentGuard::new(3);
        assert!(guard.allow(3));
        assert!(guard.interruption().is_none());
        assert!(!guard.allow(4));
        assert_eq!(guard.interruption(), Some(Interruption::DepthExceeded { limit: 3 }));
    }

    #[test]
    fn test_tripped_guard_stays_tripped() {
        let mut guard = DescentGuard::new(1);
        assert!(!guard.allow(2));
        assert!(!guard.allow(0));
    }

    #[test]
    fn test_cancel_flag() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut guard = DescentGuard::new(10).with_cancel_flag(Arc::clone(&flag));
        assert!(guard.allow(1));
        flag.store(true, Ordering::Relaxed);
        assert!(!guard.allow(1));
        assert_eq!(guard.interruption(), Some(Interruption::Cancelled));
    }

    #[test]
    fn test_elapsed_deadline() {
        let mut guard = DescentGuard::new(10).with_timeout(Some(Duration::ZERO));
        assert!(!guard.allow(0));
        assert_eq!(guard.interruption(), Some(Interruption::TimedOut));
    }

    #[test]
    fn test_check_ignores_depth_but_sees_cancel() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut guard = DescentGuard::new(0).with_cancel_flag(Arc::clone(&flag));
        assert!(guard.check());
        flag.store(true, Ordering::Relaxed);
        assert!(!guard.check());
        assert!(!guard.allow(0));
        assert_eq!(guard.interruption(), Some(Interruption::Cancelled));
    }

    #[test]
    fn test_no_timeout_never_expires() {
        let mut guard = DescentGuard::new(10).with_timeout(None);
        assert!(guard.allow(10));
    }
}
