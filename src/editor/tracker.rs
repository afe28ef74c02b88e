use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts uploads in flight. Hosts disable editing while it is non-zero.
#[derive(Debug, Clone, Default)]
pub struct UploadTracker {
    in_flight: Arc<AtomicUsize>,
}

impl UploadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks an upload as started until the returned guard is dropped.
    pub fn begin(&self) -> UploadGuard {
        self.in_flight.fetch_add(1, Ordering::SeqCst);
        UploadGuard {
            in_flight: Arc::clone(&self.in_flight),
        }
    }

    pub fn is_uploading(&self) -> bool {
        self.in_flight() > 0
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }
}

#[derive(Debug)]
pub struct UploadGuard {
    in_flight: Arc<AtomicUsize>,
}

impl Drop for UploadGuard {
    fn drop(&mut self) {
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guard_clears_on_drop() {
        let tracker = UploadTracker::new();
        assert!(!tracker.is_uploading());

        let first = tracker.begin();
        let second = tracker.clone().begin();
        assert_eq!(tracker.in_flight(), 2);

        drop(first);
        assert!(tracker.is_uploading());
        drop(second);
        assert!(!tracker.is_uploading());
    }
}
