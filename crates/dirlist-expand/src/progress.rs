//! Expansion progress and activity reporting.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};

/// Progress information during an expansion.
#[derive(Debug, Clone)]
pub struct ExpandProgress {
    /// Number of directories listed so far.
    pub dirs_read: u64,
    /// Number of playlist entries added so far.
    pub entries_added: u64,
    /// Number of containers added so far.
    pub containers_added: u64,
    /// Directory currently being read.
    pub current_path: PathBuf,
    /// Number of warnings encountered.
    pub warnings_count: u64,
    /// Time elapsed since the expansion started.
    pub elapsed: Duration,
}

impl ExpandProgress {
    /// Create initial progress state.
    pub fn new() -> Self {
        Self {
            dirs_read: 0,
            entries_added: 0,
            containers_added: 0,
            current_path: PathBuf::new(),
            warnings_count: 0,
            elapsed: Duration::ZERO,
        }
    }

    /// Calculate expansion rate in entries per second.
    pub fn entries_per_second(&self) -> f64 {
        if self.elapsed.as_secs_f64() > 0.0 {
            self.entries_added as f64 / self.elapsed.as_secs_f64()
        } else {
            0.0
        }
    }
}

impl Default for ExpandProgress {
    fn default() -> Self {
        Self::new()
    }
}

/// Internal progress tracker with timing.
#[derive(Debug)]
pub(crate) struct ProgressTracker {
    start_time: Instant,
    dirs_read: u64,
    entries_added: u64,
    containers_added: u64,
    warnings_count: u64,
    current_path: PathBuf,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            dirs_read: 0,
            entries_added: 0,
            containers_added: 0,
            warnings_count: 0,
            current_path: PathBuf::new(),
        }
    }

    pub fn record_dir(&mut self, path: PathBuf) {
        self.dirs_read += 1;
        self.current_path = path;
    }

    pub fn record_entry(&mut self) {
        self.entries_added += 1;
    }

    pub fn record_container(&mut self) {
        self.containers_added += 1;
    }

    pub fn record_warning(&mut self) {
        self.warnings_count += 1;
    }

    pub fn snapshot(&self) -> ExpandProgress {
        ExpandProgress {
            dirs_read: self.dirs_read,
            entries_added: self.entries_added,
            containers_added: self.containers_added,
            current_path: self.current_path.clone(),
            warnings_count: self.warnings_count,
            elapsed: self.start_time.elapsed(),
        }
    }
}

/// Shared count of expansions currently running.
#[derive(Debug, Clone, Default)]
pub struct ActivityCounter(Arc<AtomicUsize>);

impl ActivityCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current number of running expansions.
    pub fn get(&self) -> usize {
        self.0.load(Ordering::SeqCst)
    }

    /// Increment the counter until the returned guard is dropped.
    pub fn enter(&self) -> ActivityGuard {
        self.0.fetch_add(1, Ordering::SeqCst);
        ActivityGuard(Arc::clone(&self.0))
    }
}

/// Decrements the [`ActivityCounter`] on drop.
#[derive(Debug)]
pub struct ActivityGuard(Arc<AtomicUsize>);

impl Drop for ActivityGuard {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tracker_snapshot() {
        let mut tracker = ProgressTracker::new();
        tracker.record_dir(PathBuf::from("/m"));
        tracker.record_entry();
        tracker.record_entry();
        tracker.record_container();
        tracker.record_warning();

        let progress = tracker.snapshot();
        assert_eq!(progress.dirs_read, 1);
        assert_eq!(progress.entries_added, 2);
        assert_eq!(progress.containers_added, 1);
        assert_eq!(progress.warnings_count, 1);
        assert_eq!(progress.current_path, PathBuf::from("/m"));
    }

    #[test]
    fn test_activity_guard() {
        let activity = ActivityCounter::new();
        assert_eq!(activity.get(), 0);
        {
            let _outer = activity.enter();
            let _inner = activity.clone().enter();
            assert_eq!(activity.get(), 2);
        }
        assert_eq!(activity.get(), 0);
    }

    #[test]
    fn test_rate_without_elapsed() {
        assert_eq!(ExpandProgress::new().entries_per_second(), 0.0);
    }
}
