//! Generation numbers that keep stale search responses from being applied.

use std::sync::atomic::{AtomicU64, Ordering};

/// Identifies one issued search request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Generation(u64);

impl Generation {
    /// Raw counter value
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Issues strictly increasing generations; only the newest is current.
#[derive(Debug, Default)]
pub struct SearchSequencer {
    latest: AtomicU64,
}

impl SearchSequencer {
    /// Create a sequencer that has issued nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a new request, superseding every earlier one
    pub fn issue(&self) -> Generation {
        Generation(self.latest.fetch_add(1, Ordering::AcqRel) + 1)
    }

    /// True when no request has been issued after `generation`
    pub fn is_current(&self, generation: Generation) -> bool {
        self.latest.load(Ordering::Acquire) == generation.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn newer_generation_supersedes_older() {
        let seq = SearchSequencer::new();
        let first = seq.issue();
        assert!(seq.is_current(first));

        let second = seq.issue();
        assert!(second > first);
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn concurrent_issue_is_unique() {
        let seq = Arc::new(SearchSequencer::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let seq = Arc::clone(&seq);
                std::thread::spawn(move || (0..100).map(|_| seq.issue().get()).collect::<Vec<_>>())
            })
            .collect();

        let mut all: Vec<u64> = handles
            .into_iter()
            .flat_map(|h| h.join().unwrap())
            .collect();
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 800);
        assert!(seq.is_current(Generation(800)));
    }
}
