//! Wheel stall detection

// ---------------------------------------------------------------------------
// IMPORTS
// ---------------------------------------------------------------------------

use std::collections::VecDeque;

// ---------------------------------------------------------------------------
// DATA STRUCTURES
// ---------------------------------------------------------------------------

/// Monitors the recent progress of a wheel to detect stalls.
///
/// A wheel is stalled when the counts it made over the last `window_samples`
/// powered samples add up to less than `min_counts`. Samples taken before the
/// wheel was first given power are not pushed into the monitor, so a wheel
/// that is just starting up is never reported as stalled.
#[derive(Debug, Clone)]
pub struct StallMonitor {
    window_samples: usize,
    min_counts: i64,
    history: VecDeque<i64>
}

// ---------------------------------------------------------------------------
// IMPLEMENTATIONS
// ---------------------------------------------------------------------------

impl StallMonitor {
    /// Create a new monitor.
    ///
    /// A window of zero samples disables stall detection.
    pub fn new(window_samples: usize, min_counts: i64) -> Self {
        Self {
            window_samples,
            min_counts,
            history: VecDeque::with_capacity(window_samples + 1)
        }
    }

    /// Record the progress made during a powered sample.
    pub fn push(&mut self, delta_counts: i64) {
        if self.window_samples == 0 {
            return
        }

        self.history.push_back(delta_counts);
        while self.history.len() > self.window_samples {
            self.history.pop_front();
        }
    }

    /// Forget all recorded samples.
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// True if the wheel failed to make enough progress over a full window.
    pub fn is_stalled(&self) -> bool {
        self.window_samples > 0
            && self.history.len() >= self.window_samples
            && self.history.iter().sum::<i64>().abs() < self.min_counts
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_needs_full_window() {
        let mut m = StallMonitor::new(2, 10);
        assert!(!m.is_stalled());

        m.push(0);
        assert!(!m.is_stalled());

        m.push(0);
        assert!(m.is_stalled());
    }

    #[test]
    fn test_progress_over_window() {
        let mut m = StallMonitor::new(2, 10);

        m.push(4);
        m.push(6);
        assert!(!m.is_stalled());

        // The 4 drops out of the window
        m.push(3);
        assert!(m.is_stalled());

        m.push(20);
        assert!(!m.is_stalled());

        m.clear();
        assert!(!m.is_stalled());
    }

    #[test]
    fn test_disabled() {
        let mut m = StallMonitor::new(0, 10);
        for _ in 0..5 {
            m.push(0);
        }
        assert!(!m.is_stalled());
    }
}
