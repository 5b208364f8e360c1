use std::time::{Duration, Instant};

/// Safe margin for move time overhead.
const TIME_MARGIN: Duration = Duration::from_millis(25);

/// The per-move search budget. The limit is advisory: the search samples
/// the clock cooperatively, so it may overshoot by a few sample intervals.
pub struct TimeControl {
    stop_time: Instant,
    max_depth: i32,
}

impl TimeControl {
    pub fn new(move_time: Duration, max_depth: i32) -> Self {
        let budget = move_time.saturating_sub(TIME_MARGIN).max(Duration::from_millis(1));
        Self {
            stop_time: Instant::now() + budget,
            max_depth,
        }
    }

    /// Returns a control that never expires, for fixed-depth searches.
    pub fn fixed_depth(max_depth: i32) -> Self {
        Self {
            stop_time: Instant::now() + Duration::from_secs(60 * 60 * 24 * 365),
            max_depth,
        }
    }

    /// Returns `true` if the time has expired.
    #[inline(always)]
    pub fn is_time_over(&self) -> bool {
        Instant::now() >= self.stop_time
    }

    pub const fn max_depth(&self) -> i32 {
        self.max_depth
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expires_after_the_budget() {
        let tc = TimeControl::new(Duration::from_millis(125), 4);
        assert!(!tc.is_time_over());

        std::thread::sleep(Duration::from_millis(150));
        assert!(tc.is_time_over());
    }

    #[test]
    fn fixed_depth_never_expires() {
        let tc = TimeControl::fixed_depth(6);
        assert!(!tc.is_time_over());
        assert_eq!(tc.max_depth(), 6);
    }
}
