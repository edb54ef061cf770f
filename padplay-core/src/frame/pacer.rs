/// Monotonic millisecond time source
pub trait Clock {
    /// Milliseconds since an arbitrary fixed origin
    fn now_ms(&self) -> u64;
}

/// Fixed-cadence frame pacing
///
/// Marks the start of each frame and reports how much of the frame budget
/// is left, so the loop only sleeps for the remainder.
#[derive(Debug, Clone, Copy)]
pub struct FramePacer {
    period_ms: u32,
    frame_start: u64,
}

impl FramePacer {
    pub fn new(period_ms: u32) -> Self {
        Self {
            period_ms,
            frame_start: 0,
        }
    }

    /// Mark the start of a frame with the given period
    pub fn begin(&mut self, now_ms: u64, period_ms: u32) {
        self.period_ms = period_ms;
        self.frame_start = now_ms;
    }

    /// Milliseconds left in the current frame budget
    pub fn remaining(&self, now_ms: u64) -> u32 {
        let elapsed = now_ms.saturating_sub(self.frame_start);
        // An overrun frame starts the next one immediately
        (self.period_ms as u64).saturating_sub(elapsed) as u32
    }

    pub fn period_ms(&self) -> u32 {
        self.period_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_budget_at_start() {
        let mut pacer = FramePacer::new(30);
        pacer.begin(1000, 30);
        assert_eq!(pacer.remaining(1000), 30);
    }

    #[test]
    fn test_partial_budget() {
        let mut pacer = FramePacer::new(30);
        pacer.begin(1000, 30);
        assert_eq!(pacer.remaining(1012), 18);
    }

    #[test]
    fn test_overrun_frame() {
        let mut pacer = FramePacer::new(30);
        pacer.begin(1000, 30);
        assert_eq!(pacer.remaining(1045), 0);
        assert_eq!(pacer.remaining(u64::MAX), 0);
    }

    #[test]
    fn test_clock_behind_frame_start() {
        let mut pacer = FramePacer::new(30);
        pacer.begin(1000, 30);
        assert_eq!(pacer.remaining(900), 30);
    }

    #[test]
    fn test_period_change() {
        let mut pacer = FramePacer::new(30);
        pacer.begin(0, 10);
        assert_eq!(pacer.period_ms(), 10);
        assert_eq!(pacer.remaining(4), 6);
    }
}
