use std::time::Duration;

/// Time-cost function for simulated execution.
///
/// Called once per executed slice with the number of units the slice costs
/// (the quantum for round robin, the burst time for shortest job first).
/// Blocks the caller for as long as the slice is meant to take.
pub trait Pacer: Send + Sync {
    fn pause(&self, units: i64);
}

/// Sleeps `unit` per simulated unit. Non-positive unit counts do not sleep.
#[derive(Debug, Clone, Copy)]
pub struct SleepPacer {
    unit: Duration,
}

impl SleepPacer {
    pub fn new(unit: Duration) -> Self {
        Self { unit }
    }

    pub fn from_millis(unit_ms: u64) -> Self {
        Self::new(Duration::from_millis(unit_ms))
    }

    pub fn cost(&self, units: i64) -> Duration {
        if units <= 0 {
            return Duration::ZERO;
        }
        let units = u32::try_from(units).unwrap_or(u32::MAX);
        self.unit.saturating_mul(units)
    }
}

impl Pacer for SleepPacer {
    fn pause(&self, units: i64) {
        let cost = self.cost(units);
        if !cost.is_zero() {
            std::thread::sleep(cost);
        }
    }
}

/// Zero-cost pacer for tests and fast runs.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoDelay;

impl Pacer for NoDelay {
    fn pause(&self, _units: i64) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Instant;

    #[test]
    fn test_cost_scales_with_units() {
        let pacer = SleepPacer::from_millis(100);
        assert_eq!(pacer.cost(2), Duration::from_millis(200));
        assert_eq!(pacer.cost(0), Duration::ZERO);
        assert_eq!(pacer.cost(-4), Duration::ZERO);
    }

    #[test]
    fn test_sleep_pacer_blocks() {
        let pacer = SleepPacer::from_millis(1);
        let start = Instant::now();
        pacer.pause(3);
        assert!(start.elapsed() >= Duration::from_millis(3));
    }
}
