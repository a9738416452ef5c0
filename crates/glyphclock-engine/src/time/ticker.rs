use std::time::{Duration, Instant};

/// One firing of a [`Ticker`].
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Tick {
    /// Monotonic tick counter, starting at 0.
    pub index: u64,

    /// Deadline this tick was scheduled for.
    pub scheduled: Instant,

    /// How late the tick was observed relative to `scheduled`.
    pub lag: Duration,
}

/// Fixed-interval periodic task.
///
/// The ticker never fires in bursts: when the caller falls behind by more than
/// one interval, the missed deadlines are skipped and the next deadline is
/// realigned to the original grid (`start + k * interval`).
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next: Instant,
    index: u64,
    skipped: u64,
}

impl Ticker {
    /// Shortest accepted interval. Zero would make every poll due.
    pub const MIN_INTERVAL: Duration = Duration::from_millis(1);

    /// Creates a ticker whose first tick is due immediately.
    pub fn new(interval: Duration) -> Self {
        Self::starting_at(Instant::now(), interval)
    }

    /// Creates a ticker whose first tick is due at `start`.
    pub fn starting_at(start: Instant, interval: Duration) -> Self {
        Self {
            interval: interval.max(Self::MIN_INTERVAL),
            next: start,
            index: 0,
            skipped: 0,
        }
    }

    #[inline]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Instant at which the next tick becomes due.
    #[inline]
    pub fn next_deadline(&self) -> Instant {
        self.next
    }

    /// Number of ticks fired so far.
    #[inline]
    pub fn ticks(&self) -> u64 {
        self.index
    }

    /// Number of deadlines dropped because the caller fell behind.
    #[inline]
    pub fn skipped(&self) -> u64 {
        self.skipped
    }

    #[inline]
    pub fn is_due(&self, now: Instant) -> bool {
        now >= self.next
    }

    /// Fires at most one tick if the deadline has passed.
    pub fn poll(&mut self, now: Instant) -> Option<Tick> {
        if !self.is_due(now) {
            return None;
        }

        let behind = now.saturating_duration_since(self.next);
        let tick = Tick {
            index: self.index,
            scheduled: self.next,
            lag: behind,
        };

        self.index = self.index.wrapping_add(1);

        let interval_ns = self.interval.as_nanos();
        let behind_ns = behind.as_nanos();
        if behind_ns < interval_ns {
            self.next += self.interval;
        } else {
            let missed = behind_ns / interval_ns;
            let to_grid = interval_ns - behind_ns % interval_ns;
            self.skipped = self.skipped.saturating_add(missed as u64);
            self.next = now + Duration::from_nanos(to_grid as u64);
            log::trace!("ticker fell behind by {behind:?}; skipped {missed} tick(s)");
        }

        Some(tick)
    }
}
