use std::time::{Duration, Instant};

/// Frame timing snapshot handed to per-frame callbacks.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous tick, in seconds (clamped).
    pub dt: f32,

    /// Monotonic seconds since the clock was created.
    ///
    /// This is the "time value" per-frame callbacks animate against; it never
    /// decreases, even across `reset`.
    pub elapsed: f64,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// Delta time is clamped so a stalled or backgrounded window does not hand a
/// huge step to animation code when frames resume.
#[derive(Debug, Clone)]
pub struct FrameClock {
    origin: Instant,
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    pub fn new() -> Self {
        Self::with_clamps(Duration::from_micros(100), Duration::from_millis(250))
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        let now = Instant::now();
        Self {
            origin: now,
            last: now,
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the delta baseline (not `elapsed`).
    ///
    /// Call when the animation chain restarts so the first frame does not see
    /// the idle gap as its delta.
    pub fn reset(&mut self) {
        self.reset_at(Instant::now());
    }

    pub(crate) fn reset_at(&mut self, now: Instant) {
        self.last = now;
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub(crate) fn tick_at(&mut self, now: Instant) -> FrameTime {
        let dt = now
            .saturating_duration_since(self.last)
            .clamp(self.dt_min, self.dt_max);

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            elapsed: now.saturating_duration_since(self.origin).as_secs_f64(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self.frame_index.wrapping_add(1);
        ft
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn elapsed_is_monotonic_and_index_counts_up() {
        let mut clock = FrameClock::new();
        let base = clock.origin;

        let a = clock.tick_at(base + Duration::from_millis(16));
        let b = clock.tick_at(base + Duration::from_millis(33));

        assert_eq!(a.frame_index, 0);
        assert_eq!(b.frame_index, 1);
        assert!(b.elapsed > a.elapsed);
    }

    #[test]
    fn delta_is_clamped_after_a_stall() {
        let mut clock = FrameClock::new();
        let base = clock.origin;

        let ft = clock.tick_at(base + Duration::from_secs(5));
        assert_eq!(ft.dt, 0.25);
        assert!((ft.elapsed - 5.0).abs() < 1e-9);
    }

    #[test]
    fn reset_keeps_elapsed_running() {
        let mut clock = FrameClock::new();
        let base = clock.origin;
        clock.tick_at(base + Duration::from_secs(1));
        clock.reset();
        let ft = clock.tick_at(base + Duration::from_secs(2));
        assert!((ft.elapsed - 2.0).abs() < 1e-9);
    }

    #[test]
    fn reset_drops_idle_gap_from_next_delta() {
        let mut clock = FrameClock::new();
        let base = clock.origin;

        clock.reset_at(base + Duration::from_secs(3));
        let ft = clock.tick_at(base + Duration::from_millis(3_016));
        assert!((ft.dt - 0.016).abs() < 1e-6);
    }
}
