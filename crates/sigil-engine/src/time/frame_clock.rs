use std::time::{Duration, Instant};

/// Frame timing snapshot.
#[derive(Debug, Copy, Clone)]
pub struct FrameTime {
    /// Time elapsed since the previous frame tick, in seconds.
    pub dt: f32,

    /// Monotonic timestamp taken at the tick.
    pub now: Instant,

    /// Monotonic frame counter.
    pub frame_index: u64,
}

/// Frame clock producing `FrameTime` snapshots.
///
/// `FrameClock` is designed to be used per window (or per loop) so that multi-window
/// applications do not share delta-time state.
///
/// Delta time is clamped to avoid pathological values when the application is paused
/// by the debugger, minimized, or stalls.
#[derive(Debug, Clone)]
pub struct FrameClock {
    last: Instant,
    frame_index: u64,
    dt_min: Duration,
    dt_max: Duration,
}

impl FrameClock {
    /// Creates a new clock with default clamps.
    ///
    /// Clamp rationale:
    /// - minimum prevents zero-dt behavior from tight loops on some platforms
    /// - maximum prevents simulation explosions after long stalls
    pub fn new() -> Self {
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min: Duration::from_micros(100),  // 0.0001s
            dt_max: Duration::from_millis(250),  // 0.25s
        }
    }

    /// Creates a clock with custom delta-time clamps.
    pub fn with_clamps(dt_min: Duration, dt_max: Duration) -> Self {
        debug_assert!(dt_min <= dt_max);
        Self {
            last: Instant::now(),
            frame_index: 0,
            dt_min,
            dt_max,
        }
    }

    /// Resets the clock baseline.
    ///
    /// Useful after surface reconfigure events or when resuming from suspension.
    pub fn reset(&mut self) {
        self.last = Instant::now();
    }

    /// Returns the wall-clock time elapsed since the previous tick or
    /// restart, and resets the baseline.
    ///
    /// Unlike [`tick`], this neither advances the frame counter nor clamps:
    /// the elapsed duration also feeds interaction timeouts (double-click
    /// expiry), which must see real time across redraw stalls.
    pub fn restart(&mut self) -> Duration {
        let now = Instant::now();
        let dt = now.saturating_duration_since(self.last);
        self.last = now;
        dt
    }

    /// Advances the clock and returns a new `FrameTime`.
    pub fn tick(&mut self) -> FrameTime {
        let now = Instant::now();
        let dt = self.clamp_dt(now.saturating_duration_since(self.last));

        self.last = now;

        let ft = FrameTime {
            dt: dt.as_secs_f32(),
            now,
            frame_index: self.frame_index,
        };

        self.frame_index = self
            .frame_index
            .wrapping_add(1);

        ft
    }

    // Clamp delta time to keep downstream systems stable.
    fn clamp_dt(&self, dt: Duration) -> Duration {
        dt.clamp(self.dt_min, self.dt_max)
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
    fn tick_advances_frame_index() {
        let mut clock = FrameClock::new();
        assert_eq!(clock.tick().frame_index, 0);
        assert_eq!(clock.tick().frame_index, 1);
    }

    #[test]
    fn restart_does_not_advance_frame_index() {
        let mut clock = FrameClock::new();
        let _ = clock.restart();
        assert_eq!(clock.tick().frame_index, 0);
    }

    #[test]
    fn tick_dt_is_clamped_to_configured_range() {
        let min = Duration::from_millis(1);
        let max = Duration::from_millis(2);
        let mut clock = FrameClock::with_clamps(min, max);

        let ft = clock.tick();
        assert!(ft.dt >= min.as_secs_f32() * 0.99);
        assert!(ft.dt <= max.as_secs_f32() * 1.01);
    }

    #[test]
    fn restart_reports_unclamped_elapsed_time() {
        // A stall longer than dt_max must still be visible to timeout logic.
        let max = Duration::from_millis(2);
        let mut clock = FrameClock::with_clamps(Duration::from_millis(1), max);

        std::thread::sleep(Duration::from_millis(10));
        let dt = clock.restart();
        assert!(dt > max, "elapsed {dt:?} was clamped to {max:?}");
    }
}
