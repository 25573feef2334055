//! Variable-delta frame clock

use std::time::Instant;

/// Tracks frame time.
///
/// Delta is the elapsed time between consecutive frame starts, either
/// measured from the wall clock (`tick`) or supplied by the host (`step`).
/// All simulation math scales by it, so simulation speed follows the
/// host's refresh rate by contract; there is no fixed-timestep
/// accumulator behind it.
pub struct Clock {
    /// Total elapsed time in seconds
    pub total_time: f64,
    /// Time since last frame in seconds
    pub delta_time: f64,
    /// Last tick instant
    last_instant: Instant,
    /// Whether this is the first tick
    first_tick: bool,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            total_time: 0.0,
            delta_time: 0.0,
            last_instant: Instant::now(),
            first_tick: true,
        }
    }
}

impl Clock {
    /// Create a new clock
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance from the wall clock. Call once per frame.
    ///
    /// The first tick yields a zero delta so nothing jumps on startup.
    pub fn tick(&mut self) {
        let now = Instant::now();

        if self.first_tick {
            self.first_tick = false;
            self.last_instant = now;
            self.delta_time = 0.0;
            return;
        }

        self.delta_time = now.duration_since(self.last_instant).as_secs_f64();
        self.last_instant = now;
        self.total_time += self.delta_time;
    }

    /// Advance by an explicit delta, for deterministic hosts and tests
    pub fn step(&mut self, dt: f64) {
        self.first_tick = false;
        self.last_instant = Instant::now();
        self.delta_time = dt;
        self.total_time += dt;
    }
}
