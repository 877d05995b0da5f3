//! Fixed-timestep tick driver

use std::time::Duration;

use super::simulation::Simulation;

/// Default simulation rate
pub const DEFAULT_TICK_RATE: u32 = 30;

/// Most ticks a single `advance` call may run before dropping the backlog
pub const MAX_TICKS_PER_ADVANCE: usize = 8;

/// Accumulates frame time and converts it into whole simulation ticks
#[derive(Debug, Clone)]
pub struct TickClock {
    step: Duration,
    lag: Duration,
    paused: bool,
    max_ticks: usize,
}

impl Default for TickClock {
    fn default() -> Self {
        Self::new(DEFAULT_TICK_RATE)
    }
}

impl TickClock {
    /// Clock running `ticks_per_second` ticks per second of frame time
    pub fn new(ticks_per_second: u32) -> Self {
        assert!(ticks_per_second > 0, "tick rate must be positive");

        Self {
            step: Duration::from_secs(1) / ticks_per_second,
            lag: Duration::ZERO,
            paused: false,
            max_ticks: MAX_TICKS_PER_ADVANCE,
        }
    }

    pub fn with_max_ticks(mut self, max_ticks: usize) -> Self {
        self.max_ticks = max_ticks.max(1);
        self
    }

    /// Frame time consumed by one tick
    pub fn step(&self) -> Duration {
        self.step
    }

    /// Frame time accumulated but not yet simulated
    pub fn lag(&self) -> Duration {
        self.lag
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        if paused != self.paused {
            log::info!("Simulation {}", if paused { "paused" } else { "resumed" });
        }
        self.paused = paused;
        if paused {
            self.lag = Duration::ZERO;
        }
    }

    pub fn toggle_pause(&mut self) {
        self.set_paused(!self.paused);
    }

    /// Feed `elapsed` frame time and run the ticks it pays for
    ///
    /// Returns the number of ticks run. While paused, performs one idle
    /// advance instead and accumulates nothing.
    pub fn advance(&mut self, sim: &mut Simulation, elapsed: Duration) -> usize {
        self.advance_at_most(sim, elapsed, usize::MAX)
    }

    /// Like [`advance`](Self::advance), but runs no more than `limit` ticks
    ///
    /// Frame time for ticks held back by `limit` stays in the lag. Only the
    /// backlog cap drops time.
    pub fn advance_at_most(
        &mut self,
        sim: &mut Simulation,
        elapsed: Duration,
        limit: usize,
    ) -> usize {
        if self.paused {
            sim.idle_advance();
            return 0;
        }

        self.lag += elapsed;
        let mut ticks = 0;
        while self.lag >= self.step && ticks < limit {
            if ticks == self.max_ticks {
                log::debug!(
                    "Dropping {:?} of simulation backlog after {} ticks",
                    self.lag,
                    ticks
                );
                self.lag = Duration::ZERO;
                break;
            }

            sim.tick();
            self.lag -= self.step;
            ticks += 1;
        }

        ticks
    }
}
