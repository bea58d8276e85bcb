//! Host-driven scheduling on top of the engine.
//!
//! The engine has no clock. The host calls `LifeDriver::tick` once per frame
//! with the elapsed frame time; the driver turns accumulated time into whole
//! generations and stops itself once the simulation reaches a fixed point.
//!
//! State machine: Stopped -> Running (`start`) -> Stopped (`stop` or convergence).

use std::collections::HashSet;
use std::time::Duration;

use super::stepping::{advance_generation, Generation};
use super::visuals::instance_layout;
use crate::config::{LifeConfig, PresentationConfig};
use crate::state::{Coord, LifeState};

/// Whether the driver is currently advancing the simulation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// What happened during one host tick.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TickReport {
    /// Generations advanced during this tick.
    pub generations: u32,
    /// Union of the changed sets of those generations.
    pub changed: HashSet<Coord>,
    /// True if the driver stopped because a generation converged.
    pub converged: bool,
}

/// Owns a simulation and advances it on a fixed interval.
pub struct LifeDriver {
    /// The simulation being driven.
    pub state: LifeState,

    run_state: RunState,

    /// Time between generations. Zero means one generation per tick.
    tick_interval: Duration,

    /// Host time not yet turned into generations.
    accumulated: Duration,

    /// Catch-up cap per tick; leftover time is dropped.
    max_generations_per_tick: u32,

    /// Distance between cell instances in host world units.
    cell_step: f32,

    /// Pool used for parallel evaluation, or the global pool if it failed to build.
    thread_pool: Option<rayon::ThreadPool>,
}

fn build_thread_pool(num_threads: u8) -> Option<rayon::ThreadPool> {
    let num_threads = if num_threads == 0 {
        1
    } else {
        num_threads as usize
    };
    match rayon::ThreadPoolBuilder::new().num_threads(num_threads).build() {
        Ok(pool) => Some(pool),
        Err(err) => {
            tracing::warn!("failed to build {num_threads}-thread pool, using global pool: {err}");
            None
        }
    }
}

impl LifeDriver {
    /// Create a stopped driver around an existing state.
    pub fn new(state: LifeState, tick_interval: Duration, num_threads: u8) -> Self {
        LifeDriver {
            state,
            run_state: RunState::Stopped,
            tick_interval,
            accumulated: Duration::ZERO,
            max_generations_per_tick: 4,
            cell_step: PresentationConfig::default().cell_step,
            thread_pool: build_thread_pool(num_threads),
        }
    }

    /// Create a stopped driver and its grid from a config.
    pub fn from_config(config: &LifeConfig) -> Self {
        let mut driver = LifeDriver::new(
            LifeState::from_config(config),
            config.schedule.tick_interval(),
            config.simulation.threads,
        );
        driver.max_generations_per_tick = config.schedule.max_generations_per_tick.max(1);
        driver.cell_step = config.presentation.cell_step;
        driver
    }

    /// Extract the inner state.
    pub fn into_state(self) -> LifeState {
        self.state
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }

    /// Query whether the simulation is running.
    pub fn is_active(&self) -> bool {
        self.run_state == RunState::Running
    }

    pub fn tick_interval(&self) -> Duration {
        self.tick_interval
    }

    pub fn set_tick_interval(&mut self, tick_interval: Duration) {
        self.tick_interval = tick_interval;
    }

    pub fn max_generations_per_tick(&self) -> u32 {
        self.max_generations_per_tick
    }

    pub fn cell_step(&self) -> f32 {
        self.cell_step
    }

    /// Origins of every cell instance, spaced by the configured cell step.
    pub fn instance_layout(&self) -> Vec<[f32; 3]> {
        instance_layout(&self.state, self.cell_step)
    }

    /// Start running. Returns every cell so the host can do a full refresh.
    pub fn start(&mut self) -> HashSet<Coord> {
        if !self.is_active() {
            tracing::info!(
                "starting at generation {} with {} alive cells",
                self.state.generation,
                self.state.alive_count()
            );
        }
        self.run_state = RunState::Running;
        self.accumulated = Duration::ZERO;
        self.state.all_cells.clone()
    }

    /// Stop running. Pending time is discarded.
    pub fn stop(&mut self) {
        if self.is_active() {
            tracing::info!("stopped at generation {}", self.state.generation);
        }
        self.run_state = RunState::Stopped;
        self.accumulated = Duration::ZERO;
    }

    /// Feed elapsed host time and advance as many generations as it covers.
    ///
    /// Returns an empty report while stopped.
    pub fn tick(&mut self, elapsed: Duration) -> TickReport {
        let mut report = TickReport::default();
        if !self.is_active() {
            return report;
        }

        let due = if self.tick_interval.is_zero() {
            1
        } else {
            self.accumulated = self.accumulated.saturating_add(elapsed);
            let due = self.accumulated.as_nanos() / self.tick_interval.as_nanos();
            due.min(u128::from(self.max_generations_per_tick)) as u32
        };

        for _ in 0..due {
            if !self.tick_interval.is_zero() {
                self.accumulated -= self.tick_interval;
            }

            let generation = self.advance();
            report.generations += 1;
            report.changed.extend(generation.changed);

            if generation.converged {
                report.converged = true;
                self.stop();
                break;
            }
        }

        // Drop time beyond the catch-up cap.
        if self.accumulated >= self.tick_interval {
            self.accumulated = Duration::ZERO;
        }

        report
    }

    /// Advance one generation regardless of run state, on the driver's pool.
    pub fn advance(&mut self) -> Generation {
        let state = &mut self.state;
        match &self.thread_pool {
            Some(pool) => pool.install(|| advance_generation(state)),
            None => advance_generation(state),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INTERVAL: Duration = Duration::from_millis(100);

    fn blinker_driver() -> LifeDriver {
        let mut state = LifeState::new(5, 5);
        for p in [(2, 1), (2, 2), (2, 3)] {
            state.alive.insert(Coord::from(p));
        }
        LifeDriver::new(state, INTERVAL, 1)
    }

    #[test]
    fn test_starts_stopped() {
        let mut driver = blinker_driver();
        assert_eq!(driver.run_state(), RunState::Stopped);
        assert!(!driver.is_active());

        let report = driver.tick(Duration::from_secs(1));
        assert_eq!(report, TickReport::default());
        assert_eq!(driver.state.generation, 0);
    }

    #[test]
    fn test_start_returns_all_cells() {
        let mut driver = blinker_driver();
        let refresh = driver.start();
        assert_eq!(refresh.len(), 25);
        assert!(driver.is_active());
    }

    #[test]
    fn test_tick_accumulates_time() {
        let mut driver = blinker_driver();
        driver.start();

        assert_eq!(driver.tick(Duration::from_millis(60)).generations, 0);
        assert_eq!(driver.tick(Duration::from_millis(60)).generations, 1);
        assert_eq!(driver.state.generation, 1);

        // 20ms carried over + 180ms = 2 generations
        assert_eq!(driver.tick(Duration::from_millis(180)).generations, 2);
        assert_eq!(driver.state.generation, 3);
        assert!(driver.is_active());
    }

    #[test]
    fn test_tick_catch_up_is_capped() {
        let mut driver = blinker_driver();
        driver.start();

        let report = driver.tick(Duration::from_secs(10));
        assert_eq!(report.generations, 4);

        // Leftover time was dropped
        assert_eq!(driver.tick(Duration::from_millis(50)).generations, 0);
    }

    #[test]
    fn test_huge_elapsed_hits_cap() {
        let mut driver = blinker_driver();
        driver.start();

        assert_eq!(driver.tick(Duration::from_millis(50)).generations, 0);
        let report = driver.tick(Duration::MAX);
        assert_eq!(report.generations, 4);
        assert!(driver.is_active());

        // Saturated time was dropped with the rest of the backlog
        assert_eq!(driver.tick(Duration::from_millis(50)).generations, 0);
    }

    #[test]
    fn test_zero_interval_advances_once_per_tick() {
        let mut driver = blinker_driver();
        driver.set_tick_interval(Duration::ZERO);
        driver.start();

        assert_eq!(driver.tick(Duration::ZERO).generations, 1);
        assert_eq!(driver.tick(Duration::from_secs(5)).generations, 1);
        assert_eq!(driver.state.generation, 2);
    }

    #[test]
    fn test_stops_on_convergence() {
        let mut state = LifeState::new(4, 4);
        for p in [(1, 1), (1, 2), (2, 1), (2, 2)] {
            state.alive.insert(Coord::from(p));
        }
        let mut driver = LifeDriver::new(state, INTERVAL, 2);
        driver.start();

        let report = driver.tick(Duration::from_millis(350));
        assert_eq!(report.generations, 1);
        assert!(report.converged);
        assert!(!driver.is_active());
        assert_eq!(driver.state.alive_count(), 4);
    }

    #[test]
    fn test_stop_discards_pending_time() {
        let mut driver = blinker_driver();
        driver.start();
        driver.tick(Duration::from_millis(90));
        driver.stop();
        driver.start();
        assert_eq!(driver.tick(Duration::from_millis(20)).generations, 0);
    }

    #[test]
    fn test_report_unions_changed_sets() {
        let mut driver = blinker_driver();
        driver.start();
        let report = driver.tick(Duration::from_millis(200));
        assert_eq!(report.generations, 2);
        // Reachable sets of both blinker phases together cover the 3x3 core plus arms
        assert!(report.changed.contains(&Coord::new(2, 0)));
        assert!(report.changed.contains(&Coord::new(0, 2)));
    }

    #[test]
    fn test_from_config() {
        let config = LifeConfig::from_toml_str(
            "[grid]\nwidth = 6\nheight = 3\n[schedule]\ntick_interval_ms = 40\nmax_generations_per_tick = 2\n",
        )
        .unwrap();
        let mut driver = LifeDriver::from_config(&config);
        assert_eq!(driver.tick_interval(), Duration::from_millis(40));
        assert_eq!(driver.max_generations_per_tick(), 2);
        assert_eq!(driver.cell_step(), 125.0);
        assert_eq!(driver.state.all_cells.len(), 18);
        assert_eq!(driver.instance_layout()[17], [625.0, 250.0, 0.0]);

        driver.state.alive.insert(Coord::new(0, 0));
        driver.start();
        // Lone cell dies, then the empty grid converges
        let report = driver.tick(Duration::from_secs(1));
        assert_eq!(report.generations, 2);
        assert!(report.converged);
    }
}
