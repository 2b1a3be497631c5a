//! Stopwatch state: elapsed time, run state and recorded laps.
//!
//! Time is sampled: every [`StopwatchEngine::tick`] adds one period, so the
//! clock drifts from wall time by whatever the ticker loses.

use crate::lap::{find_extreme_laps, Extremes, Lap};
use std::time::Duration;

pub const DEFAULT_PERIOD: Duration = Duration::from_millis(100);

#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

#[derive(Debug, Clone)]
pub struct StopwatchEngine {
    state: RunState,
    elapsed: f64,
    lap_start: Option<f64>,
    laps: Vec<Lap>,
    period: Duration,
}

impl Default for StopwatchEngine {
    fn default() -> Self {
        Self::new(DEFAULT_PERIOD)
    }
}

impl StopwatchEngine {
    pub fn new(period: Duration) -> Self {
        Self {
            state: RunState::Stopped,
            elapsed: 0.0,
            lap_start: None,
            laps: Vec::new(),
            period,
        }
    }

    pub fn start_stop(&mut self) {
        match self.state {
            RunState::Stopped => {
                if self.laps.is_empty() {
                    self.lap_start = Some(self.elapsed);
                }
                self.state = RunState::Running;
                tracing::debug!(elapsed = self.elapsed, "stopwatch started");
            }
            RunState::Running => {
                self.state = RunState::Stopped;
                tracing::debug!(elapsed = self.elapsed, "stopwatch stopped");
            }
        }
    }

    pub fn tick(&mut self) {
        if self.state != RunState::Running {
            return;
        }
        self.elapsed += self.period.as_secs_f64();
        tracing::trace!(elapsed = self.elapsed, "tick");
    }

    /// Records a split and restarts the clock from zero. Does nothing unless
    /// running.
    pub fn record_lap(&mut self) -> Option<&Lap> {
        if self.state != RunState::Running {
            return None;
        }

        let split = match self.lap_start {
            None => {
                self.lap_start = Some(self.elapsed);
                self.elapsed
            }
            Some(start) => self.elapsed - start,
        };

        self.laps.push(Lap::new(split));
        self.elapsed = 0.0;

        let lap = self.laps.last();
        if let Some(lap) = lap {
            tracing::debug!(number = self.laps.len(), split = lap.text(), "lap recorded");
        }
        lap
    }

    pub fn reset(&mut self) {
        self.state = RunState::Stopped;
        self.elapsed = 0.0;
        self.laps.clear();
        self.lap_start = None;
        tracing::debug!("stopwatch reset");
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    pub fn lap_start(&self) -> Option<f64> {
        self.lap_start
    }

    pub fn laps(&self) -> &[Lap] {
        &self.laps
    }

    pub fn period(&self) -> Duration {
        self.period
    }

    pub fn extremes(&self) -> Extremes<'_> {
        find_extreme_laps(&self.laps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() < 1e-9,
            "expected {expected}, got {actual}"
        );
    }

    fn ticks(engine: &mut StopwatchEngine, n: usize) {
        for _ in 0..n {
            engine.tick();
        }
    }

    #[test]
    fn test_start_stop() {
        let mut sw = StopwatchEngine::default();
        assert_eq!(sw.state(), RunState::Stopped);
        assert_eq!(sw.elapsed(), 0.0);
        assert_eq!(sw.lap_start(), None);

        sw.start_stop();
        assert!(sw.is_running());
        assert_eq!(sw.lap_start(), Some(0.0));

        ticks(&mut sw, 25);
        assert_close(sw.elapsed(), 2.5);

        sw.start_stop();
        assert_eq!(sw.state(), RunState::Stopped);
        ticks(&mut sw, 10); // Stays put while stopped
        assert_close(sw.elapsed(), 2.5);
    }

    #[test]
    fn test_tick_uses_period() {
        let mut sw = StopwatchEngine::new(Duration::from_millis(250));
        sw.start_stop();
        ticks(&mut sw, 4);
        assert_close(sw.elapsed(), 1.0);
    }

    #[test]
    fn test_lap_while_stopped() {
        let mut sw = StopwatchEngine::default();
        assert!(sw.record_lap().is_none());
        assert!(sw.laps().is_empty());
    }

    #[test]
    fn test_lap() {
        let mut sw = StopwatchEngine::default();
        sw.start_stop();

        ticks(&mut sw, 15);
        let lap1 = sw.record_lap().map(|l| l.seconds());
        assert_eq!(lap1, Some(1.5));
        assert_eq!(sw.elapsed(), 0.0); // Reset after lap
        assert!(sw.is_running());

        ticks(&mut sw, 8);
        let lap2 = sw.record_lap().map(|l| l.text().to_string());
        assert_eq!(lap2.as_deref(), Some("0.8"));
        assert_eq!(sw.elapsed(), 0.0);

        let texts: Vec<&str> = sw.laps().iter().map(Lap::text).collect();
        assert_eq!(texts, ["1.5", "0.8"]);
    }

    #[test]
    fn test_restart_without_laps_moves_marker() {
        let mut sw = StopwatchEngine::default();
        sw.start_stop();
        ticks(&mut sw, 10);
        sw.start_stop();
        sw.start_stop();
        assert_eq!(sw.lap_start().map(|s| (s * 10.0).round()), Some(10.0));

        ticks(&mut sw, 15);
        assert_eq!(sw.record_lap().map(Lap::text), Some("1.5"));

        // The marker outlives the first lap, so later splits go negative.
        for n in [5, 3, 1] {
            ticks(&mut sw, n);
            sw.record_lap();
            assert_eq!(sw.elapsed(), 0.0);
        }

        let texts: Vec<&str> = sw.laps().iter().map(Lap::text).collect();
        assert_eq!(texts, ["1.5", "-0.5", "-0.7", "-0.9"]);

        let extremes = sw.extremes();
        assert_eq!(extremes.slowest.map(Lap::seconds), Some(1.5));
        assert_eq!(extremes.fastest.map(Lap::seconds), Some(-0.7));
    }

    #[test]
    fn test_restart_with_laps_keeps_marker() {
        let mut sw = StopwatchEngine::default();
        sw.start_stop();
        ticks(&mut sw, 3);
        sw.record_lap();
        ticks(&mut sw, 4);
        sw.start_stop();
        sw.start_stop();
        assert_eq!(sw.lap_start(), Some(0.0));
    }

    #[test]
    fn test_reset() {
        let mut sw = StopwatchEngine::default();
        sw.reset();
        assert_eq!(sw.state(), RunState::Stopped);

        sw.start_stop();
        ticks(&mut sw, 7);
        sw.record_lap();
        ticks(&mut sw, 2);

        sw.reset();
        assert_eq!(sw.state(), RunState::Stopped);
        assert_eq!(sw.elapsed(), 0.0);
        assert!(sw.laps().is_empty());
        assert_eq!(sw.lap_start(), None);
    }

    #[test]
    fn test_extremes() {
        let mut sw = StopwatchEngine::default();
        sw.start_stop();
        for n in [10, 50, 30] {
            ticks(&mut sw, n);
            sw.record_lap();
        }

        let extremes = sw.extremes();
        assert_eq!(extremes.slowest.map(Lap::seconds), Some(5.0));
        assert_eq!(extremes.fastest.map(Lap::seconds), Some(1.0));
    }
}
