//! A lap-timing stopwatch: a sampled clock, lap splits, and the fastest and
//! slowest laps picked out for display.

pub mod engine;
pub mod format;
pub mod lap;
pub mod session;
pub mod view;
#[cfg(feature = "ui")]
pub mod window;

pub use engine::{RunState, StopwatchEngine};
pub use format::format_time;
pub use lap::{find_extreme_laps, Extremes, Highlight, Lap};
