use clap::Parser;
use lapwatch::view::Format;
use std::time::Duration;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about)]
pub struct Arguments {
    #[arg(short = 'v', long = None, env = "LAPWATCH_VERBOSITY", action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Ticker period in milliseconds; every tick adds one period to the clock.
    #[arg(short, long, env = "LAPWATCH_TICK_MS", default_value_t = 100, value_parser = clap::value_parser!(u64).range(1..))]
    pub tick_ms: u64,

    #[arg(short, long, env = "LAPWATCH_FORMAT", value_enum, default_value_t = Format::Text)]
    pub format: Format,

    /// Open the graphical window instead of reading commands from stdin.
    #[cfg(feature = "ui")]
    #[arg(short, long, env = "LAPWATCH_WINDOW")]
    pub window: bool,
}

impl Arguments {
    pub fn period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
