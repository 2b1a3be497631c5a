use crate::engine::StopwatchEngine;
use crate::format::format_time;
use crate::lap::Highlight;
use serde::Serialize;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::future;
use std::str::FromStr;
use std::time::Duration;
use tokio::sync::{mpsc, watch};
use tokio::time::{Instant, Interval, MissedTickBehavior};

const INTENT_CAPACITY: usize = 16;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intent {
    StartStop,
    Lap,
    Reset,
}

#[derive(Debug)]
pub struct IntentParseError;

impl Display for IntentParseError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown command")
    }
}

impl Error for IntentParseError {}

impl FromStr for Intent {
    type Err = IntentParseError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "s" | "start" | "stop" | "start-stop" => Ok(Intent::StartStop),
            "l" | "lap" => Ok(Intent::Lap),
            "r" | "reset" => Ok(Intent::Reset),
            _ => Err(IntentParseError),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LapEntry {
    pub number: usize,
    pub seconds: f64,
    pub text: String,
    pub display: String,
    pub highlight: Highlight,
}

/// What a display needs to draw one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub elapsed: f64,
    pub display: String,
    pub running: bool,
    /// Oldest first.
    pub laps: Vec<LapEntry>,
}

impl From<&StopwatchEngine> for Snapshot {
    fn from(engine: &StopwatchEngine) -> Self {
        let extremes = engine.extremes();
        let laps = engine
            .laps()
            .iter()
            .enumerate()
            .map(|(index, lap)| LapEntry {
                number: index + 1,
                seconds: lap.seconds(),
                text: lap.text().to_string(),
                display: format_time(lap.seconds()),
                highlight: extremes.classify(lap),
            })
            .collect();

        Self {
            elapsed: engine.elapsed(),
            display: format_time(engine.elapsed()),
            running: engine.is_running(),
            laps,
        }
    }
}

pub trait Observer {
    fn on_update(&mut self, snapshot: &Snapshot);
}

/// The intent surface handed to displays.
#[derive(Debug, Clone)]
pub struct Controls {
    sender: mpsc::Sender<Intent>,
}

impl Controls {
    pub async fn start_stop(&self) {
        self.send(Intent::StartStop).await
    }

    pub async fn lap(&self) {
        self.send(Intent::Lap).await
    }

    pub async fn reset(&self) {
        self.send(Intent::Reset).await
    }

    pub async fn send(&self, intent: Intent) {
        if let Err(e) = self.sender.send(intent).await {
            tracing::error!(%e, ?intent, "Stopwatch session has ended");
        }
    }

    pub fn try_start_stop(&self) {
        self.try_send(Intent::StartStop)
    }

    pub fn try_lap(&self) {
        self.try_send(Intent::Lap)
    }

    pub fn try_reset(&self) {
        self.try_send(Intent::Reset)
    }

    /// Blocks until there is room for the intent. Must not be called from
    /// inside the runtime.
    pub fn blocking_send(&self, intent: Intent) {
        if let Err(e) = self.sender.blocking_send(intent) {
            tracing::error!(%e, ?intent, "Stopwatch session has ended");
        }
    }

    /// Usable outside the runtime, e.g. from a GUI event loop.
    pub fn try_send(&self, intent: Intent) {
        if let Err(e) = self.sender.try_send(intent) {
            tracing::warn!(%e, ?intent, "Dropped stopwatch intent");
        }
    }
}

/// Owns the engine and the ticker. Runs until every [`Controls`] is dropped.
pub struct Session {
    engine: StopwatchEngine,
    intents: mpsc::Receiver<Intent>,
    snapshots: watch::Sender<Snapshot>,
}

enum Event {
    Intent(Option<Intent>),
    Tick,
}

pub fn session(period: Duration) -> (Session, Controls, watch::Receiver<Snapshot>) {
    let engine = StopwatchEngine::new(period);
    let (sender, intents) = mpsc::channel(INTENT_CAPACITY);
    let (snapshots, receiver) = watch::channel(Snapshot::from(&engine));

    let session = Session {
        engine,
        intents,
        snapshots,
    };

    (session, Controls { sender }, receiver)
}

impl Session {
    pub async fn run(mut self) {
        let mut ticker: Option<Interval> = None;

        loop {
            let event = tokio::select! {
                intent = self.intents.recv() => Event::Intent(intent),
                _ = next_tick(&mut ticker) => Event::Tick,
            };

            match event {
                Event::Intent(None) => break,
                Event::Intent(Some(intent)) => {
                    tracing::debug!(?intent, "received intent");
                    self.apply(intent);
                    self.sync_ticker(&mut ticker);
                }
                Event::Tick => self.engine.tick(),
            }

            self.snapshots.send_replace(Snapshot::from(&self.engine));
        }

        tracing::debug!("stopwatch session finished");
    }

    fn apply(&mut self, intent: Intent) {
        match intent {
            Intent::StartStop => self.engine.start_stop(),
            Intent::Lap => {
                self.engine.record_lap();
            }
            Intent::Reset => self.engine.reset(),
        }
    }

    fn sync_ticker(&self, ticker: &mut Option<Interval>) {
        match (self.engine.is_running(), ticker.is_some()) {
            (true, false) => {
                let period = self.engine.period();
                let mut interval = tokio::time::interval_at(Instant::now() + period, period);
                interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
                *ticker = Some(interval);
            }
            (false, true) => {
                *ticker = None;
            }
            _ => {}
        }
    }
}

async fn next_tick(ticker: &mut Option<Interval>) {
    match ticker {
        Some(interval) => {
            interval.tick().await;
        }
        None => future::pending().await,
    }
}

/// Feeds every published snapshot to `observer` until the session ends.
pub async fn observe<O: Observer>(mut receiver: watch::Receiver<Snapshot>, mut observer: O) {
    let snapshot = receiver.borrow_and_update().clone();
    observer.on_update(&snapshot);

    while receiver.changed().await.is_ok() {
        let snapshot = receiver.borrow_and_update().clone();
        observer.on_update(&snapshot);
    }
}
