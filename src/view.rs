use crate::lap::Highlight;
use crate::session::{Observer, Snapshot};
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

/// Labels for the left and right buttons.
pub fn controls(snapshot: &Snapshot) -> (&'static str, &'static str) {
    if snapshot.running {
        ("Lap", "Stop")
    } else {
        ("Reset", "Start")
    }
}

/// Renders a full frame: clock, buttons, then laps newest first.
pub fn render(snapshot: &Snapshot) -> String {
    format!("{}\n{}", snapshot.display, render_body(snapshot))
}

/// Everything in a frame except the clock.
fn render_body(snapshot: &Snapshot) -> String {
    let (left, right) = controls(snapshot);
    let mut lines = vec![format!("[{left}] [{right}]")];

    for lap in snapshot.laps.iter().rev() {
        let tag = match lap.highlight {
            Highlight::Slowest => "  (slowest)",
            Highlight::Fastest => "  (fastest)",
            Highlight::Plain => "",
        };
        lines.push(format!("Lap {}: {}{}", lap.number, lap.display, tag));
    }

    lines.join("\n")
}

/// Writes snapshots to a terminal.
pub struct Terminal<W> {
    writer: W,
    format: Format,
    last: Option<(bool, usize)>,
}

impl<W: Write> Terminal<W> {
    pub fn new(writer: W, format: Format) -> Self {
        Self {
            writer,
            format,
            last: None,
        }
    }

    fn write(&mut self, snapshot: &Snapshot) -> anyhow::Result<()> {
        match self.format {
            Format::Json => {
                serde_json::to_writer(&mut self.writer, snapshot)?;
                writeln!(self.writer)?;
            }
            Format::Text => {
                let key = (snapshot.running, snapshot.laps.len());
                if self.last == Some(key) {
                    // Only the clock moved.
                    write!(self.writer, "\r{}", snapshot.display)?;
                } else {
                    if self.last.is_some() {
                        writeln!(self.writer)?;
                    }
                    // The clock goes last so ticks can rewrite it in place.
                    writeln!(self.writer, "{}", render_body(snapshot))?;
                    write!(self.writer, "{}", snapshot.display)?;
                    self.last = Some(key);
                }
            }
        }

        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> Observer for Terminal<W> {
    fn on_update(&mut self, snapshot: &Snapshot) {
        if let Err(e) = self.write(snapshot) {
            tracing::error!(%e, "Failed to update the terminal");
        }
    }
}
