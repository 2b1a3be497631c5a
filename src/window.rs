use crate::lap::Highlight;
use crate::session::{Controls, Observer, Snapshot};
use crate::view;
use slint::{ModelRc, SharedString, VecModel, Weak};

slint::slint! {
import { Button, ListView } from "std-widgets.slint";

export struct LapRow {
    label: string,
    time: string,
    highlight: int,
}

export component MainWindow inherits Window {
        in property <string> time: "00:00:00";
        in property <bool> running;
        in property <string> left-label: "Reset";
        in property <string> right-label: "Start";
        in property <[LapRow]> laps;

        callback start-stop();
        callback lap();
        callback reset();

        preferred-width: 360px;
        preferred-height: 640px;
        title: @tr("Lapwatch");
        background: black;

        VerticalLayout {
            padding: 20px;
            spacing: 20px;

            Text {
                text: root.time;
                color: white;
                font-size: 64px;
                font-weight: 700;
                horizontal-alignment: center;
            }

            HorizontalLayout {
                spacing: 20px;

                Button {
                    text: root.left-label;
                    clicked => {
                        if (root.running) {
                            root.lap();
                        } else {
                            root.reset();
                        }
                    }
                }

                Button {
                    text: root.right-label;
                    clicked => { root.start-stop(); }
                }
            }

            ListView {
                for row in root.laps : Text {
                    text: row.label + "  " + row.time;
                    font-size: 18px;
                    horizontal-alignment: center;
                    color: row.highlight == 1 ? red : row.highlight == 2 ? green : white;
                }
            }
        }
}
}

pub struct Window {
    main_window: MainWindow,
}

impl Window {
    pub fn new(controls: Controls) -> anyhow::Result<Self> {
        let main_window = MainWindow::new()?;

        let start_stop = controls.clone();
        main_window.on_start_stop(move || start_stop.try_start_stop());
        let lap = controls.clone();
        main_window.on_lap(move || lap.try_lap());
        main_window.on_reset(move || controls.try_reset());

        Ok(Self { main_window })
    }

    pub fn observer(&self) -> impl Observer + Send + 'static {
        self.main_window.as_weak()
    }

    pub fn run(&self) -> anyhow::Result<()> {
        self.main_window.run()?;
        Ok(())
    }
}

fn highlight_code(highlight: Highlight) -> i32 {
    match highlight {
        Highlight::Plain => 0,
        Highlight::Slowest => 1,
        Highlight::Fastest => 2,
    }
}

impl Observer for Weak<MainWindow> {
    fn on_update(&mut self, snapshot: &Snapshot) {
        let time = SharedString::from(snapshot.display.as_str());
        let running = snapshot.running;
        let (left, right) = view::controls(snapshot);
        let rows: Vec<LapRow> = snapshot
            .laps
            .iter()
            .rev()
            .map(|lap| LapRow {
                label: slint::format!("Lap {}:", lap.number),
                time: SharedString::from(lap.display.as_str()),
                highlight: highlight_code(lap.highlight),
            })
            .collect();

        if let Err(e) = self.upgrade_in_event_loop(move |app| {
            app.set_time(time);
            app.set_running(running);
            app.set_left_label(SharedString::from(left));
            app.set_right_label(SharedString::from(right));
            app.set_laps(ModelRc::new(VecModel::from(rows)));
        }) {
            tracing::error!(%e, "Failed to update the UI");
        }
    }
}
