mod cli;

use crate::cli::Arguments;
use clap::Parser;
use lapwatch::session::{self, Controls, Intent};
use lapwatch::view::Terminal;
use std::io::{self, BufRead};
use tracing_log::LogTracer;

fn main() {
    let arguments = cli::Arguments::parse();
    if let Err(e) = set_log_level(&arguments) {
        eprintln!("Failed to configure logging: {e}");
        return;
    }

    tracing::debug!(?arguments, "starting lapwatch");

    if let Err(e) = run(arguments) {
        tracing::error!(%e, "Unable to run the stopwatch");
    }
}

fn set_log_level(arguments: &Arguments) -> anyhow::Result<()> {
    LogTracer::init()?;

    let level = match arguments.verbosity {
        0 => tracing::Level::ERROR,
        1 => tracing::Level::WARN,
        2 => tracing::Level::INFO,
        3 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };

    let subscriber = tracing_subscriber::FmtSubscriber::builder()
        .with_max_level(level)
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    Ok(())
}

#[cfg(feature = "ui")]
fn run(arguments: Arguments) -> anyhow::Result<()> {
    if arguments.window {
        run_window(arguments)
    } else {
        run_terminal(arguments)
    }
}

#[cfg(not(feature = "ui"))]
fn run(arguments: Arguments) -> anyhow::Result<()> {
    run_terminal(arguments)
}

fn run_terminal(arguments: Arguments) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()?;

    runtime.block_on(async {
        let (stopwatch, controls, receiver) = session::session(arguments.period());
        let terminal = Terminal::new(io::stdout(), arguments.format);

        let stopwatch = tokio::spawn(stopwatch.run());
        let observer = tokio::spawn(session::observe(receiver, terminal));

        // Dropping the controls at the end of input ends the session.
        match tokio::task::spawn_blocking(move || read_loop(controls)).await {
            Ok(Err(e)) => tracing::error!(%e, "Failed to read commands"),
            Err(e) => tracing::error!(%e, "Command reader panicked"),
            Ok(Ok(())) => {}
        }

        if let Err(e) = stopwatch.await {
            tracing::error!(%e, "Stopwatch session failed");
        }
        if let Err(e) = observer.await {
            tracing::error!(%e, "Display failed");
        }
    });

    println!();
    Ok(())
}

fn read_loop(controls: Controls) -> anyhow::Result<()> {
    tracing::debug!("Waiting for commands");

    for line in io::stdin().lock().lines() {
        let line = line?;
        let command = line.trim();

        if command.is_empty() {
            continue;
        }
        if command.eq_ignore_ascii_case("q") || command.eq_ignore_ascii_case("quit") {
            break;
        }

        match command.parse::<Intent>() {
            Ok(intent) => controls.blocking_send(intent),
            Err(e) => tracing::warn!(%e, %command, "Ignoring input"),
        }
    }

    Ok(())
}

#[cfg(feature = "ui")]
fn run_window(arguments: Arguments) -> anyhow::Result<()> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_time()
        .build()?;

    let (stopwatch, controls, receiver) = session::session(arguments.period());
    let window = lapwatch::window::Window::new(controls)?;

    runtime.spawn(stopwatch.run());
    runtime.spawn(session::observe(receiver, window.observer()));

    window.run()?;

    // Closing the window drops its controls, which ends the session.
    drop(window);
    runtime.shutdown_timeout(std::time::Duration::from_secs(1));

    Ok(())
}
