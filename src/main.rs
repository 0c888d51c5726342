use clap::Parser;
use crossbeam_channel::bounded;
use std::io;
use std::process::ExitCode;
use std::time::Duration;
use termpipes::cli::Args;
use termpipes::menu::run_menu;
use termpipes::{
    Config, FrameScheduler, InputActor, ResizeFlag, TerminalSession, TerminalSink,
};
use tracing_subscriber::prelude::*;
use tracing_subscriber::EnvFilter;

fn run(config: Config, show_menu: bool) -> termpipes::Result<Option<u64>> {
    let mut session = TerminalSession::enter()?;

    let (input_tx, input_rx) = bounded(64);
    let resize = ResizeFlag::new();
    let input = InputActor::spawn(input_tx, resize.clone(), Duration::from_millis(10))?;

    let config = if show_menu {
        match run_menu(config, &input_rx, &resize, &mut io::stdout())? {
            Some(config) => config,
            None => {
                drop(input_rx);
                input.join();
                session.restore()?;
                return Ok(None);
            }
        }
    } else {
        config
    };
    config.validate()?;

    let sink = TerminalSink::stdout()?;
    let mut scheduler =
        FrameScheduler::new(&config, sink, rand::thread_rng(), input_rx, resize)?;
    let stats = scheduler.run()?;
    drop(scheduler);

    input.join();
    session.restore()?;
    Ok(Some(stats.drawn))
}

fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let show_menu = std::env::args_os().len() == 1;
    let args = Args::parse();

    let config = match args.to_config() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::FAILURE;
        }
    };
    if let Err(e) = config.validate() {
        tracing::error!("{e}");
        eprintln!("error: {e}");
        return ExitCode::FAILURE;
    }

    match run(config, show_menu) {
        Ok(Some(drawn)) => {
            println!("Drawn: {drawn}");
            ExitCode::SUCCESS
        }
        Ok(None) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
