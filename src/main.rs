//! playbar - drives a simulated media source through the playback controller
//! and prints the transport line every time the derived state changes.

use std::{error::Error, path::PathBuf, process, sync::Arc, time::Duration};

use clap::{Args, Parser, Subcommand};
use futures::StreamExt;
use tracing::{Instrument, info, info_span};

use playbar::{
    config::{Config, ConfigPaths},
    controller::PlaybackController,
    media::{MediaSource, SimulatedSource},
    tracing_config,
    view::TransportView,
};

/// Video transport controls kept in sync with a media source.
#[derive(Parser, Debug)]
#[command(name = "playbar", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Play a simulated media source and print the transport as it changes.
    Play(PlayArgs),
    /// Print the JSON schema of the configuration file.
    Schema,
}

#[derive(Args, Debug)]
struct PlayArgs {
    /// Configuration file. Defaults to the XDG config file when it exists.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Media source locator, overriding `player.source`.
    #[arg(long)]
    source: Option<String>,

    /// Duration reported by the simulated source, in seconds.
    #[arg(long, default_value_t = 30.0)]
    duration: f64,

    /// Start playing on bind, overriding `player.auto_play`.
    #[arg(long)]
    autoplay: bool,

    /// Start muted, overriding `player.muted`.
    #[arg(long)]
    muted: bool,

    /// Number of playback ticks to simulate.
    #[arg(long, default_value_t = 40)]
    ticks: u32,

    /// Wall-clock length of one tick, in milliseconds. Media time advances
    /// by the same amount.
    #[arg(long, default_value_t = 250)]
    tick_ms: u64,

    /// Click the timeline at this fraction halfway through the session.
    #[arg(long)]
    seek: Option<f64>,

    /// Stall the source at this tick and recover two ticks later.
    #[arg(long)]
    stall_at: Option<u32>,

    /// Width of the timeline track, in cells.
    #[arg(long, default_value_t = 40)]
    width: usize,

    /// Also write logs to a daily rolling file.
    #[arg(long)]
    log_file: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Schema => {
            let schema = schemars::schema_for!(Config);
            println!("{}", serde_json::to_string_pretty(&schema)?);
        }
        Command::Play(args) => {
            let config = match resolve_config(&args) {
                Ok(config) => config,
                Err(e) => {
                    eprintln!("playbar: {e}");
                    process::exit(1);
                }
            };

            let _guard = if args.log_file {
                Some(tracing_config::init_with_file(config.general.log_level)?)
            } else {
                tracing_config::init(config.general.log_level)?;
                None
            };

            run_session(config, &args)
                .instrument(info_span!("playbar_session"))
                .await?;
        }
    }

    Ok(())
}

/// Builds the session configuration: file first, then command-line overrides.
///
/// # Errors
/// Returns error if an explicit config file cannot be read, or the merged
/// configuration fails validation.
fn resolve_config(args: &PlayArgs) -> playbar::Result<Config> {
    let mut config = match &args.config {
        Some(path) => Config::read(path)?,
        None => match ConfigPaths::main_config() {
            Ok(path) if path.exists() => Config::read(&path)?,
            _ => Config::default(),
        },
    };

    if let Some(source) = &args.source {
        config.player.source = source.clone();
    }
    config.player.auto_play |= args.autoplay;
    config.player.muted |= args.muted;

    config.validate()?;
    Ok(config)
}

async fn run_session(config: Config, args: &PlayArgs) -> playbar::Result<()> {
    let options = config.player;
    let source = Arc::new(SimulatedSource::new(options.source_uri()?).with_feedback());

    let mut controller = PlaybackController::new(options.clone());
    let width = args.width;

    let mut states = controller.watch();
    let printer = tokio::spawn(async move {
        while let Some(state) = states.next().await {
            println!("{}", TransportView::derive(&state, &options).render_line(width));
        }
    });

    controller.bind(source.clone());
    info!(uri = %source.uri(), duration = args.duration, "Session started");
    source.load_metadata(args.duration);

    if !controller.options().auto_play {
        controller.toggle();
    }

    let tick_secs = args.tick_ms as f64 / 1000.0;
    let mut interval = tokio::time::interval(Duration::from_millis(args.tick_ms.max(1)));

    for tick in 0..args.ticks {
        interval.tick().await;

        match args.stall_at {
            Some(at) if tick == at => source.stall(),
            Some(at) if tick == at + 2 => source.recover(),
            _ => {}
        }

        if tick == args.ticks / 2
            && let Some(fraction) = args.seek
        {
            controller.seek(fraction);
        }

        if !source.tick(tick_secs) && source.is_paused() {
            info!(tick, "Playback reached the end");
            break;
        }
    }

    if controller.state().is_playing() {
        controller.toggle();
    }

    interval.tick().await;
    controller.unbind();
    interval.tick().await;
    printer.abort();

    info!("Session finished");
    Ok(())
}
