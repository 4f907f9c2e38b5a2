//! Paingame
//!
//! Seats the players, loads the selected game and plays it once.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use paingame::{
    hardware::PinLog, GameController, GameOutcome, GameRegistry, PaingameConfig, VERSION,
};

#[derive(Parser, Debug)]
#[command(name = "paingame", version, about = "Raspberry Pi buzzer party game")]
struct Cli {
    /// Game to play
    #[arg(short, long, default_value = "shocky")]
    game: String,

    /// Name of player 1
    #[arg(long)]
    player1: Option<String>,

    /// Name of player 2
    #[arg(long)]
    player2: Option<String>,

    /// Name of player 3
    #[arg(long)]
    player3: Option<String>,

    /// Name of player 4
    #[arg(long)]
    player4: Option<String>,

    /// Number of seats that play (1-4)
    #[arg(short = 'n', long)]
    players: Option<usize>,

    /// TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only log pulses, never drive pins
    #[arg(long, conflicts_with = "live")]
    simulation: bool,

    /// Drive real GPIO pins
    #[arg(long)]
    live: bool,

    /// Rounds to play
    #[arg(long)]
    rounds: Option<u32>,

    /// Size of the draw range; higher means fewer shocks
    #[arg(long)]
    probability: Option<u32>,

    /// Pause between rounds in milliseconds
    #[arg(long)]
    pause_ms: Option<u64>,

    /// RNG seed for a reproducible session
    #[arg(long)]
    seed: Option<u64>,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Apply command line overrides on top of the loaded config.
    fn apply(&self, config: &mut PaingameConfig) -> Result<()> {
        let names = [&self.player1, &self.player2, &self.player3, &self.player4];
        for (i, name) in names.into_iter().enumerate() {
            if let Some(name) = name {
                config.set_player_name(i + 1, name.clone())?;
            }
        }
        if let Some(count) = self.players {
            config.player_count = count;
        }
        if self.simulation {
            config.simulation = true;
        }
        if self.live {
            config.simulation = false;
        }
        if let Some(rounds) = self.rounds {
            config.shocky.rounds = rounds;
        }
        if let Some(probability) = self.probability {
            config.shocky.probability = probability;
        }
        if let Some(pause) = self.pause_ms {
            config.shocky.pause_between_rounds_ms = pause;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        Ok(())
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    info!("Paingame v{} is up and running", VERSION);

    let mut config = PaingameConfig::load(cli.config.as_deref()).context("loading configuration")?;
    cli.apply(&mut config)?;
    config.validate().context("invalid configuration")?;

    let registry = GameRegistry::from_config(&config);
    let game = registry.create_by_name(&cli.game).with_context(|| {
        let known: Vec<String> = registry.modes().iter().map(|m| m.to_string()).collect();
        format!("available games: {}", known.join(", "))
    })?;
    info!("Game mode set: {}", game.name());

    // Ctrl-C and SIGTERM interrupt the game so teardown still resets the pins
    let cancel = game.core().cancel_token().clone();
    ctrlc::set_handler(move || {
        warn!("Shutdown requested, stopping the game");
        cancel.cancel();
    })
    .context("installing signal handler")?;

    if config.simulation {
        warn!("Simulation mode, pins will not be driven");
    }

    let log = PinLog::discarding();
    let players = config
        .pins
        .provision(&config.roster_names()?, config.simulation, &log)
        .context("provisioning players")?;

    let controller = GameController::new(players, config.controller.clone(), config.simulation);
    let handle = controller.play(game).context("starting game")?;

    match handle.join()? {
        GameOutcome::Completed(score) => {
            for (id, points) in score.iter() {
                let name = controller
                    .players()
                    .iter()
                    .find(|p| p.id() == id)
                    .map(|p| p.name().to_string())
                    .unwrap_or_else(|| id.to_string());
                info!("{}: {} points", name, points);
            }
            info!("Good game");
            Ok(())
        }
        GameOutcome::Interrupted => {
            error!("Game was interrupted");
            bail!("game interrupted")
        }
    }
}
