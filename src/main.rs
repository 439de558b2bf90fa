//! Binary entrypoint for the bstguess CLI.
//!
//! Commands:
//! - `play` - start a game in this terminal
//! - `init` - write a starter `config.toml`
//! - `status` - print the persisted best streak
//! - `reset-streak` - set the persisted best streak back to 0
//!
//! See the library crate docs for module-level details: `bstguess::`.
use anyhow::Result;
use clap::{Parser, Subcommand};
use log::info;
use std::sync::Arc;

use bstguess::config::Config;
use bstguess::game::{GameRunner, PokeApiClient, TerminalPresenter};
use bstguess::storage::StreakStore;

#[derive(Parser)]
#[command(name = "bstguess")]
#[command(about = "Guess the base stat total of a random Pokémon")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file path (can be used before or after subcommand)
    #[arg(short, long, default_value = "config.toml", global = true)]
    config: String,

    /// Verbose logging (-v, -vv for more; may appear before or after subcommand)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Play the guessing game
    Play,
    /// Write a default configuration file
    Init,
    /// Show the persisted best streak
    Status,
    /// Reset the persisted best streak to 0
    ResetStreak,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Init => {
            init_logging(&None, cli.verbose);
            Config::create_default(&cli.config).await?;
            info!("Configuration file created at {}", cli.config);
            println!("Configuration file created at {}", cli.config);
        }
        Commands::Play => {
            let config = load_config(&cli.config, cli.verbose).await?;
            info!("Starting bstguess v{}", env!("CARGO_PKG_VERSION"));
            let source = Arc::new(PokeApiClient::new(
                config.api.clone(),
                config.game.max_creature_id,
            ));
            let mut runner =
                GameRunner::new(&config, source, Box::new(TerminalPresenter::stdout()));
            println!("Guess the base stat total! Type 'help' for commands.");
            runner.attach_input(std::io::stdin());
            runner.run().await?;
            let streak = runner.session().streak();
            println!("Thanks for playing. Best streak: {}", streak.best);
        }
        Commands::Status => {
            let config = load_config(&cli.config, cli.verbose).await?;
            let store = StreakStore::new(&config.storage.data_dir);
            println!("Best streak: {}", store.load_best());
            println!("Stored at: {}", store.path().display());
        }
        Commands::ResetStreak => {
            let config = load_config(&cli.config, cli.verbose).await?;
            let store = StreakStore::new(&config.storage.data_dir);
            store.save_best(0)?;
            info!("Best streak reset");
            println!("Best streak reset to 0.");
        }
    }

    Ok(())
}

/// Load the config (defaults when the file is absent) and set up logging from it.
async fn load_config(path: &str, verbosity: u8) -> Result<Config> {
    let config = Config::load_or_default(path).await?;
    init_logging(&Some(config.clone()), verbosity);
    Ok(config)
}

fn init_logging(config: &Option<Config>, verbosity: u8) {
    use std::io::Write;
    let mut builder = env_logger::Builder::new();
    // CLI verbosity overrides the configured level
    let base_level = match verbosity {
        0 => config
            .as_ref()
            .map(|c| c.logging.level_filter())
            .unwrap_or(log::LevelFilter::Info),
        1 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };
    builder.filter_level(base_level);

    let log_file = config
        .as_ref()
        .and_then(|c| c.logging.log_file().map(str::to_string));
    let opened = log_file.as_ref().and_then(|file| {
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(file)
            .ok()
    });

    if let Some(f) = opened {
        let write_mutex = std::sync::Arc::new(std::sync::Mutex::new(f));
        // The terminal belongs to the game; only echo logs when stderr is redirected
        let echo = !atty::is(atty::Stream::Stderr);
        builder.format(move |fmt, record| {
            let ts = chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ");
            let line = format!("{} [{}] {}", ts, record.level(), record.args());
            if let Ok(mut guard) = write_mutex.lock() {
                let _ = writeln!(guard, "{}", line);
            }
            if echo {
                writeln!(fmt, "{}", line)
            } else {
                Ok(())
            }
        });
    } else {
        builder.format(|fmt, record| {
            writeln!(
                fmt,
                "{} [{}] {}",
                chrono::Utc::now().format("%Y-%m-%dT%H:%M:%SZ"),
                record.level(),
                record.args()
            )
        });
    }
    let _ = builder.try_init();
}
