use clap::Parser;
use colored::Colorize;

use lapwatch::cli::args::{Cli, Commands};
use lapwatch::cli::commands;
use lapwatch::config::{Config, Paths};
use lapwatch::error::LapwatchError;
use lapwatch::features::history::SessionStore;
use lapwatch::logging::{self, LogTarget};
use lapwatch::storage::{Database, SqliteBlobStore};
use lapwatch::Stopwatch;

fn main() {
    if let Err(e) = run() {
        eprintln!("{}: {:#}", "error".red().bold(), e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let paths = Paths::new()?;
    paths.ensure_dirs()?;
    let config = Config::load_from_path(&paths.config_file)?;
    let format = cli.output.unwrap_or(config.general.default_output);

    let command = cli.command.unwrap_or(Commands::Tui);
    let target = if matches!(command, Commands::Tui) {
        LogTarget::File(&paths.log_file)
    } else {
        LogTarget::Stderr
    };
    logging::init(&config.logging.level, target)?;

    let output = match command {
        Commands::Tui => {
            let stopwatch = Stopwatch::open(open_blobs(&config, &paths)?, &config);
            let stopwatch = lapwatch::tui::run(stopwatch)?;
            drop(stopwatch.shutdown());
            String::new()
        }
        Commands::History { limit } => {
            let store = open_history(&config, &paths)?;
            commands::history(&store, limit, format)?
        }
        Commands::Show { id } => {
            let store = open_history(&config, &paths)?;
            commands::show(&store, &id, format)?
        }
        Commands::Delete { id } => {
            let mut store = open_history(&config, &paths)?;
            commands::delete(&mut store, &id, format)?
        }
        Commands::Clear { force } => {
            let mut store = open_history(&config, &paths)?;
            commands::clear(&mut store, force, format)?
        }
        Commands::Config => commands::config(&config, format)?,
    };

    if !output.is_empty() {
        println!("{output}");
    }
    Ok(())
}

fn open_blobs(config: &Config, paths: &Paths) -> Result<SqliteBlobStore, LapwatchError> {
    let db = Database::open_at(&config.database_path(paths))?;
    Ok(SqliteBlobStore::new(db))
}

fn open_history(
    config: &Config,
    paths: &Paths,
) -> Result<SessionStore<SqliteBlobStore>, LapwatchError> {
    Ok(SessionStore::load(
        open_blobs(config, paths)?,
        config.storage.key.clone(),
    ))
}
