mod args;
mod commands;

use anyhow::{bail, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use roloapp::{config, Resolver, RoloConfig};

use args::{Cli, Commands};

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("ROLO_LOG")
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config() -> RoloConfig {
    // ROLO_CONFIG_DIR overrides the platform dir, mainly for tests.
    let dir = std::env::var_os("ROLO_CONFIG_DIR")
        .map(std::path::PathBuf::from)
        .or_else(config::default_config_dir);
    match dir {
        Some(dir) => RoloConfig::load(dir).unwrap_or_default(),
        None => RoloConfig::default(),
    }
}

fn book_location(cli: &Cli, config: &RoloConfig) -> Result<String> {
    if let Some(book) = &cli.book {
        return Ok(book.clone());
    }
    if let Some(book) = &config.default_book {
        return Ok(book.clone());
    }
    bail!("no address book given; pass --book or set default_book in the config");
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config();
    let resolver = Resolver::with_builtins();

    match &cli.command {
        Commands::List {
            sort,
            desc,
            ignore_case,
        } => {
            let location = book_location(&cli, &config)?;
            commands::list(
                &resolver,
                &location,
                sort.as_deref(),
                *desc,
                *ignore_case || config.ignore_case,
            )
        }
        Commands::Show { index } => {
            let location = book_location(&cli, &config)?;
            commands::show(&resolver, &location, *index)
        }
        Commands::Add { fields } => {
            let location = book_location(&cli, &config)?;
            commands::add(&resolver, &location, fields)
        }
        Commands::Remove { indexes } => {
            let location = book_location(&cli, &config)?;
            commands::remove(&resolver, &location, indexes)
        }
        Commands::Search {
            pattern,
            fields,
            regex,
            ignore_case,
        } => {
            let location = book_location(&cli, &config)?;
            commands::search(
                &resolver,
                &location,
                pattern,
                fields,
                *regex,
                *ignore_case || config.ignore_case,
            )
        }
        Commands::Backends => commands::backends(&resolver),
        Commands::Convert { source, dest } => commands::convert(&resolver, source, dest),
    }
}
