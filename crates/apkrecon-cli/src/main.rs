use std::env;

use apkrecon_config::config::{self, generate_default_config, Config};
use apkrecon_key::{Architectures, KeyParser};
use apkrecon_reconcile::Reconciler;
use clap::Parser;
use cli::{Args, Commands};
use error::{CliResult, ErrorContext};
use inspect::{list_archs, parse_keys, print_digest, print_url};
use logging::setup_logging;
use reconcile::reconcile_requests;
use tracing::{debug, info};

mod cli;
mod error;
mod inspect;
mod logging;
mod reconcile;
mod utils;

async fn handle_cli() -> CliResult<()> {
    let args = Args::parse();

    setup_logging(&args);

    if args.no_color || env::var_os("NO_COLOR").is_some() {
        utils::set_color(false);
    }

    let config_path = match args.config {
        Some(ref path) if path.is_absolute() => path.clone(),
        Some(ref path) => {
            env::current_dir()
                .with_context(|| "retrieving current directory".into())?
                .join(path)
        }
        None => config::config_path(),
    };

    if let Commands::DefConfig = args.command {
        generate_default_config(&config_path)?;
        info!(
            "Default configuration file generated at: {}",
            config_path.display()
        );
        return Ok(());
    }

    let config = Config::load_from(&config_path)?;
    debug!(
        "Loaded configuration from {} with architectures {:?}",
        config_path.display(),
        config.architectures
    );

    let parser = KeyParser::new(Architectures::new(config.architectures.iter().cloned()));

    match args.command {
        Commands::Parse {
            keys,
        } => parse_keys(&parser, &keys, args.json)?,
        Commands::Url {
            key,
        } => print_url(&parser, &key, args.json)?,
        Commands::Digest {
            checksum,
            index,
        } => print_digest(&config, &checksum, index, args.json)?,
        Commands::Archs => list_archs(parser.architectures(), args.json)?,
        Commands::Reconcile {
            input,
        } => {
            let reconciler = Reconciler::new(parser);
            reconcile_requests(&reconciler, input.as_deref(), args.json).await?;
        }
        Commands::DefConfig => unreachable!(),
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    miette::set_hook(Box::new(|_| {
        Box::new(
            miette::MietteHandlerOpts::new()
                .terminal_links(true)
                .unicode(true)
                .context_lines(2)
                .build(),
        )
    }))
    .ok();

    if let Err(err) = handle_cli().await {
        eprintln!("{:?}", miette::Report::new(err));
        std::process::exit(1);
    }
}
