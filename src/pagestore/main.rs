use clap::Parser;
use env_logger::{Env, Target};
use log::{debug, info};
use pagestore::api::PageApi;
use pagestore::config::{ServeConfig, Surface};
use pagestore::error::{PageError, Result};
use pagestore::ops::OpsSurface;
use pagestore::rest::RestSurface;
use pagestore::serve;
use pagestore::store::memory::InMemoryStore;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::Path;

mod args;
use args::{Cli, Commands, ServeOpts};

fn main() {
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_deref())?;
    debug!("using config {:?}", config);

    match cli.command {
        Commands::Serve { opts } => handle_serve(&config, &opts, io::stdin().lock()),
        Commands::Replay { file, opts } => {
            let reader = BufReader::new(File::open(&file).map_err(PageError::Io)?);
            info!("replaying {}", file.display());
            handle_serve(&config, &opts, reader)
        }
    }
}

/// `PAGESTORE_LOG` wins when set; otherwise `-v` picks the level.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(Env::new().filter_or("PAGESTORE_LOG", default_level))
        .target(Target::Stderr)
        .init();
}

fn load_config(explicit: Option<&Path>) -> Result<ServeConfig> {
    match explicit {
        Some(path) if !path.exists() => Err(PageError::Config(format!(
            "config file not found: {}",
            path.display()
        ))),
        Some(path) => ServeConfig::load_file(path),
        None => match ServeConfig::default_dir() {
            Some(dir) => ServeConfig::load(dir),
            None => Ok(ServeConfig::default()),
        },
    }
}

fn handle_serve<R: BufRead>(config: &ServeConfig, opts: &ServeOpts, reader: R) -> Result<()> {
    let surface = opts.surface.unwrap_or(config.surface);
    let pretty = opts.pretty || config.pretty;
    let api = PageApi::new(InMemoryStore::new());
    let mut stdout = io::stdout().lock();

    info!("serving {:?} requests", surface);
    match surface {
        Surface::Rest => {
            let rest = RestSurface::new(api)
                .require_json_content_type(config.require_json_content_type);
            serve::run(&rest, reader, &mut stdout, pretty)?;
        }
        Surface::Ops => {
            serve::run(&OpsSurface::new(api), reader, &mut stdout, pretty)?;
        }
    }
    Ok(())
}
