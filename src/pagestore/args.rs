use clap::{Parser, Subcommand};
use pagestore::config::Surface;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "pagestore")]
#[command(about = "In-memory page store driven by line-delimited JSON requests", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (defaults to config.json in the user config directory)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Read requests from stdin until EOF
    #[command(alias = "s")]
    Serve {
        #[command(flatten)]
        opts: ServeOpts,
    },

    /// Run the requests in a file against a fresh store
    #[command(alias = "r")]
    Replay {
        /// File with one JSON request per line
        file: PathBuf,

        #[command(flatten)]
        opts: ServeOpts,
    },
}

#[derive(clap::Args, Debug)]
pub struct ServeOpts {
    /// Request format to accept
    #[arg(long, value_enum)]
    pub surface: Option<Surface>,

    /// Pretty-print responses
    #[arg(long)]
    pub pretty: bool,
}
