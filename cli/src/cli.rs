use std::path::PathBuf;

/// Mu-Land input-table assembly CLI
#[derive(clap::Parser, Debug)]
#[command(name = "muland-data", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Assemble the engine input tables for a list of locations
    Assemble(AssembleArgs),

    /// Print the zone of each location
    Locate(LocateArgs),
}

#[derive(clap::Args, Debug)]
pub struct AssembleArgs {
    /// Store directory (one folder per model), defaults to MULAND_STORE_PATH or "./store"
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub store: Option<PathBuf>,

    /// Model name
    pub model: String,

    /// Locations JSON: [{"lng", "lat", "types": [...]}, ...]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub locations: PathBuf,

    /// Directory for the `;`-separated table files, defaults to MULAND_WORK_PATH or "./work"
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub output: Option<PathBuf>,

    /// Also write all tables as one JSON document
    #[arg(long, value_hint = clap::ValueHint::FilePath)]
    pub json: Option<PathBuf>,

    /// Include the subsidies and supply tables
    #[arg(long)]
    pub extended: bool,
}

#[derive(clap::Args, Debug)]
pub struct LocateArgs {
    /// Store directory (one folder per model), defaults to MULAND_STORE_PATH or "./store"
    #[arg(short, long, value_hint = clap::ValueHint::DirPath)]
    pub store: Option<PathBuf>,

    /// Model name
    pub model: String,

    /// Locations JSON: [{"lng", "lat", "types": [...]}, ...]
    #[arg(value_hint = clap::ValueHint::FilePath)]
    pub locations: PathBuf,
}
