use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(name = "boxoffice")]
#[command(about = "Assign theater seats to a batch of ticket requests", long_about = None)]
pub struct Cli {
    /// The path to the ticket request file
    #[arg(long)]
    pub file: PathBuf,

    /// Print the seating chart, remaining seats and where reservations were saved
    #[arg(long)]
    pub verbose: bool,

    /// Snapshot directory, overriding `storage.data_dir`
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Process the batch without saving reservations
    #[arg(long)]
    pub no_save: bool,
}
