pub mod cli;
pub mod driver;
pub mod report;

pub use cli::Cli;
pub use driver::{BatchDriver, RunReport};
