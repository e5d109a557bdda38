//! Bloom Application CLI

use std::process;

use bloom_app::observability;

mod cli;

pub fn main() {
    let cli = cli::Cli::load();

    if let Err(error) = observability::init_logging(&cli.config.logging) {
        eprintln!("{error}");
        process::exit(1);
    }

    if let Err(error) = cli.run() {
        eprintln!("{error}");
        process::exit(1);
    }
}
