//! pumlgen CLI - Render PlantUML class diagrams from a type declaration feed

mod cli;

use clap::Parser;

fn main() {
    let cli_args = cli::Cli::parse();

    // Logging is initialized inside run() from the flags and environment
    let app = cli::PumlgenApp::new();

    if let Err(e) = app.run(cli_args) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
