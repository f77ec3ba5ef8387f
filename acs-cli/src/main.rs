//! ACS CLI - Command-line interface for posting to ACS community boards

mod body;
mod cli;
mod config;
mod error;
mod logging;
mod output;

use clap::Parser;
use cli::Args;
use config::Config;
use output::OutputFormatter;

fn main() {
    let args = Args::parse();
    logging::init(args.verbose);

    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<(), error::CliError> {
    let config = Config::from_args(args)?;
    let client = config.build_client()?;
    let formatter = OutputFormatter::new(config.quiet);

    tracing::info!(
        user_id = %config.credentials.user_id,
        community_id = config.target.community_id,
        bbs_id = config.target.bbs_id,
        "Posting to board"
    );
    client.try_post(&config.credentials, config.target, &config.content)?;

    formatter.print_posted(config.target, chrono::Local::now());
    Ok(())
}
