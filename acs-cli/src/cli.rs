//! CLI argument parsing using clap

use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Post a message to an ACS community board
#[derive(Parser, Debug)]
#[command(name = "acs", about = "Post a message to an ACS community board", version)]
pub struct Args {
    /// Portal user ID (password is read from ACS_PASSWORD or prompted)
    #[arg(short, long, env = "ACS_USER_ID")]
    pub user_id: String,

    /// Community that owns the board
    #[arg(short, long)]
    pub community_id: u32,

    /// Board ID within the community
    #[arg(short, long)]
    pub bbs_id: u32,

    /// Post subject
    #[arg(short, long)]
    pub subject: String,

    /// Post body
    #[arg(long, required_unless_present = "body_file", conflicts_with = "body_file")]
    pub body: Option<String>,

    /// Read the post body from a file ("-" for stdin)
    #[arg(long)]
    pub body_file: Option<PathBuf>,

    /// Portal base URL
    #[arg(long, default_value = "https://acs.is.nagoya-u.ac.jp")]
    pub base_url: String,

    /// Character encoding the portal expects for form data
    #[arg(long, default_value = "EUC-JP")]
    pub encoding: String,

    /// Per-request timeout (e.g. "30s", "1m")
    #[arg(long, value_parser = humantime::parse_duration)]
    pub timeout: Option<Duration>,

    /// Quiet mode - print nothing on success
    #[arg(short, long)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}
