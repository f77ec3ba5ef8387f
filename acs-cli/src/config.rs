//! Configuration resolution from CLI args

use crate::body::read_body;
use crate::cli::Args;
use crate::error::CliError;
use acs_http_client::{Credentials, PortalClient, PostContent, PostTarget};
use std::time::Duration;
use zeroize::Zeroizing;

/// Environment variable holding the portal password
const PASSWORD_ENV: &str = "ACS_PASSWORD";

/// Resolved runtime configuration
pub struct Config {
    /// Login credentials (password zeroized on drop)
    pub credentials: Credentials,
    /// Destination board
    pub target: PostTarget,
    /// Subject and body to post
    pub content: PostContent,
    /// Portal base URL
    pub base_url: String,
    /// Server form encoding label
    pub encoding: String,
    /// Per-request timeout
    pub timeout: Option<Duration>,
    /// Quiet mode
    pub quiet: bool,
}

impl Config {
    /// Build config from CLI args, resolving the password and body
    pub fn from_args(args: Args) -> Result<Self, CliError> {
        let password = resolve_password(std::env::var(PASSWORD_ENV).ok())?;
        Self::with_password(args, password)
    }

    /// Build config from CLI args with an already known password
    fn with_password(args: Args, password: Zeroizing<String>) -> Result<Self, CliError> {
        if args.user_id.trim().is_empty() {
            return Err(CliError::Config("User ID must not be empty.".to_string()));
        }

        let body = match (args.body, args.body_file) {
            (Some(body), _) => body,
            (None, Some(path)) => read_body(&path)?,
            (None, None) => {
                return Err(CliError::Config(
                    "Either --body or --body-file is required.".to_string(),
                ));
            }
        };

        Ok(Config {
            credentials: Credentials::new(args.user_id, password.as_str()),
            target: PostTarget::new(args.community_id, args.bbs_id),
            content: PostContent::new(args.subject, body),
            base_url: args.base_url,
            encoding: args.encoding,
            timeout: args.timeout,
            quiet: args.quiet,
        })
    }

    /// Build a portal client from the connection settings
    pub fn build_client(&self) -> Result<PortalClient, CliError> {
        let mut builder = PortalClient::builder()
            .base_url(self.base_url.as_str())?
            .encoding(&self.encoding)?;
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        Ok(builder.build()?)
    }
}

/// Use the password from the environment, or prompt for it
fn resolve_password(env_password: Option<String>) -> Result<Zeroizing<String>, CliError> {
    let password = match env_password {
        Some(p) => Zeroizing::new(p),
        None => prompt_password()?,
    };
    if password.is_empty() {
        return Err(CliError::Config("Password is required.".to_string()));
    }
    Ok(password)
}

/// Prompt user for their portal password
fn prompt_password() -> Result<Zeroizing<String>, CliError> {
    rpassword::prompt_password("Enter ACS password: ")
        .map(Zeroizing::new)
        .map_err(|e| CliError::Config(format!("Failed to read password: {}", e)))
}
