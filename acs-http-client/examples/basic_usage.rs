//! Basic usage example for the ACS HTTP client
//!
//! This example demonstrates how to:
//! - Create a client with default settings
//! - Create a client with a custom base URL and encoding (for testing)
//! - Post to a board and inspect the failing step
//!
//! Note: This example needs a real portal account. Set ACS_USER_ID,
//! ACS_PASSWORD, ACS_COMMUNITY_ID and ACS_BBS_ID before running it.

use acs_http_client::{Credentials, PortalClient, PostContent, PostTarget};
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let user_id = std::env::var("ACS_USER_ID")?;
    let password = std::env::var("ACS_PASSWORD")?;
    let community_id: u32 = std::env::var("ACS_COMMUNITY_ID")?.parse()?;
    let bbs_id: u32 = std::env::var("ACS_BBS_ID")?.parse()?;

    // Example 1: Create a client with default settings
    println!("=== Example 1: Default Client ===");
    let client = PortalClient::new()?;
    println!("✓ Client created for https://acs.is.nagoya-u.ac.jp (EUC-JP)");

    // Example 2: Custom base URL, encoding and timeout
    println!("\n=== Example 2: Custom Configuration ===");
    let _custom_client = PortalClient::builder()
        .base_url("http://localhost:8080")? // Could be a mock server URL for testing
        .encoding("euc-jp")?
        .timeout(Duration::from_secs(30))
        .build()?;
    println!("✓ Client created with custom base URL and 30s timeout");

    // Post using the default client
    println!("\n=== Posting ===");
    let credentials = Credentials::new(user_id, password);
    let target = PostTarget::new(community_id, bbs_id);
    let content = PostContent::new("テスト投稿", "これはテスト投稿です。");

    match client.try_post(&credentials, target, &content) {
        Ok(()) => println!("✓ Posted to community {} / board {}", community_id, bbs_id),
        Err(e) => match e.step() {
            Some(step) => println!("✗ {} step failed: {}", step, e),
            None => println!("✗ Post failed: {}", e),
        },
    }

    Ok(())
}
