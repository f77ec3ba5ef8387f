//! ACS HTTP Client Library
//!
//! This library posts messages to community bulletin boards on the ACS portal.
//! A post is three form submissions sharing one cookie session: log in, submit
//! the post, and confirm it.
//!
//! # Features
//!
//! - Fresh in-memory cookie session for every post
//! - Form parameters percent-encoded in the server's character set (EUC-JP by default)
//! - At most one post in flight per process
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//! - Plain `bool` result, or a typed error via `try_post`
//!
//! # Example
//!
//! ```no_run
//! use acs_http_client::{AcsError, Credentials, PortalClient, PostContent, PostTarget};
//!
//! # fn main() -> Result<(), AcsError> {
//! let client = PortalClient::new()?;
//!
//! let credentials = Credentials::new("a123456b", "password");
//! let target = PostTarget::new(123, 45);
//! let content = PostContent::new("お知らせ", "本日の定例会は休みです。");
//!
//! match client.try_post(&credentials, target, &content) {
//!     Ok(()) => println!("Posted"),
//!     Err(e) => println!("Failed during {:?}: {}", e.step(), e),
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod encoding;
mod error;
mod model;

pub use client::{PortalClient, PortalClientBuilder};
pub use encoding::FormEncoder;
pub use error::AcsError;
pub use model::{Credentials, PostContent, PostTarget, Step};

/// Post a message to a board on the default portal
///
/// Shorthand for building a default [`PortalClient`] and calling
/// [`PortalClient::post`]. Returns `false` on any failure, including a client
/// that cannot be constructed.
pub fn post(
    user_id: &str,
    password: &str,
    community_id: u32,
    bbs_id: u32,
    subject: &str,
    body: &str,
) -> bool {
    let client = match PortalClient::new() {
        Ok(client) => client,
        Err(e) => {
            tracing::warn!(error = %e, "Failed to create portal client");
            return false;
        }
    };

    client.post(
        &Credentials::new(user_id, password),
        PostTarget::new(community_id, bbs_id),
        &PostContent::new(subject, body),
    )
}
