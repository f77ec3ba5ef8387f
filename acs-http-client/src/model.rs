//! Data passed into a board post

use std::fmt;
use zeroize::Zeroizing;

/// Login credentials for the portal
///
/// The password is wiped from memory when the credentials are dropped and is
/// never shown by `Debug`.
#[derive(Clone)]
pub struct Credentials {
    /// Portal user ID
    pub user_id: String,
    password: Zeroizing<String>,
}

impl Credentials {
    /// Create credentials from a user ID and password
    pub fn new(user_id: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            password: Zeroizing::new(password.into()),
        }
    }

    /// The password in plain text
    pub fn password(&self) -> &str {
        &self.password
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("user_id", &self.user_id)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Destination board of a post
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PostTarget {
    /// Community owning the board
    pub community_id: u32,
    /// Board within the community
    pub bbs_id: u32,
}

impl PostTarget {
    pub fn new(community_id: u32, bbs_id: u32) -> Self {
        Self {
            community_id,
            bbs_id,
        }
    }
}

/// Subject and body of a post
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostContent {
    pub subject: String,
    pub body: String,
}

impl PostContent {
    pub fn new(subject: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            body: body.into(),
        }
    }
}

/// Stage of the posting workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Authenticate and obtain a session cookie
    Login,
    /// Send the subject and body to the board
    Submit,
    /// Confirm the pending post
    Confirm,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Step::Login => "Login",
            Step::Submit => "Submit",
            Step::Confirm => "Confirm",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credentials_debug_redacts_password() {
        let credentials = Credentials::new("a123456b", "hunter2");
        let debug = format!("{:?}", credentials);

        assert!(debug.contains("a123456b"));
        assert!(!debug.contains("hunter2"));
        assert_eq!(credentials.password(), "hunter2");
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Login.to_string(), "Login");
        assert_eq!(Step::Submit.to_string(), "Submit");
        assert_eq!(Step::Confirm.to_string(), "Confirm");
    }
}
