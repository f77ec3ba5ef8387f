//! ACS portal client implementation

use crate::encoding::FormEncoder;
use crate::error::AcsError;
use crate::model::{Credentials, PostContent, PostTarget, Step};
use reqwest::StatusCode;
use reqwest::cookie::Jar;
use reqwest::header::{ACCEPT_LANGUAGE, CONTENT_TYPE};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tracing::{debug, info, warn};
use zeroize::Zeroizing;

const DEFAULT_BASE_URL: &str = "https://acs.is.nagoya-u.ac.jp";

/// Every portal action goes through this script, selected by query parameters
const ENTRY_PATH: [&str; 2] = ["login", "index.php"];

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// Held for the whole login/submit/confirm sequence so posts never interleave
static POST_LOCK: Mutex<()> = Mutex::new(());

/// Client for posting to ACS community boards
///
/// The client itself only holds configuration. Each call to [`post`](Self::post)
/// opens a fresh cookie session, so no login state carries over between calls.
///
/// # Example
///
/// ```no_run
/// use acs_http_client::{Credentials, PortalClient, PostContent, PostTarget};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = PortalClient::new()?;
/// let credentials = Credentials::new("a123456b", "password");
/// let target = PostTarget::new(123, 45);
/// let content = PostContent::new("お知らせ", "本日の定例会は休みです。");
///
/// if client.post(&credentials, target, &content) {
///     println!("Posted!");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct PortalClient {
    base_url: reqwest::Url,
    encoder: FormEncoder,
    timeout: Option<Duration>,
}

impl PortalClient {
    /// Create a client for the default portal, encoding forms as EUC-JP
    ///
    /// # Errors
    ///
    /// Returns `AcsError::ClientInit` if the default configuration cannot be built.
    pub fn new() -> Result<Self, AcsError> {
        Self::builder().build()
    }

    /// Create a builder for configuring the portal client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use acs_http_client::PortalClient;
    /// use std::time::Duration;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = PortalClient::builder()
    ///     .base_url("http://localhost:1234")?
    ///     .encoding("shift_jis")?
    ///     .timeout(Duration::from_secs(10))
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder() -> PortalClientBuilder {
        PortalClientBuilder::new()
    }

    /// Post a message to a board
    ///
    /// Logs in, submits the post and confirms it. Returns `true` only if all
    /// three requests were answered with 200 OK. Any failure stops the
    /// sequence and returns `false`; use [`try_post`](Self::try_post) to find
    /// out which step failed.
    pub fn post(
        &self,
        credentials: &Credentials,
        target: PostTarget,
        content: &PostContent,
    ) -> bool {
        match self.try_post(credentials, target, content) {
            Ok(()) => true,
            Err(e) => {
                warn!(
                    community_id = target.community_id,
                    bbs_id = target.bbs_id,
                    error = %e,
                    "Board post failed"
                );
                false
            }
        }
    }

    /// Post a message to a board, reporting why it failed
    ///
    /// Only one post runs at a time in the process; concurrent callers wait.
    /// Every form is encoded before the first request is sent, so text the
    /// server encoding cannot represent fails without touching the network.
    ///
    /// # Errors
    ///
    /// * `AcsError::Encoding` - A parameter is not representable in the server encoding
    /// * `AcsError::Request` - Network error during one of the steps
    /// * `AcsError::InvalidStatus` - A step was answered with something other than 200
    /// * `AcsError::ClientInit` - The per-call HTTP client could not be built
    pub fn try_post(
        &self,
        credentials: &Credentials,
        target: PostTarget,
        content: &PostContent,
    ) -> Result<(), AcsError> {
        let community_id = target.community_id.to_string();

        let requests = [
            (
                Step::Login,
                self.entry_url(&[("module", "User"), ("action", "Login")])?,
                self.login_form(credentials)?,
            ),
            (
                Step::Submit,
                self.board_url(target, 1)?,
                Zeroizing::new(self.encoder.encode_pairs(&[
                    ("subject", content.subject.as_str()),
                    ("body", content.body.as_str()),
                ])?),
            ),
            (
                Step::Confirm,
                self.board_url(target, 2)?,
                Zeroizing::new(
                    self.encoder
                        .encode_pairs(&[("except_community_id_array[]", community_id.as_str())])?,
                ),
            ),
        ];

        let _guard = POST_LOCK.lock().unwrap_or_else(PoisonError::into_inner);
        let session = Session::open(self.timeout)?;

        for (step, url, body) in &requests {
            session.send(*step, url.clone(), body)?;
        }

        info!(
            community_id = target.community_id,
            bbs_id = target.bbs_id,
            "Posted to board"
        );
        Ok(())
    }

    /// Encoded login form; wiped on drop since it carries the password
    fn login_form(&self, credentials: &Credentials) -> Result<Zeroizing<String>, AcsError> {
        self.encoder
            .encode_pairs(&[
                ("module", "User"),
                ("action", "Login"),
                ("search", "1"),
                ("userid", credentials.user_id.as_str()),
                ("passwd", credentials.password()),
            ])
            .map(Zeroizing::new)
    }

    /// URL of the portal entry script with the given query
    fn entry_url(&self, query: &[(&str, &str)]) -> Result<reqwest::Url, AcsError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AcsError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(ENTRY_PATH);
        url.query_pairs_mut().clear().extend_pairs(query);
        Ok(url)
    }

    /// URL of the board posting action; `move_id` 1 submits, 2 confirms
    fn board_url(&self, target: PostTarget, move_id: u8) -> Result<reqwest::Url, AcsError> {
        let community_id = target.community_id.to_string();
        let bbs_id = target.bbs_id.to_string();
        let move_id = move_id.to_string();
        self.entry_url(&[
            ("module", "Community"),
            ("action", "BBSResPre"),
            ("community_id", community_id.as_str()),
            ("bbs_id", bbs_id.as_str()),
            ("move_id", move_id.as_str()),
        ])
    }
}

/// One login session: an HTTP client with its own cookie jar
struct Session {
    http: reqwest::blocking::Client,
}

impl Session {
    fn open(timeout: Option<Duration>) -> Result<Self, AcsError> {
        let jar = Arc::new(Jar::default());
        let mut builder = reqwest::blocking::Client::builder()
            .use_rustls_tls()
            .cookie_provider(jar);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|e| AcsError::ClientInit(e.to_string()))?;
        Ok(Self { http })
    }

    /// POST an already encoded form and require 200 OK
    fn send(&self, step: Step, url: reqwest::Url, body: &str) -> Result<(), AcsError> {
        debug!(%step, url = %url, "Sending request");

        let response = self
            .http
            .post(url)
            .header(ACCEPT_LANGUAGE, "ja")
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .body(body.to_owned())
            .send()
            .map_err(|source| AcsError::Request { step, source })?;

        let status = response.status();
        debug!(%step, %status, "Received response");

        if status != StatusCode::OK {
            return Err(AcsError::InvalidStatus { step, status });
        }
        Ok(())
    }
}

/// Builder for configuring a portal client
#[derive(Debug, Default)]
pub struct PortalClientBuilder {
    base_url: Option<reqwest::Url>,
    encoder: Option<FormEncoder>,
    timeout: Option<Duration>,
}

impl PortalClientBuilder {
    /// Create a new builder with default settings
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom base URL for the portal
    ///
    /// Useful for mock servers and mirrors. Only the scheme, host and port are
    /// used; the path is replaced by the portal's entry script.
    ///
    /// # Errors
    ///
    /// Returns `AcsError::InvalidUrl` if the URL cannot be parsed or is not http(s).
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AcsError> {
        self.base_url = Some(url.into_url().map_err(AcsError::InvalidUrl)?);
        Ok(self)
    }

    /// Set the server character encoding by label (default `EUC-JP`)
    ///
    /// # Errors
    ///
    /// Returns `AcsError::UnknownEncoding` if the label is not recognised.
    pub fn encoding(mut self, label: &str) -> Result<Self, AcsError> {
        self.encoder = Some(FormEncoder::for_label(label)?);
        Ok(self)
    }

    /// Set a timeout applied to each request
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build the portal client
    ///
    /// # Errors
    ///
    /// Returns `AcsError::ClientInit` if the default base URL cannot be parsed.
    pub fn build(self) -> Result<PortalClient, AcsError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse(DEFAULT_BASE_URL)
                .map_err(|e| AcsError::ClientInit(e.to_string()))?,
        };

        Ok(PortalClient {
            base_url,
            encoder: self.encoder.unwrap_or_default(),
            timeout: self.timeout,
        })
    }
}
