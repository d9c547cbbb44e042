//! AOC HTTP client implementation

use crate::error::AocError;
use crate::markdown::html_to_markdown;
use crate::parser::ResponseParser;
use reqwest::header::HeaderValue;
use std::time::Duration;
use zeroize::{Zeroize, Zeroizing};

/// Puzzle year and session credentials the client works with
///
/// The session cookie is zeroized on drop and never printed by `Debug`.
#[derive(Clone)]
pub struct ClientConfig {
    year: u16,
    session: Zeroizing<String>,
}

impl ClientConfig {
    /// Create a config for a puzzle year
    ///
    /// # Arguments
    ///
    /// * `year` - The AOC year (e.g., 2023)
    /// * `session` - The session cookie value (without "session=" prefix)
    pub fn new(year: u16, session: impl Into<String>) -> Self {
        Self {
            year,
            session: Zeroizing::new(session.into()),
        }
    }

    pub fn year(&self) -> u16 {
        self.year
    }

    pub fn session(&self) -> &str {
        &self.session
    }
}

impl std::fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientConfig")
            .field("year", &self.year)
            .field("session", &"<redacted>")
            .finish()
    }
}

/// Outcome of an answer submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Answer was correct
    Correct,
    /// Answer was incorrect
    Incorrect,
    /// Part was already completed
    AlreadyCompleted,
    /// Submission was throttled
    Throttled {
        /// Optional wait time before next submission
        wait_time: Option<Duration>,
    },
    /// The response text matched none of the known messages
    Unrecognized,
}

/// Result of an answer submission: the server's message and how it was read
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub outcome: SubmissionOutcome,
    /// Text of the response article, without the trailing "[Return to ...]" link
    pub message: String,
}

impl Submission {
    pub fn is_correct(&self) -> bool {
        self.outcome == SubmissionOutcome::Correct
    }
}

/// The main AOC HTTP client
///
/// Every request goes to `{base_url}/{year}/day/{day}...` and carries the
/// session cookie from the [`ClientConfig`] the client was built with.
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::{AocClient, ClientConfig};
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::new(ClientConfig::new(2023, "your_session_cookie"))?;
///
/// let input = client.get_input(1)?;
/// println!("Input: {}", input);
///
/// println!("Stars: {}", client.get_star_count(1)?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct AocClient {
    client: reqwest::blocking::Client,
    base_url: reqwest::Url,
    config: ClientConfig,
    parser: ResponseParser,
}

impl AocClient {
    /// Create a new AOC client with rustls-tls configuration and no redirect policy
    ///
    /// # Errors
    ///
    /// Returns `AocError::ClientInit` if the HTTP client cannot be initialized.
    pub fn new(config: ClientConfig) -> Result<Self, AocError> {
        Self::builder(config).build()
    }

    /// Create a builder for configuring the AOC client
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_http_client::{AocClient, ClientConfig};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::builder(ClientConfig::new(2023, "session"))
    ///     .base_url("http://localhost:1234")?
    ///     .build()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn builder(config: ClientConfig) -> AocClientBuilder {
        AocClientBuilder::new(config)
    }

    /// The puzzle year requests are made for
    pub fn year(&self) -> u16 {
        self.config.year
    }

    /// Create a secure cookie header value from the configured session
    ///
    /// This function creates a HeaderValue with the sensitive flag set to true
    /// and zeroizes the temporary string after use.
    fn create_cookie_header(&self) -> Result<HeaderValue, AocError> {
        let mut cookie_string = format!("session={}", self.config.session());
        let header_value = HeaderValue::from_bytes(cookie_string.as_bytes())
            .map_err(|_| AocError::ClientInit("Invalid session cookie format".to_string()));
        cookie_string.zeroize();

        let mut sensitive_header = header_value?;
        sensitive_header.set_sensitive(true);
        Ok(sensitive_header)
    }

    /// Build `{base_url}/{year}/day/{day}` followed by `rest`
    fn day_url(&self, day: u8, rest: &[&str]) -> Result<reqwest::Url, AocError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| AocError::ClientInit("Cannot modify base URL path".to_string()))?
            .clear()
            .extend(&[&self.config.year.to_string(), "day", &day.to_string()])
            .extend(rest);
        Ok(url)
    }

    /// Check the status and decode the body of a response
    fn read_body(response: reqwest::blocking::Response) -> Result<String, AocError> {
        let status = response.status();
        tracing::debug!(%status, url = %response.url(), "response");

        if !status.is_success() {
            return Err(AocError::InvalidStatus { status });
        }
        response.text().map_err(|_| AocError::Encoding)
    }

    fn get(&self, url: reqwest::Url) -> Result<String, AocError> {
        tracing::debug!(%url, "GET");
        let response = self
            .client
            .get(url)
            .header("Cookie", self.create_cookie_header()?)
            .send()?;
        Self::read_body(response)
    }

    /// Fetch the puzzle input for a day
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error (e.g., 404 if puzzle not available)
    /// * `AocError::Encoding` - Response is not valid UTF-8
    pub fn get_input(&self, day: u8) -> Result<String, AocError> {
        self.get(self.day_url(day, &["input"])?)
    }

    /// Fetch the full HTML page of a day
    pub fn get_day_page(&self, day: u8) -> Result<String, AocError> {
        self.get(self.day_url(day, &[])?)
    }

    /// Fetch the puzzle description of a day as HTML
    ///
    /// Contains one `<article class="day-desc">` per unlocked part.
    ///
    /// # Errors
    ///
    /// As [`AocClient::get_day_page`], plus `AocError::HtmlParse` when the page
    /// has no description.
    pub fn get_description_html(&self, day: u8) -> Result<String, AocError> {
        let page = self.get_day_page(day)?;
        self.parser.extract_description(&page)
    }

    /// Fetch the puzzle description of a day converted to Markdown
    pub fn get_markdown(&self, day: u8) -> Result<String, AocError> {
        let html = self.get_description_html(day)?;
        Ok(html_to_markdown(&html))
    }

    /// Fetch how many stars (0-2) have been earned on a day
    pub fn get_star_count(&self, day: u8) -> Result<u8, AocError> {
        let page = self.get_day_page(day)?;
        Ok(self.parser.star_count(&page))
    }

    /// Submit an answer for a puzzle part
    ///
    /// # Arguments
    ///
    /// * `day` - The day number (1-25)
    /// * `part` - The part number (1 or 2), sent as `level`
    /// * `answer` - The answer to submit
    ///
    /// # Errors
    ///
    /// * `AocError::Request` - Network error
    /// * `AocError::InvalidStatus` - HTTP error
    /// * `AocError::Encoding` - Response is not valid UTF-8
    /// * `AocError::HtmlParse` - Response has no article to read the result from
    ///
    /// # Example
    ///
    /// ```no_run
    /// use aoc_http_client::{AocClient, ClientConfig, SubmissionOutcome};
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let client = AocClient::new(ClientConfig::new(2023, "your_session_cookie"))?;
    ///
    /// let submission = client.submit_answer(1, 1, "142")?;
    /// match submission.outcome {
    ///     SubmissionOutcome::Correct => println!("Correct!"),
    ///     SubmissionOutcome::Throttled { wait_time } => println!("Wait: {:?}", wait_time),
    ///     _ => println!("{}", submission.message),
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub fn submit_answer(&self, day: u8, part: u8, answer: &str) -> Result<Submission, AocError> {
        let url = self.day_url(day, &["answer"])?;
        let form = [("level", part.to_string()), ("answer", answer.to_string())];

        tracing::debug!(%url, part, "POST answer");
        let response = self
            .client
            .post(url)
            .header("Cookie", self.create_cookie_header()?)
            .form(&form)
            .send()?;

        let html = Self::read_body(response)?;
        self.parser.parse_submission_response(&html)
    }
}

/// Builder for configuring an AOC HTTP client
///
/// # Example
///
/// ```no_run
/// use aoc_http_client::{AocClient, ClientConfig};
/// use std::time::Duration;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let client = AocClient::builder(ClientConfig::new(2023, "session"))
///     .base_url("http://localhost:1234")?
///     .client_builder(
///         reqwest::blocking::Client::builder()
///             .timeout(Duration::from_secs(10))
///     )
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct AocClientBuilder {
    config: ClientConfig,
    base_url: Option<reqwest::Url>,
    client_builder: Option<reqwest::blocking::ClientBuilder>,
}

impl AocClientBuilder {
    /// Create a new builder with default settings
    pub fn new(config: ClientConfig) -> Self {
        Self {
            config,
            base_url: None,
            client_builder: None,
        }
    }

    /// Set a custom base URL for the client
    ///
    /// This is useful for testing with mock servers. The URL is parsed and
    /// validated at builder time.
    pub fn base_url(mut self, url: impl reqwest::IntoUrl) -> Result<Self, AocError> {
        self.base_url = Some(url.into_url()?);
        Ok(self)
    }

    /// Set a custom HTTP client builder
    ///
    /// The redirect policy will always be overridden to `Policy::none()`.
    pub fn client_builder(mut self, builder: reqwest::blocking::ClientBuilder) -> Self {
        self.client_builder = Some(builder);
        self
    }

    /// Build the AOC client with the configured settings
    pub fn build(self) -> Result<AocClient, AocError> {
        let base_url = match self.base_url {
            Some(url) => url,
            None => reqwest::Url::parse("https://adventofcode.com")
                .map_err(|e| AocError::ClientInit(e.to_string()))?,
        };

        let builder = self
            .client_builder
            .unwrap_or_else(|| reqwest::blocking::Client::builder().use_rustls_tls());

        let client = builder
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| AocError::ClientInit(e.to_string()))?;

        Ok(AocClient {
            client,
            base_url,
            config: self.config,
            parser: ResponseParser::new(),
        })
    }
}
