//! AOC HTTP Client Library
//!
//! Talks to the Advent of Code website for one puzzle year: fetches puzzle
//! inputs and descriptions, reads the star count of a day and submits
//! answers.
//!
//! # Features
//!
//! - Session cookie and year passed once through [`ClientConfig`]
//! - Puzzle description extraction with conversion to Markdown
//! - Answer submission with the server's message and outcome
//! - Secure TLS using rustls (no OpenSSL dependencies)
//! - Blocking synchronous API
//! - Well-typed errors using thiserror
//!
//! # Example
//!
//! ```no_run
//! use aoc_http_client::{AocClient, ClientConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let client = AocClient::new(ClientConfig::new(2023, "your_session_cookie_here"))?;
//!
//! let input = client.get_input(1)?;
//! println!("{}", client.get_markdown(1)?);
//!
//! if client.get_star_count(1)? < 1 {
//!     let submission = client.submit_answer(1, 1, "42")?;
//!     println!("{} ({})", submission.message, submission.is_correct());
//! }
//! # Ok(())
//! # }
//! ```

mod client;
mod error;
mod markdown;
mod parser;

pub use client::{AocClient, AocClientBuilder, ClientConfig, Submission, SubmissionOutcome};
pub use error::AocError;
pub use markdown::html_to_markdown;
