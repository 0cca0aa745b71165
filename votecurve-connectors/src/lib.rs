//! I/O collaborators for the votecurve engine
//!
//! ## Overview
//!
//! `votecurve-core` is a pure function of (samples, timeframe, now). Everything
//! around it lives here:
//!
//! - [`config`]: where the submissions are and how to authenticate
//! - [`api`]: wire shapes of the form-submission API and their conversion
//!   into [`RawRecord`](votecurve_core::RawRecord)s
//! - [`forms`] (feature `http`): blocking `ureq` client implementing
//!   [`SampleSource`](votecurve_core::SampleSource)
//! - [`handler`]: query string in, JSON response out
//!
//! ## Request Flow
//!
//! ```text
//! ?tf=7d ─► handler ─► FormsClient::fetch ─► Engine::compute_from ─► 200 JSON
//!                          │
//!                          ├─ no credentials      ─► 500
//!                          ├─ no "vote" form      ─► 404
//!                          └─ upstream failure    ─► 502
//! ```
//!
//! ## Example Usage
//!
//! ```no_run
//! use votecurve_connectors::{config::SourceConfig, forms::FormsClient, handler};
//! use votecurve_core::{time::SystemClock, Engine};
//!
//! let client = FormsClient::new(SourceConfig::from_env())?;
//! let response = handler::handle("tf=1h", &client, &SystemClock, &Engine::default());
//! println!("{} {}", response.status, response.body);
//! # Ok::<(), votecurve_connectors::SourceError>(())
//! ```

pub mod api;
pub mod config;
#[cfg(feature = "http")]
pub mod forms;
pub mod handler;

pub use config::SourceConfig;
#[cfg(feature = "http")]
pub use forms::FormsClient;
pub use handler::Response;

use thiserror::Error;

/// Errors while locating or reading submissions
#[derive(Debug, Error)]
pub enum SourceError {
    /// Token or site id not configured
    #[error("Missing NETLIFY_TOKEN or SITE_ID")]
    MissingCredentials,

    /// No form with the configured name on the site
    #[error("Form \"{0}\" not found")]
    FormNotFound(String),

    /// Network or transport failure
    #[error("Request failed: {0}")]
    Request(String),

    /// Upstream answered with an error status
    #[error("Upstream error {status}: {message}")]
    Status { status: u16, message: String },

    /// Upstream body was not the expected JSON
    #[error("Decode error: {0}")]
    Decode(String),

    /// Invalid local configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl SourceError {
    /// HTTP status reported to the caller for this failure
    pub fn status_code(&self) -> u16 {
        match self {
            SourceError::MissingCredentials | SourceError::Config(_) => 500,
            SourceError::FormNotFound(_) => 404,
            SourceError::Request(_) | SourceError::Status { .. } | SourceError::Decode(_) => 502,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes() {
        assert_eq!(SourceError::MissingCredentials.status_code(), 500);
        assert_eq!(SourceError::Config("bad".into()).status_code(), 500);
        assert_eq!(SourceError::FormNotFound("vote".into()).status_code(), 404);
        assert_eq!(SourceError::Request("reset".into()).status_code(), 502);
        assert_eq!(
            SourceError::Status { status: 401, message: String::new() }.status_code(),
            502
        );
        assert_eq!(SourceError::Decode("eof".into()).status_code(), 502);
    }

    #[test]
    fn messages() {
        assert_eq!(SourceError::FormNotFound("vote".into()).to_string(), "Form \"vote\" not found");
        assert_eq!(SourceError::MissingCredentials.to_string(), "Missing NETLIFY_TOKEN or SITE_ID");
    }
}
