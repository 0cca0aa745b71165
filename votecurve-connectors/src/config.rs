//! Submission source configuration
//!
//! Credentials are never hard-coded: [`SourceConfig::from_env`] reads
//! `NETLIFY_TOKEN` and `SITE_ID`, falling back to `MY_SITE_ID` when the
//! platform does not inject the site id itself.

use std::time::Duration;

use crate::SourceError;

/// Public API root
pub const DEFAULT_BASE_URL: &str = "https://api.netlify.com/api/v1";

/// Name of the form collecting votes
pub const DEFAULT_FORM_NAME: &str = "vote";

/// Largest page the API serves
pub const DEFAULT_PER_PAGE: usize = 1000;

/// Pages fetched before giving up on older submissions
pub const DEFAULT_MAX_PAGES: usize = 20;

/// Environment variable holding the bearer token
pub const TOKEN_VAR: &str = "NETLIFY_TOKEN";

/// Site id variables, in lookup order
pub const SITE_ID_VARS: [&str; 2] = ["SITE_ID", "MY_SITE_ID"];

/// Where submissions live and how to read them
#[derive(Clone)]
pub struct SourceConfig {
    /// API root, without trailing slash
    pub base_url: String,
    /// Bearer token
    pub token: Option<String>,
    /// Site owning the form
    pub site_id: Option<String>,
    /// Form name; the most recently created match wins
    pub form_name: String,
    /// Submissions per page
    pub per_page: usize,
    /// Upper bound on pages per fetch
    pub max_pages: usize,
    /// Per-request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl core::fmt::Debug for SourceConfig {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("SourceConfig")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("site_id", &self.site_id)
            .field("form_name", &self.form_name)
            .field("per_page", &self.per_page)
            .field("max_pages", &self.max_pages)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.into(),
            token: None,
            site_id: None,
            form_name: DEFAULT_FORM_NAME.into(),
            per_page: DEFAULT_PER_PAGE,
            max_pages: DEFAULT_MAX_PAGES,
            timeout: Duration::from_secs(30),
            user_agent: format!("votecurve/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SourceConfig {
    /// Defaults, no credentials
    pub fn new() -> Self {
        Self::default()
    }

    /// Read credentials from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read credentials through `lookup`; empty values count as unset
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        Self {
            token: non_empty(TOKEN_VAR),
            site_id: SITE_ID_VARS.iter().find_map(|&key| non_empty(key)),
            ..Self::default()
        }
    }

    /// Set the API root
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the bearer token
    pub fn token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the site id
    pub fn site_id(mut self, site_id: impl Into<String>) -> Self {
        self.site_id = Some(site_id.into());
        self
    }

    /// Set the form name
    pub fn form_name(mut self, name: impl Into<String>) -> Self {
        self.form_name = name.into();
        self
    }

    /// Set the page size
    pub fn per_page(mut self, per_page: usize) -> Self {
        self.per_page = per_page;
        self
    }

    /// Set the page limit
    pub fn max_pages(mut self, max_pages: usize) -> Self {
        self.max_pages = max_pages;
        self
    }

    /// Set request timeout in seconds
    pub fn timeout_secs(mut self, secs: u64) -> Self {
        self.timeout = Duration::from_secs(secs);
        self
    }

    /// Token and site id, or [`SourceError::MissingCredentials`]
    pub fn credentials(&self) -> Result<(&str, &str), SourceError> {
        match (self.token.as_deref(), self.site_id.as_deref()) {
            (Some(token), Some(site)) => Ok((token, site)),
            _ => Err(SourceError::MissingCredentials),
        }
    }

    /// Check everything but the credentials
    pub fn validate(&self) -> Result<(), SourceError> {
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(SourceError::Config("Base URL must start with http:// or https://".into()));
        }
        if self.form_name.is_empty() {
            return Err(SourceError::Config("Form name must not be empty".into()));
        }
        if !(1..=DEFAULT_PER_PAGE).contains(&self.per_page) {
            return Err(SourceError::Config(format!("per_page must be in 1..={DEFAULT_PER_PAGE}")));
        }
        if self.max_pages == 0 {
            return Err(SourceError::Config("max_pages must be at least 1".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect();
        move |key: &str| map.get(key).cloned()
    }

    #[test]
    fn config_builder() {
        let config = SourceConfig::new()
            .base_url("https://api.example.com/v1/")
            .token("secret")
            .site_id("site-1")
            .form_name("poll")
            .per_page(100)
            .max_pages(3)
            .timeout_secs(5);

        assert_eq!(config.base_url, "https://api.example.com/v1");
        assert_eq!(config.credentials().unwrap(), ("secret", "site-1"));
        assert_eq!(config.form_name, "poll");
        assert_eq!(config.per_page, 100);
        assert_eq!(config.max_pages, 3);
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn env_lookup_prefers_site_id() {
        let config = SourceConfig::from_lookup(lookup(&[
            ("NETLIFY_TOKEN", "t"),
            ("SITE_ID", "primary"),
            ("MY_SITE_ID", "fallback"),
        ]));
        assert_eq!(config.credentials().unwrap(), ("t", "primary"));
    }

    #[test]
    fn env_lookup_falls_back_to_my_site_id() {
        let config = SourceConfig::from_lookup(lookup(&[
            ("NETLIFY_TOKEN", "t"),
            ("SITE_ID", " "),
            ("MY_SITE_ID", "fallback"),
        ]));
        assert_eq!(config.site_id.as_deref(), Some("fallback"));
    }

    #[test]
    fn missing_credentials() {
        let config = SourceConfig::from_lookup(lookup(&[("SITE_ID", "s")]));
        assert!(matches!(config.credentials(), Err(SourceError::MissingCredentials)));
        assert!(matches!(SourceConfig::new().credentials(), Err(SourceError::MissingCredentials)));
    }

    #[test]
    fn validation() {
        assert!(SourceConfig::new().validate().is_ok());
        assert!(SourceConfig::new().base_url("ftp://x").validate().is_err());
        assert!(SourceConfig::new().per_page(0).validate().is_err());
        assert!(SourceConfig::new().per_page(5000).validate().is_err());
        assert!(SourceConfig::new().max_pages(0).validate().is_err());
        assert!(SourceConfig::new().form_name("").validate().is_err());
    }

    #[test]
    fn debug_redacts_token() {
        let rendered = format!("{:?}", SourceConfig::new().token("hunter2"));
        assert!(!rendered.contains("hunter2"));
        assert!(rendered.contains("<redacted>"));
    }
}
