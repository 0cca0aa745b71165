//! Blocking client for the form-submission API
//!
//! One fetch is three steps:
//!
//! 1. `GET /sites/{site}/forms`, keep the newest form with the configured name
//! 2. `GET /forms/{id}/submissions?per_page=N&page=P`, from page 1 until a
//!    short page or the page limit
//! 3. Convert each submission to a [`RawRecord`]
//!
//! Nothing is retried; a failure is reported to the caller, who maps it to a
//! response status.

use votecurve_core::{RawRecord, SampleSource};

use crate::{
    api::{decode_forms, decode_submissions, latest_form, Form, Submission},
    config::SourceConfig,
    SourceError,
};

/// Submission reader using a lightweight ureq agent
pub struct FormsClient {
    config: SourceConfig,
    agent: ureq::Agent,
    auth: String,
    site_id: String,
}

impl FormsClient {
    /// Validate `config` and build the agent
    pub fn new(config: SourceConfig) -> Result<Self, SourceError> {
        config.validate()?;
        let (token, site_id) = config.credentials()?;
        let auth = format!("Bearer {token}");
        let site_id = site_id.to_string();

        let agent = ureq::AgentBuilder::new()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build();

        Ok(Self {
            config,
            agent,
            auth,
            site_id,
        })
    }

    /// Client configured from the process environment
    pub fn from_env() -> Result<Self, SourceError> {
        Self::new(SourceConfig::from_env())
    }

    /// Active configuration
    pub fn config(&self) -> &SourceConfig {
        &self.config
    }

    /// Every form on the site
    pub fn forms(&self) -> Result<Vec<Form>, SourceError> {
        let url = format!("{}/sites/{}/forms", self.config.base_url, self.site_id);
        decode_forms(&self.get(&url)?)
    }

    /// The newest form with the configured name
    pub fn find_form(&self) -> Result<Form, SourceError> {
        let forms = self.forms()?;
        latest_form(&forms, &self.config.form_name)
            .cloned()
            .ok_or_else(|| SourceError::FormNotFound(self.config.form_name.clone()))
    }

    /// All submissions of `form_id`, up to the page limit
    pub fn submissions(&self, form_id: &str) -> Result<Vec<Submission>, SourceError> {
        let mut all = Vec::new();

        for page in 1..=self.config.max_pages {
            let url = submissions_url(&self.config, form_id, page);
            let batch = decode_submissions(&self.get(&url)?)?;
            let len = batch.len();
            log::debug!("page {page} of form {form_id}: {len} submissions");

            all.extend(batch);
            if len < self.config.per_page {
                return Ok(all);
            }
        }

        log::warn!(
            "stopped after {} pages ({} submissions); older votes are not included",
            self.config.max_pages,
            all.len()
        );
        Ok(all)
    }

    fn get(&self, url: &str) -> Result<String, SourceError> {
        let response = self
            .agent
            .get(url)
            .set("Authorization", &self.auth)
            .set("Accept", "application/json")
            .call();

        match response {
            Ok(resp) => resp.into_string().map_err(|e| SourceError::Request(e.to_string())),
            Err(ureq::Error::Status(status, resp)) => {
                log::warn!("{url} answered {status}");
                Err(SourceError::Status {
                    status,
                    message: resp.into_string().unwrap_or_default(),
                })
            }
            Err(ureq::Error::Transport(e)) => {
                log::warn!("{url} unreachable: {e}");
                Err(SourceError::Request(e.to_string()))
            }
        }
    }
}

impl SampleSource for FormsClient {
    type Error = SourceError;

    fn fetch(&self) -> Result<Vec<RawRecord>, Self::Error> {
        let form = self.find_form()?;
        let records = self
            .submissions(&form.id)?
            .into_iter()
            .map(Submission::into_record)
            .collect();
        Ok(records)
    }
}

fn submissions_url(config: &SourceConfig, form_id: &str, page: usize) -> String {
    format!(
        "{}/forms/{}/submissions?per_page={}&page={}",
        config.base_url, form_id, config.per_page, page
    )
}
