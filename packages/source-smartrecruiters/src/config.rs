use dotenvy::dotenv;
use serde::Deserialize;
use smartrecruiters_client::PostingQuery;
use std::env;

use crate::error::{Result, SourceError};

pub const ENV_COMPANY_IDENTIFIER: &str = "SMARTRECRUITERS_COMPANY_IDENTIFIER";
pub const ENV_FETCH_DETAILS: &str = "SMARTRECRUITERS_FETCH_DETAILS";
pub const ENV_JOB_POSTS: &str = "SMARTRECRUITERS_JOB_POSTS";

/// Options the host passes to the plugin, in the host's camelCase form:
///
/// ```json
/// { "companyIdentifier": "acme", "pluginOptions": { "jobPosts": { "limit": 100 } }, "fetchDetails": true }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceOptions {
    pub company_identifier: String,
    #[serde(default)]
    pub plugin_options: Option<PluginOptions>,
    #[serde(default)]
    pub fetch_details: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginOptions {
    /// Forwarded verbatim to the postings endpoint.
    #[serde(default)]
    pub job_posts: Option<PostingQuery>,
}

impl SourceOptions {
    pub fn new(company_identifier: impl Into<String>) -> Self {
        Self {
            company_identifier: company_identifier.into(),
            ..Default::default()
        }
    }

    pub fn with_fetch_details(mut self, fetch_details: bool) -> Self {
        self.fetch_details = fetch_details;
        self
    }

    pub fn with_job_posts(mut self, query: PostingQuery) -> Self {
        self.plugin_options = Some(PluginOptions {
            job_posts: Some(query),
        });
        self
    }

    /// Query for the full postings fetch. Empty unless the host set one.
    pub fn job_posts_query(&self) -> PostingQuery {
        self.plugin_options
            .as_ref()
            .and_then(|o| o.job_posts.clone())
            .unwrap_or_default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.company_identifier.trim().is_empty() {
            return Err(SourceError::Config(
                "companyIdentifier must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Load options from environment variables (and `.env` if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Like [`SourceOptions::from_env`], but `company` (when given) takes
    /// the place of `SMARTRECRUITERS_COMPANY_IDENTIFIER`. The other
    /// variables still apply.
    pub fn from_env_with_company(company: Option<String>) -> Result<Self> {
        let _ = dotenv();
        Self::from_lookup(company_override(company, |key| env::var(key).ok()))
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let company_identifier = lookup(ENV_COMPANY_IDENTIFIER)
            .ok_or_else(|| SourceError::Config(format!("{} must be set", ENV_COMPANY_IDENTIFIER)))?;

        let fetch_details = match lookup(ENV_FETCH_DETAILS) {
            Some(raw) => parse_bool(&raw).ok_or_else(|| {
                SourceError::Config(format!("{} must be true or false", ENV_FETCH_DETAILS))
            })?,
            None => false,
        };

        let mut options = Self::new(company_identifier).with_fetch_details(fetch_details);
        if let Some(raw) = lookup(ENV_JOB_POSTS) {
            options = options.with_job_posts(parse_query(&raw));
        }

        options.validate()?;
        Ok(options)
    }
}

fn company_override(
    company: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> impl Fn(&str) -> Option<String> {
    move |key: &str| match (&company, key) {
        (Some(company), ENV_COMPANY_IDENTIFIER) => Some(company.clone()),
        _ => lookup(key),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Some(true),
        "0" | "false" | "no" | "" => Some(false),
        _ => None,
    }
}

/// Parse `status=PUBLIC&limit=100` into a postings query.
pub fn parse_query(raw: &str) -> PostingQuery {
    url::form_urlencoded::parse(raw.trim_start_matches('?').as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Parse a single `key=value` pair.
pub fn parse_param(raw: &str) -> std::result::Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected key=value, got `{}`", raw)),
    }
}
