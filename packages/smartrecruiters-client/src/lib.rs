//! Pure SmartRecruiters Posting API client.
//!
//! A minimal client for the public, unauthenticated SmartRecruiters Posting
//! API. Supports listing a company's postings and departments, and fetching
//! the full record behind a posting's `ref` link.
//!
//! # Example
//!
//! ```rust,ignore
//! use smartrecruiters_client::{PostingQuery, SmartRecruitersClient};
//!
//! let client = SmartRecruitersClient::new();
//!
//! let postings = client.fetch_postings("acme", &PostingQuery::new()).await?;
//! let detailed = client.fetch_posting_details(postings.content).await?;
//! for post in &detailed {
//!     println!("{}", post.name.as_deref().unwrap_or("(untitled)"));
//! }
//! ```

pub mod error;
pub mod id;
pub mod types;

pub use error::{IdError, Result, SmartRecruitersError};
pub use id::{normalize_id, RecordId};
pub use types::{
    Company, Department, DepartmentRef, Employee, ExperienceLevel, Function, Industry, JobAd,
    JobAdSection, JobAdSections, JobAdVideos, JobPost, ListResponse, Location, PostingQuery,
    TypeOfEmployment,
};

use futures::future::try_join_all;
use serde::de::DeserializeOwned;
use url::Url;

pub const BASE_URL: &str = "https://api.smartrecruiters.com/v1";

#[derive(Clone)]
pub struct SmartRecruitersClient {
    client: reqwest::Client,
    base_url: String,
}

impl Default for SmartRecruitersClient {
    fn default() -> Self {
        Self::new()
    }
}

impl SmartRecruitersClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: BASE_URL.to_string(),
        }
    }

    /// Set a custom base URL (for proxies and local test servers).
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Set a custom HTTP client.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// List a company's postings. `query` is forwarded verbatim; an empty
    /// query leaves filtering to the API's own defaults.
    pub async fn fetch_postings(
        &self,
        company_id: &str,
        query: &PostingQuery,
    ) -> Result<ListResponse<JobPost>> {
        let url = self.company_url(company_id, "postings")?;
        self.get_json(url.as_str(), Some(query)).await
    }

    /// List the postings of one department.
    pub async fn fetch_department_postings(
        &self,
        company_id: &str,
        department_id: &RecordId,
    ) -> Result<ListResponse<JobPost>> {
        self.fetch_postings(company_id, &PostingQuery::for_department(department_id))
            .await
    }

    /// List a company's departments.
    pub async fn fetch_departments(&self, company_id: &str) -> Result<ListResponse<Department>> {
        let url = self.company_url(company_id, "departments")?;
        self.get_json(url.as_str(), None).await
    }

    /// Fetch the full posting behind a summary's `ref` link.
    pub async fn fetch_posting_detail(&self, url: &str) -> Result<JobPost> {
        self.get_json(url, None).await
    }

    /// Replace every summary posting with its full record.
    ///
    /// All detail requests run at once. Output order matches input order.
    /// A single failure (or a posting without `ref`) fails the whole batch.
    pub async fn fetch_posting_details(&self, postings: Vec<JobPost>) -> Result<Vec<JobPost>> {
        tracing::debug!(count = postings.len(), "Fetching posting details");

        let requests = postings.iter().map(|post| async move {
            match post.reference.as_deref() {
                Some(url) => self.fetch_posting_detail(url).await,
                None => Err(SmartRecruitersError::MissingReference {
                    id: post.id.to_string(),
                }),
            }
        });

        try_join_all(requests).await
    }

    /// `{base}/companies/{company_id}/{resource}`, with the company id
    /// percent-encoded as a single path segment.
    fn company_url(&self, company_id: &str, resource: &str) -> Result<Url> {
        let mut url = Url::parse(&self.base_url)?;
        url.path_segments_mut()
            .map_err(|_| SmartRecruitersError::InvalidBaseUrl(self.base_url.clone()))?
            .pop_if_empty()
            .extend(["companies", company_id, resource]);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: Option<&PostingQuery>,
    ) -> Result<T> {
        tracing::debug!(url, "GET");

        let mut request = self.client.get(url);
        if let Some(query) = query.filter(|q| !q.is_empty()) {
            request = request.query(query);
        }

        let resp = request.send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            tracing::warn!(url, status = status.as_u16(), "SmartRecruiters request failed");
            return Err(SmartRecruitersError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = resp.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_company_url_encodes_identifier() {
        let client = SmartRecruitersClient::new();
        let url = client.company_url("acme corp/eu", "postings").unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.smartrecruiters.com/v1/companies/acme%20corp%2Feu/postings"
        );
    }

    #[test]
    fn test_company_url_tolerates_trailing_slash() {
        let client = SmartRecruitersClient::new().with_base_url("http://127.0.0.1:9000/v1/");
        let url = client.company_url("acme", "departments").unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:9000/v1/companies/acme/departments");
    }

    #[test]
    fn test_unusable_base_url_is_rejected() {
        let client = SmartRecruitersClient::new().with_base_url("not a url");
        assert!(matches!(
            client.company_url("acme", "postings"),
            Err(SmartRecruitersError::Url(_))
        ));

        let client = SmartRecruitersClient::new().with_base_url("mailto:jobs@example.com");
        assert!(matches!(
            client.company_url("acme", "postings"),
            Err(SmartRecruitersError::InvalidBaseUrl(_))
        ));
    }
}
