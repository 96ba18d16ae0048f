//! Testing utilities: a scripted upstream API and record fixtures.
//!
//! Lets hosts and tests run a full sync without touching the network.

use async_trait::async_trait;
use futures::future::try_join_all;
use serde_json::Map;
use smartrecruiters_client::{
    Department, JobPost, ListResponse, PostingQuery, RecordId, Result as ClientResult,
    SmartRecruitersError,
};
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use crate::traits::BaseRecruitingApi;

/// Base URL used for fixture `ref` links.
pub const FIXTURE_BASE_URL: &str = "https://api.smartrecruiters.com/v1/companies/test/postings";

/// Department fixture with a numeric source id.
pub fn department(id: u64, label: &str) -> Department {
    Department {
        id: RecordId::from(id),
        label: Some(label.to_string()),
        description: None,
        extra: Map::new(),
    }
}

/// Summary posting fixture named `Job {id}` with a `ref` link.
pub fn job_post(id: u64) -> JobPost {
    JobPost {
        id: RecordId::from(id),
        uuid: None,
        name: Some(format!("Job {}", id)),
        ref_number: None,
        released_date: None,
        reference: Some(detail_url(id)),
        creator: None,
        company: None,
        industry: None,
        department: None,
        function: None,
        experience_level: None,
        type_of_employment: None,
        location: None,
        slug: None,
        apply_url: None,
        job_ad: None,
        extra: Map::new(),
    }
}

pub fn detail_url(id: u64) -> String {
    format!("{}/{}", FIXTURE_BASE_URL, id)
}

fn list<T>(content: Vec<T>) -> ListResponse<T> {
    ListResponse {
        offset: Some(0),
        limit: Some(100),
        total_found: Some(content.len() as u64),
        content,
    }
}

fn server_error(what: &str) -> SmartRecruitersError {
    SmartRecruitersError::Api {
        status: 500,
        message: format!("scripted failure: {}", what),
    }
}

/// Scripted [`BaseRecruitingApi`].
///
/// - full listing: postings added with `with_posting(s)`
/// - `department={id}` listing: postings added with `with_department_postings`
/// - detail responses: keyed by `ref` URL, added with `with_detail`
#[derive(Default, Clone)]
pub struct MockRecruitingApi {
    departments: Arc<RwLock<Vec<Department>>>,
    postings: Arc<RwLock<Vec<JobPost>>>,
    department_postings: Arc<RwLock<HashMap<String, Vec<JobPost>>>>,
    details: Arc<RwLock<HashMap<String, JobPost>>>,
    failing_departments: Arc<RwLock<HashSet<String>>>,
    fail_departments_fetch: bool,
    fail_postings_fetch: bool,

    /// Call tracking for assertions
    postings_calls: Arc<RwLock<Vec<PostingQuery>>>,
    detail_calls: Arc<RwLock<Vec<String>>>,
}

impl MockRecruitingApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_department(self, department: Department) -> Self {
        self.departments.write().unwrap().push(department);
        self
    }

    pub fn with_posting(self, posting: JobPost) -> Self {
        self.postings.write().unwrap().push(posting);
        self
    }

    pub fn with_postings(self, postings: Vec<JobPost>) -> Self {
        self.postings.write().unwrap().extend(postings);
        self
    }

    pub fn with_department_postings(self, department_id: u64, postings: Vec<JobPost>) -> Self {
        self.department_postings
            .write()
            .unwrap()
            .insert(department_id.to_string(), postings);
        self
    }

    /// Full record returned for the posting whose `ref` is `url`.
    pub fn with_detail(self, url: impl Into<String>, posting: JobPost) -> Self {
        self.details.write().unwrap().insert(url.into(), posting);
        self
    }

    pub fn fail_departments(mut self) -> Self {
        self.fail_departments_fetch = true;
        self
    }

    /// Fail the full (unscoped) postings listing.
    pub fn fail_postings(mut self) -> Self {
        self.fail_postings_fetch = true;
        self
    }

    /// Fail the scoped listing for one department.
    pub fn fail_department(self, department_id: u64) -> Self {
        self.failing_departments
            .write()
            .unwrap()
            .insert(department_id.to_string());
        self
    }

    /// Queries passed to `fetch_postings`, in call order.
    pub fn postings_calls(&self) -> Vec<PostingQuery> {
        self.postings_calls.read().unwrap().clone()
    }

    /// Detail URLs requested.
    pub fn detail_calls(&self) -> Vec<String> {
        self.detail_calls.read().unwrap().clone()
    }
}

#[async_trait]
impl BaseRecruitingApi for MockRecruitingApi {
    async fn fetch_departments(&self, _company_id: &str) -> ClientResult<ListResponse<Department>> {
        if self.fail_departments_fetch {
            return Err(server_error("departments"));
        }
        Ok(list(self.departments.read().unwrap().clone()))
    }

    async fn fetch_postings(
        &self,
        _company_id: &str,
        query: &PostingQuery,
    ) -> ClientResult<ListResponse<JobPost>> {
        self.postings_calls.write().unwrap().push(query.clone());

        match query.get("department") {
            Some(department_id) => {
                if self.failing_departments.read().unwrap().contains(department_id) {
                    return Err(server_error("department postings"));
                }
                let postings = self
                    .department_postings
                    .read()
                    .unwrap()
                    .get(department_id)
                    .cloned()
                    .unwrap_or_default();
                Ok(list(postings))
            }
            None => {
                if self.fail_postings_fetch {
                    return Err(server_error("postings"));
                }
                Ok(list(self.postings.read().unwrap().clone()))
            }
        }
    }

    async fn fetch_posting_detail(&self, url: &str) -> ClientResult<JobPost> {
        self.detail_calls.write().unwrap().push(url.to_string());

        let detail = self.details.read().unwrap().get(url).cloned();
        detail.ok_or_else(|| SmartRecruitersError::Api {
            status: 404,
            message: format!("no detail scripted for {}", url),
        })
    }

    async fn fetch_posting_details(&self, postings: Vec<JobPost>) -> ClientResult<Vec<JobPost>> {
        try_join_all(postings.iter().map(|posting| async move {
            match posting.reference.as_deref() {
                Some(url) => self.fetch_posting_detail(url).await,
                None => Err(SmartRecruitersError::MissingReference {
                    id: posting.id.to_string(),
                }),
            }
        }))
        .await
    }
}
