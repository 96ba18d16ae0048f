// Seams between the plugin and the outside world.
//
// BaseRecruitingApi is the upstream (SmartRecruiters), NodeSink is the host
// content graph. Both are passed in explicitly so hosts and tests can swap
// them.

use async_trait::async_trait;
use smartrecruiters_client::{
    Department, JobPost, ListResponse, PostingQuery, Result as ClientResult,
    SmartRecruitersClient,
};

use crate::error::HostError;
use crate::nodes::Node;

// =============================================================================
// Upstream API
// =============================================================================

#[async_trait]
pub trait BaseRecruitingApi: Send + Sync {
    async fn fetch_departments(&self, company_id: &str) -> ClientResult<ListResponse<Department>>;

    /// List postings; `query` is forwarded verbatim.
    async fn fetch_postings(
        &self,
        company_id: &str,
        query: &PostingQuery,
    ) -> ClientResult<ListResponse<JobPost>>;

    /// Fetch the full record behind one posting's `ref` link.
    async fn fetch_posting_detail(&self, url: &str) -> ClientResult<JobPost>;

    /// Replace each summary posting with its full record, all or nothing.
    async fn fetch_posting_details(&self, postings: Vec<JobPost>) -> ClientResult<Vec<JobPost>>;
}

#[async_trait]
impl BaseRecruitingApi for SmartRecruitersClient {
    async fn fetch_departments(&self, company_id: &str) -> ClientResult<ListResponse<Department>> {
        SmartRecruitersClient::fetch_departments(self, company_id).await
    }

    async fn fetch_postings(
        &self,
        company_id: &str,
        query: &PostingQuery,
    ) -> ClientResult<ListResponse<JobPost>> {
        SmartRecruitersClient::fetch_postings(self, company_id, query).await
    }

    async fn fetch_posting_detail(&self, url: &str) -> ClientResult<JobPost> {
        SmartRecruitersClient::fetch_posting_detail(self, url).await
    }

    async fn fetch_posting_details(&self, postings: Vec<JobPost>) -> ClientResult<Vec<JobPost>> {
        SmartRecruitersClient::fetch_posting_details(self, postings).await
    }
}

// =============================================================================
// Host content graph
// =============================================================================

pub trait NodeSink: Send + Sync {
    /// Register one node. The sink does not check id uniqueness for us.
    fn create_node(&self, node: Node) -> Result<(), HostError>;

    /// Register GraphQL type definitions.
    fn create_types(&self, type_defs: &str) -> Result<(), HostError>;
}
