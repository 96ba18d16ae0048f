//! One synchronization run: fetch, join, emit.

use futures::future::try_join_all;
use smartrecruiters_client::{JobPost, PostingQuery};
use tracing::{debug, info};

use crate::config::SourceOptions;
use crate::error::{FetchStage, Result, SourceError};
use crate::join::{postings_for_department, PostingIndex};
use crate::nodes::emit_department;
use crate::traits::{BaseRecruitingApi, NodeSink};

/// Counts from a completed run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SyncReport {
    /// Department nodes emitted
    pub departments: usize,
    /// Job post nodes emitted
    pub job_posts: usize,
    /// Department-scoped postings skipped because the full listing lacked them
    pub unmatched: usize,
}

/// Fetch the full postings listing, replacing summaries with full records
/// when `fetch_details` is set.
pub async fn fetch_job_posts<A: BaseRecruitingApi + ?Sized>(
    api: &A,
    company_id: &str,
    query: &PostingQuery,
    fetch_details: bool,
) -> Result<Vec<JobPost>> {
    let postings = api
        .fetch_postings(company_id, query)
        .await
        .map_err(|source| SourceError::Fetch {
            stage: FetchStage::JobPosts,
            company: company_id.to_string(),
            source,
        })?;
    debug!(
        company = company_id,
        count = postings.content.len(),
        total_found = ?postings.total_found,
        "Fetched job post summaries"
    );

    if !fetch_details {
        return Ok(postings.content);
    }

    api.fetch_posting_details(postings.content)
        .await
        .map_err(|source| SourceError::Fetch {
            stage: FetchStage::PostingDetails,
            company: company_id.to_string(),
            source,
        })
}

/// Run a full sync against `sink`.
///
/// Departments and the full postings listing are fetched first; every
/// department's scoped listing is then fetched and joined concurrently.
/// Nodes are emitted only after all joins succeed, so any fetch error
/// leaves the sink untouched.
pub async fn source_nodes<A, S>(api: &A, sink: &S, options: &SourceOptions) -> Result<SyncReport>
where
    A: BaseRecruitingApi + ?Sized,
    S: NodeSink + ?Sized,
{
    options.validate()?;
    let company = options.company_identifier.as_str();
    info!(company, "Starting to fetch data from SmartRecruiters");

    let departments = api
        .fetch_departments(company)
        .await
        .map_err(|source| SourceError::Fetch {
            stage: FetchStage::Departments,
            company: company.to_string(),
            source,
        })?
        .content;
    let job_posts = fetch_job_posts(
        api,
        company,
        &options.job_posts_query(),
        options.fetch_details,
    )
    .await?;

    info!(
        company,
        job_posts = job_posts.len(),
        departments = departments.len(),
        "Fetched SmartRecruiters data"
    );

    let index = PostingIndex::new(job_posts);
    let joins = try_join_all(
        departments
            .iter()
            .map(|department| postings_for_department(api, company, &department.id, &index)),
    )
    .await?;

    let mut report = SyncReport {
        departments: departments.len(),
        ..SyncReport::default()
    };
    for (department, joined) in departments.iter().zip(joins) {
        report.unmatched += joined.missing.len();
        report.job_posts += emit_department(sink, department, &joined.matched)?;
    }

    info!(
        company,
        departments = report.departments,
        job_posts = report.job_posts,
        unmatched = report.unmatched,
        "SmartRecruiters nodes created"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{detail_url, job_post, MockRecruitingApi};

    #[tokio::test]
    async fn test_summaries_returned_without_detail_fetch() {
        let api = MockRecruitingApi::new().with_postings(vec![job_post(10), job_post(11)]);

        let posts = fetch_job_posts(&api, "acme", &PostingQuery::new(), false)
            .await
            .unwrap();

        assert_eq!(posts.len(), 2);
        assert!(api.detail_calls().is_empty());
    }

    #[tokio::test]
    async fn test_detail_fetch_replaces_every_summary() {
        let mut detail = job_post(10);
        detail.slug = Some("backend-engineer".to_string());
        let api = MockRecruitingApi::new()
            .with_posting(job_post(10))
            .with_detail(detail_url(10), detail);

        let posts = fetch_job_posts(&api, "acme", &PostingQuery::new(), true)
            .await
            .unwrap();

        assert_eq!(posts[0].slug.as_deref(), Some("backend-engineer"));
        assert_eq!(api.detail_calls(), vec![detail_url(10)]);
    }

    #[tokio::test]
    async fn test_detail_failure_is_a_fetch_error() {
        let api = MockRecruitingApi::new().with_posting(job_post(10));

        let err = fetch_job_posts(&api, "acme", &PostingQuery::new(), true)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            SourceError::Fetch {
                stage: FetchStage::PostingDetails,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_query_forwarded_to_full_listing() {
        let api = MockRecruitingApi::new();
        let query = PostingQuery::new().with_param("status", "PUBLIC");

        fetch_job_posts(&api, "acme", &query, false).await.unwrap();

        assert_eq!(api.postings_calls(), vec![query]);
    }
}
