//! Department to job post join.
//!
//! The department-scoped listing only tells us *which* postings belong to a
//! department. The records attached to the department node come from the
//! full listing, looked up by normalized id.

use smartrecruiters_client::{JobPost, PostingQuery, RecordId};
use std::collections::HashMap;
use tracing::debug;

use crate::error::{Result, SourceError};
use crate::traits::BaseRecruitingApi;

/// Full postings keyed by id. Built once per sync and shared read-only
/// across all departments.
#[derive(Debug, Clone, Default)]
pub struct PostingIndex {
    by_id: HashMap<RecordId, JobPost>,
}

/// Outcome of joining one department-scoped listing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Joined {
    /// Full postings, in department-scoped order.
    pub matched: Vec<JobPost>,
    /// Scoped ids with no counterpart in the full listing.
    pub missing: Vec<RecordId>,
}

impl PostingIndex {
    /// Index the full listing. On duplicate ids the later record wins.
    pub fn new(postings: Vec<JobPost>) -> Self {
        let by_id = postings
            .into_iter()
            .map(|post| (post.id.clone(), post))
            .collect();
        Self { by_id }
    }

    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }

    pub fn get(&self, id: &RecordId) -> Option<&JobPost> {
        self.by_id.get(id)
    }

    pub fn join(&self, scoped: &[JobPost]) -> Joined {
        let mut joined = Joined::default();
        for post in scoped {
            match self.by_id.get(&post.id) {
                Some(full) => joined.matched.push(full.clone()),
                None => joined.missing.push(post.id.clone()),
            }
        }
        joined
    }
}

/// Fetch one department's postings and join them against the full listing.
pub async fn postings_for_department<A: BaseRecruitingApi + ?Sized>(
    api: &A,
    company_id: &str,
    department_id: &RecordId,
    index: &PostingIndex,
) -> Result<Joined> {
    let scoped = api
        .fetch_postings(company_id, &PostingQuery::for_department(department_id))
        .await
        .map_err(|source| SourceError::DepartmentPostings {
            department_id: department_id.to_string(),
            source,
        })?;

    let joined = index.join(&scoped.content);
    if !joined.missing.is_empty() {
        debug!(
            department_id = %department_id,
            missing = ?joined.missing,
            "Skipping department postings absent from the full listing"
        );
    }

    Ok(joined)
}
