//! Typed errors for the source plugin.
//!
//! Every failure that used to end the host process is surfaced here
//! instead, so the host decides whether to abort the build.

use smartrecruiters_client::SmartRecruitersError;
use std::fmt;
use thiserror::Error;

/// Boxed error returned by host callbacks.
pub type HostError = Box<dyn std::error::Error + Send + Sync>;

/// Which top-level fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStage {
    Departments,
    JobPosts,
    PostingDetails,
}

impl fmt::Display for FetchStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            FetchStage::Departments => "departments",
            FetchStage::JobPosts => "job posts",
            FetchStage::PostingDetails => "posting details",
        };
        f.write_str(stage)
    }
}

#[derive(Debug, Error)]
pub enum SourceError {
    /// Departments or the full postings list could not be fetched.
    /// Nothing has been emitted when this is returned.
    #[error("failed to fetch {stage} for company {company}: {source}")]
    Fetch {
        stage: FetchStage,
        company: String,
        #[source]
        source: SmartRecruitersError,
    },

    /// A department-scoped postings list could not be fetched.
    #[error("failed to fetch job posts for department {department_id}: {source}")]
    DepartmentPostings {
        department_id: String,
        #[source]
        source: SmartRecruitersError,
    },

    /// The host rejected a node or the type definitions.
    #[error("host rejected {what}: {source}")]
    Host {
        what: String,
        #[source]
        source: HostError,
    },

    /// Record could not be turned into node content
    #[error("JSON serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// Invalid or missing plugin options
    #[error("config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, SourceError>;
