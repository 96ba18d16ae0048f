//! SmartRecruiters source plugin for content-graph site generators.
//!
//! Fetches a company's departments and job postings from the SmartRecruiters
//! Posting API and registers them as `SmartRecruitersDepartment` and
//! `SmartRecruitersJobPost` nodes, each job post a child of its department.
//!
//! # Usage
//!
//! ```rust,ignore
//! use smartrecruiters_client::SmartRecruitersClient;
//! use source_smartrecruiters::{declare_schema, source_nodes, MemoryGraph, SourceOptions};
//!
//! let graph = MemoryGraph::new();
//! declare_schema(&graph)?;
//!
//! let options = SourceOptions::new("acme").with_fetch_details(true);
//! let report = source_nodes(&SmartRecruitersClient::new(), &graph, &options).await?;
//! println!("{} departments, {} job posts", report.departments, report.job_posts);
//! ```
//!
//! # Modules
//!
//! - [`traits`] - Upstream API and host graph seams
//! - [`sync`] - Fetch, join and emit in one run
//! - [`join`] - Department to job post join
//! - [`nodes`] - Node construction and emission
//! - [`schema`] - GraphQL type definitions
//! - [`testing`] - Scripted API and fixtures

pub mod config;
pub mod error;
pub mod graph;
pub mod join;
pub mod nodes;
pub mod schema;
pub mod sync;
pub mod testing;
pub mod traits;

pub use config::{PluginOptions, SourceOptions};
pub use error::{FetchStage, HostError, Result, SourceError};
pub use graph::MemoryGraph;
pub use join::{postings_for_department, Joined, PostingIndex};
pub use nodes::{
    department_node, emit_department, emit_job_post, job_post_node, Node, NodeInternal,
    DEPARTMENT_TYPE, JOB_POST_TYPE,
};
pub use schema::{declare_schema, type_names, SCHEMA};
pub use sync::{fetch_job_posts, source_nodes, SyncReport};
pub use traits::{BaseRecruitingApi, NodeSink};

pub use smartrecruiters_client::{normalize_id, RecordId};
