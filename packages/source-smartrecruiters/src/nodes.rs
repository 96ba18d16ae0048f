//! Host graph node construction and emission.

use serde::Serialize;
use serde_json::{Map, Value};
use sha2::{Digest, Sha256};
use smartrecruiters_client::{Department, JobPost};

use crate::error::{Result, SourceError};
use crate::traits::NodeSink;

pub const DEPARTMENT_TYPE: &str = "SmartRecruitersDepartment";
pub const JOB_POST_TYPE: &str = "SmartRecruitersJobPost";

/// A record as registered with the host graph.
///
/// Record fields are flattened next to the bookkeeping fields, so a job
/// post node serializes as `{ "id", "parent", "children", "internal",
/// "name", "location", ... }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: String,
    pub parent: Option<String>,
    pub children: Vec<String>,
    pub internal: NodeInternal,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeInternal {
    #[serde(rename = "type")]
    pub node_type: String,
    /// Serialized record.
    pub content: String,
    /// Hex SHA-256 of `content`.
    pub content_digest: String,
}

impl Node {
    pub fn node_type(&self) -> &str {
        &self.internal.node_type
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DepartmentRecord<'a> {
    #[serde(flatten)]
    department: &'a Department,
    job_posts: &'a [JobPost],
}

pub fn content_digest(content: &str) -> String {
    hex::encode(Sha256::digest(content.as_bytes()))
}

fn build_node<T: Serialize>(
    node_type: &str,
    id: String,
    record: &T,
    parent: Option<String>,
    children: Vec<String>,
) -> Result<Node> {
    let content = serde_json::to_string(record)?;
    let mut fields = match serde_json::to_value(record)? {
        Value::Object(map) => map,
        other => {
            let mut map = Map::new();
            map.insert("value".to_string(), other);
            map
        }
    };
    // The node id already carries it.
    fields.remove("id");

    Ok(Node {
        id,
        parent,
        children,
        internal: NodeInternal {
            node_type: node_type.to_string(),
            content_digest: content_digest(&content),
            content,
        },
        fields,
    })
}

/// Department node carrying its joined job posts; the job post node ids
/// are listed as children.
pub fn department_node(department: &Department, job_posts: &[JobPost]) -> Result<Node> {
    let children = job_posts.iter().map(|p| p.id.to_string()).collect();
    let record = DepartmentRecord {
        department,
        job_posts,
    };
    build_node(
        DEPARTMENT_TYPE,
        department.id.to_string(),
        &record,
        None,
        children,
    )
}

pub fn job_post_node(job_post: &JobPost, parent_id: &str) -> Result<Node> {
    build_node(
        JOB_POST_TYPE,
        job_post.id.to_string(),
        job_post,
        Some(parent_id.to_string()),
        Vec::new(),
    )
}

fn create<S: NodeSink + ?Sized>(sink: &S, node: Node) -> Result<()> {
    let what = format!("{} node {}", node.internal.node_type, node.id);
    sink.create_node(node)
        .map_err(|source| SourceError::Host { what, source })
}

/// Register one job post node under `parent_id`.
pub fn emit_job_post<S: NodeSink + ?Sized>(
    sink: &S,
    job_post: &JobPost,
    parent_id: &str,
) -> Result<()> {
    create(sink, job_post_node(job_post, parent_id)?)
}

/// Register a department node followed by one child node per job post.
/// Returns the number of job post nodes emitted.
pub fn emit_department<S: NodeSink + ?Sized>(
    sink: &S,
    department: &Department,
    job_posts: &[JobPost],
) -> Result<usize> {
    let node = department_node(department, job_posts)?;
    let parent_id = node.id.clone();
    create(sink, node)?;

    for job_post in job_posts {
        emit_job_post(sink, job_post, &parent_id)?;
    }

    Ok(job_posts.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{department, job_post};
    use serde_json::json;

    #[test]
    fn test_department_node_uses_normalized_id() {
        let node = department_node(&department(42, "Engineering"), &[]).unwrap();

        assert_eq!(node.id, "42");
        assert_eq!(node.node_type(), DEPARTMENT_TYPE);
        assert_eq!(node.parent, None);
        assert_eq!(node.field("label"), Some(&json!("Engineering")));
        assert_eq!(node.field("jobPosts"), Some(&json!([])));
        assert!(node.field("id").is_none());
    }

    #[test]
    fn test_department_node_lists_job_posts_as_children() {
        let posts = vec![job_post(10), job_post(11)];
        let node = department_node(&department(1, "Engineering"), &posts).unwrap();

        assert_eq!(node.children, vec!["10", "11"]);
        let embedded = node.field("jobPosts").unwrap().as_array().unwrap();
        assert_eq!(embedded[0]["id"], json!("10"));
    }

    #[test]
    fn test_job_post_node_points_at_parent() {
        let node = job_post_node(&job_post(10), "1").unwrap();

        assert_eq!(node.id, "10");
        assert_eq!(node.parent.as_deref(), Some("1"));
        assert_eq!(node.node_type(), JOB_POST_TYPE);
        assert!(node.field("ref").is_some());
    }

    #[test]
    fn test_digest_tracks_content() {
        let a = job_post_node(&job_post(10), "1").unwrap();
        let mut renamed = job_post(10);
        renamed.name = Some("Renamed".to_string());
        let b = job_post_node(&renamed, "1").unwrap();

        assert_eq!(a.internal.content_digest, content_digest(&a.internal.content));
        assert_eq!(a.internal.content_digest.len(), 64);
        assert_ne!(a.internal.content_digest, b.internal.content_digest);
    }

    #[test]
    fn test_node_serializes_flat_for_host() {
        let node = job_post_node(&job_post(10), "1").unwrap();
        let value = serde_json::to_value(&node).unwrap();

        assert_eq!(value["id"], json!("10"));
        assert_eq!(value["parent"], json!("1"));
        assert_eq!(value["internal"]["type"], json!(JOB_POST_TYPE));
        assert!(value["internal"]["contentDigest"].is_string());
        assert_eq!(value["name"], json!("Job 10"));
    }
}
