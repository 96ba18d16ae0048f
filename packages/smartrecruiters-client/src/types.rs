use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::id::RecordId;

/// Wrapper for list endpoints (`/postings`, `/departments`).
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListResponse<T> {
    pub offset: Option<u64>,
    pub limit: Option<u64>,
    pub total_found: Option<u64>,
    pub content: Vec<T>,
}

/// A company department.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Department {
    pub id: RecordId,
    pub label: Option<String>,
    pub description: Option<String>,
    /// Keys this struct doesn't name, kept as received.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A job posting, either the summary form from `/postings` or the full
/// record behind its `ref` link.
///
/// Only the fields the plugin reads are typed. Everything else the API
/// sends lands in `extra` and is serialized back out unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPost {
    pub id: RecordId,
    pub uuid: Option<String>,
    pub name: Option<String>,
    pub ref_number: Option<String>,
    /// Kept as sent; see [`JobPost::released_at`].
    pub released_date: Option<String>,
    /// Absolute URL of the full posting.
    #[serde(rename = "ref")]
    pub reference: Option<String>,
    pub creator: Option<Employee>,
    pub company: Option<Company>,
    pub industry: Option<Industry>,
    pub department: Option<DepartmentRef>,
    pub function: Option<Function>,
    pub experience_level: Option<ExperienceLevel>,
    pub type_of_employment: Option<TypeOfEmployment>,
    pub location: Option<Location>,
    pub slug: Option<String>,
    pub apply_url: Option<String>,
    pub job_ad: Option<JobAd>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobPost {
    /// `releasedDate` as a timestamp. Accepts RFC 3339 or a bare
    /// `YYYY-MM-DD` (taken as midnight UTC); anything else is `None`.
    pub fn released_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.released_date.as_deref()?.trim();
        if let Ok(ts) = DateTime::parse_from_rfc3339(raw) {
            return Some(ts.with_timezone(&Utc));
        }
        NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .ok()
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .map(|ts| ts.and_utc())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub name: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Company {
    pub identifier: Option<RecordId>,
    pub name: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Industry {
    pub id: Option<RecordId>,
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Department reference embedded in a posting.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepartmentRef {
    pub id: Option<RecordId>,
    pub label: Option<String>,
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Function {
    pub id: Option<RecordId>,
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExperienceLevel {
    pub id: Option<RecordId>,
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeOfEmployment {
    pub id: Option<RecordId>,
    pub label: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub id: Option<RecordId>,
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub remote: Option<bool>,
    pub address: Option<String>,
    pub postal_code: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAd {
    pub sections: Option<JobAdSections>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobAdSections {
    pub company_description: Option<JobAdSection>,
    pub job_description: Option<JobAdSection>,
    pub qualifications: Option<JobAdSection>,
    pub additional_information: Option<JobAdSection>,
    pub videos: Option<JobAdVideos>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAdSection {
    pub title: Option<String>,
    pub text: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobAdVideos {
    pub title: Option<String>,
    #[serde(default)]
    pub urls: Vec<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Query parameters for the `/postings` endpoint, forwarded verbatim.
///
/// Host options may carry numbers or booleans (`limit: 100`); scalars are
/// stringified on the way in, nested values are rejected.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PostingQuery(BTreeMap<String, String>);

impl PostingQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query restricted to one department.
    pub fn for_department(department_id: &RecordId) -> Self {
        Self::new().with_param("department", department_id.as_str())
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<'de> Deserialize<'de> for PostingQuery {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = BTreeMap::<String, Value>::deserialize(deserializer)?;
        let mut params = BTreeMap::new();
        for (key, value) in raw {
            let value = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                other => {
                    return Err(serde::de::Error::custom(format!(
                        "query parameter `{}` must be a scalar, got {}",
                        key, other
                    )))
                }
            };
            params.insert(key, value);
        }
        Ok(Self(params))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for PostingQuery {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self(
            iter.into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_summary_posting_deserializes() {
        let raw = json!({
            "id": 743999716482941u64,
            "uuid": "c7f4b1f2-0000-4000-8000-000000000001",
            "name": "Backend Engineer",
            "refNumber": "REF42",
            "releasedDate": "2020-03-12T10:33:22.000Z",
            "ref": "https://api.smartrecruiters.com/v1/companies/acme/postings/743999716482941",
            "company": { "identifier": "acme", "name": "Acme" },
            "location": { "city": "Berlin", "country": "de", "remote": true },
            "department": { "id": 12, "label": "Engineering" },
            "typeOfEmployment": { "id": "permanent", "label": "Full-time" }
        });

        let post: JobPost = serde_json::from_value(raw).unwrap();
        assert_eq!(post.id.as_str(), "743999716482941");
        assert_eq!(post.company.unwrap().identifier.unwrap().as_str(), "acme");
        assert_eq!(post.department.unwrap().id.unwrap().as_str(), "12");
        assert_eq!(post.location.unwrap().remote, Some(true));
        assert!(post.job_ad.is_none());
        assert_eq!(post.type_of_employment.unwrap().id.unwrap().as_str(), "permanent");
    }

    #[test]
    fn test_unknown_fields_survive_a_round_trip() {
        let raw = json!({
            "id": 10,
            "name": "Backend Engineer",
            "language": { "code": "en", "label": "English" },
            "customField": [{ "fieldId": "team", "valueLabel": "Platform" }],
            "visibility": "PUBLIC",
            "company": { "identifier": "acme", "name": "Acme", "logo": "acme.png" },
            "typeOfEmployment": { "id": "permanent", "label": "Full-time" }
        });

        let post: JobPost = serde_json::from_value(raw).unwrap();
        assert_eq!(post.extra["visibility"], json!("PUBLIC"));

        let out = serde_json::to_value(&post).unwrap();
        assert_eq!(out["id"], json!("10"));
        assert_eq!(out["language"]["code"], json!("en"));
        assert_eq!(out["customField"][0]["valueLabel"], json!("Platform"));
        assert_eq!(out["company"]["identifier"], json!("acme"));
        assert_eq!(out["company"]["logo"], json!("acme.png"));
        assert!(out["company"].get("id").is_none());
        assert_eq!(out["typeOfEmployment"]["id"], json!("permanent"));
    }

    #[test]
    fn test_released_date_is_parsed_leniently() {
        let post: JobPost =
            serde_json::from_value(json!({ "id": 10, "releasedDate": "2020-03-12" })).unwrap();
        assert_eq!(post.released_date.as_deref(), Some("2020-03-12"));
        assert_eq!(
            post.released_at().unwrap().to_rfc3339(),
            "2020-03-12T00:00:00+00:00"
        );

        let post: JobPost = serde_json::from_value(
            json!({ "id": 10, "releasedDate": "2020-03-12T10:33:22.000Z" }),
        )
        .unwrap();
        assert_eq!(
            post.released_at().unwrap().to_rfc3339(),
            "2020-03-12T10:33:22+00:00"
        );

        let post: JobPost =
            serde_json::from_value(json!({ "id": 10, "releasedDate": "last tuesday" })).unwrap();
        assert_eq!(post.released_date.as_deref(), Some("last tuesday"));
        assert!(post.released_at().is_none());
    }

    #[test]
    fn test_detail_posting_keeps_job_ad_sections() {
        let raw = json!({
            "id": "1",
            "jobAd": {
                "sections": {
                    "jobDescription": { "title": "Job Description", "text": "<p>Build things</p>" },
                    "videos": { "title": "Videos", "urls": ["https://video.example/1"] }
                }
            }
        });

        let post: JobPost = serde_json::from_value(raw).unwrap();
        let sections = post.job_ad.unwrap().sections.unwrap();
        assert_eq!(
            sections.job_description.unwrap().text.as_deref(),
            Some("<p>Build things</p>")
        );
        assert_eq!(sections.videos.unwrap().urls.len(), 1);
        assert!(sections.qualifications.is_none());
    }

    #[test]
    fn test_posting_without_id_is_rejected() {
        let result = serde_json::from_value::<JobPost>(json!({ "name": "No id" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_posting_query_stringifies_scalars() {
        let query: PostingQuery =
            serde_json::from_value(json!({ "limit": 100, "status": "PUBLIC", "remote": true }))
                .unwrap();
        assert_eq!(query.get("limit"), Some("100"));
        assert_eq!(query.get("status"), Some("PUBLIC"));
        assert_eq!(query.get("remote"), Some("true"));

        let nested = serde_json::from_value::<PostingQuery>(json!({ "q": ["a"] }));
        assert!(nested.is_err());
    }
}
