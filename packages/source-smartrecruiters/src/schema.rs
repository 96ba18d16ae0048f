//! GraphQL type definitions for every node shape the plugin emits.

use crate::error::{Result, SourceError};
use crate::traits::NodeSink;

pub const SCHEMA: &str = r#"
    type SmartRecruitersJobPost implements Node {
      id: ID!
      uuid: String
      name: String
      refNumber: String
      releasedDate: Date
      ref: String
      creator: SmartRecruitersEmployee
      company: SmartRecruitersCompany
      industry: SmartRecruitersIndustry
      department: SmartRecruitersDepartment
      function: SmartRecruitersFunction
      experienceLevel: SmartRecruitersExperienceLevel
      typeOfEmployment: SmartRecruitersTypeOfEmployment
      location: SmartRecruitersLocation
      slug: String
      applyUrl: String
      jobAd: SmartRecruitersJobAd
    }

    type SmartRecruitersEmployee implements Node {
      name: String
      avatarUrl: String
    }

    type SmartRecruitersCompany implements Node {
      id: ID!
      name: String
    }

    type SmartRecruitersIndustry implements Node {
      id: ID!
      label: String
    }

    type SmartRecruitersDepartment implements Node {
      id: ID!
      label: String
      description: String
    }

    type SmartRecruitersFunction implements Node {
      id: ID!
      label: String
    }

    type SmartRecruitersExperienceLevel implements Node {
      id: ID!
      label: String
    }

    type SmartRecruitersTypeOfEmployment implements Node {
      label: String
    }

    type SmartRecruitersLocation implements Node {
      id: ID!
      country: String
      region: String
      city: String
      remote: Boolean
      address: String
      postalCode: String
    }

    type SmartRecruitersJobAd implements Node {
      sections: SmartRecruitersJobAdSections
    }

    type SmartRecruitersJobAdSections implements Node {
      companyDescription: SmartRecruitersJobAdSection
      jobDescription: SmartRecruitersJobAdSection
      qualifications: SmartRecruitersJobAdSection
      additionalInformation: SmartRecruitersJobAdSection
      videos: SmartRecruitersJobAdVideos
    }

    type SmartRecruitersJobAdSection implements Node {
      title: String
      text: String
    }

    type SmartRecruitersJobAdVideos implements Node {
      title: String
      urls: [String]
    }
"#;

/// Names of the types declared in [`SCHEMA`], in declaration order.
pub fn type_names() -> Vec<&'static str> {
    SCHEMA
        .lines()
        .filter_map(|line| line.trim().strip_prefix("type "))
        .filter_map(|rest| rest.split_whitespace().next())
        .collect()
}

/// Register the type definitions with the host. Independent of any fetch.
pub fn declare_schema<S: NodeSink + ?Sized>(sink: &S) -> Result<()> {
    tracing::debug!(types = type_names().len(), "Declaring SmartRecruiters schema");
    sink.create_types(SCHEMA).map_err(|source| SourceError::Host {
        what: "type definitions".to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::MemoryGraph;
    use crate::nodes::{DEPARTMENT_TYPE, JOB_POST_TYPE};

    const SHAPES: [&str; 13] = [
        "JobPost",
        "Department",
        "Employee",
        "Company",
        "Industry",
        "Function",
        "ExperienceLevel",
        "TypeOfEmployment",
        "Location",
        "JobAd",
        "JobAdSections",
        "JobAdSection",
        "JobAdVideos",
    ];

    #[test]
    fn test_every_shape_declared_exactly_once() {
        let names = type_names();
        assert_eq!(names.len(), SHAPES.len());
        for shape in SHAPES {
            let full = format!("SmartRecruiters{}", shape);
            assert_eq!(
                names.iter().filter(|n| **n == full).count(),
                1,
                "{} should be declared once",
                full
            );
        }
    }

    #[test]
    fn test_emitted_node_types_are_declared() {
        let names = type_names();
        assert!(names.contains(&DEPARTMENT_TYPE));
        assert!(names.contains(&JOB_POST_TYPE));
    }

    fn declared_fields(type_name: &str) -> Vec<&'static str> {
        let header = format!("type {} implements Node {{", type_name);
        SCHEMA
            .lines()
            .skip_while(|line| line.trim() != header)
            .skip(1)
            .take_while(|line| line.trim() != "}")
            .filter_map(|line| line.trim().split(':').next())
            .collect()
    }

    #[test]
    fn test_department_fields_are_the_record_fields() {
        // jobPosts is embedded data; the host infers its shape.
        assert_eq!(
            declared_fields(DEPARTMENT_TYPE),
            vec!["id", "label", "description"]
        );
    }

    #[test]
    fn test_declare_schema_registers_once() {
        let graph = MemoryGraph::new();

        declare_schema(&graph).unwrap();

        assert_eq!(graph.type_defs(), vec![SCHEMA.to_string()]);
        assert!(graph.nodes().is_empty());
    }
}
