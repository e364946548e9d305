//! Data quality types: test cases, test summaries and custom metrics

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::entity::EntityReference;

/// Outcome of a test case run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TestCaseStatus {
    Success,
    Failed,
    Aborted,
    Queued,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCaseResult {
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_status: Option<TestCaseStatus>,

    /// Human-readable result message
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
}

/// A data quality test attached to an entity or one of its columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCase {
    pub id: Uuid,

    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Link to the tested entity, e.g. `<#E::container::s3.sales::columns::amount>`
    pub entity_link: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_definition: Option<EntityReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_case_result: Option<TestCaseResult>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parameter_values: Vec<TestCaseParameterValue>,
}

impl TestCase {
    pub fn status(&self) -> Option<TestCaseStatus> {
        self.test_case_result
            .as_ref()
            .and_then(|result| result.test_case_status)
    }

    /// Column this test targets, if it is a column-level test
    pub fn column_name(&self) -> Option<String> {
        EntityLink::parse(&self.entity_link)?.column
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestCaseParameterValue {
    pub name: String,

    #[serde(default)]
    pub value: Value,
}

/// Aggregated test counts for an entity, as returned by the server
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSummary {
    #[serde(default)]
    pub success: u64,

    #[serde(default)]
    pub failed: u64,

    #[serde(default)]
    pub aborted: u64,

    #[serde(default)]
    pub total: u64,
}

impl TestSummary {
    /// Count the latest result of each test case
    pub fn from_test_cases(cases: &[TestCase]) -> Self {
        let mut summary = Self {
            total: cases.len() as u64,
            ..Self::default()
        };
        for case in cases {
            match case.status() {
                Some(TestCaseStatus::Success) => summary.success += 1,
                Some(TestCaseStatus::Failed) => summary.failed += 1,
                Some(TestCaseStatus::Aborted) => summary.aborted += 1,
                Some(TestCaseStatus::Queued) | None => {}
            }
        }
        summary
    }
}

/// Executable test suite of an entity, carrying the server-side summary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TestSuite {
    pub id: Uuid,

    #[serde(default)]
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<TestSummary>,
}

/// Parsed form of an `<#E::type::fqn[::field::value]>` entity link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityLink {
    pub entity_type: String,
    pub entity_fqn: String,
    pub column: Option<String>,
}

impl EntityLink {
    pub fn parse(link: &str) -> Option<Self> {
        let inner = link.strip_prefix("<#E::")?.strip_suffix('>')?;
        let mut parts = inner.split("::");

        let entity_type = parts.next().filter(|part| !part.is_empty())?;
        let entity_fqn = parts.next().filter(|part| !part.is_empty())?;
        let column = match (parts.next(), parts.next()) {
            (Some("columns"), Some(column)) if !column.is_empty() => Some(column.to_string()),
            _ => None,
        };

        Some(Self {
            entity_type: entity_type.to_string(),
            entity_fqn: entity_fqn.to_string(),
            column,
        })
    }

    pub fn to_link(&self) -> String {
        match &self.column {
            Some(column) => format!(
                "<#E::{}::{}::columns::{}>",
                self.entity_type, self.entity_fqn, column
            ),
            None => format!("<#E::{}::{}>", self.entity_type, self.entity_fqn),
        }
    }
}

/// User-defined SQL metric computed by the profiler
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomMetric {
    pub name: String,

    /// SQL expression evaluated against the table or column
    pub expression: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,
}

/// Body of `PUT /containers/{id}/customMetric`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomMetric {
    pub name: String,

    pub expression: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityReference>,
}
