//! Catalog entity types
//!
//! These types mirror the JSON documents served by the catalog's
//! `/containers` resource:
//! - Containers and their data model columns
//! - Entity references and tag labels
//! - Change descriptions returned by follower updates
//! - JSON-patch operations accepted by `PATCH`

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::profile::{ColumnProfile, TableData, TableProfile, TableProfilerConfig};
use crate::quality::{CustomMetric, TestSuite, TestSummary};

/// Separator between the segments of a fully-qualified name
pub const FQN_SEPARATOR: char = '.';

/// A storage container (bucket, folder, object prefix) in the catalog
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Container {
    /// Unique entity identifier
    pub id: Uuid,

    /// Container name (last FQN segment)
    pub name: String,

    /// Dot-separated hierarchical name
    pub fully_qualified_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Object store service this container belongs to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub service: Option<EntityReference>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<EntityReference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<EntityReference>,

    /// Structured schema of the objects stored in this container
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_model: Option<ContainerDataModel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_objects: Option<f64>,

    /// Total size in bytes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub file_formats: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner: Option<EntityReference>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagLabel>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub followers: Vec<EntityReference>,

    /// Soft-deleted flag
    #[serde(default)]
    pub deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<f64>,

    /// Last update time in epoch milliseconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_by: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table_profiler_config: Option<TableProfilerConfig>,

    /// Latest table profile, present when requested from the profile endpoints
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<TableProfile>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data: Option<TableData>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_metrics: Vec<CustomMetric>,

    /// Present when `testSuite` is requested in `fields`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_suite: Option<TestSuite>,
}

impl Container {
    /// Server-side test summary of the container's test suite
    pub fn test_summary(&self) -> Option<TestSummary> {
        self.test_suite.as_ref().and_then(|suite| suite.summary)
    }

    /// Columns of the data model, empty when the container has none
    pub fn columns(&self) -> &[Column] {
        self.data_model
            .as_ref()
            .map(|model| model.columns.as_slice())
            .unwrap_or_default()
    }

    /// Name to show in the UI, preferring the display name
    pub fn label(&self) -> &str {
        self.display_name
            .as_deref()
            .filter(|name| !name.is_empty())
            .unwrap_or(&self.name)
    }
}

/// Data model attached to a container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContainerDataModel {
    #[serde(default)]
    pub is_partitioned: bool,

    #[serde(default)]
    pub columns: Vec<Column>,
}

/// A column in a container's data model
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,

    /// Column data type (e.g. `VARCHAR`, `INT`, `STRUCT`)
    pub data_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_type_display: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<TagLabel>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<ColumnProfile>,

    /// Nested columns for struct-like types
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Column>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub custom_metrics: Vec<CustomMetric>,
}

/// Reference to another catalog entity
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntityReference {
    pub id: Uuid,

    /// Entity type (e.g. `user`, `team`, `storageService`)
    #[serde(rename = "type")]
    pub entity_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fully_qualified_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub deleted: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl EntityReference {
    /// Best available human-readable name
    pub fn label(&self) -> String {
        self.display_name
            .clone()
            .or_else(|| self.name.clone())
            .or_else(|| self.fully_qualified_name.clone())
            .unwrap_or_else(|| self.id.to_string())
    }
}

/// A classification tag or glossary term applied to an entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TagLabel {
    #[serde(rename = "tagFQN")]
    pub tag_fqn: String,

    #[serde(default)]
    pub label_type: LabelType,

    #[serde(default)]
    pub state: TagState,

    #[serde(default)]
    pub source: TagSource,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl TagLabel {
    pub fn new(tag_fqn: impl Into<String>) -> Self {
        Self {
            tag_fqn: tag_fqn.into(),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelType {
    #[default]
    Manual,
    Propagated,
    Automated,
    Derived,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagState {
    Suggested,
    #[default]
    Confirmed,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TagSource {
    #[default]
    Classification,
    Glossary,
}

/// Which soft-deleted entities a read should include
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Include {
    #[default]
    All,
    Deleted,
    NonDeleted,
}

impl Include {
    pub fn as_str(&self) -> &'static str {
        match self {
            Include::All => "all",
            Include::Deleted => "deleted",
            Include::NonDeleted => "non-deleted",
        }
    }
}

impl std::fmt::Display for Include {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Include {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(Include::All),
            "deleted" => Ok(Include::Deleted),
            "non-deleted" | "non_deleted" => Ok(Include::NonDeleted),
            _ => Err(format!("Unknown include value: {}", s)),
        }
    }
}

/// A single RFC 6902 JSON-patch operation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "lowercase")]
pub enum PatchOperation {
    Add { path: String, value: Value },
    Remove { path: String },
    Replace { path: String, value: Value },
    Move { from: String, path: String },
    Copy { from: String, path: String },
    Test { path: String, value: Value },
}

impl PatchOperation {
    /// JSON pointer this operation writes to
    pub fn path(&self) -> &str {
        match self {
            PatchOperation::Add { path, .. }
            | PatchOperation::Remove { path }
            | PatchOperation::Replace { path, .. }
            | PatchOperation::Move { path, .. }
            | PatchOperation::Copy { path, .. }
            | PatchOperation::Test { path, .. } => path,
        }
    }
}

/// Body of `PUT /containers/restore`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RestoreRequest {
    pub id: Uuid,
}

/// Field-level change record returned by mutations
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeDescription {
    #[serde(default)]
    pub fields_added: Vec<FieldChange>,

    #[serde(default)]
    pub fields_updated: Vec<FieldChange>,

    #[serde(default)]
    pub fields_deleted: Vec<FieldChange>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_version: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldChange {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_value: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new_value: Option<Value>,
}

/// Response of the follower endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FollowerChange {
    #[serde(default)]
    pub change_description: ChangeDescription,
}

impl FollowerChange {
    /// Followers added by this change
    pub fn added(&self) -> Vec<EntityReference> {
        self.change_description
            .fields_added
            .iter()
            .filter_map(|change| change.new_value.as_ref())
            .flat_map(references_from_value)
            .collect()
    }

    /// Followers removed by this change
    pub fn removed(&self) -> Vec<EntityReference> {
        self.change_description
            .fields_deleted
            .iter()
            .filter_map(|change| change.old_value.as_ref())
            .flat_map(references_from_value)
            .collect()
    }
}

// The server sends change values either inline or as a JSON-encoded string.
fn references_from_value(value: &Value) -> Vec<EntityReference> {
    match value {
        Value::String(encoded) => serde_json::from_str(encoded).unwrap_or_default(),
        other => serde_json::from_value(other.clone()).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_container_from_server_json() {
        let json = json!({
            "id": "6a0b6c1a-3b0c-4a55-9d1c-1b4cd5b8f4a2",
            "name": "transactions",
            "fullyQualifiedName": "s3_prod.\"sales.data\".transactions",
            "deleted": false,
            "dataModel": {
                "isPartitioned": false,
                "columns": [
                    { "name": "amount", "dataType": "DECIMAL" },
                    { "name": "region", "dataType": "VARCHAR" }
                ]
            },
            "tags": [{ "tagFQN": "Tier.Tier1", "labelType": "Manual", "state": "Confirmed", "source": "Classification" }]
        });

        let container: Container = serde_json::from_value(json).unwrap();
        assert_eq!(container.columns().len(), 2);
        assert_eq!(container.tags[0].tag_fqn, "Tier.Tier1");
        assert_eq!(container.label(), "transactions");
        assert_eq!(container.test_summary(), None);
    }

    #[test]
    fn test_container_test_suite_summary() {
        let json = json!({
            "id": "6a0b6c1a-3b0c-4a55-9d1c-1b4cd5b8f4a2",
            "name": "transactions",
            "fullyQualifiedName": "s3_prod.transactions",
            "testSuite": {
                "id": "9d2f3a4b-5c6d-4e7f-8a9b-0c1d2e3f4a5b",
                "name": "s3_prod.transactions.testSuite",
                "summary": { "success": 4, "failed": 1, "aborted": 0, "total": 5 }
            }
        });

        let container: Container = serde_json::from_value(json).unwrap();
        assert_eq!(
            container.test_summary(),
            Some(TestSummary { success: 4, failed: 1, aborted: 0, total: 5 })
        );
    }

    #[test]
    fn test_patch_operation_serialization() {
        let op = PatchOperation::Replace {
            path: "/description".to_string(),
            value: json!("Raw sales events"),
        };

        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json, json!({ "op": "replace", "path": "/description", "value": "Raw sales events" }));
        assert_eq!(op.path(), "/description");
    }

    #[test]
    fn test_follower_change_accepts_encoded_values() {
        let user = json!([{ "id": "0b1c2d3e-4f50-4617-8899-aabbccddeeff", "type": "user", "name": "aaron" }]);
        let change: FollowerChange = serde_json::from_value(json!({
            "changeDescription": {
                "fieldsAdded": [{ "name": "followers", "newValue": user.to_string() }],
                "fieldsDeleted": [{ "name": "followers", "oldValue": user }]
            }
        }))
        .unwrap();

        assert_eq!(change.added().len(), 1);
        assert_eq!(change.added()[0].name.as_deref(), Some("aaron"));
        assert_eq!(change.removed()[0].entity_type, "user");
    }

    #[test]
    fn test_include_parsing() {
        assert_eq!("non-deleted".parse::<Include>().unwrap(), Include::NonDeleted);
        assert_eq!(Include::default().as_str(), "all");
        assert!("everything".parse::<Include>().is_err());
    }
}
