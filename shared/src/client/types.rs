//! Request parameter types
//!
//! Every parameter is optional and forwarded verbatim; a parameter that is
//! `None` never appears in the query string.

use serde::{Deserialize, Serialize};

use crate::entity::Include;

/// Query parameters accepted by the entity read and list endpoints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListParams {
    /// Comma-separated fields to include (e.g. `owner,tags,followers`)
    pub fields: Option<String>,

    pub include: Option<Include>,

    pub limit: Option<u32>,

    pub before: Option<String>,

    pub after: Option<String>,

    /// Filter by object store service name (list only)
    pub service: Option<String>,

    /// Only return root containers (list only)
    pub root: Option<bool>,
}

impl ListParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_fields(mut self, fields: impl Into<String>) -> Self {
        self.fields = Some(fields.into());
        self
    }

    pub fn with_include(mut self, include: Include) -> Self {
        self.include = Some(include);
        self
    }

    pub fn with_limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push(&mut query, "fields", self.fields.as_ref());
        push(&mut query, "service", self.service.as_ref());
        push(&mut query, "root", self.root.as_ref());
        push(&mut query, "limit", self.limit.as_ref());
        push(&mut query, "before", self.before.as_ref());
        push(&mut query, "after", self.after.as_ref());
        push(&mut query, "include", self.include.as_ref());
        query
    }
}

/// Time window for table and system profile listings (epoch milliseconds)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileRange {
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
}

impl ProfileRange {
    pub fn new(start_ts: i64, end_ts: i64) -> Self {
        Self {
            start_ts: Some(start_ts),
            end_ts: Some(end_ts),
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push(&mut query, "startTs", self.start_ts.as_ref());
        push(&mut query, "endTs", self.end_ts.as_ref());
        query
    }
}

/// Time window plus cursor paging for column profile listings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnProfileParams {
    pub start_ts: Option<i64>,
    pub end_ts: Option<i64>,
    pub limit: Option<u32>,
    pub before: Option<String>,
    pub after: Option<String>,
}

impl ColumnProfileParams {
    pub fn in_range(range: ProfileRange) -> Self {
        Self {
            start_ts: range.start_ts,
            end_ts: range.end_ts,
            ..Default::default()
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push(&mut query, "startTs", self.start_ts.as_ref());
        push(&mut query, "endTs", self.end_ts.as_ref());
        push(&mut query, "limit", self.limit.as_ref());
        push(&mut query, "before", self.before.as_ref());
        push(&mut query, "after", self.after.as_ref());
        query
    }
}

/// Query parameters for the test case listing of one entity
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestCaseListParams {
    /// `<#E::container::{fqn}>` link of the tested entity
    pub entity_link: Option<String>,

    /// Also return tests attached to the entity's columns
    pub include_all_tests: Option<bool>,

    pub fields: Option<String>,

    pub limit: Option<u32>,

    pub after: Option<String>,
}

impl TestCaseListParams {
    /// Every test of `entity_link`, table and column level alike
    pub fn for_entity(entity_link: impl Into<String>) -> Self {
        Self {
            entity_link: Some(entity_link.into()),
            include_all_tests: Some(true),
            ..Default::default()
        }
    }

    pub fn to_query(&self) -> Vec<(String, String)> {
        let mut query = Vec::new();
        push(&mut query, "fields", self.fields.as_ref());
        push(&mut query, "entityLink", self.entity_link.as_ref());
        push(&mut query, "includeAllTests", self.include_all_tests.as_ref());
        push(&mut query, "limit", self.limit.as_ref());
        push(&mut query, "after", self.after.as_ref());
        query
    }
}

fn push<V: ToString>(query: &mut Vec<(String, String)>, key: &str, value: Option<&V>) {
    if let Some(value) = value {
        query.push((key.to_string(), value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_params_produce_no_query() {
        assert!(ListParams::default().to_query().is_empty());
        assert!(ProfileRange::default().to_query().is_empty());
        assert!(ColumnProfileParams::default().to_query().is_empty());
        assert!(TestCaseListParams::default().to_query().is_empty());
    }

    #[test]
    fn test_profile_range_forwards_only_bounds() {
        let query = ProfileRange::new(0, 100).to_query();
        assert_eq!(
            query,
            vec![
                ("startTs".to_string(), "0".to_string()),
                ("endTs".to_string(), "100".to_string()),
            ]
        );
    }

    #[test]
    fn test_column_params_forward_cursors() {
        let params = ColumnProfileParams {
            limit: Some(25),
            after: Some("eyJvZmZzZXQiOjI1fQ==".to_string()),
            ..Default::default()
        };

        assert_eq!(
            params.to_query(),
            vec![
                ("limit".to_string(), "25".to_string()),
                ("after".to_string(), "eyJvZmZzZXQiOjI1fQ==".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_params_builder() {
        let query = ListParams::new()
            .with_fields("owner,tags")
            .with_include(Include::Deleted)
            .with_limit(10)
            .to_query();

        assert!(query.contains(&("fields".to_string(), "owner,tags".to_string())));
        assert!(query.contains(&("include".to_string(), "deleted".to_string())));
        assert!(query.contains(&("limit".to_string(), "10".to_string())));
        assert_eq!(query.len(), 3);
    }
}
