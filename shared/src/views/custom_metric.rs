//! Custom metric form

use thiserror::Error;

use crate::entity::Container;
use crate::quality::{CreateCustomMetric, CustomMetric};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CustomMetricFormError {
    #[error("Name is required")]
    MissingName,

    #[error("SQL expression is required")]
    MissingExpression,

    #[error("Column is required for a column metric")]
    MissingColumn,

    #[error("Table metrics cannot target a column")]
    UnexpectedColumn,

    #[error("A metric named '{0}' already exists")]
    DuplicateName(String),
}

/// Custom metric dialog state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CustomMetricForm {
    pub name: String,
    pub expression: String,
    pub column_name: Option<String>,
    pub description: String,

    /// Metric attaches to a column rather than the container
    pub is_column_metric: bool,

    /// Editing an existing metric; its own name is not a duplicate
    pub is_edit_mode: bool,
}

impl CustomMetricForm {
    pub fn table_metric() -> Self {
        Self::default()
    }

    pub fn column_metric(column_name: Option<String>) -> Self {
        Self {
            column_name,
            is_column_metric: true,
            ..Default::default()
        }
    }

    /// Open the dialog on an existing metric
    pub fn edit(metric: &CustomMetric) -> Self {
        Self {
            name: metric.name.clone(),
            expression: metric.expression.clone(),
            column_name: metric.column_name.clone(),
            description: metric.description.clone().unwrap_or_default(),
            is_column_metric: metric.column_name.is_some(),
            is_edit_mode: true,
        }
    }

    pub fn validate(&self, existing: &[CustomMetric]) -> Result<CreateCustomMetric, CustomMetricFormError> {
        let name = self.name.trim();
        let expression = self.expression.trim();
        let column = self
            .column_name
            .as_deref()
            .map(str::trim)
            .filter(|column| !column.is_empty());
        let description = self.description.trim();

        if name.is_empty() {
            return Err(CustomMetricFormError::MissingName);
        }
        if expression.is_empty() {
            return Err(CustomMetricFormError::MissingExpression);
        }
        match (self.is_column_metric, column) {
            (true, None) => return Err(CustomMetricFormError::MissingColumn),
            (false, Some(_)) => return Err(CustomMetricFormError::UnexpectedColumn),
            _ => {}
        }

        if !self.is_edit_mode && existing.iter().any(|metric| metric.name == name) {
            return Err(CustomMetricFormError::DuplicateName(name.to_string()));
        }

        Ok(CreateCustomMetric {
            name: name.to_string(),
            expression: expression.to_string(),
            column_name: column.map(str::to_string),
            description: (!description.is_empty()).then(|| description.to_string()),
            owner: None,
        })
    }
}

/// Metrics already defined on the form's target
pub fn existing_metrics<'a>(container: &'a Container, column_name: Option<&str>) -> &'a [CustomMetric] {
    match column_name {
        Some(column) => container
            .columns()
            .iter()
            .find(|c| c.name == column)
            .map(|c| c.custom_metrics.as_slice())
            .unwrap_or_default(),
        None => &container.custom_metrics,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn metric(name: &str) -> CustomMetric {
        CustomMetric {
            name: name.to_string(),
            expression: "select 1".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_table_metric_is_trimmed() {
        let form = CustomMetricForm {
            name: "  row_ratio ".to_string(),
            expression: " select count(*) from t ".to_string(),
            description: "  ".to_string(),
            ..CustomMetricForm::table_metric()
        };

        let metric = form.validate(&[]).unwrap();
        assert_eq!(metric.name, "row_ratio");
        assert_eq!(metric.expression, "select count(*) from t");
        assert_eq!(metric.column_name, None);
        assert_eq!(metric.description, None);
    }

    #[test]
    fn test_required_fields() {
        let mut form = CustomMetricForm::table_metric();
        assert_eq!(form.validate(&[]), Err(CustomMetricFormError::MissingName));

        form.name = "m".to_string();
        assert_eq!(form.validate(&[]), Err(CustomMetricFormError::MissingExpression));
    }

    #[test]
    fn test_column_rules() {
        let mut form = CustomMetricForm::column_metric(Some(" ".to_string()));
        form.name = "m".to_string();
        form.expression = "select 1".to_string();
        assert_eq!(form.validate(&[]), Err(CustomMetricFormError::MissingColumn));

        form.column_name = Some("amount".to_string());
        assert_eq!(form.validate(&[]).unwrap().column_name.as_deref(), Some("amount"));

        let mut table = CustomMetricForm::table_metric();
        table.name = "m".to_string();
        table.expression = "select 1".to_string();
        table.column_name = Some("amount".to_string());
        assert_eq!(table.validate(&[]), Err(CustomMetricFormError::UnexpectedColumn));
    }

    #[test]
    fn test_duplicate_names() {
        let existing = vec![metric("row_ratio")];
        let mut form = CustomMetricForm {
            name: "row_ratio".to_string(),
            expression: "select 2".to_string(),
            ..Default::default()
        };
        assert_eq!(
            form.validate(&existing),
            Err(CustomMetricFormError::DuplicateName("row_ratio".to_string()))
        );

        form.is_edit_mode = true;
        assert!(form.validate(&existing).is_ok());

        let edit = CustomMetricForm::edit(&existing[0]);
        assert!(edit.is_edit_mode);
        assert!(!edit.is_column_metric);
    }

    #[test]
    fn test_existing_metrics_per_target() {
        let container: Container = serde_json::from_value(json!({
            "id": "0f8fad5b-d9cb-469f-a165-70867728950e",
            "name": "sales",
            "fullyQualifiedName": "s3.sales",
            "customMetrics": [{ "name": "table_metric", "expression": "select 1" }],
            "dataModel": { "columns": [{
                "name": "amount",
                "dataType": "DECIMAL",
                "customMetrics": [{ "name": "col_metric", "expression": "select 2", "columnName": "amount" }]
            }]}
        }))
        .unwrap();

        assert_eq!(existing_metrics(&container, None)[0].name, "table_metric");
        assert_eq!(existing_metrics(&container, Some("amount"))[0].name, "col_metric");
        assert!(existing_metrics(&container, Some("missing")).is_empty());
    }
}
