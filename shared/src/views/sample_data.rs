//! Sample data table view model

use serde_json::Value;

use super::permissions::OperationPermission;
use crate::entity::Container;
use crate::profile::TableData;

/// Cell value as rendered in the sample data grid
#[derive(Debug, Clone, PartialEq)]
pub enum SampleDataValue {
    Null,
    Text(String),
    Number(serde_json::Number),
    Object(Value),
    Array(Vec<Value>),
}

impl SampleDataValue {
    pub fn display(&self) -> String {
        match self {
            SampleDataValue::Null => String::new(),
            SampleDataValue::Text(text) => text.clone(),
            SampleDataValue::Number(number) => number.to_string(),
            SampleDataValue::Object(value) => {
                serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
            }
            SampleDataValue::Array(items) => {
                serde_json::to_string_pretty(items).unwrap_or_default()
            }
        }
    }

    /// Objects and arrays are shown in an expandable cell
    pub fn is_structured(&self) -> bool {
        matches!(self, SampleDataValue::Object(_) | SampleDataValue::Array(_))
    }
}

impl From<Value> for SampleDataValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => SampleDataValue::Null,
            Value::Bool(b) => SampleDataValue::Text(b.to_string()),
            Value::Number(n) => SampleDataValue::Number(n),
            Value::String(s) => SampleDataValue::Text(s),
            Value::Array(items) => SampleDataValue::Array(items),
            object @ Value::Object(_) => SampleDataValue::Object(object),
        }
    }
}

/// Grid column header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleColumn {
    pub name: String,
    pub data_type: String,
}

/// One value per column, in column order
pub type SampleDataRow = Vec<SampleDataValue>;

/// Columns and rows ready for the sample data grid
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleData {
    pub columns: Vec<SampleColumn>,
    pub rows: Vec<SampleDataRow>,
}

impl SampleData {
    /// Build the grid from raw sample rows, typing columns from the data model
    pub fn from_table_data(data: &TableData, container: Option<&Container>) -> Self {
        let columns: Vec<SampleColumn> = data
            .columns
            .iter()
            .map(|name| SampleColumn {
                name: name.clone(),
                data_type: container
                    .and_then(|c| c.columns().iter().find(|col| &col.name == name))
                    .map(|col| col.data_type.clone())
                    .unwrap_or_default(),
            })
            .collect();

        let rows = data
            .rows
            .iter()
            .map(|row| {
                (0..columns.len())
                    .map(|i| SampleDataValue::from(row.get(i).cloned().unwrap_or(Value::Null)))
                    .collect()
            })
            .collect();

        Self { columns, rows }
    }

    /// Grid for the sample data attached to a container, if any
    pub fn from_container(container: &Container) -> Option<Self> {
        container
            .sample_data
            .as_ref()
            .map(|data| Self::from_table_data(data, Some(container)))
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Cell text at `row`, `column`
    pub fn cell(&self, row: usize, column: usize) -> String {
        self.rows
            .get(row)
            .and_then(|r| r.get(column))
            .map(SampleDataValue::display)
            .unwrap_or_default()
    }
}

/// Deleting sample data needs edit rights on a live entity
pub fn can_delete_sample_data(permissions: &OperationPermission, is_deleted: bool) -> bool {
    !is_deleted && (permissions.edit_all || permissions.edit_sample_data)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn container() -> Container {
        serde_json::from_value(json!({
            "id": "2d3c50c4-4a09-4af5-9a55-0c0a6c0df3f6",
            "name": "orders",
            "fullyQualifiedName": "s3.orders",
            "dataModel": { "columns": [
                { "name": "id", "dataType": "INT" },
                { "name": "payload", "dataType": "JSON" }
            ]},
            "sampleData": {
                "columns": ["id", "payload", "note"],
                "rows": [
                    [1, { "sku": "A-1" }, "first"],
                    [2, [1, 2]],
                    [null, null, true]
                ]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_columns_take_types_from_data_model() {
        let data = SampleData::from_container(&container()).unwrap();
        let types: Vec<(&str, &str)> = data
            .columns
            .iter()
            .map(|c| (c.name.as_str(), c.data_type.as_str()))
            .collect();
        assert_eq!(types, vec![("id", "INT"), ("payload", "JSON"), ("note", "")]);
    }

    #[test]
    fn test_cell_rendering() {
        let data = SampleData::from_container(&container()).unwrap();

        assert_eq!(data.cell(0, 0), "1");
        assert_eq!(data.cell(0, 2), "first");
        assert_eq!(data.cell(0, 1), "{\n  \"sku\": \"A-1\"\n}");
        assert!(data.rows[0][1].is_structured());

        // short rows are padded with nulls
        assert_eq!(data.rows[1][2], SampleDataValue::Null);
        assert_eq!(data.cell(1, 2), "");

        assert_eq!(data.cell(2, 0), "");
        assert_eq!(data.cell(2, 2), "true");
        assert_eq!(data.cell(9, 0), "");
        assert_eq!(data.cell(0, 7), "");
    }

    #[test]
    fn test_duplicate_column_names_keep_every_value() {
        let data = SampleData::from_table_data(
            &TableData {
                columns: vec!["id".to_string(), "value".to_string(), "value".to_string()],
                rows: vec![vec![json!(1), json!("left"), json!("right")]],
            },
            None,
        );

        assert_eq!(data.columns.len(), 3);
        assert_eq!(data.rows[0].len(), 3);
        assert_eq!(data.cell(0, 1), "left");
        assert_eq!(data.cell(0, 2), "right");
    }

    #[test]
    fn test_missing_sample_data() {
        let mut container = container();
        container.sample_data = None;
        assert!(SampleData::from_container(&container).is_none());
        assert!(SampleData::from_table_data(&TableData::default(), None).is_empty());
    }

    #[test]
    fn test_delete_permission() {
        let mut permissions = OperationPermission::default();
        assert!(!can_delete_sample_data(&permissions, false));

        permissions.edit_sample_data = true;
        assert!(can_delete_sample_data(&permissions, false));
        assert!(!can_delete_sample_data(&permissions, true));

        let all = OperationPermission { edit_all: true, ..Default::default() };
        assert!(can_delete_sample_data(&all, false));
    }
}
