//! Profiler and sampling types
//!
//! Table, system and column profiles are time-series records keyed by
//! `timestamp` (epoch milliseconds). The server returns them in
//! [`PagingResponse`] envelopes ordered by time.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Paging cursors returned alongside list responses
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Paging {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub before: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub after: Option<String>,

    /// Total number of records matching the request
    #[serde(default)]
    pub total: u64,
}

impl Paging {
    pub fn has_next(&self) -> bool {
        self.after.is_some()
    }

    pub fn has_previous(&self) -> bool {
        self.before.is_some()
    }
}

/// `{ data, paging }` envelope used by every list endpoint
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PagingResponse<T> {
    pub data: T,

    #[serde(default)]
    pub paging: Paging,
}

/// How the profiler samples a table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProfileSampleType {
    #[default]
    Percentage,
    Rows,
}

/// Table-level profile snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProfile {
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_sample: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_sample_type: Option<ProfileSampleType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size_in_byte: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub create_date_time: Option<String>,
}

/// DML operation recorded by a system profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DmlOperation {
    Update,
    Insert,
    Delete,
    Write,
}

/// System-level profile (row changes produced by one DML operation)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemProfile {
    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<DmlOperation>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rows_affected: Option<i64>,
}

/// Column-level profile snapshot
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfile {
    pub name: String,

    pub timestamp: i64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub values_percentage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub valid_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub null_proportion: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_percentage: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub missing_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unique_proportion: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_count: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distinct_proportion: Option<f64>,

    /// Minimum value; numeric, date or string depending on the column type
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sum: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stddev: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variance: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub median: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_quartile: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub third_quartile: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inter_quartile_range: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub histogram: Option<Histogram>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Histogram {
    #[serde(default)]
    pub boundaries: Vec<Value>,

    #[serde(default)]
    pub frequencies: Vec<Value>,
}

/// Profiler configuration stored on a container
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableProfilerConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_sample_type: Option<ProfileSampleType>,

    /// Percentage (0-100) or row count, depending on `profile_sample_type`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_sample: Option<f64>,

    /// Custom query used to select the profiled rows
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_query: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub exclude_columns: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub include_columns: Vec<ColumnProfilerConfig>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partitioning: Option<PartitionProfilerConfig>,

    /// Number of sample rows to ingest
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sample_data_count: Option<u64>,
}

/// Per-column metric selection
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnProfilerConfig {
    pub column_name: String,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub metrics: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PartitionIntervalType {
    #[serde(rename = "TIME-UNIT")]
    TimeUnit,
    #[serde(rename = "INTEGER-RANGE")]
    IntegerRange,
    #[serde(rename = "INGESTION-TIME")]
    IngestionTime,
    #[serde(rename = "COLUMN-VALUE")]
    ColumnValue,
}

impl PartitionIntervalType {
    pub const ALL: [PartitionIntervalType; 4] = [
        PartitionIntervalType::TimeUnit,
        PartitionIntervalType::IntegerRange,
        PartitionIntervalType::IngestionTime,
        PartitionIntervalType::ColumnValue,
    ];

    /// Wire name
    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionIntervalType::TimeUnit => "TIME-UNIT",
            PartitionIntervalType::IntegerRange => "INTEGER-RANGE",
            PartitionIntervalType::IngestionTime => "INGESTION-TIME",
            PartitionIntervalType::ColumnValue => "COLUMN-VALUE",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|t| t.as_str() == value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum PartitionIntervalUnit {
    Year,
    Month,
    Day,
    Hour,
}

impl PartitionIntervalUnit {
    pub const ALL: [PartitionIntervalUnit; 4] = [
        PartitionIntervalUnit::Year,
        PartitionIntervalUnit::Month,
        PartitionIntervalUnit::Day,
        PartitionIntervalUnit::Hour,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PartitionIntervalUnit::Year => "YEAR",
            PartitionIntervalUnit::Month => "MONTH",
            PartitionIntervalUnit::Day => "DAY",
            PartitionIntervalUnit::Hour => "HOUR",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|u| u.as_str() == value)
    }
}

/// Partition selection used when profiling partitioned data
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartitionProfilerConfig {
    #[serde(default)]
    pub enable_partitioning: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_column_name: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval_type: Option<PartitionIntervalType>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_interval_unit: Option<PartitionIntervalUnit>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub partition_values: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_integer_range_start: Option<i64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partition_integer_range_end: Option<i64>,
}

/// Raw sample rows as stored by the server
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableData {
    #[serde(default)]
    pub columns: Vec<String>,

    #[serde(default)]
    pub rows: Vec<Vec<Value>>,
}
