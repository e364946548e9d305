//! Table profiler view model
//!
//! Holds what the profiler tab has fetched for one container and derives the
//! presentation rows:
//! - Overall summary (row/column counts, sample size, test outcomes)
//! - Table-level and per-column test result counts
//! - Row count series for the profile chart

use std::collections::BTreeMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::format::{format_number, group_digits};
use crate::client::ProfileRange;
use crate::entity::{Column, Container};
use crate::profile::{ProfileSampleType, SystemProfile, TableProfile};
use crate::quality::{TestCase, TestCaseStatus, TestSummary};

/// Days covered by the default profiler date range
pub const DEFAULT_RANGE_DAYS: i64 = 3;

/// One tile of the overall summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OverallTableSummary {
    pub title: &'static str,
    pub value: String,
    pub class_name: Option<&'static str>,
}

impl OverallTableSummary {
    fn new(title: &'static str, value: String) -> Self {
        Self {
            title,
            value,
            class_name: None,
        }
    }

    fn with_class(mut self, class_name: &'static str) -> Self {
        self.class_name = Some(class_name);
        self
    }
}

/// Success/aborted/failed counts over a set of test cases
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TestResults {
    pub success: u64,
    pub aborted: u64,
    pub failed: u64,
}

impl TestResults {
    fn record(&mut self, status: Option<TestCaseStatus>) {
        match status {
            Some(TestCaseStatus::Success) => self.success += 1,
            Some(TestCaseStatus::Aborted) => self.aborted += 1,
            Some(TestCaseStatus::Failed) => self.failed += 1,
            Some(TestCaseStatus::Queued) | None => {}
        }
    }
}

/// Test results for one column, plus how many tests target it
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColumnTestResult {
    pub results: TestResults,
    pub count: u64,
}

/// Column decorated with the number of tests attached to it
#[derive(Debug, Clone, PartialEq)]
pub struct ModifiedColumn {
    pub column: Column,
    pub test_count: u64,
}

/// Profile history shown in the charts
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TableProfilerData {
    pub table_profiler_data: Vec<TableProfile>,
    pub system_profiler_data: Vec<SystemProfile>,
}

impl TableProfilerData {
    /// `(timestamp, row count)` points in ascending time order
    pub fn row_count_series(&self) -> Vec<(i64, f64)> {
        let mut points: Vec<(i64, f64)> = self
            .table_profiler_data
            .iter()
            .filter_map(|profile| profile.row_count.map(|rows| (profile.timestamp, rows)))
            .collect();
        points.sort_by_key(|(timestamp, _)| *timestamp);
        points
    }

    /// Rows affected per DML operation, summed over the window
    pub fn operation_totals(&self) -> BTreeMap<String, i64> {
        let mut totals = BTreeMap::new();
        for profile in &self.system_profiler_data {
            if let Some(operation) = profile.operation {
                let key = format!("{:?}", operation).to_uppercase();
                *totals.entry(key).or_insert(0) += profile.rows_affected.unwrap_or(0);
            }
        }
        totals
    }
}

/// Epoch-millisecond date range selected in the profiler toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    pub start_ts: i64,
    pub end_ts: i64,
}

impl DateRange {
    pub fn last_days(days: i64, now: DateTime<Utc>) -> Self {
        Self {
            start_ts: (now - Duration::days(days)).timestamp_millis(),
            end_ts: now.timestamp_millis(),
        }
    }

    pub fn to_profile_range(&self) -> ProfileRange {
        ProfileRange::new(self.start_ts, self.end_ts)
    }
}

impl Default for DateRange {
    fn default() -> Self {
        Self::last_days(DEFAULT_RANGE_DAYS, Utc::now())
    }
}

/// State behind the profiler tab of a container page
#[derive(Debug, Clone, Default)]
pub struct TableProfilerViewModel {
    /// Container as loaded by the details page
    pub container: Option<Container>,

    /// Container returned by the latest-profile endpoint
    pub table_profiler: Option<Container>,

    /// Container carrying the custom metrics most recently saved
    pub custom_metric: Option<Container>,

    pub test_case_summary: Option<TestSummary>,

    pub all_test_cases: Vec<TestCase>,

    pub date_range: DateRange,
}

impl TableProfilerViewModel {
    pub fn new(container: Option<Container>, test_case_summary: Option<TestSummary>) -> Self {
        Self {
            container,
            test_case_summary,
            ..Default::default()
        }
    }

    pub fn is_deleted(&self) -> bool {
        self.container.as_ref().map(|c| c.deleted).unwrap_or(false)
    }

    pub fn latest_profile(&self) -> Option<&TableProfile> {
        self.table_profiler.as_ref().and_then(|c| c.profile.as_ref())
    }

    pub fn is_profiling_enabled(&self) -> bool {
        self.latest_profile().is_some()
    }

    /// Summary tiles in display order
    pub fn overall_summary(&self) -> Vec<OverallTableSummary> {
        let profile = self.latest_profile();
        let summary = self
            .test_case_summary
            .unwrap_or_else(|| TestSummary::from_test_cases(&self.all_test_cases));

        let sample = match profile.and_then(|p| p.profile_sample_type) {
            Some(ProfileSampleType::Rows) => format!(
                "{} rows",
                format_number(profile.and_then(|p| p.profile_sample).unwrap_or(0.0))
            ),
            _ => format!(
                "{}%",
                format_number(profile.and_then(|p| p.profile_sample).unwrap_or(100.0))
            ),
        };

        vec![
            OverallTableSummary::new(
                "Row Count",
                format_number(profile.and_then(|p| p.row_count).unwrap_or(0.0)),
            ),
            OverallTableSummary::new(
                "Column Count",
                format_number(profile.and_then(|p| p.column_count).unwrap_or(0.0)),
            ),
            OverallTableSummary::new("Table Sample %", sample),
            OverallTableSummary::new("Success", group_digits(summary.success)).with_class("success"),
            OverallTableSummary::new("Aborted", group_digits(summary.aborted)).with_class("aborted"),
            OverallTableSummary::new("Failed", group_digits(summary.failed)).with_class("failed"),
        ]
    }

    pub fn table_tests(&self) -> impl Iterator<Item = &TestCase> {
        self.all_test_cases
            .iter()
            .filter(|case| case.column_name().is_none())
    }

    /// Counts over table-level tests only
    pub fn table_test_results(&self) -> TestResults {
        let mut results = TestResults::default();
        for case in self.table_tests() {
            results.record(case.status());
        }
        results
    }

    /// Counts keyed by column name
    pub fn column_test_results(&self) -> BTreeMap<String, ColumnTestResult> {
        let mut by_column: BTreeMap<String, ColumnTestResult> = BTreeMap::new();
        for case in &self.all_test_cases {
            if let Some(column) = case.column_name() {
                let entry = by_column.entry(column).or_default();
                entry.count += 1;
                entry.results.record(case.status());
            }
        }
        by_column
    }

    pub fn columns_with_tests(&self) -> Vec<ModifiedColumn> {
        let results = self.column_test_results();
        self.container
            .as_ref()
            .map(|c| c.columns())
            .unwrap_or_default()
            .iter()
            .map(|column| ModifiedColumn {
                column: column.clone(),
                test_count: results.get(&column.name).map(|r| r.count).unwrap_or(0),
            })
            .collect()
    }

    /// Replace an updated test case in place, or add it if new
    pub fn on_test_case_update(&mut self, test_case: TestCase) {
        match self.all_test_cases.iter_mut().find(|c| c.id == test_case.id) {
            Some(existing) => *existing = test_case,
            None => self.all_test_cases.push(test_case),
        }
    }

    pub fn on_custom_metric_update(&mut self, container: Container) {
        self.custom_metric = Some(container);
    }

    pub fn on_date_range_change(&mut self, range: DateRange) {
        self.date_range = range;
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use serde_json::json;
    use uuid::Uuid;

    use super::*;
    use crate::quality::TestCaseResult;

    fn test_case(name: &str, link: &str, status: TestCaseStatus) -> TestCase {
        TestCase {
            id: Uuid::new_v4(),
            name: name.to_string(),
            fully_qualified_name: None,
            description: None,
            entity_link: link.to_string(),
            test_definition: None,
            test_case_result: Some(TestCaseResult {
                timestamp: 1,
                test_case_status: Some(status),
                result: None,
            }),
            parameter_values: vec![],
        }
    }

    fn container() -> Container {
        serde_json::from_value(json!({
            "id": "6a0b6c1a-3b0c-4a55-9d1c-1b4cd5b8f4a2",
            "name": "sales",
            "fullyQualifiedName": "s3.sales",
            "dataModel": { "columns": [
                { "name": "amount", "dataType": "DECIMAL" },
                { "name": "region", "dataType": "VARCHAR" }
            ]}
        }))
        .unwrap()
    }

    #[test]
    fn test_summary_defaults_without_profile() {
        let model = TableProfilerViewModel::default();
        let summary = model.overall_summary();

        let values: Vec<(&str, &str)> = summary.iter().map(|s| (s.title, s.value.as_str())).collect();
        assert_eq!(
            values,
            vec![
                ("Row Count", "0"),
                ("Column Count", "0"),
                ("Table Sample %", "100%"),
                ("Success", "0"),
                ("Aborted", "0"),
                ("Failed", "0"),
            ]
        );
        assert_eq!(summary[3].class_name, Some("success"));
        assert!(!model.is_profiling_enabled());
    }

    #[test]
    fn test_summary_from_latest_profile() {
        let mut profiled = container();
        profiled.profile = Some(TableProfile {
            timestamp: 1,
            row_count: Some(1234567.0),
            column_count: Some(12.0),
            profile_sample: Some(35.5),
            ..Default::default()
        });

        let mut model = TableProfilerViewModel::new(
            Some(container()),
            Some(TestSummary { success: 1200, failed: 3, aborted: 0, total: 1203 }),
        );
        model.table_profiler = Some(profiled);

        let summary = model.overall_summary();
        assert_eq!(summary[0].value, "1,234,567");
        assert_eq!(summary[1].value, "12");
        assert_eq!(summary[2].value, "35.5%");
        assert_eq!(summary[3].value, "1,200");
        assert_eq!(summary[5].value, "3");
        assert!(model.is_profiling_enabled());
    }

    #[test]
    fn test_summary_counts_loaded_tests_without_server_summary() {
        let mut model = TableProfilerViewModel::new(Some(container()), None);
        model.all_test_cases = vec![
            test_case("row_count", "<#E::container::s3.sales>", TestCaseStatus::Success),
            test_case("amount_not_null", "<#E::container::s3.sales::columns::amount>", TestCaseStatus::Failed),
            test_case("amount_positive", "<#E::container::s3.sales::columns::amount>", TestCaseStatus::Success),
        ];

        let summary = model.overall_summary();
        assert_eq!(summary[3].value, "2");
        assert_eq!(summary[4].value, "0");
        assert_eq!(summary[5].value, "1");

        model.test_case_summary = Some(TestSummary { success: 9, failed: 0, aborted: 0, total: 9 });
        assert_eq!(model.overall_summary()[3].value, "9");
    }

    #[test]
    fn test_row_sample_is_shown_as_rows() {
        let mut profiled = container();
        profiled.profile = Some(TableProfile {
            timestamp: 1,
            profile_sample: Some(5000.0),
            profile_sample_type: Some(ProfileSampleType::Rows),
            ..Default::default()
        });
        let model = TableProfilerViewModel {
            table_profiler: Some(profiled),
            ..Default::default()
        };

        assert_eq!(model.overall_summary()[2].value, "5,000 rows");
    }

    #[test]
    fn test_results_split_by_column() {
        let mut model = TableProfilerViewModel::new(Some(container()), None);
        model.all_test_cases = vec![
            test_case("row_count", "<#E::container::s3.sales>", TestCaseStatus::Success),
            test_case("freshness", "<#E::container::s3.sales>", TestCaseStatus::Aborted),
            test_case("amount_not_null", "<#E::container::s3.sales::columns::amount>", TestCaseStatus::Failed),
            test_case("amount_positive", "<#E::container::s3.sales::columns::amount>", TestCaseStatus::Success),
            test_case("amount_queued", "<#E::container::s3.sales::columns::amount>", TestCaseStatus::Queued),
        ];

        assert_eq!(
            model.table_test_results(),
            TestResults { success: 1, aborted: 1, failed: 0 }
        );

        let columns = model.column_test_results();
        let amount = columns.get("amount").unwrap();
        assert_eq!(amount.count, 3);
        assert_eq!(amount.results, TestResults { success: 1, aborted: 0, failed: 1 });
        assert!(columns.get("region").is_none());

        let decorated = model.columns_with_tests();
        assert_eq!(decorated[0].test_count, 3);
        assert_eq!(decorated[1].test_count, 0);
    }

    #[test]
    fn test_updated_test_case_replaces_existing() {
        let mut model = TableProfilerViewModel::default();
        let case = test_case("row_count", "<#E::container::s3.sales>", TestCaseStatus::Failed);
        model.all_test_cases.push(case.clone());

        let mut fixed = case;
        fixed.test_case_result.as_mut().unwrap().test_case_status = Some(TestCaseStatus::Success);
        model.on_test_case_update(fixed);

        assert_eq!(model.all_test_cases.len(), 1);
        assert_eq!(model.table_test_results().success, 1);
    }

    #[test]
    fn test_date_range() {
        let now = Utc.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        let range = DateRange::last_days(3, now);
        assert_eq!(range.end_ts - range.start_ts, 3 * 24 * 60 * 60 * 1000);
        assert_eq!(range.to_profile_range().to_query().len(), 2);
    }

    #[test]
    fn test_chart_series() {
        let data = TableProfilerData {
            table_profiler_data: vec![
                TableProfile { timestamp: 30, row_count: Some(300.0), ..Default::default() },
                TableProfile { timestamp: 10, row_count: Some(100.0), ..Default::default() },
                TableProfile { timestamp: 20, ..Default::default() },
            ],
            system_profiler_data: serde_json::from_value(json!([
                { "timestamp": 1, "operation": "INSERT", "rowsAffected": 10 },
                { "timestamp": 2, "operation": "INSERT", "rowsAffected": 5 },
                { "timestamp": 3, "operation": "DELETE", "rowsAffected": 2 }
            ]))
            .unwrap(),
        };

        assert_eq!(data.row_count_series(), vec![(10, 100.0), (30, 300.0)]);
        let totals = data.operation_totals();
        assert_eq!(totals.get("INSERT"), Some(&15));
        assert_eq!(totals.get("DELETE"), Some(&2));
    }
}
