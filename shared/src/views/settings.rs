//! Profiler settings form
//!
//! Editable state of the profiler settings dialog and its conversion to and
//! from [`TableProfilerConfig`].

use crate::profile::{
    ColumnProfilerConfig, PartitionProfilerConfig, ProfileSampleType, TableProfilerConfig,
};

pub const DEFAULT_SAMPLE_PERCENTAGE: f64 = 100.0;

/// Settings dialog state
#[derive(Debug, Clone, PartialEq)]
pub struct ProfilerSettingsForm {
    pub sql_query: String,
    pub profile_sample_type: ProfileSampleType,
    pub profile_sample_percentage: f64,
    pub profile_sample_rows: Option<f64>,
    pub sample_data_count: Option<u64>,
    pub exclude_columns: Vec<String>,
    pub include_columns: Vec<ColumnProfilerConfig>,
    pub enable_partition: bool,
    pub partition: PartitionProfilerConfig,
}

impl Default for ProfilerSettingsForm {
    fn default() -> Self {
        Self {
            sql_query: String::new(),
            profile_sample_type: ProfileSampleType::Percentage,
            profile_sample_percentage: DEFAULT_SAMPLE_PERCENTAGE,
            profile_sample_rows: None,
            sample_data_count: None,
            exclude_columns: Vec::new(),
            include_columns: Vec::new(),
            enable_partition: false,
            partition: PartitionProfilerConfig::default(),
        }
    }
}

impl ProfilerSettingsForm {
    /// Prefill the dialog from a stored config
    pub fn from_config(config: &TableProfilerConfig) -> Self {
        let profile_sample_type = config.profile_sample_type.unwrap_or_default();
        let mut form = Self {
            sql_query: config.profile_query.clone().unwrap_or_default(),
            profile_sample_type,
            sample_data_count: config.sample_data_count,
            exclude_columns: config.exclude_columns.clone(),
            include_columns: config.include_columns.clone(),
            ..Default::default()
        };

        match profile_sample_type {
            ProfileSampleType::Percentage => {
                form.set_sample_percentage(config.profile_sample.unwrap_or(DEFAULT_SAMPLE_PERCENTAGE));
            }
            ProfileSampleType::Rows => form.profile_sample_rows = config.profile_sample,
        }

        if let Some(partition) = &config.partitioning {
            form.enable_partition = partition.enable_partitioning;
            form.partition = partition.clone();
        }

        form
    }

    /// Percentage slider value, kept within 0..=100
    pub fn set_sample_percentage(&mut self, percentage: f64) {
        self.profile_sample_percentage = if percentage.is_nan() {
            DEFAULT_SAMPLE_PERCENTAGE
        } else {
            percentage.clamp(0.0, 100.0)
        };
    }

    pub fn is_column_included(&self, column_name: &str) -> bool {
        self.include_columns.iter().any(|c| c.column_name == column_name)
    }

    /// Add or remove a column from the include list, keeping selection order
    pub fn toggle_include_column(&mut self, column_name: &str) {
        if self.is_column_included(column_name) {
            self.include_columns.retain(|c| c.column_name != column_name);
        } else {
            self.include_columns.push(ColumnProfilerConfig {
                column_name: column_name.to_string(),
                metrics: Vec::new(),
            });
        }
    }

    /// Metrics computed for an included column; empty means all
    pub fn set_include_metrics(&mut self, column_name: &str, metrics: Vec<String>) {
        if let Some(column) = self
            .include_columns
            .iter_mut()
            .find(|c| c.column_name == column_name)
        {
            column.metrics = metrics;
        }
    }

    pub fn to_config(&self) -> TableProfilerConfig {
        let profile_sample = match self.profile_sample_type {
            ProfileSampleType::Percentage => Some(self.profile_sample_percentage),
            ProfileSampleType::Rows => self.profile_sample_rows,
        };

        let sql = self.sql_query.trim();
        let include_columns = self
            .include_columns
            .iter()
            .filter(|column| !column.column_name.trim().is_empty())
            .cloned()
            .collect();

        let partitioning = if self.enable_partition {
            PartitionProfilerConfig {
                enable_partitioning: true,
                ..self.partition.clone()
            }
        } else {
            PartitionProfilerConfig {
                enable_partitioning: false,
                ..Default::default()
            }
        };

        TableProfilerConfig {
            profile_sample_type: Some(self.profile_sample_type),
            profile_sample,
            profile_query: (!sql.is_empty()).then(|| sql.to_string()),
            exclude_columns: self.exclude_columns.clone(),
            include_columns,
            partitioning: Some(partitioning),
            sample_data_count: self.sample_data_count,
        }
    }
}
