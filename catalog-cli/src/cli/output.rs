//! Table rendering for CLI output

pub use catalog_shared::views::format::format_timestamp;
use catalog_shared::views::{OverallTableSummary, SampleData};
use catalog_shared::{
    ColumnProfile, Container, PagingResponse, ProfileSampleType, SystemProfile, TableProfile,
    TableProfilerConfig,
};
use std::fmt::Write;

const CELL_WIDTH: usize = 24;

fn or_dash(value: Option<f64>) -> String {
    value
        .map(catalog_shared::views::format::format_number)
        .unwrap_or_else(|| "-".to_string())
}

/// Single-line cell, cut to the column width
fn cell(value: &str) -> String {
    let flat: String = value
        .chars()
        .map(|c| if c.is_whitespace() { ' ' } else { c })
        .collect();
    if flat.chars().count() > CELL_WIDTH {
        let cut: String = flat.chars().take(CELL_WIDTH - 3).collect();
        format!("{}...", cut)
    } else {
        flat
    }
}

pub fn containers_table(page: &PagingResponse<Vec<Container>>) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<36} {:<24} {:<40} {:<10}", "ID", "NAME", "FQN", "OBJECTS");
    let _ = writeln!(out, "{}", "-".repeat(110));
    for container in &page.data {
        let _ = writeln!(
            out,
            "{:<36} {:<24} {:<40} {:<10}",
            container.id,
            cell(container.label()),
            container.fully_qualified_name,
            or_dash(container.number_of_objects),
        );
    }
    let _ = writeln!(out, "\n{} of {} containers", page.data.len(), page.paging.total);
    if let Some(after) = &page.paging.after {
        let _ = writeln!(out, "Next page: --after {}", after);
    }
    out
}

pub fn container_details(container: &Container) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "ID:          {}", container.id);
    let _ = writeln!(out, "Name:        {}", container.label());
    let _ = writeln!(out, "FQN:         {}", container.fully_qualified_name);
    if let Some(service) = &container.service {
        let _ = writeln!(out, "Service:     {}", service.label());
    }
    if let Some(owner) = &container.owner {
        let _ = writeln!(out, "Owner:       {}", owner.label());
    }
    if let Some(description) = &container.description {
        let _ = writeln!(out, "Description: {}", description);
    }
    if !container.tags.is_empty() {
        let tags: Vec<&str> = container.tags.iter().map(|t| t.tag_fqn.as_str()).collect();
        let _ = writeln!(out, "Tags:        {}", tags.join(", "));
    }
    if container.deleted {
        let _ = writeln!(out, "Deleted:     yes");
    }

    let columns = container.columns();
    if !columns.is_empty() {
        let _ = writeln!(out, "\n{:<30} {:<20}", "COLUMN", "TYPE");
        let _ = writeln!(out, "{}", "-".repeat(50));
        for column in columns {
            let _ = writeln!(out, "{:<30} {:<20}", column.name, column.data_type);
        }
    }
    out
}

pub fn table_profiles_table(profiles: &[TableProfile]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<15} {:<10} {:<10}", "TIMESTAMP", "ROWS", "COLUMNS", "SAMPLE");
    let _ = writeln!(out, "{}", "-".repeat(60));
    for profile in profiles {
        let _ = writeln!(
            out,
            "{:<20} {:<15} {:<10} {:<10}",
            format_timestamp(profile.timestamp),
            or_dash(profile.row_count),
            or_dash(profile.column_count),
            or_dash(profile.profile_sample),
        );
    }
    out
}

pub fn system_profiles_table(profiles: &[SystemProfile]) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{:<20} {:<10} {:<15}", "TIMESTAMP", "OPERATION", "ROWS AFFECTED");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for profile in profiles {
        let operation = profile
            .operation
            .map(|op| format!("{:?}", op).to_uppercase())
            .unwrap_or_else(|| "-".to_string());
        let _ = writeln!(
            out,
            "{:<20} {:<10} {:<15}",
            format_timestamp(profile.timestamp),
            operation,
            profile
                .rows_affected
                .map(|rows| rows.to_string())
                .unwrap_or_else(|| "-".to_string()),
        );
    }
    out
}

pub fn column_profiles_table(profiles: &[ColumnProfile]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        "{:<20} {:<24} {:<12} {:<12} {:<12} {:<12}",
        "TIMESTAMP", "NAME", "VALUES", "NULLS", "UNIQUE", "DISTINCT"
    );
    let _ = writeln!(out, "{}", "-".repeat(96));
    for profile in profiles {
        let _ = writeln!(
            out,
            "{:<20} {:<24} {:<12} {:<12} {:<12} {:<12}",
            format_timestamp(profile.timestamp),
            cell(&profile.name),
            or_dash(profile.values_count),
            or_dash(profile.null_count),
            or_dash(profile.unique_count),
            or_dash(profile.distinct_count),
        );
    }
    out
}

pub fn profiler_config_table(config: &TableProfilerConfig) -> String {
    let mut out = String::new();
    let sample = match (config.profile_sample_type.unwrap_or_default(), config.profile_sample) {
        (_, None) => "-".to_string(),
        (ProfileSampleType::Percentage, Some(pct)) => format!("{}%", or_dash(Some(pct))),
        (ProfileSampleType::Rows, Some(rows)) => format!("{} rows", or_dash(Some(rows))),
    };
    let _ = writeln!(out, "Sample:           {}", sample);
    if let Some(count) = config.sample_data_count {
        let _ = writeln!(out, "Sample data rows: {}", count);
    }
    if let Some(query) = &config.profile_query {
        let _ = writeln!(out, "Query:            {}", query);
    }
    if !config.exclude_columns.is_empty() {
        let _ = writeln!(out, "Exclude columns:  {}", config.exclude_columns.join(", "));
    }
    if !config.include_columns.is_empty() {
        let included: Vec<String> = config
            .include_columns
            .iter()
            .map(|c| {
                if c.metrics.is_empty() {
                    c.column_name.clone()
                } else {
                    format!("{} ({})", c.column_name, c.metrics.join(", "))
                }
            })
            .collect();
        let _ = writeln!(out, "Include columns:  {}", included.join(", "));
    }
    match &config.partitioning {
        Some(partition) if partition.enable_partitioning => {
            let interval = match (partition.partition_interval, partition.partition_interval_unit) {
                (Some(n), Some(unit)) => format!("{} {}", n, unit.as_str()),
                (Some(n), None) => n.to_string(),
                _ => "-".to_string(),
            };
            let _ = writeln!(
                out,
                "Partition:        {} {} {}",
                partition.partition_column_name.as_deref().unwrap_or("-"),
                partition
                    .partition_interval_type
                    .map(|t| t.as_str())
                    .unwrap_or("-"),
                interval,
            );
        }
        _ => {
            let _ = writeln!(out, "Partition:        disabled");
        }
    }
    out
}

pub fn summary_table(rows: &[OverallTableSummary]) -> String {
    let mut out = String::new();
    for row in rows {
        let _ = writeln!(out, "{:<16} {}", row.title, row.value);
    }
    out
}

pub fn sample_data_table(data: &SampleData) -> String {
    let mut out = String::new();
    let header: Vec<String> = data
        .columns
        .iter()
        .map(|c| format!("{:<width$}", cell(&c.name), width = CELL_WIDTH))
        .collect();
    let _ = writeln!(out, "{}", header.join(" ").trim_end());
    let _ = writeln!(out, "{}", "-".repeat((CELL_WIDTH + 1) * data.columns.len().max(1)));

    for i in 0..data.rows.len() {
        let row: Vec<String> = (0..data.columns.len())
            .map(|j| format!("{:<width$}", cell(&data.cell(i, j)), width = CELL_WIDTH))
            .collect();
        let _ = writeln!(out, "{}", row.join(" ").trim_end());
    }
    let _ = writeln!(out, "\n{} rows", data.rows.len());
    out
}
