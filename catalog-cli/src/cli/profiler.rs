use std::path::PathBuf;

use catalog_shared::client::{ColumnProfileParams, ProfileRange, Transport};
use catalog_shared::views::TableProfilerViewModel;
use catalog_shared::{ContainerClient, TableProfilerConfig};
use clap::{Args, Subcommand};
use uuid::Uuid;

use super::{output, print_json, read_json, OutputFormat};

/// Optional time window in epoch milliseconds
#[derive(Args, Debug, Clone, Copy, Default)]
pub struct RangeArgs {
    #[arg(long)]
    pub start_ts: Option<i64>,
    #[arg(long)]
    pub end_ts: Option<i64>,
}

impl RangeArgs {
    fn to_range(self) -> ProfileRange {
        ProfileRange {
            start_ts: self.start_ts,
            end_ts: self.end_ts,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum ProfilerCommands {
    /// Show the profiler config of a container
    Config { id: Uuid },
    /// Replace the profiler config with the contents of a JSON file
    SetConfig {
        id: Uuid,
        #[arg(value_name = "CONFIG_JSON")]
        file: PathBuf,
    },
    /// Remove the profiler config
    DeleteConfig { id: Uuid },
    /// Table profiles over a time window
    Table {
        fqn: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// System (DML) profiles over a time window
    System {
        fqn: String,
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Column profiles for a column FQN
    Columns {
        column_fqn: String,
        #[command(flatten)]
        range: RangeArgs,
        #[arg(short, long)]
        limit: Option<u32>,
        #[arg(long)]
        before: Option<String>,
        #[arg(long)]
        after: Option<String>,
    },
    /// Latest table profile
    Latest { fqn: String },
    /// Summary of the latest profile
    Summary { fqn: String },
    /// Delete one profile record
    Delete {
        fqn: String,
        /// Profile timestamp (epoch milliseconds)
        timestamp: i64,
        /// table or column
        #[arg(long, default_value = "table")]
        entity_type: String,
        /// Delete without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

impl ProfilerCommands {
    pub async fn execute<T: Transport>(
        &self,
        client: &ContainerClient<T>,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        match self {
            ProfilerCommands::Config { id } => {
                let container = client.get_table_profiler_config(id).await?;
                match (format, &container.table_profiler_config) {
                    (OutputFormat::Json, config) => print_json(config)?,
                    (OutputFormat::Table, Some(config)) => print!("{}", output::profiler_config_table(config)),
                    (OutputFormat::Table, None) => {
                        println!("No profiler config set for {}", container.fully_qualified_name)
                    }
                }
                Ok(())
            }
            ProfilerCommands::SetConfig { id, file } => {
                let config: TableProfilerConfig = read_json(file)?;
                let container = client.put_table_profiler_config(id, &config).await?;
                match format {
                    OutputFormat::Json => print_json(&container.table_profiler_config)?,
                    OutputFormat::Table => {
                        println!("Profiler config updated for {}", container.fully_qualified_name);
                        if let Some(config) = &container.table_profiler_config {
                            print!("{}", output::profiler_config_table(config));
                        }
                    }
                }
                Ok(())
            }
            ProfilerCommands::DeleteConfig { id } => {
                let container = client.delete_table_profiler_config(id).await?;
                match format {
                    OutputFormat::Json => print_json(&container)?,
                    OutputFormat::Table => {
                        println!("Profiler config removed from {}", container.fully_qualified_name)
                    }
                }
                Ok(())
            }
            ProfilerCommands::Table { fqn, range } => {
                let page = client.get_table_profiles(fqn, &range.to_range()).await?;
                match format {
                    OutputFormat::Json => print_json(&page)?,
                    OutputFormat::Table => print!("{}", output::table_profiles_table(&page.data)),
                }
                Ok(())
            }
            ProfilerCommands::System { fqn, range } => {
                let page = client.get_system_profiles(fqn, &range.to_range()).await?;
                match format {
                    OutputFormat::Json => print_json(&page)?,
                    OutputFormat::Table => print!("{}", output::system_profiles_table(&page.data)),
                }
                Ok(())
            }
            ProfilerCommands::Columns {
                column_fqn,
                range,
                limit,
                before,
                after,
            } => {
                let params = ColumnProfileParams {
                    limit: *limit,
                    before: before.clone(),
                    after: after.clone(),
                    ..ColumnProfileParams::in_range(range.to_range())
                };
                let page = client.get_column_profiles(column_fqn, &params).await?;
                match format {
                    OutputFormat::Json => print_json(&page)?,
                    OutputFormat::Table => print!("{}", output::column_profiles_table(&page.data)),
                }
                Ok(())
            }
            ProfilerCommands::Latest { fqn } => {
                let container = client.get_latest_profile(fqn).await?;
                match (format, &container.profile) {
                    (OutputFormat::Json, _) => print_json(&container)?,
                    (OutputFormat::Table, Some(profile)) => {
                        print!("{}", output::table_profiles_table(std::slice::from_ref(profile)))
                    }
                    (OutputFormat::Table, None) => println!("No profile available for {}", fqn),
                }
                Ok(())
            }
            ProfilerCommands::Summary { fqn } => {
                let container = client.get_latest_profile(fqn).await?;
                let model = TableProfilerViewModel {
                    table_profiler: Some(container),
                    ..Default::default()
                };
                if !model.is_profiling_enabled() {
                    tracing::warn!("Profiler has not run for {}", fqn);
                }

                let summary = model.overall_summary();
                match format {
                    OutputFormat::Json => {
                        let rows: Vec<serde_json::Value> = summary
                            .iter()
                            .map(|row| serde_json::json!({ "title": row.title, "value": row.value }))
                            .collect();
                        print_json(&rows)?
                    }
                    OutputFormat::Table => print!("{}", output::summary_table(&summary)),
                }
                Ok(())
            }
            ProfilerCommands::Delete {
                fqn,
                timestamp,
                entity_type,
                force,
            } => {
                if !force {
                    println!(
                        "Are you sure you want to delete the {} profile of {} at {}? Use --force to confirm.",
                        entity_type,
                        fqn,
                        output::format_timestamp(*timestamp)
                    );
                    return Ok(());
                }

                client.delete_profile_data(fqn, entity_type, *timestamp).await?;
                println!("Profile deleted.");
                Ok(())
            }
        }
    }
}
