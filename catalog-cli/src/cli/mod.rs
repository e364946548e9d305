//! CLI subcommands for the catalog containers API
//!
//! Provides commands for managing:
//! - Containers (list, get, patch, restore)
//! - Followers (add, remove)
//! - Profiler (config, profiles, summary)
//! - Sample data and custom metrics

pub mod output;
mod profiler;
mod sample_data;

pub use profiler::ProfilerCommands;
pub use sample_data::{CustomMetricCommands, SampleDataCommands};

use std::path::{Path, PathBuf};

use anyhow::Context;
use catalog_shared::client::{ListParams, Transport};
use catalog_shared::{ContainerClient, EntityReference, Include, PatchOperation};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use uuid::Uuid;

/// Output format for command results
#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    Json,
    #[default]
    Table,
}

pub(crate) fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Read and parse a JSON document from disk
pub(crate) fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> anyhow::Result<T> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    serde_json::from_str(&content).with_context(|| format!("Invalid JSON in {}", path.display()))
}

// =============================================================================
// Container Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum ContainerCommands {
    /// List containers
    List {
        /// Only containers of this object store service
        #[arg(long)]
        service: Option<String>,
        /// Only root containers
        #[arg(long)]
        root: bool,
        /// Fields to include (comma separated)
        #[arg(long)]
        fields: Option<String>,
        /// Page size
        #[arg(short, long)]
        limit: Option<u32>,
        /// Cursor of the previous page
        #[arg(long)]
        before: Option<String>,
        /// Cursor of the next page
        #[arg(long)]
        after: Option<String>,
        /// all, deleted or non-deleted
        #[arg(long)]
        include: Option<Include>,
    },
    /// Get a container by fully qualified name
    Get {
        fqn: String,
        #[arg(long)]
        fields: Option<String>,
        #[arg(long)]
        include: Option<Include>,
    },
    /// Get a container by ID
    GetId {
        id: Uuid,
        #[arg(long)]
        fields: Option<String>,
        #[arg(long)]
        include: Option<Include>,
    },
    /// Apply a JSON patch document to a container
    Patch {
        id: Uuid,
        /// File holding the JSON patch operations
        patch: PathBuf,
    },
    /// Restore a soft-deleted container
    Restore { id: Uuid },
}

impl ContainerCommands {
    pub async fn execute<T: Transport>(
        &self,
        client: &ContainerClient<T>,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        match self {
            ContainerCommands::List {
                service,
                root,
                fields,
                limit,
                before,
                after,
                include,
            } => {
                let params = ListParams {
                    fields: fields.clone(),
                    include: *include,
                    limit: *limit,
                    before: before.clone(),
                    after: after.clone(),
                    service: service.clone(),
                    root: root.then_some(true),
                };
                let page = client.list_containers(&params).await?;
                match format {
                    OutputFormat::Json => print_json(&page)?,
                    OutputFormat::Table => print!("{}", output::containers_table(&page)),
                }
                Ok(())
            }
            ContainerCommands::Get {
                fqn,
                fields,
                include,
            } => {
                let params = ListParams {
                    fields: fields.clone(),
                    include: *include,
                    ..Default::default()
                };
                let container = client.get_container_by_fqn(fqn, &params).await?;
                match format {
                    OutputFormat::Json => print_json(&container)?,
                    OutputFormat::Table => print!("{}", output::container_details(&container)),
                }
                Ok(())
            }
            ContainerCommands::GetId {
                id,
                fields,
                include,
            } => {
                let params = ListParams {
                    fields: fields.clone(),
                    include: *include,
                    ..Default::default()
                };
                let container = client.get_container_by_id(id, &params).await?;
                match format {
                    OutputFormat::Json => print_json(&container)?,
                    OutputFormat::Table => print!("{}", output::container_details(&container)),
                }
                Ok(())
            }
            ContainerCommands::Patch { id, patch } => {
                let operations: Vec<PatchOperation> = read_json(patch)?;
                tracing::info!("Applying {} patch operations to {}", operations.len(), id);
                let container = client.patch_container(id, &operations).await?;
                match format {
                    OutputFormat::Json => print_json(&container)?,
                    OutputFormat::Table => {
                        println!("Container {} updated.", container.fully_qualified_name)
                    }
                }
                Ok(())
            }
            ContainerCommands::Restore { id } => {
                let container = client.restore_container(id).await?;
                match format {
                    OutputFormat::Json => print_json(&container)?,
                    OutputFormat::Table => {
                        println!("Container {} restored.", container.fully_qualified_name)
                    }
                }
                Ok(())
            }
        }
    }
}

// =============================================================================
// Follower Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum FollowerCommands {
    /// Follow a container as the given user
    Add { id: Uuid, user_id: Uuid },
    /// Stop following a container
    Remove { id: Uuid, user_id: Uuid },
}

fn follower_names(followers: &[EntityReference]) -> String {
    if followers.is_empty() {
        return "-".to_string();
    }
    followers
        .iter()
        .map(EntityReference::label)
        .collect::<Vec<_>>()
        .join(", ")
}

impl FollowerCommands {
    pub async fn execute<T: Transport>(
        &self,
        client: &ContainerClient<T>,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        match self {
            FollowerCommands::Add { id, user_id } => {
                let change = client.add_follower(id, user_id).await?;
                match format {
                    OutputFormat::Json => print_json(&change)?,
                    OutputFormat::Table => println!("Followers added: {}", follower_names(&change.added())),
                }
                Ok(())
            }
            FollowerCommands::Remove { id, user_id } => {
                let change = client.remove_follower(id, user_id).await?;
                match format {
                    OutputFormat::Json => print_json(&change)?,
                    OutputFormat::Table => {
                        println!("Followers removed: {}", follower_names(&change.removed()))
                    }
                }
                Ok(())
            }
        }
    }
}
