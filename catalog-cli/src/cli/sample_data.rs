use std::path::PathBuf;

use catalog_shared::client::Transport;
use catalog_shared::views::{CustomMetricForm, SampleData};
use catalog_shared::{ContainerClient, TableData};
use clap::Subcommand;
use uuid::Uuid;

use super::{output, print_json, read_json, OutputFormat};

// =============================================================================
// Sample Data Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum SampleDataCommands {
    /// Show the sample rows of a container
    Get { id: Uuid },
    /// Upload sample rows from a JSON file (`{"columns": [...], "rows": [[...]]}`)
    Put { id: Uuid, data: PathBuf },
    /// Delete the sample rows of a container
    Delete {
        id: Uuid,
        /// Delete without confirmation
        #[arg(short, long)]
        force: bool,
    },
}

impl SampleDataCommands {
    pub async fn execute<T: Transport>(
        &self,
        client: &ContainerClient<T>,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        match self {
            SampleDataCommands::Get { id } => {
                let container = client.get_sample_data(id).await?;
                match (format, SampleData::from_container(&container)) {
                    (OutputFormat::Json, _) => print_json(&container.sample_data)?,
                    (OutputFormat::Table, Some(data)) if !data.is_empty() => {
                        print!("{}", output::sample_data_table(&data))
                    }
                    (OutputFormat::Table, _) => {
                        println!("No sample data for {}", container.fully_qualified_name)
                    }
                }
                Ok(())
            }
            SampleDataCommands::Put { id, data } => {
                let data: TableData = read_json(data)?;
                let container = client.put_sample_data(id, &data).await?;
                println!(
                    "Uploaded {} sample rows to {}",
                    data.rows.len(),
                    container.fully_qualified_name
                );
                Ok(())
            }
            SampleDataCommands::Delete { id, force } => {
                if !force {
                    println!(
                        "Are you sure you want to delete the sample data of {}? Use --force to confirm.",
                        id
                    );
                    return Ok(());
                }

                let container = client.delete_sample_data(id).await?;
                println!("Sample data deleted from {}", container.fully_qualified_name);
                Ok(())
            }
        }
    }
}

// =============================================================================
// Custom Metric Commands
// =============================================================================

#[derive(Subcommand, Debug)]
pub enum CustomMetricCommands {
    /// Add or update a custom metric
    Add {
        id: Uuid,
        #[arg(short, long)]
        name: String,
        /// SQL expression computing the metric
        #[arg(short, long)]
        expression: String,
        /// Attach the metric to this column instead of the container
        #[arg(short, long)]
        column: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a custom metric
    Delete {
        id: Uuid,
        name: String,
        #[arg(short, long)]
        column: Option<String>,
    },
}

/// Form for `add`; duplicate names are left to the server
fn metric_form(
    name: &str,
    expression: &str,
    column: Option<&str>,
    description: Option<&str>,
) -> CustomMetricForm {
    CustomMetricForm {
        name: name.to_string(),
        expression: expression.to_string(),
        column_name: column.map(str::to_string),
        description: description.unwrap_or_default().to_string(),
        is_column_metric: column.is_some(),
        is_edit_mode: true,
    }
}

impl CustomMetricCommands {
    pub async fn execute<T: Transport>(
        &self,
        client: &ContainerClient<T>,
        format: OutputFormat,
    ) -> anyhow::Result<()> {
        match self {
            CustomMetricCommands::Add {
                id,
                name,
                expression,
                column,
                description,
            } => {
                let metric = metric_form(name, expression, column.as_deref(), description.as_deref())
                    .validate(&[])?;
                let container = client.add_custom_metric(id, &metric).await?;
                match format {
                    OutputFormat::Json => print_json(&container)?,
                    OutputFormat::Table => println!(
                        "Custom metric {} saved on {}",
                        metric.name, container.fully_qualified_name
                    ),
                }
                Ok(())
            }
            CustomMetricCommands::Delete { id, name, column } => {
                let container = client.delete_custom_metric(id, column.as_deref(), name).await?;
                println!("Custom metric {} deleted from {}", name, container.fully_qualified_name);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_shared::views::CustomMetricFormError;
    use clap::Parser;

    #[derive(Parser, Debug)]
    struct TestCli {
        #[command(subcommand)]
        command: CustomMetricCommands,
    }

    const ID: &str = "6a0b6c1a-3b0c-4a55-9d1c-1b4cd5b8f4a2";

    fn add_form(args: &[&str]) -> CustomMetricForm {
        let cli = TestCli::parse_from(["test", "add", ID].into_iter().chain(args.iter().copied()));
        match cli.command {
            CustomMetricCommands::Add {
                name,
                expression,
                column,
                description,
                ..
            } => metric_form(&name, &expression, column.as_deref(), description.as_deref()),
            other => panic!("unexpected command: {:?}", other),
        }
    }

    #[test]
    fn test_column_metric_form() {
        let form = add_form(&["--name", " ratio ", "--expression", "select 1", "--column", "amount"]);
        assert!(form.is_column_metric);

        let metric = form.validate(&[]).unwrap();
        assert_eq!(metric.name, "ratio");
        assert_eq!(metric.column_name.as_deref(), Some("amount"));
        assert_eq!(metric.description, None);
    }

    #[test]
    fn test_blank_expression_is_rejected() {
        assert_eq!(
            add_form(&["--name", "ratio", "--expression", "  "]).validate(&[]),
            Err(CustomMetricFormError::MissingExpression)
        );
    }

    #[test]
    fn test_table_metric_form_keeps_description() {
        let form = add_form(&["--name", "rows", "--expression", "count(*)", "--description", "row total"]);
        assert!(!form.is_column_metric);

        let metric = form.validate(&[]).unwrap();
        assert_eq!(metric.column_name, None);
        assert_eq!(metric.description.as_deref(), Some("row total"));
    }
}
