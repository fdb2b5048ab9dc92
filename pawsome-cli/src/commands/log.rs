use clap::{Args, Subcommand, ValueEnum};
use pawsome_core::view::{LogEntry, LogForm, LogKind};

use super::{today, OutputFormat, Workspace};
use crate::config::Config;

#[derive(Clone, Copy, ValueEnum)]
pub enum KindArg {
    Weight,
    Food,
}

#[derive(Args)]
pub struct LogCommand {
    #[command(subcommand)]
    pub command: LogSubcommand,
}

#[derive(Subcommand)]
pub enum LogSubcommand {
    /// Record today's weight (kg) for the selected dog
    Weight {
        /// Weight in kilograms
        value: String,
    },

    /// Record today's food amount (g) for the selected dog
    Food {
        /// Amount in grams
        value: String,

        /// Note about the meal
        #[arg(long)]
        memo: Option<String>,
    },

    /// List the selected dog's logs
    List {
        /// Only one kind of log
        #[arg(long, short, value_enum)]
        kind: Option<KindArg>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl LogCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut workspace = Workspace::open(config).await?;

        let form = match &self.command {
            LogSubcommand::Weight { value } => LogForm::new(LogKind::Weight, value.as_str()),
            LogSubcommand::Food { value, memo } => LogForm::new(LogKind::Food, value.as_str())
                .with_memo(memo.clone().unwrap_or_default()),
            LogSubcommand::List { kind, format } => return list(&workspace, *kind, format),
        };

        let dog_id = workspace.active_dog_id()?;
        let entry = form
            .submit(Some(dog_id.as_str()), today())
            .ok_or_else(|| format!("Invalid {}: '{}'", form.kind.label(), form.value))?;

        match entry {
            LogEntry::Weight(log) => {
                let created = workspace
                    .store
                    .add_weight_log(log)
                    .await
                    .ok_or("Failed to save weight log")?;
                println!("Logged {}", created);
            }
            LogEntry::Food(log) => {
                let created = workspace
                    .store
                    .add_food_log(log)
                    .await
                    .ok_or("Failed to save food log")?;
                println!("Logged {}", created);
            }
        }
        Ok(())
    }
}

fn list(
    workspace: &Workspace,
    kind: Option<KindArg>,
    format: &OutputFormat,
) -> Result<(), Box<dyn std::error::Error>> {
    let dog = workspace.active_dog()?;
    let show_weight = !matches!(kind, Some(KindArg::Food));
    let show_food = !matches!(kind, Some(KindArg::Weight));

    let weight_logs = if show_weight {
        workspace.store.weight_logs()
    } else {
        Vec::new()
    };
    let food_logs = if show_food {
        workspace.store.food_logs()
    } else {
        Vec::new()
    };

    match format {
        OutputFormat::Json => {
            let output = serde_json::json!({
                "dog_id": dog.id,
                "weight_logs": weight_logs,
                "food_logs": food_logs,
            });
            println!("{}", serde_json::to_string_pretty(&output)?);
        }
        OutputFormat::Text => {
            if show_weight {
                println!("{} - {}", dog.name, LogKind::Weight.label());
                if weight_logs.is_empty() {
                    println!("  (none)");
                }
                for log in &weight_logs {
                    println!("  {}", log);
                }
            }
            if show_weight && show_food {
                println!();
            }
            if show_food {
                println!("{} - {}", dog.name, LogKind::Food.label());
                if food_logs.is_empty() {
                    println!("  (none)");
                }
                for log in &food_logs {
                    println!("  {}", log);
                }
            }
        }
    }
    Ok(())
}
