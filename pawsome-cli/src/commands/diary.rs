use clap::{Args, Subcommand};
use pawsome_core::view::DiaryForm;

use super::{today, OutputFormat, Workspace};
use crate::config::Config;

#[derive(Args)]
pub struct DiaryCommand {
    #[command(subcommand)]
    pub command: DiarySubcommand,
}

#[derive(Subcommand)]
pub enum DiarySubcommand {
    /// Write today's diary entry for the selected dog
    Add {
        #[arg(long)]
        title: String,

        #[arg(long)]
        content: String,
    },

    /// List the selected dog's diary, newest first
    List {
        /// Show at most this many entries
        #[arg(long, short)]
        limit: Option<usize>,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },
}

impl DiaryCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let mut workspace = Workspace::open(config).await?;

        match &self.command {
            DiarySubcommand::Add { title, content } => {
                let dog_id = workspace.active_dog_id()?;
                let diary = DiaryForm::new(title.as_str(), content.as_str())
                    .submit(Some(dog_id.as_str()), today())
                    .ok_or("Title and content are required")?;

                let created = workspace
                    .store
                    .add_diary(diary)
                    .await
                    .ok_or("Failed to save diary")?;
                println!("Saved diary entry:");
                println!();
                print!("{}", created);
                Ok(())
            }
            DiarySubcommand::List { limit, format } => {
                let dog = workspace.active_dog()?;
                let mut diaries = workspace.store.diaries();
                if let Some(n) = limit {
                    diaries.truncate(*n);
                }

                match format {
                    OutputFormat::Json => {
                        println!("{}", serde_json::to_string_pretty(&diaries)?);
                    }
                    OutputFormat::Text => {
                        if diaries.is_empty() {
                            println!("No diary entries for {}.", dog.name);
                            return Ok(());
                        }
                        for (i, diary) in diaries.iter().enumerate() {
                            if i > 0 {
                                println!();
                            }
                            print!("{}", diary);
                        }
                    }
                }
                Ok(())
            }
        }
    }
}
