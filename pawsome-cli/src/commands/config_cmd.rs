use clap::{Args, Subcommand};
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use super::OutputFormat;
use crate::config::Config;

const DEFAULT_CONFIG: &str = r#"# pawsome configuration

backend:
  # Base URL of your backend project
  url: ""
  # Public anon key of the project
  anon_key: ""

# Where the login session is kept (default: ~/.local/share/pawsome)
# data_dir: ~/.local/share/pawsome
"#;

#[derive(Args)]
pub struct ConfigCommand {
    #[command(subcommand)]
    pub command: ConfigSubcommand,
}

#[derive(Subcommand)]
pub enum ConfigSubcommand {
    /// Show current configuration values
    Show {
        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// Initialize configuration file
    Init,
}

impl ConfigCommand {
    pub fn run(
        &self,
        config: &Config,
        config_path: Option<PathBuf>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        match &self.command {
            ConfigSubcommand::Show { format } => {
                match format {
                    OutputFormat::Json => {
                        println!("{}", to_json(config)?);
                    }
                    OutputFormat::Text => {
                        println!("Configuration");
                        println!("=============\n");

                        if let Some(path) = &config.config_file {
                            println!("Config file: {}", path.display());
                        } else {
                            println!(
                                "Config file: {} (not found)",
                                config_path
                                    .unwrap_or_else(Config::default_config_path)
                                    .display()
                            );
                        }
                        println!();

                        println!("backend.url: {}", config.backend_url.value);
                        println!("  source: {}", config.backend_url.source);
                        println!();

                        println!("backend.anon_key: {}", config.masked_anon_key());
                        println!("  source: {}", config.anon_key.source);
                        println!();

                        println!("data_dir: {}", config.data_dir.value.display());
                        println!("  source: {}", config.data_dir.source);
                    }
                }
                Ok(())
            }

            ConfigSubcommand::Init => {
                let config_path = config_path.unwrap_or_else(Config::default_config_path);

                if config_path.exists() {
                    println!("Config file already exists: {}", config_path.display());
                    println!("Use 'paw config show' to view current configuration.");
                    return Ok(());
                }

                if let Some(parent) = config_path.parent() {
                    fs::create_dir_all(parent)?;
                }

                let mut file = fs::File::create(&config_path)?;
                file.write_all(DEFAULT_CONFIG.as_bytes())?;

                println!("Created config file: {}", config_path.display());
                println!("\nSet backend.url and backend.anon_key, then run 'paw auth login'.");
                Ok(())
            }
        }
    }
}

/// Config as JSON, with the anon key masked like the text output.
fn to_json(config: &Config) -> Result<String, serde_json::Error> {
    let mut value = serde_json::to_value(config)?;
    value["anon_key"]["value"] = serde_json::Value::String(config.masked_anon_key());
    serde_json::to_string_pretty(&value)
}
