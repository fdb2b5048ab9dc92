use clap::Args;
use pawsome_core::view::Dashboard;

use super::calendar::render_calendar;
use super::{today, OutputFormat, Workspace};
use crate::config::Config;

/// Show the selected dog's summary
#[derive(Args)]
pub struct HomeCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl HomeCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let workspace = Workspace::open(config).await?;
        let dashboard = Dashboard::build(&workspace.store, today());

        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&dashboard)?),
            OutputFormat::Text => print!("{}", render_dashboard(&dashboard)),
        }
        Ok(())
    }
}

fn render_dashboard(dashboard: &Dashboard) -> String {
    let Some(dog) = &dashboard.dog else {
        return "No dogs yet. Add one with 'paw dog add'.\n".to_string();
    };

    let mut out = format!("{}  {}", dog.name, dog.breed);
    if let Some(age) = &dashboard.age {
        out.push_str(&format!("  {}", age));
    }
    out.push('\n');
    out.push_str(&format!(
        "体重: {} kg   食事: {} g\n\n",
        dashboard.weight_label(),
        dashboard.food_label()
    ));

    out.push_str("最近の日記\n");
    if dashboard.recent_diaries.is_empty() {
        out.push_str("  (まだありません)\n");
    }
    for diary in &dashboard.recent_diaries {
        out.push_str(&format!("  {}  {}\n", diary.date, diary.title));
    }
    out.push('\n');

    out.push_str(&render_calendar(&dashboard.calendar));
    out
}
