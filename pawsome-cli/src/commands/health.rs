use clap::Args;
use pawsome_core::view::ChartSeries;

use super::{OutputFormat, Workspace};
use crate::config::Config;

const BAR_WIDTH: f64 = 30.0;

/// Show weight and food trends for the selected dog
#[derive(Args)]
pub struct HealthCommand {
    /// Output format
    #[arg(long, short, value_enum, default_value = "text")]
    format: OutputFormat,
}

impl HealthCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let workspace = Workspace::open(config).await?;
        let dog = workspace.active_dog()?;

        let weight = ChartSeries::weight(workspace.store.weight_logs());
        let food = ChartSeries::food(workspace.store.food_logs());

        match self.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "dog_id": dog.id,
                    "weight": points_json(&weight),
                    "food": points_json(&food),
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                println!("{}", dog.name);
                println!();
                print!("{}", render_chart(&weight));
                println!();
                print!("{}", render_chart(&food));
            }
        }
        Ok(())
    }
}

fn points_json(series: &ChartSeries) -> serde_json::Value {
    series
        .points
        .iter()
        .map(|p| serde_json::json!({ "date": p.date, "label": p.label, "value": p.value }))
        .collect()
}

/// Horizontal bar chart scaled to the series' value range.
pub(crate) fn render_chart(series: &ChartSeries) -> String {
    let mut out = format!("{}\n", series.kind.title());

    let Some((lo, hi)) = series.domain() else {
        out.push_str("  データがありません\n");
        return out;
    };
    let span = hi - lo;

    for point in &series.points {
        let filled = if span > 0.0 {
            ((point.value - lo) / span * BAR_WIDTH).round() as usize
        } else {
            0
        };
        out.push_str(&format!(
            "  {} {} {}\n",
            point.label,
            "█".repeat(filled.max(1)),
            point.value
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use pawsome_core::{FoodLog, WeightLog};

    #[test]
    fn test_render_weight_chart() {
        let logs = vec![
            WeightLog {
                id: "w1".into(),
                dog_id: "dog-1".into(),
                date: NaiveDate::from_ymd_opt(2023, 10, 1).unwrap(),
                weight: 8.5,
            },
            WeightLog {
                id: "w2".into(),
                dog_id: "dog-1".into(),
                date: NaiveDate::from_ymd_opt(2023, 10, 8).unwrap(),
                weight: 8.6,
            },
        ];
        let output = render_chart(&ChartSeries::weight(&logs));
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0], "体重の推移 (kg)");
        assert!(lines[1].starts_with("  10/01 █"));
        assert!(lines[1].ends_with(" 8.5"));
        assert!(lines[2].ends_with(" 8.6"));
        // 8.6 sits higher in the padded range than 8.5.
        assert!(lines[2].chars().count() > lines[1].chars().count());
    }

    #[test]
    fn test_render_empty_chart() {
        let output = render_chart(&ChartSeries::food(&Vec::<FoodLog>::new()));
        assert_eq!(output, "食事量の推移 (g)\n  データがありません\n");
    }
}
