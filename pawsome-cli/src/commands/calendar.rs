use chrono::Datelike;
use clap::Args;
use pawsome_core::view::{activity_dates, ActivityCalendar, WEEKDAY_LABELS};

use super::{today, Workspace};
use crate::config::Config;

/// Show this month's logging activity for the selected dog
#[derive(Args)]
pub struct CalendarCommand {}

impl CalendarCommand {
    pub async fn run(&self, config: &Config) -> Result<(), Box<dyn std::error::Error>> {
        let workspace = Workspace::open(config).await?;
        let dog = workspace.active_dog()?;

        let weight_logs = workspace.store.weight_logs();
        let food_logs = workspace.store.food_logs();
        let logged = activity_dates(
            weight_logs
                .iter()
                .map(|l| &l.date)
                .chain(food_logs.iter().map(|l| &l.date)),
        );
        let calendar = ActivityCalendar::for_month(today(), &logged);

        println!("{}", dog.name);
        print!("{}", render_calendar(&calendar));
        Ok(())
    }
}

/// Month grid with `*` after days that have a log.
pub(crate) fn render_calendar(calendar: &ActivityCalendar) -> String {
    let mut out = format!("{:^28}\n", calendar.month_label());

    for label in WEEKDAY_LABELS {
        // Labels are double width
        out.push(' ');
        out.push_str(label);
        out.push(' ');
    }
    out.push('\n');

    for week in calendar.weeks() {
        for cell in week {
            match cell {
                Some(day) => {
                    let mark = if day.has_log { '*' } else { ' ' };
                    out.push_str(&format!("{:>3}{}", day.date.day(), mark));
                }
                None => out.push_str("    "),
            }
        }
        out.push('\n');
    }

    if let Some(day) = calendar.days.iter().find(|d| d.is_today) {
        out.push_str(&format!(
            "今日: {}  記録: {}日\n",
            day.date,
            calendar.logged_day_count()
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::BTreeSet;

    #[test]
    fn test_render_february() {
        let logged: BTreeSet<NaiveDate> = [NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()].into();
        let calendar =
            ActivityCalendar::for_month(NaiveDate::from_ymd_opt(2024, 2, 14).unwrap(), &logged);
        let output = render_calendar(&calendar);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(lines[0].trim(), "2月");
        assert_eq!(lines[1], " 日  月  火  水  木  金  土 ");
        // Thursday start: four blank cells, then the logged first day.
        assert!(lines[2].starts_with("                  1*"));
        assert!(output.contains(" 29 "));
        assert!(output.contains("今日: 2024-02-14  記録: 1日"));
    }
}
