//! Month grid marking the days that have a weight or food log.

use chrono::{Datelike, Months, NaiveDate};
use serde::Serialize;
use std::collections::BTreeSet;

pub const WEEKDAY_LABELS: [&str; 7] = ["日", "月", "火", "水", "木", "金", "土"];

/// One day cell of the calendar.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub has_log: bool,
    pub is_today: bool,
}

/// The month containing `today`, laid out Sunday-first.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityCalendar {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1 (Sunday = 0).
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}

impl ActivityCalendar {
    pub fn for_month(today: NaiveDate, logged: &BTreeSet<NaiveDate>) -> Self {
        let first = today.with_day(1).unwrap_or(today);
        let next_month = first + Months::new(1);
        let days_in_month = (next_month - first).num_days() as u32;

        let days = (1..=days_in_month)
            .filter_map(|d| first.with_day(d))
            .map(|date| CalendarDay {
                date,
                has_log: logged.contains(&date),
                is_today: date == today,
            })
            .collect();

        Self {
            year: first.year(),
            month: first.month(),
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        }
    }

    /// Header text such as `"2月"`.
    pub fn month_label(&self) -> String {
        format!("{}月", self.month)
    }

    /// Rows of seven cells, `None` for padding.
    pub fn weeks(&self) -> Vec<Vec<Option<&CalendarDay>>> {
        let mut cells: Vec<Option<&CalendarDay>> = Vec::new();
        cells.extend((0..self.leading_blanks).map(|_| None));
        cells.extend(self.days.iter().map(Some));
        while cells.len() % 7 != 0 {
            cells.push(None);
        }
        cells.chunks(7).map(|week| week.to_vec()).collect()
    }

    pub fn logged_day_count(&self) -> usize {
        self.days.iter().filter(|d| d.has_log).count()
    }
}

/// Union of log dates, de-duplicated.
pub fn activity_dates<'a>(dates: impl IntoIterator<Item = &'a NaiveDate>) -> BTreeSet<NaiveDate> {
    dates.into_iter().copied().collect()
}
