//! Age of a dog in whole years and months.

use chrono::{Datelike, Local, NaiveDate};
use std::fmt;

/// Elapsed full years and months between a birthday and a reference date.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Age {
    pub years: i32,
    pub months: i32,
}

impl Age {
    /// Computes the age on `today`, borrowing a month while the birthday's
    /// day-of-month has not come round yet.
    pub fn between(birthday: NaiveDate, today: NaiveDate) -> Self {
        let mut years = today.year() - birthday.year();
        let mut months = today.month() as i32 - birthday.month() as i32;

        if today.day() < birthday.day() {
            months -= 1;
        }

        if months < 0 {
            months += 12;
            years -= 1;
        }

        Self { years, months }
    }
}

impl fmt::Display for Age {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.years == 0 {
            write!(f, "{}ヶ月", self.months)
        } else if self.months == 0 {
            write!(f, "{}歳", self.years)
        } else {
            write!(f, "{}歳{}ヶ月", self.years, self.months)
        }
    }
}

/// Formats the age at `today` as `"5ヶ月"`, `"2歳"` or `"2歳2ヶ月"`.
pub fn calculate_age(birthday: NaiveDate, today: NaiveDate) -> String {
    Age::between(birthday, today).to_string()
}

/// Like [`calculate_age`], against the local current date.
pub fn age_today(birthday: NaiveDate) -> String {
    calculate_age(birthday, Local::now().date_naive())
}
