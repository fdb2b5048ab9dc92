use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::row;

/// A dated food-intake observation in grams.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FoodLog {
    #[serde(deserialize_with = "row::id")]
    pub id: String,
    #[serde(deserialize_with = "row::id")]
    pub dog_id: String,
    #[serde(deserialize_with = "row::date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "row::number")]
    pub amount: f64,
    #[serde(default, deserialize_with = "row::text")]
    pub memo: String,
}

/// Insert payload for the `food_logs` table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewFoodLog {
    pub dog_id: String,
    pub date: NaiveDate,
    pub amount: f64,
    pub memo: String,
}

impl NewFoodLog {
    pub fn new(dog_id: impl Into<String>, date: NaiveDate, amount: f64) -> Self {
        Self {
            dog_id: dog_id.into(),
            date,
            amount,
            memo: String::new(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }
}

impl fmt::Display for FoodLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {} g", self.date, self.amount)?;
        if !self.memo.is_empty() {
            write!(f, "  ({})", self.memo)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_memo_maps_to_empty() {
        let log: FoodLog = serde_json::from_str(
            r#"{"id": "f3", "dog_id": "dog-1", "date": "2023-10-27", "amount": 120, "memo": null}"#,
        )
        .unwrap();

        assert_eq!(log.amount, 120.0);
        assert_eq!(log.memo, "");
    }

    #[test]
    fn test_missing_memo_maps_to_empty() {
        let log: FoodLog = serde_json::from_str(
            r#"{"id": "f4", "dog_id": "dog-1", "date": "2023-10-28", "amount": "125"}"#,
        )
        .unwrap();

        assert_eq!(log.amount, 125.0);
        assert_eq!(log.memo, "");
    }

    #[test]
    fn test_food_log_display() {
        let log = FoodLog {
            id: "f1".into(),
            dog_id: "dog-1".into(),
            date: NaiveDate::from_ymd_opt(2023, 10, 25).unwrap(),
            amount: 120.0,
            memo: "Healthy appetite".into(),
        };
        assert_eq!(format!("{}", log), "2023-10-25  120 g  (Healthy appetite)");
    }
}
