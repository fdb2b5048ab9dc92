use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::row;

/// A dated body-weight observation in kilograms.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeightLog {
    #[serde(deserialize_with = "row::id")]
    pub id: String,
    #[serde(deserialize_with = "row::id")]
    pub dog_id: String,
    #[serde(deserialize_with = "row::date")]
    pub date: NaiveDate,
    #[serde(deserialize_with = "row::number")]
    pub weight: f64,
}

/// Insert payload for the `weight_logs` table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewWeightLog {
    pub dog_id: String,
    pub date: NaiveDate,
    pub weight: f64,
}

impl NewWeightLog {
    pub fn new(dog_id: impl Into<String>, date: NaiveDate, weight: f64) -> Self {
        Self {
            dog_id: dog_id.into(),
            date,
            weight,
        }
    }
}

impl fmt::Display for WeightLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}  {} kg", self.date, self.weight)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_string_weight() {
        let log: WeightLog = serde_json::from_str(
            r#"{"id": "w1", "dog_id": "dog-1", "date": "2023-10-01", "weight": "8.5"}"#,
        )
        .unwrap();

        assert_eq!(log.dog_id, "dog-1");
        assert_eq!(log.date, NaiveDate::from_ymd_opt(2023, 10, 1).unwrap());
        assert_eq!(log.weight, 8.5);
    }

    #[test]
    fn test_insert_payload() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let json = serde_json::to_value(NewWeightLog::new("dog-1", date, 3.2)).unwrap();

        assert_eq!(json["dog_id"], "dog-1");
        assert_eq!(json["date"], "2024-03-01");
        assert_eq!(json["weight"], 3.2);
    }

    #[test]
    fn test_weight_log_display() {
        let log = WeightLog {
            id: "w1".into(),
            dog_id: "dog-1".into(),
            date: NaiveDate::from_ymd_opt(2023, 10, 8).unwrap(),
            weight: 8.6,
        };
        assert_eq!(format!("{}", log), "2023-10-08  8.6 kg");
    }
}
