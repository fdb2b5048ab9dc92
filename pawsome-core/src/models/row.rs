//! Lenient column decoders shared by the row types.
//!
//! The backend serializes `numeric` columns as JSON strings and may hand out
//! integer or uuid primary keys depending on the table definition.

use serde::{Deserialize, Deserializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum IdValue {
    Int(i64),
    Text(String),
}

/// Decodes an id column that may be an integer or a string.
pub(crate) fn id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match IdValue::deserialize(deserializer)? {
        IdValue::Int(n) => Ok(n.to_string()),
        IdValue::Text(s) => Ok(s),
    }
}

/// Decodes a numeric column that may arrive as a number or a numeric string.
pub(crate) fn number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(n) => Ok(n),
        NumberOrString::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("not a number: {:?}", s))),
    }
}

/// Decodes a nullable text column, mapping null to "".
pub(crate) fn text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decodes an optional date column, mapping null and "" to `None`.
pub(crate) fn optional_date<'de, D>(
    deserializer: D,
) -> Result<Option<chrono::NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {:?}", s))),
    }
}

/// Decodes a required date column.
pub(crate) fn date<'de, D>(deserializer: D) -> Result<chrono::NaiveDate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_date(raw.trim())
        .ok_or_else(|| serde::de::Error::custom(format!("invalid date: {:?}", raw)))
}

/// Parses `YYYY-MM-DD`, tolerating a trailing time component.
pub fn parse_date(s: &str) -> Option<chrono::NaiveDate> {
    let day = s.get(..10).unwrap_or(s);
    chrono::NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[derive(Deserialize)]
    struct SampleRow {
        #[serde(deserialize_with = "id")]
        id: String,
        #[serde(deserialize_with = "number")]
        value: f64,
        #[serde(default, deserialize_with = "optional_date")]
        day: Option<NaiveDate>,
    }

    #[test]
    fn test_numeric_string_is_accepted() {
        let row: SampleRow =
            serde_json::from_str(r#"{"id": "a1", "value": "8.25", "day": "2024-05-10"}"#).unwrap();
        assert_eq!(row.id, "a1");
        assert_eq!(row.value, 8.25);
        assert_eq!(row.day, NaiveDate::from_ymd_opt(2024, 5, 10));
    }

    #[test]
    fn test_integer_id_and_missing_date() {
        let row: SampleRow = serde_json::from_str(r#"{"id": 42, "value": 3}"#).unwrap();
        assert_eq!(row.id, "42");
        assert_eq!(row.value, 3.0);
        assert!(row.day.is_none());
    }

    #[test]
    fn test_empty_date_is_none() {
        let row: SampleRow =
            serde_json::from_str(r#"{"id": "x", "value": 1, "day": ""}"#).unwrap();
        assert!(row.day.is_none());
    }

    #[test]
    fn test_garbage_number_is_rejected() {
        let result: Result<SampleRow, _> = serde_json::from_str(r#"{"id": "x", "value": "heavy"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_date_with_time() {
        assert_eq!(
            parse_date("2024-02-29T00:00:00+00:00"),
            NaiveDate::from_ymd_opt(2024, 2, 29)
        );
        assert!(parse_date("yesterday").is_none());
    }
}
