use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::row;

/// A dated free-text diary entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diary {
    #[serde(deserialize_with = "row::id")]
    pub id: String,
    #[serde(deserialize_with = "row::id")]
    pub dog_id: String,
    #[serde(deserialize_with = "row::date")]
    pub date: NaiveDate,
    pub title: String,
    #[serde(default, deserialize_with = "row::text")]
    pub content: String,
}

/// Insert payload for the `diaries` table.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NewDiary {
    pub dog_id: String,
    pub date: NaiveDate,
    pub title: String,
    pub content: String,
}

impl NewDiary {
    pub fn new(
        dog_id: impl Into<String>,
        date: NaiveDate,
        title: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            dog_id: dog_id.into(),
            date,
            title: title.into(),
            content: content.into(),
        }
    }
}

impl fmt::Display for Diary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}  {}", self.date, self.title)?;
        if !self.content.is_empty() {
            writeln!(f, "    {}", self.content)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diary_row() {
        let diary: Diary = serde_json::from_str(
            r#"{
                "id": "d1",
                "dog_id": "dog-1",
                "date": "2024-05-10",
                "title": "公園でお散歩",
                "content": null
            }"#,
        )
        .unwrap();

        assert_eq!(diary.title, "公園でお散歩");
        assert_eq!(diary.content, "");
        assert_eq!(diary.date, NaiveDate::from_ymd_opt(2024, 5, 10).unwrap());
    }

    #[test]
    fn test_diary_display() {
        let diary = Diary {
            id: "d2".into(),
            dog_id: "dog-1".into(),
            date: NaiveDate::from_ymd_opt(2024, 5, 9).unwrap(),
            title: "新しいおもちゃ".into(),
            content: "音の鳴るボールがお気に入り。".into(),
        };

        let output = format!("{}", diary);
        assert!(output.starts_with("2024-05-09  新しいおもちゃ"));
        assert!(output.contains("音の鳴るボール"));
    }
}
