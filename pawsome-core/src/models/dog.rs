use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::row;

/// A dog profile owned by the signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Dog {
    pub id: String,
    pub name: String,
    pub breed: String,
    /// Public URL of the profile photo, empty when unset.
    pub image: String,
    pub birthday: Option<NaiveDate>,
    pub owner_id: Option<String>,
}

/// Raw `dogs` row as returned by the table API.
#[derive(Debug, Clone, Deserialize)]
pub struct DogRow {
    #[serde(deserialize_with = "row::id")]
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub breed: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, deserialize_with = "row::optional_date")]
    pub birthday: Option<NaiveDate>,
    #[serde(default)]
    pub owner_id: Option<String>,
}

impl From<DogRow> for Dog {
    fn from(row: DogRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            breed: row.breed.unwrap_or_default(),
            image: row.image_url.unwrap_or_default(),
            birthday: row.birthday,
            owner_id: row.owner_id,
        }
    }
}

/// Fields for a dog that does not exist remotely yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewDog {
    pub name: String,
    pub breed: String,
    pub image: String,
    pub birthday: Option<NaiveDate>,
}

impl NewDog {
    pub fn new(name: impl Into<String>, breed: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            breed: breed.into(),
            image: String::new(),
            birthday: None,
        }
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    pub fn with_birthday(mut self, birthday: NaiveDate) -> Self {
        self.birthday = Some(birthday);
        self
    }

    /// Builds the insert payload, stamping the owning user.
    pub fn into_insert(self, owner_id: impl Into<String>) -> DogInsert {
        DogInsert {
            name: self.name,
            breed: self.breed,
            birthday: self.birthday,
            image_url: self.image,
            owner_id: owner_id.into(),
        }
    }
}

/// Insert payload for the `dogs` table.
#[derive(Debug, Clone, Serialize)]
pub struct DogInsert {
    pub name: String,
    pub breed: String,
    pub birthday: Option<NaiveDate>,
    pub image_url: String,
    pub owner_id: String,
}

/// Partial update for a dog; unset fields are left untouched remotely.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
pub struct DogUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breed: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<NaiveDate>,
    #[serde(rename = "image_url", skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl DogUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.breed.is_none()
            && self.birthday.is_none()
            && self.image.is_none()
    }
}

impl fmt::Display for Dog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "{}", "=".repeat(self.name.chars().count().max(4)))?;
        if !self.breed.is_empty() {
            writeln!(f, "Breed: {}", self.breed)?;
        }
        if let Some(birthday) = self.birthday {
            writeln!(f, "Birthday: {}", birthday)?;
        }
        if !self.image.is_empty() {
            writeln!(f, "Photo: {}", self.image)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_mapping_fills_missing_columns() {
        let row: DogRow = serde_json::from_str(
            r#"{
                "id": "d1",
                "name": "Mochi",
                "breed": null,
                "owner_id": "u1",
                "created_at": "2024-01-01T00:00:00Z"
            }"#,
        )
        .unwrap();
        let dog = Dog::from(row);

        assert_eq!(dog.id, "d1");
        assert_eq!(dog.name, "Mochi");
        assert_eq!(dog.breed, "");
        assert_eq!(dog.image, "");
        assert!(dog.birthday.is_none());
        assert_eq!(dog.owner_id.as_deref(), Some("u1"));
    }

    #[test]
    fn test_row_mapping_renames_image_url() {
        let row: DogRow = serde_json::from_str(
            r#"{
                "id": 7,
                "name": "Coco",
                "breed": "Toy Poodle",
                "image_url": "https://img/coco.png",
                "birthday": "2022-08-15",
                "owner_id": "u1"
            }"#,
        )
        .unwrap();
        let dog = Dog::from(row);

        assert_eq!(dog.id, "7");
        assert_eq!(dog.image, "https://img/coco.png");
        assert_eq!(dog.birthday, NaiveDate::from_ymd_opt(2022, 8, 15));
    }

    #[test]
    fn test_insert_payload_uses_column_names() {
        let insert = NewDog::new("ポチ", "チワワ")
            .with_image("https://img/pochi.png")
            .with_birthday(NaiveDate::from_ymd_opt(2023, 1, 20).unwrap())
            .into_insert("user-1");

        let json = serde_json::to_value(&insert).unwrap();
        assert_eq!(json["name"], "ポチ");
        assert_eq!(json["image_url"], "https://img/pochi.png");
        assert_eq!(json["birthday"], "2023-01-20");
        assert_eq!(json["owner_id"], "user-1");
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = DogUpdate {
            name: Some("Luna".into()),
            image: Some("https://img/luna.png".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&update).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), 2);
        assert_eq!(obj["name"], "Luna");
        assert_eq!(obj["image_url"], "https://img/luna.png");
        assert!(!update.is_empty());
        assert!(DogUpdate::default().is_empty());
    }

    #[test]
    fn test_dog_display() {
        let dog = Dog {
            id: "d1".into(),
            name: "Mochi".into(),
            breed: "Shiba Inu".into(),
            image: String::new(),
            birthday: NaiveDate::from_ymd_opt(2021, 5, 10),
            owner_id: None,
        };

        let output = format!("{}", dog);
        assert!(output.contains("Mochi"));
        assert!(output.contains("Breed: Shiba Inu"));
        assert!(output.contains("Birthday: 2021-05-10"));
        assert!(!output.contains("Photo"));
    }
}
