//! Input forms for dogs, logs and diary entries.
//!
//! Forms validate raw input and turn it into the records the store writes.
//! They never talk to the backend themselves.

use chrono::NaiveDate;
use rand::Rng;
use std::path::PathBuf;

use crate::models::{Dog, DogUpdate, NewDiary, NewDog, NewFoodLog, NewWeightLog};

/// Photo choice on the dog form.
#[derive(Debug, Clone, PartialEq)]
pub enum ImageChoice {
    /// A local file that still has to be uploaded.
    File(PathBuf),
    /// An already hosted image.
    Url(String),
}

/// What submitting the dog form asks for.
#[derive(Debug, Clone, PartialEq)]
pub enum DogSubmission {
    Add {
        name: String,
        breed: String,
        birthday: NaiveDate,
        image: ImageChoice,
    },
    Update {
        id: String,
        name: String,
        breed: String,
        birthday: NaiveDate,
        image: ImageChoice,
    },
}

impl DogSubmission {
    pub fn image(&self) -> &ImageChoice {
        match self {
            DogSubmission::Add { image, .. } | DogSubmission::Update { image, .. } => image,
        }
    }

    /// Builds the new dog once the image is resolved to a URL.
    pub fn to_new_dog(&self, image_url: impl Into<String>) -> Option<NewDog> {
        match self {
            DogSubmission::Add {
                name,
                breed,
                birthday,
                ..
            } => Some(
                NewDog::new(name.as_str(), breed.as_str())
                    .with_birthday(*birthday)
                    .with_image(image_url),
            ),
            DogSubmission::Update { .. } => None,
        }
    }

    /// Builds the update once the image is resolved to a URL.
    pub fn to_update(&self, image_url: impl Into<String>) -> Option<(String, DogUpdate)> {
        match self {
            DogSubmission::Update {
                id,
                name,
                breed,
                birthday,
                ..
            } => Some((
                id.clone(),
                DogUpdate {
                    name: Some(name.clone()),
                    breed: Some(breed.clone()),
                    birthday: Some(*birthday),
                    image: Some(image_url.into()),
                },
            )),
            DogSubmission::Add { .. } => None,
        }
    }
}

/// Add/edit form for a dog profile.
#[derive(Debug, Clone, PartialEq)]
pub struct DogForm {
    pub name: String,
    pub breed: String,
    pub birthday: NaiveDate,
    pub image: Option<ImageChoice>,
    editing: Option<String>,
}

impl DogForm {
    /// An empty form with the birthday preset to `today`.
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            breed: String::new(),
            birthday: today,
            image: None,
            editing: None,
        }
    }

    /// A form prefilled from an existing dog.
    pub fn edit(dog: &Dog, today: NaiveDate) -> Self {
        Self {
            name: dog.name.clone(),
            breed: dog.breed.clone(),
            birthday: dog.birthday.unwrap_or(today),
            image: (!dog.image.is_empty()).then(|| ImageChoice::Url(dog.image.clone())),
            editing: Some(dog.id.clone()),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// Validates the form. Name and breed are required; without an image a
    /// placeholder photo URL is filled in.
    pub fn submit(&self) -> Option<DogSubmission> {
        self.submit_with(&mut rand::rng())
    }

    pub fn submit_with<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<DogSubmission> {
        let name = self.name.trim();
        let breed = self.breed.trim();
        if name.is_empty() || breed.is_empty() {
            return None;
        }

        let image = self
            .image
            .clone()
            .unwrap_or_else(|| ImageChoice::Url(placeholder_image_url(rng)));

        Some(match &self.editing {
            Some(id) => DogSubmission::Update {
                id: id.clone(),
                name: name.to_string(),
                breed: breed.to_string(),
                birthday: self.birthday,
                image,
            },
            None => DogSubmission::Add {
                name: name.to_string(),
                breed: breed.to_string(),
                birthday: self.birthday,
                image,
            },
        })
    }
}

const PLACEHOLDER_PHOTO_BASE: u64 = 1_537_151_608_828;

/// A stock dog photo URL used when no image was chosen.
pub fn placeholder_image_url<R: Rng + ?Sized>(rng: &mut R) -> String {
    let offset: u64 = rng.random_range(0..1000);
    format!(
        "https://images.unsplash.com/photo-{}-f5104be9f509?auto=format&fit=crop&q=80&w=200&h=200",
        PLACEHOLDER_PHOTO_BASE + offset
    )
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Weight,
    Food,
}

impl LogKind {
    pub fn label(&self) -> &'static str {
        match self {
            LogKind::Weight => "体重 (kg)",
            LogKind::Food => "食事量 (g)",
        }
    }
}

/// A weight or food entry ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub enum LogEntry {
    Weight(NewWeightLog),
    Food(NewFoodLog),
}

/// Quick log form for the active dog.
#[derive(Debug, Clone, PartialEq)]
pub struct LogForm {
    pub kind: LogKind,
    pub value: String,
    pub memo: String,
}

impl LogForm {
    pub fn new(kind: LogKind, value: impl Into<String>) -> Self {
        Self {
            kind,
            value: value.into(),
            memo: String::new(),
        }
    }

    pub fn with_memo(mut self, memo: impl Into<String>) -> Self {
        self.memo = memo.into();
        self
    }

    /// Builds the entry for `active_dog_id` dated `today`. Returns `None`
    /// without an active dog or when the value is not a finite number. The
    /// memo only applies to food logs.
    pub fn submit(&self, active_dog_id: Option<&str>, today: NaiveDate) -> Option<LogEntry> {
        let dog_id = active_dog_id?;
        let value: f64 = self.value.trim().parse().ok().filter(|v: &f64| v.is_finite())?;

        Some(match self.kind {
            LogKind::Weight => LogEntry::Weight(NewWeightLog::new(dog_id, today, value)),
            LogKind::Food => LogEntry::Food(
                NewFoodLog::new(dog_id, today, value).with_memo(self.memo.clone()),
            ),
        })
    }
}

/// Diary entry form; title and content are both required.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiaryForm {
    pub title: String,
    pub content: String,
}

impl DiaryForm {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    pub fn submit(&self, active_dog_id: Option<&str>, today: NaiveDate) -> Option<NewDiary> {
        let dog_id = active_dog_id?;
        if self.title.is_empty() || self.content.is_empty() {
            return None;
        }
        Some(NewDiary::new(
            dog_id,
            today,
            self.title.clone(),
            self.content.clone(),
        ))
    }
}
