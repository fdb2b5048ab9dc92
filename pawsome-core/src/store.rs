//! Session-scoped view of the signed-in user's health records.
//!
//! `HealthStore` mirrors the four remote collections in memory. A session
//! change triggers a full fetch; every mutation performs one remote write and
//! then reconciles local state from the row the server returned, without
//! re-fetching the collection.
//!
//! Remote failures are logged and swallowed: the state is left as it was and
//! mutations return `None`. The one error that reaches callers is the image
//! upload, which lives outside the store.

use crate::backend::{HealthRecords, Session, User};
use crate::models::{
    Diary, Dog, DogUpdate, FoodLog, NewDiary, NewDog, NewFoodLog, NewWeightLog, WeightLog,
};

/// In-memory state of the signed-in user's dogs, logs and diaries.
#[derive(Debug)]
pub struct HealthStore<B> {
    backend: B,
    session: Option<Session>,
    dogs: Vec<Dog>,
    active_dog_id: Option<String>,
    weight_logs: Vec<WeightLog>,
    food_logs: Vec<FoodLog>,
    diaries: Vec<Diary>,
    loading: bool,
}

impl<B: HealthRecords> HealthStore<B> {
    /// Creates an empty store. It stays in the loading state until the first
    /// session change is applied.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            session: None,
            dogs: Vec::new(),
            active_dog_id: None,
            weight_logs: Vec::new(),
            food_logs: Vec::new(),
            diaries: Vec::new(),
            loading: true,
        }
    }

    /// Applies a session change: fetches everything when signed in, clears
    /// everything when signed out.
    pub async fn set_session(&mut self, session: Option<Session>) {
        self.backend.authorize_session(session.as_ref());
        self.session = session;

        if self.session.is_some() {
            self.fetch_initial_data().await;
        } else {
            self.dogs.clear();
            self.active_dog_id = None;
            self.weight_logs.clear();
            self.food_logs.clear();
            self.diaries.clear();
            self.loading = false;
        }
    }

    /// Re-reads all four collections for the current session.
    pub async fn fetch_initial_data(&mut self) {
        if self.session.is_none() {
            self.loading = false;
            return;
        }

        self.loading = true;
        if let Err(e) = self.fetch_all().await {
            tracing::error!("Error fetching data from backend: {}", e);
        }
        self.loading = false;
    }

    async fn fetch_all(&mut self) -> Result<(), crate::backend::BackendError> {
        self.dogs = self.backend.fetch_dogs().await?;
        tracing::debug!(count = self.dogs.len(), "fetched dogs");

        if self.active_dog_id.is_none() {
            self.active_dog_id = self.dogs.first().map(|d| d.id.clone());
        }

        self.weight_logs = self.backend.fetch_weight_logs().await?;
        self.food_logs = self.backend.fetch_food_logs().await?;
        self.diaries = self.backend.fetch_diaries().await?;

        tracing::debug!(
            weight_logs = self.weight_logs.len(),
            food_logs = self.food_logs.len(),
            diaries = self.diaries.len(),
            "fetched logs"
        );
        Ok(())
    }

    // ========== Read accessors ==========

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn user(&self) -> Option<&User> {
        self.session.as_ref().map(|s| &s.user)
    }

    pub fn dogs(&self) -> &[Dog] {
        &self.dogs
    }

    pub fn active_dog_id(&self) -> Option<&str> {
        self.active_dog_id.as_deref()
    }

    pub fn set_active_dog(&mut self, id: Option<String>) {
        self.active_dog_id = id;
    }

    pub fn active_dog(&self) -> Option<&Dog> {
        let id = self.active_dog_id.as_deref()?;
        self.dogs.iter().find(|d| d.id == id)
    }

    /// Weight logs of the active dog, oldest first.
    pub fn weight_logs(&self) -> Vec<&WeightLog> {
        self.weight_logs
            .iter()
            .filter(|log| self.is_active(&log.dog_id))
            .collect()
    }

    /// Food logs of the active dog, oldest first.
    pub fn food_logs(&self) -> Vec<&FoodLog> {
        self.food_logs
            .iter()
            .filter(|log| self.is_active(&log.dog_id))
            .collect()
    }

    /// Diaries of the active dog, newest first.
    pub fn diaries(&self) -> Vec<&Diary> {
        self.diaries
            .iter()
            .filter(|d| self.is_active(&d.dog_id))
            .collect()
    }

    pub fn all_weight_logs(&self) -> &[WeightLog] {
        &self.weight_logs
    }

    pub fn all_food_logs(&self) -> &[FoodLog] {
        &self.food_logs
    }

    fn is_active(&self, dog_id: &str) -> bool {
        self.active_dog_id.as_deref() == Some(dog_id)
    }

    // ========== Mutations ==========

    /// Creates a dog owned by the session user and makes it active.
    pub async fn add_dog(&mut self, dog: NewDog) -> Option<&Dog> {
        let Some(owner_id) = self.user().map(|u| u.id.clone()) else {
            tracing::error!("Error adding dog: User not authenticated");
            return None;
        };

        match self.backend.insert_dog(&dog.into_insert(owner_id)).await {
            Ok(created) => {
                self.active_dog_id = Some(created.id.clone());
                self.dogs.push(created);
                self.dogs.last()
            }
            Err(e) => {
                tracing::error!("Error adding dog: {}", e);
                None
            }
        }
    }

    /// Updates a dog and replaces it in place.
    pub async fn update_dog(&mut self, id: &str, changes: DogUpdate) -> Option<&Dog> {
        match self.backend.update_dog(id, &changes).await {
            Ok(updated) => {
                let index = self.dogs.iter().position(|d| d.id == id)?;
                self.dogs[index] = updated;
                self.dogs.get(index)
            }
            Err(e) => {
                tracing::error!("Error updating dog: {}", e);
                None
            }
        }
    }

    /// Deletes a dog. When it was the active one, another remaining dog
    /// becomes active, or none when no dogs are left.
    pub async fn delete_dog(&mut self, id: &str) -> Option<()> {
        if let Err(e) = self.backend.delete_dog(id).await {
            tracing::error!("Error deleting dog: {}", e);
            return None;
        }

        self.dogs.retain(|d| d.id != id);
        if self.active_dog_id.as_deref() == Some(id) {
            self.active_dog_id = self.dogs.first().map(|d| d.id.clone());
        }
        Some(())
    }

    pub async fn add_weight_log(&mut self, log: NewWeightLog) -> Option<&WeightLog> {
        match self.backend.insert_weight_log(&log).await {
            Ok(created) => {
                self.weight_logs.push(created);
                self.weight_logs.last()
            }
            Err(e) => {
                tracing::error!("Error adding weight log: {}", e);
                None
            }
        }
    }

    pub async fn add_food_log(&mut self, log: NewFoodLog) -> Option<&FoodLog> {
        match self.backend.insert_food_log(&log).await {
            Ok(created) => {
                self.food_logs.push(created);
                self.food_logs.last()
            }
            Err(e) => {
                tracing::error!("Error adding food log: {}", e);
                None
            }
        }
    }

    /// Adds a diary entry at the front, keeping newest-first order.
    pub async fn add_diary(&mut self, diary: NewDiary) -> Option<&Diary> {
        match self.backend.insert_diary(&diary).await {
            Ok(created) => {
                self.diaries.insert(0, created);
                self.diaries.first()
            }
            Err(e) => {
                tracing::error!("Error adding diary: {}", e);
                None
            }
        }
    }

    /// Ends the remote session and clears local state.
    pub async fn sign_out(&mut self) {
        if let Err(e) = self.backend.sign_out().await {
            tracing::error!("Error signing out: {}", e);
        }
        self.set_session(None).await;
    }
}
