//! Typed record operations used by the data-sync store.

use super::error::BackendError;
use super::tables::{Order, Table};
use super::{Backend, Session};
use crate::models::{
    Diary, Dog, DogInsert, DogRow, DogUpdate, FoodLog, NewDiary, NewFoodLog, NewWeightLog,
    WeightLog,
};

/// Remote record operations for the four health tables.
///
/// [`Backend`] is the production implementation; tests substitute an
/// in-memory one.
#[allow(async_fn_in_trait)]
pub trait HealthRecords {
    /// Points subsequent calls at `session`, or at anonymous access.
    fn authorize_session(&mut self, session: Option<&Session>);

    async fn fetch_dogs(&self) -> Result<Vec<Dog>, BackendError>;
    async fn fetch_weight_logs(&self) -> Result<Vec<WeightLog>, BackendError>;
    async fn fetch_food_logs(&self) -> Result<Vec<FoodLog>, BackendError>;
    async fn fetch_diaries(&self) -> Result<Vec<Diary>, BackendError>;

    async fn insert_dog(&self, dog: &DogInsert) -> Result<Dog, BackendError>;
    async fn update_dog(&self, id: &str, changes: &DogUpdate) -> Result<Dog, BackendError>;
    async fn delete_dog(&self, id: &str) -> Result<(), BackendError>;

    async fn insert_weight_log(&self, log: &NewWeightLog) -> Result<WeightLog, BackendError>;
    async fn insert_food_log(&self, log: &NewFoodLog) -> Result<FoodLog, BackendError>;
    async fn insert_diary(&self, diary: &NewDiary) -> Result<Diary, BackendError>;

    /// Ends the remote session, if any.
    async fn sign_out(&self) -> Result<(), BackendError>;
}

impl HealthRecords for Backend {
    fn authorize_session(&mut self, session: Option<&Session>) {
        self.set_access_token(session.map(|s| s.access_token.clone()));
    }

    async fn fetch_dogs(&self) -> Result<Vec<Dog>, BackendError> {
        let rows: Vec<DogRow> = self.select(Table::Dogs, Order::Asc("created_at")).await?;
        Ok(rows.into_iter().map(Dog::from).collect())
    }

    async fn fetch_weight_logs(&self) -> Result<Vec<WeightLog>, BackendError> {
        self.select(Table::WeightLogs, Order::Asc("date")).await
    }

    async fn fetch_food_logs(&self) -> Result<Vec<FoodLog>, BackendError> {
        self.select(Table::FoodLogs, Order::Asc("date")).await
    }

    async fn fetch_diaries(&self) -> Result<Vec<Diary>, BackendError> {
        self.select(Table::Diaries, Order::Desc("date")).await
    }

    async fn insert_dog(&self, dog: &DogInsert) -> Result<Dog, BackendError> {
        let row: DogRow = self.insert(Table::Dogs, dog).await?;
        Ok(row.into())
    }

    async fn update_dog(&self, id: &str, changes: &DogUpdate) -> Result<Dog, BackendError> {
        let row: DogRow = self.update(Table::Dogs, id, changes).await?;
        Ok(row.into())
    }

    async fn delete_dog(&self, id: &str) -> Result<(), BackendError> {
        self.delete(Table::Dogs, id).await
    }

    async fn insert_weight_log(&self, log: &NewWeightLog) -> Result<WeightLog, BackendError> {
        self.insert(Table::WeightLogs, log).await
    }

    async fn insert_food_log(&self, log: &NewFoodLog) -> Result<FoodLog, BackendError> {
        self.insert(Table::FoodLogs, log).await
    }

    async fn insert_diary(&self, diary: &NewDiary) -> Result<Diary, BackendError> {
        self.insert(Table::Diaries, diary).await
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let Some(token) = self.access_token.as_deref() else {
            return Ok(());
        };
        self.sign_out_session(token)
            .await
            .map_err(|e| BackendError::Http(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_server::serve;
    use crate::backend::BackendConfig;
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use chrono::NaiveDate;
    use std::collections::HashMap;

    #[tokio::test]
    async fn test_fetch_maps_rows() {
        let app = Router::new()
            .route(
                "/rest/v1/dogs",
                get(|| async {
                    Json(serde_json::json!([
                        {
                            "id": "d1",
                            "name": "Mochi",
                            "breed": "Shiba Inu",
                            "image_url": null,
                            "birthday": "2021-05-10",
                            "owner_id": "u1",
                            "created_at": "2024-01-01T00:00:00Z"
                        }
                    ]))
                }),
            )
            .route(
                "/rest/v1/diaries",
                get(|Query(q): Query<HashMap<String, String>>| async move {
                    assert_eq!(q.get("order").map(String::as_str), Some("date.desc"));
                    Json(serde_json::json!([
                        {
                            "id": 2,
                            "dog_id": "d1",
                            "date": "2024-05-10",
                            "title": "公園でお散歩",
                            "content": "30分"
                        },
                        {
                            "id": 1,
                            "dog_id": "d1",
                            "date": "2024-05-09",
                            "title": "新しいおもちゃ",
                            "content": null
                        }
                    ]))
                }),
            );
        let mut backend = Backend::new(BackendConfig::new(serve(app).await, "anon"));
        backend.authorize_session(None);

        let dogs = backend.fetch_dogs().await.unwrap();
        assert_eq!(dogs.len(), 1);
        assert_eq!(dogs[0].image, "");
        assert_eq!(dogs[0].birthday, NaiveDate::from_ymd_opt(2021, 5, 10));

        let diaries = backend.fetch_diaries().await.unwrap();
        assert_eq!(diaries[0].id, "2");
        assert_eq!(diaries[1].content, "");
    }

    #[tokio::test]
    async fn test_sign_out_without_session_is_noop() {
        let backend = Backend::new(BackendConfig::new("http://127.0.0.1:9", "anon"));
        backend.sign_out().await.unwrap();
    }
}
