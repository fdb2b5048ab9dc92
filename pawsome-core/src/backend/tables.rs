//! Row access over the REST table API.

use reqwest::{Method, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fmt;

use super::error::{error_message, BackendError};
use super::Backend;

/// Media type that makes the table API answer with a single object.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Remote tables used by the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Table {
    Dogs,
    WeightLogs,
    FoodLogs,
    Diaries,
}

impl Table {
    pub fn name(&self) -> &'static str {
        match self {
            Table::Dogs => "dogs",
            Table::WeightLogs => "weight_logs",
            Table::FoodLogs => "food_logs",
            Table::Diaries => "diaries",
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Sort order for a select.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Asc(&'static str),
    Desc(&'static str),
}

impl Order {
    fn to_param(self) -> String {
        match self {
            Order::Asc(column) => format!("{}.asc", column),
            Order::Desc(column) => format!("{}.desc", column),
        }
    }
}

impl Backend {
    fn table_url(&self, table: Table) -> String {
        self.endpoint(&format!("/rest/v1/{}", table.name()))
    }

    /// Selects every visible row of `table`.
    pub async fn select<T: DeserializeOwned>(
        &self,
        table: Table,
        order: Order,
    ) -> Result<Vec<T>, BackendError> {
        let request = self
            .http
            .get(self.table_url(table))
            .query(&[("select", "*".to_string()), ("order", order.to_param())]);

        let response = self.authorize(request).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Inserts one row and returns it as stored.
    pub async fn insert<P: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        row: &P,
    ) -> Result<T, BackendError> {
        let request = self
            .http
            .post(self.table_url(table))
            .query(&[("select", "*")])
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(&[row]);

        let response = self.authorize(request).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Updates the row with `id` and returns it as stored.
    pub async fn update<P: Serialize, T: DeserializeOwned>(
        &self,
        table: Table,
        id: &str,
        changes: &P,
    ) -> Result<T, BackendError> {
        let request = self
            .http
            .request(Method::PATCH, self.table_url(table))
            .query(&[("id", format!("eq.{}", id)), ("select", "*".to_string())])
            .header("Prefer", "return=representation")
            .header("Accept", SINGLE_OBJECT)
            .json(changes);

        let response = self.authorize(request).send().await?;
        Ok(check(response).await?.json().await?)
    }

    /// Deletes the row with `id`.
    pub async fn delete(&self, table: Table, id: &str) -> Result<(), BackendError> {
        let request = self
            .http
            .delete(self.table_url(table))
            .query(&[("id", format!("eq.{}", id))]);

        let response = self.authorize(request).send().await?;
        check(response).await?;
        Ok(())
    }
}

/// Turns a non-success response into a `BackendError::Status`.
pub(crate) async fn check(response: Response) -> Result<Response, BackendError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        message: error_message(&text).unwrap_or(text),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::test_server::serve;
    use crate::backend::BackendConfig;
    use axum::extract::Query;
    use axum::http::{HeaderMap, StatusCode};
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Named {
        id: String,
        name: String,
    }

    fn backend(url: String) -> Backend {
        let mut backend = Backend::new(BackendConfig::new(url, "anon"));
        backend.set_access_token(Some("jwt".into()));
        backend
    }

    #[test]
    fn test_table_names() {
        assert_eq!(Table::Dogs.name(), "dogs");
        assert_eq!(Table::WeightLogs.to_string(), "weight_logs");
        assert_eq!(Table::FoodLogs.name(), "food_logs");
        assert_eq!(Table::Diaries.name(), "diaries");
    }

    #[test]
    fn test_order_param() {
        assert_eq!(Order::Asc("created_at").to_param(), "created_at.asc");
        assert_eq!(Order::Desc("date").to_param(), "date.desc");
    }

    #[tokio::test]
    async fn test_select_sends_order_and_auth() {
        let app = Router::new().route(
            "/rest/v1/dogs",
            get(
                |Query(q): Query<HashMap<String, String>>, headers: HeaderMap| async move {
                    assert_eq!(q.get("select").map(String::as_str), Some("*"));
                    assert_eq!(q.get("order").map(String::as_str), Some("created_at.asc"));
                    assert_eq!(headers.get("apikey").unwrap(), "anon");
                    assert_eq!(headers.get("authorization").unwrap(), "Bearer jwt");
                    Json(serde_json::json!([
                        { "id": "d1", "name": "Mochi" },
                        { "id": "d2", "name": "Coco" }
                    ]))
                },
            ),
        );
        let backend = backend(serve(app).await);

        let rows: Vec<Named> = backend
            .select(Table::Dogs, Order::Asc("created_at"))
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].name, "Coco");
    }

    async fn create_dog(
        headers: HeaderMap,
        Json(body): Json<serde_json::Value>,
    ) -> axum::response::Response {
        assert_eq!(headers.get("prefer").unwrap(), "return=representation");
        assert_eq!(headers.get("accept").unwrap(), SINGLE_OBJECT);
        assert!(body.is_array());
        let name = body[0]["name"].clone();
        (
            StatusCode::CREATED,
            Json(serde_json::json!({ "id": "d9", "name": name })),
        )
            .into_response()
    }

    async fn patch_dog(
        Query(q): Query<HashMap<String, String>>,
        Json(body): Json<serde_json::Value>,
    ) -> Json<serde_json::Value> {
        assert_eq!(q.get("id").map(String::as_str), Some("eq.d1"));
        Json(serde_json::json!({ "id": "d1", "name": body["name"] }))
    }

    #[tokio::test]
    async fn test_insert_wraps_row_and_asks_for_object() {
        let app = Router::new().route("/rest/v1/dogs", axum::routing::post(create_dog));
        let backend = backend(serve(app).await);

        let created: Named = backend
            .insert(Table::Dogs, &serde_json::json!({ "name": "Luna" }))
            .await
            .unwrap();

        assert_eq!(
            created,
            Named {
                id: "d9".into(),
                name: "Luna".into()
            }
        );
    }

    #[tokio::test]
    async fn test_update_filters_by_id() {
        let app = Router::new().route("/rest/v1/dogs", axum::routing::patch(patch_dog));
        let backend = backend(serve(app).await);

        let updated: Named = backend
            .update(Table::Dogs, "d1", &serde_json::json!({ "name": "Mochi II" }))
            .await
            .unwrap();

        assert_eq!(updated.name, "Mochi II");
    }

    #[tokio::test]
    async fn test_delete_and_error_status() {
        let app = Router::new().route(
            "/rest/v1/dogs",
            axum::routing::delete(|Query(q): Query<HashMap<String, String>>| async move {
                if q.get("id").map(String::as_str) == Some("eq.d1") {
                    StatusCode::NO_CONTENT.into_response()
                } else {
                    (
                        StatusCode::FORBIDDEN,
                        Json(serde_json::json!({ "message": "permission denied for table dogs" })),
                    )
                        .into_response()
                }
            }),
        );
        let backend = backend(serve(app).await);

        backend.delete(Table::Dogs, "d1").await.unwrap();

        let err = backend.delete(Table::Dogs, "other").await.unwrap_err();
        match err {
            BackendError::Status { status, message } => {
                assert_eq!(status, 403);
                assert_eq!(message, "permission denied for table dogs");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
