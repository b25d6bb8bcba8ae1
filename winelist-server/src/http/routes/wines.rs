//! Wine endpoints
//!
//! | method | path          | action            |
//! |--------|---------------|-------------------|
//! | GET    | /wines        | list (paginated)  |
//! | POST   | /wines        | create            |
//! | GET    | /wines/{id}   | retrieve          |
//! | PUT    | /wines/{id}   | full update       |
//! | PATCH  | /wines/{id}   | partial update    |
//! | DELETE | /wines/{id}   | delete            |
//!
//! Every path is also served with a trailing slash.

use std::sync::Arc;

use axum::{
    extract::State,
    http::{header::LOCATION, HeaderName, StatusCode},
    routing::get,
    Json, Router,
};
use serde::Serialize;

use crate::db::repos::{Wine, WineRepo};
use crate::http::error::ApiError;
use crate::http::extractors::{PageQuery, WineBody, WineId};
use crate::http::server::AppState;
use crate::models::{NewWine, Paginated, WinePatch};

/// Wine response
#[derive(Debug, Serialize)]
pub struct WineResponse {
    pub id: i64,
    pub name: String,
    pub price: String,
    pub varietal: String,
    pub description: String,
    pub created_at: String,
}

impl From<Wine> for WineResponse {
    fn from(w: Wine) -> Self {
        Self {
            id: w.id,
            name: w.name,
            price: w.price,
            varietal: w.varietal,
            description: w.description,
            created_at: w.created_at.to_rfc3339(),
        }
    }
}

/// GET /wines - list wines, newest first
async fn list_wines(
    State(state): State<Arc<AppState>>,
    PageQuery(page): PageQuery,
) -> Result<Json<Paginated<WineResponse>>, ApiError> {
    let wines = WineRepo::new(&state.pool).list(page).await?;

    Ok(Json(wines.map(WineResponse::from)))
}

/// POST /wines - create a wine from a JSON or form body
async fn create_wine(
    State(state): State<Arc<AppState>>,
    WineBody(payload): WineBody,
) -> Result<(StatusCode, [(HeaderName, String); 1], Json<WineResponse>), ApiError> {
    let wine = NewWine::validate(payload)?;
    let created = WineRepo::new(&state.pool).create(&wine).await?;

    tracing::info!(id = created.id, name = %created.name, "wine created");

    let location = format!("/wines/{}", created.id);
    Ok((
        StatusCode::CREATED,
        [(LOCATION, location)],
        Json(WineResponse::from(created)),
    ))
}

/// GET /wines/{id} - retrieve a single wine
async fn get_wine(
    State(state): State<Arc<AppState>>,
    WineId(id): WineId,
) -> Result<Json<WineResponse>, ApiError> {
    let wine = WineRepo::new(&state.pool).get(id).await?;
    Ok(Json(WineResponse::from(wine)))
}

/// PUT /wines/{id} - replace every user-supplied field
async fn replace_wine(
    State(state): State<Arc<AppState>>,
    WineId(id): WineId,
    WineBody(payload): WineBody,
) -> Result<Json<WineResponse>, ApiError> {
    let wine = NewWine::validate(payload)?;
    let updated = WineRepo::new(&state.pool).replace(id, &wine).await?;

    tracing::info!(id, "wine replaced");
    Ok(Json(WineResponse::from(updated)))
}

/// PATCH /wines/{id} - update only the supplied fields
async fn update_wine(
    State(state): State<Arc<AppState>>,
    WineId(id): WineId,
    WineBody(payload): WineBody,
) -> Result<Json<WineResponse>, ApiError> {
    let patch = WinePatch::validate(payload)?;
    let updated = WineRepo::new(&state.pool).update(id, &patch).await?;

    tracing::info!(id, "wine updated");
    Ok(Json(WineResponse::from(updated)))
}

/// DELETE /wines/{id} - delete a wine
async fn delete_wine(
    State(state): State<Arc<AppState>>,
    WineId(id): WineId,
) -> Result<StatusCode, ApiError> {
    WineRepo::new(&state.pool).delete(id).await?;

    tracing::info!(id, "wine deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// Wine routes
pub fn router() -> Router<Arc<AppState>> {
    let collection = get(list_wines).post(create_wine);
    let item = get(get_wine)
        .put(replace_wine)
        .patch(update_wine)
        .delete(delete_wine);

    Router::new()
        .route("/wines", collection.clone())
        .route("/wines/", collection)
        .route("/wines/{id}", item.clone())
        .route("/wines/{id}/", item)
}
