//! Inventory catalog endpoints.
//!
//! CRUD, advanced search, statistics, and the filter-option listing.

use axum::extract::{Path, Query, State};
use axum::Json;
use serde::{Deserialize, Serialize};

use medshelf_core::models::{
    FilterOptions, InventoryStats, Medicine, MedicineDraft, MedicinePage, MedicineSearch,
    SearchField, SortOrder,
};

use crate::error::ApiError;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub skip: u32,
    #[serde(default = "default_list_limit")]
    pub limit: u32,
}

fn default_list_limit() -> u32 {
    100
}

/// `GET /api/medicines` — paginated listing.
pub async fn list(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<Json<MedicinePage>, ApiError> {
    let limit = query.limit.clamp(1, 1000);

    let db = state.lock_db()?;
    let medicines = db.list_medicines(query.skip, limit)?;
    let total = db.count_medicines()?;

    let page = query.skip / limit + 1;
    Ok(Json(MedicinePage::new(medicines, total, page, limit)))
}

#[derive(Deserialize)]
pub struct SearchQuery {
    pub query: Option<String>,
    #[serde(default)]
    pub search_type: SearchField,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub dosage_form: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    #[serde(default = "default_sort_by")]
    pub sort_by: String,
    #[serde(default)]
    pub sort_order: SortOrder,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_per_page")]
    pub per_page: u32,
}

fn default_sort_by() -> String {
    "brand_name".to_string()
}

fn default_page() -> u32 {
    1
}

fn default_per_page() -> u32 {
    20
}

/// `GET /api/medicines/search` — advanced search with filters.
pub async fn search(
    State(state): State<AppState>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<MedicinePage>, ApiError> {
    let search = MedicineSearch {
        query: query.query,
        search_field: query.search_type,
        kind: query.kind,
        dosage_form: query.dosage_form,
        min_price: query.min_price,
        max_price: query.max_price,
        sort_by: query.sort_by,
        sort_order: query.sort_order,
        page: query.page.max(1),
        per_page: query.per_page.clamp(1, 100),
    };

    let db = state.lock_db()?;
    let page = db.search_medicines(&search)?;
    Ok(Json(page))
}

/// `GET /api/medicines/:id`
pub async fn get_one(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Medicine>, ApiError> {
    let db = state.lock_db()?;
    let medicine = db
        .get_medicine(id)?
        .ok_or_else(|| ApiError::NotFound("Medicine not found".into()))?;
    Ok(Json(medicine))
}

/// `POST /api/medicines`
pub async fn create(
    State(state): State<AppState>,
    Json(draft): Json<MedicineDraft>,
) -> Result<Json<Medicine>, ApiError> {
    let db = state.lock_db()?;
    let medicine = db.create_medicine(&draft)?;
    Ok(Json(medicine))
}

/// `PUT /api/medicines/:id` — partial update.
pub async fn update(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(draft): Json<MedicineDraft>,
) -> Result<Json<Medicine>, ApiError> {
    let db = state.lock_db()?;
    let medicine = db
        .update_medicine(id, &draft)?
        .ok_or_else(|| ApiError::NotFound("Medicine not found".into()))?;
    Ok(Json(medicine))
}

#[derive(Serialize)]
pub struct DeleteResponse {
    pub message: &'static str,
}

/// `DELETE /api/medicines/:id`
pub async fn delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<DeleteResponse>, ApiError> {
    let db = state.lock_db()?;
    if !db.delete_medicine(id)? {
        return Err(ApiError::NotFound("Medicine not found".into()));
    }
    Ok(Json(DeleteResponse {
        message: "Medicine deleted successfully",
    }))
}

/// `GET /api/statistics`
pub async fn statistics(
    State(state): State<AppState>,
) -> Result<Json<InventoryStats>, ApiError> {
    let db = state.lock_db()?;
    Ok(Json(db.inventory_stats()?))
}

/// `GET /api/filters`
pub async fn filters(State(state): State<AppState>) -> Result<Json<FilterOptions>, ApiError> {
    let db = state.lock_db()?;
    Ok(Json(db.filter_options()?))
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub database: bool,
}

/// `GET /health`
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, ApiError> {
    let database = state.lock_db().is_ok();
    Ok(Json(HealthResponse {
        status: "healthy",
        database,
    }))
}
