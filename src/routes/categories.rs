use axum::{extract::State, response::IntoResponse, Json};
use serde::Serialize;
use std::sync::Arc;

use crate::error::Result;
use crate::models::{Category, Genre, Language, Quality};
use crate::AppState;

/// Fixed enumerations used by filter dropdowns and admin forms
#[derive(Serialize)]
pub struct Taxonomy {
    pub languages: Vec<&'static str>,
    pub categories: Vec<&'static str>,
    pub genres: Vec<&'static str>,
    pub qualities: Vec<&'static str>,
}

/// GET /api/categories
pub async fn list_categories() -> impl IntoResponse {
    Json(Taxonomy {
        languages: Language::ALL.iter().map(|l| l.as_str()).collect(),
        categories: Category::ALL.iter().map(|c| c.as_str()).collect(),
        genres: Genre::ALL.iter().map(|g| g.as_str()).collect(),
        qualities: Quality::ALL.iter().map(|q| q.as_str()).collect(),
    })
}

/// GET /api/categories/stats - Counts over active content
pub async fn category_stats(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse> {
    let stats = state.catalog.category_stats().await?;
    Ok(Json(stats))
}
