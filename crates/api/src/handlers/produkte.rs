//! Handler fuer /products/...

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use marktplatz_shop::{ProduktEingabe, Ressource};
use serde_json::json;

use crate::{
    error::ApiResult,
    extract::{AngemeldetesKonto, JsonKoerper},
    state::AppState,
};

/// GET /products
pub async fn list_products(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.produkte.alle().await?))
}

/// GET /products/:id
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = Ressource::Produkt.id_parsen(&id)?;
    Ok(Json(state.produkte.laden(id).await?))
}

/// POST /products
pub async fn create_product(
    State(state): State<AppState>,
    AngemeldetesKonto(konto): AngemeldetesKonto,
    JsonKoerper(eingabe): JsonKoerper<ProduktEingabe>,
) -> ApiResult<impl IntoResponse> {
    let produkt = state.produkte.erstellen(konto, eingabe).await?;
    Ok((StatusCode::CREATED, Json(produkt)))
}

/// PUT /products/:id
pub async fn update_product(
    State(state): State<AppState>,
    AngemeldetesKonto(konto): AngemeldetesKonto,
    Path(id): Path<String>,
    JsonKoerper(eingabe): JsonKoerper<ProduktEingabe>,
) -> ApiResult<impl IntoResponse> {
    let id = Ressource::Produkt.id_parsen(&id)?;
    Ok(Json(state.produkte.aktualisieren(konto, id, eingabe).await?))
}

/// DELETE /products/:id
pub async fn delete_product(
    State(state): State<AppState>,
    AngemeldetesKonto(konto): AngemeldetesKonto,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = Ressource::Produkt.id_parsen(&id)?;
    state.produkte.loeschen(konto, id).await?;
    Ok(Json(json!({ "message": "Product deleted" })))
}
