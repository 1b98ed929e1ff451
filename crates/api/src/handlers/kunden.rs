//! Handler fuer /customers/...

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use marktplatz_shop::{KundeEingabe, Ressource};
use serde_json::json;

use crate::{error::ApiResult, extract::JsonKoerper, state::AppState};

/// GET /customers
pub async fn list_customers(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.kunden.alle().await?))
}

/// GET /customers/:id
pub async fn get_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = Ressource::Kunde.id_parsen(&id)?;
    Ok(Json(state.kunden.laden(id).await?))
}

/// POST /customers
pub async fn create_customer(
    State(state): State<AppState>,
    JsonKoerper(eingabe): JsonKoerper<KundeEingabe>,
) -> ApiResult<impl IntoResponse> {
    let kunde = state.kunden.erstellen(eingabe).await?;
    Ok((StatusCode::CREATED, Json(kunde)))
}

/// PUT /customers/:id
pub async fn update_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonKoerper(eingabe): JsonKoerper<KundeEingabe>,
) -> ApiResult<impl IntoResponse> {
    let id = Ressource::Kunde.id_parsen(&id)?;
    Ok(Json(state.kunden.aktualisieren(id, eingabe).await?))
}

/// DELETE /customers/:id
pub async fn delete_customer(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<impl IntoResponse> {
    let id = Ressource::Kunde.id_parsen(&id)?;
    state.kunden.loeschen(id).await?;
    Ok(Json(json!({ "message": "Customer deleted" })))
}
