//! Handler fuer /contact

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use marktplatz_shop::KontaktEingabe;
use serde_json::json;

use crate::{error::ApiResult, extract::JsonKoerper, state::AppState};

/// POST /contact
pub async fn send_message(
    State(state): State<AppState>,
    JsonKoerper(eingabe): JsonKoerper<KontaktEingabe>,
) -> ApiResult<impl IntoResponse> {
    let id = state.kontakt.senden(eingabe).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "ok": true, "messageId": id })),
    ))
}

/// GET /contact
pub async fn list_messages(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    Ok(Json(state.kontakt.alle().await?))
}
