//! Handler fuer /auth/...

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use marktplatz_auth::{Anmeldung, AuthError, Registrierung};
use serde::Deserialize;
use serde_json::json;

use crate::{
    error::{ApiError, ApiResult},
    extract::{AngemeldetesKonto, JsonKoerper},
    state::AppState,
};

/// Koerper von `POST /auth/register`
#[derive(Debug, Default, Deserialize)]
pub struct RegistrierenAnfrage {
    #[serde(default, alias = "identifier")]
    pub username: Option<String>,
    #[serde(default, alias = "secret")]
    pub password: Option<String>,
    #[serde(default, alias = "contact")]
    pub email: Option<String>,
}

/// Koerper von `POST /auth/login`
#[derive(Debug, Default, Deserialize)]
pub struct AnmeldenAnfrage {
    #[serde(default, alias = "identifier")]
    pub username: Option<String>,
    #[serde(default, alias = "secret")]
    pub password: Option<String>,
}

fn ergebnis_label(e: &AuthError) -> &'static str {
    match e {
        AuthError::Validierung(_) => "ungueltig",
        AuthError::KontoExistiert(_) => "vergeben",
        AuthError::UngueltigeAnmeldedaten => "abgelehnt",
        _ => "fehler",
    }
}

/// POST /auth/register
pub async fn registrieren(
    State(state): State<AppState>,
    JsonKoerper(anfrage): JsonKoerper<RegistrierenAnfrage>,
) -> ApiResult<impl IntoResponse> {
    let eingabe = Registrierung::neu(
        anfrage.username.as_deref().unwrap_or_default(),
        anfrage.password.as_deref().unwrap_or_default(),
        anfrage.email.as_deref(),
    );
    let ergebnis = match eingabe {
        Ok(eingabe) => state.auth.registrieren(eingabe).await,
        Err(v) => Err(AuthError::from(v)),
    };

    match ergebnis {
        Ok(konto) => {
            state.metriken.registrierung_zaehlen("erfolg");
            Ok((
                StatusCode::CREATED,
                Json(json!({ "id": konto.id, "username": konto.username })),
            ))
        }
        Err(e) => {
            state.metriken.registrierung_zaehlen(ergebnis_label(&e));
            Err(ApiError::from(e))
        }
    }
}

/// POST /auth/login
pub async fn anmelden(
    State(state): State<AppState>,
    JsonKoerper(anfrage): JsonKoerper<AnmeldenAnfrage>,
) -> ApiResult<impl IntoResponse> {
    let eingabe = Anmeldung::neu(
        anfrage.username.as_deref().unwrap_or_default(),
        anfrage.password.as_deref().unwrap_or_default(),
    );
    let ergebnis = match eingabe {
        Ok(eingabe) => state.auth.anmelden(eingabe).await,
        Err(v) => Err(AuthError::from(v)),
    };

    match ergebnis {
        Ok(a) => {
            state.metriken.anmeldung_zaehlen("erfolg");
            Ok(Json(json!({
                "token": a.token.token,
                "user": {
                    "id": a.konto.id,
                    "username": a.konto.username,
                    "role": a.konto.role,
                }
            })))
        }
        Err(e) => {
            state.metriken.anmeldung_zaehlen(ergebnis_label(&e));
            Err(ApiError::from(e))
        }
    }
}

/// GET /auth/me
pub async fn profil(
    State(state): State<AppState>,
    AngemeldetesKonto(id): AngemeldetesKonto,
) -> ApiResult<impl IntoResponse> {
    let konto = state.auth.profil(id).await?;
    Ok(Json(konto))
}
