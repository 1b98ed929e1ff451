//! Fehlertypen der REST-Schnittstelle
//!
//! Jeder Fehler wird genau einmal in Statuscode und JSON-Koerper uebersetzt.
//! Interne Ursachen landen nur im Log, nie in der Antwort.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use marktplatz_auth::{AuthError, TokenProblem};
use marktplatz_core::Verletzungen;
use marktplatz_shop::ShopError;
use serde_json::json;
use thiserror::Error;

/// Alle Fehler, die ein Handler zurueckgeben kann
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Auth-Fehler: {0}")]
    Auth(#[from] AuthError),

    #[error("Shop-Fehler: {0}")]
    Shop(#[from] ShopError),

    #[error("Ungueltiger Anfragekoerper: {0}")]
    UngueltigerKoerper(String),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::UngueltigerKoerper(rejection.body_text())
    }
}

fn validierung(v: &Verletzungen) -> (StatusCode, serde_json::Value) {
    (
        StatusCode::BAD_REQUEST,
        json!({ "error": "Validation failed", "details": v }),
    )
}

fn meldung(status: StatusCode, text: &str) -> (StatusCode, serde_json::Value) {
    (status, json!({ "error": text }))
}

fn intern(fehler: &dyn std::fmt::Display) -> (StatusCode, serde_json::Value) {
    tracing::error!(fehler = %fehler, "Interner Fehler bei Anfrage");
    meldung(StatusCode::INTERNAL_SERVER_ERROR, "Internal server error")
}

impl ApiError {
    /// Statuscode und JSON-Koerper der Fehlerantwort
    pub fn antwort(&self) -> (StatusCode, serde_json::Value) {
        match self {
            Self::UngueltigerKoerper(grund) => {
                tracing::debug!(grund = %grund, "Anfragekoerper abgelehnt");
                meldung(StatusCode::BAD_REQUEST, "Invalid request body")
            }

            Self::Auth(e) => match e {
                AuthError::Validierung(v) => validierung(v),
                AuthError::KontoExistiert(_) => {
                    meldung(StatusCode::CONFLICT, "Username already exists")
                }
                AuthError::UngueltigeAnmeldedaten => {
                    meldung(StatusCode::UNAUTHORIZED, "Invalid credentials")
                }
                AuthError::NichtAuthentifiziert(TokenProblem::Fehlt) => {
                    meldung(StatusCode::UNAUTHORIZED, "No token provided")
                }
                AuthError::NichtAuthentifiziert(TokenProblem::UngueltigOderAbgelaufen) => {
                    meldung(StatusCode::UNAUTHORIZED, "Invalid or expired token")
                }
                AuthError::KeineBerechtigung => meldung(StatusCode::FORBIDDEN, "Not authorized"),
                AuthError::NichtGefunden(_) => meldung(StatusCode::NOT_FOUND, "User not found"),
                AuthError::PasswortHashing(_) | AuthError::Speicher(_) | AuthError::Intern(_) => {
                    intern(e)
                }
            },

            Self::Shop(e) => match e {
                ShopError::Validierung(v) => validierung(v),
                ShopError::NichtGefunden(r) => {
                    meldung(StatusCode::NOT_FOUND, r.nicht_gefunden_meldung())
                }
                ShopError::KeineBerechtigung => meldung(StatusCode::FORBIDDEN, "Not authorized"),
                ShopError::DatenbankFehler(_) => intern(e),
            },
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, koerper) = self.antwort();
        (status, Json(koerper)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use marktplatz_db::DbError;
    use marktplatz_shop::Ressource;

    #[test]
    fn validierung_mit_details() {
        let mut v = Verletzungen::neu();
        v.hinzufuegen("password", "Password must be at least 6 characters");

        let (status, koerper) = ApiError::from(AuthError::Validierung(v)).antwort();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(koerper["error"], "Validation failed");
        assert_eq!(koerper["details"][0]["field"], "password");
        assert_eq!(
            koerper["details"][0]["message"],
            "Password must be at least 6 characters"
        );
    }

    #[test]
    fn statuscodes() {
        let faelle: Vec<(ApiError, StatusCode)> = vec![
            (AuthError::KontoExistiert("a".into()).into(), StatusCode::CONFLICT),
            (AuthError::UngueltigeAnmeldedaten.into(), StatusCode::UNAUTHORIZED),
            (
                AuthError::NichtAuthentifiziert(TokenProblem::Fehlt).into(),
                StatusCode::UNAUTHORIZED,
            ),
            (AuthError::KeineBerechtigung.into(), StatusCode::FORBIDDEN),
            (ShopError::KeineBerechtigung.into(), StatusCode::FORBIDDEN),
            (
                ShopError::NichtGefunden(Ressource::Produkt).into(),
                StatusCode::NOT_FOUND,
            ),
            (
                ApiError::UngueltigerKoerper("x".into()),
                StatusCode::BAD_REQUEST,
            ),
        ];

        for (fehler, erwartet) in faelle {
            assert_eq!(fehler.antwort().0, erwartet, "{fehler}");
        }
    }

    #[test]
    fn speicherfehler_verraten_nichts() {
        let fehler: ApiError =
            AuthError::Speicher(DbError::intern("geheime Tabelle kaputt")).into();
        let (status, koerper) = fehler.antwort();

        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(koerper, json!({ "error": "Internal server error" }));
    }
}
