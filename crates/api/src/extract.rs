//! Extraktoren fuer Bearer-Token und JSON-Koerper

use async_trait::async_trait;
use axum::{
    extract::{FromRequest, FromRequestParts},
    http::{header, request::Parts, HeaderMap},
};
use marktplatz_core::KontoId;

use crate::{error::ApiError, state::AppState};

/// Extrahiert das Token aus dem Authorization-Header
///
/// Das Token ist der zweite durch Leerzeichen getrennte Teil, unabhaengig
/// vom Schema. `Token abc` liefert also `abc`, das dann an der Signatur
/// scheitert. Fehlt der zweite Teil, gilt das Token als nicht vorhanden.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let wert = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    wert.split(' ').nth(1).filter(|t| !t.is_empty())
}

/// Das per Token nachgewiesene Konto der Anfrage
///
/// Handler, die dieses Argument nehmen, sind nur mit gueltigem Token
/// erreichbar.
#[derive(Debug, Clone, Copy)]
pub struct AngemeldetesKonto(pub KontoId);

#[async_trait]
impl FromRequestParts<AppState> for AngemeldetesKonto {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(&parts.headers);
        let id = state.auth.verifizieren(token)?;
        Ok(Self(id))
    }
}

/// `axum::Json` mit Fehlerantwort im Format der Schnittstelle
#[derive(Debug, FromRequest)]
#[from_request(via(axum::Json), rejection(ApiError))]
pub struct JsonKoerper<T>(pub T);
