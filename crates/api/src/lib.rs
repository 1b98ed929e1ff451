//! marktplatz-api – REST-Schnittstelle
//!
//! Routen fuer Auth, Produkte, Kunden und Kontaktnachrichten auf Axum.
//! Die Handler sind duenn: Eingaben extrahieren, Service aufrufen, Fehler
//! ueber [`ApiError`] in Statuscodes uebersetzen.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod routes;
pub mod server;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use extract::{bearer_token, AngemeldetesKonto};
pub use routes::api_router;
pub use server::{app_bauen, ApiServer, ApiServerKonfig};
pub use state::AppState;
