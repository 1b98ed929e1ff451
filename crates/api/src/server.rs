//! Axum HTTP-Server fuer den Marktplatz

use std::net::SocketAddr;

use anyhow::Result;
use axum::http::{HeaderValue, Method};
use axum::{middleware, Router};
use marktplatz_observability::{
    health_router, metrics_router, request_timing_layer, timing_middleware, HealthState,
};
use tower_http::cors::{Any, CorsLayer};

use crate::{routes::api_router, state::AppState};

/// Konfiguration des HTTP-Servers
#[derive(Debug, Clone)]
pub struct ApiServerKonfig {
    pub bind_addr: SocketAddr,
    /// Erlaubte CORS-Origins. Leer = alle Origins erlaubt.
    pub cors_origins: Vec<String>,
    /// `/health` und `/metrics` mit ausliefern
    pub observability: bool,
}

impl Default for ApiServerKonfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            cors_origins: vec![],
            observability: true,
        }
    }
}

fn cors_layer(origins: &[String]) -> CorsLayer {
    // `AllowOrigin::list` akzeptiert keinen Wildcard-Eintrag
    if origins.is_empty() || origins.iter().any(|o| o.trim() == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|o| match o.parse() {
            Ok(v) => Some(v),
            Err(_) => {
                tracing::warn!(origin = %o, "Ungueltiger CORS-Origin ignoriert");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
}

/// Baut die komplette Anwendung inklusive Middleware
pub fn app_bauen(state: AppState, health: HealthState, konfig: &ApiServerKonfig) -> Router {
    let metriken = state.metriken.clone();

    let mut app = api_router().with_state(state);
    if konfig.observability {
        app = app
            .merge(health_router(health))
            .merge(metrics_router(metriken.clone()));
    }

    app.layer(middleware::from_fn_with_state(metriken, timing_middleware))
        .layer(request_timing_layer())
        .layer(cors_layer(&konfig.cors_origins))
}

/// Axum HTTP-Server fuer den Marktplatz
pub struct ApiServer {
    konfig: ApiServerKonfig,
}

impl ApiServer {
    pub fn neu(konfig: ApiServerKonfig) -> Self {
        Self { konfig }
    }

    /// Bindet den Port und bedient Anfragen bis `shutdown` fertig ist
    pub async fn starten(
        self,
        state: AppState,
        health: HealthState,
        shutdown: impl std::future::Future<Output = ()> + Send + 'static,
    ) -> Result<()> {
        let app = app_bauen(state, health, &self.konfig);

        let listener = tokio::net::TcpListener::bind(self.konfig.bind_addr).await?;
        tracing::info!(addr = %self.konfig.bind_addr, "Marktplatz-API gestartet");

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown)
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{header, Request},
        routing::get,
    };
    use tower::ServiceExt;

    async fn erlaubter_origin(origins: &[&str], origin: &str) -> Option<String> {
        let origins: Vec<String> = origins.iter().map(|o| o.to_string()).collect();
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(cors_layer(&origins));

        let antwort = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(header::ORIGIN, origin)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        antwort
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .map(|v| v.to_str().unwrap().to_string())
    }

    #[tokio::test]
    async fn wildcard_origin_erlaubt_alle() {
        let erlaubt = erlaubter_origin(&["*"], "http://irgendwo.example").await;
        assert_eq!(erlaubt.as_deref(), Some("*"));

        let gemischt = erlaubter_origin(&["http://localhost:3000", "*"], "http://x.example").await;
        assert_eq!(gemischt.as_deref(), Some("*"));
    }

    #[tokio::test]
    async fn origin_liste_wird_eingehalten() {
        let erlaubt =
            erlaubter_origin(&["http://localhost:3000"], "http://localhost:3000").await;
        assert_eq!(erlaubt.as_deref(), Some("http://localhost:3000"));

        let fremd = erlaubter_origin(&["http://localhost:3000"], "http://boese.example").await;
        assert_eq!(fremd, None);
    }
}
