//! Prometheus-kompatible Metriken fuer den Marktplatz
//!
//! Registrierte Metriken:
//! - `marktplatz_http_requests_total` – Counter: HTTP-Anfragen (method, path, status)
//! - `marktplatz_http_request_duration_seconds` – Histogram: HTTP-Antwortzeit (method, path)
//! - `marktplatz_anmeldungen_total` – Counter: Anmeldeversuche (ergebnis)
//! - `marktplatz_registrierungen_total` – Counter: Registrierungen (ergebnis)

use anyhow::Result;
use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    routing::get,
    Router,
};
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounterVec, Opts, Registry, TextEncoder,
};
use std::sync::Arc;

/// Alle Marktplatz-Prometheus-Metriken
#[derive(Clone)]
pub struct MarktplatzMetriken {
    pub registry: Arc<Registry>,

    // HTTP-Metriken
    pub http_requests_total: IntCounterVec,
    pub http_request_duration_seconds: HistogramVec,

    // Auth-Metriken
    pub anmeldungen_total: IntCounterVec,
    pub registrierungen_total: IntCounterVec,
}

impl MarktplatzMetriken {
    /// Erstellt und registriert alle Metriken in einer neuen Registry
    pub fn neu() -> Result<Self> {
        let registry = Registry::new();

        // --- HTTP-Metriken ---
        let http_requests_total = IntCounterVec::new(
            Opts::new("marktplatz_http_requests_total", "Gesamtanzahl HTTP-Anfragen"),
            &["method", "path", "status"],
        )?;
        registry.register(Box::new(http_requests_total.clone()))?;

        let http_request_duration_seconds = HistogramVec::new(
            HistogramOpts::new(
                "marktplatz_http_request_duration_seconds",
                "HTTP-Antwortzeit in Sekunden",
            )
            .buckets(vec![
                0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5,
            ]),
            &["method", "path"],
        )?;
        registry.register(Box::new(http_request_duration_seconds.clone()))?;

        // --- Auth-Metriken ---
        let anmeldungen_total = IntCounterVec::new(
            Opts::new("marktplatz_anmeldungen_total", "Anmeldeversuche nach Ergebnis"),
            &["ergebnis"],
        )?;
        registry.register(Box::new(anmeldungen_total.clone()))?;

        let registrierungen_total = IntCounterVec::new(
            Opts::new(
                "marktplatz_registrierungen_total",
                "Registrierungsversuche nach Ergebnis",
            ),
            &["ergebnis"],
        )?;
        registry.register(Box::new(registrierungen_total.clone()))?;

        Ok(Self {
            registry: Arc::new(registry),
            http_requests_total,
            http_request_duration_seconds,
            anmeldungen_total,
            registrierungen_total,
        })
    }

    /// Zaehlt einen Anmeldeversuch (`erfolg`, `abgelehnt`, `ungueltig`, `fehler`)
    pub fn anmeldung_zaehlen(&self, ergebnis: &str) {
        self.anmeldungen_total.with_label_values(&[ergebnis]).inc();
    }

    /// Zaehlt einen Registrierungsversuch (`erfolg`, `vergeben`, `ungueltig`, `fehler`)
    pub fn registrierung_zaehlen(&self, ergebnis: &str) {
        self.registrierungen_total.with_label_values(&[ergebnis]).inc();
    }

    /// Erfasst eine abgeschlossene HTTP-Anfrage
    pub fn anfrage_erfassen(&self, methode: &str, pfad: &str, status: u16, sekunden: f64) {
        self.http_requests_total
            .with_label_values(&[methode, pfad, &status.to_string()])
            .inc();
        self.http_request_duration_seconds
            .with_label_values(&[methode, pfad])
            .observe(sekunden);
    }

    /// Exportiert alle Metriken im Prometheus-Textformat
    pub fn exportieren(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        let mut buffer = Vec::new();
        encoder.encode(&metric_families, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// Axum-Router fuer den `/metrics`-Endpunkt
pub fn metrics_router(metriken: MarktplatzMetriken) -> Router {
    Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metriken)
}

async fn metrics_handler(State(metriken): State<MarktplatzMetriken>) -> impl IntoResponse {
    match metriken.exportieren() {
        Ok(text) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            text,
        )
            .into_response(),
        Err(err) => {
            tracing::error!("Metriken-Export fehlgeschlagen: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
