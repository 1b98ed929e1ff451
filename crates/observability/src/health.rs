//! Health-Check-Endpunkt fuer den Marktplatz
//!
//! Endpoint: `GET /health`
//! Response: JSON mit Status, Version, Uptime und DB-Verbindungsstatus

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

/// Intervall der Hintergrund-Pruefung der Datenbank
pub const DB_PRUEF_INTERVALL: Duration = Duration::from_secs(30);

/// Status des Health-Checks
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
}

/// Antwort des Health-Check-Endpunkts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub version: String,
    pub uptime_seconds: u64,
    pub db_connected: bool,
}

/// Geteilter Zustand fuer den Health-Check-Handler
#[derive(Clone)]
pub struct HealthState {
    start_time: Instant,
    version: &'static str,
    db_connected: Arc<AtomicBool>,
}

impl HealthState {
    pub fn neu(version: &'static str) -> Self {
        Self {
            start_time: Instant::now(),
            version,
            db_connected: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    pub fn db_verbunden(&self) -> bool {
        self.db_connected.load(Ordering::Relaxed)
    }

    pub fn db_status_setzen(&self, verbunden: bool) {
        let vorher = self.db_connected.swap(verbunden, Ordering::Relaxed);
        if vorher && !verbunden {
            tracing::error!("Datenbank nicht erreichbar");
        } else if !vorher && verbunden {
            tracing::info!("Datenbank wieder erreichbar");
        }
    }

    pub fn antwort(&self) -> HealthResponse {
        let db_connected = self.db_verbunden();
        HealthResponse {
            status: if db_connected {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            },
            version: self.version.to_string(),
            uptime_seconds: self.uptime_seconds(),
            db_connected,
        }
    }
}

/// Startet die periodische DB-Pruefung im Hintergrund
///
/// `pruefen` liefert `true` wenn die Datenbank antwortet. Der erste Lauf
/// erfolgt sofort.
pub fn db_ueberwachung_starten<F, Fut>(
    state: HealthState,
    intervall: Duration,
    pruefen: F,
) -> JoinHandle<()>
where
    F: Fn() -> Fut + Send + 'static,
    Fut: Future<Output = bool> + Send + 'static,
{
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(intervall);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            state.db_status_setzen(pruefen().await);
        }
    })
}

/// Axum-Router fuer den `/health`-Endpunkt
pub fn health_router(state: HealthState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .with_state(state)
}

/// `GET /health` – gibt den Serverstatus zurueck
///
/// Auch bei `degraded` 200, damit Probes nicht sofort neu starten.
async fn health_handler(State(state): State<HealthState>) -> impl IntoResponse {
    (StatusCode::OK, Json(state.antwort()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::Request;
    use std::sync::atomic::AtomicUsize;
    use tower::ServiceExt;

    #[test]
    fn health_state_standard_verbunden() {
        let state = HealthState::neu("0.1.0");
        assert!(state.db_verbunden());
        assert!(state.uptime_seconds() < 5);
    }

    #[test]
    fn health_state_db_status_umschalten() {
        let state = HealthState::neu("0.1.0");
        state.db_status_setzen(false);
        assert!(!state.db_verbunden());
        assert_eq!(state.antwort().status, HealthStatus::Degraded);
        state.db_status_setzen(true);
        assert_eq!(state.antwort().status, HealthStatus::Healthy);
    }

    #[test]
    fn health_response_serialisierung() {
        let response = HealthResponse {
            status: HealthStatus::Healthy,
            version: "0.1.0".to_string(),
            uptime_seconds: 3600,
            db_connected: true,
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"status\":\"healthy\""));
        assert!(json.contains("\"uptime_seconds\":3600"));
        assert!(json.contains("\"db_connected\":true"));
    }

    #[tokio::test]
    async fn health_endpunkt_liefert_json() {
        let state = HealthState::neu("9.9.9");
        state.db_status_setzen(false);

        let antwort = health_router(state)
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(antwort.status(), StatusCode::OK);

        let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
            .await
            .unwrap();
        let json: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(json["status"], "degraded");
        assert_eq!(json["version"], "9.9.9");
        assert_eq!(json["db_connected"], false);
    }

    #[tokio::test(start_paused = true)]
    async fn ueberwachung_aktualisiert_flag() {
        let state = HealthState::neu("0.1.0");
        let aufrufe = Arc::new(AtomicUsize::new(0));

        let zaehler = Arc::clone(&aufrufe);
        let handle = db_ueberwachung_starten(state.clone(), DB_PRUEF_INTERVALL, move || {
            let zaehler = Arc::clone(&zaehler);
            async move {
                zaehler.fetch_add(1, Ordering::SeqCst);
                false
            }
        });

        tokio::time::sleep(Duration::from_secs(61)).await;
        assert!(!state.db_verbunden());
        assert_eq!(aufrufe.load(Ordering::SeqCst), 3);
        handle.abort();
    }
}
