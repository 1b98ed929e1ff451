//! # marktplatz-observability
//!
//! Observability-Crate fuer den Marktplatz:
//! - Prometheus-kompatible Metriken (`/metrics`)
//! - Health-Check-Endpunkt (`/health`) mit periodischer DB-Pruefung
//! - Structured Logging via tracing-subscriber (text oder JSON)
//! - Request-Timing Middleware

pub mod health;
pub mod logging;
pub mod metrics;
pub mod middleware;

pub use health::{
    db_ueberwachung_starten, health_router, HealthResponse, HealthState, HealthStatus,
    DB_PRUEF_INTERVALL,
};
pub use logging::logging_initialisieren;
pub use metrics::{metrics_router, MarktplatzMetriken};
pub use middleware::{request_timing_layer, timing_middleware};
