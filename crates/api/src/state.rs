//! Geteilter Zustand aller Handler

use std::sync::Arc;

use marktplatz_auth::AuthService;
use marktplatz_db::SqliteDb;
use marktplatz_observability::MarktplatzMetriken;
use marktplatz_shop::{KontaktService, KundenService, ProduktService};

/// Axum-State fuer die REST-Schnittstelle
///
/// Alle Felder sind nach dem Start unveraenderlich und billig klonbar.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub produkte: Arc<ProduktService>,
    pub kunden: Arc<KundenService>,
    pub kontakt: Arc<KontaktService>,
    pub metriken: MarktplatzMetriken,
}

impl AppState {
    /// Verdrahtet alle Services auf einer gemeinsamen Datenbank
    pub fn neu(db: SqliteDb, auth: AuthService, metriken: MarktplatzMetriken) -> Self {
        let db = Arc::new(db);
        Self {
            auth: Arc::new(auth),
            produkte: ProduktService::neu(db.clone()),
            kunden: KundenService::neu(db.clone()),
            kontakt: KontaktService::neu(db),
            metriken,
        }
    }
}
