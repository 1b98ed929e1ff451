//! marktplatz-server – Bibliotheks-Root
//!
//! Deklariert alle Server-Module und stellt den oeffentlichen Einstiegspunkt
//! fuer Integrationstests bereit.

pub mod config;

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use config::ServerConfig;
use marktplatz_api::{ApiServer, ApiServerKonfig, AppState};
use marktplatz_auth::{AuthService, PasswortHasher, TokenDienst};
use marktplatz_db::SqliteDb;
use marktplatz_observability::{db_ueberwachung_starten, HealthState, MarktplatzMetriken};

/// Haelt den laufenden Server-Zustand zusammen
pub struct Server {
    pub config: ServerConfig,
    jwt_secret: String,
}

impl Server {
    /// Erstellt einen neuen Server aus Konfiguration und aufgeloestem Geheimnis
    pub fn neu(config: ServerConfig, jwt_secret: String) -> Self {
        Self { config, jwt_secret }
    }

    /// Baut Datenbank, Services und Metriken auf
    pub async fn zustand_aufbauen(&self) -> Result<(AppState, SqliteDb)> {
        let db = SqliteDb::oeffnen(&self.config.datenbank.als_database_config())
            .await
            .context("Datenbank konnte nicht geoeffnet werden")?;

        let hasher = PasswortHasher::neu(self.config.auth.argon2)?;
        let gueltigkeit = chrono::Duration::try_days(self.config.auth.token_gueltigkeit_tage)
            .context("auth.token_gueltigkeit_tage ausserhalb des Zeitbereichs")?;
        let token = TokenDienst::neu(&self.jwt_secret, gueltigkeit)?;
        let auth = AuthService::neu(Arc::new(db.clone()), hasher, token)?;

        let metriken = MarktplatzMetriken::neu()?;
        Ok((AppState::neu(db.clone(), auth, metriken), db))
    }

    /// Startet alle Server-Subsysteme und laeuft bis zum Shutdown-Signal
    ///
    /// Reihenfolge:
    /// 1. Datenbankverbindung herstellen, Migrationen ausfuehren
    /// 2. Services aufbauen
    /// 3. DB-Ueberwachung fuer `/health` starten
    /// 4. REST-API starten
    /// 5. Auf Ctrl-C warten
    pub async fn starten(self) -> Result<()> {
        let bind_addr = self.config.api_bind_adresse()?;
        tracing::info!(
            adresse = %bind_addr,
            datenbank = %self.config.datenbank.url,
            "Server startet"
        );

        let (state, db) = self.zustand_aufbauen().await?;

        let health = HealthState::neu(env!("CARGO_PKG_VERSION"));
        let intervall = Duration::from_secs(self.config.observability.db_pruef_intervall_sek);
        let ueberwachung = db_ueberwachung_starten(health.clone(), intervall, move || {
            let db = db.clone();
            async move { db.ping().await }
        });

        let api = ApiServer::neu(ApiServerKonfig {
            bind_addr,
            cors_origins: self.config.netzwerk.cors_origins.clone(),
            observability: self.config.observability.aktiviert,
        });

        let ergebnis = api.starten(state, health, shutdown_signal()).await;
        ueberwachung.abort();
        tracing::info!("Server beendet");
        ergebnis
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Shutdown-Signal empfangen, Server wird beendet"),
        Err(e) => tracing::error!("Signal-Handler konnte nicht installiert werden: {e}"),
    }
}
