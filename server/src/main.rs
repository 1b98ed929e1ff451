//! Marktplatz Server – Einstiegspunkt
//!
//! Laedt die Konfiguration, initialisiert das Logging und startet den Server.

use anyhow::Result;
use marktplatz_observability::logging_initialisieren;
use marktplatz_server::{
    config::{ServerConfig, ENV_JWT_SECRET},
    Server,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Konfigurationsdatei-Pfad aus Umgebungsvariable oder Standard
    let config_pfad = std::env::var("MARKTPLATZ_CONFIG").unwrap_or_else(|_| "config.toml".into());

    // Konfiguration laden (Standardwerte falls Datei fehlt)
    let config = ServerConfig::laden(&config_pfad)?;

    // Logging initialisieren
    logging_initialisieren(&config.logging.level, &config.logging.format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        config = %config_pfad,
        "Marktplatz Server wird initialisiert"
    );

    if let Err(e) = config.pruefen() {
        tracing::error!("Ungueltige Konfiguration: {e:#}");
        return Err(e);
    }

    let jwt_secret = match config.jwt_secret_aufloesen(std::env::var(ENV_JWT_SECRET).ok()) {
        Ok(s) => s,
        Err(e) => {
            tracing::error!("{e:#}");
            return Err(e);
        }
    };

    let server = Server::neu(config, jwt_secret);
    server.starten().await?;

    Ok(())
}
