//! Server-Konfiguration
//!
//! Wird beim Start aus einer TOML-Datei geladen. Alle Felder haben
//! sinnvolle Standardwerte, sodass der Server ohne Konfigurationsdatei
//! lauffaehig ist. Einzige Ausnahme ist das Signatur-Geheimnis fuer Tokens:
//! ohne `JWT_SECRET` bzw. `auth.jwt_secret` startet der Server nicht.

use std::net::SocketAddr;

use anyhow::{bail, Context};
use marktplatz_auth::{PasswortParameter, MAX_GUELTIGKEIT_TAGE, STANDARD_GUELTIGKEIT_TAGE};
use marktplatz_db::DatabaseConfig;
use serde::{Deserialize, Serialize};

/// Umgebungsvariable fuer das Signatur-Geheimnis
pub const ENV_JWT_SECRET: &str = "JWT_SECRET";

/// Vollstaendige Server-Konfiguration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Netzwerk-Einstellungen
    pub netzwerk: NetzwerkEinstellungen,
    /// Datenbank-Einstellungen
    pub datenbank: DatenbankEinstellungen,
    /// Token- und Passwort-Einstellungen
    pub auth: AuthEinstellungen,
    /// Logging-Einstellungen
    pub logging: LoggingEinstellungen,
    /// Observability-Einstellungen (Metriken, Health)
    pub observability: ObservabilityEinstellungen,
}

/// Netzwerk-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NetzwerkEinstellungen {
    pub bind_adresse: String,
    /// Port fuer die REST-API
    pub port: u16,
    /// CORS-Origins (leer = alle erlaubt)
    pub cors_origins: Vec<String>,
}

impl Default for NetzwerkEinstellungen {
    fn default() -> Self {
        Self {
            bind_adresse: "0.0.0.0".into(),
            port: 5000,
            cors_origins: vec![],
        }
    }
}

/// Datenbank-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DatenbankEinstellungen {
    /// Verbindungs-URL
    pub url: String,
    /// Maximale Verbindungspool-Groesse
    pub max_verbindungen: u32,
    /// WAL-Modus fuer SQLite
    pub wal: bool,
}

impl Default for DatenbankEinstellungen {
    fn default() -> Self {
        let db = DatabaseConfig::default();
        Self {
            url: db.url,
            max_verbindungen: db.max_verbindungen,
            wal: db.sqlite_wal,
        }
    }
}

impl DatenbankEinstellungen {
    pub fn als_database_config(&self) -> DatabaseConfig {
        DatabaseConfig {
            url: self.url.clone(),
            max_verbindungen: self.max_verbindungen,
            sqlite_wal: self.wal,
        }
    }
}

/// Token- und Passwort-Einstellungen
#[derive(Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AuthEinstellungen {
    /// Signatur-Geheimnis; `JWT_SECRET` hat Vorrang
    pub jwt_secret: Option<String>,
    /// Gueltigkeit eines Tokens in Tagen
    pub token_gueltigkeit_tage: i64,
    /// Argon2id-Kostenparameter
    pub argon2: PasswortParameter,
}

impl Default for AuthEinstellungen {
    fn default() -> Self {
        Self {
            jwt_secret: None,
            token_gueltigkeit_tage: STANDARD_GUELTIGKEIT_TAGE,
            argon2: PasswortParameter::default(),
        }
    }
}

impl std::fmt::Debug for AuthEinstellungen {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthEinstellungen")
            .field("jwt_secret", &self.jwt_secret.as_ref().map(|_| "***"))
            .field("token_gueltigkeit_tage", &self.token_gueltigkeit_tage)
            .field("argon2", &self.argon2)
            .finish()
    }
}

/// Logging-Einstellungen
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingEinstellungen {
    /// Log-Level: "trace", "debug", "info", "warn", "error"
    pub level: String,
    /// Format: "json" oder "text"
    pub format: String,
}

impl Default for LoggingEinstellungen {
    fn default() -> Self {
        Self {
            level: "info".into(),
            format: "text".into(),
        }
    }
}

/// Observability-Einstellungen (Metriken + Health-Check)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ObservabilityEinstellungen {
    /// `/health` und `/metrics` ausliefern
    pub aktiviert: bool,
    /// Intervall der DB-Pruefung in Sekunden
    pub db_pruef_intervall_sek: u64,
}

impl Default for ObservabilityEinstellungen {
    fn default() -> Self {
        Self {
            aktiviert: true,
            db_pruef_intervall_sek: 30,
        }
    }
}

impl ServerConfig {
    /// Laedt die Konfiguration aus einer TOML-Datei.
    /// Gibt die Standardkonfiguration zurueck wenn die Datei nicht existiert.
    pub fn laden(pfad: &str) -> anyhow::Result<Self> {
        match std::fs::read_to_string(pfad) {
            Ok(inhalt) => {
                let config: Self = toml::from_str(&inhalt)
                    .map_err(|e| anyhow::anyhow!("Konfigurationsfehler in '{pfad}': {e}"))?;
                Ok(config)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::warn!(
                    pfad = pfad,
                    "Konfigurationsdatei nicht gefunden, verwende Standardwerte"
                );
                Ok(Self::default())
            }
            Err(e) => Err(anyhow::anyhow!(
                "Konfigurationsdatei '{pfad}' nicht lesbar: {e}"
            )),
        }
    }

    /// Ermittelt das Signatur-Geheimnis
    ///
    /// `env_wert` ist der Inhalt von `JWT_SECRET` (falls gesetzt) und hat
    /// Vorrang vor der Datei. Fehlt beides oder ist leer, ist das fatal.
    pub fn jwt_secret_aufloesen(&self, env_wert: Option<String>) -> anyhow::Result<String> {
        let kandidat = env_wert
            .filter(|s| !s.trim().is_empty())
            .or_else(|| {
                self.auth
                    .jwt_secret
                    .clone()
                    .filter(|s| !s.trim().is_empty())
            });

        match kandidat {
            Some(s) => Ok(s),
            None => bail!(
                "Kein Signatur-Geheimnis konfiguriert: {ENV_JWT_SECRET} setzen oder auth.jwt_secret in der Konfiguration angeben"
            ),
        }
    }

    /// Gibt die Bind-Adresse fuer die REST-API zurueck
    pub fn api_bind_adresse(&self) -> anyhow::Result<SocketAddr> {
        let roh = format!("{}:{}", self.netzwerk.bind_adresse, self.netzwerk.port);
        roh.parse()
            .with_context(|| format!("Ungueltige Bind-Adresse '{roh}'"))
    }

    /// Prueft Werte, die serde allein nicht abfangen kann
    pub fn pruefen(&self) -> anyhow::Result<()> {
        if !(1..=MAX_GUELTIGKEIT_TAGE).contains(&self.auth.token_gueltigkeit_tage) {
            bail!("auth.token_gueltigkeit_tage muss zwischen 1 und {MAX_GUELTIGKEIT_TAGE} liegen");
        }
        if !marktplatz_observability::logging::log_format_gueltig(&self.logging.format) {
            bail!("logging.format muss 'text' oder 'json' sein");
        }
        if self.observability.db_pruef_intervall_sek == 0 {
            bail!("observability.db_pruef_intervall_sek muss positiv sein");
        }
        Ok(())
    }
}
