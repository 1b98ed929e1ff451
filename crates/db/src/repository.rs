//! Repository-Trait-Definitionen
//!
//! Das Repository-Pattern entkoppelt die Geschaeftslogik von der konkreten
//! Datenbank-Implementierung. Die Services halten die Repositories als
//! `Arc<dyn ...>`, daher sind die Traits objektsicher ueber `async_trait`.

use async_trait::async_trait;
use marktplatz_core::KontoId;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{
    Anmeldedaten, KontoRecord, KundeRecord, KundeUpdate, NachrichtRecord, NeueNachricht,
    NeuerKunde, NeuesKonto, NeuesProdukt, ProduktRecord, ProduktUpdate,
};

/// Konfiguration fuer die Datenbankverbindung
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// Verbindungs-URL (z.B. "sqlite://marktplatz.db")
    pub url: String,
    /// Maximale Anzahl gleichzeitiger Verbindungen im Pool
    pub max_verbindungen: u32,
    /// Ob WAL-Modus bei SQLite aktiviert werden soll
    pub sqlite_wal: bool,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            url: "sqlite://marktplatz.db".into(),
            max_verbindungen: 5,
            sqlite_wal: true,
        }
    }
}

/// Anmeldedaten-Speicher
///
/// Eindeutigkeit des Benutzernamens wird vom Speicher selbst garantiert:
/// `create` schlaegt bei einem vergebenen Namen mit
/// [`DbError::Eindeutigkeit`](crate::DbError::Eindeutigkeit) fehl, auch wenn
/// zwei Aufrufe gleichzeitig laufen.
#[async_trait]
pub trait KontoRepository: Send + Sync {
    /// Legt ein neues Konto an
    async fn create(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord>;

    /// Laedt ein Konto anhand seiner ID
    async fn get_by_id(&self, id: KontoId) -> DbResult<Option<KontoRecord>>;

    /// Laedt ein Konto anhand des Benutzernamens (exakt, Gross-/Kleinschreibung beachtet)
    async fn get_by_name(&self, username: &str) -> DbResult<Option<KontoRecord>>;

    /// Privilegierter Lesepfad: Konto inklusive Passwort-Hash
    async fn anmeldedaten_laden(&self, username: &str) -> DbResult<Option<Anmeldedaten>>;
}

/// Repository fuer Katalog-Produkte
#[async_trait]
pub trait ProduktRepository: Send + Sync {
    async fn create(&self, data: NeuesProdukt<'_>) -> DbResult<ProduktRecord>;
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<ProduktRecord>>;
    async fn list(&self) -> DbResult<Vec<ProduktRecord>>;
    /// Aendert nur gesetzte Felder; `NichtGefunden` wenn das Produkt fehlt
    async fn update(&self, id: Uuid, data: ProduktUpdate) -> DbResult<ProduktRecord>;
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Repository fuer Kundenstammdaten
#[async_trait]
pub trait KundeRepository: Send + Sync {
    async fn create(&self, data: NeuerKunde<'_>) -> DbResult<KundeRecord>;
    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KundeRecord>>;
    async fn list(&self) -> DbResult<Vec<KundeRecord>>;
    /// Aendert nur gesetzte Felder; `NichtGefunden` wenn der Kunde fehlt
    async fn update(&self, id: Uuid, data: KundeUpdate) -> DbResult<KundeRecord>;
    async fn delete(&self, id: Uuid) -> DbResult<bool>;
}

/// Repository fuer Kontaktnachrichten
#[async_trait]
pub trait NachrichtRepository: Send + Sync {
    async fn create(&self, data: NeueNachricht<'_>) -> DbResult<NachrichtRecord>;
    /// Alle Nachrichten, neueste zuerst
    async fn list(&self) -> DbResult<Vec<NachrichtRecord>>;
}
