//! Datenbankmodelle fuer den Marktplatz
//!
//! Diese Typen repraesentieren Datensaetze aus der Datenbank.
//! Sie sind von den Domain-Typen getrennt und dienen als reine Datenuebertragungsobjekte.

use chrono::{DateTime, Utc};
use marktplatz_core::{KontoId, Rolle};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Konten
// ---------------------------------------------------------------------------

/// Konto-Datensatz aus der Datenbank (ohne Passwort-Hash)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KontoRecord {
    pub id: KontoId,
    pub username: String,
    pub email: Option<String>,
    pub role: Rolle,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Konto inklusive Passwort-Hash
///
/// Nur ueber den privilegierten Lesepfad erhaeltlich und bewusst nicht
/// serialisierbar.
#[derive(Debug, Clone)]
pub struct Anmeldedaten {
    pub konto: KontoRecord,
    pub password_hash: String,
}

/// Daten zum Erstellen eines neuen Kontos
#[derive(Debug, Clone)]
pub struct NeuesKonto<'a> {
    pub username: &'a str,
    pub password_hash: &'a str,
    pub role: Rolle,
    pub email: Option<&'a str>,
}

// ---------------------------------------------------------------------------
// Produkte
// ---------------------------------------------------------------------------

/// Produkt-Kategorie
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Kategorie {
    Pickle,
    Oil,
    Snacks,
    Spices,
    #[default]
    Other,
}

impl Kategorie {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Pickle => "pickle",
            Self::Oil => "oil",
            Self::Snacks => "snacks",
            Self::Spices => "spices",
            Self::Other => "other",
        }
    }
}

impl std::str::FromStr for Kategorie {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pickle" => Ok(Self::Pickle),
            "oil" => Ok(Self::Oil),
            "snacks" => Ok(Self::Snacks),
            "spices" => Ok(Self::Spices),
            "other" => Ok(Self::Other),
            other => Err(format!("Unbekannte Kategorie: {other}")),
        }
    }
}

/// Kurzform des anbietenden Kontos (wird beim Laden mitgeliefert)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anbieter {
    pub id: KontoId,
    pub username: String,
}

/// Produkt-Datensatz aus der Datenbank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProduktRecord {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Kategorie,
    pub stock: i64,
    pub image: Option<String>,
    pub farmer_id: KontoId,
    /// Anbieter-Konto, sofern es noch existiert
    pub farmer: Option<Anbieter>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Produkts
#[derive(Debug, Clone)]
pub struct NeuesProdukt<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub price: f64,
    pub category: Kategorie,
    pub stock: i64,
    pub image: Option<&'a str>,
    pub farmer_id: KontoId,
}

/// Daten zum Aktualisieren eines Produkts
///
/// Der Anbieter ist absichtlich nicht aenderbar.
#[derive(Debug, Clone, Default)]
pub struct ProduktUpdate {
    pub name: Option<String>,
    /// `Some(None)` leert die Beschreibung
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub category: Option<Kategorie>,
    pub stock: Option<i64>,
    /// `Some(None)` entfernt das Bild
    pub image: Option<Option<String>>,
}

// ---------------------------------------------------------------------------
// Kunden
// ---------------------------------------------------------------------------

/// Kunden-Datensatz aus der Datenbank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KundeRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Daten zum Erstellen eines neuen Kunden
#[derive(Debug, Clone, Default)]
pub struct NeuerKunde<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub address: Option<&'a str>,
    pub city: Option<&'a str>,
    pub state: Option<&'a str>,
    pub pincode: Option<&'a str>,
}

/// Daten zum Aktualisieren eines Kunden
#[derive(Debug, Clone, Default)]
pub struct KundeUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

// ---------------------------------------------------------------------------
// Kontaktnachrichten
// ---------------------------------------------------------------------------

/// Bearbeitungsstatus einer Kontaktnachricht
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NachrichtStatus {
    #[default]
    New,
    Read,
    Replied,
}

impl NachrichtStatus {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Read => "read",
            Self::Replied => "replied",
        }
    }
}

impl std::str::FromStr for NachrichtStatus {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "new" => Ok(Self::New),
            "read" => Ok(Self::Read),
            "replied" => Ok(Self::Replied),
            other => Err(format!("Unbekannter Nachrichtenstatus: {other}")),
        }
    }
}

/// Kontaktnachricht aus der Datenbank
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NachrichtRecord {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: NachrichtStatus,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[serde(rename = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

/// Daten zum Speichern einer neuen Kontaktnachricht
#[derive(Debug, Clone)]
pub struct NeueNachricht<'a> {
    pub name: &'a str,
    pub email: &'a str,
    pub phone: Option<&'a str>,
    pub message: &'a str,
}
