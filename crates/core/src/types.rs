//! Gemeinsame Identifikationstypen fuer den Marktplatz
//!
//! Konto-IDs verwenden das Newtype-Pattern, damit eine Konto-ID nicht
//! versehentlich mit einer Produkt- oder Kunden-ID verglichen wird.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Eindeutige Konto-ID
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KontoId(pub Uuid);

impl KontoId {
    /// Erstellt eine neue zufaellige KontoId
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Gibt die innere UUID zurueck
    pub fn inner(&self) -> Uuid {
        self.0
    }
}

impl Default for KontoId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for KontoId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for KontoId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Rolle eines Kontos
///
/// Auf der Leitung als `user`, `farmer` und `admin` kodiert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Rolle {
    /// Normaler Benutzer (Standard)
    #[default]
    #[serde(rename = "user")]
    Benutzer,
    /// Erzeuger, der Produkte anbietet
    #[serde(rename = "farmer")]
    Erzeuger,
    /// Administrator
    #[serde(rename = "admin")]
    Admin,
}

impl Rolle {
    pub fn als_str(&self) -> &'static str {
        match self {
            Self::Benutzer => "user",
            Self::Erzeuger => "farmer",
            Self::Admin => "admin",
        }
    }
}

impl std::fmt::Display for Rolle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.als_str())
    }
}

impl std::str::FromStr for Rolle {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Self::Benutzer),
            "farmer" => Ok(Self::Erzeuger),
            "admin" => Ok(Self::Admin),
            other => Err(format!("Unbekannte Rolle: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn konto_id_eindeutig() {
        let a = KontoId::new();
        let b = KontoId::new();
        assert_ne!(a, b, "Zwei neue KontoIds muessen verschieden sein");
    }

    #[test]
    fn konto_id_serialisiert_als_uuid_string() {
        let id = KontoId(Uuid::nil());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"00000000-0000-0000-0000-000000000000\"");
        let zurueck: KontoId = serde_json::from_str(&json).unwrap();
        assert_eq!(zurueck, id);
    }

    #[test]
    fn konto_id_parsen() {
        assert!("kein-uuid".parse::<KontoId>().is_err());
        let id = KontoId::new();
        assert_eq!(id.to_string().parse::<KontoId>().unwrap(), id);
    }

    #[test]
    fn rolle_standard_ist_benutzer() {
        assert_eq!(Rolle::default(), Rolle::Benutzer);
    }

    #[test]
    fn rolle_leitungsformat() {
        assert_eq!(serde_json::to_string(&Rolle::Erzeuger).unwrap(), "\"farmer\"");
        assert_eq!("admin".parse::<Rolle>().unwrap(), Rolle::Admin);
        assert!("superuser".parse::<Rolle>().is_err());
    }
}
