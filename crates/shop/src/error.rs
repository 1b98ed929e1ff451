//! Fehlertypen fuer das Shop-Crate

use marktplatz_core::Verletzungen;
use thiserror::Error;
use uuid::Uuid;

/// Art der angefragten Ressource
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ressource {
    Produkt,
    Kunde,
}

impl Ressource {
    /// Meldung nach aussen, wenn die Ressource fehlt
    pub fn nicht_gefunden_meldung(&self) -> &'static str {
        match self {
            Self::Produkt => "Product not found",
            Self::Kunde => "Customer not found",
        }
    }

    /// Parst eine Pfad-ID; keine UUID heisst: gibt es nicht
    pub fn id_parsen(&self, roh: &str) -> ShopResult<Uuid> {
        Uuid::parse_str(roh).map_err(|_| ShopError::NichtGefunden(*self))
    }
}

/// Shop-Fehlertypen
#[derive(Debug, Error)]
pub enum ShopError {
    #[error(transparent)]
    Validierung(#[from] Verletzungen),

    #[error("{}", .0.nicht_gefunden_meldung())]
    NichtGefunden(Ressource),

    #[error("Keine Berechtigung")]
    KeineBerechtigung,

    #[error("Datenbank-Fehler: {0}")]
    DatenbankFehler(#[from] marktplatz_db::DbError),
}

pub type ShopResult<T> = Result<T, ShopError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn id_parsen_akzeptiert_uuid() {
        let id = Uuid::new_v4();
        assert_eq!(Ressource::Produkt.id_parsen(&id.to_string()).unwrap(), id);
    }

    #[test]
    fn id_parsen_ohne_uuid_ist_nicht_gefunden() {
        let fehler = Ressource::Kunde.id_parsen("507f1f77bcf86cd799439011").unwrap_err();
        assert!(matches!(fehler, ShopError::NichtGefunden(Ressource::Kunde)));
        assert_eq!(fehler.to_string(), "Customer not found");
    }
}
