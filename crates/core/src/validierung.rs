//! Feldvalidierung mit strukturierter Verletzungsliste
//!
//! Eingabetypen pruefen sich bei der Konstruktion selbst und sammeln dabei
//! alle verletzten Regeln, statt beim ersten Fehler abzubrechen.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Muster fuer E-Mail-Adressen
///
/// `(?-u)` beschraenkt `\w` auf `[A-Za-z0-9_]`; Umlaute sind nicht erlaubt.
static EMAIL_MUSTER: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?-u)^\w+([.-]?\w+)*@\w+([.-]?\w+)*(\.\w{2,3})+$")
        .expect("E-Mail-Muster ungueltig")
});

/// Prueft eine E-Mail-Adresse gegen das Standardmuster
pub fn email_gueltig(email: &str) -> bool {
    EMAIL_MUSTER.is_match(email)
}

/// Eine einzelne verletzte Feldregel
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Verletzung {
    #[serde(rename = "field")]
    pub feld: String,
    #[serde(rename = "message")]
    pub meldung: String,
}

/// Sammlung aller verletzten Regeln einer Eingabe
#[derive(Debug, Clone, Default, PartialEq, Eq, Error, Serialize)]
#[error("Validierung fehlgeschlagen: {}", self.zusammenfassung())]
#[serde(transparent)]
pub struct Verletzungen(Vec<Verletzung>);

impl Verletzungen {
    pub fn neu() -> Self {
        Self::default()
    }

    /// Fuegt eine Verletzung hinzu
    pub fn hinzufuegen(&mut self, feld: impl Into<String>, meldung: impl Into<String>) {
        self.0.push(Verletzung {
            feld: feld.into(),
            meldung: meldung.into(),
        });
    }

    /// Fuegt eine Verletzung hinzu wenn `bedingung` nicht erfuellt ist
    pub fn pruefen(&mut self, bedingung: bool, feld: &str, meldung: &str) {
        if !bedingung {
            self.hinzufuegen(feld, meldung);
        }
    }

    pub fn ist_leer(&self) -> bool {
        self.0.is_empty()
    }

    pub fn eintraege(&self) -> &[Verletzung] {
        &self.0
    }

    /// Betrifft eine der Verletzungen das angegebene Feld?
    pub fn betrifft(&self, feld: &str) -> bool {
        self.0.iter().any(|v| v.feld == feld)
    }

    /// `Ok(wert)` wenn keine Regel verletzt wurde, sonst die Sammlung
    pub fn ergebnis<T>(self, wert: T) -> Result<T, Self> {
        if self.ist_leer() {
            Ok(wert)
        } else {
            Err(self)
        }
    }

    fn zusammenfassung(&self) -> String {
        self.0
            .iter()
            .map(|v| format!("{}: {}", v.feld, v.meldung))
            .collect::<Vec<_>>()
            .join("; ")
    }
}

/// Trimmt einen optionalen String; leere Werte werden zu `None`
pub fn optional_getrimmt(wert: Option<String>) -> Option<String> {
    wert.map(|w| w.trim().to_string()).filter(|w| !w.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gueltige_emails() {
        assert!(email_gueltig("alice@example.com"));
        assert!(email_gueltig("first.last@dorf-laden.in"));
        assert!(email_gueltig("a_b@mail.co.uk"));
    }

    #[test]
    fn ungueltige_emails() {
        assert!(!email_gueltig(""));
        assert!(!email_gueltig("alice"));
        assert!(!email_gueltig("alice@"));
        assert!(!email_gueltig("alice@example"));
        assert!(!email_gueltig("alice@example.toolong"));
        assert!(!email_gueltig("alice example@mail.com"));
    }

    #[test]
    fn emails_mit_nicht_ascii_zeichen_werden_abgelehnt() {
        assert!(!email_gueltig("jürgen@example.com"));
        assert!(!email_gueltig("ram@dörf.in"));
        assert!(!email_gueltig("sita@dorf.ін"));
        assert!(email_gueltig("juergen@example.com"));
    }

    #[test]
    fn verletzungen_sammeln_alle_regeln() {
        let mut v = Verletzungen::neu();
        v.pruefen(false, "username", "zu kurz");
        v.pruefen(true, "email", "ungueltig");
        v.pruefen(false, "password", "zu kurz");

        assert_eq!(v.eintraege().len(), 2);
        assert!(v.betrifft("username"));
        assert!(v.betrifft("password"));
        assert!(!v.betrifft("email"));
        assert!(v.ergebnis(()).is_err());
    }

    #[test]
    fn leere_verletzungen_ergeben_ok() {
        assert_eq!(Verletzungen::neu().ergebnis(7), Ok(7));
    }

    #[test]
    fn verletzungen_json_format() {
        let mut v = Verletzungen::neu();
        v.hinzufuegen("price", "Price must be positive");
        let json = serde_json::to_value(&v).unwrap();
        assert_eq!(
            json,
            serde_json::json!([{ "field": "price", "message": "Price must be positive" }])
        );
    }

    #[test]
    fn optional_getrimmt_verwirft_leere_werte() {
        assert_eq!(optional_getrimmt(Some("  ".into())), None);
        assert_eq!(optional_getrimmt(Some(" 0123 ".into())), Some("0123".into()));
        assert_eq!(optional_getrimmt(None), None);
    }
}
