//! Fehlertypen fuer den Auth-Service

use marktplatz_core::Verletzungen;
use thiserror::Error;

/// Alle moeglichen Fehler im Auth-Service
#[derive(Debug, Error)]
pub enum AuthError {
    // --- Eingabe ---
    #[error(transparent)]
    Validierung(#[from] Verletzungen),

    // --- Registrierung ---
    #[error("Benutzername bereits vergeben: {0}")]
    KontoExistiert(String),

    // --- Anmeldung ---
    /// Gleicher Fehler fuer unbekannten Benutzer und falsches Passwort
    #[error("Benutzername oder Passwort falsch")]
    UngueltigeAnmeldedaten,

    // --- Token ---
    #[error("Nicht authentifiziert: {0}")]
    NichtAuthentifiziert(TokenProblem),

    // --- Berechtigungen ---
    #[error("Keine Berechtigung")]
    KeineBerechtigung,

    #[error("Nicht gefunden: {0}")]
    NichtGefunden(String),

    // --- Passwort ---
    #[error("Passwort-Hashing fehlgeschlagen: {0}")]
    PasswortHashing(String),

    // --- Datenbank ---
    #[error("Datenbankfehler: {0}")]
    Speicher(#[from] marktplatz_db::DbError),

    // --- Intern ---
    #[error("Interner Fehler: {0}")]
    Intern(String),
}

/// Grund fuer eine fehlgeschlagene Token-Pruefung
///
/// Nach aussen wird nur zwischen "fehlt" und "ungueltig/abgelaufen"
/// unterschieden.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenProblem {
    #[error("kein Token uebermittelt")]
    Fehlt,
    #[error("Token ungueltig oder abgelaufen")]
    UngueltigOderAbgelaufen,
}

impl AuthError {
    pub fn intern(msg: impl Into<String>) -> Self {
        Self::Intern(msg.into())
    }
}

/// Result-Alias fuer den Auth-Service
pub type AuthResult<T> = Result<T, AuthError>;
