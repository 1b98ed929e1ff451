//! Gepruefte Eingaben fuer Registrierung und Anmeldung
//!
//! Die Typen lassen sich nur ueber `neu()` erzeugen. Wer eine `Registrierung`
//! in der Hand haelt, hat also bereits gueltige Werte.

use marktplatz_core::{email_gueltig, validierung::optional_getrimmt, Verletzungen};

pub const MIN_BENUTZERNAME: usize = 3;
pub const MIN_PASSWORT: usize = 6;

/// Gepruefte Registrierungsdaten
#[derive(Clone)]
pub struct Registrierung {
    username: String,
    password: String,
    email: Option<String>,
}

impl std::fmt::Debug for Registrierung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registrierung")
            .field("username", &self.username)
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl Registrierung {
    /// Prueft alle Felder und sammelt saemtliche Verletzungen
    ///
    /// Der Benutzername wird getrimmt, das Passwort bleibt unveraendert.
    pub fn neu(
        username: &str,
        password: &str,
        email: Option<&str>,
    ) -> Result<Self, Verletzungen> {
        let username = username.trim().to_string();
        let email = optional_getrimmt(email.map(str::to_string));

        let mut v = Verletzungen::neu();
        v.pruefen(
            username.chars().count() >= MIN_BENUTZERNAME,
            "username",
            "Username must be at least 3 characters",
        );
        v.pruefen(
            password.chars().count() >= MIN_PASSWORT,
            "password",
            "Password must be at least 6 characters",
        );
        if let Some(ref e) = email {
            v.pruefen(email_gueltig(e), "email", "Invalid email format");
        }

        v.ergebnis(Self {
            username,
            password: password.to_string(),
            email,
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}

/// Gepruefte Anmeldedaten
#[derive(Clone)]
pub struct Anmeldung {
    username: String,
    password: String,
}

impl std::fmt::Debug for Anmeldung {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Anmeldung")
            .field("username", &self.username)
            .finish_non_exhaustive()
    }
}

impl Anmeldung {
    /// Der Benutzername bleibt unveraendert und wird exakt gesucht
    pub fn neu(username: &str, password: &str) -> Result<Self, Verletzungen> {
        let username = username.to_string();

        let mut v = Verletzungen::neu();
        v.pruefen(!username.is_empty(), "username", "Username required");
        v.pruefen(!password.is_empty(), "password", "Password required");

        v.ergebnis(Self {
            username,
            password: password.to_string(),
        })
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }
}
