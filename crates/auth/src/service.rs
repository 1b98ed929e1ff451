//! Auth-Service fuer den Marktplatz
//!
//! Zentraler Service fuer Registrierung, Anmeldung und Token-Pruefung.
//! Nutzt das Konto-Repository, den Passwort-Hasher und den Token-Dienst.

use std::sync::Arc;

use marktplatz_core::{KontoId, Rolle};
use marktplatz_db::{
    models::{KontoRecord, NeuesKonto},
    KontoRepository,
};

use crate::{
    eingabe::{Anmeldung, Registrierung},
    error::{AuthError, AuthResult, TokenProblem},
    password::PasswortHasher,
    token::{AusgestelltesToken, TokenDienst},
};

/// Passwort fuer den Vergleichs-Hash bei unbekannten Benutzernamen
const DUMMY_PASSWORT: &str = "marktplatz-kein-konto";

/// Ergebnis einer erfolgreichen Anmeldung
#[derive(Debug, Clone)]
pub struct AnmeldeErgebnis {
    pub token: AusgestelltesToken,
    pub konto: KontoRecord,
}

/// Auth-Service – zentraler Einstiegspunkt fuer alle Authentifizierungsvorgaenge
pub struct AuthService {
    konten: Arc<dyn KontoRepository>,
    hasher: PasswortHasher,
    token: TokenDienst,
    dummy_hash: String,
}

impl AuthService {
    /// Erstellt einen neuen AuthService
    ///
    /// Berechnet einmalig den Vergleichs-Hash, daher einmal pro Prozess aufrufen.
    pub fn neu(
        konten: Arc<dyn KontoRepository>,
        hasher: PasswortHasher,
        token: TokenDienst,
    ) -> AuthResult<Self> {
        let dummy_hash = hasher.hashen(DUMMY_PASSWORT)?;
        Ok(Self {
            konten,
            hasher,
            token,
            dummy_hash,
        })
    }

    pub fn token_dienst(&self) -> &TokenDienst {
        &self.token
    }

    /// Registriert ein neues Konto mit der Rolle `user`
    pub async fn registrieren(&self, eingabe: Registrierung) -> AuthResult<KontoRecord> {
        let passwort_hash = self.hashen(eingabe.password()).await?;

        let ergebnis = self
            .konten
            .create(NeuesKonto {
                username: eingabe.username(),
                password_hash: &passwort_hash,
                role: Rolle::default(),
                email: eingabe.email(),
            })
            .await;

        let konto = match ergebnis {
            Ok(konto) => konto,
            Err(e) if e.ist_eindeutigkeit() => {
                tracing::info!(username = %eingabe.username(), "Benutzername bereits vergeben");
                return Err(AuthError::KontoExistiert(eingabe.username().to_string()));
            }
            Err(e) => return Err(e.into()),
        };

        tracing::info!(
            user_id = %konto.id,
            username = %konto.username,
            "Neues Konto registriert"
        );

        Ok(konto)
    }

    /// Meldet ein Konto an und stellt ein Token aus
    ///
    /// Unbekannter Benutzer und falsches Passwort ergeben denselben Fehler.
    pub async fn anmelden(&self, eingabe: Anmeldung) -> AuthResult<AnmeldeErgebnis> {
        let daten = self.konten.anmeldedaten_laden(eingabe.username()).await?;

        let (konto, hash) = match daten {
            Some(d) => (Some(d.konto), d.password_hash),
            None => (None, self.dummy_hash.clone()),
        };

        let korrekt = self.verifizieren_blockierend(eingabe.password(), hash).await?;

        let konto = match konto {
            Some(k) if korrekt => k,
            _ => {
                tracing::warn!(username = %eingabe.username(), "Fehlgeschlagener Login-Versuch");
                return Err(AuthError::UngueltigeAnmeldedaten);
            }
        };

        let token = self.token.ausstellen(konto.id)?;

        tracing::info!(
            user_id = %konto.id,
            username = %konto.username,
            "Konto angemeldet"
        );

        Ok(AnmeldeErgebnis { token, konto })
    }

    /// Prueft ein uebermitteltes Token und liefert die Konto-ID
    ///
    /// Rein lokal, ohne Datenbankzugriff.
    pub fn verifizieren(&self, token: Option<&str>) -> AuthResult<KontoId> {
        match token.map(str::trim).filter(|t| !t.is_empty()) {
            Some(t) => self.token.pruefen(t),
            None => Err(AuthError::NichtAuthentifiziert(TokenProblem::Fehlt)),
        }
    }

    /// Laedt das oeffentliche Profil eines Kontos
    pub async fn profil(&self, id: KontoId) -> AuthResult<KontoRecord> {
        self.konten
            .get_by_id(id)
            .await?
            .ok_or_else(|| AuthError::NichtGefunden(format!("Konto {id}")))
    }

    async fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let hasher = self.hasher.clone();
        let passwort = passwort.to_string();
        tokio::task::spawn_blocking(move || hasher.hashen(&passwort))
            .await
            .map_err(|e| AuthError::intern(format!("Hash-Task abgebrochen: {e}")))?
    }

    async fn verifizieren_blockierend(&self, passwort: &str, hash: String) -> AuthResult<bool> {
        let hasher = self.hasher.clone();
        let passwort = passwort.to_string();
        tokio::task::spawn_blocking(move || hasher.verifizieren(&passwort, &hash))
            .await
            .map_err(|e| AuthError::intern(format!("Verifikations-Task abgebrochen: {e}")))?
    }
}
