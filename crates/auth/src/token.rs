//! Signierte Session-Tokens
//!
//! Ein Token ist ein HS256-JWT mit der Konto-ID als einzigem eigenen Claim
//! sowie `iat` und `exp`. Tokens werden nirgends gespeichert: gueltig ist,
//! was korrekt signiert und noch nicht abgelaufen ist. Die Pruefung ist rein
//! lokal und braucht keinen Datenbankzugriff.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use marktplatz_core::KontoId;
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult, TokenProblem};

/// Standard-Gueltigkeit eines Tokens: 7 Tage
pub const STANDARD_GUELTIGKEIT_TAGE: i64 = 7;

/// Obergrenze der Token-Gueltigkeit: 10 Jahre
pub const MAX_GUELTIGKEIT_TAGE: i64 = 3650;

/// Claims eines Session-Tokens
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    #[serde(rename = "userId")]
    pub konto_id: KontoId,
    /// Ausgestellt (Sekunden seit Epoch)
    pub iat: i64,
    /// Ablauf (Sekunden seit Epoch)
    pub exp: i64,
}

/// Ein frisch ausgestelltes Token
#[derive(Debug, Clone)]
pub struct AusgestelltesToken {
    pub token: String,
    pub laeuft_ab_am: DateTime<Utc>,
}

/// Stellt Tokens aus und prueft sie
///
/// Der Schluessel wird einmal beim Start geladen und danach nur gelesen.
#[derive(Clone)]
pub struct TokenDienst {
    encoding: EncodingKey,
    decoding: DecodingKey,
    validation: Validation,
    gueltigkeit: Duration,
}

impl std::fmt::Debug for TokenDienst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenDienst")
            .field("gueltigkeit", &self.gueltigkeit)
            .finish_non_exhaustive()
    }
}

impl TokenDienst {
    /// Erstellt den Dienst aus dem Signatur-Geheimnis
    ///
    /// Ein leeres Geheimnis wird abgelehnt, ebenso eine Gueltigkeit
    /// ausserhalb von `(0, MAX_GUELTIGKEIT_TAGE]`.
    pub fn neu(geheimnis: &str, gueltigkeit: Duration) -> AuthResult<Self> {
        if geheimnis.trim().is_empty() {
            return Err(AuthError::intern("Signatur-Geheimnis darf nicht leer sein"));
        }
        if gueltigkeit <= Duration::zero() {
            return Err(AuthError::intern("Token-Gueltigkeit muss positiv sein"));
        }
        if gueltigkeit.num_days() > MAX_GUELTIGKEIT_TAGE {
            return Err(AuthError::intern(format!(
                "Token-Gueltigkeit darf {MAX_GUELTIGKEIT_TAGE} Tage nicht ueberschreiten"
            )));
        }

        let mut validation = Validation::new(Algorithm::HS256);
        // Abgelaufen heisst abgelaufen
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.set_required_spec_claims(&["exp", "iat"]);

        Ok(Self {
            encoding: EncodingKey::from_secret(geheimnis.as_bytes()),
            decoding: DecodingKey::from_secret(geheimnis.as_bytes()),
            validation,
            gueltigkeit,
        })
    }

    pub fn gueltigkeit(&self) -> Duration {
        self.gueltigkeit
    }

    /// Stellt ein Token fuer das Konto aus, gueltig ab jetzt
    pub fn ausstellen(&self, konto_id: KontoId) -> AuthResult<AusgestelltesToken> {
        self.ausstellen_zum(konto_id, Utc::now())
    }

    /// Stellt ein Token mit explizitem Ausstellungszeitpunkt aus
    pub fn ausstellen_zum(
        &self,
        konto_id: KontoId,
        ausgestellt: DateTime<Utc>,
    ) -> AuthResult<AusgestelltesToken> {
        let laeuft_ab_am = ausgestellt
            .checked_add_signed(self.gueltigkeit)
            .ok_or_else(|| AuthError::intern("Ablaufzeitpunkt ausserhalb des Zeitbereichs"))?;
        let claims = TokenClaims {
            konto_id,
            iat: ausgestellt.timestamp(),
            exp: laeuft_ab_am.timestamp(),
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AuthError::intern(format!("Token-Signatur fehlgeschlagen: {e}")))?;

        Ok(AusgestelltesToken {
            token,
            laeuft_ab_am,
        })
    }

    /// Prueft Signatur und Ablauf und liefert die Konto-ID
    ///
    /// Fehlerhafte, fremd signierte und abgelaufene Tokens ergeben alle
    /// denselben Fehler.
    pub fn pruefen(&self, token: &str) -> AuthResult<KontoId> {
        decode::<TokenClaims>(token, &self.decoding, &self.validation)
            .map(|daten| daten.claims.konto_id)
            .map_err(|e| {
                tracing::debug!(grund = %e, "Token abgelehnt");
                AuthError::NichtAuthentifiziert(TokenProblem::UngueltigOderAbgelaufen)
            })
    }
}
