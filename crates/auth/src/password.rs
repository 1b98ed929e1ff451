//! Passwort-Hashing mit Argon2id
//!
//! Stellt sichere Passwort-Hashfunktionen mit Argon2id bereit. Der Hash ist
//! ein PHC-String und enthaelt Algorithmus, Parameter und zufaelligen Salt;
//! die Verifikation vergleicht in konstanter Zeit.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, Params, Version,
};
use serde::{Deserialize, Serialize};

use crate::error::{AuthError, AuthResult};

/// Argon2id-Kostenparameter
///
/// Standardwerte gemaess OWASP-Empfehlungen:
/// - Speicher: 64 MiB
/// - Iterationen: 3
/// - Parallelismus: 1
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PasswortParameter {
    pub speicher_kib: u32,
    pub iterationen: u32,
    pub parallelitaet: u32,
}

impl Default for PasswortParameter {
    fn default() -> Self {
        Self {
            speicher_kib: 64 * 1024,
            iterationen: 3,
            parallelitaet: 1,
        }
    }
}

impl PasswortParameter {
    /// Minimale Kosten fuer Tests
    pub fn schnell() -> Self {
        Self {
            speicher_kib: 256,
            iterationen: 1,
            parallelitaet: 1,
        }
    }
}

/// Hasht und verifiziert Passwoerter mit festen Argon2id-Parametern
#[derive(Debug, Clone)]
pub struct PasswortHasher {
    params: Params,
}

impl PasswortHasher {
    /// Erstellt einen Hasher; ungueltige Parameter werden sofort abgelehnt
    pub fn neu(parameter: PasswortParameter) -> AuthResult<Self> {
        let params = Params::new(
            parameter.speicher_kib,
            parameter.iterationen,
            parameter.parallelitaet,
            None, // output_len: Standard (32 Bytes)
        )
        .map_err(|e| AuthError::PasswortHashing(format!("Argon2-Parameter ungueltig: {e}")))?;

        Ok(Self { params })
    }

    fn argon2(&self) -> Argon2<'static> {
        Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, self.params.clone())
    }

    /// Hasht ein Passwort mit einem zufaelligen Salt
    ///
    /// Gibt den PHC-String zurueck (inkl. Algorithmus, Parameter und Salt).
    pub fn hashen(&self, passwort: &str) -> AuthResult<String> {
        let salt = SaltString::generate(&mut OsRng);

        self.argon2()
            .hash_password(passwort.as_bytes(), &salt)
            .map(|hash| hash.to_string())
            .map_err(|e| AuthError::PasswortHashing(e.to_string()))
    }

    /// Verifiziert ein Passwort gegen einen gespeicherten PHC-Hash
    ///
    /// Gibt `true` zurueck wenn das Passwort korrekt ist. Die Parameter werden
    /// aus dem Hash gelesen, aeltere Hashes bleiben also pruefbar.
    pub fn verifizieren(&self, passwort: &str, hash: &str) -> AuthResult<bool> {
        let parsed_hash = PasswordHash::new(hash)
            .map_err(|e| AuthError::PasswortHashing(format!("Ungueltiges Hash-Format: {e}")))?;

        match self.argon2().verify_password(passwort.as_bytes(), &parsed_hash) {
            Ok(()) => Ok(true),
            Err(argon2::password_hash::Error::Password) => Ok(false),
            Err(e) => Err(AuthError::PasswortHashing(e.to_string())),
        }
    }
}
