//! marktplatz-auth – Authentifizierung und Besitzpruefung
//!
//! Dieses Crate implementiert:
//! - Passwort-Hashing mit Argon2id
//! - Signierte Session-Tokens (HS256, 7 Tage gueltig)
//! - AuthService (Registrierung, Anmeldung, Token-Pruefung, Profil)
//! - Besitzpruefung fuer Ressourcen mit Eigentuemer

pub mod besitz;
pub mod eingabe;
pub mod error;
pub mod password;
pub mod service;
pub mod token;

// Bequeme Re-Exporte
pub use besitz::besitz_pruefen;
pub use eingabe::{Anmeldung, Registrierung};
pub use error::{AuthError, AuthResult, TokenProblem};
pub use password::{PasswortHasher, PasswortParameter};
pub use service::{AnmeldeErgebnis, AuthService};
pub use token::{
    AusgestelltesToken, TokenClaims, TokenDienst, MAX_GUELTIGKEIT_TAGE, STANDARD_GUELTIGKEIT_TAGE,
};
