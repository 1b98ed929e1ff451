//! marktplatz-core – Gemeinsame Typen und Validierung
//!
//! Dieses Crate stellt die Bausteine bereit, die von allen anderen
//! Marktplatz-Crates gemeinsam genutzt werden.

pub mod types;
pub mod validierung;

// Re-Exporte fuer bequemen Zugriff
pub use types::{KontoId, Rolle};
pub use validierung::{email_gueltig, Verletzung, Verletzungen};
