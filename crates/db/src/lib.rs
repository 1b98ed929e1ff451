//! marktplatz-db – Datenbank-Abstraktion
//!
//! Dieses Crate stellt das Repository-Pattern bereit. Die Traits beschreiben,
//! was die Services vom Speicher erwarten; [`SqliteDb`] implementiert sie
//! alle auf einem gemeinsamen SQLite-Pool.

pub mod error;
pub mod models;
pub mod repository;
pub mod sqlite;

pub use error::{DbError, DbResult};
pub use repository::{
    DatabaseConfig, KontoRepository, KundeRepository, NachrichtRepository, ProduktRepository,
};
pub use sqlite::SqliteDb;
