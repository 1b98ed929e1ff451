//! SQLite-Backend-Implementierungen fuer alle Repository-Traits

pub mod konten;
pub mod kunden;
pub mod nachrichten;
pub mod pool;
pub mod produkte;

mod zeilen;

pub use pool::SqliteDb;
