//! Gemeinsame Helfer fuer das Lesen und Schreiben von SQLite-Zeilen
//!
//! UUIDs und Zeitstempel liegen als TEXT in der Datenbank. Zeitstempel werden
//! mit fester Mikrosekunden-Praezision in UTC geschrieben, damit die
//! lexikografische Sortierung der chronologischen entspricht.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::sqlite::SqliteRow;
use sqlx::Row as _;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

pub(crate) fn zeitstempel_text(zeit: &DateTime<Utc>) -> String {
    zeit.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Aktuelle Zeit, auf die gespeicherte Praezision gekuerzt
pub(crate) fn jetzt() -> DateTime<Utc> {
    let jetzt = Utc::now();
    DateTime::parse_from_rfc3339(&zeitstempel_text(&jetzt))
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(jetzt)
}

pub(crate) fn uuid_spalte(row: &SqliteRow, spalte: &str) -> DbResult<Uuid> {
    let text: String = row.try_get(spalte)?;
    Uuid::parse_str(&text).map_err(|e| DbError::intern(format!("Ungueltige UUID '{text}': {e}")))
}

pub(crate) fn zeit_spalte(row: &SqliteRow, spalte: &str) -> DbResult<DateTime<Utc>> {
    let text: String = row.try_get(spalte)?;
    DateTime::parse_from_rfc3339(&text)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| DbError::intern(format!("Ungueltiger Zeitstempel {spalte} '{text}': {e}")))
}

pub(crate) fn enum_spalte<T>(row: &SqliteRow, spalte: &str) -> DbResult<T>
where
    T: std::str::FromStr<Err = String>,
{
    let text: String = row.try_get(spalte)?;
    text.parse::<T>().map_err(DbError::UngueltigeDaten)
}
