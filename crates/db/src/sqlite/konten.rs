//! SQLite-Implementierung des KontoRepository

use async_trait::async_trait;
use marktplatz_core::KontoId;
use sqlx::sqlite::SqliteRow;
use sqlx::Row as _;
use uuid::Uuid;

use crate::error::{ist_unique_verletzung, DbError, DbResult};
use crate::models::{Anmeldedaten, KontoRecord, NeuesKonto};
use crate::repository::KontoRepository;
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::zeilen::{enum_spalte, jetzt, uuid_spalte, zeit_spalte, zeitstempel_text};

const KONTO_SPALTEN: &str = "id, username, email, role, created_at, updated_at";

#[async_trait]
impl KontoRepository for SqliteDb {
    async fn create(&self, data: NeuesKonto<'_>) -> DbResult<KontoRecord> {
        let id = KontoId(Uuid::new_v4());
        let now = jetzt();
        let now_str = zeitstempel_text(&now);

        // Ein einzelnes INSERT: der UNIQUE-Index auf username entscheidet
        // atomar, es gibt kein vorgelagertes SELECT.
        sqlx::query(
            "INSERT INTO konten (id, username, password_hash, email, role, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.username)
        .bind(data.password_hash)
        .bind(data.email)
        .bind(data.role.als_str())
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if ist_unique_verletzung(&e) {
                DbError::Eindeutigkeit(format!("Benutzername '{}' bereits vergeben", data.username))
            } else {
                DbError::Sqlx(e)
            }
        })?;

        tracing::debug!(konto_id = %id, "Konto gespeichert");

        Ok(KontoRecord {
            id,
            username: data.username.to_string(),
            email: data.email.map(str::to_string),
            role: data.role,
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: KontoId) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {KONTO_SPALTEN} FROM konten WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn get_by_name(&self, username: &str) -> DbResult<Option<KontoRecord>> {
        let sql = format!("SELECT {KONTO_SPALTEN} FROM konten WHERE username = ?");
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_konto(&r)).transpose()
    }

    async fn anmeldedaten_laden(&self, username: &str) -> DbResult<Option<Anmeldedaten>> {
        let sql = format!("SELECT {KONTO_SPALTEN}, password_hash FROM konten WHERE username = ?");
        let row = sqlx::query(&sql)
            .bind(username)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| {
            Ok(Anmeldedaten {
                konto: row_to_konto(&r)?,
                password_hash: r.try_get("password_hash")?,
            })
        })
        .transpose()
    }
}

fn row_to_konto(row: &SqliteRow) -> DbResult<KontoRecord> {
    Ok(KontoRecord {
        id: KontoId(uuid_spalte(row, "id")?),
        username: row.try_get("username")?,
        email: row.try_get("email")?,
        role: enum_spalte(row, "role")?,
        created_at: zeit_spalte(row, "created_at")?,
        updated_at: zeit_spalte(row, "updated_at")?,
    })
}
