//! SQLite-Implementierung des NachrichtRepository

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row as _;
use uuid::Uuid;

use crate::error::DbResult;
use crate::models::{NachrichtRecord, NachrichtStatus, NeueNachricht};
use crate::repository::NachrichtRepository;
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::zeilen::{enum_spalte, jetzt, uuid_spalte, zeit_spalte, zeitstempel_text};

#[async_trait]
impl NachrichtRepository for SqliteDb {
    async fn create(&self, data: NeueNachricht<'_>) -> DbResult<NachrichtRecord> {
        let id = Uuid::new_v4();
        let now = jetzt();
        let now_str = zeitstempel_text(&now);
        let status = NachrichtStatus::default();

        sqlx::query(
            "INSERT INTO nachrichten (id, name, email, phone, message, status, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.message)
        .bind(status.als_str())
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await?;

        Ok(NachrichtRecord {
            id,
            name: data.name.to_string(),
            email: data.email.to_string(),
            phone: data.phone.map(str::to_string),
            message: data.message.to_string(),
            status,
            created_at: now,
            updated_at: now,
        })
    }

    async fn list(&self) -> DbResult<Vec<NachrichtRecord>> {
        let rows = sqlx::query(
            "SELECT id, name, email, phone, message, status, created_at, updated_at
             FROM nachrichten
             ORDER BY created_at DESC, rowid DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(row_to_nachricht).collect()
    }
}

fn row_to_nachricht(row: &SqliteRow) -> DbResult<NachrichtRecord> {
    Ok(NachrichtRecord {
        id: uuid_spalte(row, "id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        message: row.try_get("message")?,
        status: enum_spalte(row, "status")?,
        created_at: zeit_spalte(row, "created_at")?,
        updated_at: zeit_spalte(row, "updated_at")?,
    })
}
