//! SQLite-Implementierung des KundeRepository

use async_trait::async_trait;
use sqlx::sqlite::SqliteRow;
use sqlx::Row as _;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{KundeRecord, KundeUpdate, NeuerKunde};
use crate::repository::KundeRepository;
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::zeilen::{jetzt, uuid_spalte, zeit_spalte, zeitstempel_text};

const KUNDE_SPALTEN: &str =
    "id, name, email, phone, address, city, state, pincode, created_at, updated_at";

#[async_trait]
impl KundeRepository for SqliteDb {
    async fn create(&self, data: NeuerKunde<'_>) -> DbResult<KundeRecord> {
        let id = Uuid::new_v4();
        let now = jetzt();
        let now_str = zeitstempel_text(&now);

        sqlx::query(
            "INSERT INTO kunden
                (id, name, email, phone, address, city, state, pincode, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.name)
        .bind(data.email)
        .bind(data.phone)
        .bind(data.address)
        .bind(data.city)
        .bind(data.state)
        .bind(data.pincode)
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await?;

        Ok(KundeRecord {
            id,
            name: data.name.to_string(),
            email: data.email.to_string(),
            phone: data.phone.map(str::to_string),
            address: data.address.map(str::to_string),
            city: data.city.map(str::to_string),
            state: data.state.map(str::to_string),
            pincode: data.pincode.map(str::to_string),
            created_at: now,
            updated_at: now,
        })
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<KundeRecord>> {
        let sql = format!("SELECT {KUNDE_SPALTEN} FROM kunden WHERE id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_kunde(&r)).transpose()
    }

    async fn list(&self) -> DbResult<Vec<KundeRecord>> {
        let sql = format!("SELECT {KUNDE_SPALTEN} FROM kunden ORDER BY created_at, rowid");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_kunde).collect()
    }

    async fn update(&self, id: Uuid, data: KundeUpdate) -> DbResult<KundeRecord> {
        let felder = [
            ("name", data.name),
            ("email", data.email),
            ("phone", data.phone),
            ("address", data.address),
            ("city", data.city),
            ("state", data.state),
            ("pincode", data.pincode),
        ];

        let gesetzt: Vec<(&str, String)> = felder
            .into_iter()
            .filter_map(|(spalte, wert)| wert.map(|w| (spalte, w)))
            .collect();

        let mut sets: Vec<String> = gesetzt.iter().map(|(s, _)| format!("{s} = ?")).collect();
        sets.push("updated_at = ?".into());

        let sql = format!("UPDATE kunden SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);
        for (_, wert) in &gesetzt {
            q = q.bind(wert);
        }
        q = q.bind(zeitstempel_text(&jetzt()));
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Kunde {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Kunde nach Update nicht gefunden"))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM kunden WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_kunde(row: &SqliteRow) -> DbResult<KundeRecord> {
    Ok(KundeRecord {
        id: uuid_spalte(row, "id")?,
        name: row.try_get("name")?,
        email: row.try_get("email")?,
        phone: row.try_get("phone")?,
        address: row.try_get("address")?,
        city: row.try_get("city")?,
        state: row.try_get("state")?,
        pincode: row.try_get("pincode")?,
        created_at: zeit_spalte(row, "created_at")?,
        updated_at: zeit_spalte(row, "updated_at")?,
    })
}
