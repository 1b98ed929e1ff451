//! SQLite-Implementierung des ProduktRepository

use async_trait::async_trait;
use marktplatz_core::KontoId;
use sqlx::sqlite::SqliteRow;
use sqlx::Row as _;
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::models::{Anbieter, NeuesProdukt, ProduktRecord, ProduktUpdate};
use crate::repository::ProduktRepository;
use crate::sqlite::pool::SqliteDb;
use crate::sqlite::zeilen::{enum_spalte, jetzt, uuid_spalte, zeit_spalte, zeitstempel_text};

/// Produkte werden immer mit dem Benutzernamen des Anbieters geladen
const PRODUKT_SELECT: &str = "SELECT p.id, p.name, p.description, p.price, p.category, p.stock,
        p.image, p.farmer_id, p.created_at, p.updated_at, k.username AS farmer_username
     FROM produkte p
     LEFT JOIN konten k ON k.id = p.farmer_id";

#[async_trait]
impl ProduktRepository for SqliteDb {
    async fn create(&self, data: NeuesProdukt<'_>) -> DbResult<ProduktRecord> {
        let id = Uuid::new_v4();
        let now_str = zeitstempel_text(&jetzt());

        sqlx::query(
            "INSERT INTO produkte
                (id, name, description, price, category, stock, image, farmer_id, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(data.name)
        .bind(data.description)
        .bind(data.price)
        .bind(data.category.als_str())
        .bind(data.stock)
        .bind(data.image)
        .bind(data.farmer_id.to_string())
        .bind(&now_str)
        .bind(&now_str)
        .execute(&self.pool)
        .await?;

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Produkt nach Insert nicht gefunden"))
    }

    async fn get_by_id(&self, id: Uuid) -> DbResult<Option<ProduktRecord>> {
        let sql = format!("{PRODUKT_SELECT} WHERE p.id = ?");
        let row = sqlx::query(&sql)
            .bind(id.to_string())
            .fetch_optional(&self.pool)
            .await?;

        row.map(|r| row_to_produkt(&r)).transpose()
    }

    async fn list(&self) -> DbResult<Vec<ProduktRecord>> {
        let sql = format!("{PRODUKT_SELECT} ORDER BY p.created_at, p.rowid");
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        rows.iter().map(row_to_produkt).collect()
    }

    async fn update(&self, id: Uuid, data: ProduktUpdate) -> DbResult<ProduktRecord> {
        // Dynamisches UPDATE – nur gesetzte Felder aendern
        let mut sets: Vec<&str> = Vec::new();
        if data.name.is_some() {
            sets.push("name = ?");
        }
        if data.description.is_some() {
            sets.push("description = ?");
        }
        if data.price.is_some() {
            sets.push("price = ?");
        }
        if data.category.is_some() {
            sets.push("category = ?");
        }
        if data.stock.is_some() {
            sets.push("stock = ?");
        }
        if data.image.is_some() {
            sets.push("image = ?");
        }
        sets.push("updated_at = ?");

        let sql = format!("UPDATE produkte SET {} WHERE id = ?", sets.join(", "));
        let mut q = sqlx::query(&sql);

        if let Some(ref v) = data.name {
            q = q.bind(v);
        }
        if let Some(ref v) = data.description {
            q = q.bind(v.as_deref());
        }
        if let Some(v) = data.price {
            q = q.bind(v);
        }
        if let Some(v) = data.category {
            q = q.bind(v.als_str());
        }
        if let Some(v) = data.stock {
            q = q.bind(v);
        }
        if let Some(ref v) = data.image {
            q = q.bind(v.as_deref());
        }
        q = q.bind(zeitstempel_text(&jetzt()));
        q = q.bind(id.to_string());

        let affected = q.execute(&self.pool).await?.rows_affected();
        if affected == 0 {
            return Err(DbError::nicht_gefunden(format!("Produkt {id}")));
        }

        self.get_by_id(id)
            .await?
            .ok_or_else(|| DbError::intern("Produkt nach Update nicht gefunden"))
    }

    async fn delete(&self, id: Uuid) -> DbResult<bool> {
        let affected = sqlx::query("DELETE FROM produkte WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await?
            .rows_affected();
        Ok(affected > 0)
    }
}

fn row_to_produkt(row: &SqliteRow) -> DbResult<ProduktRecord> {
    let farmer_id = KontoId(uuid_spalte(row, "farmer_id")?);
    let farmer_username: Option<String> = row.try_get("farmer_username")?;

    Ok(ProduktRecord {
        id: uuid_spalte(row, "id")?,
        name: row.try_get("name")?,
        description: row.try_get("description")?,
        price: row.try_get("price")?,
        category: enum_spalte(row, "category")?,
        stock: row.try_get("stock")?,
        image: row.try_get("image")?,
        farmer_id,
        farmer: farmer_username.map(|username| Anbieter {
            id: farmer_id,
            username,
        }),
        created_at: zeit_spalte(row, "created_at")?,
        updated_at: zeit_spalte(row, "updated_at")?,
    })
}
