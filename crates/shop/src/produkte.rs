//! ProduktService – Katalog lesen, Produkte anlegen, aendern, loeschen
//!
//! Aendern und Loeschen sind dem anbietenden Konto vorbehalten. Die
//! Reihenfolge der Pruefungen ist fest: erst Existenz, dann Besitz, dann
//! Eingabe.

use std::sync::Arc;

use marktplatz_auth::besitz_pruefen;
use marktplatz_core::KontoId;
use marktplatz_db::{
    models::{NeuesProdukt, ProduktRecord},
    DbError, ProduktRepository,
};
use uuid::Uuid;

use crate::{
    error::{Ressource, ShopError, ShopResult},
    types::ProduktEingabe,
};

/// ProduktService verwaltet den Produktkatalog
pub struct ProduktService {
    repo: Arc<dyn ProduktRepository>,
}

impl ProduktService {
    pub fn neu(repo: Arc<dyn ProduktRepository>) -> Arc<Self> {
        Arc::new(Self { repo })
    }

    /// Alle Produkte inklusive Anbieter
    pub async fn alle(&self) -> ShopResult<Vec<ProduktRecord>> {
        Ok(self.repo.list().await?)
    }

    pub async fn laden(&self, id: Uuid) -> ShopResult<ProduktRecord> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ShopError::NichtGefunden(Ressource::Produkt))
    }

    /// Legt ein Produkt mit dem handelnden Konto als Anbieter an
    pub async fn erstellen(
        &self,
        handelnder: KontoId,
        eingabe: ProduktEingabe,
    ) -> ShopResult<ProduktRecord> {
        let p = eingabe.pruefen()?;

        let record = self
            .repo
            .create(NeuesProdukt {
                name: &p.name,
                description: p.description.as_deref(),
                price: p.price,
                category: p.category,
                stock: p.stock,
                image: p.image.as_deref(),
                farmer_id: handelnder,
            })
            .await?;

        tracing::info!(
            produkt_id = %record.id,
            farmer_id = %handelnder,
            "Produkt angelegt"
        );

        Ok(record)
    }

    /// Teil-Update durch den Anbieter
    pub async fn aktualisieren(
        &self,
        handelnder: KontoId,
        id: Uuid,
        eingabe: ProduktEingabe,
    ) -> ShopResult<ProduktRecord> {
        let existing = self.laden(id).await?;
        besitz_pruefen(handelnder, existing.farmer_id)
            .map_err(|_| ShopError::KeineBerechtigung)?;

        let update = eingabe.als_update()?;

        let record = self.repo.update(id, update).await.map_err(|e| match e {
            DbError::NichtGefunden(_) => ShopError::NichtGefunden(Ressource::Produkt),
            e => e.into(),
        })?;

        tracing::debug!(produkt_id = %id, "Produkt aktualisiert");
        Ok(record)
    }

    /// Loescht ein Produkt des handelnden Kontos
    pub async fn loeschen(&self, handelnder: KontoId, id: Uuid) -> ShopResult<()> {
        let existing = self.laden(id).await?;
        besitz_pruefen(handelnder, existing.farmer_id)
            .map_err(|_| ShopError::KeineBerechtigung)?;

        if !self.repo.delete(id).await? {
            return Err(ShopError::NichtGefunden(Ressource::Produkt));
        }

        tracing::info!(produkt_id = %id, farmer_id = %handelnder, "Produkt geloescht");
        Ok(())
    }
}
