//! KundenService – Kundenstammdaten

use std::sync::Arc;

use marktplatz_db::{
    models::{KundeRecord, NeuerKunde},
    DbError, KundeRepository,
};
use uuid::Uuid;

use crate::{
    error::{Ressource, ShopError, ShopResult},
    types::KundeEingabe,
};

pub struct KundenService {
    repo: Arc<dyn KundeRepository>,
}

impl KundenService {
    pub fn neu(repo: Arc<dyn KundeRepository>) -> Arc<Self> {
        Arc::new(Self { repo })
    }

    pub async fn alle(&self) -> ShopResult<Vec<KundeRecord>> {
        Ok(self.repo.list().await?)
    }

    pub async fn laden(&self, id: Uuid) -> ShopResult<KundeRecord> {
        self.repo
            .get_by_id(id)
            .await?
            .ok_or(ShopError::NichtGefunden(Ressource::Kunde))
    }

    pub async fn erstellen(&self, eingabe: KundeEingabe) -> ShopResult<KundeRecord> {
        let k = eingabe.pruefen()?;

        let record = self
            .repo
            .create(NeuerKunde {
                name: &k.name,
                email: &k.email,
                phone: k.phone.as_deref(),
                address: k.address.as_deref(),
                city: k.city.as_deref(),
                state: k.state.as_deref(),
                pincode: k.pincode.as_deref(),
            })
            .await?;

        tracing::info!(kunde_id = %record.id, "Kunde angelegt");
        Ok(record)
    }

    /// Teil-Update; Eingabe wird vor dem Existenz-Check geprueft
    pub async fn aktualisieren(&self, id: Uuid, eingabe: KundeEingabe) -> ShopResult<KundeRecord> {
        let update = eingabe.als_update()?;

        self.repo.update(id, update).await.map_err(|e| match e {
            DbError::NichtGefunden(_) => ShopError::NichtGefunden(Ressource::Kunde),
            e => e.into(),
        })
    }

    pub async fn loeschen(&self, id: Uuid) -> ShopResult<()> {
        if !self.repo.delete(id).await? {
            return Err(ShopError::NichtGefunden(Ressource::Kunde));
        }
        tracing::info!(kunde_id = %id, "Kunde geloescht");
        Ok(())
    }
}
