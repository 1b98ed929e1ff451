//! KontaktService – Nachrichten aus dem Kontaktformular

use std::sync::Arc;

use marktplatz_db::{
    models::{NachrichtRecord, NeueNachricht},
    NachrichtRepository,
};
use uuid::Uuid;

use crate::{error::ShopResult, types::KontaktEingabe};

pub struct KontaktService {
    repo: Arc<dyn NachrichtRepository>,
}

impl KontaktService {
    pub fn neu(repo: Arc<dyn NachrichtRepository>) -> Arc<Self> {
        Arc::new(Self { repo })
    }

    /// Speichert eine Nachricht und gibt ihre ID zurueck
    pub async fn senden(&self, eingabe: KontaktEingabe) -> ShopResult<Uuid> {
        let n = eingabe.pruefen()?;

        let record = self
            .repo
            .create(NeueNachricht {
                name: &n.name,
                email: &n.email,
                phone: n.phone.as_deref(),
                message: &n.message,
            })
            .await?;

        tracing::info!(nachricht_id = %record.id, "Kontaktnachricht eingegangen");
        Ok(record.id)
    }

    /// Alle Nachrichten, neueste zuerst
    pub async fn alle(&self) -> ShopResult<Vec<NachrichtRecord>> {
        Ok(self.repo.list().await?)
    }
}
