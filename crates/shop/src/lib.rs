//! marktplatz-shop – Produkte, Kunden, Kontaktnachrichten
//!
//! Geschaeftslogik oberhalb der Repositories: Eingabepruefung, Besitzpruefung
//! fuer Produkte und Abbildung fehlender Datensaetze auf `NichtGefunden`.

pub mod error;
pub mod kontakt;
pub mod kunden;
pub mod produkte;
pub mod types;

pub use error::{Ressource, ShopError, ShopResult};
pub use kontakt::KontaktService;
pub use kunden::KundenService;
pub use produkte::ProduktService;
pub use types::{KontaktEingabe, KundeEingabe, ProduktEingabe};
