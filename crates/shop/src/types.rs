//! Eingabetypen fuer Produkte, Kunden und Kontaktnachrichten
//!
//! Die `...Eingabe`-Typen sind die rohen Anfragekoerper. Erst `pruefen()`
//! bzw. `als_update()` macht daraus gepruefte Werte fuer die Services.

use marktplatz_core::{email_gueltig, validierung::optional_getrimmt, Verletzungen};
use marktplatz_db::models::{Kategorie, KundeUpdate, ProduktUpdate};
use serde::{Deserialize, Deserializer};

pub const MIN_NACHRICHT: usize = 5;

fn kategorie_pruefen(v: &mut Verletzungen, roh: Option<&str>) -> Option<Kategorie> {
    let roh = roh?;
    match roh.parse::<Kategorie>() {
        Ok(k) => Some(k),
        Err(_) => {
            v.hinzufuegen("category", "Invalid category");
            None
        }
    }
}

fn preis_pruefen(v: &mut Verletzungen, preis: f64) {
    v.pruefen(
        preis.is_finite() && preis >= 0.0,
        "price",
        "Price must be positive",
    );
}

/// Unterscheidet ein fehlendes Feld (`None`) von einem JSON-`null`
/// (`Some(None)`)
fn feld_mit_null<'de, D>(d: D) -> Result<Option<Option<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<String>::deserialize(d).map(Some)
}

fn email_pflicht(v: &mut Verletzungen, email: Option<&str>) {
    match email {
        Some(e) if email_gueltig(e) => {}
        _ => v.hinzufuegen("email", "Invalid email"),
    }
}

// ---------------------------------------------------------------------------
// Produkte
// ---------------------------------------------------------------------------

/// Roher Produkt-Anfragekoerper (POST und PUT)
#[derive(Debug, Clone, Default, Deserialize)]
///
/// `description` und `image` lassen sich per `null` leeren; ein fehlendes
/// Feld bleibt beim Update unveraendert.
pub struct ProduktEingabe {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "feld_mit_null")]
    pub description: Option<Option<String>>,
    pub price: Option<f64>,
    pub category: Option<String>,
    pub stock: Option<i64>,
    #[serde(default, deserialize_with = "feld_mit_null")]
    pub image: Option<Option<String>>,
}

/// Gepruefte Daten fuer ein neues Produkt
#[derive(Debug, Clone, PartialEq)]
pub struct GeprueftesProdukt {
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub category: Kategorie,
    pub stock: i64,
    pub image: Option<String>,
}

impl ProduktEingabe {
    /// Prueft die Eingabe fuer eine Neuanlage
    pub fn pruefen(self) -> Result<GeprueftesProdukt, Verletzungen> {
        let mut v = Verletzungen::neu();

        let name = optional_getrimmt(self.name);
        v.pruefen(name.is_some(), "name", "Product name required");

        match self.price {
            Some(p) => preis_pruefen(&mut v, p),
            None => v.hinzufuegen("price", "Price must be positive"),
        }

        let category = kategorie_pruefen(&mut v, self.category.as_deref()).unwrap_or_default();

        let stock = self.stock.unwrap_or(0);
        v.pruefen(stock >= 0, "stock", "Stock cannot be negative");

        if !v.ist_leer() {
            return Err(v);
        }

        Ok(GeprueftesProdukt {
            name: name.unwrap_or_default(),
            description: optional_getrimmt(self.description.flatten()),
            price: self.price.unwrap_or_default(),
            category,
            stock,
            image: optional_getrimmt(self.image.flatten()),
        })
    }

    /// Prueft nur die uebermittelten Felder fuer ein Teil-Update
    pub fn als_update(self) -> Result<ProduktUpdate, Verletzungen> {
        let mut v = Verletzungen::neu();

        let name = self.name.map(|n| n.trim().to_string());
        if let Some(ref n) = name {
            v.pruefen(!n.is_empty(), "name", "Product name required");
        }
        if let Some(p) = self.price {
            preis_pruefen(&mut v, p);
        }
        let category = kategorie_pruefen(&mut v, self.category.as_deref());
        if let Some(s) = self.stock {
            v.pruefen(s >= 0, "stock", "Stock cannot be negative");
        }

        v.ergebnis(ProduktUpdate {
            name,
            description: self.description.map(optional_getrimmt),
            price: self.price,
            category,
            stock: self.stock,
            image: self.image.map(optional_getrimmt),
        })
    }
}

// ---------------------------------------------------------------------------
// Kunden
// ---------------------------------------------------------------------------

/// Roher Kunden-Anfragekoerper (POST und PUT)
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KundeEingabe {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

/// Gepruefte Daten fuer einen neuen Kunden
#[derive(Debug, Clone, PartialEq)]
pub struct GepruefterKunde {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub pincode: Option<String>,
}

impl KundeEingabe {
    pub fn pruefen(self) -> Result<GepruefterKunde, Verletzungen> {
        let mut v = Verletzungen::neu();

        let name = optional_getrimmt(self.name);
        v.pruefen(name.is_some(), "name", "Name required");

        let email = optional_getrimmt(self.email);
        email_pflicht(&mut v, email.as_deref());

        if !v.ist_leer() {
            return Err(v);
        }

        Ok(GepruefterKunde {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: optional_getrimmt(self.phone),
            address: optional_getrimmt(self.address),
            city: optional_getrimmt(self.city),
            state: optional_getrimmt(self.state),
            pincode: optional_getrimmt(self.pincode),
        })
    }

    pub fn als_update(self) -> Result<KundeUpdate, Verletzungen> {
        let mut v = Verletzungen::neu();

        let name = self.name.map(|n| n.trim().to_string());
        if let Some(ref n) = name {
            v.pruefen(!n.is_empty(), "name", "Name required");
        }
        let email = self.email.map(|e| e.trim().to_string());
        if email.is_some() {
            email_pflicht(&mut v, email.as_deref());
        }

        let trimmen = |w: Option<String>| w.map(|w| w.trim().to_string());

        v.ergebnis(KundeUpdate {
            name,
            email,
            phone: trimmen(self.phone),
            address: trimmen(self.address),
            city: trimmen(self.city),
            state: trimmen(self.state),
            pincode: trimmen(self.pincode),
        })
    }
}

// ---------------------------------------------------------------------------
// Kontaktnachrichten
// ---------------------------------------------------------------------------

/// Roher Kontaktformular-Anfragekoerper
#[derive(Debug, Clone, Default, Deserialize)]
pub struct KontaktEingabe {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub message: Option<String>,
}

/// Gepruefte Kontaktnachricht
#[derive(Debug, Clone, PartialEq)]
pub struct GepruefteNachricht {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

impl KontaktEingabe {
    pub fn pruefen(self) -> Result<GepruefteNachricht, Verletzungen> {
        let mut v = Verletzungen::neu();

        let name = optional_getrimmt(self.name);
        v.pruefen(name.is_some(), "name", "Name required");

        let email = optional_getrimmt(self.email);
        email_pflicht(&mut v, email.as_deref());

        let message = self.message.map(|m| m.trim().to_string()).unwrap_or_default();
        v.pruefen(
            message.chars().count() >= MIN_NACHRICHT,
            "message",
            "Message must be at least 5 characters",
        );

        if !v.ist_leer() {
            return Err(v);
        }

        Ok(GepruefteNachricht {
            name: name.unwrap_or_default(),
            email: email.unwrap_or_default(),
            phone: optional_getrimmt(self.phone),
            message,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn produkt(name: &str, preis: f64) -> ProduktEingabe {
        ProduktEingabe {
            name: Some(name.into()),
            price: Some(preis),
            ..Default::default()
        }
    }

    #[test]
    fn produkt_mit_standardwerten() {
        let p = produkt("  Mango Pickle ", 120.0).pruefen().unwrap();
        assert_eq!(p.name, "Mango Pickle");
        assert_eq!(p.category, Kategorie::Other);
        assert_eq!(p.stock, 0);
        assert_eq!(p.description, None);
    }

    #[test]
    fn produkt_preis_null_ist_erlaubt() {
        assert!(produkt("Probe", 0.0).pruefen().is_ok());
    }

    #[test]
    fn produkt_verletzungen() {
        let v = ProduktEingabe {
            name: Some("   ".into()),
            price: Some(-1.0),
            category: Some("gemuese".into()),
            stock: Some(-3),
            ..Default::default()
        }
        .pruefen()
        .unwrap_err();

        assert_eq!(v.eintraege().len(), 4);
        assert!(v.betrifft("name"));
        assert!(v.betrifft("price"));
        assert!(v.betrifft("category"));
        assert!(v.betrifft("stock"));
    }

    #[test]
    fn produkt_ohne_preis() {
        let v = ProduktEingabe {
            name: Some("Senfoel".into()),
            ..Default::default()
        }
        .pruefen()
        .unwrap_err();
        assert!(v.betrifft("price"));
    }

    #[test]
    fn produkt_update_prueft_nur_gesetzte_felder() {
        let u = ProduktEingabe {
            stock: Some(7),
            ..Default::default()
        }
        .als_update()
        .unwrap();
        assert_eq!(u.stock, Some(7));
        assert_eq!(u.name, None);
        assert_eq!(u.price, None);

        let v = ProduktEingabe {
            name: Some("".into()),
            price: Some(-0.5),
            ..Default::default()
        }
        .als_update()
        .unwrap_err();
        assert!(v.betrifft("name"));
        assert!(v.betrifft("price"));
    }

    #[test]
    fn produkt_update_null_leert_optionale_felder() {
        let e: ProduktEingabe =
            serde_json::from_str(r#"{"description":null,"image":null}"#).unwrap();
        let u = e.als_update().unwrap();
        assert_eq!(u.description, Some(None));
        assert_eq!(u.image, Some(None));

        let e: ProduktEingabe = serde_json::from_str(r#"{"stock":3}"#).unwrap();
        let u = e.als_update().unwrap();
        assert_eq!(u.description, None);
        assert_eq!(u.image, None);

        let e: ProduktEingabe =
            serde_json::from_str(r#"{"description":" Scharf ","image":"chili.jpg"}"#).unwrap();
        let u = e.als_update().unwrap();
        assert_eq!(u.description, Some(Some("Scharf".into())));
        assert_eq!(u.image, Some(Some("chili.jpg".into())));
    }

    #[test]
    fn produkt_eingabe_aus_json() {
        let e: ProduktEingabe = serde_json::from_str(
            r#"{"name":"Chakli","price":45.5,"category":"snacks","stock":12,"farmer_id":"x"}"#,
        )
        .unwrap();
        let p = e.pruefen().unwrap();
        assert_eq!(p.category, Kategorie::Snacks);
        assert_eq!(p.stock, 12);
    }

    #[test]
    fn kunde_braucht_name_und_email() {
        let v = KundeEingabe::default().pruefen().unwrap_err();
        assert!(v.betrifft("name"));
        assert!(v.betrifft("email"));

        let k = KundeEingabe {
            name: Some("Sita".into()),
            email: Some("sita@dorf.in".into()),
            city: Some(" Nashik ".into()),
            ..Default::default()
        }
        .pruefen()
        .unwrap();
        assert_eq!(k.city.as_deref(), Some("Nashik"));
    }

    #[test]
    fn kunde_update_ungueltige_email() {
        let v = KundeEingabe {
            email: Some("sita".into()),
            ..Default::default()
        }
        .als_update()
        .unwrap_err();
        assert_eq!(v.eintraege()[0].meldung, "Invalid email");
    }

    #[test]
    fn kontakt_nachricht_mindestlaenge() {
        let basis = |msg: &str| KontaktEingabe {
            name: Some("Ravi".into()),
            email: Some("ravi@example.com".into()),
            phone: None,
            message: Some(msg.into()),
        };

        let v = basis("  hi  ").pruefen().unwrap_err();
        assert_eq!(
            v.eintraege()[0].meldung,
            "Message must be at least 5 characters"
        );

        let n = basis(" Hallo ").pruefen().unwrap();
        assert_eq!(n.message, "Hallo");
    }
}
