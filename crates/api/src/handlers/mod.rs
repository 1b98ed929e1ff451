//! REST-Handler, gruppiert nach Ressource

pub mod auth;
pub mod kontakt;
pub mod kunden;
pub mod produkte;
