//! Route-Definitionen der REST-API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, state::AppState};

/// Erstellt den vollstaendigen API-Router
pub fn api_router() -> Router<AppState> {
    Router::new()
        // Auth
        .route("/auth/register", post(handlers::auth::registrieren))
        .route("/auth/login", post(handlers::auth::anmelden))
        .route("/auth/me", get(handlers::auth::profil))
        // Produkte
        .route(
            "/products",
            get(handlers::produkte::list_products).post(handlers::produkte::create_product),
        )
        .route(
            "/products/:id",
            get(handlers::produkte::get_product)
                .put(handlers::produkte::update_product)
                .delete(handlers::produkte::delete_product),
        )
        // Kunden
        .route(
            "/customers",
            get(handlers::kunden::list_customers).post(handlers::kunden::create_customer),
        )
        .route(
            "/customers/:id",
            get(handlers::kunden::get_customer)
                .put(handlers::kunden::update_customer)
                .delete(handlers::kunden::delete_customer),
        )
        // Kontakt
        .route(
            "/contact",
            get(handlers::kontakt::list_messages).post(handlers::kontakt::send_message),
        )
}
