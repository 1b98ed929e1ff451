//! HTTP-Tests gegen den kompletten Router (ohne Netzwerk)

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use marktplatz_api::{app_bauen, ApiServerKonfig, AppState};
use marktplatz_auth::{AuthService, PasswortHasher, PasswortParameter, TokenDienst};
use marktplatz_core::KontoId;
use marktplatz_db::SqliteDb;
use marktplatz_observability::{HealthState, MarktplatzMetriken};
use serde_json::{json, Value};
use tower::ServiceExt;

const GEHEIMNIS: &str = "http-test-geheimnis";

async fn app() -> Router {
    let db = SqliteDb::in_memory().await.unwrap();
    let auth = AuthService::neu(
        std::sync::Arc::new(db.clone()),
        PasswortHasher::neu(PasswortParameter::schnell()).unwrap(),
        TokenDienst::neu(GEHEIMNIS, Duration::days(7)).unwrap(),
    )
    .unwrap();
    let state = AppState::neu(db, auth, MarktplatzMetriken::neu().unwrap());
    app_bauen(state, HealthState::neu("test"), &ApiServerKonfig::default())
}

async fn senden(
    app: &Router,
    methode: Method,
    pfad: &str,
    token: Option<&str>,
    koerper: Option<Value>,
) -> (StatusCode, Value) {
    let mut req = Request::builder().method(methode).uri(pfad);
    if let Some(t) = token {
        req = req.header(header::AUTHORIZATION, format!("Bearer {t}"));
    }
    let req = match koerper {
        Some(k) => req
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(k.to_string()))
            .unwrap(),
        None => req.body(Body::empty()).unwrap(),
    };

    let antwort = app.clone().oneshot(req).await.unwrap();
    let status = antwort.status();
    let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, json)
}

/// GET mit unveraendertem Authorization-Header
async fn roh_senden(app: &Router, pfad: &str, authorization: &str) -> (StatusCode, Value) {
    let req = Request::builder()
        .method(Method::GET)
        .uri(pfad)
        .header(header::AUTHORIZATION, authorization)
        .body(Body::empty())
        .unwrap();
    let antwort = app.clone().oneshot(req).await.unwrap();
    let status = antwort.status();
    let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&bytes).unwrap_or(Value::Null))
}

async fn registrieren_und_anmelden(app: &Router, name: &str) -> (String, String) {
    let (status, body) = senden(
        app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": name, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{body}");

    let (status, body) = senden(
        app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": name, "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    (
        body["token"].as_str().unwrap().to_string(),
        body["user"]["id"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn registrieren_anmelden_profil() {
    let app = app().await;

    let (status, body) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "secret1", "email": "a@example.com" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["username"], "alice");
    assert!(body.get("password").is_none());
    let id = body["id"].as_str().unwrap().to_string();

    let (status, body) = senden(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "secret1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["id"], id.as_str());
    assert_eq!(body["user"]["role"], "user");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, body) = senden(&app, Method::GET, "/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["username"], "alice");
    assert_eq!(body["email"], "a@example.com");
    assert!(body.get("password_hash").is_none());
}

#[tokio::test]
async fn alias_felder_werden_akzeptiert() {
    let app = app().await;
    let (status, _) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "identifier": "bauer", "secret": "gurke12", "contact": "b@dorf.in" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = senden(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "identifier": "bauer", "secret": "gurke12" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn registrierung_validierung_und_konflikt() {
    let app = app().await;

    let (status, body) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "12345" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Validation failed");
    assert_eq!(body["details"][0]["field"], "password");

    let (status, _) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "123456" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = senden(
        &app,
        Method::POST,
        "/auth/register",
        None,
        Some(json!({ "username": "alice", "password": "anderes" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn anmeldung_fehler_sind_ununterscheidbar() {
    let app = app().await;
    registrieren_und_anmelden(&app, "alice").await;

    let (s1, b1) = senden(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "alice", "password": "falsch!" })),
    )
    .await;
    let (s2, b2) = senden(
        &app,
        Method::POST,
        "/auth/login",
        None,
        Some(json!({ "username": "niemand", "password": "secret1" })),
    )
    .await;

    assert_eq!(s1, StatusCode::UNAUTHORIZED);
    assert_eq!(s2, StatusCode::UNAUTHORIZED);
    assert_eq!(b1, b2);
    assert_eq!(b1["error"], "Invalid credentials");

    let (status, body) = senden(&app, Method::POST, "/auth/login", None, Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn token_fehlt_ungueltig_abgelaufen() {
    let app = app().await;

    let (status, body) = senden(&app, Method::GET, "/auth/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token provided");

    let (status, body) = senden(&app, Method::GET, "/auth/me", Some("dummyToken123"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");

    let (status, body) = roh_senden(&app, "/auth/me", "Token abc").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");

    let (status, body) = roh_senden(&app, "/auth/me", "dummyToken123").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "No token provided");

    let dienst = TokenDienst::neu(GEHEIMNIS, Duration::days(7)).unwrap();
    let alt = dienst
        .ausstellen_zum(KontoId::new(), Utc::now() - Duration::days(8))
        .unwrap();
    let (status, body) = senden(&app, Method::GET, "/auth/me", Some(&alt.token), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"], "Invalid or expired token");

    // Gueltig signiert, aber Konto existiert nicht
    let fremd = dienst.ausstellen(KontoId::new()).unwrap();
    let (status, body) = senden(&app, Method::GET, "/auth/me", Some(&fremd.token), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "User not found");
}

#[tokio::test]
async fn produkte_besitz_und_reihenfolge() {
    let app = app().await;
    let (ram, ram_id) = registrieren_und_anmelden(&app, "ram").await;
    let (sita, _) = registrieren_und_anmelden(&app, "sita").await;

    // Ohne Token kein Anlegen
    let (status, _) = senden(
        &app,
        Method::POST,
        "/products",
        None,
        Some(json!({ "name": "Mango Pickle", "price": 120 })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, produkt) = senden(
        &app,
        Method::POST,
        "/products",
        Some(&ram),
        Some(json!({ "name": "Mango Pickle", "price": 120, "category": "pickle" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(produkt["farmer_id"], ram_id.as_str());
    assert_eq!(produkt["farmer"]["username"], "ram");
    assert_eq!(produkt["stock"], 0);
    let pfad = format!("/products/{}", produkt["id"].as_str().unwrap());

    // Fremdes Konto: 403, auch bei ungueltiger Eingabe
    let (status, body) = senden(
        &app,
        Method::PUT,
        &pfad,
        Some(&sita),
        Some(json!({ "price": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["error"], "Not authorized");

    let (status, _) = senden(&app, Method::DELETE, &pfad, Some(&sita), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Eigentuemer: Validierung greift
    let (status, _) = senden(
        &app,
        Method::PUT,
        &pfad,
        Some(&ram),
        Some(json!({ "price": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = senden(
        &app,
        Method::PUT,
        &pfad,
        Some(&ram),
        Some(json!({ "stock": 25 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["stock"], 25);
    assert_eq!(body["price"], 120.0);

    let (status, liste) = senden(&app, Method::GET, "/products", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(liste.as_array().unwrap().len(), 1);

    let (status, body) = senden(&app, Method::DELETE, &pfad, Some(&ram), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Product deleted" }));

    let (status, body) = senden(&app, Method::GET, &pfad, None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");
}

#[tokio::test]
async fn unbekannte_und_kaputte_ids() {
    let app = app().await;
    let (ram, _) = registrieren_und_anmelden(&app, "ram").await;

    let (status, body) = senden(&app, Method::GET, "/products/keine-uuid", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Product not found");

    let unbekannt = format!("/products/{}", uuid::Uuid::new_v4());
    let (status, _) = senden(
        &app,
        Method::PUT,
        &unbekannt,
        Some(&ram),
        Some(json!({ "price": -1 })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, body) = senden(&app, Method::DELETE, "/customers/123", None, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Customer not found");
}

#[tokio::test]
async fn kunden_ohne_anmeldung() {
    let app = app().await;

    let (status, body) = senden(
        &app,
        Method::POST,
        "/customers",
        None,
        Some(json!({ "name": "Sita", "email": "kaputt" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"][0]["field"], "email");

    let (status, kunde) = senden(
        &app,
        Method::POST,
        "/customers",
        None,
        Some(json!({ "name": "Sita", "email": "sita@dorf.in", "city": "Nashik" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let pfad = format!("/customers/{}", kunde["id"].as_str().unwrap());

    let (status, body) = senden(
        &app,
        Method::PUT,
        &pfad,
        None,
        Some(json!({ "phone": "98220 00000" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["phone"], "98220 00000");
    assert_eq!(body["city"], "Nashik");

    let (status, body) = senden(&app, Method::DELETE, &pfad, None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Customer deleted" }));
}

#[tokio::test]
async fn kontaktformular() {
    let app = app().await;

    let (status, body) = senden(
        &app,
        Method::POST,
        "/contact",
        None,
        Some(json!({ "name": "Ravi", "email": "ravi@example.com", "message": "Habt ihr Senfoel?" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["ok"], true);
    assert!(body["messageId"].is_string());

    let (status, body) = senden(&app, Method::GET, "/contact", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body[0]["status"], "new");
    assert_eq!(body[0]["message"], "Habt ihr Senfoel?");
}

#[tokio::test]
async fn kaputter_json_koerper() {
    let app = app().await;
    let req = Request::post("/auth/register")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{kein json"))
        .unwrap();
    let antwort = app.oneshot(req).await.unwrap();
    assert_eq!(antwort.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn health_und_metriken() {
    let app = app().await;
    registrieren_und_anmelden(&app, "alice").await;

    let (status, body) = senden(&app, Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["db_connected"], true);

    let antwort = app
        .clone()
        .oneshot(Request::get("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(antwort.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(antwort.into_body(), usize::MAX)
        .await
        .unwrap();
    let text = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(text.contains("marktplatz_registrierungen_total{ergebnis=\"erfolg\"} 1"));
    assert!(text.contains("marktplatz_anmeldungen_total{ergebnis=\"erfolg\"} 1"));
    assert!(text.contains("marktplatz_http_requests_total"));
}
