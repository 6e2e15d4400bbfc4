use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use chrono::NaiveDate;
use hotelease_api::{build_app_with, ApiConfig};
use hotelease_frontdesk::{Clock, SimulatedLatency};
use serde_json::{json, Value};
use tower::ServiceExt;

fn test_app() -> Router {
    build_app_with(ApiConfig {
        cookie_secure: false,
        latency: SimulatedLatency::instant(),
        clock: Clock::Fixed(NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()),
        ..ApiConfig::default()
    })
}

struct Reply {
    status: StatusCode,
    cookie: Option<String>,
    body: Value,
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    cookie: Option<&str>,
    body: Option<Value>,
) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header("cookie", cookie);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let cookie = response
        .headers()
        .get("set-cookie")
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .map(ToString::to_string);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };

    Reply {
        status,
        cookie,
        body,
    }
}

/// First request issues the client cookie; later ones send it back.
async fn new_client(app: &Router) -> String {
    send(app, "GET", "/health", None, None)
        .await
        .cookie
        .expect("client cookie should be issued")
}

fn hotel_ids(body: &Value) -> Vec<u64> {
    body["hotels"]
        .as_array()
        .unwrap()
        .iter()
        .map(|hotel| hotel["id"].as_u64().unwrap())
        .collect()
}

#[tokio::test]
async fn health_is_public_and_issues_client_cookie() {
    let app = test_app();

    let reply = send(&app, "GET", "/health", None, None).await;
    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.body["status"], "ok");
    assert!(reply.body["metrics"]["requests_total"].is_u64());
    assert!(reply.cookie.unwrap().starts_with("hotelease_client="));

    let cookie = new_client(&app).await;
    let again = send(&app, "GET", "/health", Some(&cookie), None).await;
    assert!(again.cookie.is_none());
}

#[tokio::test]
async fn listing_filters_sorts_and_resets() {
    let app = test_app();

    let cheap = send(&app, "GET", "/v1/hotels?max_price=200&sort=price-low", None, None).await;
    assert_eq!(cheap.status, StatusCode::OK);
    assert_eq!(hotel_ids(&cheap.body), vec![4, 3, 1]);
    assert_eq!(cheap.body["notice"], "Found 3 hotels matching your criteria.");

    let pool = send(&app, "GET", "/v1/hotels?amenities=Pool,Spa&q=manhattan", None, None).await;
    assert_eq!(hotel_ids(&pool.body), vec![1]);

    let unknown = send(&app, "GET", "/v1/hotels?amenities=Helipad", None, None).await;
    assert_eq!(unknown.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(unknown.body["error"], "unknown_amenity");

    for uri in ["/v1/hotels?stars=abc", "/v1/hotels?min_price=x"] {
        let malformed = send(&app, "GET", uri, None, None).await;
        assert_eq!(malformed.status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(malformed.body["error"], "invalid_filter_value");
        assert!(malformed.body["title"].is_string());
        assert!(malformed.body["fields"].is_array());
    }

    let blank = send(&app, "GET", "/v1/hotels?q=%20%20%20", None, None).await;
    assert_eq!(blank.body["count"], 0);

    let reset = send(&app, "GET", "/v1/hotels?reset=true&max_price=100", None, None).await;
    assert_eq!(reset.body["count"], 4);
    assert_eq!(
        reset.body["notice"],
        "All filters have been reset to default values."
    );

    let deal = send(&app, "GET", "/v1/hotels?deal=summer-special", None, None).await;
    assert_eq!(
        deal.body["deal_notice"],
        "The summer special deal has been applied to your search."
    );
}

#[tokio::test]
async fn hotel_detail_and_missing_hotels() {
    let app = test_app();

    let detail = send(&app, "GET", "/v1/hotels/2", None, None).await;
    assert_eq!(detail.status, StatusCode::OK);
    assert_eq!(detail.body["hotel"]["name"], "Seaside Resort");
    assert!(!detail.body["rooms"].as_array().unwrap().is_empty());
    assert!(!detail.body["amenity_badges"].as_array().unwrap().is_empty());

    for uri in ["/v1/hotels/99", "/v1/hotels/abc"] {
        let missing = send(&app, "GET", uri, None, None).await;
        assert_eq!(missing.status, StatusCode::NOT_FOUND);
        assert_eq!(missing.body["error"], "hotel_not_found");
    }
}

#[tokio::test]
async fn signed_out_booking_points_at_login_and_resumes() {
    let app = test_app();
    let cookie = new_client(&app).await;

    let opened = send(
        &app,
        "POST",
        "/v1/bookings",
        Some(&cookie),
        Some(json!({ "hotel_id": 3 })),
    )
    .await;
    assert_eq!(opened.status, StatusCode::CREATED);
    let booking_id = opened.body["booking_id"].as_str().unwrap().to_string();

    send(
        &app,
        "POST",
        &format!("/v1/bookings/{booking_id}/dates"),
        Some(&cookie),
        Some(json!({ "check_in": "2025-07-01", "check_out": "2025-07-03" })),
    )
    .await;

    let start_uri = format!("/v1/bookings/{booking_id}/start");
    let blocked = send(&app, "POST", &start_uri, Some(&cookie), None).await;
    assert_eq!(blocked.status, StatusCode::UNAUTHORIZED);
    assert_eq!(blocked.body["redirect_to"], "/auth/login");
    assert_eq!(blocked.body["return_to"], "/hotels/3");

    let me = send(&app, "GET", "/v1/auth/me", Some(&cookie), None).await;
    assert_eq!(me.body["logged_in"], false);
    assert_eq!(me.body["pending_redirect"], "/hotels/3");

    let login = send(&app, "POST", "/v1/auth/login", Some(&cookie), None).await;
    assert_eq!(login.body["redirect_to"], "/hotels/3");

    let started = send(&app, "POST", &start_uri, Some(&cookie), None).await;
    assert_eq!(started.status, StatusCode::OK);
    assert_eq!(started.body["step"], "guest_details");
}

#[tokio::test]
async fn full_booking_flow_confirms_and_discards_the_draft() {
    let app = test_app();
    let cookie = new_client(&app).await;
    send(&app, "POST", "/v1/auth/login", Some(&cookie), None).await;

    let opened = send(
        &app,
        "POST",
        "/v1/bookings",
        Some(&cookie),
        Some(json!({ "hotel_id": 1 })),
    )
    .await;
    let booking_id = opened.body["booking_id"].as_str().unwrap().to_string();
    let uri = |action: &str| format!("/v1/bookings/{booking_id}/{action}");

    let past = send(
        &app,
        "POST",
        &uri("dates"),
        Some(&cookie),
        Some(json!({ "check_in": "2025-05-20" })),
    )
    .await;
    assert_eq!(past.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(past.body["error"], "date_in_past");

    send(&app, "POST", &uri("room"), Some(&cookie), Some(json!({ "room_id": 2 }))).await;
    let dated = send(
        &app,
        "POST",
        &uri("dates"),
        Some(&cookie),
        Some(json!({ "check_in": "2025-06-10", "check_out": "2025-06-13" })),
    )
    .await;
    assert_eq!(dated.body["quote"]["nights"], 3);
    assert_eq!(dated.body["quote"]["total"], 85905);

    send(
        &app,
        "POST",
        &uri("guests"),
        Some(&cookie),
        Some(json!({ "adults": 2, "children": 1 })),
    )
    .await;
    let started = send(&app, "POST", &uri("start"), Some(&cookie), None).await;
    assert_eq!(started.body["step"], "guest_details");

    let mut guest = json!({
        "first_name": "Ada",
        "last_name": "Lovelace",
        "email": "ada-at-example.com",
        "phone": "+1 555 010 2030",
    });
    let bad_email = send(&app, "POST", &uri("guest-details"), Some(&cookie), Some(guest.clone())).await;
    assert_eq!(bad_email.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(bad_email.body["error"], "invalid_email");

    guest["email"] = json!("ada@example.com");
    let details = send(&app, "POST", &uri("guest-details"), Some(&cookie), Some(guest)).await;
    assert_eq!(details.body["step"], "payment");

    let paid = send(
        &app,
        "POST",
        &uri("payment"),
        Some(&cookie),
        Some(json!({
            "method": "credit-card",
            "card_name": "Ada Lovelace",
            "card_number": "4242 4242 4242 4242",
            "card_expiry": "12/30",
            "card_cvc": "123",
        })),
    )
    .await;
    assert_eq!(paid.body["step"], "review");
    assert!(paid.body["draft"]["payment"].get("card_number").is_none());
    assert!(paid.body["draft"]["payment"].get("card_cvc").is_none());

    let early = send(&app, "POST", &uri("start"), Some(&cookie), None).await;
    assert_eq!(early.status, StatusCode::CONFLICT);

    let no_terms = send(
        &app,
        "POST",
        &uri("confirm"),
        Some(&cookie),
        Some(json!({ "terms_accepted": false })),
    )
    .await;
    assert_eq!(no_terms.body["error"], "terms_not_accepted");

    let confirmed = send(
        &app,
        "POST",
        &uri("confirm"),
        Some(&cookie),
        Some(json!({ "terms_accepted": true })),
    )
    .await;
    assert_eq!(confirmed.status, StatusCode::OK);
    assert_eq!(confirmed.body["title"], "Booking successful!");
    let confirmation = &confirmed.body["confirmation"];
    assert!(confirmation["reference"].as_str().unwrap().starts_with("HE-"));
    assert_eq!(confirmation["card_last4"], "4242");
    assert_eq!(confirmation["quote"]["total"], 85905);

    let gone = send(&app, "GET", &format!("/v1/bookings/{booking_id}"), Some(&cookie), None).await;
    assert_eq!(gone.status, StatusCode::NOT_FOUND);
    assert_eq!(gone.body["error"], "booking_not_found");

    let health = send(&app, "GET", "/health", Some(&cookie), None).await;
    assert_eq!(health.body["metrics"]["bookings_confirmed_total"], 1);
}

#[tokio::test]
async fn booking_drafts_are_private_to_their_client() {
    let app = test_app();
    let owner = new_client(&app).await;
    let stranger = new_client(&app).await;

    let opened = send(
        &app,
        "POST",
        "/v1/bookings",
        Some(&owner),
        Some(json!({ "hotel_id": 2 })),
    )
    .await;
    let uri = format!("/v1/bookings/{}", opened.body["booking_id"].as_str().unwrap());

    assert_eq!(send(&app, "GET", &uri, Some(&stranger), None).await.status, StatusCode::NOT_FOUND);
    assert_eq!(send(&app, "DELETE", &uri, Some(&owner), None).await.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "GET", &uri, Some(&owner), None).await.status, StatusCode::NOT_FOUND);

    let missing_hotel = send(
        &app,
        "POST",
        "/v1/bookings",
        Some(&owner),
        Some(json!({ "hotel_id": 42 })),
    )
    .await;
    assert_eq!(missing_hotel.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn chat_reply_arrives_after_the_message() {
    let app = test_app();
    let cookie = new_client(&app).await;

    let opened = send(&app, "POST", "/v1/chat", Some(&cookie), None).await;
    assert_eq!(opened.status, StatusCode::CREATED);
    assert_eq!(opened.body["entries"].as_array().unwrap().len(), 1);
    let chat_uri = format!("/v1/chat/{}", opened.body["chat_id"].as_str().unwrap());

    let blank = send(
        &app,
        "POST",
        &format!("{chat_uri}/messages"),
        Some(&cookie),
        Some(json!({ "text": "   " })),
    )
    .await;
    assert_eq!(blank.status, StatusCode::UNPROCESSABLE_ENTITY);

    let sent = send(
        &app,
        "POST",
        &format!("{chat_uri}/messages"),
        Some(&cookie),
        Some(json!({ "text": "How much does a room cost?" })),
    )
    .await;
    assert_eq!(sent.status, StatusCode::ACCEPTED);

    let mut entries = Vec::new();
    for _ in 0..100 {
        let view = send(&app, "GET", &chat_uri, Some(&cookie), None).await;
        entries = view.body["entries"].as_array().unwrap().clone();
        if entries.len() == 3 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[1]["sender"], "user");
    assert_eq!(entries[2]["sender"], "agent");
    assert!(entries[2]["text"].as_str().unwrap().contains("room prices vary"));

    assert_eq!(send(&app, "DELETE", &chat_uri, Some(&cookie), None).await.status, StatusCode::NO_CONTENT);
    assert_eq!(send(&app, "GET", &chat_uri, Some(&cookie), None).await.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn routes_search_and_forms() {
    let app = test_app();

    let hotels = send(
        &app,
        "GET",
        "/v1/routes/resolve?path=%2Fhotels%3Fdeal%3Dsummer-special",
        None,
        None,
    )
    .await;
    assert_eq!(hotels.status, StatusCode::OK);
    assert_eq!(hotels.body["route"]["page"], "hotels");
    assert_eq!(
        hotels.body["notice"],
        "The summer special deal has been applied to your search."
    );

    let missing = send(&app, "GET", "/v1/routes/resolve?path=%2Fhotels%2F99", None, None).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(missing.body["route"]["page"], "not_found");

    let search = send(
        &app,
        "POST",
        "/v1/search",
        None,
        Some(json!({ "destination": "New York", "guests": "3" })),
    )
    .await;
    assert_eq!(search.body["redirect_to"], "/hotels?destination=New+York&guests=3");

    let empty = send(&app, "POST", "/v1/search", None, Some(json!({ "destination": " " }))).await;
    assert_eq!(empty.body["error"], "destination_required");

    let contact = send(
        &app,
        "POST",
        "/v1/contact",
        None,
        Some(json!({ "first_name": "Ada", "email": "ada@example.com" })),
    )
    .await;
    assert_eq!(contact.status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(contact.body["error"], "missing_contact_fields");

    let about = send(&app, "GET", "/v1/pages/about", None, None).await;
    assert_eq!(about.body["founded"], 2015);

    let landing = send(&app, "GET", "/v1/landing", None, None).await;
    assert_eq!(landing.body["featured"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn idle_drafts_and_chats_expire() {
    let app = build_app_with(ApiConfig {
        cookie_secure: false,
        latency: SimulatedLatency::instant(),
        idle_ttl: chrono::Duration::zero(),
        ..ApiConfig::default()
    });
    let cookie = new_client(&app).await;

    let opened = send(
        &app,
        "POST",
        "/v1/bookings",
        Some(&cookie),
        Some(json!({ "hotel_id": 1 })),
    )
    .await;
    assert_eq!(opened.status, StatusCode::CREATED);
    let uri = format!("/v1/bookings/{}", opened.body["booking_id"].as_str().unwrap());
    let expired = send(&app, "GET", &uri, Some(&cookie), None).await;
    assert_eq!(expired.status, StatusCode::NOT_FOUND);
    assert_eq!(expired.body["error"], "booking_not_found");

    let chat = send(&app, "POST", "/v1/chat", Some(&cookie), None).await;
    let chat_uri = format!("/v1/chat/{}", chat.body["chat_id"].as_str().unwrap());
    let expired = send(&app, "GET", &chat_uri, Some(&cookie), None).await;
    assert_eq!(expired.status, StatusCode::NOT_FOUND);
    assert_eq!(expired.body["error"], "chat_not_found");
}
