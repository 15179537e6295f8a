use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use uuid::Uuid;

use travelwise_api::{app, AppState};
use travelwise_catalog::{
    Airline, Airport, CabinPricing, Flight, FlightEndpoint, FlightPricing, Hotel, NightlyPricing,
};
use travelwise_core::airports::{AirportLookup, AirportSuggestion};
use travelwise_core::StoreResult;
use travelwise_offer::{DiscountKind, Offer, OfferConditions, OfferType, UsageLimit};
use travelwise_store::app_config::RateLimitConfig;
use travelwise_store::memory::{InMemoryCatalogStore, InMemoryOfferStore};

struct StubAirports;

#[async_trait]
impl AirportLookup for StubAirports {
    async fn search(&self, keyword: &str) -> StoreResult<Vec<AirportSuggestion>> {
        Ok(vec![AirportSuggestion {
            label: format!("Match for {keyword} (XXX)"),
            iata_code: "XXX".to_string(),
            city: "Testville".to_string(),
            country: "Testland".to_string(),
        }])
    }
}

fn flight(number: &str, economy_price: f64, available: i32) -> Flight {
    let departs = Utc.with_ymd_and_hms(2026, 9, 12, 8, 30, 0).unwrap();
    Flight {
        id: Uuid::new_v4(),
        airline: Airline {
            name: "Skyline Air".to_string(),
            code: "SK".to_string(),
            logo: None,
        },
        flight_number: number.to_string(),
        aircraft: Some("A320".to_string()),
        departure: FlightEndpoint {
            airport: Airport {
                code: "JFK".to_string(),
                name: "John F. Kennedy".to_string(),
                city: "New York".to_string(),
                country: "USA".to_string(),
            },
            terminal: Some("4".to_string()),
            gate: None,
            time: departs,
        },
        arrival: FlightEndpoint {
            airport: Airport {
                code: "LHR".to_string(),
                name: "Heathrow".to_string(),
                city: "London".to_string(),
                country: "UK".to_string(),
            },
            terminal: None,
            gate: None,
            time: departs + Duration::minutes(435),
        },
        duration: 435,
        stops: vec![],
        pricing: FlightPricing {
            economy: CabinPricing {
                available,
                price: economy_price,
                currency: "USD".to_string(),
            },
            premium_economy: None,
            business: None,
            first: None,
        },
        amenities: vec!["wifi".to_string()],
        is_active: true,
    }
}

fn hotel(name: &str, rate: f64, rating: f64) -> Hotel {
    Hotel {
        id: Uuid::new_v4(),
        name: name.to_string(),
        city: "Paris".to_string(),
        country: "France".to_string(),
        stars: 4,
        rating,
        review_count: 120,
        amenities: vec!["wifi".to_string()],
        pricing: NightlyPricing {
            base_rate: rate,
            currency: "USD".to_string(),
            taxes_included: false,
        },
        is_active: true,
    }
}

fn percentage_offer(code: &str) -> Offer {
    let now = Utc::now();
    Offer {
        id: Uuid::new_v4(),
        title: "Summer Sale".to_string(),
        description: "20% off flights".to_string(),
        offer_type: OfferType::Flight,
        discount_type: DiscountKind::Percentage,
        discount_value: 20.0,
        conditions: OfferConditions {
            minimum_amount: Some(100.0),
            maximum_discount: Some(50.0),
        },
        promo_code: Some(code.to_string()),
        usage_limit: UsageLimit {
            total: Some(100),
            per_user: 1,
        },
        usage_count: 0,
        is_active: true,
        valid_from: now - Duration::days(1),
        valid_until: now + Duration::days(30),
        image: None,
        priority: 7,
        created_at: now,
    }
}

fn test_app(offers: Vec<Offer>, flights: Vec<Flight>, hotels: Vec<Hotel>) -> axum::Router {
    let state = AppState::new(
        Arc::new(InMemoryOfferStore::new(offers)),
        Arc::new(InMemoryCatalogStore::new(flights, hotels, vec![])),
        Arc::new(StubAirports),
        None,
        RateLimitConfig {
            requests_per_minute: 100,
        },
    );
    app(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn health_endpoint_responds() {
    let app = test_app(vec![], vec![], vec![]);
    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn requests_pass_with_and_without_connect_info() {
    // Served requests carry a peer address in the extensions; oneshot
    // requests do not. The rate-limit layer must accept both.
    let app = test_app(vec![], vec![], vec![]);
    let response = app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let mut request = Request::get("/health").body(Body::empty()).unwrap();
    request.extensions_mut().insert(axum::extract::ConnectInfo(
        "127.0.0.1:4000".parse::<std::net::SocketAddr>().unwrap(),
    ));
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn flight_search_returns_matches_sorted_by_price() {
    let app = test_app(
        vec![],
        vec![flight("SK300", 520.0, 9), flight("SK100", 389.0, 9)],
        vec![],
    );

    let response = app
        .oneshot(
            Request::get("/flights/search?from=jfk&to=lhr&departDate=2026-09-12&passengers=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["total"], 2);
    assert_eq!(body["flights"][0]["flightNumber"], "SK100");
    assert_eq!(body["flights"][1]["flightNumber"], "SK300");
    assert_eq!(body["searchParams"]["from"], "jfk");
}

#[tokio::test]
async fn flight_search_excludes_cabins_without_enough_seats() {
    let app = test_app(
        vec![],
        vec![flight("SK100", 389.0, 1), flight("SK200", 420.0, 5)],
        vec![],
    );

    let response = app
        .oneshot(
            Request::get("/flights/search?from=JFK&to=LHR&departDate=2026-09-12&passengers=3")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["flights"][0]["flightNumber"], "SK200");
}

#[tokio::test]
async fn flight_search_rejects_identical_endpoints() {
    let app = test_app(vec![], vec![], vec![]);
    let response = app
        .oneshot(
            Request::get("/flights/search?from=JFK&to=JFK&departDate=2026-09-12")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn flight_lookup_by_unknown_id_is_not_found() {
    let app = test_app(vec![], vec![flight("SK100", 389.0, 9)], vec![]);
    let response = app
        .oneshot(
            Request::get(format!("/flights/{}", Uuid::new_v4()))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "Flight not found");
}

#[tokio::test]
async fn popular_destinations_groups_active_flights() {
    let app = test_app(
        vec![],
        vec![flight("SK100", 389.0, 9), flight("SK200", 420.0, 9)],
        vec![],
    );
    let response = app
        .oneshot(
            Request::get("/flights/destinations/popular")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["destinations"][0]["city"], "London");
    assert_eq!(body["destinations"][0]["count"], 2);
    assert_eq!(body["destinations"][0]["minPrice"], 389.0);
}

#[tokio::test]
async fn hotel_search_applies_rate_ceiling() {
    let app = test_app(
        vec![],
        vec![],
        vec![hotel("Le Budget", 120.0, 4.1), hotel("Le Grand", 410.0, 4.8)],
    );
    let response = app
        .oneshot(
            Request::get("/hotels/search?destination=Paris&checkIn=2026-10-01&checkOut=2026-10-05&maxPrice=200")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["hotels"][0]["name"], "Le Budget");
}

#[tokio::test]
async fn validate_promo_returns_discount_envelope() {
    let app = test_app(vec![percentage_offer("SUMMER20")], vec![], vec![]);
    let request = Request::post("/offers/validate-promo")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"promoCode": "summer20", "bookingType": "flight", "amount": 500.0}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["valid"], true);
    assert_eq!(body["offer"]["title"], "Summer Sale");
    assert_eq!(body["offer"]["discountType"], "percentage");
    // 20% of 500 is 100, capped at the 50 maximum.
    assert_eq!(body["offer"]["discountAmount"], 50.0);
}

#[tokio::test]
async fn validate_promo_unknown_code_is_not_found() {
    let app = test_app(vec![percentage_offer("SUMMER20")], vec![], vec![]);
    let request = Request::post("/offers/validate-promo")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"promoCode": "NOPE", "bookingType": "flight", "amount": 500.0}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["message"], "invalid or expired promo code");
}

#[tokio::test]
async fn validate_promo_below_minimum_is_rejected() {
    let app = test_app(vec![percentage_offer("SUMMER20")], vec![], vec![]);
    let request = Request::post("/offers/validate-promo")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"promoCode": "SUMMER20", "bookingType": "flight", "amount": 60.0}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "minimum booking amount of $100 required");
}

#[tokio::test]
async fn validate_promo_wrong_booking_type_is_rejected() {
    let app = test_app(vec![percentage_offer("SUMMER20")], vec![], vec![]);
    let request = Request::post("/offers/validate-promo")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"promoCode": "SUMMER20", "bookingType": "hotel", "amount": 500.0}).to_string(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["message"], "promo code not valid for this booking type");
}

#[tokio::test]
async fn offers_listing_scopes_by_type() {
    let mut hotel_offer = percentage_offer("HOTELDEAL");
    hotel_offer.offer_type = OfferType::Hotel;
    let app = test_app(vec![percentage_offer("SUMMER20"), hotel_offer], vec![], vec![]);

    let response = app
        .oneshot(
            Request::get("/offers?type=hotel")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["offers"].as_array().unwrap().len(), 1);
    assert_eq!(body["offers"][0]["promoCode"], "HOTELDEAL");
}

#[tokio::test]
async fn featured_offers_require_priority() {
    let mut background = percentage_offer("QUIET");
    background.priority = 1;
    let app = test_app(vec![percentage_offer("SUMMER20"), background], vec![], vec![]);

    let response = app
        .oneshot(Request::get("/offers/featured").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body["offers"].as_array().unwrap().len(), 1);
    assert_eq!(body["offers"][0]["promoCode"], "SUMMER20");
}

#[tokio::test]
async fn airport_autocomplete_requires_three_characters() {
    let app = test_app(vec![], vec![], vec![]);
    let response = app
        .oneshot(Request::get("/airports?q=lo").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn airport_autocomplete_forwards_longer_queries() {
    let app = test_app(vec![], vec![], vec![]);
    let response = app
        .oneshot(Request::get("/airports?q=lon").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let body = body_json(response).await;
    assert_eq!(body[0]["iataCode"], "XXX");
    assert_eq!(body[0]["city"], "Testville");
}
