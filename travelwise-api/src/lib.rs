use axum::{
    extract::State,
    http::Method,
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub mod airports;
pub mod cars;
pub mod error;
pub mod flights;
pub mod hotels;
pub mod offers;
pub mod state;

pub use state::AppState;

pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST, Method::DELETE, Method::OPTIONS])
        .allow_headers([
            axum::http::header::AUTHORIZATION,
            axum::http::header::CONTENT_TYPE,
            axum::http::header::USER_AGENT,
        ]);

    Router::new()
        .route("/health", get(health))
        .route("/flights/search", get(flights::search))
        .route("/flights/destinations/popular", get(flights::popular))
        .route("/flights/airlines/list", get(flights::airlines))
        .route("/flights/{id}", get(flights::get_flight))
        .route("/hotels/search", get(hotels::search))
        .route("/cars/search", get(cars::search))
        .route("/offers", get(offers::list))
        .route("/offers/featured", get(offers::featured))
        .route("/offers/validate-promo", post(offers::validate_promo))
        .route("/airports", get(airports::search))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit_middleware,
        ))
        .with_state(state)
}

async fn health() -> &'static str {
    "ok"
}

async fn rate_limit_middleware(
    State(state): State<AppState>,
    req: axum::extract::Request,
    next: axum::middleware::Next,
) -> Result<impl IntoResponse, impl IntoResponse> {
    let Some(redis) = &state.redis else {
        return Ok(next.run(req).await);
    };

    // Connect info is only present when served through
    // `into_make_service_with_connect_info`; otherwise all callers share
    // one window.
    let key = match req
        .extensions()
        .get::<axum::extract::ConnectInfo<SocketAddr>>()
    {
        Some(axum::extract::ConnectInfo(addr)) => format!("ratelimit:{}", addr.ip()),
        None => "ratelimit:global".to_string(),
    };
    match redis
        .check_rate_limit(&key, state.rate_limit.requests_per_minute, 60)
        .await
    {
        Ok(true) => Ok(next.run(req).await),
        Ok(false) => Err((axum::http::StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded")),
        Err(_) => Ok(next.run(req).await), // Fail open
    }
}
