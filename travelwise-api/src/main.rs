use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use travelwise_api::{app, AppState};
use travelwise_store::app_config::Config;
use travelwise_store::{
    database, AmadeusClient, PostgresCatalogStore, PostgresOfferStore, RedisClient,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "travelwise_api=debug,travelwise_store=debug,tower_http=debug,axum::rejection=trace"
                    .into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::load()?;

    let pool = database::connect(&config.database.url).await?;
    tracing::info!("connected to database");

    let redis = match RedisClient::new(&config.redis.url) {
        Ok(client) => Some(Arc::new(client)),
        Err(err) => {
            tracing::warn!(%err, "redis unavailable, rate limiting disabled");
            None
        }
    };

    let offers = Arc::new(PostgresOfferStore::new(pool.clone()));
    let catalog = Arc::new(PostgresCatalogStore::new(pool));
    let airports = Arc::new(AmadeusClient::new(&config.amadeus));

    let state = AppState::new(offers, catalog, airports, redis, config.rate_limit.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("listening on {}", addr);

    axum::serve(
        listener,
        app(state).into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
