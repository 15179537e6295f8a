pub mod airport_client;
pub mod app_config;
pub mod catalog_repo;
pub mod database;
pub mod memory;
pub mod offer_repo;
pub mod redis_repo;

pub use airport_client::AmadeusClient;
pub use catalog_repo::PostgresCatalogStore;
pub use offer_repo::PostgresOfferStore;
pub use redis_repo::RedisClient;
