// cardapio-api: Async Rust client for the Cardapio backoffice REST API

pub mod auth;
pub mod categories;
pub mod client;
pub mod error;
pub mod models;
pub mod products;
pub mod transport;

pub use client::ApiClient;
pub use error::Error;
pub use transport::TransportConfig;
