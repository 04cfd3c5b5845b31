pub mod config;
pub mod logging;

pub mod auth;
pub mod clone;
pub mod cookies;
pub mod credentials;
pub mod endpoints;
pub mod error;
pub mod http;
pub mod scrape;

pub use error::CloneError;
