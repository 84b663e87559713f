//! Web API module for Cirrus.
//!
//! REST surface over the credential store, file registry, blob store, and
//! dashboard aggregator.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod server;

pub use error::ApiError;
pub use router::create_router;
pub use server::WebServer;
