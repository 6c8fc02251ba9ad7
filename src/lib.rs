//! Confeitaria API - marketplace service connecting customers with home bakers
//!
//! Sellers, catalog, favorites, ratings and orders are exposed over REST.
//! The nearby search runs the haversine proximity filter over the seller list.

pub mod config;
pub mod core;
pub mod models;
pub mod routes;
pub mod services;

// Re-export commonly used types
pub use crate::core::{distance::haversine_distance, proximity};
pub use models::{Coordinate, ProximityQuery, Seller};
