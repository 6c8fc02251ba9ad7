// Core algorithm exports
pub mod distance;
pub mod filters;
pub mod orders;
pub mod proximity;

pub use distance::{distance_between, haversine_distance, EARTH_RADIUS_KM};
pub use filters::{matches_name_prefix, matches_seller_name};
pub use orders::{average_stars, generate_order_number, order_total};
pub use proximity::{filter_with_distance, Located};
