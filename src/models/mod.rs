// Model exports
pub mod domain;
pub mod requests;
pub mod responses;

pub use domain::{Cake, Client, ClientSummary, Coordinate, CustomOrder, Favorite, Order, OrderItem, OrderStatus, ProximityQuery, Rating, RatingWithClient, Seller, UnknownStatus};
pub use requests::{AddFavoriteRequest, CreateCakeRequest, CreateClientRequest, CreateCustomOrderRequest, CreateOrderRequest, CreateRatingRequest, CreateSellerRequest, NearbySellersQuery, OrderItemRequest, SellerListQuery, UpdateSellerRequest, UpdateStatusRequest};
pub use responses::{ClientProfile, ErrorResponse, FavoriteWithSeller, HealthResponse, NearbySeller, NearbySellersResponse, SellerRatingsResponse};
