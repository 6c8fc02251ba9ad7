use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::{filter_with_distance, matches_seller_name};
use crate::models::{
    Coordinate, CreateSellerRequest, NearbySeller, NearbySellersQuery, NearbySellersResponse,
    ProximityQuery, Seller, SellerListQuery, UpdateSellerRequest,
};
use crate::routes::{db_failure, error_response, validation_failed, AppState};

/// Configure all seller-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/confeiteiras", web::get().to(list_sellers))
        .route("/confeiteiras", web::post().to(create_seller))
        .route("/confeiteiras/proximas", web::get().to(nearby_sellers))
        .route("/confeiteira/{id}", web::get().to(get_seller))
        .route("/confeiteira/{id}", web::put().to(update_seller));
}

/// List sellers
///
/// GET /api/v1/confeiteiras?nome={prefix}
async fn list_sellers(
    state: web::Data<AppState>,
    query: web::Query<SellerListQuery>,
) -> impl Responder {
    match state.postgres.list_sellers().await {
        Ok(sellers) => {
            let prefix = query.name_prefix.as_deref();
            let sellers: Vec<_> = sellers
                .into_iter()
                .filter(|seller| matches_seller_name(seller, prefix))
                .collect();
            HttpResponse::Ok().json(sellers)
        }
        Err(e) => db_failure("Failed to fetch sellers", e),
    }
}

/// Sellers within a radius of the caller's location
///
/// GET /api/v1/confeiteiras/proximas?latitude={lat}&longitude={lon}&raioKm={km}&nome={prefix}
///
/// Sellers keep their listing order; each carries its distance in `distanciaKm`.
async fn nearby_sellers(
    state: web::Data<AppState>,
    query: web::Query<NearbySellersQuery>,
) -> impl Responder {
    if let Err(errors) = query.validate() {
        return validation_failed(errors);
    }

    let (Some(latitude), Some(longitude)) = (query.latitude, query.longitude) else {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Location not found",
            "latitude and longitude query parameters are required",
        );
    };

    let origin = Coordinate::new(latitude, longitude);
    if !origin.is_valid() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid location",
            format!("({}, {}) is not a valid coordinate", latitude, longitude),
        );
    }

    if query.radius_km.is_some_and(|r| r.is_nan() || r < 0.0) {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Invalid radius",
            "raioKm must be a non-negative number",
        );
    }
    let radius_km = state.proximity.effective_radius(query.radius_km);

    let sellers = match state.postgres.list_sellers().await {
        Ok(sellers) => sellers,
        Err(e) => return db_failure("Failed to fetch sellers", e),
    };
    let total_sellers = sellers.len();

    let response = nearby_response(sellers, origin, radius_km, query.name_prefix.as_deref());

    tracing::info!(
        "{} of {} sellers within {} km of ({}, {})",
        response.total,
        total_sellers,
        radius_km,
        latitude,
        longitude
    );

    HttpResponse::Ok().json(response)
}

/// Name search then radius filter over the seller listing
///
/// Sellers keep their listing order and carry their distance from `origin`.
pub fn nearby_response(
    sellers: Vec<Seller>,
    origin: Coordinate,
    radius_km: f64,
    name_prefix: Option<&str>,
) -> NearbySellersResponse {
    let query = ProximityQuery::new(origin, radius_km);
    let nearby: Vec<NearbySeller> = filter_with_distance(
        &query,
        sellers
            .into_iter()
            .filter(|seller| matches_seller_name(seller, name_prefix)),
    )
    .into_iter()
    .map(|(seller, distance_km)| NearbySeller { seller, distance_km })
    .collect();

    NearbySellersResponse {
        origin,
        radius_km,
        total: nearby.len(),
        sellers: nearby,
    }
}

/// Seller profile
///
/// GET /api/v1/confeiteira/{id}
async fn get_seller(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.get_seller(path.into_inner()).await {
        Ok(seller) => HttpResponse::Ok().json(seller),
        Err(e) => db_failure("Failed to fetch seller", e),
    }
}

/// Register a seller profile
///
/// POST /api/v1/confeiteiras
async fn create_seller(
    state: web::Data<AppState>,
    req: web::Json<CreateSellerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.postgres.create_seller(&req).await {
        Ok(seller) => HttpResponse::Created().json(seller),
        Err(e) => db_failure("Failed to register seller", e),
    }
}

/// Update store name, opening hours, description or image
///
/// PUT /api/v1/confeiteira/{id}
async fn update_seller(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<UpdateSellerRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.postgres.update_seller(path.into_inner(), &req).await {
        Ok(seller) => HttpResponse::Ok().json(seller),
        Err(e) => db_failure("Failed to update seller", e),
    }
}
