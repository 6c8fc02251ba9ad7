use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::models::{AddFavoriteRequest, ClientProfile, CreateClientRequest};
use crate::routes::{db_failure, error_response, validation_failed, AppState};

/// Configure client profile and favorites routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/clientes", web::post().to(create_client))
        .route("/cliente/{id}", web::get().to(get_client))
        .route("/cliente/{id}/endereco", web::get().to(get_client_address))
        .route("/cliente/{id}/favoritos", web::get().to(list_favorites))
        .route("/cliente/{id}/favoritos", web::post().to(add_favorite))
        .route("/cliente/{id}/favoritos/{seller_id}", web::delete().to(remove_favorite));
}

/// POST /api/v1/clientes
async fn create_client(
    state: web::Data<AppState>,
    req: web::Json<CreateClientRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.postgres.create_client(&req).await {
        Ok(client) => HttpResponse::Created().json(client),
        Err(e) => db_failure("Failed to register client", e),
    }
}

/// Client profile with favorites, each carrying the seller's profile
///
/// GET /api/v1/cliente/{id}
async fn get_client(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let client_id = path.into_inner();

    let client = match state.postgres.get_client(client_id).await {
        Ok(client) => client,
        Err(e) => return db_failure("Failed to fetch client", e),
    };

    let favorites = match state.postgres.list_favorites(client_id).await {
        Ok(favorites) => favorites,
        Err(e) => return db_failure("Failed to fetch favorites", e),
    };

    match state.postgres.list_favorite_sellers(client_id).await {
        Ok(sellers) => HttpResponse::Ok().json(ClientProfile::new(client, favorites, sellers)),
        Err(e) => db_failure("Failed to fetch favorite sellers", e),
    }
}

/// Delivery address as a bare JSON string
///
/// GET /api/v1/cliente/{id}/endereco
async fn get_client_address(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.get_client_address(path.into_inner()).await {
        Ok(address) => HttpResponse::Ok().json(address),
        Err(e) => db_failure("Failed to fetch address", e),
    }
}

/// GET /api/v1/cliente/{id}/favoritos
async fn list_favorites(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_favorites(path.into_inner()).await {
        Ok(favorites) => HttpResponse::Ok().json(favorites),
        Err(e) => db_failure("Failed to fetch favorites", e),
    }
}

/// Bookmark a seller
///
/// POST /api/v1/cliente/{id}/favoritos
///
/// Request body:
/// ```json
/// { "confeiteiraId": 3 }
/// ```
async fn add_favorite(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<AddFavoriteRequest>,
) -> impl Responder {
    let client_id = path.into_inner();

    match state.postgres.add_favorite(client_id, req.seller_id).await {
        Ok(favorite) => HttpResponse::Created().json(favorite),
        Err(e) => db_failure("Failed to add favorite", e),
    }
}

/// DELETE /api/v1/cliente/{id}/favoritos/{seller_id}
async fn remove_favorite(
    state: web::Data<AppState>,
    path: web::Path<(i32, i32)>,
) -> impl Responder {
    let (client_id, seller_id) = path.into_inner();

    match state.postgres.remove_favorite(client_id, seller_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => error_response(
            StatusCode::NOT_FOUND,
            "Favorite not found",
            format!("client {} has not favorited seller {}", client_id, seller_id),
        ),
        Err(e) => db_failure("Failed to remove favorite", e),
    }
}
