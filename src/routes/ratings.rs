use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::core::average_stars;
use crate::models::{CreateRatingRequest, SellerRatingsResponse};
use crate::routes::{db_failure, validation_failed, AppState};

/// Configure rating routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/avaliacoes", web::post().to(create_rating))
        .route("/confeiteira/{id}/avaliacoes", web::get().to(list_ratings));
}

/// Rate a seller; one rating per client and seller
///
/// POST /api/v1/avaliacoes
///
/// Request body:
/// ```json
/// {
///   "confeiteiraId": 3,
///   "clienteId": 7,
///   "estrelas": 5,
///   "comentario": "Maravilhoso"
/// }
/// ```
async fn create_rating(
    state: web::Data<AppState>,
    req: web::Json<CreateRatingRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.postgres.create_rating(&req).await {
        Ok(rating) => HttpResponse::Created().json(rating),
        Err(e) => db_failure("Failed to create rating", e),
    }
}

/// Ratings of a seller, newest first, with their average
///
/// GET /api/v1/confeiteira/{id}/avaliacoes
async fn list_ratings(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_ratings(path.into_inner()).await {
        Ok(ratings) => {
            let average = average_stars(ratings.iter().map(|r| r.rating.stars));
            HttpResponse::Ok().json(SellerRatingsResponse {
                total: ratings.len(),
                average_stars: average,
                ratings,
            })
        }
        Err(e) => db_failure("Failed to fetch ratings", e),
    }
}
