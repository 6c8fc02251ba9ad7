use actix_web::{web, HttpResponse, Responder};
use validator::Validate;

use crate::models::CreateCakeRequest;
use crate::routes::{db_failure, validation_failed, AppState};

/// Configure catalog routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/confeiteira/{id}/bolo", web::post().to(create_cake))
        .route("/confeiteira/{id}/catalogo", web::get().to(list_cakes))
        .route("/bolo/{id}", web::get().to(get_cake));
}

/// Add a cake to a seller's catalog
///
/// POST /api/v1/confeiteira/{id}/bolo
///
/// Request body:
/// ```json
/// {
///   "nome": "Bolo de cenoura",
///   "descricao": "Com cobertura de chocolate",
///   "preco": 45.0,
///   "peso": 1.5,
///   "sabor": "cenoura",
///   "tipo": "caseiro",
///   "imagem": "/uploads/cenoura.jpg"
/// }
/// ```
async fn create_cake(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<CreateCakeRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.postgres.create_cake(path.into_inner(), &req).await {
        Ok(cake) => HttpResponse::Created().json(cake),
        Err(e) => db_failure("Failed to create cake", e),
    }
}

/// GET /api/v1/confeiteira/{id}/catalogo
async fn list_cakes(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_cakes(path.into_inner()).await {
        Ok(cakes) => HttpResponse::Ok().json(cakes),
        Err(e) => db_failure("Failed to fetch catalog", e),
    }
}

/// GET /api/v1/bolo/{id}
async fn get_cake(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.get_cake(path.into_inner()).await {
        Ok(cake) => HttpResponse::Ok().json(cake),
        Err(e) => db_failure("Failed to fetch cake", e),
    }
}
