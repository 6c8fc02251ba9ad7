use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::future::Future;
use validator::Validate;

use crate::core::{generate_order_number, order_total};
use crate::models::{CreateCustomOrderRequest, CreateOrderRequest, OrderStatus, UpdateStatusRequest};
use crate::routes::{db_failure, error_response, validation_failed, AppState};
use crate::services::PostgresError;

/// Unique constraint on `orders.order_number`
const ORDER_NUMBER_CONSTRAINT: &str = "orders_order_number_key";
const ORDER_NUMBER_ATTEMPTS: usize = 2;

/// Configure regular and custom order routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/pedidos", web::post().to(create_order))
        .route("/pedidos/{id}", web::delete().to(delete_order))
        .route("/pedidos/{id}/status", web::put().to(update_order_status))
        .route("/cliente/{id}/pedidos", web::get().to(list_client_orders))
        .route("/confeiteira/{id}/pedidos", web::get().to(list_seller_orders))
        .route("/pedidos-personalizados", web::post().to(create_custom_order))
        .route("/pedidos-personalizados/{id}", web::get().to(get_custom_order))
        .route("/pedidos-personalizados/{id}/status", web::put().to(update_custom_order_status))
        .route("/cliente/{id}/pedidos-personalizados", web::get().to(list_client_custom_orders))
        .route("/confeiteira/{id}/pedidos-personalizados", web::get().to(list_seller_custom_orders));
}

fn parse_status(req: &UpdateStatusRequest) -> Result<OrderStatus, HttpResponse> {
    req.status.parse::<OrderStatus>().map_err(|e| {
        let allowed: Vec<&str> = OrderStatus::ALL.iter().map(|s| s.as_str()).collect();
        error_response(
            StatusCode::BAD_REQUEST,
            "Invalid status",
            format!("{}; expected one of: {}", e, allowed.join(", ")),
        )
    })
}

/// Run `place` with a number from `next_number`, drawing a fresh one when
/// the previous number is already taken
async fn with_fresh_order_number<T, N, P, Fut>(mut next_number: N, mut place: P) -> Result<T, PostgresError>
where
    N: FnMut() -> i64,
    P: FnMut(i64) -> Fut,
    Fut: Future<Output = Result<T, PostgresError>>,
{
    let mut attempt = 1;
    loop {
        let number = next_number();
        match place(number).await {
            Err(PostgresError::Conflict(constraint))
                if constraint == ORDER_NUMBER_CONSTRAINT && attempt < ORDER_NUMBER_ATTEMPTS =>
            {
                tracing::warn!("Order number {} already taken, drawing another", number);
                attempt += 1;
            }
            result => return result,
        }
    }
}

/// Place an order for catalog cakes
///
/// POST /api/v1/pedidos
///
/// Request body:
/// ```json
/// {
///   "clienteId": 7,
///   "confeiteiraId": 3,
///   "endereco": "Rua das Flores, 10",
///   "pagamento": "Pix",
///   "itens": [{ "boloId": 12, "quantidade": 2, "precoUnitario": 45.0 }]
/// }
/// ```
///
/// The total and the customer-facing `NumeroPedido` are computed here.
async fn create_order(
    state: web::Data<AppState>,
    req: web::Json<CreateOrderRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let total = order_total(&req.items);
    let postgres = &state.postgres;
    let req = &*req;

    let placed = with_fresh_order_number(generate_order_number, move |order_number| {
        postgres.create_order(req, order_number, total)
    })
    .await;

    match placed {
        Ok(order) => HttpResponse::Created().json(order),
        Err(e) => db_failure("Failed to create order", e),
    }
}

/// DELETE /api/v1/pedidos/{id}
async fn delete_order(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    let order_id = path.into_inner();

    match state.postgres.delete_order(order_id).await {
        Ok(true) => HttpResponse::NoContent().finish(),
        Ok(false) => error_response(
            StatusCode::NOT_FOUND,
            "Order not found",
            format!("order {} does not exist", order_id),
        ),
        Err(e) => db_failure("Failed to delete order", e),
    }
}

/// Set the status of an order; any of the four statuses is accepted
///
/// PUT /api/v1/pedidos/{id}/status
///
/// Request body:
/// ```json
/// { "status": "Em produção" }
/// ```
async fn update_order_status(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let status = match parse_status(&req) {
        Ok(status) => status,
        Err(response) => return response,
    };

    match state.postgres.update_order_status(path.into_inner(), status).await {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(e) => db_failure("Failed to update order status", e),
    }
}

/// GET /api/v1/cliente/{id}/pedidos
async fn list_client_orders(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_orders_for_client(path.into_inner()).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => db_failure("Failed to fetch orders", e),
    }
}

/// GET /api/v1/confeiteira/{id}/pedidos
async fn list_seller_orders(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_orders_for_seller(path.into_inner()).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => db_failure("Failed to fetch orders", e),
    }
}

/// Request a made-to-order cake
///
/// POST /api/v1/pedidos-personalizados
///
/// Request body:
/// ```json
/// {
///   "clienteId": 7,
///   "confeiteiraId": 3,
///   "massa": "chocolate",
///   "recheio": "brigadeiro",
///   "cobertura": "ganache",
///   "camadas": 2,
///   "topo": true,
///   "observacoes": "Feliz aniversário, Ana",
///   "dataEntrega": "2024-07-20",
///   "horaEntrega": "15:00"
/// }
/// ```
async fn create_custom_order(
    state: web::Data<AppState>,
    req: web::Json<CreateCustomOrderRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    match state.postgres.create_custom_order(&req).await {
        Ok(order) => HttpResponse::Created().json(order),
        Err(e) => db_failure("Failed to create custom order", e),
    }
}

/// GET /api/v1/pedidos-personalizados/{id}
async fn get_custom_order(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.get_custom_order(path.into_inner()).await {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(e) => db_failure("Failed to fetch custom order", e),
    }
}

/// PUT /api/v1/pedidos-personalizados/{id}/status
async fn update_custom_order_status(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    req: web::Json<UpdateStatusRequest>,
) -> impl Responder {
    let status = match parse_status(&req) {
        Ok(status) => status,
        Err(response) => return response,
    };

    match state.postgres.update_custom_order_status(path.into_inner(), status).await {
        Ok(order) => HttpResponse::Ok().json(order),
        Err(e) => db_failure("Failed to update custom order status", e),
    }
}

/// GET /api/v1/cliente/{id}/pedidos-personalizados
async fn list_client_custom_orders(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_custom_orders_for_client(path.into_inner()).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => db_failure("Failed to fetch custom orders", e),
    }
}

/// GET /api/v1/confeiteira/{id}/pedidos-personalizados
async fn list_seller_custom_orders(state: web::Data<AppState>, path: web::Path<i32>) -> impl Responder {
    match state.postgres.list_custom_orders_for_seller(path.into_inner()).await {
        Ok(orders) => HttpResponse::Ok().json(orders),
        Err(e) => db_failure("Failed to fetch custom orders", e),
    }
}
