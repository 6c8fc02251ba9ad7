use serde::{Deserialize, Serialize};
use validator::Validate;

/// Query string for the nearby sellers search
///
/// Origin components are optional so a missing device location can be
/// reported explicitly instead of as a generic parse failure.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NearbySellersQuery {
    #[validate(range(min = -90.0, max = 90.0))]
    #[serde(alias = "lat")]
    pub latitude: Option<f64>,
    #[validate(range(min = -180.0, max = 180.0))]
    #[serde(alias = "lon", alias = "lng")]
    pub longitude: Option<f64>,
    #[validate(range(min = 0.0))]
    #[serde(rename = "raioKm", alias = "radiusKm", alias = "raio")]
    pub radius_km: Option<f64>,
    #[serde(rename = "nome", default)]
    pub name_prefix: Option<String>,
}

/// Query string for the plain seller listing
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SellerListQuery {
    #[serde(rename = "nome", default)]
    pub name_prefix: Option<String>,
}

/// Seller profile registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateSellerRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "nome")]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(rename = "nomeloja")]
    pub store_name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(rename = "telefone")]
    pub phone: String,
    #[validate(length(min = 1))]
    #[serde(rename = "endereco")]
    pub address: String,
    #[validate(range(min = -90.0, max = 90.0))]
    pub latitude: f64,
    #[validate(range(min = -180.0, max = 180.0))]
    pub longitude: f64,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
}

/// Partial seller profile update; absent fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateSellerRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "nomeloja", default)]
    pub store_name: Option<String>,
    #[serde(rename = "horarioInicio", default)]
    pub opening_time: Option<String>,
    #[serde(rename = "horarioFim", default)]
    pub closing_time: Option<String>,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
}

/// Client profile registration
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateClientRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "nome")]
    pub name: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 1))]
    #[serde(rename = "telefone")]
    pub phone: String,
    #[validate(length(min = 1))]
    #[serde(rename = "endereco")]
    pub address: String,
}

/// New catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCakeRequest {
    #[validate(length(min = 1))]
    #[serde(rename = "nome")]
    pub name: String,
    #[validate(length(min = 1))]
    #[serde(rename = "descricao")]
    pub description: String,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(rename = "preco")]
    pub price: f64,
    #[validate(range(exclusive_min = 0.0))]
    #[serde(rename = "peso")]
    pub weight: f64,
    #[validate(length(min = 1))]
    #[serde(rename = "sabor")]
    pub flavor: String,
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddFavoriteRequest {
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateRatingRequest {
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[validate(range(min = 1, max = 5))]
    #[serde(rename = "estrelas")]
    pub stars: i16,
    #[serde(rename = "comentario", default)]
    pub comment: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct OrderItemRequest {
    #[serde(rename = "boloId")]
    pub cake_id: i32,
    #[validate(range(min = 1))]
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    #[validate(range(min = 0.0))]
    #[serde(rename = "precoUnitario", alias = "preco_unitario")]
    pub unit_price: f64,
}

/// Order for catalog cakes. Total and order number are computed server-side.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
    #[validate(length(min = 1))]
    #[serde(rename = "endereco")]
    pub address: String,
    #[validate(length(min = 1))]
    #[serde(rename = "pagamento")]
    pub payment_method: String,
    #[validate(length(min = 1), nested)]
    #[serde(rename = "itens")]
    pub items: Vec<OrderItemRequest>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCustomOrderRequest {
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
    #[validate(length(min = 1))]
    #[serde(rename = "massa")]
    pub dough: String,
    #[validate(length(min = 1))]
    #[serde(rename = "recheio")]
    pub filling: String,
    #[validate(length(min = 1))]
    #[serde(rename = "cobertura")]
    pub frosting: String,
    #[validate(range(min = 1))]
    #[serde(rename = "camadas")]
    pub layers: i32,
    #[serde(rename = "topo", default)]
    pub custom_topper: bool,
    #[serde(rename = "observacoes", default)]
    pub notes: Option<String>,
    #[serde(rename = "dataEntrega")]
    pub delivery_date: chrono::NaiveDate,
    #[validate(length(min = 1))]
    #[serde(rename = "horaEntrega")]
    pub delivery_time: String,
}

/// Status change; the value is parsed by the handler so unknown names get a
/// descriptive error
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}
