use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Point on the globe in degrees
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self { latitude, longitude }
    }

    /// Whether both components lie in their geographic ranges
    pub fn is_valid(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// Radius search around an origin
#[derive(Debug, Clone, Copy)]
pub struct ProximityQuery {
    pub origin: Coordinate,
    pub radius_km: f64,
}

/// Home baker selling through the marketplace
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Seller {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "nomeloja")]
    pub store_name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "descricao", default)]
    pub description: Option<String>,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
    #[serde(rename = "horarioInicio", default)]
    pub opening_time: Option<String>,
    #[serde(rename = "horarioFim", default)]
    pub closing_time: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
}

impl Seller {
    /// Image reference, ignoring blank values
    pub fn image_ref(&self) -> Option<&str> {
        self.image
            .as_deref()
            .map(str::trim)
            .filter(|image| !image.is_empty())
    }
}

/// Customer placing orders
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Client {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
    #[serde(rename = "telefone")]
    pub phone: String,
    #[serde(rename = "endereco")]
    pub address: Option<String>,
}

/// Public part of a client, embedded in rating listings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    pub email: String,
}

/// Catalog entry
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Cake {
    pub id: i32,
    #[serde(rename = "nome")]
    pub name: String,
    #[serde(rename = "descricao")]
    pub description: String,
    #[serde(rename = "preco")]
    pub price: f64,
    #[serde(rename = "peso")]
    pub weight: f64,
    #[serde(rename = "sabor")]
    pub flavor: String,
    #[serde(rename = "tipo", default)]
    pub kind: Option<String>,
    #[serde(rename = "imagem", default)]
    pub image: Option<String>,
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
}

/// Seller bookmarked by a client, with a snapshot of the store name and image
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Favorite {
    pub id: i32,
    #[serde(rename = "nomeloja")]
    pub store_name: String,
    #[serde(rename = "imagem")]
    pub image: Option<String>,
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
}

/// Star rating left by a client for a seller
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Rating {
    pub id: i32,
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
    #[serde(rename = "estrelas")]
    pub stars: i16,
    #[serde(rename = "comentario")]
    pub comment: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

/// Rating joined with its author
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingWithClient {
    #[serde(flatten)]
    pub rating: Rating,
    #[serde(rename = "cliente")]
    pub client: ClientSummary,
}

/// Lifecycle of both regular and custom orders
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "order_status")]
pub enum OrderStatus {
    #[default]
    #[serde(rename = "Pendente")]
    #[sqlx(rename = "Pendente")]
    Pending,
    #[serde(rename = "Em produção")]
    #[sqlx(rename = "Em produção")]
    InProduction,
    #[serde(rename = "Entregue")]
    #[sqlx(rename = "Entregue")]
    Delivered,
    #[serde(rename = "Cancelado")]
    #[sqlx(rename = "Cancelado")]
    Cancelled,
}

impl OrderStatus {
    pub const ALL: [OrderStatus; 4] = [
        OrderStatus::Pending,
        OrderStatus::InProduction,
        OrderStatus::Delivered,
        OrderStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "Pendente",
            OrderStatus::InProduction => "Em produção",
            OrderStatus::Delivered => "Entregue",
            OrderStatus::Cancelled => "Cancelado",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown order status: {0}")]
pub struct UnknownStatus(pub String);

impl FromStr for OrderStatus {
    type Err = UnknownStatus;

    /// Case-insensitive; accepts the accent-free spelling "Em producao" too
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pendente" => Ok(OrderStatus::Pending),
            "em produção" | "em producao" => Ok(OrderStatus::InProduction),
            "entregue" => Ok(OrderStatus::Delivered),
            "cancelado" => Ok(OrderStatus::Cancelled),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Line of a regular order
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct OrderItem {
    pub id: i32,
    #[serde(rename = "pedidoId")]
    pub order_id: i32,
    #[serde(rename = "boloId")]
    pub cake_id: i32,
    #[serde(rename = "quantidade")]
    pub quantity: i32,
    #[serde(rename = "precoUnitario")]
    pub unit_price: f64,
}

/// Order for catalog cakes
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Order {
    pub id: i32,
    #[serde(rename = "NumeroPedido")]
    pub order_number: i64,
    #[serde(rename = "nomeConfeiteira")]
    pub seller_name: String,
    #[serde(rename = "endereco")]
    pub address: String,
    #[serde(rename = "dataPedido")]
    pub ordered_at: chrono::DateTime<chrono::Utc>,
    #[serde(rename = "valorTotal")]
    pub total: f64,
    pub status: OrderStatus,
    #[serde(rename = "pagamento")]
    pub payment_method: String,
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[serde(rename = "itens", default)]
    #[sqlx(skip)]
    pub items: Vec<OrderItem>,
}

/// Made-to-order cake described by the client
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct CustomOrder {
    pub id: i32,
    #[serde(rename = "clienteId")]
    pub client_id: i32,
    #[serde(rename = "confeiteiraId")]
    pub seller_id: i32,
    #[serde(rename = "massa")]
    pub dough: String,
    #[serde(rename = "recheio")]
    pub filling: String,
    #[serde(rename = "cobertura")]
    pub frosting: String,
    #[serde(rename = "camadas")]
    pub layers: i32,
    #[serde(rename = "topo")]
    pub custom_topper: bool,
    #[serde(rename = "observacoes")]
    pub notes: Option<String>,
    #[serde(rename = "dataEntrega")]
    pub delivery_date: chrono::NaiveDate,
    #[serde(rename = "horaEntrega")]
    pub delivery_time: String,
    pub status: OrderStatus,
    #[serde(rename = "createdAt")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}
