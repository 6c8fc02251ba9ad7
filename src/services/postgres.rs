use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Row};
use std::collections::HashMap;
use std::time::Duration;
use thiserror::Error;

use crate::config::DatabaseSettings;
use crate::models::{
    Cake, Client, ClientSummary, CreateCakeRequest, CreateClientRequest, CreateCustomOrderRequest,
    CreateOrderRequest, CreateRatingRequest, CreateSellerRequest, CustomOrder, Favorite, Order,
    OrderItem, OrderStatus, Rating, RatingWithClient, Seller, UpdateSellerRequest,
};

/// Errors that can occur when interacting with PostgreSQL
#[derive(Debug, Error)]
pub enum PostgresError {
    #[error("SQLx error: {0}")]
    SqlxError(sqlx::Error),

    #[error("Migration error: {0}")]
    MigrateError(#[from] sqlx::migrate::MigrateError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Already exists: {0}")]
    Conflict(String),

    #[error("Referenced record does not exist: {0}")]
    InvalidReference(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),
}

impl From<sqlx::Error> for PostgresError {
    fn from(err: sqlx::Error) -> Self {
        if let sqlx::Error::Database(db_err) = &err {
            let constraint = db_err.constraint().unwrap_or("unknown").to_string();
            if db_err.is_unique_violation() {
                return PostgresError::Conflict(constraint);
            }
            if db_err.is_foreign_key_violation() {
                return PostgresError::InvalidReference(constraint);
            }
            if db_err.is_check_violation() {
                return PostgresError::InvalidInput(constraint);
            }
        }
        PostgresError::SqlxError(err)
    }
}

const SELLER_COLUMNS: &str = "id, name, store_name, email, phone, address, description, image, \
     opening_time, closing_time, latitude, longitude";

const ORDER_COLUMNS: &str = "id, order_number, seller_name, address, ordered_at, total, status, \
     payment_method, seller_id, client_id";

const CUSTOM_ORDER_COLUMNS: &str = "id, client_id, seller_id, dough, filling, frosting, layers, \
     custom_topper, notes, delivery_date, delivery_time, status, created_at";

/// PostgreSQL client backing every marketplace resource
pub struct PostgresClient {
    pool: PgPool,
}

impl PostgresClient {
    /// Create a new PostgreSQL client from a connection string and run migrations
    pub async fn new(
        database_url: &str,
        max_connections: u32,
        min_connections: u32,
        acquire_timeout: Duration,
        idle_timeout: Duration,
    ) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .min_connections(min_connections)
            .acquire_timeout(acquire_timeout)
            .idle_timeout(idle_timeout)
            .test_before_acquire(true)
            .connect(database_url)
            .await?;

        // Run migrations on startup
        sqlx::migrate!("./migrations").run(&pool).await?;

        Ok(Self { pool })
    }

    /// Create a new PostgreSQL client from settings
    pub async fn from_settings(settings: &DatabaseSettings) -> Result<Self, PostgresError> {
        tracing::info!(
            "Connecting to PostgreSQL (max {} connections)",
            settings.max_connections.unwrap_or(10)
        );

        Self::new(
            &settings.url,
            settings.max_connections.unwrap_or(10),
            settings.min_connections.unwrap_or(1),
            Duration::from_secs(settings.acquire_timeout_secs.unwrap_or(5)),
            Duration::from_secs(settings.idle_timeout_secs.unwrap_or(600)),
        )
        .await
    }

    /// Pool that only connects on first use; no migrations are run
    pub fn lazy(database_url: &str, acquire_timeout: Duration) -> Result<Self, PostgresError> {
        let pool = PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(acquire_timeout)
            .connect_lazy(database_url)?;

        Ok(Self { pool })
    }

    // ---------------------------------------------------------------- sellers

    pub async fn list_sellers(&self) -> Result<Vec<Seller>, PostgresError> {
        let query = format!("SELECT {} FROM sellers ORDER BY id", SELLER_COLUMNS);

        let sellers = sqlx::query_as::<_, Seller>(&query)
            .fetch_all(&self.pool)
            .await?;

        tracing::debug!("Loaded {} sellers", sellers.len());

        Ok(sellers)
    }

    pub async fn get_seller(&self, seller_id: i32) -> Result<Seller, PostgresError> {
        let query = format!("SELECT {} FROM sellers WHERE id = $1", SELLER_COLUMNS);

        let seller = sqlx::query_as::<_, Seller>(&query)
            .bind(seller_id)
            .fetch_optional(&self.pool)
            .await?;

        seller.ok_or_else(|| PostgresError::NotFound(format!("seller {}", seller_id)))
    }

    pub async fn create_seller(&self, req: &CreateSellerRequest) -> Result<Seller, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO sellers (name, store_name, email, phone, address, latitude, longitude, description, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING {}
            "#,
            SELLER_COLUMNS
        );

        let seller = sqlx::query_as::<_, Seller>(&query)
            .bind(&req.name)
            .bind(&req.store_name)
            .bind(&req.email)
            .bind(&req.phone)
            .bind(&req.address)
            .bind(req.latitude)
            .bind(req.longitude)
            .bind(&req.description)
            .bind(&req.image)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!("Registered seller {} ({})", seller.id, seller.store_name);

        Ok(seller)
    }

    /// Update store profile fields; `None` keeps the stored value
    pub async fn update_seller(
        &self,
        seller_id: i32,
        req: &UpdateSellerRequest,
    ) -> Result<Seller, PostgresError> {
        let query = format!(
            r#"
            UPDATE sellers SET
                store_name = COALESCE($2, store_name),
                opening_time = COALESCE($3, opening_time),
                closing_time = COALESCE($4, closing_time),
                description = COALESCE($5, description),
                image = COALESCE($6, image)
            WHERE id = $1
            RETURNING {}
            "#,
            SELLER_COLUMNS
        );

        let seller = sqlx::query_as::<_, Seller>(&query)
            .bind(seller_id)
            .bind(&req.store_name)
            .bind(&req.opening_time)
            .bind(&req.closing_time)
            .bind(&req.description)
            .bind(&req.image)
            .fetch_optional(&self.pool)
            .await?;

        seller.ok_or_else(|| PostgresError::NotFound(format!("seller {}", seller_id)))
    }

    // ---------------------------------------------------------------- clients

    pub async fn create_client(&self, req: &CreateClientRequest) -> Result<Client, PostgresError> {
        let client = sqlx::query_as::<_, Client>(
            r#"
            INSERT INTO clients (name, email, phone, address)
            VALUES ($1, $2, $3, $4)
            RETURNING id, name, email, phone, address
            "#,
        )
        .bind(&req.name)
        .bind(&req.email)
        .bind(&req.phone)
        .bind(&req.address)
        .fetch_one(&self.pool)
        .await?;

        tracing::info!("Registered client {}", client.id);

        Ok(client)
    }

    pub async fn get_client(&self, client_id: i32) -> Result<Client, PostgresError> {
        sqlx::query_as::<_, Client>(
            "SELECT id, name, email, phone, address FROM clients WHERE id = $1",
        )
        .bind(client_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("client {}", client_id)))
    }

    /// Delivery address of a client; blank addresses count as missing
    pub async fn get_client_address(&self, client_id: i32) -> Result<String, PostgresError> {
        self.get_client(client_id)
            .await?
            .address
            .filter(|address| !address.trim().is_empty())
            .ok_or_else(|| PostgresError::NotFound(format!("address of client {}", client_id)))
    }

    // ---------------------------------------------------------------- catalog

    pub async fn create_cake(
        &self,
        seller_id: i32,
        req: &CreateCakeRequest,
    ) -> Result<Cake, PostgresError> {
        let cake = sqlx::query_as::<_, Cake>(
            r#"
            INSERT INTO cakes (seller_id, name, description, price, weight, flavor, kind, image)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, name, description, price, weight, flavor, kind, image, seller_id
            "#,
        )
        .bind(seller_id)
        .bind(&req.name)
        .bind(&req.description)
        .bind(req.price)
        .bind(req.weight)
        .bind(&req.flavor)
        .bind(&req.kind)
        .bind(&req.image)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match PostgresError::from(e) {
            PostgresError::InvalidReference(_) => {
                PostgresError::NotFound(format!("seller {}", seller_id))
            }
            other => other,
        })?;

        tracing::debug!("Seller {} added cake {}", seller_id, cake.id);

        Ok(cake)
    }

    pub async fn list_cakes(&self, seller_id: i32) -> Result<Vec<Cake>, PostgresError> {
        let cakes = sqlx::query_as::<_, Cake>(
            r#"
            SELECT id, name, description, price, weight, flavor, kind, image, seller_id
            FROM cakes
            WHERE seller_id = $1
            ORDER BY id
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cakes)
    }

    pub async fn get_cake(&self, cake_id: i32) -> Result<Cake, PostgresError> {
        sqlx::query_as::<_, Cake>(
            r#"
            SELECT id, name, description, price, weight, flavor, kind, image, seller_id
            FROM cakes
            WHERE id = $1
            "#,
        )
        .bind(cake_id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| PostgresError::NotFound(format!("cake {}", cake_id)))
    }

    // -------------------------------------------------------------- favorites

    /// Bookmark a seller for a client
    ///
    /// Both sides must exist and the seller must have an image, which is
    /// copied into the favorite together with the store name.
    pub async fn add_favorite(
        &self,
        client_id: i32,
        seller_id: i32,
    ) -> Result<Favorite, PostgresError> {
        self.get_client(client_id).await?;
        let seller = self.get_seller(seller_id).await?;

        let image = seller
            .image_ref()
            .ok_or_else(|| PostgresError::InvalidInput(format!("seller {} has no image", seller_id)))?
            .to_string();

        let favorite = sqlx::query_as::<_, Favorite>(
            r#"
            INSERT INTO favorites (client_id, seller_id, store_name, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id, store_name, image, client_id, seller_id
            "#,
        )
        .bind(client_id)
        .bind(seller_id)
        .bind(&seller.store_name)
        .bind(image)
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!("Client {} favorited seller {}", client_id, seller_id);

        Ok(favorite)
    }

    pub async fn list_favorites(&self, client_id: i32) -> Result<Vec<Favorite>, PostgresError> {
        let favorites = sqlx::query_as::<_, Favorite>(
            r#"
            SELECT id, store_name, image, client_id, seller_id
            FROM favorites
            WHERE client_id = $1
            ORDER BY id
            "#,
        )
        .bind(client_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(favorites)
    }

    /// Sellers bookmarked by a client
    pub async fn list_favorite_sellers(&self, client_id: i32) -> Result<Vec<Seller>, PostgresError> {
        let query = format!(
            r#"
            SELECT {}
            FROM sellers
            WHERE id IN (SELECT seller_id FROM favorites WHERE client_id = $1)
            "#,
            SELLER_COLUMNS
        );

        let sellers = sqlx::query_as::<_, Seller>(&query)
            .bind(client_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(sellers)
    }

    /// Remove a bookmark; returns whether one existed
    pub async fn remove_favorite(
        &self,
        client_id: i32,
        seller_id: i32,
    ) -> Result<bool, PostgresError> {
        let result = sqlx::query(
            r#"
            DELETE FROM favorites
            WHERE client_id = $1 AND seller_id = $2
            "#,
        )
        .bind(client_id)
        .bind(seller_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // ---------------------------------------------------------------- ratings

    pub async fn create_rating(&self, req: &CreateRatingRequest) -> Result<Rating, PostgresError> {
        let rating = sqlx::query_as::<_, Rating>(
            r#"
            INSERT INTO ratings (client_id, seller_id, stars, comment)
            VALUES ($1, $2, $3, $4)
            RETURNING id, client_id, seller_id, stars, comment, created_at
            "#,
        )
        .bind(req.client_id)
        .bind(req.seller_id)
        .bind(req.stars)
        .bind(req.comment.as_deref().filter(|c| !c.trim().is_empty()))
        .fetch_one(&self.pool)
        .await?;

        tracing::debug!(
            "Client {} rated seller {} with {} stars",
            req.client_id,
            req.seller_id,
            req.stars
        );

        Ok(rating)
    }

    /// Ratings of a seller, newest first, with the author's public fields
    pub async fn list_ratings(&self, seller_id: i32) -> Result<Vec<RatingWithClient>, PostgresError> {
        let rows = sqlx::query(
            r#"
            SELECT r.id, r.client_id, r.seller_id, r.stars, r.comment, r.created_at,
                   c.name AS client_name, c.email AS client_email
            FROM ratings r
            JOIN clients c ON c.id = r.client_id
            WHERE r.seller_id = $1
            ORDER BY r.created_at DESC, r.id DESC
            "#,
        )
        .bind(seller_id)
        .fetch_all(&self.pool)
        .await?;

        let ratings = rows
            .iter()
            .map(|row| RatingWithClient {
                rating: Rating {
                    id: row.get("id"),
                    client_id: row.get("client_id"),
                    seller_id: row.get("seller_id"),
                    stars: row.get("stars"),
                    comment: row.get("comment"),
                    created_at: row.get("created_at"),
                },
                client: ClientSummary {
                    id: row.get("client_id"),
                    name: row.get("client_name"),
                    email: row.get("client_email"),
                },
            })
            .collect();

        Ok(ratings)
    }

    // ----------------------------------------------------------------- orders

    /// Store an order and its lines in one transaction
    ///
    /// The seller's store name is recorded on the order as it is at
    /// ordering time.
    pub async fn create_order(
        &self,
        req: &CreateOrderRequest,
        order_number: i64,
        total: f64,
    ) -> Result<Order, PostgresError> {
        let seller = self.get_seller(req.seller_id).await?;

        let mut tx = self.pool.begin().await?;

        let query = format!(
            r#"
            INSERT INTO orders (order_number, seller_name, address, total, status, payment_method, seller_id, client_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {}
            "#,
            ORDER_COLUMNS
        );

        let mut order = sqlx::query_as::<_, Order>(&query)
            .bind(order_number)
            .bind(&seller.store_name)
            .bind(&req.address)
            .bind(total)
            .bind(OrderStatus::Pending)
            .bind(&req.payment_method)
            .bind(req.seller_id)
            .bind(req.client_id)
            .fetch_one(&mut *tx)
            .await?;

        for item in &req.items {
            let line = sqlx::query_as::<_, OrderItem>(
                r#"
                INSERT INTO order_items (order_id, cake_id, quantity, unit_price)
                VALUES ($1, $2, $3, $4)
                RETURNING id, order_id, cake_id, quantity, unit_price
                "#,
            )
            .bind(order.id)
            .bind(item.cake_id)
            .bind(item.quantity)
            .bind(item.unit_price)
            .fetch_one(&mut *tx)
            .await?;

            order.items.push(line);
        }

        tx.commit().await?;

        tracing::info!(
            "Order {} (#{}) placed by client {} with seller {}",
            order.id,
            order.order_number,
            order.client_id,
            order.seller_id
        );

        Ok(order)
    }

    pub async fn list_orders_for_client(&self, client_id: i32) -> Result<Vec<Order>, PostgresError> {
        self.list_orders_by("client_id", client_id).await
    }

    pub async fn list_orders_for_seller(&self, seller_id: i32) -> Result<Vec<Order>, PostgresError> {
        self.list_orders_by("seller_id", seller_id).await
    }

    /// `column` is one of the fixed owner columns, never user input
    async fn list_orders_by(&self, column: &str, owner_id: i32) -> Result<Vec<Order>, PostgresError> {
        let query = format!(
            "SELECT {} FROM orders WHERE {} = $1 ORDER BY ordered_at DESC, id DESC",
            ORDER_COLUMNS, column
        );

        let mut orders = sqlx::query_as::<_, Order>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        self.attach_items(&mut orders).await?;

        Ok(orders)
    }

    async fn attach_items(&self, orders: &mut [Order]) -> Result<(), PostgresError> {
        if orders.is_empty() {
            return Ok(());
        }

        let ids: Vec<i32> = orders.iter().map(|o| o.id).collect();
        let items = sqlx::query_as::<_, OrderItem>(
            r#"
            SELECT id, order_id, cake_id, quantity, unit_price
            FROM order_items
            WHERE order_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(&ids[..])
        .fetch_all(&self.pool)
        .await?;

        let mut by_order: HashMap<i32, Vec<OrderItem>> = HashMap::new();
        for item in items {
            by_order.entry(item.order_id).or_default().push(item);
        }

        for order in orders.iter_mut() {
            order.items = by_order.remove(&order.id).unwrap_or_default();
        }

        Ok(())
    }

    pub async fn update_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<Order, PostgresError> {
        let query = format!(
            "UPDATE orders SET status = $2 WHERE id = $1 RETURNING {}",
            ORDER_COLUMNS
        );

        let order = sqlx::query_as::<_, Order>(&query)
            .bind(order_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("order {}", order_id)))?;

        let mut orders = [order];
        self.attach_items(&mut orders).await?;
        let [order] = orders;

        tracing::info!("Order {} is now {}", order_id, status);

        Ok(order)
    }

    /// Delete an order and its lines; returns whether it existed
    pub async fn delete_order(&self, order_id: i32) -> Result<bool, PostgresError> {
        let result = sqlx::query("DELETE FROM orders WHERE id = $1")
            .bind(order_id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    // ---------------------------------------------------------- custom orders

    pub async fn create_custom_order(
        &self,
        req: &CreateCustomOrderRequest,
    ) -> Result<CustomOrder, PostgresError> {
        let query = format!(
            r#"
            INSERT INTO custom_orders
                (client_id, seller_id, dough, filling, frosting, layers, custom_topper, notes, delivery_date, delivery_time, status)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING {}
            "#,
            CUSTOM_ORDER_COLUMNS
        );

        let order = sqlx::query_as::<_, CustomOrder>(&query)
            .bind(req.client_id)
            .bind(req.seller_id)
            .bind(&req.dough)
            .bind(&req.filling)
            .bind(&req.frosting)
            .bind(req.layers)
            .bind(req.custom_topper)
            .bind(&req.notes)
            .bind(req.delivery_date)
            .bind(&req.delivery_time)
            .bind(OrderStatus::Pending)
            .fetch_one(&self.pool)
            .await?;

        tracing::info!(
            "Custom order {} placed by client {} with seller {}",
            order.id,
            order.client_id,
            order.seller_id
        );

        Ok(order)
    }

    pub async fn get_custom_order(&self, order_id: i32) -> Result<CustomOrder, PostgresError> {
        let query = format!(
            "SELECT {} FROM custom_orders WHERE id = $1",
            CUSTOM_ORDER_COLUMNS
        );

        let order = sqlx::query_as::<_, CustomOrder>(&query)
            .bind(order_id)
            .fetch_optional(&self.pool)
            .await?;

        order.ok_or_else(|| PostgresError::NotFound(format!("custom order {}", order_id)))
    }

    pub async fn list_custom_orders_for_client(
        &self,
        client_id: i32,
    ) -> Result<Vec<CustomOrder>, PostgresError> {
        self.list_custom_orders_by("client_id", client_id).await
    }

    pub async fn list_custom_orders_for_seller(
        &self,
        seller_id: i32,
    ) -> Result<Vec<CustomOrder>, PostgresError> {
        self.list_custom_orders_by("seller_id", seller_id).await
    }

    async fn list_custom_orders_by(
        &self,
        column: &str,
        owner_id: i32,
    ) -> Result<Vec<CustomOrder>, PostgresError> {
        let query = format!(
            "SELECT {} FROM custom_orders WHERE {} = $1 ORDER BY created_at DESC, id DESC",
            CUSTOM_ORDER_COLUMNS, column
        );

        let orders = sqlx::query_as::<_, CustomOrder>(&query)
            .bind(owner_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(orders)
    }

    pub async fn update_custom_order_status(
        &self,
        order_id: i32,
        status: OrderStatus,
    ) -> Result<CustomOrder, PostgresError> {
        let query = format!(
            "UPDATE custom_orders SET status = $2 WHERE id = $1 RETURNING {}",
            CUSTOM_ORDER_COLUMNS
        );

        let order = sqlx::query_as::<_, CustomOrder>(&query)
            .bind(order_id)
            .bind(status)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| PostgresError::NotFound(format!("custom order {}", order_id)))?;

        tracing::info!("Custom order {} is now {}", order_id, status);

        Ok(order)
    }

    /// Health check for the database connection
    pub async fn health_check(&self) -> Result<bool, PostgresError> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_: PgRow| true)
            .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = PostgresError::NotFound("seller 7".to_string());
        assert_eq!(err.to_string(), "Not found: seller 7");
    }

    #[test]
    fn test_row_not_found_stays_sqlx_error() {
        let err = PostgresError::from(sqlx::Error::RowNotFound);
        assert!(matches!(err, PostgresError::SqlxError(sqlx::Error::RowNotFound)));
    }
}
