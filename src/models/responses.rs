use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::models::domain::{Client, Coordinate, Favorite, RatingWithClient, Seller};

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

/// Seller with its distance from the search origin
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySeller {
    #[serde(flatten)]
    pub seller: Seller,
    #[serde(rename = "distanciaKm")]
    pub distance_km: f64,
}

/// Response for the nearby sellers search
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NearbySellersResponse {
    #[serde(rename = "origem")]
    pub origin: Coordinate,
    #[serde(rename = "raioKm")]
    pub radius_km: f64,
    pub total: usize,
    #[serde(rename = "confeiteiras")]
    pub sellers: Vec<NearbySeller>,
}

/// Favorite with the bookmarked seller's current profile
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FavoriteWithSeller {
    #[serde(flatten)]
    pub favorite: Favorite,
    #[serde(rename = "confeiteira")]
    pub seller: Seller,
}

/// Client profile with bookmarked sellers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientProfile {
    #[serde(flatten)]
    pub client: Client,
    #[serde(rename = "favoritos")]
    pub favorites: Vec<FavoriteWithSeller>,
}

impl ClientProfile {
    /// Attach each favorite's seller; favorites keep their order and any
    /// whose seller is missing from `sellers` are left out
    ///
    /// A client bookmarks a seller at most once, so each seller is used once.
    pub fn new(client: Client, favorites: Vec<Favorite>, sellers: Vec<Seller>) -> Self {
        let mut by_id: HashMap<i32, Seller> =
            sellers.into_iter().map(|seller| (seller.id, seller)).collect();

        let favorites = favorites
            .into_iter()
            .filter_map(|favorite| {
                let seller = by_id.remove(&favorite.seller_id)?;
                Some(FavoriteWithSeller { favorite, seller })
            })
            .collect();

        Self { client, favorites }
    }
}

/// Ratings of one seller, newest first
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SellerRatingsResponse {
    #[serde(rename = "avaliacoes")]
    pub ratings: Vec<RatingWithClient>,
    pub total: usize,
    #[serde(rename = "mediaEstrelas")]
    pub average_stars: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seller(id: i32) -> Seller {
        Seller {
            id,
            name: format!("Confeiteira {}", id),
            store_name: format!("Doces {}", id),
            email: format!("{}@example.com", id),
            phone: "11999990000".to_string(),
            address: "Rua das Flores, 10".to_string(),
            description: None,
            image: Some(format!("/uploads/{}.jpg", id)),
            opening_time: None,
            closing_time: None,
            latitude: -23.55,
            longitude: -46.63,
        }
    }

    fn favorite(id: i32, seller_id: i32) -> Favorite {
        Favorite {
            id,
            store_name: format!("Doces {}", seller_id),
            image: Some(format!("/uploads/{}.jpg", seller_id)),
            client_id: 1,
            seller_id,
        }
    }

    fn client() -> Client {
        Client {
            id: 1,
            name: "Bia".to_string(),
            email: "bia@example.com".to_string(),
            phone: "11988887777".to_string(),
            address: None,
        }
    }

    #[test]
    fn test_profile_embeds_seller_in_favorites() {
        let profile = ClientProfile::new(
            client(),
            vec![favorite(10, 3), favorite(11, 2)],
            vec![seller(2), seller(3)],
        );

        let seller_ids: Vec<i32> = profile.favorites.iter().map(|f| f.seller.id).collect();
        assert_eq!(seller_ids, vec![3, 2]);

        let value = serde_json::to_value(&profile).unwrap();
        let first = &value["favoritos"][0];
        assert_eq!(first["id"], json!(10));
        assert_eq!(first["confeiteiraId"], json!(3));
        assert_eq!(first["confeiteira"]["nomeloja"], json!("Doces 3"));
    }

    #[test]
    fn test_profile_skips_favorites_without_seller() {
        let profile = ClientProfile::new(client(), vec![favorite(10, 3), favorite(11, 9)], vec![seller(3)]);
        assert_eq!(profile.favorites.len(), 1);
        assert_eq!(profile.favorites[0].favorite.id, 10);
    }
}
