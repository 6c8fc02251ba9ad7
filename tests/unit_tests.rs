// Unit tests for the Confeitaria API core

use confeitaria_api::core::{
    distance::{distance_between, haversine_distance},
    filters::matches_name_prefix,
    orders::{average_stars, order_total},
    proximity::{self, filter_with_distance},
};
use confeitaria_api::models::{Coordinate, OrderItemRequest, ProximityQuery, Seller};

fn create_seller(id: i32, name: &str, latitude: f64, longitude: f64) -> Seller {
    Seller {
        id,
        name: name.to_string(),
        store_name: format!("Doces {}", name),
        email: format!("{}@example.com", id),
        phone: "11999990000".to_string(),
        address: "Rua das Flores, 10".to_string(),
        description: None,
        image: Some(format!("/uploads/{}.jpg", id)),
        opening_time: Some("08:00".to_string()),
        closing_time: Some("18:00".to_string()),
        latitude,
        longitude,
    }
}

fn ids(sellers: &[&Seller]) -> Vec<i32> {
    sellers.iter().map(|s| s.id).collect()
}

#[test]
fn test_haversine_distance_zero() {
    let distance = haversine_distance(-23.5505, -46.6333, -23.5505, -46.6333);
    assert!(distance < 0.01);
}

#[test]
fn test_haversine_distance_sao_paulo_to_rio() {
    // Roughly 360 km in a straight line
    let distance = haversine_distance(-23.5505, -46.6333, -22.9068, -43.1729);
    assert!(distance > 350.0 && distance < 370.0, "got {}", distance);
}

#[test]
fn test_equator_degree_fixture() {
    let distance = distance_between(Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0));
    assert!((distance - 111.19).abs() < 0.5, "got {}", distance);
}

#[test]
fn test_distance_symmetry() {
    let points = [
        Coordinate::new(0.0, 0.0),
        Coordinate::new(-23.5505, -46.6333),
        Coordinate::new(51.5074, -0.1278),
        Coordinate::new(-33.8688, 151.2093),
    ];

    for a in points {
        for b in points {
            let ab = distance_between(a, b);
            let ba = distance_between(b, a);
            assert!((ab - ba).abs() < 1e-9, "{:?} <-> {:?}: {} vs {}", a, b, ab, ba);
        }
    }
}

#[test]
fn test_zero_radius_returns_only_sellers_at_origin() {
    let origin = Coordinate::new(-23.5505, -46.6333);
    let sellers = vec![
        create_seller(1, "Ana", -23.5505, -46.6333),
        create_seller(2, "Bia", -23.5600, -46.6333),
    ];

    let kept = proximity::filter(origin, 0.0, &sellers);
    assert_eq!(ids(&kept), vec![1]);
}

#[test]
fn test_unbounded_radius_preserves_order() {
    let sellers = vec![
        create_seller(3, "Carla", 40.0, -74.0),
        create_seller(1, "Ana", -23.5, -46.6),
        create_seller(2, "Bia", 35.6, 139.7),
    ];

    let kept = proximity::filter(Coordinate::new(0.0, 0.0), f64::INFINITY, &sellers);
    assert_eq!(ids(&kept), vec![3, 1, 2]);
}

#[test]
fn test_fixture_radius_inclusion() {
    let origin = Coordinate::new(0.0, 0.0);
    let sellers = vec![create_seller(1, "Ana", 0.0, 1.0)];

    assert!(proximity::filter(origin, 100.0, &sellers).is_empty());
    assert_eq!(ids(&proximity::filter(origin, 112.0, &sellers)), vec![1]);
}

#[test]
fn test_boundary_distance_is_included() {
    let origin = Coordinate::new(-23.5505, -46.6333);
    let seller = create_seller(1, "Ana", -22.9068, -43.1729);
    let exact = distance_between(origin, Coordinate::new(seller.latitude, seller.longitude));

    let sellers = vec![seller];
    assert_eq!(proximity::filter(origin, exact, &sellers).len(), 1);
    assert!(proximity::filter(origin, exact - 1e-6, &sellers).is_empty());
}

#[test]
fn test_filter_is_idempotent() {
    let origin = Coordinate::new(-23.5505, -46.6333);
    let sellers: Vec<Seller> = (0..50)
        .map(|i| create_seller(i, "Ana", -23.5505 + i as f64 * 0.05, -46.6333))
        .collect();

    let first = ids(&proximity::filter(origin, 20.0, &sellers));
    let second = ids(&proximity::filter(origin, 20.0, &sellers));
    assert_eq!(first, second);
    assert!(!first.is_empty() && first.len() < sellers.len());
}

#[test]
fn test_filter_with_distance_matches_filter() {
    let origin = Coordinate::new(-23.5505, -46.6333);
    let sellers: Vec<Seller> = (0..20)
        .map(|i| create_seller(i, "Ana", -23.5505, -46.6333 + i as f64 * 0.1))
        .collect();

    let query = ProximityQuery::new(origin, 50.0);
    let with_distance = filter_with_distance(&query, &sellers);
    let plain = proximity::filter(origin, 50.0, &sellers);

    let with_distance_ids: Vec<i32> = with_distance.iter().map(|(s, _)| s.id).collect();
    assert_eq!(with_distance_ids, ids(&plain));
    assert!(with_distance.iter().all(|(_, d)| *d <= 50.0));
}

#[test]
fn test_out_of_range_origin_is_not_an_error() {
    let sellers = vec![create_seller(1, "Ana", 0.0, 0.0)];
    let kept = proximity::filter(Coordinate::new(200.0, 400.0), f64::INFINITY, &sellers);
    assert_eq!(kept.len(), 1);
}

#[test]
fn test_name_prefix() {
    assert!(matches_name_prefix("Ana Maria", "an"));
    assert!(!matches_name_prefix("Ana Maria", "maria"));
}

#[test]
fn test_order_total_and_average() {
    let items = vec![
        OrderItemRequest { cake_id: 1, quantity: 3, unit_price: 40.0 },
        OrderItemRequest { cake_id: 2, quantity: 1, unit_price: 15.5 },
    ];
    assert!((order_total(&items) - 135.5).abs() < 1e-9);
    assert_eq!(average_stars(vec![1, 2, 3, 4, 5]), Some(3.0));
}
