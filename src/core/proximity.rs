use crate::core::distance::distance_between;
use crate::models::{Coordinate, ProximityQuery, Seller};

/// Anything with a position on the map
pub trait Located {
    fn coordinate(&self) -> Coordinate;
}

impl Located for Coordinate {
    fn coordinate(&self) -> Coordinate {
        *self
    }
}

impl Located for Seller {
    fn coordinate(&self) -> Coordinate {
        Coordinate::new(self.latitude, self.longitude)
    }
}

impl<T: Located + ?Sized> Located for &T {
    fn coordinate(&self) -> Coordinate {
        (**self).coordinate()
    }
}

impl ProximityQuery {
    pub fn new(origin: Coordinate, radius_km: f64) -> Self {
        Self { origin, radius_km }
    }

    /// Distance in kilometers from the query origin
    #[inline]
    pub fn distance_to<L: Located>(&self, item: &L) -> f64 {
        distance_between(self.origin, item.coordinate())
    }

    /// Inclusive radius test. A NaN distance never passes.
    #[inline]
    pub fn contains<L: Located>(&self, item: &L) -> bool {
        self.distance_to(item) <= self.radius_km
    }
}

/// Keep every item whose great-circle distance from `origin` is at most
/// `radius_km`, in input order.
///
/// Coordinates are not validated; the caller decides whether a missing or
/// out-of-range origin should stop the request before getting here.
pub fn filter<I, L>(origin: Coordinate, radius_km: f64, items: I) -> Vec<L>
where
    I: IntoIterator<Item = L>,
    L: Located,
{
    let query = ProximityQuery::new(origin, radius_km);
    items.into_iter().filter(|item| query.contains(item)).collect()
}

/// Same inclusion rule as [`filter`], keeping the computed distance next to
/// each item so it can be reported back.
pub fn filter_with_distance<I, L>(query: &ProximityQuery, items: I) -> Vec<(L, f64)>
where
    I: IntoIterator<Item = L>,
    L: Located,
{
    items
        .into_iter()
        .filter_map(|item| {
            let distance_km = query.distance_to(&item);
            (distance_km <= query.radius_km).then_some((item, distance_km))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seller(id: i32, latitude: f64, longitude: f64) -> Seller {
        Seller {
            id,
            name: format!("Confeiteira {}", id),
            store_name: format!("Doces {}", id),
            email: format!("c{}@example.com", id),
            phone: "11999990000".to_string(),
            address: "Rua das Flores, 10".to_string(),
            description: None,
            image: Some(format!("/uploads/{}.jpg", id)),
            opening_time: None,
            closing_time: None,
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_zero_radius_keeps_only_origin() {
        let origin = Coordinate::new(-23.5505, -46.6333);
        let sellers = vec![
            seller(1, -23.5505, -46.6333),
            seller(2, -23.5510, -46.6333),
            seller(3, -23.5505, -46.6333),
        ];

        let nearby = filter(origin, 0.0, &sellers);
        let ids: Vec<i32> = nearby.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_infinite_radius_keeps_everything_in_order() {
        let sellers = vec![
            seller(7, 10.0, 10.0),
            seller(2, -80.0, 170.0),
            seller(5, 45.0, -120.0),
        ];

        let nearby = filter(Coordinate::new(0.0, 0.0), f64::INFINITY, sellers.clone());
        let ids: Vec<i32> = nearby.iter().map(|s| s.id).collect();
        assert_eq!(ids, vec![7, 2, 5]);
    }

    #[test]
    fn test_one_degree_fixture() {
        let origin = Coordinate::new(0.0, 0.0);
        let sellers = vec![seller(1, 0.0, 1.0)];

        assert!(filter(origin, 100.0, &sellers).is_empty());
        assert_eq!(filter(origin, 112.0, &sellers).len(), 1);
    }

    #[test]
    fn test_boundary_is_inclusive() {
        let origin = Coordinate::new(0.0, 0.0);
        let target = seller(1, 0.0, 1.0);
        let exact = distance_between(origin, target.coordinate());

        let query = ProximityQuery::new(origin, exact);
        assert!(query.contains(&target));
    }

    #[test]
    fn test_nan_seller_is_excluded() {
        let sellers = vec![seller(1, f64::NAN, 0.0), seller(2, 0.0, 0.0)];

        let nearby = filter(Coordinate::new(0.0, 0.0), f64::INFINITY, &sellers);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].id, 2);
    }

    #[test]
    fn test_filter_with_distance_reports_distance() {
        let query = ProximityQuery::new(Coordinate::new(0.0, 0.0), 200.0);
        let sellers = vec![seller(1, 0.0, 1.0), seller(2, 0.0, 5.0)];

        let nearby = filter_with_distance(&query, &sellers);
        assert_eq!(nearby.len(), 1);
        assert_eq!(nearby[0].0.id, 1);
        assert!((nearby[0].1 - 111.19).abs() < 0.5);
    }
}
