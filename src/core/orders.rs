use crate::models::OrderItemRequest;

/// Order numbers are shown to customers and kept to nine digits
const ORDER_NUMBER_MODULUS: i64 = 1_000_000_000;

/// Sum of quantity times unit price over all lines
pub fn order_total(items: &[OrderItemRequest]) -> f64 {
    items
        .iter()
        .map(|item| item.quantity as f64 * item.unit_price)
        .sum()
}

/// Build a customer-facing order number from a timestamp and a random salt
///
/// The millisecond timestamp is followed by three salt digits and the result
/// truncated to its last nine digits. Uniqueness is enforced by the database.
pub fn order_number(timestamp_millis: i64, salt: u16) -> i64 {
    let raw = timestamp_millis
        .rem_euclid(ORDER_NUMBER_MODULUS)
        .wrapping_mul(1000)
        + i64::from(salt % 1000);
    raw.rem_euclid(ORDER_NUMBER_MODULUS)
}

/// Fresh order number for the current instant
pub fn generate_order_number() -> i64 {
    let salt = (uuid::Uuid::new_v4().as_u128() % 1000) as u16;
    order_number(chrono::Utc::now().timestamp_millis(), salt)
}

/// Mean star count, or `None` when there are no ratings
pub fn average_stars<I>(stars: I) -> Option<f64>
where
    I: IntoIterator<Item = i16>,
{
    let (sum, count) = stars
        .into_iter()
        .fold((0.0, 0usize), |(sum, count), s| (sum + f64::from(s), count + 1));
    (count > 0).then(|| sum / count as f64)
}
