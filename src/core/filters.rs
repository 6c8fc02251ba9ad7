use crate::models::Seller;

/// Case-insensitive prefix match on a display name
///
/// The prefix is taken verbatim, so an empty prefix matches everything and
/// leading spaces must match too.
#[inline]
pub fn matches_name_prefix(name: &str, prefix: &str) -> bool {
    name.to_lowercase().starts_with(&prefix.to_lowercase())
}

/// Check a seller against the optional name search box value
#[inline]
pub fn matches_seller_name(seller: &Seller, prefix: Option<&str>) -> bool {
    prefix.map_or(true, |prefix| matches_name_prefix(&seller.name, prefix))
}
