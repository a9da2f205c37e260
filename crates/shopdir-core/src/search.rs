//! Free-text and moderation filters over shop listings.

use crate::shop::ShopRecord;

/// Shops whose name, description or address contains `query`, case-insensitively.
///
/// A blank query returns every shop.
#[must_use]
pub fn search_shops<'a>(shops: &'a [ShopRecord], query: &str) -> Vec<&'a ShopRecord> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return shops.iter().collect();
    }

    shops
        .iter()
        .filter(|shop| {
            shop.name.to_lowercase().contains(&needle)
                || shop.description.to_lowercase().contains(&needle)
                || shop.address.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Keeps only shops explicitly marked as approved; unflagged shops are pending.
#[must_use]
pub fn approved_only(shops: Vec<ShopRecord>) -> Vec<ShopRecord> {
    shops
        .into_iter()
        .filter(|shop| shop.approved == Some(true))
        .collect()
}
