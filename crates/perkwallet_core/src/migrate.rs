//! One-time data-shape migrations run by the host at startup.
//!
//! Old data files used a wider, since-consolidated set of category names.
//! Rather than keeping backward-compatible decode branches in the type
//! itself, the host rewrites raw rows through `canonical_category` before
//! deserializing into the typed model.

use crate::model::Category;

/// Map a stored category name - current or retired - onto the consolidated
/// set. Unrecognized names fall back to `Other` rather than failing the
/// load.
pub fn canonical_category(raw: &str) -> Category {
    match raw.trim().to_ascii_lowercase().as_str() {
        "dining" | "food" | "restaurants" | "food_delivery" | "fooddelivery" => Category::Dining,
        "travel" | "airline" | "hotel" | "lounge" | "tsa" => Category::Travel,
        "shopping" | "retail" | "online_shopping" => Category::Shopping,
        "entertainment" | "streaming" | "media" | "digital" => Category::Entertainment,
        "grocery" | "groceries" | "supermarket" => Category::Grocery,
        "transit" | "rideshare" | "commute" | "gas" | "parking" => Category::Transit,
        "wellness" | "fitness" | "gym" | "health" => Category::Wellness,
        _ => Category::Other,
    }
}
