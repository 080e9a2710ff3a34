//! The pricing/cart calculator: a pure transformation from (cart, catalog)
//! to priced line items and a grand total.

use serde::{Deserialize, Serialize};

use crate::cart::{Cart, CartKey};
use crate::product::{Product, ProductId, Size};

/// One priced cart row. Derived fresh on every request and embedded verbatim
/// in orders at checkout; never stored on its own.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineItem {
    pub product_id: ProductId,
    pub name: String,
    /// Representative image: the product's first, empty when it has none.
    pub img: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<Size>,
    /// Unit price in whole rupees.
    pub price: u64,
    pub qty: u32,
    /// `price * qty`.
    pub subtotal: u64,
}

/// Price every cart entry against the catalog.
///
/// Returns line items in cart iteration order together with the grand total
/// (sum of subtotals). Fail-soft by policy: malformed keys and entries
/// referencing unknown products are skipped with a warning, zero-quantity
/// entries are treated as absent, and unparsable prices resolve to zero.
/// Nothing here fails outward.
pub fn build_line_items(cart: &Cart, catalog: &[Product]) -> (Vec<LineItem>, u64) {
    let mut items = Vec::new();
    let mut total: u64 = 0;

    for (raw_key, entry) in &cart.entries {
        let Some(key) = CartKey::parse(raw_key) else {
            tracing::warn!(key = %raw_key, "skipping malformed cart entry");
            continue;
        };
        if entry.qty == 0 {
            continue;
        }
        let Some(product) = catalog.iter().find(|p| p.id == key.product_id) else {
            tracing::warn!(key = %raw_key, "skipping cart entry for unknown product");
            continue;
        };

        let price = product.prices.resolve(key.size);
        let subtotal = price * u64::from(entry.qty);
        total += subtotal;
        items.push(LineItem {
            product_id: product.id.clone(),
            name: product.name.clone(),
            img: product.first_image().to_string(),
            size: key.size,
            price,
            qty: entry.qty,
            subtotal,
        });
    }

    (items, total)
}
