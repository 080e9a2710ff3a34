use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::product::{ProductId, Size};

/// Composite cart key: product id plus optional size.
///
/// Canonical wire encoding is `"<id>:<size>"`, or a bare `"<id>"` for
/// products without sizing. This is the only encoding read or written;
/// earlier session formats are not recognized.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CartKey {
    pub product_id: ProductId,
    pub size: Option<Size>,
}

impl CartKey {
    pub fn new(product_id: ProductId, size: Option<Size>) -> CartKey {
        CartKey { product_id, size }
    }

    /// Parse the canonical encoding. Returns `None` for malformed keys
    /// (empty id, unknown size tag, extra separators).
    pub fn parse(raw: &str) -> Option<CartKey> {
        let mut parts = raw.split(':');
        let id = parts.next()?;
        if id.is_empty() {
            return None;
        }
        let size = match parts.next() {
            Some(tag) => Some(Size::parse(tag)?),
            None => None,
        };
        if parts.next().is_some() {
            return None;
        }
        Some(CartKey::new(ProductId(id.to_string()), size))
    }
}

impl fmt::Display for CartKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.size {
            Some(size) => write!(f, "{}:{}", self.product_id, size),
            None => write!(f, "{}", self.product_id),
        }
    }
}

/// A single cart slot. Entries with `qty == 0` are treated as absent by the
/// pricing pass even if still present in the map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartEntry {
    pub qty: u32,
}

/// Per-session shopping cart: encoded key → quantity.
///
/// Backed by a `BTreeMap` so derived line items come out in a stable order
/// within a single request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cart {
    #[serde(flatten)]
    pub entries: BTreeMap<String, CartEntry>,
}

impl Cart {
    pub fn new() -> Cart {
        Cart::default()
    }

    /// Add `qty` units, accumulating onto any existing entry.
    pub fn add(&mut self, key: &CartKey, qty: u32) {
        self.entries
            .entry(key.to_string())
            .or_insert(CartEntry { qty: 0 })
            .qty += qty;
    }

    /// Bump an existing entry by one. No-op when the key is not in the cart.
    pub fn increase(&mut self, key: &CartKey) {
        if let Some(entry) = self.entries.get_mut(&key.to_string()) {
            entry.qty += 1;
        }
    }

    /// Lower an existing entry by one, flooring at 1. Decrementing never
    /// removes an entry; [`Cart::remove`] is the only removal path.
    pub fn decrease(&mut self, key: &CartKey) {
        if let Some(entry) = self.entries.get_mut(&key.to_string()) {
            entry.qty = entry.qty.saturating_sub(1).max(1);
        }
    }

    pub fn remove(&mut self, key: &CartKey) {
        self.entries.remove(&key.to_string());
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}
