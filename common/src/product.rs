use std::fmt;

use serde::{Deserialize, Serialize};

use crate::money;

/// Unique product identifier. The admin panel mints these from a unix
/// timestamp; older catalog sources used small integers, so deserialization
/// accepts either a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ProductId(pub String);

impl<'de> Deserialize<'de> for ProductId {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Num(u64),
            Text(String),
        }
        Ok(match Raw::deserialize(deserializer)? {
            Raw::Num(n) => ProductId(n.to_string()),
            Raw::Text(s) => ProductId(s),
        })
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Panel size a price can be quoted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Size {
    Small,
    Medium,
    Large,
}

impl Size {
    pub fn as_str(self) -> &'static str {
        match self {
            Size::Small => "small",
            Size::Medium => "medium",
            Size::Large => "large",
        }
    }

    /// Parse the lowercase size tag. Unknown tags return `None`.
    pub fn parse(tag: &str) -> Option<Size> {
        match tag {
            "small" => Some(Size::Small),
            "medium" => Some(Size::Medium),
            "large" => Some(Size::Large),
            _ => None,
        }
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Price fields carried by a product: either a size-keyed map
/// (`price_small`/`price_medium`/`price_large`) or a single current/former
/// pair (`new`/`old`). Values are display strings (see [`money`]).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceList {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_small: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_medium: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_large: Option<String>,
    /// Current price for products without sizing.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub new: Option<String>,
    /// Former price, shown struck through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old: Option<String>,
}

impl PriceList {
    pub fn sized(small: &str, medium: &str, large: &str) -> PriceList {
        PriceList {
            price_small: Some(small.to_string()),
            price_medium: Some(medium.to_string()),
            price_large: Some(large.to_string()),
            new: None,
            old: None,
        }
    }

    pub fn single(new: &str) -> PriceList {
        PriceList {
            new: Some(new.to_string()),
            ..PriceList::default()
        }
    }

    fn for_size(&self, size: Size) -> Option<&String> {
        match size {
            Size::Small => self.price_small.as_ref(),
            Size::Medium => self.price_medium.as_ref(),
            Size::Large => self.price_large.as_ref(),
        }
    }

    /// Resolve the unit price in whole rupees.
    ///
    /// Single-price products resolve to their current price regardless of the
    /// requested size; sized products resolve the matching size field, `0`
    /// when no size was requested or the field is absent.
    pub fn resolve(&self, size: Option<Size>) -> u64 {
        if let Some(new) = &self.new {
            return money::parse(new);
        }
        match size {
            Some(s) => money::parse_opt(self.for_size(s).map(String::as_str)),
            None => 0,
        }
    }
}

/// A catalog product. The id is immutable once created; the image list is
/// mutable through the admin panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub desc: String,
    /// Hosted image URLs in display order. May be empty.
    #[serde(default)]
    pub imgs: Vec<String>,
    #[serde(flatten)]
    pub prices: PriceList,
    #[serde(default)]
    pub features: Vec<String>,
}

impl Product {
    /// Representative image for listings and line items: the first image, or
    /// the empty-string placeholder when the product has none.
    pub fn first_image(&self) -> &str {
        self.imgs.first().map(String::as_str).unwrap_or("")
    }
}

/// Fallback catalog used when no product source is available.
pub fn seed_products() -> Vec<Product> {
    vec![Product {
        id: ProductId("1".into()),
        name: "Golden Glow Panel".into(),
        desc: "Handcrafted golden-accent Wall Craft panel.".into(),
        imgs: vec!["https://i.ibb.co/DfdkKCgk/about2-jpg.jpg".into()],
        prices: PriceList::sized("₹9,999", "₹12,999", "₹15,999"),
        features: Vec::new(),
    }]
}
