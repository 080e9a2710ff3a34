use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::pricing::LineItem;

/// Unique order identifier (timestamp-based).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Opaque payment-gateway handles attached to a paid order. The gateway
/// signature must be verified before an order carrying these is trusted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentRefs {
    pub payment_id: String,
    pub order_id: String,
    pub signature: String,
}

/// Customer contact details captured at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerDetails {
    pub name: String,
    pub mobile: String,
    pub email: String,
    pub address: String,
}

/// A placed order. Created once at successful checkout, immutable
/// thereafter; the order store is append-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    #[serde(flatten)]
    pub customer: CustomerDetails,
    /// Line items at time of purchase.
    pub items: Vec<LineItem>,
    /// Sum of line subtotals in whole rupees.
    pub total: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment: Option<PaymentRefs>,
    pub created_at: DateTime<Utc>,
}

impl Order {
    /// Assemble an order from priced line items, minting a timestamp-based id.
    pub fn place(
        customer: CustomerDetails,
        items: Vec<LineItem>,
        total: u64,
        payment: Option<PaymentRefs>,
    ) -> Order {
        let now = Utc::now();
        Order {
            id: OrderId(format!("o-{}", now.timestamp_millis())),
            customer,
            items,
            total,
            payment,
            created_at: now,
        }
    }
}
