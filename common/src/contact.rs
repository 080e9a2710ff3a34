use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A message sent through the contact form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactMessage {
    pub name: String,
    pub email: String,
    pub mobile: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub message: String,
    pub created_at: DateTime<Utc>,
}

impl ContactMessage {
    pub fn new(name: &str, email: &str, mobile: &str, address: &str, message: &str) -> ContactMessage {
        ContactMessage {
            name: name.to_string(),
            email: email.to_string(),
            mobile: mobile.to_string(),
            address: address.to_string(),
            message: message.to_string(),
            created_at: Utc::now(),
        }
    }
}
