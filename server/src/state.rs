use anyhow::{Context, Result};

use crate::catalog::Catalog;
use crate::config::Config;
use crate::images::ImgBbClient;
use crate::payments::RazorpayClient;
use crate::session::Sessions;
use crate::store::DocumentLog;

/// Shared application state, held behind an `Arc` by every handler.
pub struct AppState {
    pub catalog: Catalog,
    pub sessions: Sessions,
    pub orders: DocumentLog,
    pub reviews: DocumentLog,
    pub contacts: DocumentLog,
    pub payments: RazorpayClient,
    pub images: ImgBbClient,
}

impl AppState {
    /// Build state from configuration, creating the data dir as needed.
    pub async fn from_config(config: &Config) -> Result<AppState> {
        tokio::fs::create_dir_all(&config.data_dir)
            .await
            .with_context(|| format!("creating data dir {}", config.data_dir.display()))?;
        Ok(AppState {
            catalog: Catalog::open(&config.data_dir).await,
            sessions: Sessions::new(),
            orders: DocumentLog::new(&config.data_dir, "orders.jsonl"),
            reviews: DocumentLog::new(&config.data_dir, "reviews.jsonl"),
            contacts: DocumentLog::new(&config.data_dir, "contacts.jsonl"),
            payments: RazorpayClient::new(&config.razorpay_key_id, &config.razorpay_key_secret),
            images: ImgBbClient::new(&config.imgbb_api_key),
        })
    }
}
