use std::path::PathBuf;

use clap::Parser;

#[derive(Debug, Parser)]
#[command(name = "wallcraft-server", about = "Wall Craft storefront API server")]
pub struct Cli {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:5000")]
    pub addr: String,

    /// Directory holding the catalog file and document logs.
    #[arg(long, default_value = "data")]
    pub data_dir: PathBuf,
}

/// Runtime configuration: CLI flags plus environment credentials.
#[derive(Debug, Clone)]
pub struct Config {
    pub addr: String,
    pub data_dir: PathBuf,
    /// Gateway key id. Empty disables gateway order creation; checkout still
    /// works, the gateway order id is simply absent.
    pub razorpay_key_id: String,
    /// Gateway key secret, used for capture-signature verification.
    pub razorpay_key_secret: String,
    /// Image host API key. Empty disables uploads.
    pub imgbb_api_key: String,
}

impl Config {
    pub fn from_cli(cli: Cli) -> Config {
        Config {
            addr: cli.addr,
            data_dir: cli.data_dir,
            razorpay_key_id: env_or("RAZORPAY_KEY_ID", ""),
            razorpay_key_secret: env_or("RAZORPAY_KEY_SECRET", ""),
            imgbb_api_key: env_or("IMGBB_API_KEY", ""),
        }
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
