//! Black-box test harness for the storefront API.
//!
//! Spawns the full router on an ephemeral port with scratch storage and no
//! outbound gateway/image-host configuration, so every test runs entirely
//! in-process.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;

use wallcraft_server::config::Config;
use wallcraft_server::routes;
use wallcraft_server::state::AppState;

/// Gateway secret the test server verifies capture signatures with.
pub const TEST_KEY_SECRET: &str = "wallcraft-test-secret";

/// A storefront server running for the duration of one test.
pub struct TestServer {
    pub base_url: String,
    pub data_dir: PathBuf,
    // Keeps scratch storage alive for the test's lifetime.
    _tmp: TempDir,
}

impl TestServer {
    /// Spawn the router on an ephemeral port. Gateway order creation is left
    /// unconfigured (empty key id) so checkout never leaves the process;
    /// signature verification uses [`TEST_KEY_SECRET`].
    pub async fn spawn() -> TestServer {
        let tmp = TempDir::new().expect("create temp dir");
        let config = Config {
            addr: "127.0.0.1:0".into(),
            data_dir: tmp.path().to_path_buf(),
            razorpay_key_id: String::new(),
            razorpay_key_secret: TEST_KEY_SECRET.into(),
            imgbb_api_key: String::new(),
        };
        let state = Arc::new(AppState::from_config(&config).await.expect("build state"));
        let app = routes::router(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr: SocketAddr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve");
        });

        TestServer {
            base_url: format!("http://{addr}"),
            data_dir: tmp.path().to_path_buf(),
            _tmp: tmp,
        }
    }

    /// A client that holds session cookies across requests, like a browser.
    pub fn client(&self) -> reqwest::Client {
        reqwest::Client::builder()
            .cookie_store(true)
            .build()
            .expect("build client")
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Compute the capture signature the gateway would send for these ids.
pub fn gateway_signature(order_id: &str, payment_id: &str) -> String {
    use hmac::{Hmac, Mac};
    use sha2::Sha256;

    let mut mac = <Hmac<Sha256>>::new_from_slice(TEST_KEY_SECRET.as_bytes()).expect("hmac key");
    mac.update(format!("{order_id}|{payment_id}").as_bytes());
    hex::encode(mac.finalize().into_bytes())
}
