//! Cookie-keyed session store for shopping carts.
//!
//! The cookie carries only a random token; carts live server-side for the
//! lifetime of the process.

use axum::http::header::COOKIE;
use axum::http::{HeaderMap, HeaderValue};
use dashmap::DashMap;
use rand::RngCore;

use wallcraft_common::cart::Cart;

const SESSION_COOKIE: &str = "wallcraft_session";

#[derive(Default)]
pub struct Sessions {
    carts: DashMap<String, Cart>,
}

impl Sessions {
    pub fn new() -> Sessions {
        Sessions::default()
    }

    /// Resolve the session token from request headers, minting one when
    /// absent. Returns the token and, for new sessions, the Set-Cookie
    /// value the response must carry.
    pub fn resolve(&self, headers: &HeaderMap) -> (String, Option<HeaderValue>) {
        if let Some(token) = request_token(headers) {
            // Tokens from before a restart are adopted with a fresh cart.
            self.carts.entry(token.clone()).or_default();
            return (token, None);
        }

        let token = new_token();
        self.carts.insert(token.clone(), Cart::new());
        let cookie = format!("{SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax");
        (token, HeaderValue::from_str(&cookie).ok())
    }

    /// Snapshot of the session's cart.
    pub fn cart(&self, token: &str) -> Cart {
        self.carts
            .get(token)
            .map(|entry| entry.clone())
            .unwrap_or_default()
    }

    /// Apply `f` to the session's cart.
    pub fn with_cart<F: FnOnce(&mut Cart)>(&self, token: &str, f: F) {
        let mut entry = self.carts.entry(token.to_string()).or_default();
        f(&mut entry);
    }

    /// Drop the session's cart after a completed order.
    pub fn clear_cart(&self, token: &str) {
        self.carts.remove(token);
    }
}

fn request_token(headers: &HeaderMap) -> Option<String> {
    let cookies = headers.get(COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let (name, value) = pair.trim().split_once('=')?;
        (name == SESSION_COOKIE).then(|| value.to_string())
    })
}

fn new_token() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
