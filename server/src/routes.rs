//! The storefront JSON API.
//!
//! Shop browsing, session carts, checkout, order placement, reviews and
//! contact messages, plus the unauthenticated admin panel for product CRUD
//! and hosted-image management.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, HeaderValue, Method};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use wallcraft_common::cart::CartKey;
use wallcraft_common::contact::ContactMessage;
use wallcraft_common::order::{CustomerDetails, Order, PaymentRefs};
use wallcraft_common::pricing::{build_line_items, LineItem};
use wallcraft_common::product::{PriceList, Product, ProductId, Size};
use wallcraft_common::review::Review;

use crate::error::AppError;
use crate::images::allowed_file;
use crate::state::AppState;

// ─── API types ───────────────────────────────────────────────────────────────

#[derive(Serialize)]
struct HomeResponse {
    products: Vec<Product>,
    reviews: Vec<Review>,
}

#[derive(Serialize)]
struct CartResponse {
    items: Vec<LineItem>,
    total: u64,
}

#[derive(Deserialize)]
struct AddToCartRequest {
    product_id: ProductId,
    #[serde(default)]
    size: Option<Size>,
    #[serde(default = "default_quantity")]
    quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

#[derive(Deserialize)]
#[serde(rename_all = "lowercase")]
enum CartAction {
    Increase,
    Decrease,
    Remove,
}

#[derive(Deserialize)]
struct UpdateCartRequest {
    product_id: ProductId,
    #[serde(default)]
    size: Option<Size>,
    action: CartAction,
}

#[derive(Serialize)]
struct CheckoutResponse {
    items: Vec<LineItem>,
    total: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    razorpay_order_id: Option<String>,
    razorpay_key_id: String,
}

#[derive(Deserialize)]
struct PlaceOrderRequest {
    name: String,
    mobile: String,
    email: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    razorpay_payment_id: Option<String>,
    #[serde(default)]
    razorpay_order_id: Option<String>,
    #[serde(default)]
    razorpay_signature: Option<String>,
}

#[derive(Serialize)]
struct OrderPlacedResponse {
    order_id: String,
    items: Vec<LineItem>,
    total: u64,
}

#[derive(Deserialize)]
struct SubmitReviewRequest {
    name: String,
    review: String,
    rating: u8,
}

#[derive(Deserialize)]
struct ContactRequest {
    name: String,
    email: String,
    mobile: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    message: String,
}

#[derive(Serialize)]
struct OkResponse {
    ok: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
}

// ─── Admin API types ─────────────────────────────────────────────────────────

/// An image the admin panel submits for hosting.
#[derive(Deserialize)]
struct ImagePayload {
    name: String,
    /// Base64-encoded file bytes.
    data: String,
}

#[derive(Deserialize)]
struct UpsertProductRequest {
    name: String,
    #[serde(default)]
    desc: String,
    #[serde(default)]
    price_small: Option<String>,
    #[serde(default)]
    price_medium: Option<String>,
    #[serde(default)]
    price_large: Option<String>,
    #[serde(default)]
    new: Option<String>,
    #[serde(default)]
    old: Option<String>,
    /// Comma-separated feature list.
    #[serde(default)]
    features: String,
    #[serde(default)]
    images: Vec<ImagePayload>,
}

impl UpsertProductRequest {
    fn price_list(&self) -> PriceList {
        PriceList {
            price_small: self.price_small.clone(),
            price_medium: self.price_medium.clone(),
            price_large: self.price_large.clone(),
            new: self.new.clone(),
            old: self.old.clone(),
        }
    }
}

#[derive(Deserialize)]
struct RemoveImageRequest {
    url: String,
}

#[derive(Deserialize)]
struct ReplaceImageRequest {
    url: String,
    image: ImagePayload,
}

// ─── Shop handlers ───────────────────────────────────────────────────────────

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
    })
}

async fn home(State(state): State<Arc<AppState>>) -> Result<Json<HomeResponse>, AppError> {
    let products = state.catalog.list().await;
    let reviews = reviews_newest_first(&state).await?;
    Ok(Json(HomeResponse { products, reviews }))
}

async fn list_products(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.catalog.list().await)
}

async fn product_detail(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, AppError> {
    state
        .catalog
        .get(&ProductId(id))
        .await
        .map(Json)
        .ok_or(AppError::NotFound)
}

// ─── Cart handlers ───────────────────────────────────────────────────────────

/// Attach a freshly minted session cookie, when there is one.
fn with_session_cookie(cookie: Option<HeaderValue>, mut response: Response) -> Response {
    if let Some(value) = cookie {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

async fn priced_cart(state: &AppState, token: &str) -> CartResponse {
    let cart = state.sessions.cart(token);
    let catalog = state.catalog.list().await;
    let (items, total) = build_line_items(&cart, &catalog);
    CartResponse { items, total }
}

async fn get_cart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (token, cookie) = state.sessions.resolve(&headers);
    let body = priced_cart(&state, &token).await;
    Ok(with_session_cookie(cookie, Json(body).into_response()))
}

async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<AddToCartRequest>,
) -> Result<Response, AppError> {
    if req.quantity == 0 {
        return Err(AppError::BadRequest("quantity must be at least 1".into()));
    }
    let (token, cookie) = state.sessions.resolve(&headers);
    let key = CartKey::new(req.product_id, req.size);
    state.sessions.with_cart(&token, |cart| cart.add(&key, req.quantity));

    let body = priced_cart(&state, &token).await;
    Ok(with_session_cookie(cookie, Json(body).into_response()))
}

async fn update_cart(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<UpdateCartRequest>,
) -> Result<Response, AppError> {
    let (token, cookie) = state.sessions.resolve(&headers);
    let key = CartKey::new(req.product_id, req.size);
    state.sessions.with_cart(&token, |cart| match req.action {
        CartAction::Increase => cart.increase(&key),
        CartAction::Decrease => cart.decrease(&key),
        CartAction::Remove => cart.remove(&key),
    });

    let body = priced_cart(&state, &token).await;
    Ok(with_session_cookie(cookie, Json(body).into_response()))
}

// ─── Checkout handlers ───────────────────────────────────────────────────────

async fn checkout(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let (token, cookie) = state.sessions.resolve(&headers);
    let CartResponse { items, total } = priced_cart(&state, &token).await;

    let razorpay_order_id = if state.payments.is_configured() {
        match state.payments.create_order(total * 100).await {
            Ok(order) => Some(order.id),
            Err(err) => {
                tracing::warn!(error = %err, "gateway order creation failed");
                None
            }
        }
    } else {
        None
    };

    let body = CheckoutResponse {
        items,
        total,
        razorpay_order_id,
        razorpay_key_id: state.payments.key_id().to_string(),
    };
    Ok(with_session_cookie(cookie, Json(body).into_response()))
}

async fn place_order(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(req): Json<PlaceOrderRequest>,
) -> Result<Response, AppError> {
    let (token, cookie) = state.sessions.resolve(&headers);
    let cart = state.sessions.cart(&token);
    if cart.is_empty() {
        return Err(AppError::BadRequest("your cart is empty".into()));
    }

    let refs = match (
        req.razorpay_payment_id,
        req.razorpay_order_id,
        req.razorpay_signature,
    ) {
        (Some(payment_id), Some(order_id), Some(signature))
            if !payment_id.is_empty() && !order_id.is_empty() && !signature.is_empty() =>
        {
            PaymentRefs {
                payment_id,
                order_id,
                signature,
            }
        }
        _ => return Err(AppError::BadRequest("payment info missing".into())),
    };

    if !state
        .payments
        .verify_signature(&refs.order_id, &refs.payment_id, &refs.signature)
    {
        return Err(AppError::PaymentVerification);
    }

    let catalog = state.catalog.list().await;
    let (items, total) = build_line_items(&cart, &catalog);
    let order = Order::place(
        CustomerDetails {
            name: req.name,
            mobile: req.mobile,
            email: req.email,
            address: req.address,
        },
        items,
        total,
        Some(refs),
    );
    state.orders.append(&order).await?;
    state.sessions.clear_cart(&token);
    tracing::info!(order_id = %order.id, total = order.total, "order placed");

    let body = OrderPlacedResponse {
        order_id: order.id.0,
        items: order.items,
        total: order.total,
    };
    Ok(with_session_cookie(cookie, Json(body).into_response()))
}

// ─── Review and contact handlers ─────────────────────────────────────────────

async fn reviews_newest_first(state: &AppState) -> Result<Vec<Review>, AppError> {
    let mut reviews: Vec<Review> = state.reviews.read_all().await?;
    reviews.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    Ok(reviews)
}

async fn list_reviews(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Review>>, AppError> {
    Ok(Json(reviews_newest_first(&state).await?))
}

async fn submit_review(
    State(state): State<Arc<AppState>>,
    Json(req): Json<SubmitReviewRequest>,
) -> Result<Json<OkResponse>, AppError> {
    if req.name.trim().is_empty() || req.review.trim().is_empty() {
        return Err(AppError::BadRequest("name and review are required".into()));
    }
    let review = Review::new(req.name.trim(), &req.review, req.rating);
    state.reviews.append(&review).await?;
    Ok(Json(OkResponse { ok: true }))
}

async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(req): Json<ContactRequest>,
) -> Result<Json<OkResponse>, AppError> {
    if req.name.trim().is_empty() || req.email.trim().is_empty() || req.mobile.trim().is_empty() {
        return Err(AppError::BadRequest(
            "please fill in all required fields".into(),
        ));
    }
    let message =
        ContactMessage::new(&req.name, &req.email, &req.mobile, &req.address, &req.message);
    state.contacts.append(&message).await?;
    Ok(Json(OkResponse { ok: true }))
}

// ─── Admin handlers ──────────────────────────────────────────────────────────

/// Host every acceptable image, dropping failures with a warning. A failed
/// upload costs that image, not the whole save.
async fn upload_images(state: &AppState, images: &[ImagePayload]) -> Vec<String> {
    let mut urls = Vec::new();
    for image in images {
        if !allowed_file(&image.name) {
            tracing::warn!(name = %image.name, "rejecting image with unsupported extension");
            continue;
        }
        let Ok(bytes) = BASE64.decode(&image.data) else {
            tracing::warn!(name = %image.name, "rejecting undecodable image payload");
            continue;
        };
        match state.images.upload(&image.name, &bytes).await {
            Ok(url) => urls.push(url),
            Err(err) => tracing::warn!(name = %image.name, error = %err, "image upload failed"),
        }
    }
    urls
}

fn split_features(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|f| !f.is_empty())
        .map(str::to_string)
        .collect()
}

async fn admin_list_products(State(state): State<Arc<AppState>>) -> Json<Vec<Product>> {
    Json(state.catalog.list().await)
}

async fn admin_add_product(
    State(state): State<Arc<AppState>>,
    Json(req): Json<UpsertProductRequest>,
) -> Result<Json<Product>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::BadRequest("product name is required".into()));
    }
    let imgs = upload_images(&state, &req.images).await;
    let prices = req.price_list();
    let features = split_features(&req.features);
    let product = Product {
        id: ProductId(Utc::now().timestamp().to_string()),
        name: req.name,
        desc: req.desc,
        imgs,
        prices,
        features,
    };
    state.catalog.upsert(product.clone()).await?;
    tracing::info!(product_id = %product.id, "product added");
    Ok(Json(product))
}

async fn admin_update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<UpsertProductRequest>,
) -> Result<Json<Product>, AppError> {
    let id = ProductId(id);
    let new_imgs = upload_images(&state, &req.images).await;
    let prices = req.price_list();
    let features = split_features(&req.features);
    let found = state
        .catalog
        .modify(&id, |product| {
            product.name = req.name;
            product.desc = req.desc;
            product.prices = prices;
            product.features = features;
            product.imgs.extend(new_imgs);
        })
        .await?;
    if !found {
        return Err(AppError::NotFound);
    }
    let product = state.catalog.get(&id).await.ok_or(AppError::NotFound)?;
    Ok(Json(product))
}

async fn admin_delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<OkResponse>, AppError> {
    if !state.catalog.delete(&ProductId(id)).await? {
        return Err(AppError::NotFound);
    }
    Ok(Json(OkResponse { ok: true }))
}

async fn admin_remove_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<RemoveImageRequest>,
) -> Result<Json<OkResponse>, AppError> {
    let found = state
        .catalog
        .modify(&ProductId(id), |product| {
            product.imgs.retain(|img| *img != req.url);
        })
        .await?;
    if !found {
        return Err(AppError::NotFound);
    }
    Ok(Json(OkResponse { ok: true }))
}

async fn admin_replace_image(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    Json(req): Json<ReplaceImageRequest>,
) -> Result<Json<OkResponse>, AppError> {
    if !allowed_file(&req.image.name) {
        return Err(AppError::BadRequest("unsupported image type".into()));
    }
    let bytes = BASE64
        .decode(&req.image.data)
        .map_err(|_| AppError::BadRequest("image payload is not valid base64".into()))?;
    let new_url = state.images.upload(&req.image.name, &bytes).await.map_err(|err| {
        tracing::warn!(error = %err, "image upload failed");
        AppError::BadRequest("image upload failed".into())
    })?;

    let mut replaced = false;
    let found = state
        .catalog
        .modify(&ProductId(id), |product| {
            if let Some(slot) = product.imgs.iter_mut().find(|img| **img == req.url) {
                *slot = new_url;
                replaced = true;
            }
        })
        .await?;
    if !found {
        return Err(AppError::NotFound);
    }
    if !replaced {
        return Err(AppError::BadRequest("original image not found".into()));
    }
    Ok(Json(OkResponse { ok: true }))
}

// ─── Router ──────────────────────────────────────────────────────────────────

/// Build the full API router over shared state.
pub fn router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/api/home", get(home))
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(product_detail))
        .route("/api/cart", get(get_cart))
        .route("/api/cart/add", post(add_to_cart))
        .route("/api/cart/update", post(update_cart))
        .route("/api/checkout", get(checkout))
        .route("/api/orders", post(place_order))
        .route("/api/reviews", get(list_reviews).post(submit_review))
        .route("/api/contact", post(submit_contact))
        .route(
            "/api/admin/products",
            get(admin_list_products).post(admin_add_product),
        )
        .route(
            "/api/admin/products/{id}",
            put(admin_update_product).delete(admin_delete_product),
        )
        .route("/api/admin/products/{id}/images/remove", post(admin_remove_image))
        .route(
            "/api/admin/products/{id}/images/replace",
            post(admin_replace_image),
        )
        .layer(cors)
        .with_state(state)
}
