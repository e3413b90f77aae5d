//! Integration tests for Shopdesk.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p shopdesk-integration-tests
//! ```
//!
//! No external services are needed. Each test starts a [`FakeBackend`]: an
//! in-process axum server on an ephemeral port that speaks the store
//! backend's admin API, keeps its records in memory, and remembers every
//! request it received so tests can assert on the wire traffic.
//!
//! # Test Categories
//!
//! - `console_session` - Login, logout, and the authentication gate
//! - `console_catalog` - Product listing, search, and mutations
//! - `console_carts` - Cart status changes and deletions with notifications
//! - `console_comments` - Replies and their notifications
//! - `console_notifications` - Notification review and the dashboard

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use axum::body::Bytes;
use axum::extract::{Multipart, State};
use axum::http::{HeaderMap, Method, StatusCode, Uri};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use serde_json::{Map, Value, json};
use shopdesk_admin::backend::routes;
use shopdesk_admin::{AdminConfig, Console, NoticeLog};
use tokio::net::TcpListener;
use url::Url;

pub const ADMIN_EMAIL: &str = "admin@shop.test";
pub const ADMIN_PASSWORD: &str = "correct horse";
pub const ADMIN_TOKEN: &str = "tok-1234";

/// A request the fake backend received.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: Method,
    /// Path without the leading slash, e.g. `api/admin/all-carts`.
    pub path: String,
    /// Value of the `aToken` header.
    pub token: Option<String>,
    /// JSON body, or an object of text fields for multipart bodies.
    pub body: Value,
}

#[derive(Default)]
struct Records {
    products: Vec<Value>,
    carts: Vec<Value>,
    comments: Vec<Value>,
    replies: Vec<Value>,
    notifications: Vec<Value>,
    requests: Vec<RecordedRequest>,
    failing: HashSet<String>,
    reject_all_tokens: bool,
    next_id: u32,
}

impl Records {
    fn id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{prefix}{}", self.next_id)
    }
}

/// In-memory stand-in for the store backend.
#[derive(Clone)]
pub struct FakeBackend {
    records: Arc<Mutex<Records>>,
    base_url: Url,
}

impl FakeBackend {
    /// Start a backend seeded with a small catalog, two carts, one comment,
    /// and one notification.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    pub async fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind ephemeral port");
        let addr = listener.local_addr().expect("local addr");
        let base_url = Url::parse(&format!("http://{addr}/")).expect("base url");

        let backend = Self {
            records: Arc::new(Mutex::new(seed())),
            base_url,
        };

        let app = Router::new()
            .route(&format!("/{}", routes::ADD_PRODUCT), post(add_product))
            .route(&format!("/{}", routes::UPDATE_PRODUCT), post(update_product))
            .fallback(dispatch)
            .with_state(backend.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("fake backend crashed");
        });

        backend
    }

    #[must_use]
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Open a console against this backend with a file-backed session in
    /// `dir`.
    ///
    /// # Panics
    ///
    /// Panics if the console cannot be opened.
    pub async fn console(&self, dir: &std::path::Path, notices: &NoticeLog) -> Console {
        let config = AdminConfig::for_backend(self.base_url.clone(), dir.join("session.json"));
        Console::open(config, Arc::new(notices.clone()))
            .await
            .expect("open console")
    }

    /// Make every request to `route` answer `success: false`.
    pub fn fail_route(&self, route: &str) {
        self.lock().failing.insert(route.to_string());
    }

    /// Answer 401 to every authenticated request.
    pub fn reject_all_tokens(&self) {
        self.lock().reject_all_tokens = true;
    }

    #[must_use]
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.lock().requests.clone()
    }

    /// Requests whose path starts with `route`.
    #[must_use]
    pub fn requests_to(&self, route: &str) -> Vec<RecordedRequest> {
        self.lock()
            .requests
            .iter()
            .filter(|r| r.path.starts_with(route))
            .cloned()
            .collect()
    }

    /// Bodies of every notification the console created.
    #[must_use]
    pub fn created_notifications(&self) -> Vec<Value> {
        self.requests_to(routes::CREATE_NOTIFICATION)
            .into_iter()
            .map(|r| r.body)
            .collect()
    }

    #[must_use]
    pub fn products(&self) -> Vec<Value> {
        self.lock().products.clone()
    }

    #[must_use]
    pub fn replies(&self) -> Vec<Value> {
        self.lock().replies.clone()
    }

    fn lock(&self) -> MutexGuard<'_, Records> {
        self.records.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

fn seed() -> Records {
    Records {
        products: vec![
            json!({
                "_id": "p1", "name": "iPhone 12", "brand": "Apple", "price": 15990000,
                "category": "Smartphone", "description": "A14 Bionic", "stock_quantity": 12,
                "specifications": {"RAM": "4GB", "Storage": "128GB"},
                "available": true, "bestseller": false, "image_url": "https://cdn.shop.test/p1.png"
            }),
            json!({
                "_id": "p2", "name": "Dell XPS", "brand": "Dell", "price": 32990000,
                "category": "Laptop", "description": "13 inch ultrabook", "stock_quantity": 4,
                "specifications": {"RAM": "16GB"},
                "available": true, "bestseller": true, "image_url": "https://cdn.shop.test/p2.png"
            }),
        ],
        carts: vec![
            json!({
                "_id": "c1", "userId": "u1", "itemData": {"name": "Phone X", "image_url": "x.png"},
                "totalItems": 2, "totalPrice": 39980000, "status": "processing"
            }),
            json!({
                "_id": "c2", "userId": "u2", "itemData": {"name": "Dell XPS", "image_url": "p2.png"},
                "totalItems": 1, "totalPrice": 32990000, "status": "processing"
            }),
        ],
        comments: vec![json!({
            "_id": "m1", "userId": "u3",
            "userData": {"name": "Lan", "image": "lan.png"},
            "productData": {"name": "iPhone 12"},
            "text": "Does it support dual SIM?"
        })],
        replies: Vec::new(),
        notifications: vec![json!({
            "_id": "n1", "userId": "u1", "text": "Welcome!",
            "createdAt": "2026-01-05T08:00:00Z", "isRead": false
        })],
        ..Records::default()
    }
}

fn ok(message: &str) -> Response {
    Json(json!({"success": true, "message": message})).into_response()
}

fn ok_with(field: &str, value: Value) -> Response {
    Json(json!({"success": true, field: value})).into_response()
}

fn rejected(message: &str) -> Response {
    Json(json!({"success": false, "message": message})).into_response()
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"success": false, "message": "Not Authorized Login Again"})),
    )
        .into_response()
}

fn field<'a>(body: &'a Value, name: &str) -> &'a str {
    body.get(name).and_then(Value::as_str).unwrap_or_default()
}

fn id_of(record: &Value) -> &str {
    field(record, "_id")
}

/// Record the request and decide whether it may proceed.
fn admit(records: &mut Records, request: RecordedRequest) -> Result<(), Response> {
    let path = request.path.clone();
    let token_ok = request.token.as_deref() == Some(ADMIN_TOKEN);
    records.requests.push(request);

    if path == routes::LOGIN {
        return Ok(());
    }
    if records.reject_all_tokens || !token_ok {
        return Err(unauthorized());
    }
    if records.failing.iter().any(|route| path.starts_with(route.as_str())) {
        return Err(rejected("Request failed on server"));
    }
    Ok(())
}

fn token_of(headers: &HeaderMap) -> Option<String> {
    headers
        .get("aToken")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

async fn dispatch(
    State(backend): State<FakeBackend>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> Response {
    let path = uri.path().trim_start_matches('/').to_string();
    let body: Value = serde_json::from_slice(&body).unwrap_or(Value::Null);
    let mut records = backend.lock();

    let request = RecordedRequest {
        method: method.clone(),
        path: path.clone(),
        token: token_of(&headers),
        body: body.clone(),
    };
    if let Err(response) = admit(&mut records, request) {
        return response;
    }

    let (route, tail) = match path.rsplit_once('/') {
        Some((head, tail)) if head == routes::GET_PRODUCT || head == routes::DELETE_CART => {
            (head.to_string(), Some(tail.to_string()))
        }
        _ => (path.clone(), None),
    };

    match (method, route.as_str()) {
        (Method::POST, routes::LOGIN) => {
            if field(&body, "email") == ADMIN_EMAIL && field(&body, "password") == ADMIN_PASSWORD {
                Json(json!({"success": true, "token": ADMIN_TOKEN})).into_response()
            } else {
                rejected("Invalid credentials")
            }
        }
        (Method::GET, routes::DASHBOARD) => ok_with(
            "dashData",
            json!({
                "qproducts": records.products.len(),
                "qcarts": records.carts.len(),
                "qcomments": records.comments.len(),
                "users": [{"name": "Lan", "email": "lan@shop.test", "image": "lan.png"}]
            }),
        ),
        (Method::GET, routes::ALL_PRODUCTS) => ok_with("products", json!(records.products)),
        (Method::GET, routes::GET_PRODUCT) => {
            let id = tail.unwrap_or_default();
            match records.products.iter().find(|p| id_of(p) == id) {
                Some(product) => ok_with("data", product.clone()),
                None => rejected("Product not found"),
            }
        }
        (Method::POST, routes::DELETE_PRODUCT) => {
            let id = field(&body, "prid");
            records.products.retain(|p| id_of(p) != id);
            ok("Product deleted")
        }
        (Method::POST, routes::CHANGE_AVAILABILITY) => {
            toggle(&mut records.products, field(&body, "productId"), "available");
            ok("Availability changed")
        }
        (Method::POST, routes::CHANGE_BESTSELLER) => {
            toggle(&mut records.products, field(&body, "productId"), "bestseller");
            ok("Bestseller status changed")
        }
        (Method::GET, routes::ALL_CARTS) => ok_with("carts", json!(records.carts)),
        (Method::POST, routes::DELETE_CART) => {
            let id = tail.unwrap_or_default();
            records.carts.retain(|c| id_of(c) != id);
            ok("Cart deleted")
        }
        (Method::POST, routes::CHANGE_CART_STATUS) => {
            let id = field(&body, "cartId").to_string();
            let status = body.get("status").cloned().unwrap_or(Value::Null);
            match records.carts.iter_mut().find(|c| id_of(c) == id) {
                Some(cart) => {
                    cart["status"] = status;
                    ok("Status updated")
                }
                None => rejected("Cart not found"),
            }
        }
        (Method::GET, routes::COMMENTS) => ok_with("comments", json!(records.comments)),
        (Method::GET, routes::ALL_REPLIES) => ok_with("replies", json!(records.replies)),
        (Method::POST, routes::REPLY) => {
            let id = records.id("r");
            let reply = json!({
                "_id": id,
                "commentId": field(&body, "commentId"),
                "text": field(&body, "text"),
            });
            records.replies.push(reply);
            ok("Reply successfully")
        }
        (Method::POST, routes::UPDATE_REPLY) => {
            let id = field(&body, "replyId").to_string();
            let text = body.get("text").cloned().unwrap_or(Value::Null);
            if let Some(reply) = records.replies.iter_mut().find(|r| id_of(r) == id) {
                reply["text"] = text;
            }
            ok("Edit successfully")
        }
        (Method::POST, routes::REMOVE_REPLY) => {
            let id = field(&body, "replyId").to_string();
            records.replies.retain(|r| id_of(r) != id);
            ok("Reply removed successfully")
        }
        (Method::GET, routes::ALL_NOTIFICATIONS) => {
            ok_with("data", json!(records.notifications))
        }
        (Method::POST, routes::DELETE_NOTIFICATION) => {
            let id = field(&body, "notificationId").to_string();
            records.notifications.retain(|n| id_of(n) != id);
            ok("Delete successfully")
        }
        (Method::POST, routes::CREATE_NOTIFICATION) => {
            let id = records.id("n");
            let mut notification = body.as_object().cloned().unwrap_or_default();
            notification.insert("_id".to_string(), Value::String(id));
            records.notifications.push(Value::Object(notification));
            ok("Notification created")
        }
        _ => (StatusCode::NOT_FOUND, "Not Found").into_response(),
    }
}

fn toggle(products: &mut [Value], id: &str, flag: &str) {
    if let Some(product) = products.iter_mut().find(|p| id_of(p) == id) {
        let current = product.get(flag).and_then(Value::as_bool).unwrap_or(false);
        product[flag] = Value::Bool(!current);
    }
}

/// Text fields of a multipart body, plus `image` as `{file_name, len}`.
async fn read_multipart(mut multipart: Multipart) -> Map<String, Value> {
    let mut fields = Map::new();
    while let Ok(Some(part)) = multipart.next_field().await {
        let name = part.name().unwrap_or_default().to_string();
        if let Some(file_name) = part.file_name().map(str::to_string) {
            let len = part.bytes().await.map(|b| b.len()).unwrap_or_default();
            fields.insert(name, json!({"file_name": file_name, "len": len}));
        } else {
            let text = part.text().await.unwrap_or_default();
            fields.insert(name, Value::String(text));
        }
    }
    fields
}

fn product_from_form(id: &str, form: &Map<String, Value>, image_url: &str) -> Value {
    let text = |name: &str| form.get(name).and_then(Value::as_str).unwrap_or_default();
    let specifications: Value =
        serde_json::from_str(text("specifications")).unwrap_or_else(|_| json!({}));
    json!({
        "_id": id,
        "name": text("name"),
        "brand": text("brand"),
        "price": text("price").parse::<f64>().unwrap_or_default(),
        "category": text("category"),
        "description": text("description"),
        "stock_quantity": text("stock_quantity").parse::<u64>().unwrap_or_default(),
        "specifications": specifications,
        "available": true,
        "bestseller": false,
        "image_url": image_url,
    })
}

async fn add_product(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let form = read_multipart(multipart).await;
    let mut records = backend.lock();
    let request = RecordedRequest {
        method: Method::POST,
        path: routes::ADD_PRODUCT.to_string(),
        token: token_of(&headers),
        body: Value::Object(form.clone()),
    };
    if let Err(response) = admit(&mut records, request) {
        return response;
    }
    if !form.contains_key("image") {
        return rejected("Image is required");
    }

    let id = records.id("p");
    let image_url = format!("https://cdn.shop.test/{id}.png");
    let product = product_from_form(&id, &form, &image_url);
    records.products.push(product);
    ok("Product added")
}

async fn update_product(
    State(backend): State<FakeBackend>,
    headers: HeaderMap,
    multipart: Multipart,
) -> Response {
    let form = read_multipart(multipart).await;
    let mut records = backend.lock();
    let request = RecordedRequest {
        method: Method::POST,
        path: routes::UPDATE_PRODUCT.to_string(),
        token: token_of(&headers),
        body: Value::Object(form.clone()),
    };
    if let Err(response) = admit(&mut records, request) {
        return response;
    }

    let id = form
        .get("productId")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    let image_url = form
        .get("image_url")
        .and_then(Value::as_str)
        .unwrap_or_default()
        .to_string();
    match records.products.iter_mut().find(|p| id_of(p) == id) {
        Some(product) => {
            let (available, bestseller) = (product["available"].clone(), product["bestseller"].clone());
            *product = product_from_form(&id, &form, &image_url);
            product["available"] = available;
            product["bestseller"] = bestseller;
            ok("Product updated")
        }
        None => rejected("Product not found"),
    }
}
