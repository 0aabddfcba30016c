use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::{delete, get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: u64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: f64,
    #[serde(default)]
    pub cover_file_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: u64,
    pub category_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub book: Book,
    pub quantity: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: String,
    pub cart_total: f64,
    pub order_details: Vec<CartItem>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user_id: u64,
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub user_type_name: String,
}

#[derive(Clone, Debug)]
struct Account {
    details: UserDetails,
    password: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    pub first_name: String,
    pub last_name: String,
    pub username: String,
    pub password: String,
    pub confirm_password: String,
    pub gender: String,
}

#[derive(Deserialize)]
pub struct Login {
    pub username: String,
    pub password: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_details: UserDetails,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Checkout {
    pub order_details: Vec<CartItem>,
    #[serde(default)]
    pub cart_total: f64,
}

#[derive(Default)]
pub struct Store {
    books: Vec<Book>,
    categories: Vec<Category>,
    accounts: Vec<Account>,
    tokens: HashMap<String, u64>,
    carts: HashMap<u64, Vec<(u64, u32)>>,
    orders: HashMap<u64, Vec<Order>>,
}

impl Store {
    /// Catalog and accounts matching `fixtures/test_data.json`.
    pub fn seeded() -> Self {
        let categories = ["Biography", "Fiction", "Mystery", "Fantasy", "Romance"]
            .iter()
            .enumerate()
            .map(|(i, name)| Category {
                category_id: i as u64 + 1,
                category_name: name.to_string(),
            })
            .collect();

        let catalog = [
            ("Steve Jobs", "Walter Isaacson", "Biography", 520.0),
            ("Long Walk to Freedom", "Nelson Mandela", "Biography", 410.0),
            ("Pride and Prejudice", "Jane Austen", "Romance", 215.0),
            ("Emma", "Jane Austen", "Romance", 199.0),
            ("The Hobbit", "J.R.R. Tolkien", "Fantasy", 350.0),
            ("A Game of Thrones", "George R.R. Martin", "Fantasy", 480.0),
            ("Gone Girl", "Gillian Flynn", "Mystery", 305.0),
            ("The Hound of the Baskervilles", "Arthur Conan Doyle", "Mystery", 150.0),
            ("To Kill a Mockingbird", "Harper Lee", "Fiction", 275.0),
            ("The Kite Runner", "Khaled Hosseini", "Fiction", 330.0),
        ];
        let books = catalog
            .iter()
            .enumerate()
            .map(|(i, (title, author, category, price))| Book {
                book_id: i as u64 + 1,
                title: title.to_string(),
                author: author.to_string(),
                category: category.to_string(),
                price: *price,
                cover_file_name: format!("book-{}.jpg", i + 1),
            })
            .collect();

        let accounts = vec![
            account(1, "Admin", "User", "adminuser", "Admin1234", "Admin"),
            account(2, "Book", "Worm", "bookworm", "Reader2024", "User"),
        ];

        Self {
            books,
            categories,
            accounts,
            ..Default::default()
        }
    }

    fn book(&self, id: u64) -> Option<&Book> {
        self.books.iter().find(|b| b.book_id == id)
    }

    fn cart_items(&self, user_id: u64) -> Vec<CartItem> {
        self.carts
            .get(&user_id)
            .into_iter()
            .flatten()
            .filter_map(|(book_id, quantity)| {
                self.book(*book_id).map(|book| CartItem {
                    book: book.clone(),
                    quantity: *quantity,
                })
            })
            .collect()
    }

    fn cart_count(&self, user_id: u64) -> u32 {
        self.carts
            .get(&user_id)
            .map(|lines| lines.iter().map(|(_, q)| q).sum())
            .unwrap_or(0)
    }
}

fn account(
    user_id: u64,
    first_name: &str,
    last_name: &str,
    username: &str,
    password: &str,
    user_type_name: &str,
) -> Account {
    Account {
        details: UserDetails {
            user_id,
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            username: username.to_string(),
            user_type_name: user_type_name.to_string(),
        },
        password: password.to_string(),
    }
}

/// Registration password rule: 8+ characters with upper, lower and digit,
/// letters and digits only.
pub fn password_is_acceptable(password: &str) -> bool {
    password.len() >= 8
        && password.chars().all(|c| c.is_ascii_alphanumeric())
        && password.chars().any(|c| c.is_ascii_uppercase())
        && password.chars().any(|c| c.is_ascii_lowercase())
        && password.chars().any(|c| c.is_ascii_digit())
}

pub type Db = Arc<RwLock<Store>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(Store::seeded()));
    Router::new()
        .route("/Book", get(list_books))
        .route("/Book/GetCategoriesList", get(list_categories))
        .route("/Book/GetSimilarBooks/{id}", get(similar_books))
        .route("/Book/{id}", get(get_book))
        .route("/User", post(register_user))
        .route("/User/validateUserName/{username}", get(validate_username))
        .route("/login", post(login))
        .route("/ShoppingCart/AddToCart/{user_id}/{book_id}", post(add_to_cart))
        .route("/ShoppingCart/{user_id}", get(cart_items))
        .route("/ShoppingCart/{user_id}/{book_id}", delete(remove_from_cart))
        .route("/CheckOut/{user_id}", post(checkout))
        .route("/Order/{user_id}", get(order_history))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn list_books(State(db): State<Db>) -> Json<Vec<Book>> {
    Json(db.read().await.books.clone())
}

async fn list_categories(State(db): State<Db>) -> Json<Vec<Category>> {
    Json(db.read().await.categories.clone())
}

async fn get_book(State(db): State<Db>, Path(id): Path<u64>) -> Result<Json<Book>, StatusCode> {
    let store = db.read().await;
    store.book(id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn similar_books(
    State(db): State<Db>,
    Path(id): Path<u64>,
) -> Result<Json<Vec<Book>>, StatusCode> {
    let store = db.read().await;
    let book = store.book(id).ok_or(StatusCode::NOT_FOUND)?;
    let similar = store
        .books
        .iter()
        .filter(|b| b.category == book.category && b.book_id != id)
        .cloned()
        .collect();
    Ok(Json(similar))
}

async fn register_user(State(db): State<Db>, Json(input): Json<Registration>) -> StatusCode {
    let mut store = db.write().await;
    if input.first_name.trim().is_empty()
        || input.last_name.trim().is_empty()
        || input.username.trim().is_empty()
        || input.gender.trim().is_empty()
        || input.password != input.confirm_password
        || !password_is_acceptable(&input.password)
    {
        return StatusCode::BAD_REQUEST;
    }
    if store
        .accounts
        .iter()
        .any(|a| a.details.username == input.username)
    {
        return StatusCode::BAD_REQUEST;
    }
    let user_id = store
        .accounts
        .iter()
        .map(|a| a.details.user_id)
        .max()
        .unwrap_or(0)
        + 1;
    info!(user_id, username = %input.username, "registered user");
    store.accounts.push(account(
        user_id,
        &input.first_name,
        &input.last_name,
        &input.username,
        &input.password,
        "User",
    ));
    StatusCode::OK
}

/// `true` while the name is still free.
async fn validate_username(State(db): State<Db>, Path(username): Path<String>) -> Json<bool> {
    let store = db.read().await;
    Json(!store.accounts.iter().any(|a| a.details.username == username))
}

async fn login(
    State(db): State<Db>,
    Json(input): Json<Login>,
) -> Result<Json<LoginResponse>, StatusCode> {
    let mut store = db.write().await;
    let details = store
        .accounts
        .iter()
        .find(|a| a.details.username == input.username && a.password == input.password)
        .map(|a| a.details.clone())
        .ok_or(StatusCode::UNAUTHORIZED)?;
    let token = Uuid::new_v4().to_string();
    store.tokens.insert(token.clone(), details.user_id);
    Ok(Json(LoginResponse {
        token,
        user_details: details,
    }))
}

async fn add_to_cart(
    State(db): State<Db>,
    Path((user_id, book_id)): Path<(u64, u64)>,
) -> Result<Json<u32>, StatusCode> {
    let mut store = db.write().await;
    store.book(book_id).ok_or(StatusCode::NOT_FOUND)?;
    let lines = store.carts.entry(user_id).or_default();
    match lines.iter_mut().find(|(id, _)| *id == book_id) {
        Some((_, quantity)) => *quantity += 1,
        None => lines.push((book_id, 1)),
    }
    Ok(Json(store.cart_count(user_id)))
}

async fn cart_items(State(db): State<Db>, Path(user_id): Path<u64>) -> Json<Vec<CartItem>> {
    Json(db.read().await.cart_items(user_id))
}

async fn remove_from_cart(
    State(db): State<Db>,
    Path((user_id, book_id)): Path<(u64, u64)>,
) -> Json<u32> {
    let mut store = db.write().await;
    if let Some(lines) = store.carts.get_mut(&user_id) {
        lines.retain(|(id, _)| *id != book_id);
    }
    Json(store.cart_count(user_id))
}

async fn checkout(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
    headers: HeaderMap,
    Json(input): Json<Checkout>,
) -> Result<Json<String>, StatusCode> {
    let mut store = db.write().await;
    authorize(&store, &headers, user_id)?;
    if input.order_details.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let order = Order {
        order_id: Uuid::new_v4().to_string(),
        cart_total: input.cart_total,
        order_details: input.order_details,
    };
    info!(user_id, order_id = %order.order_id, "order placed");
    let order_id = order.order_id.clone();
    store.orders.entry(user_id).or_default().push(order);
    store.carts.remove(&user_id);
    Ok(Json(order_id))
}

async fn order_history(
    State(db): State<Db>,
    Path(user_id): Path<u64>,
    headers: HeaderMap,
) -> Result<Json<Vec<Order>>, StatusCode> {
    let store = db.read().await;
    authorize(&store, &headers, user_id)?;
    Ok(Json(store.orders.get(&user_id).cloned().unwrap_or_default()))
}

/// Accepts only a bearer token issued by `/login` to `user_id`.
fn authorize(store: &Store, headers: &HeaderMap, user_id: u64) -> Result<(), StatusCode> {
    let token = headers
        .get(AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .ok_or(StatusCode::UNAUTHORIZED)?;
    match store.tokens.get(token) {
        Some(owner) if *owner == user_id => Ok(()),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn book_serializes_to_camel_case() {
        let store = Store::seeded();
        let json = serde_json::to_value(&store.books[0]).unwrap();
        assert_eq!(json["bookId"], 1);
        assert!(json.get("coverFileName").is_some());
        assert!(json.get("book_id").is_none());
    }

    #[test]
    fn seeded_catalog_covers_every_category() {
        let store = Store::seeded();
        for category in &store.categories {
            let count = store
                .books
                .iter()
                .filter(|b| b.category == category.category_name)
                .count();
            assert!(count >= 2, "{} has {count} books", category.category_name);
        }
    }

    #[test]
    fn registration_requires_all_fields() {
        let result: Result<Registration, _> =
            serde_json::from_str(r#"{"firstName":"A","lastName":"B","username":"c"}"#);
        assert!(result.is_err());
    }

    #[test]
    fn password_rule() {
        assert!(password_is_acceptable("Reader2024"));
        assert!(!password_is_acceptable("short1A"));
        assert!(!password_is_acceptable("alllower1"));
        assert!(!password_is_acceptable("NoDigitsHere"));
        assert!(!password_is_acceptable("Symbol#12a"));
    }

    #[test]
    fn cart_count_sums_quantities() {
        let mut store = Store::seeded();
        store.carts.insert(9, vec![(1, 2), (3, 1)]);
        assert_eq!(store.cart_count(9), 3);
        assert_eq!(store.cart_items(9).len(), 2);
        assert_eq!(store.cart_count(10), 0);
    }

    #[test]
    fn cart_items_skip_unknown_books() {
        let mut store = Store::seeded();
        store.carts.insert(9, vec![(999, 1)]);
        assert!(store.cart_items(9).is_empty());
    }
}
