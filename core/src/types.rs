//! Domain DTOs for the bookstore API.
//!
//! # Design
//! Resource clients pass responses through untouched, so these types are
//! only used by callers that choose to decode a body with
//! `HttpResponse::json`, and by the registration and login payloads the
//! client sends. Field names follow the API's camelCase wire format.

use serde::{Deserialize, Serialize};

/// A book as returned by `/Book` and `/Book/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    pub book_id: u64,
    pub title: String,
    pub author: String,
    pub category: String,
    pub price: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover_file_name: Option<String>,
}

/// A book category as returned by `/Book/GetCategoriesList`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub category_id: u64,
    pub category_name: String,
}

/// One line of a shopping cart or an order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartItem {
    pub book: Book,
    pub quantity: u32,
}

/// Order payload posted to `/CheckOut/{userId}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderRequest {
    pub order_details: Vec<CartItem>,
    pub cart_total: f64,
}

impl OrderRequest {
    /// Builds an order from cart contents, totalling line prices.
    pub fn from_cart(items: Vec<CartItem>) -> Self {
        let cart_total = items
            .iter()
            .map(|item| item.book.price * f64::from(item.quantity))
            .sum();
        Self {
            order_details: items,
            cart_total,
        }
    }
}

/// An order as returned by `/Order/{userId}`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub order_id: Option<String>,
    #[serde(default)]
    pub cart_total: f64,
    #[serde(default)]
    pub order_date: Option<String>,
    #[serde(default)]
    pub order_details: Vec<CartItem>,
}

/// Body of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// The `userDetails` object of a successful login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct UserDetails {
    pub user_id: u64,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub username: String,
    pub user_type_name: String,
}

/// Successful response of `POST /login`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub user_details: UserDetails,
}

/// A fixture account: known username/password plus the identity the server
/// is expected to report back on login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub username: String,
    pub password: String,
    pub user_id: u64,
    pub user_type_name: String,
}

/// Registration payload for `POST /User`.
///
/// Fields are fixed at construction. The wire mapping is produced by
/// [`UserRegistration::to_fields`], which lists every field explicitly so a
/// change to the request body shows up as a change to that function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRegistration {
    first_name: String,
    last_name: String,
    username: String,
    password: String,
    confirm_password: String,
    gender: String,
}

impl UserRegistration {
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
        confirm_password: impl Into<String>,
        gender: impl Into<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            username: username.into(),
            password: password.into(),
            confirm_password: confirm_password.into(),
            gender: gender.into(),
        }
    }

    pub fn first_name(&self) -> &str {
        &self.first_name
    }

    pub fn last_name(&self) -> &str {
        &self.last_name
    }

    pub fn username(&self) -> &str {
        &self.username
    }

    pub fn password(&self) -> &str {
        &self.password
    }

    pub fn confirm_password(&self) -> &str {
        &self.confirm_password
    }

    pub fn gender(&self) -> &str {
        &self.gender
    }

    /// Key-value mapping sent as the registration request body.
    pub fn to_fields(&self) -> serde_json::Map<String, serde_json::Value> {
        let mut fields = serde_json::Map::with_capacity(6);
        fields.insert("firstName".into(), self.first_name.clone().into());
        fields.insert("lastName".into(), self.last_name.clone().into());
        fields.insert("username".into(), self.username.clone().into());
        fields.insert("password".into(), self.password.clone().into());
        fields.insert("confirmPassword".into(), self.confirm_password.clone().into());
        fields.insert("gender".into(), self.gender.clone().into());
        fields
    }
}
