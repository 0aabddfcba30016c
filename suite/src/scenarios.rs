//! The scenario catalog: one function per end-to-end check.

use bookcart_core::{Book, CartItem, Category, LoginResponse, OrderRequest};
use serde_json::Value;
use tracing::info;

use crate::config::Tag;
use crate::context::Context;
use crate::error::{ensure, ensure_eq, ensure_status, ScenarioResult};

pub type ScenarioFn = fn(&mut Context) -> ScenarioResult;

/// A named scenario with its tags.
#[derive(Clone, Copy)]
pub struct Scenario {
    pub name: &'static str,
    pub tags: &'static [Tag],
    pub run: ScenarioFn,
}

impl Scenario {
    pub fn has_tag(&self, tag: Tag) -> bool {
        self.tags.contains(&tag)
    }
}

pub fn all() -> Vec<Scenario> {
    vec![
        Scenario { name: "book_browsing", tags: &[Tag::Smoke], run: book_browsing },
        Scenario { name: "book_categories", tags: &[Tag::Smoke], run: book_categories },
        Scenario { name: "login", tags: &[Tag::Smoke], run: login },
        Scenario { name: "login_invalid_password", tags: &[], run: login_invalid_password },
        Scenario { name: "registration", tags: &[Tag::Smoke], run: registration },
        Scenario {
            name: "registration_invalid_password",
            tags: &[],
            run: registration_invalid_password,
        },
        Scenario { name: "shopping_cart", tags: &[Tag::Smoke], run: shopping_cart },
        Scenario {
            name: "shopping_cart_add_remove",
            tags: &[Tag::Functional],
            run: shopping_cart_add_remove,
        },
        Scenario { name: "order_checkout", tags: &[Tag::Smoke], run: order_checkout },
    ]
}

/// Scenarios carrying `tag`, or all of them when `tag` is `None`.
pub fn select(tag: Option<Tag>) -> Vec<Scenario> {
    all()
        .into_iter()
        .filter(|s| tag.map_or(true, |t| s.has_tag(t)))
        .collect()
}

fn cart_contains(items: &[Value], book_id: u64) -> bool {
    items
        .iter()
        .any(|item| item["book"]["bookId"].as_u64() == Some(book_id))
}

fn book_browsing(ctx: &mut Context) -> ScenarioResult {
    let resp = ctx.client.books.get_all_books()?;
    ensure_status("get all books", 200, resp.status)?;
    let books: Vec<Value> = resp.json()?;
    info!(count = books.len(), "catalog loaded");
    ensure(!books.is_empty(), || "no books found in the catalog".to_string())?;

    let book_id = ctx.factory.random_book_id(&resp)?;
    info!(book_id, "selected book");

    let resp = ctx.client.books.get_book_by_id(book_id)?;
    ensure_status("get book by id", 200, resp.status)?;
    let raw: Value = resp.json()?;
    for field in ["bookId", "title", "author", "category", "price"] {
        ensure(raw.get(field).is_some(), || {
            format!("book is missing required field: {field}")
        })?;
    }
    let book: Book = resp.json()?;
    ensure_eq("bookId", book_id, book.book_id)?;
    ensure(!book.title.is_empty(), || "book title is empty".to_string())?;
    ensure(!book.author.is_empty(), || "book author is empty".to_string())?;
    ensure(book.price >= 0.0, || {
        format!("book price should be non-negative, got {}", book.price)
    })?;

    let resp = ctx.client.books.get_similar_books(book_id)?;
    ensure_status("get similar books", 200, resp.status)?;
    let similar: Vec<Book> = resp.json()?;
    info!(count = similar.len(), category = %book.category, "similar books");
    for other in &similar {
        ensure_eq("similar book category", book.category.as_str(), other.category.as_str())?;
    }
    Ok(())
}

fn book_categories(ctx: &mut Context) -> ScenarioResult {
    let resp = ctx.client.books.get_categories()?;
    ensure_status("get categories", 200, resp.status)?;
    let actual: Vec<Category> = resp.json()?;
    let expected = ctx.factory.expected_categories();

    ensure(actual.len() >= expected.len(), || {
        format!(
            "API returned fewer categories than expected: expected at least {}, got {}",
            expected.len(),
            actual.len()
        )
    })?;
    for category in expected {
        ensure(actual.contains(category), || {
            format!(
                "expected category not found: {} (ID: {})",
                category.category_name, category.category_id
            )
        })?;
    }
    Ok(())
}

fn login(ctx: &mut Context) -> ScenarioResult {
    let creds = ctx.factory.valid_user_credentials()?;
    info!(username = %creds.username, "logging in");
    let resp = ctx.client.users.login_user(&creds.username, &creds.password)?;
    ensure_status("login", 200, resp.status)?;

    let raw: Value = resp.json()?;
    ensure(raw.get("token").is_some(), || "response has no token".to_string())?;
    ensure(raw.get("userDetails").is_some(), || "response has no userDetails".to_string())?;

    let body: LoginResponse = resp.json()?;
    let details = body.user_details;
    ensure_eq("username", creds.username.as_str(), details.username.as_str())?;
    ensure_eq("userId", creds.user_id, details.user_id)?;
    ensure_eq("userTypeName", creds.user_type_name.as_str(), details.user_type_name.as_str())?;
    ensure(!body.token.is_empty(), || "authentication token is empty".to_string())
}

fn login_invalid_password(ctx: &mut Context) -> ScenarioResult {
    let creds = ctx.factory.invalid_user_credentials()?;
    let resp = ctx.client.users.login_user(&creds.username, &creds.password)?;
    ensure_status("login with invalid password", 401, resp.status)
}

fn registration(ctx: &mut Context) -> ScenarioResult {
    let user = ctx.factory.valid_registration();
    info!(
        username = user.username(),
        first_name = user.first_name(),
        last_name = user.last_name(),
        "registering"
    );
    let resp = ctx.client.users.register_user(&user)?;
    ensure_status("registration", 200, resp.status)?;

    let available = ctx.client.users.validate_username(user.username())?;
    ensure_eq("username available after registration", false, available)
}

fn registration_invalid_password(ctx: &mut Context) -> ScenarioResult {
    let user = ctx.factory.invalid_registration();
    let resp = ctx.client.users.register_user(&user)?;
    ensure_status("registration with invalid password", 400, resp.status)
}

fn add_and_verify(ctx: &mut Context, user_id: u64, book_id: u64) -> ScenarioResult<Vec<Value>> {
    let resp = ctx.client.cart.add_to_cart(user_id, book_id)?;
    ensure_status("add to cart", 200, resp.status)?;

    let resp = ctx.client.cart.get_cart_items(user_id)?;
    ensure_status("get cart items", 200, resp.status)?;
    let items: Vec<Value> = resp.json()?;
    info!(count = items.len(), "cart contents");
    ensure(cart_contains(&items, book_id), || {
        format!("book {book_id} not found in cart after adding")
    })?;
    Ok(items)
}

fn shopping_cart(ctx: &mut Context) -> ScenarioResult {
    let auth = ctx.auth_credentials()?;
    let book_id = ctx.random_book_id()?;
    let _cleanup = ctx.cleanup_cart(auth.user_id, book_id);

    add_and_verify(ctx, auth.user_id, book_id)?;
    Ok(())
}

fn shopping_cart_add_remove(ctx: &mut Context) -> ScenarioResult {
    let auth = ctx.auth_credentials()?;
    let book_id = ctx.random_book_id()?;
    let _cleanup = ctx.cleanup_cart(auth.user_id, book_id);

    add_and_verify(ctx, auth.user_id, book_id)?;

    let resp = ctx.client.cart.remove_from_cart(auth.user_id, book_id)?;
    ensure_status("remove from cart", 200, resp.status)?;

    let resp = ctx.client.cart.get_cart_items(auth.user_id)?;
    ensure_status("get cart items after removal", 200, resp.status)?;
    let remaining: Vec<Value> = resp.json()?;
    ensure(!cart_contains(&remaining, book_id), || {
        format!("book {book_id} is still in the cart after removal")
    })
}

fn order_checkout(ctx: &mut Context) -> ScenarioResult {
    let auth = ctx.auth_credentials()?;
    let book_id = ctx.random_book_id()?;
    let _cleanup = ctx.cleanup_cart(auth.user_id, book_id);

    let raw_items = add_and_verify(ctx, auth.user_id, book_id)?;
    let items: Vec<CartItem> = serde_json::from_value(Value::Array(raw_items))
        .map_err(bookcart_core::ApiError::Deserialization)?;
    let order = OrderRequest::from_cart(items);

    let resp = ctx
        .client
        .cart
        .checkout(auth.user_id, &order, Some(&auth.token))?;
    ensure_status("checkout", 200, resp.status)?;
    info!("checkout completed");

    let resp = ctx
        .client
        .cart
        .get_order_history(auth.user_id, Some(&auth.token))?;
    ensure_status("get order history", 200, resp.status)?;
    let orders: Vec<Value> = resp.json()?;
    info!(count = orders.len(), "order history");

    let placed = orders
        .iter()
        .find(|order| {
            order["orderDetails"]
                .as_array()
                .is_some_and(|details| cart_contains(details, book_id))
        })
        .ok_or_else(|| {
            crate::error::ScenarioError::Assertion(format!(
                "order with book {book_id} not found in order history"
            ))
        })?;

    ensure(!placed["orderId"].is_null(), || "order is missing orderId".to_string())?;
    ensure(
        placed["orderDetails"].as_array().is_some_and(|d| !d.is_empty()),
        || "order has no items".to_string(),
    )
}
