use std::sync::Arc;

use serde::Serialize;

use crate::client::BaseClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Shopping cart, checkout and order history endpoints.
///
/// `checkout` and `get_order_history` take the bearer token as an explicit
/// `Option<&str>`: the `Authorization` header is attached for every `Some`,
/// the empty string included, and omitted for `None`.
#[derive(Clone)]
pub struct CartApi {
    base: BaseClient,
    transport: Arc<dyn Transport>,
}

impl CartApi {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base: BaseClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base.base_url()
    }

    pub fn build_add_to_cart(&self, user_id: u64, book_id: u64) -> HttpRequest {
        self.base.request(
            HttpMethod::Post,
            &format!("/ShoppingCart/AddToCart/{user_id}/{book_id}"),
        )
    }

    pub fn build_get_cart_items(&self, user_id: u64) -> HttpRequest {
        self.base
            .request(HttpMethod::Get, &format!("/ShoppingCart/{user_id}"))
    }

    pub fn build_remove_from_cart(&self, user_id: u64, book_id: u64) -> HttpRequest {
        self.base
            .request(HttpMethod::Delete, &format!("/ShoppingCart/{user_id}/{book_id}"))
    }

    pub fn build_checkout<T: Serialize + ?Sized>(
        &self,
        user_id: u64,
        order: &T,
        token: Option<&str>,
    ) -> Result<HttpRequest, ApiError> {
        let mut request =
            self.base
                .json_request(HttpMethod::Post, &format!("/CheckOut/{user_id}"), order)?;
        attach_bearer(&mut request, token);
        Ok(request)
    }

    pub fn build_get_order_history(&self, user_id: u64, token: Option<&str>) -> HttpRequest {
        let mut request = self
            .base
            .request(HttpMethod::Get, &format!("/Order/{user_id}"));
        attach_bearer(&mut request, token);
        request
    }

    pub fn add_to_cart(&self, user_id: u64, book_id: u64) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&self.build_add_to_cart(user_id, book_id))
    }

    pub fn get_cart_items(&self, user_id: u64) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&self.build_get_cart_items(user_id))
    }

    pub fn remove_from_cart(&self, user_id: u64, book_id: u64) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(&self.build_remove_from_cart(user_id, book_id))
    }

    pub fn checkout<T: Serialize + ?Sized>(
        &self,
        user_id: u64,
        order: &T,
        token: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(&self.build_checkout(user_id, order, token)?)
    }

    pub fn get_order_history(
        &self,
        user_id: u64,
        token: Option<&str>,
    ) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(&self.build_get_order_history(user_id, token))
    }
}

fn attach_bearer(request: &mut HttpRequest, token: Option<&str>) {
    if let Some(token) = token {
        request
            .headers
            .push(("authorization".to_string(), format!("Bearer {token}")));
    }
}
