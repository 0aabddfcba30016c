use std::sync::Arc;

use crate::client::BaseClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};
use crate::types::{LoginRequest, UserRegistration};

/// Registration, username availability and login endpoints.
#[derive(Clone)]
pub struct UserApi {
    base: BaseClient,
    transport: Arc<dyn Transport>,
}

impl UserApi {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base: BaseClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base.base_url()
    }

    pub fn build_register_user(&self, user: &UserRegistration) -> Result<HttpRequest, ApiError> {
        self.base.json_request(HttpMethod::Post, "/User", &user.to_fields())
    }

    /// The username is percent-encoded as a single path segment.
    pub fn build_validate_username(&self, username: &str) -> HttpRequest {
        self.base.request(
            HttpMethod::Get,
            &format!("/User/validateUserName/{}", urlencoding::encode(username)),
        )
    }

    pub fn build_login_user(&self, username: &str, password: &str) -> Result<HttpRequest, ApiError> {
        let payload = LoginRequest {
            username: username.to_string(),
            password: password.to_string(),
        };
        self.base.json_request(HttpMethod::Post, "/login", &payload)
    }

    /// Registers a new user. The server answers 200 on success and 400 when
    /// validation fails (e.g. password policy).
    pub fn register_user(&self, user: &UserRegistration) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&self.build_register_user(user)?)
    }

    /// Asks whether `username` is still available.
    ///
    /// Unlike every other operation this one enforces a 2xx status and
    /// returns a typed value: `true` only when the body is the JSON literal
    /// `true`. A non-2xx status yields [`ApiError::Http`].
    pub fn validate_username(&self, username: &str) -> Result<bool, ApiError> {
        let response = self.transport.execute(&self.build_validate_username(username))?;
        parse_validate_username(response)
    }

    /// Logs in. 200 carries `{token, userDetails}`, 401 means bad credentials.
    pub fn login_user(&self, username: &str, password: &str) -> Result<HttpResponse, ApiError> {
        self.transport
            .execute(&self.build_login_user(username, password)?)
    }
}

fn parse_validate_username(response: HttpResponse) -> Result<bool, ApiError> {
    if !response.is_success() {
        return Err(ApiError::Http {
            status: response.status,
            body: response.body,
        });
    }
    let value: serde_json::Value = response.json()?;
    Ok(value == serde_json::Value::Bool(true))
}
