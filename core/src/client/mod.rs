//! Resource clients for the bookstore API.
//!
//! # Design
//! Every resource client owns a `BaseClient` (the normalized base URL) and a
//! shared `Transport`. Each operation is split into a pure `build_*` method
//! producing an `HttpRequest` and an executing method that sends it and
//! returns the raw `HttpResponse`. Status codes are left to the caller.

mod book;
mod cart;
mod user;

use std::sync::Arc;

use serde::Serialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, Transport, UreqTransport};

pub use book::BookApi;
pub use cart::CartApi;
pub use user::UserApi;

/// Holds the base URL every endpoint path is joined onto.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BaseClient {
    base_url: String,
}

impl BaseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` (which must start with `/`) onto the base URL.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub(crate) fn request(&self, method: HttpMethod, path: &str) -> HttpRequest {
        HttpRequest {
            method,
            path: self.endpoint(path),
            headers: Vec::new(),
            body: None,
        }
    }

    pub(crate) fn json_request<T: Serialize + ?Sized>(
        &self,
        method: HttpMethod,
        path: &str,
        body: &T,
    ) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(body).map_err(ApiError::Serialization)?;
        Ok(HttpRequest {
            method,
            path: self.endpoint(path),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

/// Single entry point composing the book, user and cart clients.
#[derive(Clone)]
pub struct BookCartClient {
    pub books: BookApi,
    pub users: UserApi,
    pub cart: CartApi,
}

impl BookCartClient {
    /// Creates a client that talks to `base_url` over a blocking ureq agent.
    pub fn new(base_url: &str) -> Self {
        Self::with_transport(base_url, Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            books: BookApi::new(base_url, Arc::clone(&transport)),
            users: UserApi::new(base_url, Arc::clone(&transport)),
            cart: CartApi::new(base_url, transport),
        }
    }

    pub fn base_url(&self) -> &str {
        self.books.base_url()
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use super::*;
    use crate::http::HttpResponse;

    /// Records every request and replays canned responses in order.
    /// Falls back to `200 []` once the queue is empty.
    #[derive(Default)]
    pub struct RecordingTransport {
        pub requests: Mutex<Vec<HttpRequest>>,
        responses: Mutex<VecDeque<HttpResponse>>,
    }

    impl RecordingTransport {
        pub fn with_responses(responses: Vec<(u16, &str)>) -> Arc<Self> {
            let queue = responses
                .into_iter()
                .map(|(status, body)| HttpResponse {
                    status,
                    headers: Vec::new(),
                    body: body.to_string(),
                })
                .collect();
            Arc::new(Self {
                requests: Mutex::new(Vec::new()),
                responses: Mutex::new(queue),
            })
        }

        pub fn last(&self) -> HttpRequest {
            self.requests
                .lock()
                .unwrap()
                .last()
                .cloned()
                .expect("no request recorded")
        }

        pub fn count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    impl Transport for RecordingTransport {
        fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, ApiError> {
            self.requests.lock().unwrap().push(request.clone());
            Ok(self.responses.lock().unwrap().pop_front().unwrap_or(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: "[]".to_string(),
            }))
        }
    }
}
