use std::sync::Arc;

use crate::client::BaseClient;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse, Transport};

/// Book browsing endpoints.
#[derive(Clone)]
pub struct BookApi {
    base: BaseClient,
    transport: Arc<dyn Transport>,
}

impl BookApi {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>) -> Self {
        Self {
            base: BaseClient::new(base_url),
            transport,
        }
    }

    pub fn base_url(&self) -> &str {
        self.base.base_url()
    }

    pub fn build_get_all_books(&self) -> HttpRequest {
        self.base.request(HttpMethod::Get, "/Book")
    }

    pub fn build_get_book_by_id(&self, book_id: u64) -> HttpRequest {
        self.base.request(HttpMethod::Get, &format!("/Book/{book_id}"))
    }

    pub fn build_get_similar_books(&self, book_id: u64) -> HttpRequest {
        self.base
            .request(HttpMethod::Get, &format!("/Book/GetSimilarBooks/{book_id}"))
    }

    pub fn build_get_categories(&self) -> HttpRequest {
        self.base.request(HttpMethod::Get, "/Book/GetCategoriesList")
    }

    pub fn get_all_books(&self) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&self.build_get_all_books())
    }

    pub fn get_book_by_id(&self, book_id: u64) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&self.build_get_book_by_id(book_id))
    }

    pub fn get_similar_books(&self, book_id: u64) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&self.build_get_similar_books(book_id))
    }

    pub fn get_categories(&self) -> Result<HttpResponse, ApiError> {
        self.transport.execute(&self.build_get_categories())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::testing::RecordingTransport;

    fn api() -> BookApi {
        BookApi::new("http://localhost:3000/", RecordingTransport::with_responses(Vec::new()))
    }

    #[test]
    fn build_get_all_books_produces_correct_request() {
        let req = api().build_get_all_books();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/Book");
        assert!(req.headers.is_empty());
        assert!(req.body.is_none());
    }

    #[test]
    fn build_get_book_by_id_embeds_id() {
        let req = api().build_get_book_by_id(42);
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/Book/42");
    }

    #[test]
    fn build_get_similar_books_embeds_id() {
        let req = api().build_get_similar_books(7);
        assert_eq!(req.path, "http://localhost:3000/Book/GetSimilarBooks/7");
    }

    #[test]
    fn build_get_categories_produces_correct_request() {
        let req = api().build_get_categories();
        assert_eq!(req.path, "http://localhost:3000/Book/GetCategoriesList");
        assert!(req.body.is_none());
    }

    #[test]
    fn error_status_is_returned_as_data() {
        let transport = RecordingTransport::with_responses(vec![(404, "not found")]);
        let api = BookApi::new("http://localhost:3000", transport.clone());
        let resp = api.get_book_by_id(999).unwrap();
        assert_eq!(resp.status, 404);
        assert_eq!(resp.body, "not found");
        assert_eq!(transport.count(), 1);
    }
}
