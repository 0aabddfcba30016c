//! Blocking API client and test-data factory for the bookstore REST API.
//!
//! # Overview
//! `BookCartClient` groups three resource clients (`books`, `users`,
//! `cart`) that share one normalized base URL and one `Transport`. Every
//! operation sends exactly one request and hands back the raw
//! `HttpResponse`; asserting on status codes is the caller's job.
//! `DataFactory` supplies credentials, registration payloads and random book
//! picks for tests.
//!
//! # Design
//! - Each operation has a pure `build_*` counterpart so request shapes can be
//!   checked without a server.
//! - `UserApi::validate_username` is the single operation that enforces a
//!   2xx status and returns a typed value.
//! - Randomness is injected into `DataFactory` instead of read from a global.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod data;
pub mod error;
pub mod http;
pub mod types;

pub use client::{BaseClient, BookApi, BookCartClient, CartApi, UserApi};
pub use data::{meets_password_policy, DataFactory, TestData};
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse, Transport, UreqTransport};
pub use types::{
    Book, CartItem, Category, Credentials, LoginRequest, LoginResponse, Order, OrderRequest,
    UserDetails, UserRegistration,
};
