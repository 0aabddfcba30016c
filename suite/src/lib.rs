//! End-to-end scenario suite for the BookCart REST API.
//!
//! # Overview
//! Each scenario drives `bookcart_core::BookCartClient` through one user
//! journey (browsing, login, registration, cart, checkout) and asserts on the
//! raw responses. The runner executes a selection of scenarios and produces a
//! `SuiteReport`; the `bookcart-suite` binary wraps it with a CLI.

pub mod config;
pub mod context;
pub mod error;
pub mod runner;
pub mod scenarios;

use bookcart_core::{ApiError, BookCartClient, DataFactory, TestData};
use rand::rngs::StdRng;
use rand::SeedableRng;

pub use config::{SuiteArgs, Tag, DEFAULT_BASE_URL};
pub use context::{AuthCredentials, CartCleanup, Context};
pub use error::{ScenarioError, ScenarioResult};
pub use runner::{run, ScenarioReport, SuiteReport};
pub use scenarios::{Scenario, ScenarioFn};

/// Builds a scenario context for `base_url` from already-loaded fixture data.
pub fn build_context(base_url: &str, data: TestData, seed: Option<u64>) -> Context {
    let rng = match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    Context::new(BookCartClient::new(base_url), DataFactory::new(data, rng))
}

/// Loads fixtures and runs the scenarios selected by `args`.
pub fn run_suite(args: &SuiteArgs) -> Result<SuiteReport, ApiError> {
    let data = TestData::load(&args.fixtures)?;
    let mut ctx = build_context(&args.base_url, data, args.seed);
    Ok(run(&mut ctx, &scenarios::select(args.tag)))
}
