//! Command-line configuration for the suite runner.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use serde::Serialize;

/// Public demo deployment the suite targets unless overridden.
pub const DEFAULT_BASE_URL: &str = "https://bookcart.azurewebsites.net/api";

/// Fixture matching the seed data of the bundled mock server. Runs against
/// the public deployment need a fixture with that deployment's accounts.
pub const DEFAULT_FIXTURES: &str = "fixtures/test_data.json";

/// Scenario grouping, used to select a subset of the suite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tag {
    /// Quick happy-path checks.
    Smoke,
    /// Longer multi-step flows.
    Functional,
}

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Smoke => write!(f, "smoke"),
            Self::Functional => write!(f, "functional"),
        }
    }
}

#[derive(Debug, Clone, Parser)]
#[command(name = "bookcart-suite", about = "End-to-end checks for the BookCart REST API")]
pub struct SuiteArgs {
    /// Base URL of the API under test.
    #[arg(long, env = "BOOKCART_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Fixture file with valid/invalid users and expected categories.
    ///
    /// The shipped default matches the bundled mock-server's seed data only;
    /// point this at a fixture with real accounts when targeting another
    /// deployment.
    #[arg(long, env = "BOOKCART_FIXTURES", default_value = DEFAULT_FIXTURES)]
    pub fixtures: PathBuf,

    /// Seed for generated data; random when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Run only scenarios carrying this tag.
    #[arg(long, value_enum)]
    pub tag: Option<Tag>,

    /// Print the scenario list and exit.
    #[arg(long)]
    pub list: bool,

    /// Write the JSON report to this path.
    #[arg(long)]
    pub report: Option<PathBuf>,
}
