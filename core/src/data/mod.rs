//! Test-data generation: fixture loading plus synthetic inputs drawn from an
//! injected random source.

mod factory;
mod fixtures;

pub use factory::{meets_password_policy, DataFactory, MIN_PASSWORD_LEN};
pub use fixtures::TestData;
