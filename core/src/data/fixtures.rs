use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::types::{Category, Credentials};

/// Contents of the fixture file (`test_data.json`).
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct TestData {
    #[serde(default)]
    pub valid_users: Vec<Credentials>,
    #[serde(default)]
    pub invalid_users: Vec<Credentials>,
    #[serde(default)]
    pub expected_categories: Vec<Category>,
}

impl TestData {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ApiError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ApiError::Fixture {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self, ApiError> {
        serde_json::from_str(raw).map_err(ApiError::Deserialization)
    }
}
