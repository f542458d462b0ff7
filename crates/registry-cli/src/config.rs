use anyhow::{Context, Result};
use chrono::NaiveDate;
use registry_core::FOUNDING_DATE_FORMAT;
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegistryConfig {
    /// JSON dataset to load (REGISTRY_DATA_PATH)
    pub data_path: Option<PathBuf>,
    /// Fixed date for the company-age rule (REGISTRY_EVALUATION_DATE), today when unset
    pub evaluation_date: Option<NaiveDate>,
    /// Emit JSON log lines (RUST_LOG_FORMAT=json)
    pub json_logging: bool,
}

impl RegistryConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let data_path = lookup("REGISTRY_DATA_PATH")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let evaluation_date = match lookup("REGISTRY_EVALUATION_DATE").filter(|v| !v.trim().is_empty()) {
            Some(raw) => Some(
                NaiveDate::parse_from_str(raw.trim(), FOUNDING_DATE_FORMAT)
                    .with_context(|| format!("REGISTRY_EVALUATION_DATE is not a YYYY-MM-DD date: {raw}"))?,
            ),
            None => None,
        };

        let json_logging = lookup("RUST_LOG_FORMAT")
            .map(|v| v.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        Ok(Self {
            data_path,
            evaluation_date,
            json_logging,
        })
    }
}
