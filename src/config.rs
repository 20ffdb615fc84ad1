// Search profiles: which campgrounds to check, for which dates, and how long
// a stay has to be. Stored as JSON, by default in `cfg_<profile>.json`.

use crate::aggregator::SiteFilter;
use crate::checker::SearchQuery;
use crate::dates::{DateError, DateWindow};
use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Invalid profile: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid date window: {0}")]
    InvalidWindow(#[from] DateError),

    #[error("No campground is enabled for checking")]
    NoParks,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchConfig {
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    #[serde(default)]
    pub nights: Option<i64>,
    #[serde(default)]
    pub campsite_type: Option<String>,
    #[serde(default)]
    pub campsite_ids: Vec<String>,
    pub parks: Vec<ParkConfig>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ParkConfig {
    #[serde(deserialize_with = "string_or_number")]
    pub id: String,
    #[serde(default = "default_check")]
    pub check: bool,
}

fn default_check() -> bool {
    true
}

// Campground ids show up both as `232447` and `"232447"`.
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Text(String),
        Number(u64),
    }

    Ok(match RawId::deserialize(deserializer)? {
        RawId::Text(id) => id,
        RawId::Number(id) => id.to_string(),
    })
}

impl SearchConfig {
    pub fn profile_path(profile: &str) -> PathBuf {
        PathBuf::from(format!("cfg_{}.json", profile))
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: SearchConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.window()?;
        if self.enabled_parks().next().is_none() {
            return Err(ConfigError::NoParks);
        }
        Ok(())
    }

    pub fn window(&self) -> Result<DateWindow, ConfigError> {
        Ok(DateWindow::new(self.start_date, self.end_date)?)
    }

    /// Ids of the campgrounds marked for checking, in profile order.
    pub fn enabled_parks(&self) -> impl Iterator<Item = &str> {
        self.parks
            .iter()
            .filter(|park| park.check)
            .map(|park| park.id.as_str())
    }

    pub fn filter(&self) -> SiteFilter {
        SiteFilter::new(self.campsite_type.clone(), self.campsite_ids.clone())
    }

    pub fn query(&self) -> Result<SearchQuery, ConfigError> {
        Ok(SearchQuery::new(self.window()?)
            .with_nights(self.nights)
            .with_filter(self.filter()))
    }
}
