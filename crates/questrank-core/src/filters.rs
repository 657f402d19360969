use std::collections::HashSet;
use std::path::Path;

use chrono::NaiveDate;
use serde::Deserialize;
use thiserror::Error;

use crate::eligibility::EligibilityWindow;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("cannot read filter file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot parse filter file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid filter config: {0}")]
    Validation(String),
}

/// A named group of participants, selected by matching the free-text
/// location field against `names`. Name lists must be lowercase and
/// disjoint across buckets, so a participant lands in at most one.
#[derive(Debug, Clone, Deserialize)]
pub struct LocationBucket {
    pub key: String,
    /// Display title used in report section headers.
    pub title: String,
    pub names: Vec<String>,
}

impl LocationBucket {
    /// Whether a participant's location field belongs to this bucket.
    #[must_use]
    pub fn matches(&self, location: &str) -> bool {
        let loc = location.trim().to_lowercase();
        self.names.iter().any(|n| *n == loc)
    }
}

/// Contents of `filters.yaml`: the eligibility filter plus the ordered
/// location buckets for one run.
#[derive(Debug, Deserialize)]
pub struct FiltersFile {
    #[serde(default)]
    pub skip_quests: Vec<String>,
    pub from_date: Option<NaiveDate>,
    pub to_date: Option<NaiveDate>,
    #[serde(default)]
    pub locations: Vec<LocationBucket>,
}

impl FiltersFile {
    /// The eligibility window this filter file describes.
    #[must_use]
    pub fn window(&self) -> EligibilityWindow {
        EligibilityWindow {
            skip_titles: self.skip_quests.iter().cloned().collect(),
            from_date: self.from_date,
            to_date: self.to_date,
        }
    }
}

/// Load and validate the filter configuration from a YAML file.
///
/// # Errors
///
/// Returns `FilterError` if the file cannot be read, parsed, or fails
/// validation.
pub fn load_filters(path: &Path) -> Result<FiltersFile, FilterError> {
    let content = std::fs::read_to_string(path).map_err(|e| FilterError::Io {
        path: path.display().to_string(),
        source: e,
    })?;

    let filters: FiltersFile = serde_yaml::from_str(&content)?;

    validate_filters(&filters)?;

    Ok(filters)
}

fn validate_filters(filters: &FiltersFile) -> Result<(), FilterError> {
    if let (Some(from), Some(to)) = (filters.from_date, filters.to_date) {
        if from > to {
            return Err(FilterError::Validation(format!(
                "from_date {from} is after to_date {to}"
            )));
        }
    }

    let mut seen_keys = HashSet::new();
    let mut seen_names = HashSet::new();

    for bucket in &filters.locations {
        if bucket.key.trim().is_empty() {
            return Err(FilterError::Validation(
                "location key must be non-empty".to_string(),
            ));
        }
        if bucket.title.trim().is_empty() {
            return Err(FilterError::Validation(format!(
                "location '{}' has an empty title",
                bucket.key
            )));
        }
        if !seen_keys.insert(bucket.key.clone()) {
            return Err(FilterError::Validation(format!(
                "duplicate location key: '{}'",
                bucket.key
            )));
        }

        if bucket.names.is_empty() {
            return Err(FilterError::Validation(format!(
                "location '{}' has no match names",
                bucket.key
            )));
        }
        for name in &bucket.names {
            if name.trim().is_empty() {
                return Err(FilterError::Validation(format!(
                    "location '{}' has an empty match name",
                    bucket.key
                )));
            }
            if *name != name.to_lowercase() {
                return Err(FilterError::Validation(format!(
                    "location '{}' match name '{name}' must be lowercase",
                    bucket.key
                )));
            }
            // Name sets must be disjoint so bucket membership is unambiguous.
            if !seen_names.insert(name.clone()) {
                return Err(FilterError::Validation(format!(
                    "match name '{name}' appears in more than one location"
                )));
            }
        }
    }

    Ok(())
}
