// Collapses the per-month availability responses of one campground into a
// single per-site view: the nights each site is bookable plus its descriptive
// metadata.

use crate::dates::{parse_iso_date, DateError};
use crate::recreation::{CampsiteRecord, MonthAvailability};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use tracing::debug;

/// Shown in place of descriptive fields the API left out.
pub const UNAVAILABLE: &str = "na";

/// Restricts which campsites take part in a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteFilter {
    pub campsite_type: Option<String>,
    pub campsite_ids: Vec<String>,
}

impl SiteFilter {
    pub fn new(campsite_type: Option<String>, campsite_ids: Vec<String>) -> Self {
        Self {
            campsite_type: campsite_type.filter(|t| !t.trim().is_empty()),
            campsite_ids,
        }
    }

    pub fn matches(&self, site_id: &str, record: &CampsiteRecord) -> bool {
        if !self
            .campsite_type
            .as_ref()
            .map_or(true, |wanted| record.campsite_type.as_ref() == Some(wanted))
        {
            return false;
        }

        if !self.campsite_ids.is_empty() {
            let id = record.campsite_id.as_deref().unwrap_or(site_id);
            if !self.campsite_ids.iter().any(|allowed| allowed == id) {
                return false;
            }
        }

        true
    }
}

/// Descriptive attributes of a campsite, captured the first time it is seen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SiteMetadata {
    pub loop_name: Option<String>,
    pub site: Option<String>,
    pub max_num_people: Option<u32>,
    pub capacity_rating: Option<String>,
    pub campsite_type: Option<String>,
}

impl From<&CampsiteRecord> for SiteMetadata {
    fn from(record: &CampsiteRecord) -> Self {
        Self {
            loop_name: record.loop_name.clone(),
            site: record.site.clone(),
            max_num_people: record.max_num_people,
            capacity_rating: record.capacity_rating.clone(),
            campsite_type: record.campsite_type.clone(),
        }
    }
}

impl SiteMetadata {
    pub fn loop_label(&self) -> &str {
        self.loop_name.as_deref().unwrap_or(UNAVAILABLE)
    }

    pub fn site_label(&self) -> &str {
        self.site.as_deref().unwrap_or(UNAVAILABLE)
    }

    pub fn max_people_label(&self) -> String {
        self.max_num_people
            .map_or_else(|| UNAVAILABLE.to_string(), |n| n.to_string())
    }

    pub fn capacity_label(&self) -> &str {
        self.capacity_rating.as_deref().unwrap_or(UNAVAILABLE)
    }

    pub fn type_label(&self) -> &str {
        self.campsite_type.as_deref().unwrap_or(UNAVAILABLE)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteEntry {
    pub metadata: SiteMetadata,
    pub dates: BTreeSet<NaiveDate>,
}

/// Bookable nights per campsite across every fetched month.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteAvailability {
    sites: BTreeMap<String, SiteEntry>,
}

impl SiteAvailability {
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn get(&self, site_id: &str) -> Option<&SiteEntry> {
        self.sites.get(site_id)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &SiteEntry)> {
        self.sites.iter()
    }
}

impl FromIterator<(String, SiteEntry)> for SiteAvailability {
    fn from_iter<I: IntoIterator<Item = (String, SiteEntry)>>(iter: I) -> Self {
        Self {
            sites: iter.into_iter().collect(),
        }
    }
}

/// Merge monthly responses into one `SiteAvailability`.
///
/// Every campsite in the responses is kept, so it counts toward the
/// campground's total. `filter` only decides whose nights are recorded: a
/// rejected site ends up with an empty date set, like a fully booked one.
pub fn aggregate(
    months: &[MonthAvailability],
    filter: &SiteFilter,
) -> Result<SiteAvailability, DateError> {
    let mut sites: BTreeMap<String, SiteEntry> = BTreeMap::new();

    for month in months {
        for (site_id, record) in &month.campsites {
            let entry = sites.entry(site_id.clone()).or_insert_with(|| SiteEntry {
                metadata: SiteMetadata::from(record),
                dates: BTreeSet::new(),
            });

            if !filter.matches(site_id, record) {
                continue;
            }

            for (day, status) in &record.availabilities {
                if status.is_bookable() {
                    entry.dates.insert(parse_iso_date(day)?);
                }
            }
        }
    }

    debug!(
        "Aggregated {} month(s) into {} campsite(s)",
        months.len(),
        sites.len()
    );

    Ok(SiteAvailability { sites })
}
