// Data structures for the recreation.gov availability and campground JSON responses

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const WEB_BASE_URL: &str = "https://www.recreation.gov";

/// One month of availability for every campsite in a campground.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct MonthAvailability {
    #[serde(default)]
    pub campsites: BTreeMap<String, CampsiteRecord>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct CampsiteRecord {
    #[serde(default)]
    pub campsite_id: Option<String>,
    #[serde(default)]
    pub campsite_type: Option<String>,
    #[serde(rename = "loop", default)]
    pub loop_name: Option<String>,
    #[serde(default)]
    pub site: Option<String>,
    #[serde(default)]
    pub max_num_people: Option<u32>,
    #[serde(default)]
    pub capacity_rating: Option<String>,
    // Keyed by `2023-07-01T00:00:00Z` style timestamps
    #[serde(default)]
    pub availabilities: BTreeMap<String, SiteStatus>,
}

/// Reservation status of one campsite on one night.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum SiteStatus {
    Available,
    Reserved,
    #[serde(rename = "Not Available")]
    NotAvailable,
    #[serde(rename = "Not Reservable")]
    NotReservable,
    #[serde(rename = "Not Reservable Management")]
    NotReservableManagement,
    Open,
    Lottery,
    #[serde(rename = "NYR")]
    NotYetReleased,
    #[serde(other)]
    Unknown,
}

impl SiteStatus {
    /// Whether a night with this status can be booked right now.
    pub fn is_bookable(self) -> bool {
        matches!(self, SiteStatus::Available)
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CampgroundResponse {
    #[serde(default)]
    pub campground: CampgroundDetails,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CampgroundDetails {
    #[serde(default)]
    pub facility_id: Option<String>,
    #[serde(default)]
    pub facility_name: Option<String>,
}

pub fn campground_url(park_id: &str) -> String {
    format!("{}/camping/campgrounds/{}", WEB_BASE_URL, park_id)
}

pub fn campsite_url(site_id: &str) -> String {
    format!("{}/camping/campsites/{}", WEB_BASE_URL, site_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test]
    fn test_parse_month_response() {
        let json = r#"{
            "campsites": {
                "70923": {
                    "availabilities": {
                        "2023-07-01T00:00:00Z": "Available",
                        "2023-07-02T00:00:00Z": "Reserved",
                        "2023-07-03T00:00:00Z": "Not Reservable Management"
                    },
                    "campsite_id": "70923",
                    "campsite_reserve_type": "Site-Specific",
                    "campsite_type": "STANDARD NONELECTRIC",
                    "capacity_rating": "Single",
                    "loop": "Loop A",
                    "max_num_people": 6,
                    "min_num_people": 0,
                    "quantities": null,
                    "site": "012"
                }
            },
            "count": 1
        }"#;

        let response: MonthAvailability = serde_json::from_str(json).unwrap();
        let record = &response.campsites["70923"];
        assert_eq!(record.campsite_id.as_deref(), Some("70923"));
        assert_eq!(record.loop_name.as_deref(), Some("Loop A"));
        assert_eq!(record.max_num_people, Some(6));
        assert_eq!(record.availabilities.len(), 3);
        assert_eq!(
            record.availabilities["2023-07-03T00:00:00Z"],
            SiteStatus::NotReservableManagement
        );
    }

    #[test]
    fn test_missing_metadata_is_tolerated() {
        let json = r#"{"campsites": {"1": {"availabilities": {}}}}"#;
        let response: MonthAvailability = serde_json::from_str(json).unwrap();
        let record = &response.campsites["1"];
        assert_eq!(record.loop_name, None);
        assert_eq!(record.capacity_rating, None);
        assert_eq!(record.max_num_people, None);
    }

    #[test_case("\"Available\"", SiteStatus::Available, true; "available")]
    #[test_case("\"Reserved\"", SiteStatus::Reserved, false; "reserved")]
    #[test_case("\"Not Available\"", SiteStatus::NotAvailable, false; "not available")]
    #[test_case("\"NYR\"", SiteStatus::NotYetReleased, false; "not yet released")]
    #[test_case("\"Walk-up Only\"", SiteStatus::Unknown, false; "unrecognised status")]
    fn test_status_bookability(raw: &str, expected: SiteStatus, bookable: bool) {
        let status: SiteStatus = serde_json::from_str(raw).unwrap();
        assert_eq!(status, expected);
        assert_eq!(status.is_bookable(), bookable);
    }

    #[test]
    fn test_campground_name() {
        let json = r#"{"campground": {"facility_id": "232447", "facility_name": "UPPER PINES"}}"#;
        let response: CampgroundResponse = serde_json::from_str(json).unwrap();
        assert_eq!(
            response.campground.facility_name.as_deref(),
            Some("UPPER PINES")
        );
        assert_eq!(
            campground_url("232447"),
            "https://www.recreation.gov/camping/campgrounds/232447"
        );
    }
}
