// Counts how many campsites of a campground can host the requested stay.

use crate::aggregator::SiteAvailability;
use crate::compactor::{consecutive_nights, ReservableRange};
use crate::dates::DateWindow;
use std::collections::BTreeMap;
use tracing::debug;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteCounts {
    /// Sites with at least one qualifying stay.
    pub current: usize,
    /// Every site considered, booked or not.
    pub maximum: usize,
    /// Qualifying stays, only for sites that have any.
    pub ranges_by_site: BTreeMap<String, Vec<ReservableRange>>,
}

/// Run the range compactor for every site, looking only at nights inside the
/// window so no stay reaches past what was asked for.
pub fn count_available_sites(
    sites: &SiteAvailability,
    window: &DateWindow,
    nights: usize,
) -> SiteCounts {
    let mut counts = SiteCounts {
        maximum: sites.len(),
        ..SiteCounts::default()
    };

    for (site_id, entry) in sites.iter() {
        let in_window = entry
            .dates
            .iter()
            .copied()
            .filter(|day| window.contains(*day));

        let ranges = consecutive_nights(in_window, nights);
        if ranges.is_empty() {
            continue;
        }

        counts.current += 1;
        debug!("Available site {}: {}", counts.current, site_id);
        counts.ranges_by_site.insert(site_id.clone(), ranges);
    }

    counts
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregator::SiteEntry;
    use crate::compactor::effective_nights;
    use crate::dates::parse_iso_date;
    use chrono::NaiveDate;

    fn date(value: &str) -> NaiveDate {
        parse_iso_date(value).unwrap()
    }

    fn site(days: &[&str]) -> SiteEntry {
        SiteEntry {
            dates: days.iter().map(|d| date(d)).collect(),
            ..SiteEntry::default()
        }
    }

    fn every_day(from: &str, to: &str) -> Vec<String> {
        let mut days = Vec::new();
        let mut day = date(from);
        while day <= date(to) {
            days.push(day.to_string());
            day = day.succ_opt().unwrap();
        }
        days
    }

    #[test]
    fn test_booked_site_is_counted_but_has_no_ranges() {
        let sites: SiteAvailability = vec![
            ("1".to_string(), site(&["2023-07-01", "2023-07-02", "2023-07-03"])),
            ("2".to_string(), site(&[])),
        ]
        .into_iter()
        .collect();
        let window = DateWindow::new(date("2023-07-01"), date("2023-07-04")).unwrap();

        let counts = count_available_sites(&sites, &window, 2);
        assert_eq!(counts.current, 1);
        assert_eq!(counts.maximum, 2);
        assert!(counts.ranges_by_site.contains_key("1"));
        assert!(!counts.ranges_by_site.contains_key("2"));
        assert_eq!(counts.ranges_by_site["1"].len(), 2);
    }

    #[test]
    fn test_unset_nights_requires_the_whole_window() {
        let july: Vec<String> = every_day("2023-07-01", "2023-07-31");
        let days: Vec<&str> = july.iter().map(String::as_str).collect();
        let sites: SiteAvailability = vec![("1".to_string(), site(&days))].into_iter().collect();
        let window = DateWindow::new(date("2023-07-01"), date("2023-07-10")).unwrap();

        let nights = effective_nights(None, window.num_days());
        assert_eq!(nights, 9);

        let counts = count_available_sites(&sites, &window, nights);
        assert_eq!(
            counts.ranges_by_site["1"],
            vec![ReservableRange {
                start: date("2023-07-01"),
                end: date("2023-07-10"),
            }]
        );
    }

    #[test]
    fn test_runs_do_not_extend_past_the_window() {
        // Open before and after the window, but the stay must start and end inside it.
        let june_to_july = every_day("2023-06-28", "2023-07-05");
        let days: Vec<&str> = june_to_july.iter().map(String::as_str).collect();
        let sites: SiteAvailability = vec![("1".to_string(), site(&days))].into_iter().collect();
        let window = DateWindow::new(date("2023-07-01"), date("2023-07-03")).unwrap();

        let counts = count_available_sites(&sites, &window, 2);
        assert_eq!(
            counts.ranges_by_site["1"],
            vec![ReservableRange {
                start: date("2023-07-01"),
                end: date("2023-07-03"),
            }]
        );
    }

    #[test]
    fn test_dates_outside_window_alone_do_not_count() {
        let sites: SiteAvailability = vec![("1".to_string(), site(&["2023-08-01", "2023-08-02"]))]
            .into_iter()
            .collect();
        let window = DateWindow::new(date("2023-07-01"), date("2023-07-03")).unwrap();

        let counts = count_available_sites(&sites, &window, 1);
        assert_eq!(counts.current, 0);
        assert_eq!(counts.maximum, 1);
        assert!(counts.ranges_by_site.is_empty());
    }
}
