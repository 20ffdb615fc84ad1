// Drives a search: fetch each month of each campground in turn, reduce the
// responses to qualifying stays and assemble the report data.

use crate::aggregator::{aggregate, SiteAvailability, SiteFilter};
use crate::client::{AvailabilitySource, FetchError, NameResolver};
use crate::compactor::effective_nights;
use crate::counter::count_available_sites;
use crate::dates::DateWindow;
use crate::report::{sort_parks, ParkReport};
use tracing::{debug, info, warn};

/// What one search asks about, shared by every campground it covers.
#[derive(Debug, Clone)]
pub struct SearchQuery {
    pub window: DateWindow,
    /// Minimum stay; `None` or out-of-range values mean the whole window.
    pub nights: Option<i64>,
    pub filter: SiteFilter,
}

impl SearchQuery {
    pub fn new(window: DateWindow) -> Self {
        Self {
            window,
            nights: None,
            filter: SiteFilter::default(),
        }
    }

    pub fn with_nights(mut self, nights: Option<i64>) -> Self {
        self.nights = nights;
        self
    }

    pub fn with_filter(mut self, filter: SiteFilter) -> Self {
        self.filter = filter;
        self
    }
}

pub struct AvailabilityChecker<C> {
    client: C,
}

impl<C> AvailabilityChecker<C>
where
    C: AvailabilitySource + NameResolver,
{
    pub fn new(client: C) -> Self {
        Self { client }
    }

    /// Fetch every month the window touches, one after another, and merge
    /// them. The first failed fetch aborts the whole campground.
    pub async fn get_park_information(
        &self,
        park_id: &str,
        query: &SearchQuery,
    ) -> Result<SiteAvailability, FetchError> {
        let mut months = Vec::new();
        for month in query.window.month_starts() {
            debug!("Fetching park {} for month {}", park_id, month);
            months.push(self.client.fetch_month_availability(park_id, month).await?);
        }

        Ok(aggregate(&months, &query.filter)?)
    }

    /// Human-readable campground name, falling back to the id.
    pub async fn park_name(&self, park_id: &str) -> String {
        match self.client.resolve_park_name(park_id).await {
            Ok(name) => name,
            Err(e) => {
                warn!("Could not resolve name of park {}: {}", park_id, e);
                park_id.to_string()
            }
        }
    }

    pub async fn check_park(
        &self,
        park_id: &str,
        query: &SearchQuery,
    ) -> Result<ParkReport, FetchError> {
        let sites = self.get_park_information(park_id, query).await?;
        let park_name = self.park_name(park_id).await;

        let nights = effective_nights(query.nights, query.window.num_days());
        let counts = count_available_sites(&sites, &query.window, nights);

        info!(
            "{} ({}): {} site(s) available out of {} site(s)",
            park_name, park_id, counts.current, counts.maximum
        );

        Ok(ParkReport::new(park_id, park_name, &sites, counts))
    }

    /// Check campgrounds in order and return their reports sorted by name.
    pub async fn check_parks<I, S>(
        &self,
        park_ids: I,
        query: &SearchQuery,
    ) -> Result<Vec<ParkReport>, FetchError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut reports = Vec::new();
        for park_id in park_ids {
            reports.push(self.check_park(park_id.as_ref(), query).await?);
        }

        sort_parks(&mut reports);
        Ok(reports)
    }
}
