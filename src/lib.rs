// Campsite availability checker for recreation.gov campgrounds

pub mod aggregator;
pub mod checker;
pub mod client;
pub mod compactor;
pub mod config;
pub mod counter;
pub mod dates;
pub mod recreation;
pub mod report;

// Re-export key types for convenience
pub use aggregator::{aggregate, SiteAvailability, SiteEntry, SiteFilter, SiteMetadata};
pub use checker::{AvailabilityChecker, SearchQuery};
pub use client::{AvailabilitySource, ClientConfig, FetchError, NameResolver, RecreationClient};
pub use compactor::{consecutive_nights, effective_nights, ReservableRange};
pub use config::{ConfigError, ParkConfig, SearchConfig};
pub use counter::{count_available_sites, SiteCounts};
pub use dates::{DateError, DateWindow};
pub use recreation::{CampsiteRecord, MonthAvailability, SiteStatus};
pub use report::{render, AvailableSite, OutputFormat, ParkReport, RenderError};
