//! Core data models for parkscout
//!
//! This module contains the record types extracted from scraped pages and
//! the places API, along with the clients that produce them.

pub mod nps;
pub mod places;

pub use nps::{NpsClient, NpsError};
pub use places::{Place, PlacesClient, PlacesError};

use serde::{Deserialize, Serialize};

/// A single national park site as listed on nps.gov
///
/// Every field is extracted from page markup and defaults to an empty string
/// when the corresponding element is absent; downstream code treats an empty
/// field as "absent". Some sites legitimately have a blank category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParkSite {
    /// Site designation, e.g. "National Park" (may be blank)
    pub category: String,
    /// Site name, e.g. "Isle Royale"
    pub name: String,
    /// City and state, e.g. "Houghton, MI"
    pub address: String,
    /// Postal code, e.g. "49931" or "82190-0168"
    pub zipcode: String,
    /// Phone number, e.g. "(616) 319-7906"
    pub phone: String,
}

impl ParkSite {
    /// One-line summary used in the numbered site listing
    pub fn info(&self) -> String {
        format!(
            "{} ({}): {} {}",
            self.name, self.category, self.address, self.zipcode
        )
    }
}
