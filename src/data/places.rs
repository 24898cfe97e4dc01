//! MapQuest nearby-places client
//!
//! Queries the MapQuest radius-search API for points of interest within ten
//! miles of a site's postal code. Requests flow through the cached fetcher,
//! so a given postal code is only looked up once per cache lifetime.

use serde::Deserialize;
use thiserror::Error;

use crate::cache::{CacheStore, CachedFetcher, FetchError, HttpTransport, Transport};

/// MapQuest radius-search endpoint
const RADIUS_SEARCH_URL: &str = "http://www.mapquestapi.com/search/v2/radius";

/// Search radius in miles
const SEARCH_RADIUS: u32 = 10;

/// Maximum number of results to request
const MAX_MATCHES: u32 = 10;

/// Errors that can occur when looking up nearby places
#[derive(Debug, Error)]
pub enum PlacesError {
    /// Fetching the API response failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The API response was not the expected JSON shape
    #[error("failed to parse places response: {0}")]
    Parse(#[from] serde_json::Error),
}

/// A point of interest near a park site
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Place {
    /// Name of the place
    pub name: String,
    /// Category, e.g. "Restaurants" (may be blank)
    pub category: String,
    /// Street address (may be blank)
    pub address: String,
    /// City (may be blank)
    pub city: String,
}

impl Place {
    /// One-line summary, substituting placeholders for blank fields
    pub fn describe(&self) -> String {
        let category = non_empty_or(&self.category, "no category");
        let address = non_empty_or(&self.address, "no address");
        let city = non_empty_or(&self.city, "no city");
        format!("- {} ({}): {}, {}", self.name, category, address, city)
    }
}

/// Returns `value` unless it is empty, else the placeholder
fn non_empty_or<'a>(value: &'a str, placeholder: &'a str) -> &'a str {
    if value.is_empty() {
        placeholder
    } else {
        value
    }
}

/// Client for the MapQuest radius-search API
#[derive(Debug, Clone)]
pub struct PlacesClient<T = HttpTransport> {
    fetcher: CachedFetcher<T>,
    api_key: String,
}

impl PlacesClient<HttpTransport> {
    /// Creates a client backed by a real HTTP transport
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            fetcher: CachedFetcher::new(),
            api_key: api_key.into(),
        }
    }
}

impl<T: Transport> PlacesClient<T> {
    /// Creates a client with a custom transport
    pub fn with_transport(api_key: impl Into<String>, transport: T) -> Self {
        Self {
            fetcher: CachedFetcher::with_transport(transport),
            api_key: api_key.into(),
        }
    }

    /// Looks up places within ten miles of `zipcode`
    ///
    /// An empty postal code short-circuits to an empty result without any
    /// lookup being performed: some sites have no postal code in their
    /// markup, and that is not an error.
    pub async fn nearby(
        &self,
        zipcode: &str,
        store: &mut CacheStore,
    ) -> Result<Vec<Place>, PlacesError> {
        if zipcode.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!(
            "{RADIUS_SEARCH_URL}?key={}&origin={}&radius={SEARCH_RADIUS}\
             &maxMatches={MAX_MATCHES}&ambiguities=ignore&outFormat=json",
            self.api_key, zipcode
        );
        let body = self.fetcher.fetch(&url, store).await?;

        let response: RadiusResponse = serde_json::from_str(&body)?;
        Ok(response
            .search_results
            .into_iter()
            .map(Place::from)
            .collect())
    }
}

impl From<SearchResult> for Place {
    fn from(result: SearchResult) -> Self {
        Self {
            name: result.name,
            category: result.fields.group_sic_code_name,
            address: result.fields.address,
            city: result.fields.city,
        }
    }
}

/// MapQuest radius-search response structure
#[derive(Debug, Deserialize)]
struct RadiusResponse {
    #[serde(rename = "searchResults", default)]
    search_results: Vec<SearchResult>,
}

/// A single search result from MapQuest
#[derive(Debug, Deserialize)]
struct SearchResult {
    name: String,
    fields: ResultFields,
}

/// Attribute block of a search result
#[derive(Debug, Deserialize)]
struct ResultFields {
    #[serde(default)]
    group_sic_code_name: String,
    #[serde(default)]
    address: String,
    #[serde(default)]
    city: String,
}
