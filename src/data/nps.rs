//! nps.gov scraping client
//!
//! Walks the nps.gov state index and per-site pages, pulling structured
//! [`ParkSite`] records out of the markup. Every page load goes through the
//! [`CachedFetcher`], so each URL is fetched at most once per cache lifetime.

use scraper::{ElementRef, Html, Selector};
use std::collections::HashMap;
use thiserror::Error;

use crate::cache::{CacheStore, CachedFetcher, FetchError, HttpTransport, Transport};

use super::ParkSite;

/// Base URL that relative hrefs on nps.gov are resolved against
const BASE_URL: &str = "https://www.nps.gov";

/// The site-wide index page carrying the state dropdown
const INDEX_URL: &str = "https://www.nps.gov/index.htm";

/// Errors that can occur when scraping nps.gov
#[derive(Debug, Error)]
pub enum NpsError {
    /// Fetching the page failed
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// A structural container the scraper relies on was not found
    ///
    /// Individual missing fields inside a container are not errors (they
    /// become empty strings); this only fires when the page layout itself is
    /// unrecognizable.
    #[error("page structure not recognized: missing {0}")]
    MissingSection(&'static str),
}

/// Client for scraping park-site data from nps.gov
#[derive(Debug, Clone)]
pub struct NpsClient<T = HttpTransport> {
    fetcher: CachedFetcher<T>,
}

impl NpsClient<HttpTransport> {
    /// Creates a client backed by a real HTTP transport
    pub fn new() -> Self {
        Self {
            fetcher: CachedFetcher::new(),
        }
    }
}

impl Default for NpsClient<HttpTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> NpsClient<T> {
    /// Creates a client with a custom transport
    pub fn with_transport(transport: T) -> Self {
        Self {
            fetcher: CachedFetcher::with_transport(transport),
        }
    }

    /// Builds the mapping from lowercase state name to state-page URL
    ///
    /// Scrapes the state dropdown on the nps.gov index page, e.g.
    /// `{"michigan": "https://www.nps.gov/state/mi/index.htm", ...}`.
    pub async fn state_index(
        &self,
        store: &mut CacheStore,
    ) -> Result<HashMap<String, String>, NpsError> {
        let page = self.fetcher.fetch(INDEX_URL, store).await?;
        parse_state_index(&page)
    }

    /// Fetches a single site page and extracts its [`ParkSite`] record
    pub async fn site(&self, site_url: &str, store: &mut CacheStore) -> Result<ParkSite, NpsError> {
        let page = self.fetcher.fetch(site_url, store).await?;
        parse_site(&page)
    }

    /// Builds [`ParkSite`] records for every site listed on a state page
    pub async fn sites_for_state(
        &self,
        state_url: &str,
        store: &mut CacheStore,
    ) -> Result<Vec<ParkSite>, NpsError> {
        let page = self.fetcher.fetch(state_url, store).await?;
        let site_urls = parse_state_site_urls(&page)?;

        let mut sites = Vec::with_capacity(site_urls.len());
        for url in &site_urls {
            sites.push(self.site(url, store).await?);
        }
        Ok(sites)
    }
}

/// Parses the state dropdown out of the index page markup
fn parse_state_index(html: &str) -> Result<HashMap<String, String>, NpsError> {
    let document = Html::parse_document(html);
    let dropdown = document
        .select(&selector(".dropdown-menu.SearchBar-keywordSearch"))
        .next()
        .ok_or(NpsError::MissingSection("state dropdown"))?;

    let mut states = HashMap::new();
    for link in dropdown.select(&selector("a")) {
        if let Some(href) = link.value().attr("href") {
            let name = element_text(link).to_lowercase();
            states.insert(name, format!("{BASE_URL}{href}"));
        }
    }
    Ok(states)
}

/// Parses a per-site page into a [`ParkSite`]
///
/// Fields live in two containers: the footer contact block (address, postal
/// code, phone) and the hero banner (name, designation). A missing field
/// inside either container becomes an empty string.
fn parse_site(html: &str) -> Result<ParkSite, NpsError> {
    let document = Html::parse_document(html);

    let contact = document
        .select(&selector(".ParkFooter-contact"))
        .next()
        .ok_or(NpsError::MissingSection("footer contact block"))?;

    let zipcode = child_text(contact, ".postal-code");
    let locality = child_text(contact, r#"[itemprop="addressLocality"]"#);
    let region = child_text(contact, r#"[itemprop="addressRegion"]"#);
    let address = format!("{locality}, {region}");
    let phone = child_text(contact, ".tel");

    let banner = document
        .select(&selector("#HeroBanner"))
        .next()
        .ok_or(NpsError::MissingSection("hero banner"))?;

    let name = child_text(banner, ".Hero-title");
    let category = child_text(banner, ".Hero-designation");

    Ok(ParkSite {
        category,
        name,
        address,
        zipcode,
        phone,
    })
}

/// Parses a state page into the list of per-site page URLs
fn parse_state_site_urls(html: &str) -> Result<Vec<String>, NpsError> {
    let document = Html::parse_document(html);
    let list = document
        .select(&selector("#list_parks"))
        .next()
        .ok_or(NpsError::MissingSection("park list"))?;

    let mut urls = Vec::new();
    for entry in list.select(&selector(".clearfix")) {
        if let Some(link) = entry.select(&selector("a")).next() {
            if let Some(href) = link.value().attr("href") {
                urls.push(format!("{BASE_URL}{href}index.htm"));
            }
        }
    }
    Ok(urls)
}

/// Compiles a CSS selector known at compile time
fn selector(css: &str) -> Selector {
    // The selectors in this module are fixed strings; a parse failure is a bug
    Selector::parse(css).expect("static selector")
}

/// Trimmed text content of an element
fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}

/// Trimmed text of the first child matching `css`, or empty when absent
fn child_text(scope: ElementRef, css: &str) -> String {
    scope
        .select(&selector(css))
        .next()
        .map(element_text)
        .unwrap_or_default()
}
