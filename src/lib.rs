//! Parkscout library
//!
//! Cached scraping of nps.gov park-site listings plus MapQuest nearby-places
//! lookup. Exposed as a library for use in integration tests.

pub mod cache;
pub mod cli;
pub mod data;
