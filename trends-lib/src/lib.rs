//! Search-trends client library
//!
//! Normalizes interest-over-time queries (up to five keywords, a country and a
//! date range), fetches them from Google Trends with pacing and retries, and
//! caches results for an hour.
//!
//! ```ignore
//! use trends_lib::query::normalize;
//!
//! let query = normalize(&["cat", "dog"], "FR", start, end)?;
//! let client = trends_lib::shared_client()?;
//! let table = client.fetch_interest_over_time(&query).await?.into_inner();
//! std::fs::write("google_trends_data.csv", table.to_csv())?;
//! ```

pub mod cache;
pub mod error;
pub mod model;
pub mod provider;
pub mod query;
pub mod rate_limit;
pub mod response;

mod api;
mod client;
mod global;

pub use client::*;
pub use global::*;
pub use response::CacheStatus;
pub use response::Response;
