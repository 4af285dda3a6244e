//! Interest over time example.
//!
//! Run with: cargo run --example interest_over_time -- cat dog
//!
//! Optional .env overrides:
//! - TRENDS_COUNTRY (default FR)

use std::env;

use chrono::Duration;
use chrono::Utc;
use trends_lib::query::normalize;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = dotenvy::dotenv();

    let mut keywords: Vec<String> = env::args().skip(1).collect();
    if keywords.is_empty() {
        keywords = vec!["cat".to_string(), "dog".to_string()];
    }
    let country = env::var("TRENDS_COUNTRY").unwrap_or_else(|_| "FR".to_string());

    let end = Utc::now().date_naive();
    let query = normalize(&keywords, &country, end - Duration::days(90), end)?;
    for warning in query.warnings() {
        eprintln!("warning: {}", warning);
    }

    println!("Fetching {} for {}...\n", query.timeframe(), query.country());

    let client = trends_lib::shared_client()?;
    let response = client.fetch_interest_over_time(&query).await?;

    println!("Rows: {}", response.data().len());
    println!("Cached: {}", response.is_cached());
    println!("\n{}", response.data().to_csv());

    Ok(())
}
