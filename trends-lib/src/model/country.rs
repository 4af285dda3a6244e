//! Supported countries

/// A country the explorer can scope a query to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Country {
    /// ISO 3166-1 alpha-2 code, as sent to the provider.
    pub code: &'static str,
    /// Display name.
    pub name: &'static str,
}

impl Country {
    const fn new(code: &'static str, name: &'static str) -> Self {
        Self { code, name }
    }
}

/// Countries offered to the user.
pub const COUNTRIES: &[Country] = &[
    Country::new("FR", "France"),
    Country::new("US", "United States"),
    Country::new("GB", "United Kingdom"),
    Country::new("DE", "Germany"),
    Country::new("ES", "Spain"),
    Country::new("IT", "Italy"),
    Country::new("CA", "Canada"),
];

/// Returns the display name of a country code (case-insensitive).
pub fn country_name(code: &str) -> Option<&'static str> {
    COUNTRIES
        .iter()
        .find(|c| c.code.eq_ignore_ascii_case(code.trim()))
        .map(|c| c.name)
}
