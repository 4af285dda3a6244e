//! Related queries

use serde::Deserialize;
use serde::Serialize;

/// A query searched together with the keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedQuery {
    /// The related search query.
    pub query: String,
    /// Relative score for top queries, growth percentage for rising ones.
    pub value: i64,
    /// The provider's display value (e.g. `"100"`, `"+250%"`, `"Breakout"`).
    pub formatted_value: String,
}

/// Top and rising queries related to a keyword.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelatedQueries {
    /// The keyword these queries relate to.
    pub keyword: String,
    /// Most popular related queries.
    pub top: Vec<RelatedQuery>,
    /// Queries with the biggest increase in search frequency.
    pub rising: Vec<RelatedQuery>,
}

impl RelatedQueries {
    /// Returns `true` if neither list has an entry.
    pub fn is_empty(&self) -> bool {
        self.top.is_empty() && self.rising.is_empty()
    }
}
