//! Provider wire format
//!
//! Response bodies start with an anti-XSSI prefix (`)]}'`) before the JSON
//! document.

use chrono::DateTime;
use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use super::TrendsRequest;
use crate::error::ApiError;
use crate::model::RelatedQueries;
use crate::model::RelatedQuery;
use crate::model::TrendsResult;
use crate::model::TrendsRow;

pub(crate) const WIDGET_TIMESERIES: &str = "TIMESERIES";
pub(crate) const WIDGET_RELATED_QUERIES: &str = "RELATED_QUERIES";

const MAX_BODY_IN_ERROR: usize = 512;

// =============================================================================
// Explore
// =============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct ExploreRequest<'a> {
    comparison_item: Vec<ComparisonItem<'a>>,
    category: u32,
    property: &'static str,
}

#[derive(Debug, Serialize)]
struct ComparisonItem<'a> {
    keyword: &'a str,
    time: &'a str,
    geo: &'a str,
}

/// Renders the `req` parameter of the explore endpoint.
pub(crate) fn explore_request(request: &TrendsRequest) -> Result<String, ApiError> {
    let body = ExploreRequest {
        comparison_item: request
            .keywords
            .iter()
            .map(|keyword| ComparisonItem {
                keyword,
                time: &request.timeframe,
                geo: &request.geo,
            })
            .collect(),
        category: request.category,
        property: "",
    };
    serde_json::to_string(&body).map_err(|e| ApiError::parse(e.to_string()))
}

#[derive(Debug, Deserialize)]
struct ExploreResponse {
    #[serde(default)]
    widgets: Vec<Widget>,
}

/// A widget of the explore response: a request and the token authorizing it.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct Widget {
    pub id: String,
    #[serde(default)]
    pub request: Option<Value>,
    #[serde(default)]
    pub token: Option<String>,
}

impl Widget {
    /// Returns the serialized widget request and its token.
    pub fn request_and_token(&self) -> Result<(String, String), ApiError> {
        let request = self
            .request
            .as_ref()
            .ok_or_else(|| ApiError::parse(format!("widget {} has no request", self.id)))?;
        let token = self
            .token
            .clone()
            .ok_or_else(|| ApiError::parse(format!("widget {} has no token", self.id)))?;
        let request = serde_json::to_string(request).map_err(|e| ApiError::parse(e.to_string()))?;
        Ok((request, token))
    }
}

/// Finds the first widget whose id starts with `prefix`.
pub(crate) fn find_widget(body: &str, prefix: &str) -> Result<Widget, ApiError> {
    let explore: ExploreResponse = parse_json(body)?;
    explore
        .widgets
        .into_iter()
        .find(|w| w.id.starts_with(prefix))
        .ok_or_else(|| ApiError::parse_with_body(format!("no {} widget", prefix), excerpt(body)))
}

// =============================================================================
// Interest over time
// =============================================================================

#[derive(Debug, Deserialize)]
struct MultilineResponse {
    default: MultilineDefault,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MultilineDefault {
    #[serde(default)]
    timeline_data: Vec<TimelinePoint>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TimelinePoint {
    time: String,
    #[serde(default)]
    value: Vec<i64>,
    #[serde(default)]
    is_partial: bool,
}

/// Parses a `widgetdata/multiline` body into a table.
pub(crate) fn parse_timeline(body: &str, keywords: &[String]) -> Result<TrendsResult, ApiError> {
    let response: MultilineResponse = parse_json(body)?;

    let mut rows = Vec::with_capacity(response.default.timeline_data.len());
    for point in response.default.timeline_data {
        let seconds: i64 = point
            .time
            .parse()
            .map_err(|_| ApiError::parse(format!("invalid timestamp {:?}", point.time)))?;
        let date = DateTime::from_timestamp(seconds, 0)
            .ok_or_else(|| ApiError::parse(format!("timestamp {} out of range", seconds)))?
            .date_naive();

        if point.value.len() != keywords.len() {
            return Err(ApiError::parse(format!(
                "row {} has {} values for {} keywords",
                date,
                point.value.len(),
                keywords.len()
            )));
        }

        rows.push(TrendsRow {
            date,
            values: point.value.iter().map(|v| (*v).clamp(0, 100) as u8).collect(),
            is_partial: point.is_partial,
        });
    }

    Ok(TrendsResult::new(keywords.to_vec(), rows))
}

// =============================================================================
// Related queries
// =============================================================================

#[derive(Debug, Deserialize)]
struct RelatedResponse {
    default: RelatedDefault,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RelatedDefault {
    #[serde(default)]
    ranked_list: Vec<RankedList>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedList {
    #[serde(default)]
    ranked_keyword: Vec<RankedKeyword>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedKeyword {
    query: String,
    value: i64,
    #[serde(default)]
    formatted_value: String,
}

/// Parses a `widgetdata/relatedsearches` body. The first ranked list holds
/// the top queries, the second the rising ones.
pub(crate) fn parse_related(body: &str, keyword: &str) -> Result<RelatedQueries, ApiError> {
    let response: RelatedResponse = parse_json(body)?;
    let mut lists = response.default.ranked_list.into_iter().map(|list| {
        list.ranked_keyword
            .into_iter()
            .map(|k| RelatedQuery {
                query: k.query,
                value: k.value,
                formatted_value: k.formatted_value,
            })
            .collect::<Vec<_>>()
    });

    Ok(RelatedQueries {
        keyword: keyword.to_string(),
        top: lists.next().unwrap_or_default(),
        rising: lists.next().unwrap_or_default(),
    })
}

// =============================================================================
// Helpers
// =============================================================================

/// Skips the anti-XSSI prefix and deserializes the JSON document.
fn parse_json<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let start = body
        .find('{')
        .ok_or_else(|| ApiError::parse_with_body("response is not JSON", excerpt(body)))?;
    serde_json::from_str(&body[start..])
        .map_err(|e| ApiError::parse_with_body(e.to_string(), excerpt(body)))
}

/// First bytes of a body, for error reports.
pub(crate) fn excerpt(body: &str) -> String {
    if body.len() <= MAX_BODY_IN_ERROR {
        return body.to_string();
    }
    let mut end = MAX_BODY_IN_ERROR;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &body[..end])
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    const EXPLORE: &str = r#")]}'
{"widgets":[
  {"id":"TIMESERIES","request":{"time":"2024-01-01 2024-03-31","resolution":"WEEK","locale":"fr-FR"},"token":"APP6_UEAAAAA","title":"Interest over time"},
  {"id":"GEO_MAP","request":{"geo":{"country":"FR"}},"token":"APP6_GEO"},
  {"id":"RELATED_QUERIES_0","request":{"restriction":{"geo":{"country":"FR"}}},"token":"APP6_REL"}
]}"#;

    const MULTILINE: &str = r#")]}',
{"default":{"timelineData":[
  {"time":"1704067200","formattedTime":"31 déc. 2023 – 6 janv. 2024","value":[80,45],"hasData":[true,true],"formattedValue":["80","45"]},
  {"time":"1704672000","formattedTime":"7 – 13 janv. 2024","value":[100,50],"hasData":[true,true],"formattedValue":["100","50"]},
  {"time":"1711238400","formattedTime":"24 – 30 mars 2024","value":[60,30],"hasData":[true,true],"formattedValue":["60","30"],"isPartial":true}
],"averages":[]}}"#;

    const RELATED: &str = r#")]}',
{"default":{"rankedList":[
  {"rankedKeyword":[{"query":"cat food","value":100,"formattedValue":"100","hasData":true},{"query":"cat toys","value":42,"formattedValue":"42","hasData":true}]},
  {"rankedKeyword":[{"query":"cat meme","value":5350,"formattedValue":"Breakout","hasData":true}]}
]}}"#;

    fn keywords() -> Vec<String> {
        vec!["cat".to_string(), "dog".to_string()]
    }

    #[test]
    fn test_explore_request() {
        let request = TrendsRequest {
            keywords: keywords(),
            category: 0,
            geo: "FR".to_string(),
            timeframe: "2024-01-01 2024-03-31".to_string(),
        };
        assert_eq!(
            explore_request(&request).unwrap(),
            concat!(
                r#"{"comparisonItem":["#,
                r#"{"keyword":"cat","time":"2024-01-01 2024-03-31","geo":"FR"},"#,
                r#"{"keyword":"dog","time":"2024-01-01 2024-03-31","geo":"FR"}],"#,
                r#""category":0,"property":""}"#
            )
        );
    }

    #[test]
    fn test_find_widget() {
        let widget = find_widget(EXPLORE, WIDGET_TIMESERIES).unwrap();
        let (request, token) = widget.request_and_token().unwrap();
        assert_eq!(token, "APP6_UEAAAAA");
        assert!(request.contains(r#""resolution":"WEEK""#));

        let related = find_widget(EXPLORE, WIDGET_RELATED_QUERIES).unwrap();
        assert_eq!(related.id, "RELATED_QUERIES_0");
    }

    #[test]
    fn test_missing_widget() {
        let err = find_widget(r#")]}' {"widgets":[]}"#, WIDGET_TIMESERIES).unwrap_err();
        assert!(matches!(err, ApiError::Parse { .. }));
    }

    #[test]
    fn test_parse_timeline() {
        let table = parse_timeline(MULTILINE, &keywords()).unwrap();
        assert_eq!(table.keywords(), keywords().as_slice());
        assert_eq!(table.len(), 3);

        let first = &table.rows()[0];
        assert_eq!(first.date, NaiveDate::from_ymd_opt(2024, 1, 1).unwrap());
        assert_eq!(first.values, vec![80, 45]);
        assert!(!first.is_partial);
        assert!(table.rows()[2].is_partial);
    }

    #[test]
    fn test_parse_empty_timeline() {
        let body = r#")]}', {"default":{"timelineData":[],"averages":[]}}"#;
        assert!(parse_timeline(body, &keywords()).unwrap().is_empty());
    }

    #[test]
    fn test_parse_timeline_value_mismatch() {
        let body = r#")]}', {"default":{"timelineData":[{"time":"1704067200","value":[1]}]}}"#;
        assert!(matches!(
            parse_timeline(body, &keywords()),
            Err(ApiError::Parse { .. })
        ));
    }

    #[test]
    fn test_parse_related() {
        let related = parse_related(RELATED, "cat").unwrap();
        assert_eq!(related.keyword, "cat");
        assert_eq!(related.top.len(), 2);
        assert_eq!(related.top[0].query, "cat food");
        assert_eq!(related.rising[0].formatted_value, "Breakout");
        assert_eq!(related.rising[0].value, 5350);
    }

    #[test]
    fn test_not_json() {
        let err = parse_timeline("<html>sorry</html>", &keywords()).unwrap_err();
        match err {
            ApiError::Parse { body, .. } => assert_eq!(body.as_deref(), Some("<html>sorry</html>")),
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let body = "é".repeat(MAX_BODY_IN_ERROR);
        let short = excerpt(&body);
        assert!(short.ends_with("..."));
        assert!(short.len() <= MAX_BODY_IN_ERROR + 3);
    }
}
