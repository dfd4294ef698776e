//! Structured query construction
//!
//! Turns a validated [`SearchRequest`] into the field-scoped, paginated,
//! highlighted query that is sent to Solr.

use crate::search::SearchRequest;
use serde::{Deserialize, Serialize};

/// Opening highlight marker
pub const HIGHLIGHT_PRE: &str = "<em>";

/// Closing highlight marker
pub const HIGHLIGHT_POST: &str = "</em>";

/// Field results are ranked by
pub const SCORE_FIELD: &str = "score";

/// Sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Desc,
}

impl SortOrder {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortOrder::Desc => "desc",
        }
    }
}

/// A single sort clause
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortClause {
    pub field: String,
    pub order: SortOrder,
}

impl SortClause {
    /// Relevance ordering, best match first
    pub fn by_score() -> Self {
        Self {
            field: SCORE_FIELD.to_string(),
            order: SortOrder::Desc,
        }
    }
}

/// Highlighting parameters
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighlightSpec {
    pub enabled: bool,
    pub fields: Vec<String>,
    pub pre: String,
    pub post: String,
}

impl HighlightSpec {
    /// Highlight a single field with the standard markers
    pub fn on_field(field: impl Into<String>) -> Self {
        Self {
            enabled: true,
            fields: vec![field.into()],
            pre: HIGHLIGHT_PRE.to_string(),
            post: HIGHLIGHT_POST.to_string(),
        }
    }
}

/// Query sent to the search engine for one request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StructuredQuery {
    /// Query text scoped to the target field
    pub field_query: String,
    /// Index of the first document to return
    pub offset: u64,
    /// Maximum number of documents to return
    pub limit: u32,
    pub sort: SortClause,
    pub highlight: HighlightSpec,
}

impl StructuredQuery {
    /// Build the query for a request against `field`
    pub fn build(request: &SearchRequest, field: &str) -> Self {
        Self {
            field_query: format!("{}:({})", field, request.query()),
            offset: request.offset(),
            limit: request.page_size(),
            sort: SortClause::by_score(),
            highlight: HighlightSpec::on_field(field),
        }
    }

    /// Solr request parameters in a stable order
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = vec![
            ("q".to_string(), self.field_query.clone()),
            ("start".to_string(), self.offset.to_string()),
            ("rows".to_string(), self.limit.to_string()),
            (
                "sort".to_string(),
                format!("{} {}", self.sort.field, self.sort.order.as_str()),
            ),
        ];

        if self.highlight.enabled {
            params.push(("hl".to_string(), "true".to_string()));
            params.push(("hl.fl".to_string(), self.highlight.fields.join(",")));
            // Solr's classic highlighter reads hl.simple.*, the unified one hl.tag.*
            params.push(("hl.simple.pre".to_string(), self.highlight.pre.clone()));
            params.push(("hl.simple.post".to_string(), self.highlight.post.clone()));
            params.push(("hl.tag.pre".to_string(), self.highlight.pre.clone()));
            params.push(("hl.tag.post".to_string(), self.highlight.post.clone()));
        }

        params.push(("wt".to_string(), "json".to_string()));
        params
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
        params
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    #[test]
    fn test_first_page_query() {
        let request = SearchRequest::new("cat", Some(0), Some(10), 100).unwrap();
        let query = StructuredQuery::build(&request, "text");

        assert_eq!(query.field_query, "text:(cat)");
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 10);
        assert_eq!(query.sort, SortClause::by_score());
        assert_eq!(query.sort.order, SortOrder::Desc);
        assert!(query.highlight.enabled);
        assert_eq!(query.highlight.fields, vec!["text".to_string()]);
        assert_eq!(query.highlight.pre, "<em>");
        assert_eq!(query.highlight.post, "</em>");
    }

    #[test]
    fn test_offset_is_page_times_size() {
        let request = SearchRequest::new("cat", Some(2), Some(5), 100).unwrap();
        let query = StructuredQuery::build(&request, "text");
        assert_eq!(query.offset, 10);
        assert_eq!(query.limit, 5);

        for (page, size) in [(0, 1), (1, 1), (3, 7), (9, 100), (21_474_836, 100)] {
            let request = SearchRequest::new("q", Some(page), Some(size), 100).unwrap();
            let query = StructuredQuery::build(&request, "text");
            assert_eq!(query.offset, page as u64 * size as u64);
            assert_eq!(query.limit as i64, size);
        }
    }

    #[test]
    fn test_defaults_when_omitted() {
        let request = SearchRequest::new("cat", None, None, 100).unwrap();
        let query = StructuredQuery::build(&request, "mytext");
        assert_eq!(query.offset, 0);
        assert_eq!(query.limit, 10);
        assert_eq!(query.field_query, "mytext:(cat)");
        assert_eq!(query.highlight.fields, vec!["mytext".to_string()]);
    }

    #[test]
    fn test_multi_word_query_stays_on_field() {
        let request = SearchRequest::new("black cat", None, None, 100).unwrap();
        let query = StructuredQuery::build(&request, "text");
        assert_eq!(query.field_query, "text:(black cat)");
    }

    #[test]
    fn test_solr_params() {
        let request = SearchRequest::new("cat", Some(2), Some(5), 100).unwrap();
        let params = StructuredQuery::build(&request, "text").to_params();

        assert_eq!(param(&params, "q"), Some("text:(cat)"));
        assert_eq!(param(&params, "start"), Some("10"));
        assert_eq!(param(&params, "rows"), Some("5"));
        assert_eq!(param(&params, "sort"), Some("score desc"));
        assert_eq!(param(&params, "hl"), Some("true"));
        assert_eq!(param(&params, "hl.fl"), Some("text"));
        assert_eq!(param(&params, "hl.simple.pre"), Some("<em>"));
        assert_eq!(param(&params, "hl.simple.post"), Some("</em>"));
        assert_eq!(param(&params, "wt"), Some("json"));
    }
}
