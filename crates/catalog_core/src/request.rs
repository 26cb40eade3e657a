use url::Url;

use crate::{CategoryId, PricingTier, RatingThreshold, SearchMode};

/// Results requested per page.
pub const PAGE_SIZE: u32 = 20;

/// Longest search term the backend accepts, in characters.
pub const MAX_QUERY_CHARS: usize = 500;

/// Descriptor of one search call, derived from the filter state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub q: String,
    pub page: u32,
    pub limit: u32,
    pub category_id: Option<CategoryId>,
    pub pricing: Vec<PricingTier>,
    pub min_rating: Option<RatingThreshold>,
    pub search_type: Option<SearchMode>,
}

impl SearchRequest {
    /// Request for the first page of `q` with no facets.
    pub fn first_page(q: impl Into<String>) -> Self {
        Self {
            q: q.into(),
            page: 1,
            limit: PAGE_SIZE,
            category_id: None,
            pricing: Vec::new(),
            min_rating: None,
            search_type: None,
        }
    }

    /// Query parameters in wire order. Unset facets are omitted and every
    /// selected pricing tier becomes its own `pricing` occurrence.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::with_capacity(6 + self.pricing.len());
        pairs.push(("q", self.q.clone()));
        pairs.push(("page", self.page.to_string()));
        pairs.push(("limit", self.limit.to_string()));
        if let Some(category) = &self.category_id {
            pairs.push(("category_id", category.to_string()));
        }
        for tier in &self.pricing {
            pairs.push(("pricing", tier.as_str().to_string()));
        }
        if let Some(rating) = self.min_rating {
            pairs.push(("min_rating", rating.value().to_string()));
        }
        if let Some(mode) = self.search_type {
            pairs.push(("search_type", mode.as_str().to_string()));
        }
        pairs
    }

    /// Appends the query parameters to `endpoint`.
    pub fn to_url(&self, endpoint: &Url) -> Url {
        let mut url = endpoint.clone();
        {
            let mut query = url.query_pairs_mut();
            for (key, value) in self.query_pairs() {
                query.append_pair(key, &value);
            }
        }
        url
    }
}

/// Trims `raw` and caps it at [`MAX_QUERY_CHARS`].
pub fn normalize_query(raw: &str) -> String {
    raw.trim().chars().take(MAX_QUERY_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_page_carries_only_required_params() {
        let request = SearchRequest::first_page("writing assistant");
        assert_eq!(
            request.query_pairs(),
            vec![
                ("q", "writing assistant".to_string()),
                ("page", "1".to_string()),
                ("limit", "20".to_string()),
            ]
        );
    }

    #[test]
    fn to_url_repeats_pricing_and_encodes_term() {
        let endpoint = Url::parse("http://localhost:8000/api/v1/tools/search").unwrap();
        let request = SearchRequest {
            pricing: vec![PricingTier::Free, PricingTier::OpenSource],
            min_rating: Some(RatingThreshold::Four),
            ..SearchRequest::first_page("a&b")
        };

        let url = request.to_url(&endpoint);
        assert_eq!(
            url.query(),
            Some("q=a%26b&page=1&limit=20&pricing=free&pricing=open_source&min_rating=4")
        );
    }

    #[test]
    fn normalize_query_trims_and_caps_length() {
        assert_eq!(normalize_query("  ai  "), "ai");
        let long = "x".repeat(MAX_QUERY_CHARS + 20);
        assert_eq!(normalize_query(&long).chars().count(), MAX_QUERY_CHARS);
    }
}
