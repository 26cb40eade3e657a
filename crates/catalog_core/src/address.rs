//! Shareable page addresses. Only the search term is encoded.
use url::Url;

pub const QUERY_PARAM: &str = "q";

/// Search term carried by a page address, if any.
pub fn initial_query_from_url(url: &Url) -> Option<String> {
    url.query_pairs()
        .find(|(key, _)| key == QUERY_PARAM)
        .map(|(_, value)| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Returns `page_url` with its `q` parameter replaced by `query`.
/// Other parameters are kept; an empty term removes `q` entirely.
pub fn shareable_url(page_url: &Url, query: &str) -> Url {
    let kept: Vec<(String, String)> = page_url
        .query_pairs()
        .filter(|(key, _)| key != QUERY_PARAM)
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    let query = query.trim();

    let mut url = page_url.clone();
    url.set_query(None);
    if kept.is_empty() && query.is_empty() {
        return url;
    }
    {
        let mut pairs = url.query_pairs_mut();
        for (key, value) in &kept {
            pairs.append_pair(key, value);
        }
        if !query.is_empty() {
            pairs.append_pair(QUERY_PARAM, query);
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_seed_query_from_address() {
        let url = Url::parse("https://tools.example/search?q=image+upscaler&ref=home").unwrap();
        assert_eq!(initial_query_from_url(&url).as_deref(), Some("image upscaler"));

        let blank = Url::parse("https://tools.example/search?q=%20%20").unwrap();
        assert_eq!(initial_query_from_url(&blank), None);
    }

    #[test]
    fn replaces_query_and_keeps_other_params() {
        let url = Url::parse("https://tools.example/search?ref=home&q=old").unwrap();
        let shared = shareable_url(&url, " new term ");
        assert_eq!(shared.as_str(), "https://tools.example/search?ref=home&q=new+term");
    }

    #[test]
    fn empty_term_drops_query_string() {
        let url = Url::parse("https://tools.example/search?q=old").unwrap();
        assert_eq!(shareable_url(&url, "").as_str(), "https://tools.example/search");
    }
}
