use serde::Deserialize;

use super::{PageSource, SearchSource};
use crate::error::Result;
use crate::mediawiki::MediaWikiClient;
use crate::model::Lang;

#[derive(Debug, Deserialize)]
struct SearchResponse {
    query: Option<SearchQuery>,
}

#[derive(Debug, Deserialize)]
struct SearchQuery {
    search: Vec<SearchHit>,
}

#[derive(Debug, Deserialize)]
struct SearchHit {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ExtractResponse {
    query: Option<ExtractQuery>,
}

#[derive(Debug, Deserialize)]
struct ExtractQuery {
    #[serde(default)]
    pages: Vec<ExtractPage>,
}

#[derive(Debug, Deserialize)]
struct ExtractPage {
    #[serde(default)]
    extract: Option<String>,
}

/// Wikipedia in the seed's own language, through the MediaWiki API.
#[derive(Debug, Clone)]
pub struct Wikipedia {
    client: MediaWikiClient,
}

impl Wikipedia {
    pub fn new(client: MediaWikiClient) -> Self {
        Self { client }
    }

    pub fn api_url(lang: Lang) -> String {
        format!("https://{}.wikipedia.org/w/api.php", lang.code())
    }
}

impl SearchSource for Wikipedia {
    /// Exact-phrase full-text search.
    fn search(&self, phrase: &str, lang: Lang, limit: usize) -> Result<Vec<String>> {
        let quoted = format!("\"{}\"", phrase);
        let limit = limit.to_string();
        let params = [
            ("action", "query"),
            ("list", "search"),
            ("srsearch", quoted.as_str()),
            ("srlimit", limit.as_str()),
            ("format", "json"),
        ];
        let resp: SearchResponse = self.client.query(&Self::api_url(lang), &params)?;
        Ok(resp
            .query
            .map(|q| q.search.into_iter().map(|hit| hit.title).collect())
            .unwrap_or_default())
    }
}

impl PageSource for Wikipedia {
    /// Plain-text extract, following redirects.
    fn fetch(&self, title: &str, lang: Lang) -> Result<Option<String>> {
        let params = [
            ("action", "query"),
            ("prop", "extracts"),
            ("explaintext", "1"),
            ("redirects", "1"),
            ("titles", title),
            ("format", "json"),
            ("formatversion", "2"),
        ];
        let resp: ExtractResponse = self.client.query(&Self::api_url(lang), &params)?;
        Ok(resp
            .query
            .and_then(|q| q.pages.into_iter().next())
            .and_then(|p| p.extract)
            .filter(|text| !text.trim().is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_url() {
        assert_eq!(Wikipedia::api_url(Lang::Asturian), "https://ast.wikipedia.org/w/api.php");
        assert_eq!(Wikipedia::api_url(Lang::Greek), "https://el.wikipedia.org/w/api.php");
    }

    #[test]
    fn test_decode_search_response() {
        let body = r#"{"batchcomplete":"","query":{"searchinfo":{"totalhits":2},
            "search":[{"ns":0,"title":"Sagua","pageid":1},{"ns":0,"title":"Teklatu","pageid":2}]}}"#;
        let resp: SearchResponse = serde_json::from_str(body).unwrap();
        let titles: Vec<String> = resp.query.unwrap().search.into_iter().map(|h| h.title).collect();
        assert_eq!(titles, ["Sagua", "Teklatu"]);
    }

    #[test]
    fn test_decode_missing_page() {
        let body = r#"{"batchcomplete":true,"query":{"pages":[{"ns":0,"title":"Ez","missing":true}]}}"#;
        let resp: ExtractResponse = serde_json::from_str(body).unwrap();
        assert!(resp.query.unwrap().pages[0].extract.is_none());
    }
}
