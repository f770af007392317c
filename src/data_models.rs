use serde::{Deserialize, Serialize};

pub const MAX_ORGANIC_RESULTS: usize = 5;
pub const LINK_PREFIX: &str = "Link: ";
pub const NO_RESULTS: &str = "No search results found.";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub title: String,
    pub link: String,
    pub snippet: String,
}

impl SearchHit {
    pub fn new(title: String, link: String, snippet: String) -> SearchHit {
        SearchHit {
            title,
            link,
            snippet,
        }
    }
}

/// Results of one search, in the provider's order, capped at
/// [`MAX_ORGANIC_RESULTS`] organic entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchResultSet {
    pub direct_answer: Option<String>,
    pub hits: Vec<SearchHit>,
}

impl SearchResultSet {
    pub fn is_empty(&self) -> bool {
        self.direct_answer.is_none() && self.hits.is_empty()
    }

    /// Render as the flat text block handed to callers.
    ///
    /// Every hit contributes exactly one line starting with [`LINK_PREFIX`];
    /// the research pipeline recovers URLs from those lines.
    pub fn render(&self) -> String {
        if self.is_empty() {
            return NO_RESULTS.to_string();
        }

        let mut blocks = Vec::with_capacity(self.hits.len() + 1);
        if let Some(answer) = &self.direct_answer {
            blocks.push(format!("💡 DIRECT ANSWER: {answer}\n"));
        }
        for hit in &self.hits {
            blocks.push(format!(
                "Title: {}\n{LINK_PREFIX}{}\nSnippet: {}\n---",
                hit.title, hit.link, hit.snippet
            ));
        }
        blocks.join("\n")
    }
}

impl From<SerperResponse> for SearchResultSet {
    fn from(response: SerperResponse) -> Self {
        let direct_answer = response
            .answer_box
            .and_then(|b| b.snippet.filter(|s| !s.is_empty()).or(b.answer))
            .filter(|s| !s.is_empty());

        let hits = response
            .organic
            .into_iter()
            .take(MAX_ORGANIC_RESULTS)
            .map(|item| {
                SearchHit::new(
                    item.title.unwrap_or_else(|| "No Title".to_string()),
                    item.link.unwrap_or_else(|| "#".to_string()),
                    item.snippet
                        .unwrap_or_else(|| "No description available.".to_string()),
                )
            })
            .collect();

        SearchResultSet {
            direct_answer,
            hits,
        }
    }
}

// Serper wire format. Only the fields we render are modelled.

#[derive(Deserialize, Debug, Default)]
pub struct SerperResponse {
    #[serde(rename = "answerBox", default)]
    pub answer_box: Option<SerperAnswerBox>,
    #[serde(default)]
    pub organic: Vec<SerperOrganic>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SerperAnswerBox {
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub answer: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
pub struct SerperOrganic {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    #[serde(default)]
    pub snippet: Option<String>,
}

#[derive(Serialize, Debug)]
pub struct SerperRequest<'a> {
    pub q: &'a str,
    pub gl: &'a str,
}

/// Returns the first `max_chars` characters of `text` when it is longer,
/// `None` when it already fits.
pub fn truncate_chars(text: &str, max_chars: usize) -> Option<&str> {
    text.char_indices()
        .nth(max_chars)
        .map(|(byte_idx, _)| &text[..byte_idx])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn parse(v: serde_json::Value) -> SearchResultSet {
        serde_json::from_value::<SerperResponse>(v).unwrap().into()
    }

    #[test]
    fn empty_response_renders_no_results() {
        let set = parse(json!({}));
        assert!(set.is_empty());
        assert_eq!(set.render(), NO_RESULTS);
    }

    #[test]
    fn answer_box_prefers_snippet_then_answer() {
        let set = parse(json!({"answerBox": {"snippet": "Paris", "answer": "ignored"}}));
        assert_eq!(set.direct_answer.as_deref(), Some("Paris"));

        let set = parse(json!({"answerBox": {"answer": "42"}}));
        assert_eq!(set.direct_answer.as_deref(), Some("42"));

        let set = parse(json!({"answerBox": {"title": "nothing usable"}}));
        assert!(set.direct_answer.is_none());
        assert_eq!(set.render(), NO_RESULTS);
    }

    #[test]
    fn direct_answer_leads_the_block() {
        let set = parse(json!({
            "answerBox": {"snippet": "Paris"},
            "organic": [{"title": "France", "link": "https://fr.test", "snippet": "Capital"}]
        }));
        assert_eq!(
            set.render(),
            "💡 DIRECT ANSWER: Paris\n\nTitle: France\nLink: https://fr.test\nSnippet: Capital\n---"
        );
    }

    #[test]
    fn organic_results_are_capped_in_order() {
        let organic: Vec<_> = (0..8)
            .map(|i| json!({"title": format!("t{i}"), "link": format!("https://{i}.test")}))
            .collect();
        let set = parse(json!({ "organic": organic }));
        assert_eq!(set.hits.len(), MAX_ORGANIC_RESULTS);
        let links: Vec<_> = set.hits.iter().map(|h| h.link.as_str()).collect();
        assert_eq!(
            links,
            ["https://0.test", "https://1.test", "https://2.test", "https://3.test", "https://4.test"]
        );
        assert_eq!(set.render().matches("\n---").count(), MAX_ORGANIC_RESULTS);
    }

    #[test]
    fn missing_fields_get_placeholders() {
        let set = parse(json!({"organic": [{}]}));
        assert_eq!(
            set.hits[0],
            SearchHit::new(
                "No Title".into(),
                "#".into(),
                "No description available.".into()
            )
        );
    }

    #[test]
    fn truncate_counts_chars_not_bytes() {
        assert_eq!(truncate_chars("hello", 5), None);
        assert_eq!(truncate_chars("hello", 3), Some("hel"));
        assert_eq!(truncate_chars("ééé", 2), Some("éé"));
        assert_eq!(truncate_chars("", 0), None);
    }
}
