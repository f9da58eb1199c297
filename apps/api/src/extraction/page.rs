use anyhow::{anyhow, Context, Result};
use reqwest::{header, Client};
use scraper::{Html, Node, Selector};

/// Desktop browser UA; many job boards refuse obvious bot agents.
pub const USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36";

/// Upper bound on page text forwarded to the LLM, in characters.
pub const MAX_PAGE_CHARS: usize = 10_000;

/// Subtrees that never carry posting content.
const STRIPPED_TAGS: &[&str] = &["script", "style", "nav", "header", "footer"];

/// GETs the job posting and returns its HTML.
pub async fn fetch_page(client: &Client, url: &str) -> Result<String> {
    let response = client
        .get(url)
        .header(header::USER_AGENT, USER_AGENT)
        .send()
        .await
        .context("Failed to fetch job posting")?;

    let status = response.status();
    if !status.is_success() {
        return Err(anyhow!("Failed to fetch job posting (status {status})"));
    }

    response
        .text()
        .await
        .context("Failed to read job posting body")
}

/// Visible text of the page body with whitespace collapsed, capped at
/// `MAX_PAGE_CHARS` characters.
pub fn page_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let root = Selector::parse("body")
        .ok()
        .and_then(|selector| document.select(&selector).next())
        .unwrap_or_else(|| document.root_element());

    let mut raw = String::new();
    for node in root.descendants() {
        let Node::Text(text) = node.value() else {
            continue;
        };
        let stripped = node.ancestors().any(|ancestor| {
            matches!(ancestor.value(), Node::Element(el) if STRIPPED_TAGS.contains(&el.name()))
        });
        if !stripped {
            raw.push_str(text);
        }
    }

    collapse_whitespace(&raw)
        .chars()
        .take(MAX_PAGE_CHARS)
        .collect()
}

fn collapse_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
