use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use reqwest::Client;
use scraper::{node::Node, Html, Selector};
use serde::Serialize;
use url::Url;

use crate::error::{AppError, Result};

// Static selectors to avoid recompiling them on every request
static TITLE_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("title").expect("Failed to parse title selector")
});

static META_DESCRIPTION_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="description"]"#).expect("Failed to parse description selector")
});

static META_KEYWORDS_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse(r#"meta[name="keywords"]"#).expect("Failed to parse keywords selector")
});

static LINK_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("a[href]").expect("Failed to parse link selector")
});

static MAIN_CONTENT_SELECTOR: Lazy<Selector> = Lazy::new(|| {
    Selector::parse("main, article, div.content").expect("Failed to parse content selector")
});

const SUMMARY_CHAR_LIMIT: usize = 500;
const LINK_LIMIT: usize = 10;

#[derive(Debug, Serialize)]
pub struct MetaInfo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub keywords: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StatusInfo {
    pub status_code: u16,
    pub content_type: Option<String>,
    pub server: Option<String>,
    pub final_url: String,
}

/// Everything extracted from one page. Serialized as the `data` mapping of a
/// successful analyze response.
#[derive(Debug, Serialize)]
pub struct SiteReport {
    pub url: String,
    pub meta_info: MetaInfo,
    pub content_summary: String,
    pub links: Vec<String>,
    pub word_count: usize,
    pub status: StatusInfo,
    pub analyzed_at: DateTime<Utc>,
}

/// Accepts only absolute http(s) URLs with a host.
pub fn validate_url(raw: &str) -> Result<Url> {
    let url = Url::parse(raw).map_err(|e| AppError::InvalidUrl(format!("{}: {}", raw, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(AppError::InvalidUrl(format!(
            "{}: unsupported scheme '{}'",
            raw,
            url.scheme()
        )));
    }
    if url.host_str().map_or(true, |h| h.is_empty()) {
        return Err(AppError::InvalidUrl(format!("{}: missing host", raw)));
    }

    Ok(url)
}

/// Fetches the page and extracts metadata, a content summary, links and a
/// word count.
pub async fn analyze_site(client: &Client, raw_url: &str) -> Result<SiteReport> {
    let url = validate_url(raw_url)?;

    log::info!("Fetching {}", url);
    let response = client.get(url.clone()).send().await?;

    let status_code = response.status().as_u16();
    if !response.status().is_success() {
        return Err(AppError::FetchError(format!(
            "{} returned HTTP {}",
            url, status_code
        )));
    }

    let header = |name: &str| {
        response
            .headers()
            .get(name)
            .and_then(|v| v.to_str().ok())
            .map(|v| v.to_string())
    };
    let status = StatusInfo {
        status_code,
        content_type: header("content-type"),
        server: header("server"),
        final_url: response.url().to_string(),
    };

    let html = response.text().await?;
    log::debug!("Fetched {} bytes from {}", html.len(), url);

    let document = Html::parse_document(&html);

    let meta_info = extract_meta(&document);
    let links = extract_links(&document);

    let text = extract_text(&html);
    let word_count = text.split_whitespace().count();

    let content_summary = summarize_content(&document, &text);

    log::info!("Analyzed {}: {} words, {} links", url, word_count, links.len());

    Ok(SiteReport {
        url: raw_url.to_string(),
        meta_info,
        content_summary,
        links,
        word_count,
        status,
        analyzed_at: Utc::now(),
    })
}

fn extract_meta(document: &Html) -> MetaInfo {
    let title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string())
        .filter(|t| !t.is_empty());

    let meta_content = |selector: &Selector| {
        document
            .select(selector)
            .next()
            .and_then(|el| el.value().attr("content"))
            .map(|c| c.to_string())
    };

    MetaInfo {
        title,
        description: meta_content(&META_DESCRIPTION_SELECTOR),
        keywords: meta_content(&META_KEYWORDS_SELECTOR),
    }
}

fn extract_links(document: &Html) -> Vec<String> {
    document
        .select(&LINK_SELECTOR)
        .filter_map(|el| el.value().attr("href"))
        .map(|href| href.to_string())
        .take(LINK_LIMIT)
        .collect()
}

/// Plain text of the page with script and style contents stripped, one
/// non-empty line per text chunk.
pub fn extract_text(html: &str) -> String {
    let document = Html::parse_document(html);

    let mut raw = String::new();
    for node in document.tree.nodes() {
        if let Node::Text(text) = node.value() {
            let excluded = node.ancestors().any(|a| match a.value() {
                Node::Element(el) => matches!(el.name(), "script" | "style"),
                _ => false,
            });
            if !excluded {
                raw.push_str(text);
                raw.push('\n');
            }
        }
    }

    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

/// Text of the main content region (falling back to the whole page),
/// truncated to a fixed length.
fn summarize_content(document: &Html, full_text: &str) -> String {
    let main_text = document
        .select(&MAIN_CONTENT_SELECTOR)
        .next()
        .map(|el| {
            el.text()
                .map(str::trim)
                .filter(|chunk| !chunk.is_empty())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_else(|| full_text.to_string());

    truncate_summary(&main_text)
}

fn truncate_summary(text: &str) -> String {
    if text.chars().count() > SUMMARY_CHAR_LIMIT {
        let mut truncated: String = text.chars().take(SUMMARY_CHAR_LIMIT).collect();
        truncated.push_str("...");
        truncated
    } else {
        text.to_string()
    }
}
