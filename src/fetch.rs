//! Article source provider
//!
//! Retrieves the rendered article page and the raw edit-source wikitext from
//! English Wikipedia, and walks the rendered HTML into the typed content
//! nodes the segmenter consumes. Behind the [`ArticleSource`] trait so the
//! pipeline can run against canned pages in tests.

use once_cell::sync::Lazy;
use regex::Regex;
use scraper::{Html, Selector};

use crate::error::{Result, WikiturnError};
use crate::segment::ContentNode;

static CONTENT_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mw-parser-output").unwrap());
static NODE_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("p, ul, h1, h2, h3, h4, h5, h6").unwrap());
static CATEGORY_SEL: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.mw-normal-catlinks a").unwrap());
static EDIT_BOX_SEL: Lazy<Selector> = Lazy::new(|| Selector::parse("textarea#wpTextbox1").unwrap());

/// The page skeleton carries the revision id in its JS config vars.
static REVISION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#""wgRevisionId":\s*(\d+)"#).unwrap());

/// A rendered article page, reduced to what the pipeline needs.
#[derive(Debug, Clone)]
pub struct RenderedArticle {
    /// Typed content nodes in document order
    pub nodes: Vec<ContentNode>,
    /// Source revision id, recorded in the attribution template
    pub revision: String,
    /// Category link texts, including the leading self-reference entry
    pub categories: Vec<String>,
    /// Rendered text length in characters, used for the quota preflight
    pub char_count: u64,
}

/// Capability of retrieving an article in both of its forms.
pub trait ArticleSource {
    /// The rendered page for a title, or [`WikiturnError::ArticleNotFound`].
    fn rendered(&self, title: &str) -> Result<RenderedArticle>;

    /// The raw edit-source wikitext for a title.
    fn edit_source(&self, title: &str) -> Result<String>;
}

/// Live source backed by `en.wikipedia.org`.
pub struct WikipediaSource {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl WikipediaSource {
    pub fn new() -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(std::time::Duration::from_secs(60))
            .user_agent(concat!("wikiturn/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            base_url: "https://en.wikipedia.org".to_string(),
        })
    }

    fn article_url(&self, title: &str) -> String {
        format!("{}/wiki/{}", self.base_url, encode_title(title))
    }

    fn edit_url(&self, title: &str) -> String {
        format!(
            "{}/w/index.php?title={}&action=edit",
            self.base_url,
            encode_title(title)
        )
    }
}

impl ArticleSource for WikipediaSource {
    fn rendered(&self, title: &str) -> Result<RenderedArticle> {
        let url = self.article_url(title);
        tracing::debug!("fetching rendered article from {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(WikiturnError::ArticleNotFound(title.to_string()));
        }

        parse_rendered(&response.text()?, title)
    }

    fn edit_source(&self, title: &str) -> Result<String> {
        let url = self.edit_url(title);
        tracing::debug!("fetching edit source from {}", url);

        let response = self.client.get(&url).send()?;
        if !response.status().is_success() {
            return Err(WikiturnError::FetchError(format!(
                "edit page for '{}' returned {}",
                title,
                response.status()
            )));
        }

        parse_edit_source(&response.text()?)
    }
}

/// Normalize a title for use in a URL: spaces become underscores.
fn encode_title(title: &str) -> String {
    urlencoding::encode(&title.replace(' ', "_")).into_owned()
}

/// Turn a display name back into the form shown in running text.
pub fn display_name(title: &str) -> String {
    title.replace('_', " ")
}

/// Reduce a rendered article page to content nodes, revision, categories and
/// character count.
pub fn parse_rendered(html: &str, title: &str) -> Result<RenderedArticle> {
    let document = Html::parse_document(html);

    let content = document
        .select(&CONTENT_SEL)
        .next()
        .ok_or_else(|| WikiturnError::ArticleNotFound(title.to_string()))?;

    let mut nodes = Vec::new();
    for element in content.select(&NODE_SEL) {
        let text = element_text(&element);
        match element.value().name() {
            "p" => nodes.push(ContentNode::Paragraph(text)),
            "ul" => nodes.push(ContentNode::ListBlock(text)),
            name => {
                // h1..h6, the level is the digit in the tag name
                if let Some(level) = name.strip_prefix('h').and_then(|d| d.parse::<u8>().ok()) {
                    nodes.push(ContentNode::Heading { level, text });
                }
            }
        }
    }

    let revision = REVISION_RE
        .captures(html)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    if revision.is_empty() {
        tracing::warn!("no revision id found for '{}'", title);
    }

    let categories: Vec<String> = document
        .select(&CATEGORY_SEL)
        .map(|a| element_text(&a))
        .collect();

    let char_count = element_text(&content).chars().count() as u64;

    Ok(RenderedArticle {
        nodes,
        revision,
        categories,
        char_count,
    })
}

/// Pull the wikitext out of the editor's textarea. The HTML parser has
/// already decoded the entity-escaped markup by the time we read the text.
pub fn parse_edit_source(html: &str) -> Result<String> {
    let document = Html::parse_document(html);
    let textarea = document
        .select(&EDIT_BOX_SEL)
        .next()
        .ok_or_else(|| WikiturnError::FetchError("edit box not found in edit page".to_string()))?;
    Ok(textarea.text().collect())
}

fn element_text(element: &scraper::ElementRef) -> String {
    element.text().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PAGE: &str = r#"
        <html><head><script>"wgRevisionId":1234567890,</script></head>
        <body>
        <div class="mw-parser-output">
            <p>Intro text.[1]</p>
            <h2><span>History</span>[edit]</h2>
            <p>Later text.</p>
            <ul><li>one</li>
<li>two</li></ul>
        </div>
        <div class="mw-normal-catlinks">
            <a href="/wiki/Help:Category">Categories</a>
            <a href="/wiki/Category:Towns">Towns</a>
            <a href="/wiki/Category:Rivers">Rivers</a>
        </div>
        </body></html>"#;

    #[test]
    fn test_parse_rendered_nodes_in_order() {
        let article = parse_rendered(PAGE, "Test").unwrap();
        assert_eq!(article.nodes.len(), 4);
        assert_eq!(
            article.nodes[0],
            ContentNode::Paragraph("Intro text.[1]".to_string())
        );
        assert_eq!(
            article.nodes[1],
            ContentNode::Heading {
                level: 2,
                text: "History[edit]".to_string()
            }
        );
        assert!(matches!(article.nodes[3], ContentNode::ListBlock(_)));
    }

    #[test]
    fn test_parse_rendered_revision_and_categories() {
        let article = parse_rendered(PAGE, "Test").unwrap();
        assert_eq!(article.revision, "1234567890");
        assert_eq!(article.categories, vec!["Categories", "Towns", "Rivers"]);
    }

    #[test]
    fn test_parse_rendered_counts_characters() {
        let article = parse_rendered(PAGE, "Test").unwrap();
        assert!(article.char_count > 0);
    }

    #[test]
    fn test_parse_rendered_missing_content_is_not_found() {
        let result = parse_rendered("<html><body></body></html>", "Missing");
        assert!(matches!(result, Err(WikiturnError::ArticleNotFound(_))));
    }

    #[test]
    fn test_parse_edit_source_decodes_entities() {
        let html = r#"<textarea id="wpTextbox1">Body&lt;ref&gt;Cite A&lt;/ref&gt; end.</textarea>"#;
        let wikitext = parse_edit_source(html).unwrap();
        assert_eq!(wikitext, "Body<ref>Cite A</ref> end.");
    }

    #[test]
    fn test_parse_edit_source_missing_box_is_fetch_error() {
        let result = parse_edit_source("<html></html>");
        assert!(matches!(result, Err(WikiturnError::FetchError(_))));
    }

    #[test]
    fn test_display_name_replaces_underscores() {
        assert_eq!(display_name("Albert_Einstein"), "Albert Einstein");
    }
}
