//! Lyrics extraction from Genius song pages
//!
//! Current pages split the lyrics over several
//! `div[data-lyrics-container="true"]` blocks; older pages use a single
//! `div.lyrics`. Both are tied to Genius markup and will quietly yield
//! nothing if it changes.

use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};

lazy_static! {
    static ref LYRICS_CONTAINER: Selector =
        Selector::parse(r#"div[data-lyrics-container="true"]"#).expect("valid container selector");
    static ref LEGACY_LYRICS: Selector =
        Selector::parse("div.lyrics").expect("valid legacy selector");
}

const EXCLUDE_ATTR: &str = "data-exclude-from-selection";

/// Pull lyric text out of a song page. Returns `None` when neither the
/// current nor the legacy markup yields any text.
pub fn extract_lyrics(html: &str) -> Option<String> {
    let document = Html::parse_document(html);

    let blocks: Vec<String> = document
        .select(&LYRICS_CONTAINER)
        .map(element_text)
        .filter(|text| !text.trim().is_empty())
        .collect();

    if !blocks.is_empty() {
        return Some(blocks.join("\n"));
    }

    document
        .select(&LEGACY_LYRICS)
        .next()
        .map(element_text)
        .filter(|text| !text.trim().is_empty())
}

fn element_text(element: ElementRef<'_>) -> String {
    let mut out = String::new();
    collect_text(element, &mut out);
    out
}

fn collect_text(element: ElementRef<'_>, out: &mut String) {
    for child in element.children() {
        match child.value() {
            Node::Text(text) => out.push_str(text),
            Node::Element(el) if el.name() == "br" => out.push('\n'),
            Node::Element(el) => {
                if el.attr(EXCLUDE_ATTR) == Some("true") {
                    continue;
                }
                if let Some(child_el) = ElementRef::wrap(child) {
                    collect_text(child_el, out);
                    if matches!(el.name(), "p" | "div") {
                        out.push('\n');
                    }
                }
            }
            _ => {}
        }
    }
}
