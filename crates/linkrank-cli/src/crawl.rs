//! Corpus crawler: a directory of HTML pages → adjacency relation.
//!
//! Only regular files ending in `.html` directly inside the directory are
//! pages. Links are the `href` values of anchor tags. Self-references and
//! links to files that are not pages of the corpus are removed, so the
//! result already satisfies the link graph's closed-corpus invariant.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use anyhow::{Context, Result};
use linkrank_core::Adjacency;
use regex::Regex;
use tracing::{debug, instrument};

fn href_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"<a\s+(?:[^>]*?)href="([^"]*)""#).expect("href pattern is a valid regex")
    })
}

/// Crawl `dir` and return page → linked pages.
///
/// # Errors
///
/// Returns an error if the directory or one of its pages cannot be read.
#[instrument]
pub fn crawl(dir: &Path) -> Result<Adjacency> {
    let entries =
        fs::read_dir(dir).with_context(|| format!("failed to read corpus {}", dir.display()))?;

    let mut pages = Adjacency::new();
    for entry in entries {
        let entry = entry.with_context(|| format!("failed to list {}", dir.display()))?;
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !name.ends_with(".html") || !path.is_file() {
            continue;
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("failed to read page {}", path.display()))?;
        let links = extract_links(&contents)
            .filter(|link| link != name)
            .collect();
        pages.insert(name.to_string(), links);
    }

    restrict_to_corpus(&mut pages);
    debug!(pages = pages.len(), "crawled corpus");
    Ok(pages)
}

/// All `href` targets of anchor tags in `html`.
pub fn extract_links(html: &str) -> impl Iterator<Item = String> + '_ {
    href_pattern()
        .captures_iter(html)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str().to_string())
}

/// Drop every link whose target is not itself a page.
fn restrict_to_corpus(pages: &mut Adjacency) {
    let known: std::collections::BTreeSet<String> = pages.keys().cloned().collect();
    for links in pages.values_mut() {
        links.retain(|link| known.contains(link));
    }
}
