//! Cloned bug scraping from the post_bug.cgi confirmation page.

use super::selector;
use crate::endpoints::{TrackerEndpoints, SHOW_BUG_PREFIX};
use crate::error::CloneError;
use scraper::Html;

/// The bug created by the clone, as shown on the confirmation page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClonedBug {
    pub id: String,
    pub url: String,
    pub description: String,
}

impl ClonedBug {
    /// True when the page linked to the new bug.
    pub fn is_linked(&self) -> bool {
        !self.id.is_empty()
    }
}

/// Scrapes the new bug's id, URL and short description.
///
/// The first `show_bug.cgi?id=` link in the short-description container wins;
/// later ones are ignored. No link leaves `id` and `url` empty.
pub fn scrape_cloned_bug(html: &str, endpoints: &TrackerEndpoints) -> Result<ClonedBug, CloneError> {
    let anchor_sel = selector("#changeform .bz_short_desc_container a")?;
    let desc_sel = selector("#changeform span#short_desc_nonedit_display")?;
    let doc = Html::parse_document(html);

    let hrefs: Vec<&str> = doc
        .select(&anchor_sel)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.starts_with(SHOW_BUG_PREFIX))
        .collect();
    if hrefs.len() > 1 {
        tracing::debug!(candidates = hrefs.len(), "several cloned-bug links; using the first");
    }

    let mut bug = ClonedBug::default();
    if let Some(&href) = hrefs.first() {
        bug.id = href[SHOW_BUG_PREFIX.len()..].to_string();
        bug.url = endpoints.show_bug_url(href);
    }
    if let Some(span) = doc.select(&desc_sel).next() {
        bug.description = span.text().collect::<String>().trim().to_string();
    }
    Ok(bug)
}
