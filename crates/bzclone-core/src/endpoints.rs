//! Tracker URLs derived from the configured base URL.

use crate::error::CloneError;
use url::Url;

/// Prefix of the relative link to a bug on the confirmation page.
pub const SHOW_BUG_PREFIX: &str = "show_bug.cgi?id=";

#[derive(Debug, Clone)]
pub struct TrackerEndpoints {
    base: Url,
}

impl TrackerEndpoints {
    /// Parses `base_url`; a missing trailing slash is added so relative joins stay under it.
    pub fn new(base_url: &str) -> Result<Self, CloneError> {
        let normalized = if base_url.ends_with('/') {
            base_url.to_string()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).map_err(|source| CloneError::InvalidUrl {
            url: base_url.to_string(),
            source,
        })?;
        Ok(Self { base })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn index(&self) -> Result<Url, CloneError> {
        self.join("index.cgi")
    }

    pub fn enter_bug_clone(&self, product: &str, bug_id: &str) -> Result<Url, CloneError> {
        let mut url = self.join("enter_bug.cgi")?;
        url.query_pairs_mut()
            .append_pair("product", product)
            .append_pair("cloned_bug_id", bug_id);
        Ok(url)
    }

    pub fn post_bug(&self) -> Result<Url, CloneError> {
        self.join("post_bug.cgi")
    }

    /// Absolute display URL for a relative `show_bug.cgi?id=` link.
    pub fn show_bug_url(&self, href: &str) -> String {
        match self.base.join(href) {
            Ok(url) => url.to_string(),
            Err(_) => format!("{}{}", self.base, href),
        }
    }

    fn join(&self, path: &str) -> Result<Url, CloneError> {
        self.base.join(path).map_err(|source| CloneError::InvalidUrl {
            url: format!("{}{}", self.base, path),
            source,
        })
    }
}
