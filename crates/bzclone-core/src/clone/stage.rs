//! Pipeline stages, in the order a run passes through them.

use crate::error::CloneError;
use crate::http::RequestError;
use std::fmt;
use url::Url;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Start,
    CookieSeeded,
    TokenFetched,
    Authenticated,
    ClonePageFetched,
    FormScraped,
    Submitted,
    ResultScraped,
    Done,
}

impl Stage {
    pub fn as_str(self) -> &'static str {
        match self {
            Stage::Start => "start",
            Stage::CookieSeeded => "cookie-seeded",
            Stage::TokenFetched => "token-fetched",
            Stage::Authenticated => "authenticated",
            Stage::ClonePageFetched => "clone-page-fetched",
            Stage::FormScraped => "form-scraped",
            Stage::Submitted => "submitted",
            Stage::ResultScraped => "result-scraped",
            Stage::Done => "done",
        }
    }

    /// Logs the transition and returns `self`.
    pub(crate) fn reached(self) -> Self {
        tracing::debug!(stage = self.as_str(), "clone stage reached");
        self
    }

    /// Wraps a failed request made while the pipeline was at `self`.
    pub(crate) fn request_failed(self, method: &'static str, url: &Url, source: RequestError) -> CloneError {
        CloneError::Request {
            method,
            url: url.to_string(),
            stage: self,
            source,
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
