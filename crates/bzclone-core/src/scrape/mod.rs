//! HTML scraping for the three tracker pages the clone workflow reads.
//!
//! All functions here are pure: they take a document as a string and never
//! touch the network. Parsing is tolerant (html5ever recovers from malformed
//! markup), so absent elements show up as empty or `None` results rather
//! than errors; callers decide whether that is fatal.

mod bug;
mod form;
mod login;

pub use bug::{scrape_cloned_bug, ClonedBug};
pub use form::{
    clone_submission, scrape_form, FormFields, ENTER_BUG_FORM, SENTINEL_FIELD,
    TARGET_RELEASE_FIELD,
};
pub use login::{scrape_login_token, LOGIN_TOKEN_FIELD};

use crate::error::CloneError;
use scraper::Selector;

pub(crate) fn selector(css: &str) -> Result<Selector, CloneError> {
    Selector::parse(css).map_err(|_| CloneError::Selector(css.to_string()))
}
