//! Login token scraping from the tracker's index page.

use super::selector;
use crate::error::CloneError;
use scraper::Html;

/// Hidden anti-forgery input in the login form.
pub const LOGIN_TOKEN_FIELD: &str = "Bugzilla_login_token";

/// Returns the value of the first `Bugzilla_login_token` input inside a
/// `.mini_login` form, or `None` if the page has no login form (e.g. the
/// cookie was not accepted, or the session is already logged in).
///
/// The page renders the mini login form in both header and footer; both carry
/// the same token, so the first one is used.
pub fn scrape_login_token(html: &str) -> Result<Option<String>, CloneError> {
    let sel = selector(".mini_login input")?;
    let doc = Html::parse_document(html);
    let token = doc
        .select(&sel)
        .find(|input| input.value().attr("name") == Some(LOGIN_TOKEN_FIELD))
        .map(|input| input.value().attr("value").unwrap_or("").to_string());
    Ok(token)
}
