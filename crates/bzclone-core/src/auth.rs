//! Three-step login handshake against the tracker's index page.
//!
//! 1. GET index.cgi to receive the login-request cookie.
//! 2. GET index.cgi again with that cookie; the page now carries a
//!    `Bugzilla_login_token` in its mini login form.
//! 3. POST credentials plus the token to index.cgi; the response sets the
//!    session cookies.
//!
//! Cookies from every step accumulate in one jar, which is returned.

use crate::clone::Stage;
use crate::cookies::CookieJar;
use crate::credentials::Credentials;
use crate::endpoints::TrackerEndpoints;
use crate::error::CloneError;
use crate::http::TrackerClient;
use crate::scrape::{scrape_login_token, LOGIN_TOKEN_FIELD};

/// Cookie the tracker sets once the login POST is accepted.
pub const SESSION_COOKIE: &str = "Bugzilla_logincookie";

/// Cookies gathered by the handshake and the last stage it reached.
#[derive(Debug, Clone)]
pub struct Session {
    pub jar: CookieJar,
    /// `Authenticated` on success; earlier in lenient mode when a step fell short.
    pub stage: Stage,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.stage == Stage::Authenticated
    }
}

/// Runs the handshake and returns the session cookies.
///
/// With `strict`, a login page without a token is `CloneError::LoginTokenMissing`
/// and a login POST that sets no `Bugzilla_logincookie` is `CloneError::LoginFailed`.
/// Otherwise either gap is logged and the session is returned unauthenticated,
/// tagged with the stage actually reached.
pub fn authenticate(
    client: &TrackerClient,
    endpoints: &TrackerEndpoints,
    creds: &Credentials,
    strict: bool,
) -> Result<Session, CloneError> {
    let index = endpoints.index()?;
    let mut jar = CookieJar::new();

    let stage = Stage::Start.reached();
    let seed = client
        .get(&index, &jar)
        .map_err(|e| stage.request_failed("GET", &index, e))?;
    jar.absorb_headers(&seed.headers);

    let stage = Stage::CookieSeeded.reached();
    let login_page = client
        .get(&index, &jar)
        .map_err(|e| stage.request_failed("GET", &index, e))?;
    jar.absorb_headers(&login_page.headers);

    let Some(token) = scrape_login_token(&login_page.body)? else {
        if strict {
            return Err(CloneError::LoginTokenMissing);
        }
        tracing::warn!("login page has no {}; continuing unauthenticated", LOGIN_TOKEN_FIELD);
        return Ok(Session { jar, stage });
    };

    let stage = Stage::TokenFetched.reached();
    let fields = [
        ("Bugzilla_login", creds.email()),
        ("Bugzilla_password", creds.password()),
        (LOGIN_TOKEN_FIELD, token.as_str()),
        ("GoAheadAndLogIn", "1"),
    ];
    let login = client
        .post_form(&index, fields, &jar)
        .map_err(|e| stage.request_failed("POST", &index, e))?;
    jar.absorb_headers(&login.headers);

    if jar.get(SESSION_COOKIE).is_none() {
        if strict {
            return Err(CloneError::LoginFailed(creds.email().to_string()));
        }
        tracing::warn!("login as {} set no {}; continuing unauthenticated", creds.email(), SESSION_COOKIE);
        return Ok(Session { jar, stage });
    }

    let stage = Stage::Authenticated.reached();
    tracing::debug!(cookies = ?jar.names(), "logged in as {}", creds.email());
    Ok(Session { jar, stage })
}
