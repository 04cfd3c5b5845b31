//! Library error type for the clone pipeline.

use crate::clone::Stage;
use crate::http::RequestError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloneError {
    /// A required credential variable is unset or empty.
    #[error("you must set BUGZILLA_EMAIL and BUGZILLA_PASSWORD environment variables ({0} is missing)")]
    MissingCredential(&'static str),

    /// The configured tracker URL could not be parsed or joined.
    #[error("invalid tracker URL {url:?}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Transport failure or non-2xx status. `stage` is the last stage reached.
    #[error("{method} {url} failed (after stage {stage})")]
    Request {
        method: &'static str,
        url: String,
        stage: Stage,
        #[source]
        source: RequestError,
    },

    /// The login page carried no `Bugzilla_login_token` input.
    #[error("login form has no Bugzilla_login_token field; cannot authenticate")]
    LoginTokenMissing,

    /// The login POST was answered without a session cookie (bad credentials, locked account).
    #[error("login as {0} was rejected by the tracker")]
    LoginFailed(String),

    /// The enter_bug.cgi page had no bug form to clone (unknown bug, no access).
    #[error("clone page has no bug form; nothing to submit")]
    CloneFormMissing,

    /// The post_bug.cgi response did not link to a new bug.
    #[error("confirmation page does not link to the cloned bug")]
    ClonedBugNotFound,

    #[error("invalid CSS selector {0:?}")]
    Selector(String),
}
