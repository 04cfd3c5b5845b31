//! The clone pipeline: authenticate, fetch the clone form, resubmit it with a
//! new target release, and read back the created bug.
//!
//! Strictly sequential; the first failing request aborts the run.

mod stage;

pub use stage::Stage;

use crate::auth;
use crate::config::ClonerConfig;
use crate::credentials::Credentials;
use crate::endpoints::TrackerEndpoints;
use crate::error::CloneError;
use crate::http::TrackerClient;
use crate::scrape::{
    clone_submission, scrape_cloned_bug, ClonedBug, FormFields, TARGET_RELEASE_FIELD,
};
use std::fmt;

/// What to clone and where to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneRequest {
    /// Target release for the new bug (e.g. "4.3.z").
    pub target_release: String,
    /// Id of the bug being cloned.
    pub source_bug: String,
}

/// Result of a successful run. Displays as the one-line summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneOutcome {
    pub target_release: String,
    pub bug: ClonedBug,
}

impl fmt::Display for CloneOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] Bug {}: {} [{}]",
            self.target_release, self.bug.id, self.bug.description, self.bug.url
        )
    }
}

/// Runs the whole workflow against the tracker described by `cfg`.
pub fn run_clone(
    cfg: &ClonerConfig,
    creds: &Credentials,
    request: &CloneRequest,
) -> Result<CloneOutcome, CloneError> {
    let endpoints = TrackerEndpoints::new(&cfg.base_url)?;
    let client = TrackerClient::new(cfg);
    tracing::info!(
        bug = %request.source_bug,
        target = %request.target_release,
        tracker = %endpoints.base(),
        "cloning bug"
    );

    let session = auth::authenticate(&client, &endpoints, creds, cfg.strict)?;
    let jar = &session.jar;

    let stage = session.stage;
    let clone_url = endpoints.enter_bug_clone(&cfg.product, &request.source_bug)?;
    let clone_page = client
        .get(&clone_url, jar)
        .map_err(|e| stage.request_failed("GET", &clone_url, e))?;

    Stage::ClonePageFetched.reached();
    let fields = match clone_submission(&clone_page.body, &request.target_release)? {
        Some(fields) => fields,
        None if cfg.strict => return Err(CloneError::CloneFormMissing),
        None => {
            tracing::warn!("clone page has no bug form; submitting target_release only");
            let mut fields = FormFields::new();
            fields.insert(TARGET_RELEASE_FIELD, request.target_release.as_str());
            fields
        }
    };

    let stage = Stage::FormScraped.reached();
    let post_url = endpoints.post_bug()?;
    let confirmation = client
        .post_form(&post_url, &fields, jar)
        .map_err(|e| stage.request_failed("POST", &post_url, e))?;

    Stage::Submitted.reached();
    let bug = scrape_cloned_bug(&confirmation.body, &endpoints)?;
    Stage::ResultScraped.reached();

    if !bug.is_linked() {
        if cfg.strict {
            return Err(CloneError::ClonedBugNotFound);
        }
        tracing::warn!("confirmation page has no link to the new bug");
    }

    Stage::Done.reached();
    tracing::info!(id = %bug.id, url = %bug.url, "cloned bug created");
    Ok(CloneOutcome {
        target_release: request.target_release.clone(),
        bug,
    })
}
