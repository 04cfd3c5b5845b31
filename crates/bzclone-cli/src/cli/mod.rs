//! CLI for bzclone.

use anyhow::Result;
use bzclone_core::clone::{run_clone, CloneRequest};
use bzclone_core::config::{self, ClonerConfig};
use bzclone_core::credentials::Credentials;
use clap::builder::NonEmptyStringValueParser;
use clap::error::ErrorKind;
use clap::Parser;
use std::path::PathBuf;

/// Clone a Bugzilla bug to a new target release.
///
/// Credentials are read from BUGZILLA_EMAIL and BUGZILLA_PASSWORD.
#[derive(Debug, Parser)]
#[command(name = "bzclone", version)]
#[command(about = "Clone a Bugzilla bug to a new target release", long_about = None)]
pub struct Cli {
    /// Specify the target release (eg. '4.3.z').
    #[arg(long, value_name = "RELEASE", value_parser = NonEmptyStringValueParser::new())]
    pub target: String,

    /// Specify the source bug (eg. '1812863').
    #[arg(long, value_name = "ID", value_parser = NonEmptyStringValueParser::new())]
    pub bug: String,

    /// Product to file the clone under (overrides `product` in the config file).
    #[arg(long, value_parser = NonEmptyStringValueParser::new())]
    pub product: Option<String>,

    /// Read configuration from this file instead of ~/.config/bzclone/config.toml.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Parses process args; on error prints clap's message (with usage) and exits.
    pub fn parse_or_exit() -> Self {
        match Cli::try_parse() {
            Ok(cli) => cli,
            Err(err) => {
                let code = usage_exit_code(&err);
                let _ = err.print();
                std::process::exit(code);
            }
        }
    }

    pub fn request(&self) -> CloneRequest {
        CloneRequest {
            target_release: self.target.clone(),
            source_bug: self.bug.clone(),
        }
    }

    /// Applies flag overrides on top of the loaded config.
    pub fn apply_overrides(&self, cfg: &mut ClonerConfig) {
        if let Some(product) = &self.product {
            cfg.product = product.clone();
        }
    }

    pub fn run(self) -> Result<()> {
        let creds = Credentials::from_env()?;
        let mut cfg = match &self.config {
            Some(path) => config::load_from_path(path)?,
            None => config::load_or_init()?,
        };
        self.apply_overrides(&mut cfg);
        tracing::debug!("loaded config: {:?}", cfg);

        let outcome = run_clone(&cfg, &creds, &self.request())?;
        println!("{}", outcome);
        Ok(())
    }
}

/// Exit status for a parse failure: 0 for --help/--version, 1 otherwise.
pub(crate) fn usage_exit_code(err: &clap::Error) -> i32 {
    match err.kind() {
        ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => 0,
        _ => 1,
    }
}
