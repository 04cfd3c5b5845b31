use bzclone_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Flags first: a usage error must exit before any config or network I/O.
    let cli = Cli::parse_or_exit();

    if logging::init_logging().is_err() {
        logging::init_logging_stderr();
    }

    if let Err(err) = cli.run() {
        tracing::error!("{:#}", err);
        eprintln!("bzclone error: {:#}", err);
        std::process::exit(1);
    }
}
