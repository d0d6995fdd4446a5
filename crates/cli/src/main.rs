//! Memberdesk admin command-line client.

mod cli;
mod logging;
mod terminal;

use memberdesk_infra::ApiError;

fn main() {
    if let Err(err) = cli::run() {
        // Session expiry already told the user what happened.
        if matches!(err.downcast_ref::<ApiError>(), Some(ApiError::SessionExpired)) {
            std::process::exit(3);
        }
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
